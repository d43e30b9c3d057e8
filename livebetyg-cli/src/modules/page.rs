use std::path::PathBuf;

use structopt::StructOpt;

use crate::common::Run;
use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Page {
    #[structopt(subcommand)]
    action: Action,
}

run_impl_struct!(Page, action);

#[derive(StructOpt)]
enum Action {
    /// Patch the live rating into a statically rendered page.
    Enhance {
        /// Static page to read.
        #[structopt(long, parse(from_os_str))]
        input: PathBuf,
        /// Rating endpoint asked for the live snapshot.
        #[structopt(
            long,
            default_value = "http://127.0.0.1:8080/api/bokadirekt-rating"
        )]
        endpoint: String,
        /// Where to write the enhanced page; stdout when omitted.
        #[structopt(long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

run_impl_enum!(Action, self, ser, {
    match self {
        Self::Enhance {
            input,
            endpoint,
            output,
        } => {
            let page = std::fs::read_to_string(input)?;
            let enhanced =
                livebetyg::presenter::enhance(&Default::default(), endpoint, &page).await;
            match output {
                Some(path) => {
                    std::fs::write(path, enhanced)?;
                    erased_serde::serialize(&path.display().to_string(), ser)?;
                }
                None => print!("{}", enhanced),
            }
        }
    }
});
