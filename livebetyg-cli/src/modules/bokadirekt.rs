use structopt::StructOpt;

use crate::common::Run;
use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Bokadirekt {
    #[structopt(subcommand)]
    query_type: QueryType,
}

run_impl_struct!(Bokadirekt, query_type);

#[derive(StructOpt)]
enum QueryType {
    /// Scrape the listing page and print the rating snapshot.
    Rating,
}

run_impl_enum!(QueryType, self, ser, {
    match self {
        Self::Rating => {
            erased_serde::serialize(
                livebetyg::modules::bokadirekt::Listing::fetch(&Default::default())
                    .await
                    .snapshot(),
                ser,
            )?;
        }
    }
});
