use structopt::StructOpt;

use crate::common::Run;
use crate::modules::{bokadirekt::Bokadirekt, page::Page};
use crate::run_impl_enum;

#[derive(StructOpt)]
#[structopt(name = "livebetyg-cli")]
pub enum Command {
    /// Talk to the Bokadirekt listing directly.
    Bokadirekt(Bokadirekt),
    /// Work on statically rendered site pages.
    Page(Page),
}

run_impl_enum!(Command, self, ser, {
    match self {
        Self::Bokadirekt(b) => b.run(ser).await?,
        Self::Page(p) => p.run(ser).await?,
    }
});
