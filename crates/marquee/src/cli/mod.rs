//! Command-line interface for the `marquee` binary.

mod commands;
mod run;

pub use commands::{AnalyzeArgs, BusinessArgs, Cli, Commands, EventArgs, PromotionArgs};
pub use run::{execute, run};
