//! Command-line interface and orchestration for tb-metrics
//!
//! This module parses the command line and drives one end-to-end collection.
//!
//! # Execution Flow
//!
//! 1. Initialize logging and check the bugzilla credential
//! 2. Load configuration (`tb-metrics.toml` or `--config`)
//! 3. Fetch the version metadata and resolve every channel's versions
//! 4. Run all queries, bugzilla first, then usage, then crash-stats
//! 5. Compute the derived ratios
//! 6. Print the console summary, write the spreadsheet and open it
//!
//! Nothing is written to disk until every metric has been computed, so a failed run
//! leaves no partial report behind.

mod collect;
mod common;
mod config;
mod host;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use collect::{CollectArgs, collect_metrics};
pub use host::Host;
pub use run::run;
