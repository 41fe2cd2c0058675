//! Command dispatch logic for tb-metrics

use super::{CollectArgs, collect_metrics};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "tb-metrics", version, author, long_about = None)]
#[command(about = "Collect Thunderbird release-readiness metrics into a spreadsheet")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: CollectArgs,
}

/// Parse command-line arguments and run a collection
///
/// This function is designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the collection fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    collect_metrics(host, &cli.args).await
}
