use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::facts::{API_KEY_VARIABLE, ApiKey, Collector, LegacyEsrPolicy, PreviousLines, RunContext, RunDates, client, fetch_metadata};
use crate::metrics::{MetricsTable, compute_derived};
use crate::queries::QueryBuilder;
use crate::reports::{generate_console, generate_xlsx, write_report};
use crate::versions::{Channel, EsrLine};
use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Also count the previous nightly line in daily metrics
    #[arg(short = 'd', long)]
    pub include_previous_daily: bool,

    /// Also count the previous beta line in beta metrics
    #[arg(short = 'b', long)]
    pub include_previous_beta: bool,

    /// Also count the previous release line in release metrics
    #[arg(short = 'r', long)]
    pub include_previous_release: bool,

    /// Anchor status and ESR metrics on the upcoming ESR line
    #[arg(long)]
    pub esr_next: bool,

    /// Keep installations of legacy ESR lines in total-adi
    #[arg(long)]
    pub include_legacy_esr: bool,

    /// Report date; metrics cover the preceding day [default: today, UTC]
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Path to configuration file (default is `tb-metrics.toml` in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Write the spreadsheet to this path instead of a temporary file
    #[arg(long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Do not open the spreadsheet once written
    #[arg(long)]
    pub no_open: bool,

    /// Bugzilla API key
    #[arg(long, env = API_KEY_VARIABLE, value_name = "KEY", hide_env_values = true)]
    pub bmo_api_key: Option<String>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Collect every metric, print a summary and export the spreadsheet
///
/// # Errors
///
/// Returns an error if the credential is missing, the configuration is invalid, any
/// remote query fails, a derived ratio cannot be computed, or the report cannot be written
pub async fn collect_metrics<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    init_logging(args.log_level);

    // checked before anything goes over the network
    let api_key = ApiKey::new(args.bmo_api_key.as_deref())?;

    let base_dir = std::env::current_dir().into_app_err("determining the current directory")?;
    let base_dir = Utf8PathBuf::try_from(base_dir).into_app_err("the current directory is not valid UTF-8")?;
    let config = Config::load(&base_dir, args.config.as_ref())?;

    let dates = args.date.map_or_else(RunDates::today_utc, RunDates::new);
    log::info!(target: LOG_TARGET, "Report date {}, metrics for {}", dates.today(), dates.yesterday());

    let client = client()?;
    let endpoints = config.endpoints();
    let metadata = fetch_metadata(&client, &endpoints.product_details)
        .await
        .into_app_err("retrieving Thunderbird version metadata")?;

    let previous = PreviousLines {
        daily: args.include_previous_daily,
        beta: args.include_previous_beta,
        release: args.include_previous_release,
    };
    let esr_line = if args.esr_next { EsrLine::Next } else { EsrLine::Current };
    let context = RunContext::new(metadata, dates, previous, esr_line).into_app_err("resolving versions")?;

    let builder = QueryBuilder::new(endpoints, config.exclusions(), dates);
    let legacy_esr = LegacyEsrPolicy {
        cutoff: config.legacy_esr_cutoff,
        include: args.include_legacy_esr,
    };

    let mut collector = Collector::new(client, &builder, &context, api_key, legacy_esr);
    let mut table = MetricsTable::new(context.esr_major());
    collector.collect_all(&mut table).await?;
    compute_derived(&mut table).into_app_err("computing derived metrics")?;

    let esr = collector.esr_versions().await.into_app_err("discovering ESR versions")?;

    let mut versions: Vec<(&str, String)> = Channel::iter()
        .map(|channel| (channel.label(), context.versions(channel).to_string()))
        .collect();
    versions.push(("esr versions", esr.all.join(", ")));

    let mut console_output = String::new();
    _ = generate_console(&versions, &table, args.color.use_colors(), &mut console_output);
    let _ = write!(host.output(), "{console_output}");

    let mut workbook = Vec::new();
    generate_xlsx(&table, dates.today(), &mut workbook).into_app_err("generating the spreadsheet")?;
    let path = write_report(&workbook, args.output.as_deref()).into_app_err("writing the spreadsheet")?;
    let _ = writeln!(host.output(), "\nReport written to {path}");

    if !args.no_open
        && let Err(e) = host.open(&path)
    {
        let _ = writeln!(host.error(), "Failed to open the file: {e}");
    }

    Ok(())
}
