use super::bugzilla::{self, ApiKey};
use super::crash_stats;
use super::run_context::RunContext;
use super::usage::{self, EsrVersions, UsageDocument};
use crate::Result;
use crate::error::Error;
use crate::metrics::{METRIC_DEFINITIONS, MetricValue, MetricsTable};
use crate::queries::{CrashQuery, Query, QueryBuilder, QueryFamily, Rendering, UsageQuery};
use crate::versions::{Channel, VersionSet};
use ohno::IntoAppError;
use reqwest::Client;

const LOG_TARGET: &str = " collector";

/// How installations of old ESR lines are treated in the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyEsrPolicy {
    /// Highest major version considered legacy
    pub cutoff: u32,

    /// Keep legacy installations in `total-adi`
    pub include: bool,
}

/// Runs every query of a report, one request at a time.
#[derive(Debug)]
pub struct Collector<'a> {
    client: Client,
    builder: &'a QueryBuilder,
    context: &'a RunContext,
    api_key: ApiKey,
    legacy_esr: LegacyEsrPolicy,
    usage: Option<UsageDocument>,
}

impl<'a> Collector<'a> {
    #[must_use]
    pub const fn new(
        client: Client,
        builder: &'a QueryBuilder,
        context: &'a RunContext,
        api_key: ApiKey,
        legacy_esr: LegacyEsrPolicy,
    ) -> Self {
        Self {
            client,
            builder,
            context,
            api_key,
            legacy_esr,
            usage: None,
        }
    }

    /// Run one query and return its count.
    pub async fn collect(&mut self, query: Query) -> Result<u64, Error> {
        match query {
            Query::Bug(_) => {
                let url = self.builder.build_url(query, self.context.versions(Channel::Status), Rendering::Api);
                bugzilla::count_bugs(&self.client, &url, &self.api_key).await
            }
            Query::Usage(usage_query) => self.collect_usage(usage_query).await,
            Query::Crash(crash_query) => {
                let versions = self.crash_versions(crash_query).await?;
                let url = self.builder.build_url(query, &versions, Rendering::Api);
                crash_stats::count_crashes(&self.client, &url).await
            }
        }
    }

    /// The link a person follows to see the results of `query`, if it has one.
    pub async fn browsable_url(&mut self, query: Query) -> Result<Option<String>, Error> {
        let url = match query {
            Query::Bug(_) => Some(
                self.builder
                    .build_url(query, self.context.versions(Channel::Status), Rendering::Browsable),
            ),
            Query::Usage(_) => None,
            Query::Crash(crash_query) => {
                let versions = self.crash_versions(crash_query).await?;
                Some(self.builder.build_url(query, &versions, Rendering::Browsable))
            }
        };

        Ok(url)
    }

    /// The ESR versions reported in the most recent day of the usage document.
    pub async fn esr_versions(&mut self) -> Result<EsrVersions, Error> {
        let major = self.context.esr_major();
        let document = self.usage_document().await?;
        let day = document.latest_day().ok_or_else(|| Error::UnexpectedResponse {
            service: "usage-stats",
            reason: "the usage document has no entries".to_string(),
        })?;

        Ok(EsrVersions::discover(day, major))
    }

    /// Run every query, bugzilla first, then usage, then crash-stats.
    ///
    /// Each count and browsable URL is stored in `table`. The first failure aborts the run.
    pub async fn collect_all(&mut self, table: &mut MetricsTable) -> Result<()> {
        for family in [QueryFamily::Bugzilla, QueryFamily::Usage, QueryFamily::CrashStats] {
            let queries = METRIC_DEFINITIONS
                .iter()
                .filter_map(|def| def.query())
                .filter(|query| query.family() == family);

            for query in queries {
                let count = self.collect(query).await.into_app_err_with(|| format!("collecting {query}"))?;
                log::info!(target: LOG_TARGET, "{}: {count}", query.key());
                table.set_value(query.key(), MetricValue::Count(count));

                if let Query::Usage(usage_query) = query
                    && let Some(current) = self
                        .current_line_usage(usage_query)
                        .await
                        .into_app_err_with(|| format!("collecting {query} for the current line"))?
                {
                    log::debug!(target: LOG_TARGET, "{} (current line): {current}", query.key());
                    table.set_current_line_count(query.key(), current);
                }

                if let Some(url) = self
                    .browsable_url(query)
                    .await
                    .into_app_err_with(|| format!("building the link for {query}"))?
                {
                    table.set_url(query.key(), url);
                }
            }
        }

        Ok(())
    }

    async fn collect_usage(&mut self, query: UsageQuery) -> Result<u64, Error> {
        let context = self.context;
        let legacy_esr = self.legacy_esr;

        let esr = if query == UsageQuery::Esr {
            Some(self.esr_versions().await?)
        } else {
            None
        };

        let document = self.usage_document().await?;
        let day = document.day(context.dates().yesterday())?;

        let count = match query {
            UsageQuery::Daily => day.sum_versions(context.versions(Channel::Daily).iter()),
            UsageQuery::Beta => day.beta_count(context.versions(Channel::Beta)),
            UsageQuery::Release => day.sum_versions(context.versions(Channel::Release).iter()),
            UsageQuery::Total => {
                let legacy = day.legacy_esr_count(legacy_esr.cutoff);
                if legacy_esr.include {
                    log::info!(target: LOG_TARGET, "ESR {} and older: {legacy} (included in the total)", legacy_esr.cutoff);
                    day.count
                } else {
                    let total = day.count.saturating_sub(legacy);
                    log::info!(
                        target: LOG_TARGET,
                        "ESR {} and older: {legacy} excluded, total {} -> {total}",
                        legacy_esr.cutoff,
                        day.count
                    );
                    total
                }
            }
            UsageQuery::Esr => {
                let esr = esr.unwrap_or_default();
                log::info!(target: LOG_TARGET, "ESR {} versions: {}", context.esr_major(), esr.all.join(", "));
                day.sum_versions(esr.all.iter().map(String::as_str))
            }
        };

        Ok(count)
    }

    /// Installations of a channel's current line alone, for the channels that can include
    /// a previous line.
    pub async fn current_line_usage(&mut self, query: UsageQuery) -> Result<Option<u64>, Error> {
        let channel = match query {
            UsageQuery::Daily => Channel::Daily,
            UsageQuery::Beta => Channel::Beta,
            UsageQuery::Release => Channel::Release,
            UsageQuery::Total | UsageQuery::Esr => return Ok(None),
        };

        let context = self.context;
        let document = self.usage_document().await?;
        let day = document.day(context.dates().yesterday())?;
        let versions = context.current_versions(channel);

        let count = if channel == Channel::Beta {
            day.beta_count(versions)
        } else {
            day.sum_versions(versions.iter())
        };

        Ok(Some(count))
    }

    async fn crash_versions(&mut self, query: CrashQuery) -> Result<VersionSet, Error> {
        let versions = match query {
            CrashQuery::Daily => self.context.current_versions(Channel::Daily).clone(),
            CrashQuery::Beta => self.context.current_versions(Channel::Beta).clone(),
            CrashQuery::Release => self.context.current_versions(Channel::Release).clone(),
            CrashQuery::Esr => self.esr_versions().await?.crash_stats_versions(),
        };

        Ok(versions)
    }

    /// The usage document, fetched on first use and kept for the rest of the run.
    async fn usage_document(&mut self) -> Result<&UsageDocument, Error> {
        let document = match self.usage.take() {
            Some(document) => document,
            None => usage::fetch_document(&self.client, &self.builder.endpoints().usage_stats).await?,
        };

        Ok(self.usage.insert(document))
    }
}
