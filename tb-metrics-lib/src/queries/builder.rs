use super::{Exclusions, Query, Rendering, bugzilla, crash_stats};
use crate::facts::RunDates;
use crate::versions::VersionSet;

/// Base URLs of the remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub product_details: String,
    pub bugzilla: String,
    pub usage_stats: String,
    pub crash_stats: String,
}

/// Turns queries into URLs for one run.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    endpoints: Endpoints,
    exclusions: Exclusions,
    dates: RunDates,
}

impl QueryBuilder {
    #[must_use]
    pub const fn new(endpoints: Endpoints, exclusions: Exclusions, dates: RunDates) -> Self {
        Self {
            endpoints,
            exclusions,
            dates,
        }
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Build the URL for `query`.
    ///
    /// `versions` is the status set for bugzilla queries and the channel's set for crash-stats
    /// queries. Usage queries all read the same document, so they ignore both `versions` and
    /// `rendering` and yield the document URL.
    #[must_use]
    pub fn build_url(&self, query: Query, versions: &VersionSet, rendering: Rendering) -> String {
        match query {
            Query::Bug(bug) => bugzilla::url(&self.endpoints.bugzilla, bug, versions, &self.exclusions, rendering),
            Query::Usage(_) => self.endpoints.usage_stats.clone(),
            Query::Crash(_) => crash_stats::url(&self.endpoints.crash_stats, versions, &self.dates, rendering),
        }
    }
}
