use crate::error::Error;
use core::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The remote service a query is answered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum QueryFamily {
    #[strum(serialize = "bugzilla")]
    Bugzilla,

    #[strum(serialize = "usage")]
    Usage,

    #[strum(serialize = "crash-stats")]
    CrashStats,
}

/// Bug counts, each restricted to open defects affecting the status versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum BugQuery {
    #[strum(serialize = "regression-all")]
    RegressionAll,

    #[strum(serialize = "regression-severe")]
    RegressionSevere,

    #[strum(serialize = "non-regression-all")]
    NonRegressionAll,

    #[strum(serialize = "non-regression-severe")]
    NonRegressionSevere,

    #[strum(serialize = "topcrash")]
    TopCrash,

    #[strum(serialize = "perf")]
    Performance,

    #[strum(serialize = "sec-crit-high")]
    SecurityHigh,

    #[strum(serialize = "sec-moderate-low")]
    SecurityLow,

    #[strum(serialize = "dataloss")]
    DataLoss,
}

/// Active daily installations, read from the usage document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum UsageQuery {
    #[strum(serialize = "daily-adi")]
    Daily,

    #[strum(serialize = "beta-adi")]
    Beta,

    #[strum(serialize = "release-adi")]
    Release,

    #[strum(serialize = "total-adi")]
    Total,

    #[strum(serialize = "esr-adi")]
    Esr,
}

/// Crash report counts over the last 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum CrashQuery {
    #[strum(serialize = "daily-crashes")]
    Daily,

    #[strum(serialize = "beta-crashes")]
    Beta,

    #[strum(serialize = "release-crashes")]
    Release,

    #[strum(serialize = "esr-crashes")]
    Esr,
}

/// A single remote query, identified by family and subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Bug(BugQuery),
    Usage(UsageQuery),
    Crash(CrashQuery),
}

impl Query {
    /// Parse a subtype name within a family.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSubtype`] if `subtype` names none of the family's queries.
    pub fn parse(family: QueryFamily, subtype: &str) -> Result<Self, Error> {
        let parsed = match family {
            QueryFamily::Bugzilla => BugQuery::from_str(subtype).map(Self::Bug),
            QueryFamily::Usage => UsageQuery::from_str(subtype).map(Self::Usage),
            QueryFamily::CrashStats => CrashQuery::from_str(subtype).map(Self::Crash),
        };

        parsed.map_err(|_parse_error| Error::InvalidSubtype {
            family,
            subtype: subtype.to_string(),
        })
    }

    #[must_use]
    pub const fn family(self) -> QueryFamily {
        match self {
            Self::Bug(_) => QueryFamily::Bugzilla,
            Self::Usage(_) => QueryFamily::Usage,
            Self::Crash(_) => QueryFamily::CrashStats,
        }
    }

    /// The metric key this query fills in.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Bug(q) => q.into(),
            Self::Usage(q) => q.into(),
            Self::Crash(q) => q.into(),
        }
    }
}

impl core::fmt::Display for Query {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} query '{}'", self.family(), self.key())
    }
}

/// How a query URL is meant to be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// The REST endpoint the collector calls
    Api,

    /// The web page a person opens from the report
    Browsable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_known_subtypes() {
        assert_eq!(
            Query::parse(QueryFamily::Bugzilla, "sec-crit-high").unwrap(),
            Query::Bug(BugQuery::SecurityHigh)
        );
        assert_eq!(Query::parse(QueryFamily::Usage, "total-adi").unwrap(), Query::Usage(UsageQuery::Total));
        assert_eq!(
            Query::parse(QueryFamily::CrashStats, "esr-crashes").unwrap(),
            Query::Crash(CrashQuery::Esr)
        );
    }

    #[test]
    fn test_parse_unknown_subtype() {
        let err = Query::parse(QueryFamily::Bugzilla, "wontfix").unwrap_err();
        match err {
            Error::InvalidSubtype { family, subtype } => {
                assert_eq!(family, QueryFamily::Bugzilla);
                assert_eq!(subtype, "wontfix");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_subtype_from_other_family() {
        let err = Query::parse(QueryFamily::Usage, "daily-crashes").unwrap_err();
        assert!(matches!(err, Error::InvalidSubtype { family: QueryFamily::Usage, .. }));
        assert_eq!(err.to_string(), "unknown usage query type 'daily-crashes'");
    }

    #[test]
    fn test_keys_round_trip_through_parse() {
        for query in BugQuery::iter().map(Query::Bug) {
            assert_eq!(Query::parse(QueryFamily::Bugzilla, query.key()).unwrap(), query);
        }
        for query in UsageQuery::iter().map(Query::Usage) {
            assert_eq!(Query::parse(QueryFamily::Usage, query.key()).unwrap(), query);
        }
        for query in CrashQuery::iter().map(Query::Crash) {
            assert_eq!(Query::parse(QueryFamily::CrashStats, query.key()).unwrap(), query);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Query::Bug(BugQuery::Performance).to_string(), "bugzilla query 'perf'");
        assert_eq!(QueryFamily::CrashStats.to_string(), "crash-stats");
    }
}
