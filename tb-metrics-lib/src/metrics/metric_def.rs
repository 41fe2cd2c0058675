use crate::queries::{BugQuery, CrashQuery, Query, UsageQuery};

/// Where a metric's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    /// A count returned by a remote query
    Query(Query),

    /// The quotient of two counts in the same table
    Ratio {
        numerator: &'static str,
        denominator: &'static str,

        /// Divide by the denominator's current-line count rather than its reported count
        current_line: bool,
    },
}

#[derive(Debug)]
pub struct MetricDef {
    pub name: &'static str,
    pub source: MetricSource,

    /// Produces the report label for a metric, given the ESR major version in use.
    pub describe: fn(u32) -> Option<String>,
}

impl MetricDef {
    #[must_use]
    pub const fn query(&self) -> Option<Query> {
        match self.source {
            MetricSource::Query(query) => Some(query),
            MetricSource::Ratio { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_ratio(&self) -> bool {
        matches!(self.source, MetricSource::Ratio { .. })
    }
}

macro_rules! metric_def {
    ($name:expr, bug $query:ident, $describe:expr) => {
        MetricDef {
            name: $name,
            source: MetricSource::Query(Query::Bug(BugQuery::$query)),
            describe: $describe,
        }
    };
    ($name:expr, usage $query:ident) => {
        MetricDef {
            name: $name,
            source: MetricSource::Query(Query::Usage(UsageQuery::$query)),
            describe: |_| None,
        }
    };
    ($name:expr, crash $query:ident, $describe:expr) => {
        MetricDef {
            name: $name,
            source: MetricSource::Query(Query::Crash(CrashQuery::$query)),
            describe: $describe,
        }
    };
    ($name:expr, $numerator:expr, current $denominator:expr) => {
        MetricDef {
            name: $name,
            source: MetricSource::Ratio {
                numerator: $numerator,
                denominator: $denominator,
                current_line: true,
            },
            describe: |_| None,
        }
    };
    ($name:expr, $numerator:expr, $denominator:expr) => {
        MetricDef {
            name: $name,
            source: MetricSource::Ratio {
                numerator: $numerator,
                denominator: $denominator,
                current_line: false,
            },
            describe: |_| None,
        }
    };
}

/// Every metric, in report column order.
pub const METRIC_DEFINITIONS: &[MetricDef] = &[
    metric_def!("regression-all", bug RegressionAll, |esr| Some(format!("# of regressions (affecting {esr}+)"))),
    metric_def!("regression-severe", bug RegressionSevere, |esr| Some(format!(
        "# of severe (S1/S2) regressions (affecting {esr}+)"
    ))),
    metric_def!("non-regression-all", bug NonRegressionAll, |esr| Some(format!(
        "# of non-regressions (affecting {esr}+)"
    ))),
    metric_def!("non-regression-severe", bug NonRegressionSevere, |esr| Some(format!(
        "# of severe (S1/S2) non-regressions (affecting {esr}+)"
    ))),
    metric_def!("topcrash", bug TopCrash, |esr| Some(format!("# of topcrash bugs (affecting {esr}+)"))),
    metric_def!("perf", bug Performance, |esr| Some(format!("# of perf bugs (affecting {esr}+)"))),
    metric_def!("sec-crit-high", bug SecurityHigh, |esr| Some(format!(
        "# of sec-crit, sec-high bugs (affecting {esr}+)"
    ))),
    metric_def!("sec-moderate-low", bug SecurityLow, |esr| Some(format!(
        "# of sec-moderate, sec-low bugs (affecting {esr}+)"
    ))),
    metric_def!("daily-adi", usage Daily),
    metric_def!("daily-crashes", crash Daily, |_| Some("Daily crashes (last 24 hours)".to_string())),
    metric_def!("daily-crash-rate", "daily-crashes", current "daily-adi"),
    metric_def!("beta-adi", usage Beta),
    metric_def!("beta-crashes", crash Beta, |_| Some("Beta crashes (last 24 hours)".to_string())),
    metric_def!("beta-crash-rate", "beta-crashes", current "beta-adi"),
    metric_def!("release-adi", usage Release),
    metric_def!("release-crashes", crash Release, |_| Some("Release crashes (last 24 hours)".to_string())),
    metric_def!("release-crash-rate", "release-crashes", current "release-adi"),
    metric_def!("total-adi", usage Total),
    metric_def!("daily-adi-%", "daily-adi", "total-adi"),
    metric_def!("beta-adi-%", "beta-adi", "total-adi"),
    metric_def!("release-adi-%", "release-adi", "total-adi"),
    metric_def!("dataloss", bug DataLoss, |esr| Some(format!("# of dataloss bugs (affecting {esr}+)"))),
    metric_def!("esr-adi", usage Esr),
    metric_def!("esr-adi-%", "esr-adi", "total-adi"),
    metric_def!("esr-crashes", crash Esr, |esr| Some(format!("ESR {esr} crashes (last 24 hours)"))),
    metric_def!("esr-crash-rate", "esr-crashes", current "esr-adi"),
];

/// Look up a metric definition by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static MetricDef> {
    METRIC_DEFINITIONS.iter().find(|def| def.name == name)
}
