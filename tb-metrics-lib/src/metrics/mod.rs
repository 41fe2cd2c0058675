//! The metrics table and the ratios derived from it
//!
//! Every value in a report is a named metric. Most metrics are raw counts returned by one
//! remote query; the rest are ratios of two of those counts.
//!
//! # Implementation Model
//!
//! Metric definitions are statically registered in `metric_def.rs`, in report column
//! order. Each [`MetricDef`] names its [`MetricSource`] (a query or a ratio of two other
//! metrics) and a function producing its report label, which may mention the ESR major
//! version in use.
//!
//! A [`MetricsTable`] holds one [`MetricRecord`] per definition. The collector fills in
//! counts and browsable URLs, then [`compute_derived`] fills in every ratio. Ratios are
//! only computed once both inputs hold counts, and a zero denominator is an error rather
//! than a silent zero.

mod derived;
mod metric_def;
mod metric_value;
mod metrics_table;

pub use derived::{compute_derived, ratio};
pub use metric_def::{METRIC_DEFINITIONS, MetricDef, MetricSource, find};
pub use metric_value::MetricValue;
pub use metrics_table::{MetricRecord, MetricsTable};
