//! URL construction for every remote query
//!
//! Three families of queries feed the metrics table:
//!
//! - **bugzilla**: counts of open defects affecting the status versions, one subtype per
//!   keyword/severity combination
//! - **usage**: active daily installations read from a single per-day document
//! - **crash-stats**: crash report counts for one channel over the last 24 hours
//!
//! # Implementation Model
//!
//! Subtypes are closed enums ([`BugQuery`], [`UsageQuery`], [`CrashQuery`]) so every
//! dispatch is an exhaustive match. Textual subtype names are only accepted through
//! [`Query::parse`], which rejects unknown names before anything touches the network.
//!
//! URLs are assembled from a [`QueryString`], an ordered parameter list that allows
//! repeated keys. Parameter order is fixed, so the same inputs always produce the same
//! URL. Each family can render either the REST endpoint the collector calls or the
//! browsable page that is linked from the report.

mod builder;
mod bugzilla;
mod crash_stats;
mod query;
mod query_string;

pub use builder::{Endpoints, QueryBuilder};
pub use bugzilla::Exclusions;
pub use query::{BugQuery, CrashQuery, Query, QueryFamily, Rendering, UsageQuery};
pub use query_string::QueryString;
