//! Remote data collection
//!
//! This module talks to the four services a report depends on:
//!
//! - **product-details**: the Thunderbird version metadata document
//! - **bugzilla**: bug searches, counted by the length of the returned list
//! - **usage statistics**: a per-day document of active installations by version
//! - **crash-stats**: crash report searches, counted by their `total`
//!
//! # Implementation Model
//!
//! A [`RunContext`] is built once from the version metadata and the report date, and holds
//! every resolved version set. The [`Collector`] borrows it, issues exactly one request per
//! query, and awaits each response before sending the next. The usage document is the one
//! exception: it is fetched on first use and reused by every usage query.
//!
//! Failures are never retried. A transport error or non-success status surfaces as
//! [`Error::Network`](crate::Error::Network), and a body of the wrong shape as
//! [`Error::UnexpectedResponse`](crate::Error::UnexpectedResponse).

mod bugzilla;
mod collector;
mod crash_stats;
mod http;
mod product_details;
mod run_context;
mod usage;

pub use bugzilla::{API_KEY_VARIABLE, ApiKey};
pub use collector::{Collector, LegacyEsrPolicy};
pub use http::client;
pub use product_details::fetch_metadata;
pub use run_context::{PreviousLines, RunContext, RunDates};
pub use usage::{EsrVersions, UsageDay, UsageDocument};
