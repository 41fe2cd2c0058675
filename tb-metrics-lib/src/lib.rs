#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for tb-metrics
//!
//! This library holds all functionality for the tb-metrics tool, which gathers
//! Thunderbird release-readiness metrics from bugzilla, the usage statistics
//! service and crash-stats, and exports them to a spreadsheet.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`versions`]: Resolution of the versions currently in flight
//! - [`queries`]: URL construction for every remote query
//! - [`facts`]: Remote data collection
//! - [`metrics`]: The metrics table and derived ratios
//! - [`reports`]: Console summary and spreadsheet export

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod facts;
#[cfg(not(any(debug_assertions, test)))]
mod facts;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod queries;
#[cfg(not(any(debug_assertions, test)))]
mod queries;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod versions;
#[cfg(not(any(debug_assertions, test)))]
mod versions;

mod error;

pub use crate::commands::{Host, run};
pub use crate::error::Error;
