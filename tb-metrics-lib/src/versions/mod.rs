//! Resolution of the Thunderbird versions currently in flight
//!
//! Every query this tool issues is parametrized by version strings that are derived from
//! a single upstream document, `thunderbird_versions.json`. This module turns that document
//! into a validated [`VersionMetadata`] snapshot and then into one [`VersionSet`] per
//! [`Channel`].
//!
//! # Implementation Model
//!
//! Only the leading numeric component of each upstream version matters for the
//! derivation, so [`VersionMetadata`] parses and stores it up front. A missing field or an
//! unparseable major version is a configuration error surfaced before any query runs.
//!
//! [`VersionResolver`] is a pure function of the metadata, the ESR line in use, and the
//! channel's "include previous major line" toggle:
//!
//! - **status**: `esr<E>` followed by every major from `E` through the nightly major
//! - **daily**: the nightly version, optionally the previous `<N>.0a1`
//! - **beta**: `<B>.0b1` through `<B>.0b6`, optionally the same for `B - 1`
//! - **release**: `<R>.0` and three dot releases, optionally the same for `R - 1`

mod channel;
mod metadata;
mod resolver;
mod version_set;

pub use channel::Channel;
pub use metadata::{ProductVersion, VersionMetadata, major_component};
pub use resolver::{EsrLine, VersionResolver};
pub use version_set::VersionSet;
