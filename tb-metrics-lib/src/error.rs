use crate::queries::QueryFamily;

/// Failures that can abort a metrics run.
///
/// Every variant is fatal: a run either completes and exports a report, or stops at the
/// first error with a message naming the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upstream version metadata or local configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The bugzilla API key was not supplied.
    #[error("{variable} is empty, please export your bugzilla API key")]
    MissingCredential { variable: &'static str },

    /// A query subtype name matched none of the known subtypes for its family.
    #[error("unknown {family} query type '{subtype}'")]
    InvalidSubtype { family: QueryFamily, subtype: String },

    /// A request could not be sent, or the service answered with a non-success status.
    #[error("request to {service} failed")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A service answered, but not with the document shape we expect.
    #[error("unexpected response from {service}: {reason}")]
    UnexpectedResponse { service: &'static str, reason: String },

    /// A derived ratio was requested while its denominator is zero.
    #[error("cannot compute '{metric}': '{denominator}' is zero")]
    DivisionByZero { metric: &'static str, denominator: &'static str },

    /// A derived ratio was requested before one of its inputs was collected.
    #[error("cannot compute '{metric}': '{dependency}' has not been collected")]
    MissingCount { metric: &'static str, dependency: &'static str },

    /// The report could not be written.
    #[error("unable to write the report")]
    Export(#[source] Box<dyn core::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn export(source: impl Into<Box<dyn core::error::Error + Send + Sync>>) -> Self {
        Self::Export(source.into())
    }
}
