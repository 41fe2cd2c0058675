use crate::error::Error;
use crate::versions::{Channel, EsrLine, VersionMetadata, VersionResolver, VersionSet};
use chrono::{Days, NaiveDate, Utc};

/// The report date and the day the metrics cover.
///
/// All metrics describe the 24 hours that end at midnight UTC on the report date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDates {
    today: NaiveDate,
    yesterday: NaiveDate,
}

impl RunDates {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            yesterday: today.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Dates for a report produced now.
    #[must_use]
    pub fn today_utc() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// The report date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// The day covered by the metrics.
    #[must_use]
    pub const fn yesterday(&self) -> NaiveDate {
        self.yesterday
    }
}

/// Which channels also include their previous major line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviousLines {
    pub daily: bool,
    pub beta: bool,
    pub release: bool,
}

/// Everything derived once at the start of a run and shared by every query.
#[derive(Debug, Clone)]
pub struct RunContext {
    metadata: VersionMetadata,
    dates: RunDates,
    esr_major: u32,
    status: VersionSet,
    daily: VersionSet,
    beta: VersionSet,
    release: VersionSet,
    current_daily: VersionSet,
    current_beta: VersionSet,
    current_release: VersionSet,
}

impl RunContext {
    /// Resolve every channel's versions from `metadata`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the requested ESR line is not available.
    pub fn new(metadata: VersionMetadata, dates: RunDates, previous: PreviousLines, esr_line: EsrLine) -> Result<Self, Error> {
        let resolver = VersionResolver::new(&metadata, esr_line)?;

        let esr_major = resolver.esr_major();
        let status = resolver.resolve(Channel::Status, false);
        let daily = resolver.resolve(Channel::Daily, previous.daily);
        let beta = resolver.resolve(Channel::Beta, previous.beta);
        let release = resolver.resolve(Channel::Release, previous.release);
        let current_daily = resolver.resolve(Channel::Daily, false);
        let current_beta = resolver.resolve(Channel::Beta, false);
        let current_release = resolver.resolve(Channel::Release, false);

        Ok(Self {
            metadata,
            dates,
            esr_major,
            status,
            daily,
            beta,
            release,
            current_daily,
            current_beta,
            current_release,
        })
    }

    #[must_use]
    pub const fn metadata(&self) -> &VersionMetadata {
        &self.metadata
    }

    #[must_use]
    pub const fn dates(&self) -> &RunDates {
        &self.dates
    }

    /// The ESR major version that anchors the status versions.
    #[must_use]
    pub const fn esr_major(&self) -> u32 {
        self.esr_major
    }

    #[must_use]
    pub const fn versions(&self, channel: Channel) -> &VersionSet {
        match channel {
            Channel::Status => &self.status,
            Channel::Daily => &self.daily,
            Channel::Beta => &self.beta,
            Channel::Release => &self.release,
        }
    }

    /// The versions of `channel`'s current line only, whatever [`PreviousLines`] asked for.
    ///
    /// Crash searches and crash rates always use these.
    #[must_use]
    pub const fn current_versions(&self, channel: Channel) -> &VersionSet {
        match channel {
            Channel::Status => &self.status,
            Channel::Daily => &self.current_daily,
            Channel::Beta => &self.current_beta,
            Channel::Release => &self.current_release,
        }
    }
}
