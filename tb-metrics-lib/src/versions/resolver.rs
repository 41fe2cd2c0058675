use super::{Channel, VersionMetadata, VersionSet};
use crate::error::Error;

const BETA_BUILDS: u32 = 6;
const DOT_RELEASES: u32 = 3;

/// Which ESR line anchors the status versions and ESR metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EsrLine {
    /// `THUNDERBIRD_ESR`
    #[default]
    Current,

    /// `THUNDERBIRD_ESR_NEXT`
    Next,
}

/// Derives per-channel version sets from a metadata snapshot.
#[derive(Debug, Clone, Copy)]
pub struct VersionResolver<'a> {
    metadata: &'a VersionMetadata,
    esr_major: u32,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver anchored at the given ESR line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if [`EsrLine::Next`] is requested but the metadata
    /// does not announce a next ESR.
    pub fn new(metadata: &'a VersionMetadata, esr_line: EsrLine) -> Result<Self, Error> {
        let esr_major = match esr_line {
            EsrLine::Current => metadata.esr().major(),
            EsrLine::Next => metadata
                .esr_next()
                .ok_or_else(|| Error::configuration("the next ESR was requested but THUNDERBIRD_ESR_NEXT is not set"))?
                .major(),
        };

        Ok(Self { metadata, esr_major })
    }

    /// The ESR major version in use.
    #[must_use]
    pub const fn esr_major(&self) -> u32 {
        self.esr_major
    }

    /// Resolve the versions of one channel.
    ///
    /// `include_previous` adds the previous major line for daily, beta and release. It has no
    /// effect on the status channel, which already spans every major since the ESR.
    #[must_use]
    pub fn resolve(&self, channel: Channel, include_previous: bool) -> VersionSet {
        match channel {
            Channel::Status => self.status(),
            Channel::Daily => self.daily(include_previous),
            Channel::Beta => self.beta(include_previous),
            Channel::Release => self.release(include_previous),
        }
    }

    fn status(&self) -> VersionSet {
        let mut set = VersionSet::new();
        set.push(format!("esr{}", self.esr_major));
        for major in self.esr_major..=self.metadata.nightly().major() {
            set.push(major.to_string());
        }
        set
    }

    fn daily(&self, include_previous: bool) -> VersionSet {
        let nightly = self.metadata.nightly();
        let mut set = VersionSet::new();
        set.push(nightly.as_str());
        if include_previous {
            set.push(format!("{}.0a1", nightly.major().saturating_sub(1)));
        }
        set
    }

    fn beta(&self, include_previous: bool) -> VersionSet {
        let major = self.metadata.devel().major();
        let mut set = VersionSet::new();
        push_betas(&mut set, major);
        if include_previous {
            push_betas(&mut set, major.saturating_sub(1));
        }
        set
    }

    fn release(&self, include_previous: bool) -> VersionSet {
        let major = self.metadata.release().major();
        let mut set = VersionSet::new();
        push_releases(&mut set, major);
        if include_previous {
            push_releases(&mut set, major.saturating_sub(1));
        }
        set
    }
}

fn push_betas(set: &mut VersionSet, major: u32) {
    for build in 1..=BETA_BUILDS {
        set.push(format!("{major}.0b{build}"));
    }
}

fn push_releases(set: &mut VersionSet, major: u32) {
    set.push(format!("{major}.0"));
    for dot in 1..=DOT_RELEASES {
        set.push(format!("{major}.0.{dot}"));
    }
}
