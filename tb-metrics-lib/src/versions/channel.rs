use strum::{Display, EnumIter};

/// A family of Thunderbird builds that queries are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    /// Bugzilla status flags, from the ESR line through nightly
    Status,

    /// Nightly builds
    Daily,

    /// Beta builds
    Beta,

    /// Release builds and their dot releases
    Release,
}

impl Channel {
    /// Label used when listing resolved versions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Status => "bugzilla affected versions",
            Self::Daily => "daily versions",
            Self::Beta => "beta versions",
            Self::Release => "release versions",
        }
    }
}
