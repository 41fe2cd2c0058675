use core::fmt::{Display, Formatter, Result as FmtResult};

/// Ordered list of version strings resolved for one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet(Vec<String>);

impl VersionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a version, ignoring it if already present.
    pub fn push(&mut self, version: impl Into<String>) {
        let version = version.into();
        if !self.contains(&version) {
            self.0.push(version);
        }
    }

    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.0.iter().any(|v| v == version)
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for VersionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for version in iter {
            set.push(version);
        }
        set
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for VersionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, version) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(version)?;
        }
        Ok(())
    }
}
