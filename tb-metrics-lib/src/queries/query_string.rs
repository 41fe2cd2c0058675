use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped in parameter values.
///
/// Comparison operators, `=`, `:` and `,` stay literal since both services accept them raw
/// in date filters and field lists; a query string splits a pair at its first `=` only.
const VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'[')
    .add(b']')
    .add(b'+');

/// An ordered list of query parameters.
///
/// Parameters are rendered in insertion order and repeated keys are kept, since both
/// bugzilla and crash-stats express multi-valued filters by repeating a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a parameter; the value is percent-encoded on output.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append the same key once per value.
    pub fn push_each<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            let _ = self.push(key, value);
        }
        self
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render the parameters after `base`, followed by an optional `#fragment`.
    ///
    /// A `&` separator is inserted after `base` unless it already ends with `?` or `&`.
    #[must_use]
    pub fn render(&self, base: &str, fragment: Option<&str>) -> String {
        let mut url = String::from(base);
        let mut needs_separator = !(base.ends_with('?') || base.ends_with('&'));

        for (key, value) in &self.pairs {
            if needs_separator {
                url.push('&');
            }
            url.push_str(key);
            url.push('=');
            url.extend(utf8_percent_encode(value, VALUE));
            needs_separator = true;
        }

        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }

        url
    }
}
