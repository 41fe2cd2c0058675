use super::MetricValue;
use super::metric_def::{METRIC_DEFINITIONS, MetricDef};

/// One row of the metrics table.
#[derive(Debug, Clone)]
pub struct MetricRecord {
    pub def: &'static MetricDef,
    pub value: Option<MetricValue>,

    /// Label shown for the browsable link
    pub text: Option<String>,

    /// Browsable query URL
    pub url: Option<String>,
}

impl MetricRecord {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.def.name
    }
}

/// Every metric of a run, in report order.
#[derive(Debug, Clone)]
pub struct MetricsTable {
    records: Vec<MetricRecord>,

    /// Usage counts restricted to a channel's current line, keyed by metric name
    current_line: Vec<(&'static str, u64)>,
}

impl MetricsTable {
    /// Create a table with every known metric and no values yet.
    #[must_use]
    pub fn new(esr_major: u32) -> Self {
        Self {
            records: METRIC_DEFINITIONS
                .iter()
                .map(|def| MetricRecord {
                    def,
                    value: None,
                    text: (def.describe)(esr_major),
                    url: None,
                })
                .collect(),
            current_line: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricRecord> {
        self.records.iter().find(|record| record.name() == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut MetricRecord> {
        self.records.iter_mut().find(|record| record.name() == name)
    }

    /// The collected count of `name`, if any.
    #[must_use]
    pub fn count(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|record| record.value).and_then(MetricValue::as_count)
    }

    /// Store a value; unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: MetricValue) {
        if let Some(record) = self.get_mut(name) {
            record.value = Some(value);
        }
    }

    /// Record the current-line-only count of a usage metric; unknown names are ignored.
    pub fn set_current_line_count(&mut self, name: &str, count: u64) {
        let Some(def) = self.get(name).map(|record| record.def) else {
            return;
        };

        match self.current_line.iter_mut().find(|(key, _)| *key == def.name) {
            Some(entry) => entry.1 = count,
            None => self.current_line.push((def.name, count)),
        }
    }

    /// The current-line-only count of `name`, falling back to its collected count.
    #[must_use]
    pub fn current_line_count(&self, name: &str) -> Option<u64> {
        self.current_line
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, count)| *count)
            .or_else(|| self.count(name))
    }

    /// Store a browsable URL; unknown names are ignored.
    pub fn set_url(&mut self, name: &str, url: String) {
        if let Some(record) = self.get_mut(name) {
            record.url = Some(url);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricRecord> {
        self.records.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_has_every_metric_without_values() {
        let table = MetricsTable::new(128);
        assert_eq!(table.len(), METRIC_DEFINITIONS.len());
        assert!(table.iter().all(|record| record.value.is_none() && record.url.is_none()));
        assert_eq!(
            table.get("regression-all").and_then(|r| r.text.as_deref()),
            Some("# of regressions (affecting 128+)")
        );
    }

    #[test]
    fn test_set_and_read_values() {
        let mut table = MetricsTable::new(128);
        table.set_value("perf", MetricValue::Count(12));
        table.set_value("daily-crash-rate", MetricValue::Ratio(0.5));
        table.set_url("perf", "https://example.com".to_string());
        table.set_value("unknown", MetricValue::Count(1));

        assert_eq!(table.count("perf"), Some(12));
        assert_eq!(table.count("daily-crash-rate"), None);
        assert_eq!(table.count("topcrash"), None);
        assert_eq!(table.get("perf").and_then(|r| r.url.as_deref()), Some("https://example.com"));
        assert!(table.get("unknown").is_none());
    }

    #[test]
    fn test_current_line_count_falls_back_to_count() {
        let mut table = MetricsTable::new(128);
        table.set_value("release-adi", MetricValue::Count(900));
        table.set_value("beta-adi", MetricValue::Count(40));
        table.set_current_line_count("release-adi", 500);
        table.set_current_line_count("release-adi", 600);
        table.set_current_line_count("unknown", 1);

        assert_eq!(table.current_line_count("release-adi"), Some(600));
        assert_eq!(table.count("release-adi"), Some(900));
        assert_eq!(table.current_line_count("beta-adi"), Some(40));
        assert_eq!(table.current_line_count("unknown"), None);
    }
}
