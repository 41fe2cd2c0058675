use core::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(u64),
    Ratio(f64),
}

impl MetricValue {
    #[must_use]
    pub const fn as_count(self) -> Option<u64> {
        match self {
            Self::Count(count) => Some(count),
            Self::Ratio(_) => None,
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Counts are far below 2^52")]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Count(count) => count as f64,
            Self::Ratio(ratio) => ratio,
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Ratio(ratio) => write!(f, "{:.2}%", ratio * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MetricValue::Count(42).to_string(), "42");
        assert_eq!(MetricValue::Ratio(0.005).to_string(), "0.50%");
        assert_eq!(MetricValue::Ratio(0.25).to_string(), "25.00%");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(MetricValue::Count(7).as_count(), Some(7));
        assert_eq!(MetricValue::Ratio(0.5).as_count(), None);
        assert!((MetricValue::Count(3).as_f64() - 3.0).abs() < f64::EPSILON);
    }
}
