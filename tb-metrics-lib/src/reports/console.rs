use crate::metrics::MetricsTable;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write the resolved versions and collected metrics as two aligned tables.
///
/// `versions` pairs a label with the comma-separated versions it stands for.
pub fn generate<W: Write>(versions: &[(&str, String)], table: &MetricsTable, use_colors: bool, writer: &mut W) -> core::fmt::Result {
    write_heading(writer, "Versions", use_colors)?;
    let label_width = versions.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, list) in versions {
        writeln!(writer, "  {label:<label_width$}  {list}")?;
    }

    writeln!(writer)?;
    write_heading(writer, "Metrics", use_colors)?;
    let name_width = table.iter().map(|record| record.name().len()).max().unwrap_or(0);
    for record in table.iter() {
        let value = record.value.map_or_else(|| "n/a".to_string(), |value| value.to_string());
        writeln!(writer, "  {:<name_width$}  {value}", record.name())?;
    }

    Ok(())
}

fn write_heading<W: Write>(writer: &mut W, heading: &str, use_colors: bool) -> core::fmt::Result {
    if use_colors {
        writeln!(writer, "{}", heading.bold())
    } else {
        writeln!(writer, "{heading}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricValue;

    #[test]
    fn test_plain_output() {
        let mut table = MetricsTable::new(128);
        table.set_value("perf", MetricValue::Count(7));
        table.set_value("daily-crash-rate", MetricValue::Ratio(0.005));

        let versions = [("daily versions", "136.0a1".to_string()), ("release versions", "134.0, 134.0.1".to_string())];

        let mut output = String::new();
        generate(&versions, &table, false, &mut output).unwrap();

        assert!(output.starts_with("Versions\n"));
        assert!(output.contains("  daily versions    136.0a1\n"));
        assert!(output.contains("  release versions  134.0, 134.0.1\n"));
        assert!(output.contains("\nMetrics\n"));
        assert!(output.contains("  perf "));
        assert!(output.lines().any(|line| line.starts_with("  perf") && line.ends_with(" 7")));
        assert!(output.lines().any(|line| line.starts_with("  daily-crash-rate") && line.ends_with(" 0.50%")));
        assert!(output.lines().any(|line| line.starts_with("  topcrash") && line.ends_with(" n/a")));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_headings() {
        let mut output = String::new();
        generate(&[], &MetricsTable::new(128), true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }
}
