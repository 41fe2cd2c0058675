use super::metric_def::{METRIC_DEFINITIONS, MetricSource};
use super::{MetricValue, MetricsTable};
use crate::error::Error;

const LOG_TARGET: &str = "   metrics";

/// Divide two counts on behalf of `metric`.
///
/// # Errors
///
/// Returns [`Error::DivisionByZero`] if `denominator` is zero.
#[expect(clippy::cast_precision_loss, reason = "Counts are far below 2^52")]
pub fn ratio(metric: &'static str, numerator: u64, denominator: u64, denominator_name: &'static str) -> Result<f64, Error> {
    if denominator == 0 {
        return Err(Error::DivisionByZero {
            metric,
            denominator: denominator_name,
        });
    }

    Ok(numerator as f64 / denominator as f64)
}

/// Fill in every ratio metric from the counts already in `table`.
///
/// # Errors
///
/// Returns [`Error::MissingCount`] if an input has not been collected, or
/// [`Error::DivisionByZero`] if a denominator is zero.
pub fn compute_derived(table: &mut MetricsTable) -> Result<(), Error> {
    for def in METRIC_DEFINITIONS {
        let MetricSource::Ratio {
            numerator,
            denominator,
            current_line,
        } = def.source
        else {
            continue;
        };

        let num = count_of(table, def.name, numerator)?;
        let den = if current_line {
            table
                .current_line_count(denominator)
                .ok_or(Error::MissingCount { metric: def.name, dependency: denominator })?
        } else {
            count_of(table, def.name, denominator)?
        };
        let value = ratio(def.name, num, den, denominator)?;

        log::info!(target: LOG_TARGET, "{}: {num} / {den} = {value:.6}", def.name);
        table.set_value(def.name, MetricValue::Ratio(value));
    }

    Ok(())
}

fn count_of(table: &MetricsTable, metric: &'static str, dependency: &'static str) -> Result<u64, Error> {
    table.count(dependency).ok_or(Error::MissingCount { metric, dependency })
}
