//! Replacement-value computation for imputing strategies.
//!
//! Replacements are precomputed per column over the entire normalized
//! table, then applied row by row; the application pass never recomputes
//! statistics.

use crate::config::MissingValueStrategy;
use crate::types::Value;
use crate::utils::parse_number;

/// Compute the replacement value for one feature column, or `None` for
/// strategies that don't fill cells (leave-as-is, drop-row).
///
/// `column` holds the normalized cells of the feature across the entire
/// dataset; missing cells are empty strings. Numeric coercion failures are
/// excluded from mean/median, never an error. A column with no usable
/// values falls back to 0.
pub(crate) fn compute_replacement(
    strategy: &MissingValueStrategy,
    column: &[String],
) -> Option<Value> {
    let non_missing: Vec<&str> = column
        .iter()
        .map(String::as_str)
        .filter(|c| !c.trim().is_empty())
        .collect();

    match strategy {
        MissingValueStrategy::LeaveAsIs | MissingValueStrategy::DropRow => None,
        MissingValueStrategy::Zero => Some(Value::Number(0.0)),
        MissingValueStrategy::Constant(literal) => Some(Value::from_cell(literal)),
        MissingValueStrategy::Mean => {
            let numerics = coerce_numeric(&non_missing);
            Some(Value::Number(mean(&numerics).unwrap_or(0.0)))
        }
        MissingValueStrategy::Median => {
            let numerics = coerce_numeric(&non_missing);
            Some(Value::Number(median(&numerics).unwrap_or(0.0)))
        }
        MissingValueStrategy::Mode => match mode(&non_missing) {
            Some(winner) => Some(Value::from_cell(winner)),
            None => Some(Value::Number(0.0)),
        },
    }
}

fn coerce_numeric(values: &[&str]) -> Vec<f64> {
    values.iter().filter_map(|v| parse_number(v)).collect()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Most frequent value by raw string identity; ties go to the value seen
/// first in scan order.
pub(crate) fn mode<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values.iter().copied() {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    // counts is in first-seen order; a strict comparison keeps the earliest
    // candidate on ties
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}
