//! The imputation engine: normalization, row filtering, and replacement
//! application over the full table.
//!
//! Order matters and is fixed: normalize every feature/target cell, compute
//! replacements over the whole normalized table, filter rows once, then
//! fill the surviving rows. Malformed cells never abort the pass; they
//! degrade to exclusion from the relevant aggregate.

mod replacement;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::policy::ResolvedPolicy;
use crate::types::{ImputationSummary, Value};
use crate::utils::normalize_cell;

use replacement::compute_replacement;

/// The result of running the imputation engine over the full data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationOutcome {
    /// Final records over feature + target columns.
    pub rows: Vec<HashMap<String, Value>>,
    /// Normalized target cells of the surviving rows, pre-materialization.
    /// Target-type inference runs over these, so the numeric-zero rendering
    /// of empty labels in `rows` never leaks into the class count.
    pub target_values: Vec<String>,
    pub summary: ImputationSummary,
}

/// Run normalization, row filtering, and imputation over the data rows.
///
/// The target column is deliberately never imputed: no replacement is ever
/// computed for it, so labels cannot be fabricated by configuration. A
/// missing target cell that survives filtering still materializes as
/// numeric zero in the typed record (empty labels coerce to 0); inference
/// over the target uses the pre-materialization values instead.
pub fn impute(data_rows: &[Vec<String>], policy: &ResolvedPolicy) -> ImputationOutcome {
    let feature_count = policy.features.len();

    // Normalization pass: missing and placeholder cells collapse to the
    // empty string. Cells are laid out as [features..., target].
    let normalized: Vec<Vec<String>> = data_rows
        .iter()
        .map(|row| {
            policy
                .features
                .iter()
                .chain(std::iter::once(&policy.target))
                .map(|column| {
                    normalize_cell(row.get(column.index).map(String::as_str).unwrap_or(""))
                })
                .collect()
        })
        .collect();

    // Replacement computation over the entire dataset, not a window.
    let replacements: Vec<Option<Value>> = policy
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let strategy = policy.strategy_for(&feature.name);
            if !strategy.imputes() {
                return None;
            }
            let column: Vec<String> = normalized.iter().map(|row| row[i].clone()).collect();
            let replacement = compute_replacement(strategy, &column);
            if let Some(value) = &replacement {
                debug!(column = %feature.name, ?value, "computed replacement");
            }
            replacement
        })
        .collect();

    let drop_flags: Vec<bool> = policy
        .features
        .iter()
        .map(|f| policy.strategy_for(&f.name).is_drop())
        .collect();

    // Row filtering happens once, before imputation.
    let original_row_count = normalized.len();
    let kept: Vec<&Vec<String>> = normalized
        .iter()
        .filter(|row| {
            let any_feature_missing = row[..feature_count].iter().any(|c| c.is_empty());
            if policy.global_drop && any_feature_missing {
                return false;
            }
            let drop_col_missing = row[..feature_count]
                .iter()
                .zip(&drop_flags)
                .any(|(cell, drop)| *drop && cell.is_empty());
            if drop_col_missing {
                return false;
            }
            if policy.target_drop && row[feature_count].is_empty() {
                return false;
            }
            true
        })
        .collect();

    let dropped_row_count = original_row_count - kept.len();
    if dropped_row_count > 0 {
        info!(
            dropped = dropped_row_count,
            original = original_row_count,
            "dropped rows with missing values"
        );
    }

    // Imputation application: fill still-missing feature cells, type the rest.
    let mut rows: Vec<HashMap<String, Value>> = Vec::with_capacity(kept.len());
    let mut target_values: Vec<String> = Vec::with_capacity(kept.len());
    for row in kept {
        let mut record = HashMap::with_capacity(feature_count + 1);
        for (i, feature) in policy.features.iter().enumerate() {
            let cell = &row[i];
            let value = if cell.is_empty() {
                match &replacements[i] {
                    Some(replacement) => replacement.clone(),
                    None => Value::Null,
                }
            } else {
                Value::from_cell(cell)
            };
            record.insert(feature.name.clone(), value);
        }
        let target_cell = &row[feature_count];
        let target_value = if target_cell.is_empty() {
            // empty labels coerce to numeric zero in the typed record
            Value::Number(0.0)
        } else {
            Value::from_cell(target_cell)
        };
        record.insert(policy.target.name.clone(), target_value);
        target_values.push(target_cell.clone());
        rows.push(record);
    }

    let summary = ImputationSummary {
        original_row_count,
        dropped_row_count,
        drop_applied: policy.global_drop || policy.target_drop || !policy.drop_columns.is_empty(),
        drop_columns: policy.drop_columns.clone(),
        global_drop: policy.global_drop,
        target_drop: policy.target_drop,
    };

    ImputationOutcome {
        rows,
        target_values,
        summary,
    }
}
