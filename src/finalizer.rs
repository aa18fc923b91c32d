//! Dataset finalization: target-type inference and packaging.
//!
//! Inference runs over the pre-materialization target values the imputation
//! engine hands over, so empty labels (rendered as numeric zero in the
//! typed records) never count as a class.

use tracing::info;

use crate::config::IngestionConfig;
use crate::imputer::ImputationOutcome;
use crate::policy::ResolvedPolicy;
use crate::types::{Dataset, TargetType};
use crate::utils::parse_number;

/// Infer the learning-problem type of the target column and, for
/// classification, the class count.
///
/// Any non-missing value that fails numeric coercion makes the target
/// classification. Otherwise the distinct-value heuristic applies:
/// classification when the cardinality is small (at most 10 distinct
/// values) or small relative to the sample count (under 10%), regression
/// otherwise. A wide-ranging numeric target resolves to regression even
/// when values repeat moderately.
pub fn infer_target_type(target_values: &[String]) -> (TargetType, Option<usize>) {
    let non_missing: Vec<&str> = target_values
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    let mut parsed = Vec::with_capacity(non_missing.len());
    for value in &non_missing {
        match parse_number(value) {
            Some(n) => parsed.push(n),
            None => {
                // categorical target: classes are the distinct raw values
                let classes = distinct_strings(&non_missing);
                return (TargetType::Classification, Some(classes));
            }
        }
    }

    let unique = distinct_numbers(&parsed);
    let total = parsed.len();
    if unique <= 10 || (unique as f64) < 0.1 * total as f64 {
        (TargetType::Classification, Some(unique))
    } else {
        (TargetType::Regression, None)
    }
}

fn distinct_strings(values: &[&str]) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for value in values.iter().copied() {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.len()
}

fn distinct_numbers(values: &[f64]) -> usize {
    let mut seen: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Package the imputation outcome into the final immutable [`Dataset`].
pub fn finalize_dataset(
    outcome: ImputationOutcome,
    policy: &ResolvedPolicy,
    config: &IngestionConfig,
) -> Dataset {
    let (target_type, num_classes) = infer_target_type(&outcome.target_values);

    let num_samples = outcome.rows.len();
    let features: Vec<String> = policy.features.iter().map(|c| c.name.clone()).collect();

    info!(
        target_column = %policy.target.name,
        ?target_type,
        num_samples,
        dropped = outcome.summary.dropped_row_count,
        "finalized dataset"
    );

    Dataset {
        rows: outcome.rows,
        num_features: features.len(),
        features,
        target: policy.target.name.clone(),
        target_type,
        num_samples,
        num_classes,
        skip_rows: config.skip_rows,
        header_row: config.header_row,
        imputation_summary: outcome.summary,
    }
}
