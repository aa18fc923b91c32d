//! Column profiling over a bounded preview window.
//!
//! Classification and aggregation are pure functions of the rows and the
//! resolved structure; the interactive path re-runs them on every
//! configuration edit without side effects. The stats drive the operator
//! UI and the strategy picker only; the finalize path recomputes
//! everything it needs over the full table.

use std::collections::HashSet;

use crate::structure::TableStructure;
use crate::types::{CellClass, ColumnStats, InferredType};
use crate::utils::{is_numeric_string, is_placeholder_token};

/// How many distinct placeholder tokens to surface per column.
const MAX_PLACEHOLDER_EXAMPLES: usize = 5;

/// Classify a single raw cell.
pub fn classify_cell(raw: &str) -> CellClass {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CellClass::Missing
    } else if is_placeholder_token(trimmed) {
        CellClass::Placeholder
    } else {
        CellClass::Valid
    }
}

/// Profile every resolved column over the given row window.
///
/// Only data rows (at or after the structure's data-start index) are
/// aggregated; skipped and header rows never influence the stats. A cell a
/// ragged row doesn't have counts as missing.
pub fn profile_columns(window: &[Vec<String>], structure: &TableStructure) -> Vec<ColumnStats> {
    structure
        .columns
        .iter()
        .map(|column| {
            let mut missing_count = 0usize;
            let mut placeholder_count = 0usize;
            let mut valid_count = 0usize;
            let mut numeric_count = 0usize;
            let mut placeholder_examples: Vec<String> = Vec::new();
            let mut unique: HashSet<&str> = HashSet::new();

            for row in window.iter().skip(structure.data_start) {
                let raw = row.get(column.index).map(String::as_str).unwrap_or("");
                match classify_cell(raw) {
                    CellClass::Missing => missing_count += 1,
                    CellClass::Placeholder => {
                        placeholder_count += 1;
                        let token = raw.trim();
                        if placeholder_examples.len() < MAX_PLACEHOLDER_EXAMPLES
                            && !placeholder_examples.iter().any(|e| e == token)
                        {
                            placeholder_examples.push(token.to_string());
                        }
                    }
                    CellClass::Valid => {
                        valid_count += 1;
                        let trimmed = raw.trim();
                        unique.insert(trimmed);
                        if is_numeric_string(trimmed) {
                            numeric_count += 1;
                        }
                    }
                }
            }

            let inferred_type = if valid_count == 0 {
                InferredType::Empty
            } else if numeric_count == valid_count {
                InferredType::Numeric
            } else if numeric_count == 0 {
                InferredType::Categorical
            } else {
                InferredType::Mixed
            };

            // Placeholders count toward the non-missing base but never
            // toward the numeric numerator.
            let non_missing = valid_count + placeholder_count;
            let numeric_fraction = if non_missing == 0 {
                0.0
            } else {
                numeric_count as f64 / non_missing as f64
            };

            ColumnStats {
                name: column.name.clone(),
                missing_count,
                placeholder_count,
                inferred_type,
                unique_count: unique.len(),
                numeric_fraction,
                placeholder_examples,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::resolve_structure;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn profile(rows: &[&[&str]]) -> Vec<ColumnStats> {
        let rows = raw(rows);
        let structure = resolve_structure(&rows, 0, 0).unwrap();
        profile_columns(&rows, &structure)
    }

    // ========================================================================
    // classify_cell() tests
    // ========================================================================

    #[test]
    fn test_classify_missing() {
        assert_eq!(classify_cell(""), CellClass::Missing);
        assert_eq!(classify_cell("   "), CellClass::Missing);
    }

    #[test]
    fn test_classify_placeholder() {
        assert_eq!(classify_cell("NA"), CellClass::Placeholder);
        assert_eq!(classify_cell(" n/a "), CellClass::Placeholder);
        assert_eq!(classify_cell("?"), CellClass::Placeholder);
        assert_eq!(classify_cell("MISSING"), CellClass::Placeholder);
    }

    #[test]
    fn test_classify_valid() {
        assert_eq!(classify_cell("42"), CellClass::Valid);
        assert_eq!(classify_cell("hello"), CellClass::Valid);
        // looks placeholder-ish but isn't in the token set
        assert_eq!(classify_cell("n.a."), CellClass::Valid);
    }

    // ========================================================================
    // profile_columns() tests
    // ========================================================================

    #[test]
    fn test_profile_counts() {
        let stats = profile(&[
            &["age", "name"],
            &["1", "alice"],
            &["", "bob"],
            &["NA", ""],
            &["4", "dana"],
        ]);

        assert_eq!(stats[0].name, "age");
        assert_eq!(stats[0].missing_count, 1);
        assert_eq!(stats[0].placeholder_count, 1);
        assert_eq!(stats[0].unique_count, 2);
        assert_eq!(stats[0].placeholder_examples, vec!["NA".to_string()]);

        assert_eq!(stats[1].missing_count, 1);
        assert_eq!(stats[1].placeholder_count, 0);
        assert_eq!(stats[1].unique_count, 3);
    }

    #[test]
    fn test_inferred_type_numeric() {
        let stats = profile(&[&["x"], &["1"], &["2.5"], &["NA"], &[""]]);
        assert_eq!(stats[0].inferred_type, InferredType::Numeric);
    }

    #[test]
    fn test_inferred_type_categorical() {
        let stats = profile(&[&["x"], &["red"], &["blue"]]);
        assert_eq!(stats[0].inferred_type, InferredType::Categorical);
    }

    #[test]
    fn test_inferred_type_mixed() {
        let stats = profile(&[&["x"], &["1"], &["red"]]);
        assert_eq!(stats[0].inferred_type, InferredType::Mixed);
    }

    #[test]
    fn test_inferred_type_empty() {
        let stats = profile(&[&["x"], &[""], &["NA"], &["null"]]);
        assert_eq!(stats[0].inferred_type, InferredType::Empty);
    }

    #[test]
    fn numeric_fraction_counts_placeholders_in_base() {
        // 2 numeric valid cells, 1 placeholder, 1 missing.
        // Numerator: 2 numeric; denominator: 3 non-missing (valid + placeholder).
        let stats = profile(&[&["x"], &["1"], &["2"], &["NA"], &[""]]);
        assert!((stats[0].numeric_fraction - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_fraction_all_missing() {
        let stats = profile(&[&["x"], &[""], &[""]]);
        assert_eq!(stats[0].numeric_fraction, 0.0);
    }

    #[test]
    fn test_placeholder_examples_distinct_and_capped() {
        let stats = profile(&[
            &["x"],
            &["NA"],
            &["NA"],
            &["n/a"],
            &["null"],
            &["none"],
            &["nil"],
            &["?"],
        ]);
        assert_eq!(stats[0].placeholder_count, 7);
        assert_eq!(stats[0].placeholder_examples.len(), 5);
        assert_eq!(stats[0].placeholder_examples[0], "NA");
        // distinct: the repeated "NA" is only listed once
        assert_eq!(
            stats[0]
                .placeholder_examples
                .iter()
                .filter(|e| *e == "NA")
                .count(),
            1
        );
    }

    #[test]
    fn test_ragged_rows_count_as_missing() {
        let stats = profile(&[&["a", "b"], &["1"], &["2", "3"]]);
        assert_eq!(stats[1].missing_count, 1);
    }

    #[test]
    fn test_header_rows_excluded_from_stats() {
        let rows = raw(&[&["junk", "junk"], &["a", "b"], &["1", "x"]]);
        let structure = resolve_structure(&rows, 0, 1).unwrap();
        let stats = profile_columns(&rows, &structure);
        // only one data row; neither "junk" nor the header cells are counted
        assert_eq!(stats[0].unique_count, 1);
        assert_eq!(stats[0].missing_count, 0);
    }

    #[test]
    fn test_profile_pure_and_deterministic() {
        let rows = raw(&[&["a", "b"], &["1", "NA"], &["", "x"]]);
        let structure = resolve_structure(&rows, 0, 0).unwrap();
        let first = profile_columns(&rows, &structure);
        let second = profile_columns(&rows, &structure);
        assert_eq!(first, second);
    }
}
