//! Core data types shared across the ingestion pipeline.
//!
//! Everything here is serde-serializable: `PreviewResult` is the handoff
//! artifact to display code, `Dataset` is the handoff artifact to model
//! training, and both may cross an IPC boundary as JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::parse_number;

/// A resolved header column. Identity is the deduplicated display name;
/// `index` is the cell position in the raw rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

/// Classification of a single raw cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellClass {
    /// Trimmed value is the empty string.
    Missing,
    /// Trimmed, lowercased value is a known placeholder token.
    Placeholder,
    Valid,
}

/// Inferred type of a column, computed over the preview window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferredType {
    /// Every valid value parses as a number.
    Numeric,
    /// No valid value parses as a number.
    Categorical,
    /// Some valid values parse, some don't.
    Mixed,
    /// No valid values observed at all.
    Empty,
}

/// Per-column statistics over the preview window.
///
/// These drive the operator UI only; they are never authoritative for the
/// final dataset, which is recomputed over the full table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub missing_count: usize,
    /// Placeholder cells, tracked separately from truly empty cells.
    pub placeholder_count: usize,
    pub inferred_type: InferredType,
    /// Distinct trimmed valid values.
    pub unique_count: usize,
    /// Fraction of non-missing cells (valid + placeholder) that parse as
    /// numbers.
    pub numeric_fraction: f64,
    /// Up to five distinct placeholder tokens seen in this column.
    pub placeholder_examples: Vec<String>,
}

/// One cell of the structural preview: the raw value plus its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewCell {
    pub value: String,
    pub class: CellClass,
}

/// One raw row of the structural preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    /// Absolute index in the raw table.
    pub index: usize,
    /// Whether this row is at or after the data-start index.
    pub is_data: bool,
    pub cells: Vec<PreviewCell>,
}

/// The handoff artifact to interactive display code.
///
/// Rows are bounded by the configured preview limit, but `total_rows`
/// always reflects the full parse so limit checks stay accurate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub columns: Vec<Column>,
    pub rows: Vec<PreviewRow>,
    pub column_stats: Vec<ColumnStats>,
    pub total_rows: usize,
    /// Absolute index where data rows begin.
    pub data_start: usize,
    /// Outstanding dataset-size violations. Preview still renders with
    /// these present; finalize refuses until they are resolved.
    pub limit_violations: Vec<LimitViolation>,
}

/// A typed cell of the final dataset.
///
/// Serialized untagged: numbers as JSON numbers, text as strings, missing
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Null,
}

impl Value {
    /// Type a final (normalized) cell: missing cells become `Null`,
    /// numerically coercible cells become `Number`, the rest stay `Text`.
    pub fn from_cell(raw: &str) -> Value {
        if raw.trim().is_empty() {
            Value::Null
        } else if let Some(n) = parse_number(raw) {
            Value::Number(n)
        } else {
            Value::Text(raw.trim().to_string())
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Inferred learning-problem type of the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Classification,
    Regression,
}

/// Provenance metadata for a confirmed ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationSummary {
    pub original_row_count: usize,
    pub dropped_row_count: usize,
    /// Whether any drop mechanism was in effect for this ingestion.
    pub drop_applied: bool,
    /// Feature columns whose effective strategy was drop-row.
    pub drop_columns: Vec<String>,
    pub global_drop: bool,
    pub target_drop: bool,
}

impl ImputationSummary {
    /// Percentage of original rows that were dropped.
    pub fn dropped_percentage(&self) -> f64 {
        if self.original_row_count == 0 {
            0.0
        } else {
            (self.dropped_row_count as f64 / self.original_row_count as f64) * 100.0
        }
    }
}

/// The final artifact of a confirmed ingestion: a clean, typed table plus
/// the metadata model training needs.
///
/// Constructed once per confirmed ingestion and immutable thereafter; a new
/// ingestion replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Records over feature + target columns.
    pub rows: Vec<HashMap<String, Value>>,
    pub features: Vec<String>,
    pub target: String,
    pub target_type: TargetType,
    pub num_samples: usize,
    pub num_features: usize,
    /// Present iff `target_type` is classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_classes: Option<usize>,
    pub skip_rows: usize,
    pub header_row: usize,
    pub imputation_summary: ImputationSummary,
}

/// Which configured dataset limit a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    FileBytes,
    Columns,
    Rows,
}

/// A single dataset-size limit violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitViolation {
    pub limit: LimitKind,
    pub message: String,
}
