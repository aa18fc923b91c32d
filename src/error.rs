//! Custom error types for the ingestion pipeline.
//!
//! One `thiserror` hierarchy covers the whole taxonomy: structural errors
//! are fatal to both preview and finalize, limit violations only block
//! finalize, and per-cell coercion failures never surface here at all.
//!
//! Errors are serializable as `{code, message}` so a frontend shell can
//! display them without string matching.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;
use crate::types::LimitViolation;

/// The main error type for the ingestion pipeline.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The input text produced no rows at all.
    #[error("Input is empty")]
    EmptyInput,

    /// `skip_rows` points past the end of the table.
    #[error("skip_rows ({skip_rows}) is out of range for a table of {total_rows} rows")]
    SkipRowsOutOfRange { skip_rows: usize, total_rows: usize },

    /// `skip_rows + header_row` points past the end of the table.
    #[error(
        "header_row ({header_row}) is out of range: {skip_rows} skipped rows in a table of {total_rows} rows"
    )]
    HeaderRowOutOfRange {
        header_row: usize,
        skip_rows: usize,
        total_rows: usize,
    },

    /// The header was found but no rows follow it.
    #[error("No data rows after header (data starts at row {data_start}, table has {total_rows} rows)")]
    NoDataRows { data_start: usize, total_rows: usize },

    /// A configured target or feature column does not exist in the resolved header.
    #[error("Column '{0}' not found in resolved header")]
    ColumnNotFound(String),

    /// The row splitter failed to tokenize the input.
    #[error("Failed to split input into rows: {0}")]
    Parse(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// The table exceeds one or more configured dataset limits.
    #[error("Dataset exceeds configured limits: {}", format_violations(.0))]
    LimitsExceeded(Vec<LimitViolation>),
}

fn format_violations(violations: &[LimitViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl IngestError {
    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::SkipRowsOutOfRange { .. } => "SKIP_ROWS_OUT_OF_RANGE",
            Self::HeaderRowOutOfRange { .. } => "HEADER_ROW_OUT_OF_RANGE",
            Self::NoDataRows { .. } => "NO_DATA_ROWS",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Parse(_) => "PARSE_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::LimitsExceeded(_) => "LIMITS_EXCEEDED",
        }
    }

    /// Check if this error is structural: the table could not be resolved
    /// at all and no partial result exists.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::SkipRowsOutOfRange { .. }
                | Self::HeaderRowOutOfRange { .. }
                | Self::NoDataRows { .. }
        )
    }

    /// Check if this error is a soft limit violation: preview still works,
    /// only finalize is refused.
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::LimitsExceeded(_))
    }

    /// The violations carried by a [`IngestError::LimitsExceeded`], empty otherwise.
    pub fn limit_violations(&self) -> &[LimitViolation] {
        match self {
            Self::LimitsExceeded(violations) => violations,
            _ => &[],
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::Parse(e.to_string())
    }
}

/// Serialize implementation for frontend/IPC compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for IngestError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("IngestError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LimitKind, LimitViolation};

    #[test]
    fn test_error_code() {
        assert_eq!(IngestError::EmptyInput.error_code(), "EMPTY_INPUT");
        assert_eq!(
            IngestError::ColumnNotFound("age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_structural() {
        assert!(IngestError::EmptyInput.is_structural());
        assert!(
            IngestError::SkipRowsOutOfRange {
                skip_rows: 5,
                total_rows: 3
            }
            .is_structural()
        );
        assert!(!IngestError::Parse("bad".to_string()).is_structural());
        assert!(!IngestError::LimitsExceeded(vec![]).is_structural());
    }

    #[test]
    fn test_is_limit() {
        let violation = LimitViolation {
            limit: LimitKind::Rows,
            message: "too many rows".to_string(),
        };
        let err = IngestError::LimitsExceeded(vec![violation]);
        assert!(err.is_limit());
        assert_eq!(err.limit_violations().len(), 1);
        assert!(!IngestError::EmptyInput.is_limit());
    }

    #[test]
    fn test_error_serialization() {
        let error = IngestError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_limits_exceeded_display_joins_messages() {
        let err = IngestError::LimitsExceeded(vec![
            LimitViolation {
                limit: LimitKind::Rows,
                message: "table has 12 rows, limit is 10".to_string(),
            },
            LimitViolation {
                limit: LimitKind::Columns,
                message: "table has 4 columns, limit is 2".to_string(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("12 rows"));
        assert!(text.contains("4 columns"));
    }
}
