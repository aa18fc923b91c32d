//! Structural resolution: locating the header and naming columns.
//!
//! Resolution is a pure function of the raw rows and the `(skip_rows,
//! header_row)` pair, so the interactive path can re-run it on every
//! configuration edit.

use std::collections::HashMap;

use crate::error::{IngestError, Result};
use crate::types::Column;

/// The resolved structure of a raw table: unique column names and the
/// absolute index where data rows begin.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStructure {
    pub columns: Vec<Column>,
    pub data_start: usize,
}

/// Resolve the table structure from raw rows.
///
/// Header cell text is trimmed; an empty trimmed name becomes the literal
/// `"col"`. Duplicate names are deduplicated by suffixing: the first
/// occurrence of a base name keeps it, the k-th later duplicate becomes
/// `"{base}_{k}"`. Order of first appearance is preserved, so within one
/// resolved header all names are distinct.
///
/// # Errors
///
/// Structural errors only: empty input, out-of-range `skip_rows` or
/// `header_row`, or a header with no data rows after it.
pub fn resolve_structure(
    rows: &[Vec<String>],
    skip_rows: usize,
    header_row: usize,
) -> Result<TableStructure> {
    let total_rows = rows.len();
    if total_rows == 0 {
        return Err(IngestError::EmptyInput);
    }
    if skip_rows >= total_rows {
        return Err(IngestError::SkipRowsOutOfRange {
            skip_rows,
            total_rows,
        });
    }
    if skip_rows + header_row >= total_rows {
        return Err(IngestError::HeaderRowOutOfRange {
            header_row,
            skip_rows,
            total_rows,
        });
    }

    let header_index = skip_rows + header_row;
    let data_start = header_index + 1;
    if data_start >= total_rows {
        return Err(IngestError::NoDataRows {
            data_start,
            total_rows,
        });
    }

    let columns = dedupe_column_names(&rows[header_index]);
    Ok(TableStructure {
        columns,
        data_start,
    })
}

fn dedupe_column_names(header: &[String]) -> Vec<Column> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(header.len());

    for (index, cell) in header.iter().enumerate() {
        let trimmed = cell.trim();
        let base = if trimmed.is_empty() {
            "col".to_string()
        } else {
            trimmed.to_string()
        };

        let occurrences = seen.entry(base.clone()).or_insert(0);
        let name = if *occurrences == 0 {
            base.clone()
        } else {
            format!("{base}_{occurrences}")
        };
        *occurrences += 1;

        columns.push(Column { name, index });
    }

    columns
}
