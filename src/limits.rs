//! Dataset size limit checks.
//!
//! Limit violations are soft: the preview renders with them attached so the
//! operator can see what's wrong, and only finalize refuses while any are
//! outstanding.

use crate::config::DatasetLimits;
use crate::types::{LimitKind, LimitViolation};

/// Check the parsed table against the configured limits.
///
/// `row_count` is the number of data rows (at or after the data-start
/// index), the quantity that becomes `num_samples`.
pub fn check_limits(
    limits: &DatasetLimits,
    byte_size: usize,
    column_count: usize,
    row_count: usize,
) -> Vec<LimitViolation> {
    let mut violations = Vec::new();

    if let Some(max) = limits.max_file_bytes {
        if byte_size > max {
            violations.push(LimitViolation {
                limit: LimitKind::FileBytes,
                message: format!("input is {byte_size} bytes, limit is {max}"),
            });
        }
    }

    if let Some(max) = limits.max_columns {
        if column_count > max {
            violations.push(LimitViolation {
                limit: LimitKind::Columns,
                message: format!("table has {column_count} columns, limit is {max}"),
            });
        }
    }

    if let Some(max) = limits.max_rows {
        if row_count > max {
            violations.push(LimitViolation {
                limit: LimitKind::Rows,
                message: format!("table has {row_count} data rows, limit is {max}"),
            });
        }
    }

    violations
}
