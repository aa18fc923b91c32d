//! Policy resolution: one effective strategy per column.
//!
//! The global fallback and the sparse per-column override map are merged
//! into a single resolved table before any data pass runs, so the
//! imputation engine is a pure function of one policy structure instead of
//! consulting configuration mid-iteration.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{IngestionConfig, MissingValueStrategy};
use crate::error::{IngestError, Result};
use crate::structure::TableStructure;
use crate::types::Column;

/// The fully resolved missing-value policy for one ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPolicy {
    /// Feature columns in order, target already removed.
    pub features: Vec<Column>,
    pub target: Column,
    /// Effective strategy per feature column name.
    pub strategies: HashMap<String, MissingValueStrategy>,
    /// Feature columns whose effective strategy is drop-row, in feature order.
    pub drop_columns: Vec<String>,
    /// The global fallback strategy is drop-row.
    pub global_drop: bool,
    /// Rows with a missing target cell are dropped.
    pub target_drop: bool,
}

impl ResolvedPolicy {
    /// Effective strategy for a feature column.
    pub fn strategy_for(&self, column: &str) -> &MissingValueStrategy {
        self.strategies
            .get(column)
            .unwrap_or(&MissingValueStrategy::LeaveAsIs)
    }
}

/// Merge the global strategy and per-column overrides into one effective
/// policy for the resolved structure.
///
/// Defaults: the target is the last resolved column, the features are every
/// other column. An explicitly configured target is removed from explicitly
/// configured features so the two never overlap.
///
/// # Errors
///
/// `ColumnNotFound` if an explicit target or feature name is not in the
/// resolved header.
pub fn resolve_policy(
    structure: &TableStructure,
    config: &IngestionConfig,
) -> Result<ResolvedPolicy> {
    let target = match &config.target_column {
        Some(name) => find_column(structure, name)?,
        // resolve_structure guarantees at least one column
        None => structure
            .columns
            .last()
            .cloned()
            .ok_or_else(|| IngestError::ColumnNotFound("<target>".to_string()))?,
    };

    let features: Vec<Column> = match &config.feature_columns {
        Some(names) => names
            .iter()
            .map(|name| find_column(structure, name))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .filter(|c| c.name != target.name)
            .collect(),
        None => structure
            .columns
            .iter()
            .filter(|c| c.name != target.name)
            .cloned()
            .collect(),
    };

    let mut strategies = HashMap::with_capacity(features.len());
    let mut drop_columns = Vec::new();
    for feature in &features {
        let effective = config
            .column_strategies
            .get(&feature.name)
            .cloned()
            .unwrap_or_else(|| config.global_strategy.clone());
        if effective.is_drop() {
            drop_columns.push(feature.name.clone());
        }
        strategies.insert(feature.name.clone(), effective);
    }

    let global_drop = config.global_strategy.is_drop();
    let target_drop = if global_drop {
        true
    } else {
        match config.column_strategies.get(&target.name) {
            Some(strategy) => strategy.is_drop(),
            // No explicit target rule: a feature-level drop implies target
            // cleanliness, unless that inference is disabled.
            None => config.infer_target_drop_from_features && !drop_columns.is_empty(),
        }
    };

    debug!(
        target_column = %target.name,
        features = features.len(),
        drop_columns = drop_columns.len(),
        global_drop,
        target_drop,
        "resolved missing-value policy"
    );

    Ok(ResolvedPolicy {
        features,
        target,
        strategies,
        drop_columns,
        global_drop,
        target_drop,
    })
}

fn find_column(structure: &TableStructure, name: &str) -> Result<Column> {
    structure
        .columns
        .iter()
        .find(|c| c.name == name)
        .cloned()
        .ok_or_else(|| IngestError::ColumnNotFound(name.to_string()))
}
