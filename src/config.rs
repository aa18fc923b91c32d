//! Configuration types for the ingestion pipeline.
//!
//! Configuration is built once per ingestion session through a validating
//! builder and then treated as read-only by every pass; the preview and
//! finalize paths see the exact same resolved settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Missing-value remediation strategy for a column.
///
/// A per-column override can also carry a constant literal; everything else
/// is a plain tag. Serialized form matches what a frontend sends: unit
/// variants as `"drop-row"`-style strings, constants as
/// `{"constant": "value"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingValueStrategy {
    /// Keep missing cells as missing.
    #[default]
    LeaveAsIs,
    /// Remove the whole record when the governed cell is missing.
    DropRow,
    /// Replace with 0.
    Zero,
    /// Replace with the column mean (numeric values only).
    Mean,
    /// Replace with the column median (numeric values only).
    Median,
    /// Replace with the most frequent value; ties go to the first seen.
    Mode,
    /// Replace with a configured literal.
    Constant(String),
}

impl MissingValueStrategy {
    /// Whether this strategy removes rows instead of filling cells.
    pub fn is_drop(&self) -> bool {
        matches!(self, Self::DropRow)
    }

    /// Whether this strategy fills missing cells with a replacement value.
    pub fn imputes(&self) -> bool {
        !matches!(self, Self::LeaveAsIs | Self::DropRow)
    }
}

/// Dataset size limits, enforced before a final dataset is accepted.
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DatasetLimits {
    pub max_file_bytes: Option<usize>,
    pub max_columns: Option<usize>,
    pub max_rows: Option<usize>,
}

impl DatasetLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }
}

/// Configuration for one ingestion session.
///
/// Use [`IngestionConfig::builder()`] for a validating fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_ingest::{IngestionConfig, MissingValueStrategy};
///
/// let config = IngestionConfig::builder()
///     .skip_rows(2)
///     .header_row(0)
///     .target_column("label")
///     .global_strategy(MissingValueStrategy::Median)
///     .column_strategy("comment", MissingValueStrategy::Constant("n/a".into()))
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Raw rows to skip before the header. Default: 0.
    pub skip_rows: usize,

    /// Header row index, relative to the post-skip rows. Default: 0.
    pub header_row: usize,

    /// Target column by resolved name. If `None`, the last resolved column
    /// is used.
    pub target_column: Option<String>,

    /// Feature columns by resolved name. If `None`, every resolved column
    /// except the target is used. The target is never also a feature; it is
    /// removed from this list whenever both are set to the same value.
    pub feature_columns: Option<Vec<String>>,

    /// How many raw rows the preview materializes for display. Bounds the
    /// interactive window only, never the final dataset. Default: 100.
    pub preview_limit: usize,

    /// Fallback strategy for columns without an explicit override.
    /// Default: leave-as-is.
    pub global_strategy: MissingValueStrategy,

    /// Per-column strategy overrides, keyed by resolved column name.
    pub column_strategies: HashMap<String, MissingValueStrategy>,

    /// When the target has no explicit strategy and some feature uses
    /// drop-row, also drop rows with a missing target. Default: true.
    pub infer_target_drop_from_features: bool,

    /// Dataset size limits. Default: unlimited.
    pub limits: DatasetLimits,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            header_row: 0,
            target_column: None,
            feature_columns: None,
            preview_limit: 100,
            global_strategy: MissingValueStrategy::default(),
            column_strategies: HashMap::new(),
            infer_target_drop_from_features: true,
            limits: DatasetLimits::default(),
        }
    }
}

impl IngestionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> IngestionConfigBuilder {
        IngestionConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.preview_limit == 0 {
            return Err(ConfigValidationError::InvalidPreviewLimit(
                self.preview_limit,
            ));
        }

        for (field, value) in [
            ("max_file_bytes", self.limits.max_file_bytes),
            ("max_columns", self.limits.max_columns),
            ("max_rows", self.limits.max_rows),
        ] {
            if value == Some(0) {
                return Err(ConfigValidationError::InvalidLimit { field });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid preview limit: {0} (must be at least 1)")]
    InvalidPreviewLimit(usize),

    #[error("Invalid limit for '{field}': 0 (use None for unlimited)")]
    InvalidLimit { field: &'static str },
}

/// Builder for [`IngestionConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct IngestionConfigBuilder {
    skip_rows: Option<usize>,
    header_row: Option<usize>,
    target_column: Option<String>,
    feature_columns: Option<Vec<String>>,
    preview_limit: Option<usize>,
    global_strategy: Option<MissingValueStrategy>,
    column_strategies: HashMap<String, MissingValueStrategy>,
    infer_target_drop_from_features: Option<bool>,
    limits: Option<DatasetLimits>,
}

impl IngestionConfigBuilder {
    /// Set how many raw rows to skip before the header.
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = Some(rows);
        self
    }

    /// Set the header row index, relative to the post-skip rows.
    pub fn header_row(mut self, row: usize) -> Self {
        self.header_row = Some(row);
        self
    }

    /// Set an explicit target column.
    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    /// Set explicit feature columns.
    pub fn feature_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set how many raw rows the preview materializes.
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = Some(limit);
        self
    }

    /// Set the global fallback strategy.
    pub fn global_strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.global_strategy = Some(strategy);
        self
    }

    /// Add a per-column strategy override.
    pub fn column_strategy(
        mut self,
        column: impl Into<String>,
        strategy: MissingValueStrategy,
    ) -> Self {
        self.column_strategies.insert(column.into(), strategy);
        self
    }

    /// Replace the whole per-column override map.
    pub fn column_strategies(mut self, strategies: HashMap<String, MissingValueStrategy>) -> Self {
        self.column_strategies = strategies;
        self
    }

    /// Enable or disable the target-drop fallback inferred from
    /// drop-row feature columns.
    pub fn infer_target_drop_from_features(mut self, infer: bool) -> Self {
        self.infer_target_drop_from_features = Some(infer);
        self
    }

    /// Set dataset size limits.
    pub fn limits(mut self, limits: DatasetLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `IngestionConfig` or an error if validation fails.
    pub fn build(self) -> Result<IngestionConfig, ConfigValidationError> {
        let config = IngestionConfig {
            skip_rows: self.skip_rows.unwrap_or(0),
            header_row: self.header_row.unwrap_or(0),
            target_column: self.target_column,
            feature_columns: self.feature_columns,
            preview_limit: self.preview_limit.unwrap_or(100),
            global_strategy: self.global_strategy.unwrap_or_default(),
            column_strategies: self.column_strategies,
            infer_target_drop_from_features: self.infer_target_drop_from_features.unwrap_or(true),
            limits: self.limits.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestionConfig::default();
        assert_eq!(config.skip_rows, 0);
        assert_eq!(config.header_row, 0);
        assert_eq!(config.preview_limit, 100);
        assert_eq!(config.global_strategy, MissingValueStrategy::LeaveAsIs);
        assert!(config.target_column.is_none());
        assert!(config.infer_target_drop_from_features);
        assert_eq!(config.limits, DatasetLimits::unlimited());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = IngestionConfig::builder()
            .skip_rows(3)
            .header_row(1)
            .target_column("label")
            .feature_columns(["a", "b"])
            .preview_limit(25)
            .global_strategy(MissingValueStrategy::Median)
            .column_strategy("a", MissingValueStrategy::DropRow)
            .infer_target_drop_from_features(false)
            .build()
            .unwrap();

        assert_eq!(config.skip_rows, 3);
        assert_eq!(config.header_row, 1);
        assert_eq!(config.target_column.as_deref(), Some("label"));
        assert_eq!(
            config.feature_columns,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(config.preview_limit, 25);
        assert_eq!(config.global_strategy, MissingValueStrategy::Median);
        assert_eq!(
            config.column_strategies.get("a"),
            Some(&MissingValueStrategy::DropRow)
        );
        assert!(!config.infer_target_drop_from_features);
    }

    #[test]
    fn test_validation_rejects_zero_preview_limit() {
        let result = IngestionConfig::builder().preview_limit(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPreviewLimit(0)
        ));
    }

    #[test]
    fn test_validation_rejects_zero_limits() {
        let result = IngestionConfig::builder()
            .limits(DatasetLimits {
                max_rows: Some(0),
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidLimit { field: "max_rows" }
        ));
    }

    #[test]
    fn test_strategy_predicates() {
        assert!(MissingValueStrategy::DropRow.is_drop());
        assert!(!MissingValueStrategy::Mean.is_drop());

        assert!(MissingValueStrategy::Zero.imputes());
        assert!(MissingValueStrategy::Constant("x".to_string()).imputes());
        assert!(!MissingValueStrategy::LeaveAsIs.imputes());
        assert!(!MissingValueStrategy::DropRow.imputes());
    }

    #[test]
    fn test_strategy_serialization_forms() {
        assert_eq!(
            serde_json::to_string(&MissingValueStrategy::LeaveAsIs).unwrap(),
            "\"leave-as-is\""
        );
        assert_eq!(
            serde_json::to_string(&MissingValueStrategy::DropRow).unwrap(),
            "\"drop-row\""
        );
        assert_eq!(
            serde_json::to_string(&MissingValueStrategy::Constant("0".to_string())).unwrap(),
            "{\"constant\":\"0\"}"
        );
    }

    #[test]
    fn test_config_from_frontend_json() {
        let json = r#"{
            "skip_rows": 1,
            "header_row": 0,
            "target_column": "species",
            "feature_columns": ["petal_width", "petal_length"],
            "preview_limit": 50,
            "global_strategy": "mean",
            "column_strategies": {
                "petal_width": "drop-row",
                "notes": { "constant": "unknown" }
            },
            "infer_target_drop_from_features": true,
            "limits": { "max_file_bytes": null, "max_columns": 200, "max_rows": 10000 }
        }"#;

        let config: IngestionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.target_column.as_deref(), Some("species"));
        assert_eq!(config.global_strategy, MissingValueStrategy::Mean);
        assert_eq!(
            config.column_strategies.get("petal_width"),
            Some(&MissingValueStrategy::DropRow)
        );
        assert_eq!(
            config.column_strategies.get("notes"),
            Some(&MissingValueStrategy::Constant("unknown".to_string()))
        );
        assert_eq!(config.limits.max_columns, Some(200));
        assert_eq!(config.limits.max_file_bytes, None);
        config.validate().unwrap();
    }
}
