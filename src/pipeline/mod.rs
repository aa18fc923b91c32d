//! The ingestion pipeline: preview and finalize over one configuration.
//!
//! Both entry points share the same structural resolution, classification,
//! and policy logic, so the interactive preview and the confirmed
//! materialization cannot drift apart. Each call is a single synchronous
//! pass over in-memory rows with no side effects; re-running `preview` on
//! every configuration edit is cheap and idempotent.

use tracing::{debug, info};

use crate::config::{ConfigValidationError, IngestionConfig};
use crate::error::{IngestError, Result};
use crate::finalizer::finalize_dataset;
use crate::imputer::impute;
use crate::limits::check_limits;
use crate::policy::resolve_policy;
use crate::profiler::{classify_cell, profile_columns};
use crate::splitter::{CsvRowSplitter, RowSplitter};
use crate::structure::resolve_structure;
use crate::types::{Dataset, PreviewCell, PreviewResult, PreviewRow};

/// The ingestion pipeline for one session.
///
/// Use [`Pipeline::builder()`] to construct one with a validated
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_ingest::{IngestionConfig, MissingValueStrategy, Pipeline};
///
/// let pipeline = Pipeline::builder()
///     .config(
///         IngestionConfig::builder()
///             .target_column("species")
///             .global_strategy(MissingValueStrategy::Median)
///             .build()?,
///     )
///     .build()?;
///
/// let preview = pipeline.preview(&text)?;
/// // ... operator adjusts configuration, preview re-runs ...
/// let dataset = pipeline.finalize(&text)?;
/// ```
pub struct Pipeline {
    config: IngestionConfig,
    splitter: Box<dyn RowSplitter>,
}

// The pipeline moves into background tasks in GUI shells.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    /// Generate the structural preview for the given raw text.
    ///
    /// The full document is parsed (downstream limit checks need accurate
    /// row counts) but only the configured window of raw rows is
    /// materialized for display. Outstanding limit violations are attached
    /// to the result instead of failing it.
    ///
    /// # Errors
    ///
    /// Structural errors and splitter parse errors only; no partial result
    /// is produced for those.
    pub fn preview(&self, text: &str) -> Result<PreviewResult> {
        let rows = self.splitter.split(text)?;
        let structure = resolve_structure(&rows, self.config.skip_rows, self.config.header_row)?;

        let data_row_count = rows.len() - structure.data_start;
        let limit_violations = check_limits(
            &self.config.limits,
            text.len(),
            structure.columns.len(),
            data_row_count,
        );

        let window = &rows[..rows.len().min(self.config.preview_limit)];
        let column_stats = profile_columns(window, &structure);

        let preview_rows: Vec<PreviewRow> = window
            .iter()
            .enumerate()
            .map(|(index, row)| PreviewRow {
                index,
                is_data: index >= structure.data_start,
                cells: structure
                    .columns
                    .iter()
                    .map(|column| {
                        let raw = row.get(column.index).map(String::as_str).unwrap_or("");
                        PreviewCell {
                            value: raw.to_string(),
                            class: classify_cell(raw),
                        }
                    })
                    .collect(),
            })
            .collect();

        debug!(
            columns = structure.columns.len(),
            window = preview_rows.len(),
            total = rows.len(),
            violations = limit_violations.len(),
            "generated preview"
        );

        Ok(PreviewResult {
            columns: structure.columns,
            rows: preview_rows,
            column_stats,
            total_rows: rows.len(),
            data_start: structure.data_start,
            limit_violations,
        })
    }

    /// Materialize the final dataset from the given raw text.
    ///
    /// The full document is re-parsed without truncation; the policy
    /// resolver, imputation engine, and finalizer run once over the
    /// complete table.
    ///
    /// # Errors
    ///
    /// Structural errors, parse errors, unknown target/feature columns,
    /// and `LimitsExceeded` while any size violation is outstanding.
    pub fn finalize(&self, text: &str) -> Result<Dataset> {
        info!("finalizing ingestion");
        let rows = self.splitter.split(text)?;
        let structure = resolve_structure(&rows, self.config.skip_rows, self.config.header_row)?;

        let data_rows = &rows[structure.data_start..];
        let violations = check_limits(
            &self.config.limits,
            text.len(),
            structure.columns.len(),
            data_rows.len(),
        );
        if !violations.is_empty() {
            return Err(IngestError::LimitsExceeded(violations));
        }

        let policy = resolve_policy(&structure, &self.config)?;
        let outcome = impute(data_rows, &policy);
        Ok(finalize_dataset(outcome, &policy, &self.config))
    }
}

/// Builder for creating a [`Pipeline`] instance.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<IngestionConfig>,
    splitter: Option<Box<dyn RowSplitter>>,
}

impl PipelineBuilder {
    /// Set the ingestion configuration.
    pub fn config(mut self, config: IngestionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Substitute a custom row splitter.
    ///
    /// Defaults to the comma-delimited [`CsvRowSplitter`].
    pub fn splitter(mut self, splitter: Box<dyn RowSplitter>) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            splitter: self
                .splitter
                .unwrap_or_else(|| Box::new(CsvRowSplitter::new())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatasetLimits, MissingValueStrategy};
    use crate::types::{CellClass, InferredType};

    fn pipeline(config: IngestionConfig) -> Pipeline {
        Pipeline::builder().config(config).build().unwrap()
    }

    #[test]
    fn test_builder_default_config() {
        let p = Pipeline::builder().build().unwrap();
        assert_eq!(p.config().preview_limit, 100);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = IngestionConfig {
            preview_limit: 0,
            ..Default::default()
        };
        assert!(Pipeline::builder().config(config).build().is_err());
    }

    #[test]
    fn test_preview_basic() {
        let p = pipeline(IngestionConfig::default());
        let preview = p.preview("a,b\n1,NA\n2,3\n").unwrap();

        assert_eq!(preview.total_rows, 3);
        assert_eq!(preview.data_start, 1);
        assert_eq!(preview.columns.len(), 2);
        assert_eq!(preview.rows.len(), 3);
        assert!(!preview.rows[0].is_data);
        assert!(preview.rows[1].is_data);
        assert_eq!(preview.rows[1].cells[1].class, CellClass::Placeholder);
        assert_eq!(preview.column_stats[0].inferred_type, InferredType::Numeric);
        assert!(preview.limit_violations.is_empty());
    }

    #[test]
    fn test_preview_window_bounded_but_counts_full() {
        let mut text = String::from("a,b\n");
        for i in 0..20 {
            text.push_str(&format!("{i},{i}\n"));
        }
        let p = pipeline(
            IngestionConfig::builder()
                .preview_limit(5)
                .build()
                .unwrap(),
        );
        let preview = p.preview(&text).unwrap();
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 21);
    }

    #[test]
    fn test_preview_deterministic() {
        let text = "a,b\n1,NA\n,x\n2,3\n";
        let p = pipeline(IngestionConfig::default());
        let first = serde_json::to_string(&p.preview(text).unwrap()).unwrap();
        let second = serde_json::to_string(&p.preview(text).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_preview_renders_with_limit_violations() {
        let p = pipeline(
            IngestionConfig::builder()
                .limits(DatasetLimits {
                    max_rows: Some(1),
                    ..Default::default()
                })
                .build()
                .unwrap(),
        );
        let preview = p.preview("a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(preview.limit_violations.len(), 1);
        assert_eq!(preview.rows.len(), 3);
    }

    #[test]
    fn test_finalize_refused_while_limits_outstanding() {
        let p = pipeline(
            IngestionConfig::builder()
                .limits(DatasetLimits {
                    max_rows: Some(1),
                    ..Default::default()
                })
                .build()
                .unwrap(),
        );
        let err = p.finalize("a,b\n1,2\n3,4\n").unwrap_err();
        assert!(err.is_limit());
        assert_eq!(err.limit_violations().len(), 1);
    }

    #[test]
    fn test_structural_error_fails_preview_and_finalize() {
        let p = pipeline(
            IngestionConfig::builder().skip_rows(10).build().unwrap(),
        );
        let text = "a,b\n1,2\n";
        assert!(p.preview(text).unwrap_err().is_structural());
        assert!(p.finalize(text).unwrap_err().is_structural());
    }

    #[test]
    fn test_finalize_basic() {
        let p = pipeline(
            IngestionConfig::builder()
                .global_strategy(MissingValueStrategy::Zero)
                .build()
                .unwrap(),
        );
        let dataset = p.finalize("a,b\n1,\n2,3\n").unwrap();
        assert_eq!(dataset.num_samples, 2);
        assert_eq!(dataset.features, vec!["a".to_string()]);
        assert_eq!(dataset.target, "b");
        assert_eq!(dataset.imputation_summary.dropped_row_count, 0);
    }

    struct SemicolonSplitter;

    impl RowSplitter for SemicolonSplitter {
        fn split(&self, text: &str) -> crate::error::Result<Vec<Vec<String>>> {
            Ok(text
                .lines()
                .map(|line| line.split(';').map(str::to_string).collect())
                .collect())
        }
    }

    #[test]
    fn test_custom_splitter_injection() {
        let p = Pipeline::builder()
            .splitter(Box::new(SemicolonSplitter))
            .build()
            .unwrap();
        let preview = p.preview("a;b\n1;2\n").unwrap();
        assert_eq!(preview.columns.len(), 2);
        assert_eq!(preview.columns[1].name, "b");
    }
}
