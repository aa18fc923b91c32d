//! Tabular Ingestion & Imputation Pipeline
//!
//! An interactive-friendly ingestion library for delimited tabular data:
//! parse raw text into rows, let an operator adjust structural assumptions
//! and per-column missing-value policies against a cheap preview, then
//! materialize a clean, typed dataset for model training.
//!
//! # Overview
//!
//! The pipeline is built from small pure stages:
//!
//! - **Row splitting**: raw text → rows of string cells, behind the
//!   [`RowSplitter`] trait (a CSV implementation ships by default)
//! - **Structural resolution**: skip/header handling, unique column names,
//!   data-start index
//! - **Column profiling**: missing/placeholder/valid classification and
//!   per-column statistics over a bounded preview window
//! - **Policy resolution**: global fallback + per-column overrides → one
//!   effective strategy per column
//! - **Imputation**: normalization, row-drop semantics, and
//!   zero/constant/mean/median/mode replacements over the full table
//! - **Finalization**: classification-vs-regression inference and dataset
//!   packaging with provenance metadata
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabular_ingest::{IngestionConfig, MissingValueStrategy, Pipeline};
//!
//! let text = std::fs::read_to_string("data.csv")?;
//!
//! let pipeline = Pipeline::builder()
//!     .config(
//!         IngestionConfig::builder()
//!             .skip_rows(0)
//!             .header_row(0)
//!             .target_column("species")
//!             .global_strategy(MissingValueStrategy::Median)
//!             .column_strategy("notes", MissingValueStrategy::DropRow)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! // cheap, idempotent; re-run on every configuration edit
//! let preview = pipeline.preview(&text)?;
//! println!("{} columns, {} rows", preview.columns.len(), preview.total_rows);
//!
//! // one full pass once the operator confirms
//! let dataset = pipeline.finalize(&text)?;
//! println!("{:?} with {} samples", dataset.target_type, dataset.num_samples);
//! ```
//!
//! # Error Handling
//!
//! Everything is returned as a [`Result`]: structural problems (bad
//! skip/header indices, empty input) fail preview and finalize alike, size
//! limit violations only block finalize (the preview renders with them
//! attached), and individual malformed cells never error at all; they
//! degrade to exclusion from the affected statistic.

pub mod config;
pub mod error;
pub mod finalizer;
pub mod imputer;
pub mod limits;
pub mod pipeline;
pub mod policy;
pub mod profiler;
pub mod splitter;
pub mod structure;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, DatasetLimits, IngestionConfig, IngestionConfigBuilder,
    MissingValueStrategy,
};
pub use error::{IngestError, Result};
pub use finalizer::infer_target_type;
pub use imputer::ImputationOutcome;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use policy::ResolvedPolicy;
pub use splitter::{CsvRowSplitter, RowSplitter};
pub use structure::TableStructure;
pub use types::{
    CellClass, Column, ColumnStats, Dataset, ImputationSummary, InferredType, LimitKind,
    LimitViolation, PreviewCell, PreviewResult, PreviewRow, TargetType, Value,
};
