//! Row splitting: raw delimited text into ordered rows of string cells.
//!
//! Tokenization is a collaborator concern, not core logic; the pipeline
//! only depends on the [`RowSplitter`] trait. The bundled
//! [`CsvRowSplitter`] covers the common case and a shell can substitute its
//! own tokenizer for exotic formats.

use crate::error::Result;

/// Splits raw text into ordered rows of string cells.
///
/// Implementations must preserve row order and must not silently merge or
/// drop rows on embedded delimiters or quotes. Both the preview and the
/// finalize paths parse the full document, so downstream row counts are
/// always accurate.
pub trait RowSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<Vec<String>>>;
}

/// Default splitter backed by the `csv` crate.
///
/// Runs in flexible mode: ragged rows are preserved as-is and padded
/// downstream, never rejected here.
#[derive(Debug, Clone)]
pub struct CsvRowSplitter {
    delimiter: u8,
}

impl Default for CsvRowSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowSplitter {
    /// Create a comma-delimited splitter.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different single-byte delimiter (e.g. `b';'` or `b'\t'`).
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl RowSplitter for CsvRowSplitter {
    fn split(&self, text: &str) -> Result<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}
