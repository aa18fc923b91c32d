//! CLI entry point for the tabular ingestion pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use tabular_ingest::{
    Dataset, DatasetLimits, IngestionConfig, MissingValueStrategy, Pipeline, PreviewResult,
};
use tracing::{error, info};

/// CLI-compatible missing-value strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStrategy {
    /// Keep missing cells as missing
    LeaveAsIs,
    /// Remove rows with a missing value in the governed column
    DropRow,
    /// Replace missing values with 0
    Zero,
    /// Replace missing values with the column mean
    Mean,
    /// Replace missing values with the column median
    Median,
    /// Replace missing values with the most frequent value
    Mode,
    /// Replace missing values with --constant-value
    Constant,
}

impl CliStrategy {
    fn into_strategy(self, constant_value: Option<&str>) -> Result<MissingValueStrategy> {
        Ok(match self {
            CliStrategy::LeaveAsIs => MissingValueStrategy::LeaveAsIs,
            CliStrategy::DropRow => MissingValueStrategy::DropRow,
            CliStrategy::Zero => MissingValueStrategy::Zero,
            CliStrategy::Mean => MissingValueStrategy::Mean,
            CliStrategy::Median => MissingValueStrategy::Median,
            CliStrategy::Mode => MissingValueStrategy::Mode,
            CliStrategy::Constant => MissingValueStrategy::Constant(
                constant_value
                    .ok_or_else(|| anyhow!("--constant-value is required with --strategy constant"))?
                    .to_string(),
            ),
        })
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Ingest a delimited table into a clean, typed dataset",
    long_about = "Ingest a delimited text table, profile its columns, apply a\n\
                  missing-value policy, and materialize a typed dataset.\n\n\
                  EXAMPLES:\n  \
                  # Inspect the structural preview\n  \
                  tabular-ingest -i data.csv --preview\n\n  \
                  # Finalize with a median fallback and an explicit target\n  \
                  tabular-ingest -i data.csv --target Survived --strategy median\n\n  \
                  # Machine-readable output\n  \
                  tabular-ingest -i data.csv --json | jq .target_type"
)]
struct Args {
    /// Path to the delimited text file to ingest
    #[arg(short, long)]
    input: String,

    /// Raw rows to skip before the header
    #[arg(long, default_value = "0")]
    skip_rows: usize,

    /// Header row index, relative to the post-skip rows
    #[arg(long, default_value = "0")]
    header_row: usize,

    /// Target column name
    ///
    /// If not specified, the last resolved column is used
    #[arg(short, long)]
    target: Option<String>,

    /// Global missing-value strategy
    #[arg(short, long, value_enum, default_value = "leave-as-is")]
    strategy: CliStrategy,

    /// Literal used with `--strategy constant`
    #[arg(long)]
    constant_value: Option<String>,

    /// Per-column strategy override, as NAME=STRATEGY
    ///
    /// STRATEGY is one of the --strategy values or constant:LITERAL.
    /// May be repeated.
    #[arg(long = "column-strategy", value_name = "NAME=STRATEGY")]
    column_strategies: Vec<String>,

    /// Show the structural preview and per-column profile, then exit
    #[arg(long)]
    preview: bool,

    /// How many raw rows the preview materializes
    #[arg(long, default_value = "100")]
    preview_limit: usize,

    /// Maximum number of data rows accepted at finalize time
    #[arg(long)]
    max_rows: Option<usize>,

    /// Maximum number of columns accepted at finalize time
    #[arg(long)]
    max_columns: Option<usize>,

    /// Maximum input size in bytes accepted at finalize time
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Field delimiter (single byte)
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logging; only the final JSON is written to stdout.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !std::path::Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading table from: {}", args.input);
    let text = std::fs::read_to_string(&args.input)?;

    if !args.delimiter.is_ascii() {
        return Err(anyhow!("Delimiter must be a single ASCII character"));
    }

    let config = build_config(&args)?;
    let splitter = tabular_ingest::CsvRowSplitter::with_delimiter(args.delimiter as u8);
    let pipeline = Pipeline::builder()
        .config(config)
        .splitter(Box::new(splitter))
        .build()?;

    if args.preview {
        let preview = pipeline
            .preview(&text)
            .map_err(|e| anyhow!("Preview failed: {e}"))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        } else {
            print_preview(&preview);
        }
        return Ok(());
    }

    match pipeline.finalize(&text) {
        Ok(dataset) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&dataset)?);
            } else {
                print_summary(&args.input, &dataset);
            }
            Ok(())
        }
        Err(e) => {
            error!("Ingestion failed: {e}");
            Err(anyhow!("Ingestion failed: {e}"))
        }
    }
}

fn build_config(args: &Args) -> Result<IngestionConfig> {
    let mut builder = IngestionConfig::builder()
        .skip_rows(args.skip_rows)
        .header_row(args.header_row)
        .preview_limit(args.preview_limit)
        .global_strategy(args.strategy.into_strategy(args.constant_value.as_deref())?)
        .limits(DatasetLimits {
            max_file_bytes: args.max_bytes,
            max_columns: args.max_columns,
            max_rows: args.max_rows,
        });

    if let Some(ref target) = args.target {
        builder = builder.target_column(target.clone());
    }

    for entry in &args.column_strategies {
        let (column, strategy) = parse_column_strategy(entry)?;
        builder = builder.column_strategy(column, strategy);
    }

    Ok(builder.build()?)
}

/// Parse a `NAME=STRATEGY` override, where STRATEGY is a kebab-case
/// strategy name or `constant:LITERAL`.
fn parse_column_strategy(entry: &str) -> Result<(String, MissingValueStrategy)> {
    let (column, name) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid --column-strategy '{entry}' (expected NAME=STRATEGY)"))?;

    let strategy = if let Some(literal) = name.strip_prefix("constant:") {
        MissingValueStrategy::Constant(literal.to_string())
    } else {
        match name {
            "leave-as-is" => MissingValueStrategy::LeaveAsIs,
            "drop-row" => MissingValueStrategy::DropRow,
            "zero" => MissingValueStrategy::Zero,
            "mean" => MissingValueStrategy::Mean,
            "median" => MissingValueStrategy::Median,
            "mode" => MissingValueStrategy::Mode,
            other => return Err(anyhow!("Unknown strategy '{other}' in '{entry}'")),
        }
    };

    Ok((column.to_string(), strategy))
}

/// Print the structural preview as a table.
///
/// Uses `println!` intentionally: this is the primary output of --preview
/// and should be visible regardless of log level.
fn print_preview(preview: &PreviewResult) {
    println!("\n{}", "=".repeat(72));
    println!("STRUCTURAL PREVIEW");
    println!("{}", "=".repeat(72));
    println!(
        "  {} columns, {} rows total, data starts at row {}",
        preview.columns.len(),
        preview.total_rows,
        preview.data_start
    );
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(72));
    println!(
        "{:<20} {:<12} {:>8} {:>12} {:>8} {:>9}",
        "Column", "Type", "Missing", "Placeholder", "Unique", "Numeric%"
    );
    println!("{}", "-".repeat(72));
    for stats in &preview.column_stats {
        println!(
            "{:<20} {:<12} {:>8} {:>12} {:>8} {:>8.1}%",
            truncate_str(&stats.name, 19),
            format!("{:?}", stats.inferred_type).to_lowercase(),
            stats.missing_count,
            stats.placeholder_count,
            stats.unique_count,
            stats.numeric_fraction * 100.0
        );
    }
    println!();

    if !preview.limit_violations.is_empty() {
        println!("LIMIT VIOLATIONS (finalize will be refused)");
        println!("{}", "-".repeat(72));
        for violation in &preview.limit_violations {
            println!("  ! {}", violation.message);
        }
        println!();
    }
}

/// Print a human-readable summary of the finalized dataset.
fn print_summary(input: &str, dataset: &Dataset) {
    let summary = &dataset.imputation_summary;

    println!("\n{}", "=".repeat(72));
    println!("INGESTION COMPLETE");
    println!("{}", "=".repeat(72));
    println!();
    println!("Input:  {input}");
    println!(
        "Output: {} samples x {} features",
        dataset.num_samples, dataset.num_features
    );
    println!();
    println!("Target: {} ({:?})", dataset.target, dataset.target_type);
    if let Some(classes) = dataset.num_classes {
        println!("Classes: {classes}");
    }
    println!();
    println!(
        "Rows: {} -> {} ({} dropped)",
        summary.original_row_count, dataset.num_samples, summary.dropped_row_count
    );
    if summary.drop_applied {
        println!(
            "Drop policy: global={}, target={}, columns={:?}",
            summary.global_drop, summary.target_drop, summary.drop_columns
        );
    }
    println!();
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(72));
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
