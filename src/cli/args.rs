/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use super::output::terminal_width;
use crate::measure::selection::{QUERY_COUNT, SAMPLE_COUNT};
use crate::measure::{Language, Model, Selection, Target};
use crate::report::render::{DEFAULT_TRUNCATE, DEFAULT_WIDTH};

/// viewer — inspect granular measurement test data.
#[derive(Debug, Parser)]
#[command(
    name = "viewer",
    about = "Viewer for granular measurement test data",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long)]
    pub no_header: bool,

    /// Log resolved paths and timings to stderr.
    #[arg(long)]
    pub debug: bool,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Banner-framed report with truncated, wrapped previews.
    #[default]
    Text,
    /// One pretty-printed JSON document for the whole run.
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one object per sample).
    Ndjson,
    /// Aligned summary table, one row per sample.
    Table,
}

/// What to view and where the data lives.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Selected model.
    pub model: Model,

    /// Selected language.
    pub language: Language,

    /// Index of the selected query [0-79].
    #[arg(value_parser = clap::value_parser!(u8).range(0..i64::from(QUERY_COUNT)))]
    pub query_index: u8,

    /// Sample number [0-4]; restricts output to a single sample.
    #[arg(value_parser = clap::value_parser!(u8).range(0..i64::from(SAMPLE_COUNT)))]
    pub sample: Option<u8>,

    /// Root directory of the per-model measurement data.
    #[arg(long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Reference file mapping query text to `{index}_{lang}` keys.
    #[arg(long, value_name = "FILE", default_value = "utils/query_mapping_ref.json")]
    pub query_ref: PathBuf,

    /// Render width in columns. Structured responses wrap at half of it.
    /// Defaults to the terminal width, or 100 when stdout is not a terminal.
    #[arg(long, value_name = "COLS", env = "COLUMNS", value_parser = parse_positive)]
    pub width: Option<usize>,

    /// Chars of each response shown before truncating.
    #[arg(
        long,
        value_name = "CHARS",
        default_value_t = DEFAULT_TRUNCATE,
        value_parser = parse_positive
    )]
    pub truncate: usize,
}

impl ViewArgs {
    /// The validated run request.
    #[must_use]
    pub fn target(&self) -> Target {
        Target {
            model: self.model,
            language: self.language,
            query_index: self.query_index,
            selection: Selection::from(self.sample),
        }
    }

    /// Effective render width: `--width`/`COLUMNS`, then the attached
    /// terminal, then [`DEFAULT_WIDTH`].
    #[must_use]
    pub fn render_width(&self) -> usize {
        self.width.or_else(terminal_width).unwrap_or(DEFAULT_WIDTH)
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
