/// Output formatting for the structured modes, error output, debug timing.
use std::io::{self, IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};

use super::args::OutputFormat;
use crate::measure::ViewerError;
use crate::types::{ErrorOutput, SampleOutput, ViewOutput};

/// Resolve the effective output format, handling the `--json` flag.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag { OutputFormat::Json } else { fmt }
}

/// Output context passed to all formatters.
#[derive(Debug)]
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// When true, timing spans are emitted at debug level.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Logs elapsed time on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Structured run output ---

/// Write a whole run to stdout in one of the structured formats.
///
/// # Errors
///
/// Returns `Serialize` if the document cannot be encoded and `Output` if
/// stdout cannot be written (e.g. a closed pipe).
pub fn write_view(view: &ViewOutput, ctx: &OutputCtx) -> Result<(), ViewerError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_view_to(&mut out, view, ctx)
}

/// Write a whole run to `out` in one of the structured formats.
///
/// `OutputFormat::Text` is streamed by the reporter instead and is treated
/// like `Json` here.
///
/// # Errors
///
/// See [`write_view`].
pub fn write_view_to<W: Write>(
    out: &mut W,
    view: &ViewOutput,
    ctx: &OutputCtx,
) -> Result<(), ViewerError> {
    match ctx.format {
        OutputFormat::Json | OutputFormat::Text => {
            writeln!(out, "{}", serde_json::to_string_pretty(view)?)?;
        }
        OutputFormat::Compact => writeln!(out, "{}", serde_json::to_string(view)?)?,
        OutputFormat::Ndjson => {
            for s in &view.samples {
                writeln!(out, "{}", serde_json::to_string(s)?)?;
            }
        }
        OutputFormat::Table => {
            writeln!(out, "{}", samples_table(&view.samples, ctx.no_header))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Columns of the attached terminal, if stdout is one.
///
/// Piped or redirected output never consults the terminal.
#[must_use]
pub fn terminal_width() -> Option<usize> {
    if !io::stdout().is_terminal() {
        return None;
    }
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => Some(usize::from(cols)),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("terminal size unavailable: {e}");
            None
        }
    }
}

/// Summary table, one row per sample.
#[must_use]
pub fn samples_table(samples: &[SampleOutput], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !no_header {
        table.set_header([
            "SAMPLE",
            "BLOCK TYPE",
            "INDICATORS",
            "TRAFFIC CHARS",
            "UI CHARS",
            "RAW DATA",
        ]);
    }
    for s in samples {
        table.add_row([
            Cell::new(s.sample),
            Cell::new(&s.block_type),
            Cell::new(s.indicators.join(", ")),
            Cell::new(s.traffic_chars()),
            Cell::new(s.ui_chars()),
            Cell::new(&s.raw_path),
        ]);
    }
    table
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Text | OutputFormat::Table => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(label = self.label, elapsed_ms = ms, "timing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: u8, block_type: &str) -> SampleOutput {
        SampleOutput {
            sample: n,
            traffic_visible_response: "Paris".to_owned(),
            ui_visible_response: "巴黎".to_owned(),
            block_type: block_type.to_owned(),
            indicators: vec!["keyword".to_owned(), "refusal".to_owned()],
            raw_path: format!("data/kimi/Q3_EN_{n}.http"),
            info_path: format!("data/kimi/Q3_EN_{n}_info.json"),
        }
    }

    #[test]
    fn test_json_flag_wins() {
        assert_eq!(resolve_format(OutputFormat::Table, true), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Table, false), OutputFormat::Table);
    }

    #[test]
    fn test_table_rows() {
        let rows = [sample(0, "none"), sample(1, "hard")];
        let rendered = samples_table(&rows, false).to_string();
        assert!(rendered.contains("BLOCK TYPE"));
        assert!(rendered.contains("keyword, refusal"));
        assert!(rendered.contains("data/kimi/Q3_EN_1.http"));
        assert!(rendered.contains("hard"));
    }

    fn view(samples: Vec<SampleOutput>) -> ViewOutput {
        let outcomes = samples.iter().map(|s| s.block_type.clone()).collect();
        ViewOutput {
            model: "kimi".to_owned(),
            language: "EN".to_owned(),
            query_index: 3,
            query: "What is the capital of France?".to_owned(),
            reference_query: None,
            sample: None,
            samples,
            outcomes,
        }
    }

    /// A writer whose every write fails like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ndjson_one_line_per_sample() {
        let ctx = OutputCtx::new(OutputFormat::Ndjson, false, false, false);
        let mut buf = Vec::new();
        let rows = vec![sample(0, "none"), sample(1, "hard")];
        write_view_to(&mut buf, &view(rows), &ctx).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["block_type"], "hard");
    }

    #[test]
    fn test_compact_is_single_line() {
        let ctx = OutputCtx::new(OutputFormat::Compact, false, false, false);
        let mut buf = Vec::new();
        write_view_to(&mut buf, &view(vec![sample(0, "none")]), &ctx).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"outcomes\":[\"none\"]"));
    }

    #[test]
    fn test_closed_stdout_is_output_error() {
        for format in [OutputFormat::Json, OutputFormat::Ndjson, OutputFormat::Table] {
            let ctx = OutputCtx::new(format, false, false, false);
            let err = write_view_to(&mut ClosedPipe, &view(vec![sample(0, "none")]), &ctx)
                .unwrap_err();
            assert_eq!(err.code(), "output_error", "format {format:?}");
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_table_without_header() {
        let rendered = samples_table(&[sample(0, "none")], true).to_string();
        assert!(!rendered.contains("BLOCK TYPE"));
        assert!(rendered.contains("none"));
    }
}
