/// Terminal report: banners, per-sample blocks, and the closing outcome summary.
use std::io::{self, Write};

use super::text::{
    collapse_whitespace, is_spaced, preview, quoted_list, strip_newlines, wrap_indented,
};
use crate::measure::{Language, LoadedSample, QueryIndex, SampleRecord, Target, ViewerError};

/// Default render width when the terminal does not report one.
pub const DEFAULT_WIDTH: usize = 100;

/// Default truncation budget for response previews, in chars.
pub const DEFAULT_TRUNCATE: usize = 250;

const SAMPLE_LABEL_LEN: usize = "**** Sample: 0 ****".len();

/// Layout knobs for the text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Banner width and full wrap width.
    pub width: usize,
    /// Chars of each response shown before the truncation notice.
    pub truncate: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            truncate: DEFAULT_TRUNCATE,
        }
    }
}

/// Both responses of a sample, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedResponses {
    pub traffic: String,
    pub ui: String,
    /// Wrap width for this sample.
    pub wrap_width: usize,
    /// Whether the spaced-text path (collapse + half width) was taken.
    pub spaced: bool,
}

/// Shape a record's responses for display at `width`.
///
/// If either response contains a space, both have their whitespace collapsed
/// and wrap at half width. Line feeds are always removed.
#[must_use]
pub fn prepare_responses(record: &SampleRecord, width: usize) -> PreparedResponses {
    let spaced =
        is_spaced(&record.traffic_visible_response) || is_spaced(&record.ui_visible_response);
    let shape = |s: &str| {
        if spaced {
            collapse_whitespace(s)
        } else {
            strip_newlines(s)
        }
    };
    PreparedResponses {
        traffic: shape(&record.traffic_visible_response),
        ui: shape(&record.ui_visible_response),
        wrap_width: if spaced { width / 2 } else { width },
        spaced,
    }
}

/// Renders one run. Query texts are resolved up front so a missing key fails
/// before anything is printed.
#[derive(Debug)]
pub struct Reporter<'a> {
    target: &'a Target,
    query: &'a str,
    reference_query: Option<&'a str>,
    opts: RenderOptions,
}

impl<'a> Reporter<'a> {
    /// Resolve the query text (and the reference-language text for translated
    /// queries) for `target`.
    ///
    /// # Errors
    ///
    /// Returns `QueryNotFound` if either text is missing from `queries`.
    pub fn new(
        target: &'a Target,
        queries: &'a QueryIndex,
        opts: RenderOptions,
    ) -> Result<Self, ViewerError> {
        let query = queries.lookup(target.query_index, target.language)?;
        let reference_query = if target.language.is_reference() {
            None
        } else {
            Some(queries.lookup(target.query_index, Language::REFERENCE)?)
        };
        Ok(Self {
            target,
            query,
            reference_query,
            opts,
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.query
    }

    #[must_use]
    pub fn reference_query(&self) -> Option<&str> {
        self.reference_query
    }

    fn describe(&self) -> String {
        let t = self.target;
        let reference = self
            .reference_query
            .map(|r| format!(" ({r})"))
            .unwrap_or_default();
        format!(
            "test data for {}, query number {} and language {}: {}{reference}",
            t.model, t.query_index, t.language, self.query
        )
    }

    fn write_banner<W: Write>(&self, out: &mut W, line: &str) -> io::Result<()> {
        let bar = "=".repeat(self.opts.width);
        writeln!(out, "{bar}")?;
        writeln!(out, "{line}")?;
        writeln!(out, "{bar}")?;
        writeln!(out)
    }

    /// Opening banner describing the run.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let restriction = self
            .target
            .selection
            .single()
            .map(|k| format!(" --> fetching individual sample {k}"))
            .unwrap_or_default();
        let line = format!("Collecting {}{restriction}", self.describe());
        writeln!(out)?;
        self.write_banner(out, &line)
    }

    /// One sample block: divider, both response previews, outcome, file paths.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_sample<W: Write>(&self, out: &mut W, loaded: &LoadedSample) -> io::Result<()> {
        let width = self.opts.width;
        let record = &loaded.record;
        let prepared = prepare_responses(record, width);
        tracing::debug!(
            sample = loaded.sample,
            spaced = prepared.spaced,
            wrap_width = prepared.wrap_width,
            "rendering sample"
        );

        let label = format!("**** Sample: {} ****", loaded.sample);
        let dashes = "-".repeat(width.saturating_sub(SAMPLE_LABEL_LEN) / 2);
        let divider = format!("{dashes}{label}{dashes}");
        writeln!(out, "{divider:^width$}")?;

        let wrap = prepared.wrap_width;
        self.write_response(out, "Traffic visible response:", &prepared.traffic, wrap)?;
        self.write_response(out, "UI visible response:", &prepared.ui, wrap)?;

        writeln!(out, "block_type: {}", record.block_type)?;
        writeln!(out, "indicators: {}", quoted_list(&record.indicators))?;
        writeln!(
            out,
            "Raw data: {}   Meta info: {}",
            loaded.paths.raw.display(),
            loaded.paths.info.display()
        )?;
        writeln!(out, "{}", "-".repeat(width))
    }

    fn write_response<W: Write>(
        &self,
        out: &mut W,
        heading: &str,
        text: &str,
        wrap_width: usize,
    ) -> io::Result<()> {
        writeln!(out, "{heading}")?;
        for line in wrap_indented(&preview(text, self.opts.truncate), wrap_width) {
            writeln!(out, "{line}")?;
        }
        writeln!(out)
    }

    /// Closing banner with the block-type outcome of every rendered sample.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_footer<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        outcomes: &[S],
    ) -> io::Result<()> {
        let restriction = self
            .target
            .selection
            .single()
            .map(|k| format!(" --> fetched individual sample {k}"))
            .unwrap_or_default();
        let line = format!(
            "Collected {} | Outcomes: {}{restriction}",
            self.describe(),
            quoted_list(outcomes)
        );
        writeln!(out)?;
        self.write_banner(out, &line)
    }

    /// Render a complete run, pulling each selected sample from `load` in
    /// ascending order just before it is printed.
    ///
    /// On a load failure, everything written so far is flushed and the error
    /// returned; the footer is not written.
    ///
    /// # Errors
    ///
    /// Returns the first error from `load`, or `Output` on write failures.
    pub fn render<W, F>(&self, out: &mut W, mut load: F) -> Result<(), ViewerError>
    where
        W: Write,
        F: FnMut(u8) -> Result<LoadedSample, ViewerError>,
    {
        self.write_header(out)?;

        let mut outcomes = Vec::new();
        for sample in self.target.selection.samples() {
            let loaded = match load(sample) {
                Ok(loaded) => loaded,
                Err(err) => {
                    out.flush()?;
                    return Err(err);
                }
            };
            self.write_sample(out, &loaded)?;
            outcomes.push(loaded.record.block_type);
        }

        self.write_footer(out, &outcomes)?;
        out.flush()?;
        Ok(())
    }
}
