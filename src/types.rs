/// Shared serializable output types for the structured output formats.
///
/// These are what gets written to stdout in JSON and table modes. They are
/// decoupled from the internal `SampleRecord` / `LoadedSample` types.
use serde::{Deserialize, Serialize};

use crate::measure::{LoadedSample, Target, ViewerError};
use crate::report::text::char_len;

/// One sample in structured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleOutput {
    /// Sample number (0-4).
    pub sample: u8,
    /// Full response text as seen in traffic.
    pub traffic_visible_response: String,
    /// Full response text as seen in the UI.
    pub ui_visible_response: String,
    /// Blocking outcome label.
    pub block_type: String,
    /// Blocking indicators.
    pub indicators: Vec<String>,
    /// Path to the raw HTTP capture.
    pub raw_path: String,
    /// Path to the metadata file.
    pub info_path: String,
}

impl From<&LoadedSample> for SampleOutput {
    fn from(loaded: &LoadedSample) -> Self {
        Self {
            sample: loaded.sample,
            traffic_visible_response: loaded.record.traffic_visible_response.clone(),
            ui_visible_response: loaded.record.ui_visible_response.clone(),
            block_type: loaded.record.block_type.clone(),
            indicators: loaded.record.indicators.clone(),
            raw_path: loaded.paths.raw.display().to_string(),
            info_path: loaded.paths.info.display().to_string(),
        }
    }
}

impl SampleOutput {
    /// Char count of the traffic-visible response.
    #[must_use]
    pub fn traffic_chars(&self) -> usize {
        char_len(&self.traffic_visible_response)
    }

    /// Char count of the UI-visible response.
    #[must_use]
    pub fn ui_chars(&self) -> usize {
        char_len(&self.ui_visible_response)
    }
}

/// A whole run in structured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOutput {
    pub model: String,
    pub language: String,
    pub query_index: u8,
    /// Query text in the selected language.
    pub query: String,
    /// Reference-language query text, for translated queries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_query: Option<String>,
    /// Restricted sample, or null when all samples were loaded.
    pub sample: Option<u8>,
    pub samples: Vec<SampleOutput>,
    /// Block types in sample order.
    pub outcomes: Vec<String>,
}

impl ViewOutput {
    /// Assemble from a target, its resolved query texts, and loaded samples.
    #[must_use]
    pub fn new(
        target: &Target,
        query: &str,
        reference_query: Option<&str>,
        loaded: &[LoadedSample],
    ) -> Self {
        let samples: Vec<SampleOutput> = loaded.iter().map(SampleOutput::from).collect();
        let outcomes = samples.iter().map(|s| s.block_type.clone()).collect();
        Self {
            model: target.model.to_string(),
            language: target.language.to_string(),
            query_index: target.query_index,
            query: query.to_owned(),
            reference_query: reference_query.map(str::to_owned),
            sample: target.selection.single(),
            samples,
            outcomes,
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `ViewerError`.
    #[must_use]
    pub fn from_viewer_error(err: &ViewerError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
