/// Errors from the measurement domain layer.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or rendering measurement data.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The query reference file does not exist.
    #[error("Query reference file '{}' not found", path.display())]
    ReferenceNotFound {
        /// Path that was read.
        path: PathBuf,
    },

    /// The query reference file exists but could not be read.
    #[error("Failed to read query reference file '{}': {source}", path.display())]
    ReferenceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The query reference file is not a flat `{query: key}` JSON object.
    #[error("Malformed query reference file '{}': {source}", path.display())]
    ReferenceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two queries in the reference file share the same composite key.
    #[error("Query reference file maps more than one query to '{key}'")]
    DuplicateQueryKey {
        /// The composite `{index}_{lang}` key.
        key: String,
    },

    /// No query is registered under the composite key.
    #[error("No query registered for '{key}'")]
    QueryNotFound { key: String },

    /// A sample metadata file does not exist.
    #[error("Sample metadata file '{}' not found", path.display())]
    RecordNotFound { path: PathBuf },

    /// A sample metadata file exists but could not be read.
    #[error("Failed to read sample metadata file '{}': {source}", path.display())]
    RecordRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A sample metadata file is not valid JSON or lacks a required field.
    #[error("Malformed sample metadata file '{}': {source}", path.display())]
    RecordParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A structured output document could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the report to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Exit code mapping for `ViewerError` variants.
impl ViewerError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReferenceNotFound { .. }
            | Self::QueryNotFound { .. }
            | Self::RecordNotFound { .. } => 4,
            Self::ReferenceRead { .. }
            | Self::ReferenceParse { .. }
            | Self::DuplicateQueryKey { .. }
            | Self::RecordRead { .. }
            | Self::RecordParse { .. }
            | Self::Serialize(_)
            | Self::Output(_) => 1,
        }
    }

    /// Machine-readable error code (`snake_case`) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReferenceNotFound { .. } => "reference_not_found",
            Self::ReferenceRead { .. } => "reference_read_error",
            Self::ReferenceParse { .. } => "reference_parse_error",
            Self::DuplicateQueryKey { .. } => "duplicate_query_key",
            Self::QueryNotFound { .. } => "query_not_found",
            Self::RecordNotFound { .. } => "record_not_found",
            Self::RecordRead { .. } => "record_read_error",
            Self::RecordParse { .. } => "record_parse_error",
            Self::Serialize(_) => "serialize_error",
            Self::Output(_) => "output_error",
        }
    }
}
