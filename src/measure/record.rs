/// Sample record loading: path resolution and metadata parsing.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::ViewerError;
use super::selection::{Language, Model, Target};

/// Per-sample metadata produced by the measurement collector.
///
/// Extra fields in the file are ignored; the four below are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Response text as observed in network traffic.
    pub traffic_visible_response: String,
    /// Response text as rendered in the chat UI.
    #[serde(rename = "UI_visible_response")]
    pub ui_visible_response: String,
    /// Blocking outcome label (e.g. "none").
    pub block_type: String,
    /// Signals that led to the blocking classification.
    pub indicators: Vec<String>,
}

/// Files belonging to one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPaths {
    /// `Q{index}_{lang}_{sample}_info.json`
    pub info: PathBuf,
    /// `Q{index}_{lang}_{sample}.http`
    pub raw: PathBuf,
}

/// A parsed record together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSample {
    pub sample: u8,
    pub paths: RecordPaths,
    pub record: SampleRecord,
}

/// On-disk layout of the measurement data.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build the metadata and raw capture paths for a sample. No existence check.
    #[must_use]
    pub fn resolve(
        &self,
        model: Model,
        language: Language,
        query_index: u8,
        sample: u8,
    ) -> RecordPaths {
        let dir = self.root.join(model.as_str());
        let stem = format!("Q{query_index}_{}_{sample}", language.code());
        RecordPaths {
            info: dir.join(format!("{stem}_info.json")),
            raw: dir.join(format!("{stem}.http")),
        }
    }

    /// Resolve and parse one sample of `target`.
    ///
    /// # Errors
    ///
    /// See [`load_record`].
    pub fn load_sample(&self, target: &Target, sample: u8) -> Result<LoadedSample, ViewerError> {
        let paths = self.resolve(target.model, target.language, target.query_index, sample);
        tracing::debug!(
            sample,
            info = %paths.info.display(),
            raw = %paths.raw.display(),
            "loading sample"
        );
        let record = load_record(&paths.info)?;
        Ok(LoadedSample {
            sample,
            paths,
            record,
        })
    }

    /// Load every sample the target selects, in ascending order.
    ///
    /// Stops at the first failing sample; nothing is returned for the others.
    ///
    /// # Errors
    ///
    /// See [`load_record`].
    pub fn load_selection(&self, target: &Target) -> Result<Vec<LoadedSample>, ViewerError> {
        target
            .selection
            .samples()
            .into_iter()
            .map(|sample| self.load_sample(target, sample))
            .collect()
    }
}

/// Parse a sample metadata file.
///
/// # Errors
///
/// Returns `RecordNotFound` if the file is missing, `RecordRead` on other I/O
/// failures, and `RecordParse` if the content is not UTF-8 JSON or lacks a
/// required field.
pub fn load_record(path: &Path) -> Result<SampleRecord, ViewerError> {
    let raw = std::fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ViewerError::RecordNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ViewerError::RecordRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_slice(&raw).map_err(|source| ViewerError::RecordParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::selection::Selection;

    const RECORD: &str = r#"{"traffic_visible_response":"Paris","UI_visible_response":"Paris is the capital.","block_type":"none","indicators":[]}"#;

    fn target(selection: Selection) -> Target {
        Target {
            model: Model::Kimi,
            language: Language::En,
            query_index: 3,
            selection,
        }
    }

    fn write_samples(root: &Path, samples: &[u8]) {
        let dir = root.join("kimi");
        std::fs::create_dir_all(&dir).unwrap();
        for s in samples {
            std::fs::write(dir.join(format!("Q3_EN_{s}_info.json")), RECORD).unwrap();
        }
    }

    #[test]
    fn test_resolve_paths() {
        let layout = DataLayout::new("data");
        let paths = layout.resolve(Model::DeepSeek, Language::Si, 42, 1);
        assert_eq!(paths.info, Path::new("data/deep-seek/Q42_SI_1_info.json"));
        assert_eq!(paths.raw, Path::new("data/deep-seek/Q42_SI_1.http"));
    }

    #[test]
    fn test_load_record_fields() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), &[0]);
        let record = load_record(&dir.path().join("kimi/Q3_EN_0_info.json")).unwrap();
        assert_eq!(record.traffic_visible_response, "Paris");
        assert_eq!(record.ui_visible_response, "Paris is the capital.");
        assert_eq!(record.block_type, "none");
        assert!(record.indicators.is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(
            &path,
            r#"{"traffic_visible_response":"","UI_visible_response":"","block_type":"hard","indicators":["keyword"],"status":200}"#,
        )
        .unwrap();
        let record = load_record(&path).unwrap();
        assert_eq!(record.indicators, vec!["keyword".to_owned()]);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(&path, r#"{"traffic_visible_response":"x"}"#).unwrap();
        assert!(matches!(
            load_record(&path).unwrap_err(),
            ViewerError::RecordParse { .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(&path, b"{\"traffic_visible_response\":\"\xff\"}").unwrap();
        let err = load_record(&path).unwrap_err();
        assert_eq!(err.code(), "record_parse_error");
        assert!(matches!(err, ViewerError::RecordParse { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_record(&dir.path().join("absent.json")).unwrap_err(),
            ViewerError::RecordNotFound { .. }
        ));
    }

    #[test]
    fn test_load_all_samples_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), &[0, 1, 2, 3, 4]);
        let layout = DataLayout::new(dir.path());
        let loaded = layout.load_selection(&target(Selection::AllSamples)).unwrap();
        let order: Vec<u8> = loaded.iter().map(|l| l.sample).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_load_single_sample() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), &[2]);
        let layout = DataLayout::new(dir.path());
        let loaded = layout.load_selection(&target(Selection::OneSample(2))).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].sample, 2);
    }

    #[test]
    fn test_incomplete_set_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), &[0, 1, 3, 4]);
        let layout = DataLayout::new(dir.path());
        let err = layout
            .load_selection(&target(Selection::AllSamples))
            .unwrap_err();
        match err {
            ViewerError::RecordNotFound { path } => {
                assert!(path.ends_with("kimi/Q3_EN_2_info.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
