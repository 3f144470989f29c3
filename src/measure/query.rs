/// Query index: composite `{index}_{lang}` key to literal query text.
///
/// The reference file stores the mapping the other way round
/// (`{"<query text>": "<index>_<lang>"}`), so it is inverted once on load.
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::Path;

use super::errors::ViewerError;
use super::selection::Language;

/// Immutable lookup table built once per run.
#[derive(Debug, Clone, Default)]
pub struct QueryIndex {
    by_key: HashMap<String, String>,
}

/// Build the composite key for a query index and language.
#[must_use]
pub fn query_key(query_index: u8, language: Language) -> String {
    format!("{query_index}_{}", language.code())
}

impl QueryIndex {
    /// Read and invert the reference file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceNotFound` when the file is missing, `ReferenceRead` on
    /// other I/O failures, `ReferenceParse` when it is not UTF-8 JSON holding a
    /// flat string-to-string object, and `DuplicateQueryKey` when two queries
    /// share a key.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let raw = std::fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ViewerError::ReferenceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ViewerError::ReferenceRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let reference: BTreeMap<String, String> =
            serde_json::from_slice(&raw).map_err(|source| ViewerError::ReferenceParse {
                path: path.to_path_buf(),
                source,
            })?;

        let index = Self::from_reference(reference)?;
        if index.is_empty() {
            tracing::warn!(path = %path.display(), "query reference file has no entries");
        }
        tracing::debug!(path = %path.display(), queries = index.len(), "loaded query index");
        Ok(index)
    }

    /// Invert a `{query: key}` mapping.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateQueryKey` if two queries map to the same key.
    pub fn from_reference<I>(reference: I) -> Result<Self, ViewerError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut by_key = HashMap::new();
        for (query, key) in reference {
            if by_key.contains_key(&key) {
                return Err(ViewerError::DuplicateQueryKey { key });
            }
            by_key.insert(key, query);
        }
        Ok(Self { by_key })
    }

    /// Look up the query text for an index and language.
    ///
    /// # Errors
    ///
    /// Returns `QueryNotFound` if the reference file has no such key.
    pub fn lookup(&self, query_index: u8, language: Language) -> Result<&str, ViewerError> {
        self.get(&query_key(query_index, language))
    }

    /// Look up the query text by raw composite key.
    ///
    /// # Errors
    ///
    /// Returns `QueryNotFound` if the key is absent.
    pub fn get(&self, key: &str) -> Result<&str, ViewerError> {
        self.by_key
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ViewerError::QueryNotFound {
                key: key.to_owned(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
