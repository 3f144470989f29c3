/// What a single run asks for: model, language, query index, and sample set.
use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Number of samples collected per (model, language, query).
pub const SAMPLE_COUNT: u8 = 5;

/// Number of queries in the measurement set.
pub const QUERY_COUNT: u8 = 80;

/// Measured model. The value name doubles as the data directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Model {
    Baidu,
    DeepSeek,
    Doubao,
    Kimi,
    Qwen,
}

impl Model {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baidu => "baidu",
            Self::DeepSeek => "deep-seek",
            Self::Doubao => "doubao",
            Self::Kimi => "kimi",
            Self::Qwen => "qwen",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query language.
///
/// `EN` is the reference language; the other two are translations of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Language {
    #[value(name = "EN")]
    #[serde(rename = "EN")]
    En,
    #[value(name = "SI")]
    #[serde(rename = "SI")]
    Si,
    #[value(name = "TW")]
    #[serde(rename = "TW")]
    Tw,
}

impl Language {
    /// The language the other translations are derived from.
    pub const REFERENCE: Self = Self::En;

    /// Three-letter-style code used in keys and file names.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Si => "SI",
            Self::Tw => "TW",
        }
    }

    #[must_use]
    pub fn is_reference(self) -> bool {
        self == Self::REFERENCE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which samples of a query to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every sample, `0..SAMPLE_COUNT`.
    AllSamples,
    /// A single sample.
    OneSample(u8),
}

impl Selection {
    /// Sample indices in ascending order.
    #[must_use]
    pub fn samples(self) -> Vec<u8> {
        match self {
            Self::AllSamples => (0..SAMPLE_COUNT).collect(),
            Self::OneSample(k) => vec![k],
        }
    }

    /// The restricted sample, if any.
    #[must_use]
    pub fn single(self) -> Option<u8> {
        match self {
            Self::AllSamples => None,
            Self::OneSample(k) => Some(k),
        }
    }
}

impl From<Option<u8>> for Selection {
    fn from(sample: Option<u8>) -> Self {
        sample.map_or(Self::AllSamples, Self::OneSample)
    }
}

/// A fully validated run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub model: Model,
    pub language: Language,
    pub query_index: u8,
    pub selection: Selection,
}
