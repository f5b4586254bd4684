use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Neutral model names of the supported Illumina instruments.
pub const ILLUMINA_MODEL_NAMES: &[&str] = &[
    "NovaSeqX",
    "NovaSeq",
    "MiSeq",
    "iSeq",
    "HiSeqX",
    "HiSeq2500",
    "HiSeq",
];

/// Instrument id prefixes as found in run folder names.
const INSTRUMENT_ID_PREFIXES: &[(&str, &str)] = &[
    ("lh", "NovaSeqX"),
    ("a", "NovaSeq"),
    ("m", "MiSeq"),
    ("fs", "iSeq"),
    ("st-e", "HiSeqX"),
    ("d", "HiSeq2500"),
    ("sn", "HiSeq"),
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencingPlatform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// A sequencing platform whose model name is a known Illumina instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SequencingPlatform", into = "SequencingPlatform")]
pub struct IlluminaPlatform {
    model_name: String,
}

impl IlluminaPlatform {
    /// Accepts descriptive names such as `NovaSeq X 10B` or
    /// `HiSeq2500 High Output` and keeps the instrument part.
    pub fn new(model_name: &str) -> Result<Self> {
        let normalized = normalize_model_name(model_name);
        let known = ILLUMINA_MODEL_NAMES
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&normalized));
        if !known {
            return Err(ModelError::InstrumentModelNotRecognized { needle: normalized });
        }
        Ok(Self {
            model_name: normalized,
        })
    }

    /// Build the platform from an instrument id such as `A00123`.
    pub fn from_instrument_id(instrument_id: &str) -> Result<Self> {
        Self::new(Self::model_name_from_id(instrument_id)?)
    }

    /// Map an instrument id to a model name by its non-numeric prefix.
    pub fn model_name_from_id(instrument_id: &str) -> Result<&'static str> {
        let prefix = match instrument_id.find(|c: char| c.is_ascii_digit()) {
            Some(end) if end > 0 => &instrument_id[..end],
            _ => instrument_id,
        };
        let prefix = prefix.to_lowercase();
        INSTRUMENT_ID_PREFIXES
            .iter()
            .find(|(known, _)| *known == prefix)
            .map(|(_, model)| *model)
            .ok_or_else(|| ModelError::InstrumentModelNotRecognized {
                needle: instrument_id.to_string(),
            })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// First whitespace-delimited token plus a directly following `X`.
fn normalize_model_name(model_name: &str) -> String {
    if model_name.is_empty() || model_name.starts_with(char::is_whitespace) {
        return model_name.to_string();
    }
    let end = model_name
        .find(char::is_whitespace)
        .unwrap_or(model_name.len());
    let (token, rest) = model_name.split_at(end);
    if rest.trim_start().starts_with('X') {
        format!("{token}X")
    } else {
        token.to_string()
    }
}

impl TryFrom<SequencingPlatform> for IlluminaPlatform {
    type Error = ModelError;

    fn try_from(platform: SequencingPlatform) -> Result<Self> {
        Self::new(platform.model_name.as_deref().unwrap_or_default())
    }
}

impl From<IlluminaPlatform> for SequencingPlatform {
    fn from(platform: IlluminaPlatform) -> Self {
        Self {
            model_name: Some(platform.model_name),
        }
    }
}
