//! Lab schema: rows exported by the laboratory information system.
//!
//! A [`LimsSample`] has three fixed fields and a bag of user-defined fields
//! (UDFs, keyed `udf_*`). Field names have drifted over the years, so lookups
//! go through [`LimsSample::resolve`], which tries the current name before
//! the legacy one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};

pub const UDF_APPLICATION: &str = "udf_application";
pub const UDF_SAMPLE_TYPE: &str = "udf_sample_type";
pub const UDF_LIBRARY_PREPARATION_KIT: &str = "udf_library_preparation_kit";
pub const UDF_RML_KITPROTOCOL: &str = "udf_rml_kitprotocol";
pub const UDF_INSERT_SIZE_BP: &str = "udf_insert_size_bp";
pub const UDF_LENGTH_CURRENT_BP: &str = "udf_length_current_bp";
pub const UDF_SAMPLE_LIBRARY_ID: &str = "udf_sample_library_id";
pub const UDF_SAMPLE_LIBRARY_NAME: &str = "udf_sample_library_name";
pub const UDF_ID: &str = "udf_id";
pub const UDF_FRAGMENT_SIZE: &str = "udf_fragment_size";
pub const UDF_FRAGMENT_LOWER: &str = "udf_fragment_lower";
pub const UDF_FRAGMENT_UPPER: &str = "udf_fragment_upper";
pub const UDF_READ_LENGTH: &str = "udf_read_length";
pub const UDF_INDEX: &str = "udf_index";
pub const UDF_INDEX2: &str = "udf_index2";
pub const UDF_SEQUENCING_INSTRUMENT: &str = "udf_sequencing_instrument";

/// One sample row of a LIMS export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LimsSample {
    #[serde(rename = "name")]
    pub sample_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(rename = "project", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(flatten)]
    pub udf: BTreeMap<String, Value>,
}

impl LimsSample {
    pub fn new(sample_name: impl Into<String>) -> Self {
        Self {
            sample_name: sample_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sample_id(mut self, sample_id: impl Into<String>) -> Self {
        self.sample_id = Some(sample_id.into());
        self
    }

    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    #[must_use]
    pub fn with_udf(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.udf.insert(name.into(), Value::String(value.into()));
        self
    }

    /// Value of a user-defined field rendered as text; `null` counts as absent.
    pub fn udf(&self, name: &str) -> Option<String> {
        match self.udf.get(name)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The primary field if present, otherwise its legacy alias.
    pub fn resolve(&self, primary: &str, legacy: &str) -> Option<String> {
        self.udf(primary).or_else(|| self.udf(legacy))
    }

    pub fn application(&self) -> Option<String> {
        self.udf(UDF_APPLICATION)
    }

    pub fn sample_type(&self) -> Option<String> {
        self.udf(UDF_SAMPLE_TYPE)
    }

    pub fn library_preparation_kit(&self) -> Option<String> {
        self.resolve(UDF_LIBRARY_PREPARATION_KIT, UDF_RML_KITPROTOCOL)
    }

    pub fn sequencing_instrument(&self) -> Option<String> {
        self.udf(UDF_SEQUENCING_INSTRUMENT)
    }

    pub fn insert_size_bp(&self) -> Option<u32> {
        let value = self.resolve(UDF_INSERT_SIZE_BP, UDF_LENGTH_CURRENT_BP)?;
        parse_length(&self.sample_name, UDF_INSERT_SIZE_BP, &value)
    }

    pub fn fragment_size(&self) -> Option<u32> {
        self.length_udf(UDF_FRAGMENT_SIZE)
    }

    pub fn fragment_lower(&self) -> Option<u32> {
        self.length_udf(UDF_FRAGMENT_LOWER)
    }

    pub fn fragment_upper(&self) -> Option<u32> {
        self.length_udf(UDF_FRAGMENT_UPPER)
    }

    fn length_udf(&self, name: &str) -> Option<u32> {
        let value = self.udf(name)?;
        parse_length(&self.sample_name, name, &value)
    }

    /// Library identifier: the library id, then the library name, then
    /// `{sample_id}_{udf_id}`.
    pub fn sample_library_id(&self) -> Result<String> {
        if let Some(id) = self.resolve(UDF_SAMPLE_LIBRARY_ID, UDF_SAMPLE_LIBRARY_NAME) {
            return Ok(id);
        }
        let sample_id = self.sample_id.as_deref().ok_or(ModelError::MissingField {
            entity: "LimsSample",
            field: "sample_id",
        })?;
        let udf_id = self.udf(UDF_ID).ok_or(ModelError::MissingField {
            entity: "LimsSample",
            field: UDF_ID,
        })?;
        Ok(format!("{sample_id}_{udf_id}"))
    }

    /// Whether the run was paired-end, judged from the read length
    /// (`151+8+8+151` or `151x2`).
    pub fn is_paired(&self) -> Option<bool> {
        let read_length = self.udf(UDF_READ_LENGTH)?;
        Some(read_length.split('+').count() > 2 || read_length.ends_with("x2"))
    }

    /// `i7+i5` when both indexes are set, otherwise the single index.
    pub fn index_tag(&self) -> String {
        let index = self.udf(UDF_INDEX).filter(|i| !i.is_empty());
        let index2 = self.udf(UDF_INDEX2).filter(|i| !i.is_empty());
        match (index, index2) {
            (Some(i7), Some(i5)) => format!("{i7}+{i5}"),
            (Some(i7), None) => i7,
            (None, _) => String::new(),
        }
    }
}

fn parse_length(sample: &str, field: &str, value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<u32>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v.round() as u32)
    });
    if parsed.is_none() {
        tracing::warn!(sample, field, value, "ignoring non-numeric length");
    }
    parsed
}

/// A sequencing container (flowcell or pool) with its samples.
///
/// Canonical map: `{"result": {"name": .., "samples": [..]}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ContainerEnvelope", into = "ContainerEnvelope")]
pub struct LimsSequencingContainer {
    pub name: String,
    pub samples: Vec<LimsSample>,
}

impl LimsSequencingContainer {
    pub fn new(name: impl Into<String>, samples: Vec<LimsSample>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ContainerEnvelope {
    result: ContainerBody,
}

#[derive(Serialize, Deserialize)]
struct ContainerBody {
    name: String,
    #[serde(default)]
    samples: Vec<LimsSample>,
}

impl From<ContainerEnvelope> for LimsSequencingContainer {
    fn from(envelope: ContainerEnvelope) -> Self {
        Self {
            name: envelope.result.name,
            samples: envelope.result.samples,
        }
    }
}

impl From<LimsSequencingContainer> for ContainerEnvelope {
    fn from(container: LimsSequencingContainer) -> Self {
        Self {
            result: ContainerBody {
                name: container.name,
                samples: container.samples,
            },
        }
    }
}
