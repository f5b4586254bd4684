use serde::{Deserialize, Serialize};

use crate::library_design::{ApplicationAttribute, LibraryKitAttribute, SourceAttribute};
use crate::neutral::sample::{Pool, SampleDescriptor};

/// Read layout and size selection of a library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_upper: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_lower: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_insert_size: Option<u32>,
}

impl LibraryLayout {
    pub fn paired(target_insert_size: Option<u32>) -> Self {
        Self {
            is_paired: Some(true),
            target_insert_size,
            ..Self::default()
        }
    }

    pub fn single() -> Self {
        Self {
            is_paired: Some(false),
            ..Self::default()
        }
    }
}

/// A sequencing library: what was sequenced and how it was prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<Pool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub application: ApplicationAttribute,
    pub sample_type: SourceAttribute,
    pub library_kit: LibraryKitAttribute,
    pub layout: LibraryLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_protocol: Option<String>,
}
