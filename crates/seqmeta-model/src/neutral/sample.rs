use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Identifies a sample and, when known, the library made from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDescriptor {
    pub sample_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_library_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_library_tag: Option<String>,
}

impl SampleDescriptor {
    pub fn new(sample_name: impl Into<String>) -> Self {
        Self {
            sample_name: sample_name.into(),
            sample_id: None,
            sample_library_id: None,
            sample_library_tag: None,
        }
    }

    #[must_use]
    pub fn with_sample_id(mut self, sample_id: impl Into<String>) -> Self {
        self.sample_id = Some(sample_id.into());
        self
    }

    #[must_use]
    pub fn with_library(
        mut self,
        library_id: impl Into<String>,
        library_tag: impl Into<String>,
    ) -> Self {
        self.sample_library_id = Some(library_id.into());
        self.sample_library_tag = Some(library_tag.into());
        self
    }

    pub fn sample_alias(&self) -> Option<&str> {
        self.sample_library_id.as_deref()
    }

    /// Index sequences of the library, split on `+`.
    pub fn library_tags(&self) -> Vec<&str> {
        self.sample_library_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.split('+').collect())
            .unwrap_or_default()
    }
}

/// A sample sequenced as part of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolMember(SampleDescriptor);

impl PoolMember {
    pub fn new(descriptor: SampleDescriptor) -> Self {
        Self(descriptor)
    }

    pub fn descriptor(&self) -> &SampleDescriptor {
        &self.0
    }

    pub fn into_descriptor(self) -> SampleDescriptor {
        self.0
    }

    pub fn member_name(&self) -> &str {
        if self.0.sample_name.is_empty() {
            self.0.sample_id.as_deref().unwrap_or_default()
        } else {
            &self.0.sample_name
        }
    }

    /// One read label per index tag, grouped by library (or sample) id.
    pub fn read_labels(&self) -> Vec<ReadLabel> {
        let read_group_tag = self
            .0
            .sample_library_id
            .clone()
            .or_else(|| self.0.sample_id.clone());
        self.library_tags()
            .into_iter()
            .map(|tag| ReadLabel {
                label: tag.to_string(),
                read_group_tag: read_group_tag.clone(),
            })
            .collect()
    }
}

impl Deref for PoolMember {
    type Target = SampleDescriptor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SampleDescriptor> for PoolMember {
    fn from(descriptor: SampleDescriptor) -> Self {
        Self(descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadLabel {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_group_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default)]
    pub samples: Vec<PoolMember>,
}

impl Pool {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudyRef {
    pub project_id: String,
}

impl StudyRef {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }
}
