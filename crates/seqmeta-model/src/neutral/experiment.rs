use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::neutral::library::Library;
use crate::neutral::platform::IlluminaPlatform;
use crate::neutral::sample::{SampleDescriptor, StudyRef};

/// Identity-only stand-in for an [`Experiment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentRef {
    pub alias: String,
    pub project: StudyRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleDescriptor>,
}

impl ExperimentRef {
    /// A reference is its own reference.
    pub fn reference(&self) -> ExperimentRef {
        self.clone()
    }

    pub fn is_reference_to(&self, experiment: &Experiment) -> bool {
        self.alias == experiment.alias && self.project == experiment.project
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub alias: String,
    pub title: String,
    pub project: StudyRef,
    pub platform: IlluminaPlatform,
    pub library: Library,
}

impl Experiment {
    pub fn reference(&self) -> ExperimentRef {
        ExperimentRef {
            alias: self.alias.clone(),
            project: self.project.clone(),
            sample: self.library.sample.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperimentSet {
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl ExperimentSet {
    pub fn experiment_for_reference(&self, reference: &ExperimentRef) -> Option<&Experiment> {
        self.experiments
            .iter()
            .find(|experiment| reference.is_reference_to(experiment))
    }

    /// Distinct projects, sorted.
    pub fn projects(&self) -> BTreeSet<&StudyRef> {
        self.experiments
            .iter()
            .map(|experiment| &experiment.project)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
