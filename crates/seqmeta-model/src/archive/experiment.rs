use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::archive::tsv::cross;
use crate::archive::{ArchiveRecord, Library, ManifestEntry, Platform, StudyRef, TsvColumn, TsvRow, entry};

/// `<EXPERIMENT_REF refname=".."/>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperimentRef {
    pub refname: String,
}

impl ExperimentRef {
    pub fn new(refname: impl Into<String>) -> Self {
        Self {
            refname: refname.into(),
        }
    }

    /// A reference is its own reference.
    pub fn reference(&self) -> ExperimentRef {
        self.clone()
    }
}

impl ArchiveRecord for ExperimentRef {
    fn manifest(&self) -> Vec<ManifestEntry> {
        vec![entry("NAME", &self.refname)]
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        vec![TsvRow::new().with(TsvColumn::LibraryName, &self.refname)]
    }
}

/// `<EXPERIMENT alias="..">`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub alias: String,
    #[serde(rename = "TITLE")]
    pub title: String,
    #[serde(rename = "STUDY_REF")]
    pub study_ref: StudyRef,
    #[serde(rename = "DESIGN")]
    pub design: Library,
    #[serde(rename = "PLATFORM")]
    pub platform: Platform,
}

impl Experiment {
    pub fn reference(&self) -> ExperimentRef {
        ExperimentRef::new(&self.alias)
    }

    pub fn is_referenced_by(&self, reference: &ExperimentRef) -> bool {
        self.alias == reference.refname
    }
}

impl ArchiveRecord for Experiment {
    fn manifest(&self) -> Vec<ManifestEntry> {
        let mut manifest = vec![entry("NAME", &self.alias)];
        manifest.extend(self.study_ref.manifest());
        manifest.extend(self.platform.manifest());
        manifest.extend(self.design.manifest());
        manifest
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        let rows = self.reference().tsv_rows();
        let rows = cross(&rows, &self.study_ref.tsv_rows());
        let rows = cross(&rows, &self.platform.tsv_rows());
        cross(&rows, &self.design.tsv_rows())
    }
}

/// `<EXPERIMENT_SET>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperimentSet {
    #[serde(rename = "EXPERIMENT", default)]
    pub experiments: Vec<Experiment>,
}

impl ExperimentSet {
    pub fn new(experiments: Vec<Experiment>) -> Self {
        Self { experiments }
    }

    /// Distinct studies referenced by the experiments, sorted.
    pub fn studies(&self) -> Vec<StudyRef> {
        self.experiments
            .iter()
            .map(|experiment| experiment.study_ref.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Experiments belonging to one study.
    pub fn restrict_to_study(&self, study: &StudyRef) -> ExperimentSet {
        ExperimentSet::new(
            self.experiments
                .iter()
                .filter(|experiment| &experiment.study_ref == study)
                .cloned()
                .collect(),
        )
    }

    pub fn experiment_for(&self, reference: &ExperimentRef) -> Option<&Experiment> {
        self.experiments
            .iter()
            .find(|experiment| experiment.is_referenced_by(reference))
    }

    pub fn contains(&self, reference: &ExperimentRef) -> bool {
        self.experiment_for(reference).is_some()
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}

impl ArchiveRecord for ExperimentSet {
    fn manifest(&self) -> Vec<ManifestEntry> {
        self.experiments
            .iter()
            .flat_map(ArchiveRecord::manifest)
            .collect()
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        self.experiments
            .iter()
            .flat_map(ArchiveRecord::tsv_rows)
            .collect()
    }
}
