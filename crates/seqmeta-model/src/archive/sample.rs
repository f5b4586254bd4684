use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveRecord, ManifestEntry, TsvColumn, TsvRow, entry};

/// `<STUDY_REF refname=".."/>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudyRef {
    pub refname: String,
}

impl StudyRef {
    pub fn new(refname: impl Into<String>) -> Self {
        Self {
            refname: refname.into(),
        }
    }
}

impl ArchiveRecord for StudyRef {
    fn manifest(&self) -> Vec<ManifestEntry> {
        vec![entry("STUDY", &self.refname)]
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        vec![TsvRow::new().with(TsvColumn::Study, &self.refname)]
    }
}

/// `<SAMPLE_DESCRIPTOR refname=".."/>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleDescriptor {
    pub refname: String,
}

impl SampleDescriptor {
    pub fn new(refname: impl Into<String>) -> Self {
        Self {
            refname: refname.into(),
        }
    }
}

impl ArchiveRecord for SampleDescriptor {
    fn manifest(&self) -> Vec<ManifestEntry> {
        vec![entry("SAMPLE", &self.refname)]
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        vec![TsvRow::new().with(TsvColumn::Sample, &self.refname)]
    }
}
