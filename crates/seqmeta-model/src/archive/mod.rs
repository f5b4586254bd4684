//! Archive schema: the sequence read archive submission model.
//!
//! Field names serialize to the archive's exact element and attribute names.
//! Besides the canonical map every entity contributes to two flat renderings:
//!
//! - a **manifest**, an ordered list of upper-case `(KEY, VALUE)` pairs used
//!   for single-sample submission;
//! - **TSV rows** for the read submission spreadsheet, keyed by
//!   [`TsvColumn`]. Composite entities merge the rows of their parts.

mod experiment;
mod library;
mod platform;
mod run;
mod sample;
mod tsv;

pub use experiment::{Experiment, ExperimentRef, ExperimentSet};
pub use library::{Library, LibraryDescriptor, LibraryLayout};
pub use platform::Platform;
pub use run::{Attribute, ReadRole, ResultFile, Run, RunSet};
pub use sample::{SampleDescriptor, StudyRef};
pub use tsv::{TsvColumn, TsvRow};

/// One `(KEY, VALUE)` line of a submission manifest.
pub type ManifestEntry = (String, String);

/// Flat renderings shared by all archive entities.
pub trait ArchiveRecord {
    fn manifest(&self) -> Vec<ManifestEntry>;

    fn tsv_rows(&self) -> Vec<TsvRow>;
}

pub(crate) fn entry(key: &str, value: impl Into<String>) -> ManifestEntry {
    (key.to_string(), value.into())
}
