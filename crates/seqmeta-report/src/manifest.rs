//! Single-sample submission manifests.
//!
//! One manifest is written per run: the entries of the run's experiment
//! followed by the run's file entries, one tab-separated pair per line.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use seqmeta_model::archive::{ArchiveRecord, ExperimentSet, ManifestEntry, Run};

use crate::common::create_output;

/// Manifest entries for `run`, its experiment first.
pub fn run_manifest(experiments: &ExperimentSet, run: &Run) -> Result<Vec<ManifestEntry>> {
    let experiment = experiments.experiment_for(&run.experiment_ref).ok_or_else(|| {
        anyhow!(
            "run '{}' references unknown experiment '{}'",
            run.title,
            run.experiment_ref.refname
        )
    })?;
    let mut entries = experiment.manifest();
    entries.extend(run.manifest());
    Ok(entries)
}

/// `KEY<TAB>VALUE` lines.
pub fn render_manifest(entries: &[ManifestEntry]) -> String {
    let mut text = String::new();
    for (key, value) in entries {
        text.push_str(key);
        text.push('\t');
        text.push_str(value);
        text.push('\n');
    }
    text
}

/// Manifest file name for a run: `{experiment alias}.manifest`.
pub fn manifest_file_name(run: &Run) -> String {
    format!("{}.manifest", run.experiment_ref.refname)
}

pub fn write_manifest_file(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    let mut output = create_output(path)?;
    output
        .write_all(render_manifest(entries).as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    output.flush()?;
    Ok(())
}
