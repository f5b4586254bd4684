//! The extract and export pipelines behind the CLI commands.
//!
//! Extraction reads a LIMS container export and writes the neutral
//! experiment set. Export reads a neutral flowcell and experiment set,
//! converts both to the archive model and writes the per-project files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use seqmeta_core::ConversionRegistry;
use seqmeta_model::{CanonicalMap, LimsSequencingContainer, archive, neutral};
use seqmeta_report::{ExportOptions, export_projects, write_json_file};

use crate::types::{ExportResult, ExtractResult};

/// Read an entity from its canonical JSON file.
pub fn load_json<T: CanonicalMap>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    T::from_json_str(&text).with_context(|| format!("parse {}", path.display()))
}

/// `<name>.ngi.json` for an input `<name>.<ext>`.
pub fn neutral_output_name(input: &Path) -> String {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file_name.as_str(),
    };
    format!("{stem}.ngi.json")
}

/// Convert a LIMS container export to a neutral experiment set and write it
/// to `output_dir`.
pub fn extract_lims(
    registry: &ConversionRegistry,
    input: &Path,
    output_dir: &Path,
) -> Result<ExtractResult> {
    let container: LimsSequencingContainer = load_json(input)?;
    let span = info_span!("extract", container = %container.name);
    let _guard = span.enter();

    let experiments: neutral::ExperimentSet = registry
        .to_neutral(&container)
        .with_context(|| format!("convert {}", input.display()))?;
    let output = output_dir.join(neutral_output_name(input));
    write_json_file(&output, &experiments)?;
    info!(
        samples = container.samples.len(),
        experiments = experiments.len(),
        output = %output.display(),
        "neutral experiments written"
    );

    Ok(ExtractResult {
        container: container.name,
        samples: container.samples.len(),
        experiments: experiments.len(),
        output,
    })
}

/// Convert a neutral flowcell and experiment set to the archive model and
/// export them per project.
pub fn export_submission(
    registry: &ConversionRegistry,
    flowcell_path: &Path,
    experiments_path: &Path,
    options: &ExportOptions,
) -> Result<ExportResult> {
    let flowcell: neutral::Flowcell = load_json(flowcell_path)?;
    let neutral_experiments: neutral::ExperimentSet = load_json(experiments_path)?;
    let span = info_span!("submission", runfolder = %flowcell.runfolder_name());
    let _guard = span.enter();

    let runs: archive::RunSet = registry
        .to_archive(&flowcell)
        .with_context(|| format!("convert {}", flowcell_path.display()))?;
    let experiments: archive::ExperimentSet = registry
        .to_archive(&neutral_experiments)
        .with_context(|| format!("convert {}", experiments_path.display()))?;
    let projects = export_projects(&experiments, &runs, options)?;

    Ok(ExportResult {
        runfolder: flowcell.runfolder_name().to_string(),
        output_dir: options.output_dir.clone(),
        projects,
        dry_run: options.dry_run,
    })
}

/// Output directory argument, defaulting to the working directory.
pub fn output_dir_or_current(outdir: Option<&Path>) -> PathBuf {
    outdir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
