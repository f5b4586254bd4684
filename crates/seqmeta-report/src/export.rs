//! Per-project submission export.
//!
//! The experiment set is split by study. Each project keeps the runs whose
//! experiment belongs to it and is written in every requested format:
//!
//! | Format | Files |
//! |--------|-------|
//! | xml | `{project}-experiment.xml`, `{project}-run.xml` |
//! | json | `{project}-experiment.json`, `{project}-run.json` |
//! | manifest | `{experiment alias}.manifest` per run |
//! | tsv | `{project}.metadata.ena.tsv` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, info, info_span, warn};

use seqmeta_model::archive::{ExperimentSet, RunSet, StudyRef};

use crate::json::write_json_file;
use crate::manifest::{manifest_file_name, run_manifest, write_manifest_file};
use crate::tsv::{submission_rows, write_tsv_file};
use crate::xml::{write_experiment_set_file, write_run_set_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportFormat {
    Xml,
    Json,
    Manifest,
    Tsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Xml,
        ExportFormat::Json,
        ExportFormat::Manifest,
        ExportFormat::Tsv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
            ExportFormat::Manifest => "manifest",
            ExportFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xml" => Ok(ExportFormat::Xml),
            "json" => Ok(ExportFormat::Json),
            "manifest" => Ok(ExportFormat::Manifest),
            "tsv" => Ok(ExportFormat::Tsv),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    /// Replaces the run center (and center name) of every run.
    pub run_center: Option<String>,
    /// Plan the outputs without writing them.
    pub dry_run: bool,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            formats: ExportFormat::ALL.to_vec(),
            run_center: None,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        let mut formats: Vec<ExportFormat> = formats.into_iter().collect();
        formats.sort();
        formats.dedup();
        self.formats = formats;
        self
    }

    #[must_use]
    pub fn with_run_center(mut self, run_center: impl Into<String>) -> Self {
        self.run_center = Some(run_center.into());
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn includes(&self, format: ExportFormat) -> bool {
        self.formats.contains(&format)
    }
}

/// The experiments and runs of one study.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSubmission {
    pub study: StudyRef,
    pub experiments: ExperimentSet,
    pub runs: RunSet,
}

impl ProjectSubmission {
    pub fn project_id(&self) -> &str {
        &self.study.refname
    }
}

/// What was (or, on a dry run, would be) written for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectExport {
    pub project: String,
    pub experiments: usize,
    pub runs: usize,
    pub outputs: Vec<PathBuf>,
}

/// Split the submission by study, in study order.
pub fn partition_projects(experiments: &ExperimentSet, runs: &RunSet) -> Vec<ProjectSubmission> {
    experiments
        .studies()
        .into_iter()
        .map(|study| {
            let project_experiments = experiments.restrict_to_study(&study);
            let project_runs = runs.restrict_to_experiments(&project_experiments);
            ProjectSubmission {
                study,
                experiments: project_experiments,
                runs: project_runs,
            }
        })
        .collect()
}

/// Export every project of the submission.
pub fn export_projects(
    experiments: &ExperimentSet,
    runs: &RunSet,
    options: &ExportOptions,
) -> Result<Vec<ProjectExport>> {
    let runs = match options.run_center.as_deref() {
        Some(center) => with_run_center(runs, center),
        None => runs.clone(),
    };
    let unmatched = runs
        .runs
        .iter()
        .filter(|run| !experiments.contains(&run.experiment_ref))
        .count();
    if unmatched > 0 {
        warn!(unmatched, "runs without a matching experiment are not exported");
    }

    partition_projects(experiments, &runs)
        .iter()
        .map(|project| export_project(project, options))
        .collect()
}

pub fn export_project(project: &ProjectSubmission, options: &ExportOptions) -> Result<ProjectExport> {
    let span = info_span!("export", project = %project.project_id());
    let _guard = span.enter();

    let dir = options.output_dir.as_path();
    let id = project.project_id();
    let mut outputs = Vec::new();

    if options.includes(ExportFormat::Xml) {
        let experiment_path = dir.join(format!("{id}-experiment.xml"));
        let run_path = dir.join(format!("{id}-run.xml"));
        if !options.dry_run {
            write_experiment_set_file(&experiment_path, &project.experiments)?;
            write_run_set_file(&run_path, &project.runs)?;
        }
        outputs.extend([experiment_path, run_path]);
    }

    if options.includes(ExportFormat::Json) {
        let experiment_path = dir.join(format!("{id}-experiment.json"));
        let run_path = dir.join(format!("{id}-run.json"));
        if !options.dry_run {
            write_json_file(&experiment_path, &project.experiments)?;
            write_json_file(&run_path, &project.runs)?;
        }
        outputs.extend([experiment_path, run_path]);
    }

    if options.includes(ExportFormat::Manifest) {
        for run in &project.runs.runs {
            let entries = run_manifest(&project.experiments, run)?;
            let path = dir.join(manifest_file_name(run));
            if !options.dry_run {
                write_manifest_file(&path, &entries)?;
            }
            outputs.push(path);
        }
    }

    if options.includes(ExportFormat::Tsv) {
        let rows = submission_rows(&project.experiments, &project.runs)?;
        if rows.is_empty() {
            warn!("no runs to put in the submission sheet");
        } else {
            let path = dir.join(format!("{id}.metadata.ena.tsv"));
            if !options.dry_run {
                write_tsv_file(&path, &rows)?;
            }
            outputs.push(path);
        }
    }

    for output in &outputs {
        debug!(path = %output.display(), dry_run = options.dry_run, "output");
    }
    info!(
        experiments = project.experiments.len(),
        runs = project.runs.len(),
        outputs = outputs.len(),
        dry_run = options.dry_run,
        "project exported"
    );

    Ok(ProjectExport {
        project: id.to_string(),
        experiments: project.experiments.len(),
        runs: project.runs.len(),
        outputs,
    })
}

fn with_run_center(runs: &RunSet, center: &str) -> RunSet {
    let mut runs = runs.clone();
    for run in &mut runs.runs {
        run.run_center = center.to_string();
    }
    runs
}

/// Output paths relative to `base`, for display.
pub fn relative_outputs<'a>(base: &'a Path, export: &'a ProjectExport) -> impl Iterator<Item = &'a Path> {
    export
        .outputs
        .iter()
        .map(move |path| path.strip_prefix(base).unwrap_or(path.as_path()))
}
