use std::path::PathBuf;

use seqmeta_report::ProjectExport;

/// Outcome of `extract lims`.
#[derive(Debug)]
pub struct ExtractResult {
    pub container: String,
    pub samples: usize,
    pub experiments: usize,
    pub output: PathBuf,
}

/// Outcome of `export`.
#[derive(Debug)]
pub struct ExportResult {
    pub runfolder: String,
    pub output_dir: PathBuf,
    pub projects: Vec<ProjectExport>,
    pub dry_run: bool,
}

impl ExportResult {
    pub fn output_count(&self) -> usize {
        self.projects.iter().map(|project| project.outputs.len()).sum()
    }
}
