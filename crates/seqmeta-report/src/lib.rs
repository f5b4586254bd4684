//! Archive submission writers.
//!
//! - **XML**: `EXPERIMENT_SET` and `RUN_SET` documents
//! - **JSON**: the canonical maps of the same sets
//! - **Manifest**: one key/value file per run for single-sample submission
//! - **TSV**: the read submission spreadsheet of a project
//!
//! [`export_projects`] splits a submission by study and writes the
//! requested formats for every project.

mod common;
mod export;
mod json;
mod manifest;
mod tsv;
mod xml;

pub use export::{
    ExportFormat, ExportOptions, ProjectExport, ProjectSubmission, export_project,
    export_projects, partition_projects, relative_outputs,
};
pub use json::{to_json_value, write_json_file};
pub use manifest::{manifest_file_name, render_manifest, run_manifest, write_manifest_file};
pub use tsv::{file_type, render_tsv, submission_rows, write_tsv, write_tsv_file};
pub use xml::{
    experiment_set_xml, run_set_xml, write_experiment_set_file, write_experiment_set_xml,
    write_run_set_file, write_run_set_xml,
};
