//! Read submission spreadsheet.
//!
//! Layout: a `FileType` line, the column header, then one row per
//! experiment row and run row pair. Every field is quoted.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, WriterBuilder};

use seqmeta_model::archive::{ArchiveRecord, ExperimentSet, RunSet, TsvColumn, TsvRow};

use crate::common::create_output;

const FILE_TYPE_LABEL: &str = "FileType";
const FILE_TYPE_DESCRIPTION: &str = "Read submission file type";

/// Rows of a project: each run merged with the rows of its experiment.
pub fn submission_rows(experiments: &ExperimentSet, runs: &RunSet) -> Result<Vec<TsvRow>> {
    let mut rows = Vec::new();
    for run in &runs.runs {
        let experiment = experiments.experiment_for(&run.experiment_ref).ok_or_else(|| {
            anyhow!(
                "run '{}' references unknown experiment '{}'",
                run.title,
                run.experiment_ref.refname
            )
        })?;
        let run_rows = run.tsv_rows();
        for experiment_row in experiment.tsv_rows() {
            for run_row in &run_rows {
                rows.push(experiment_row.clone().merged(run_row));
            }
        }
    }
    Ok(rows)
}

/// File type of the sheet, taken from the first row.
pub fn file_type(rows: &[TsvRow]) -> &str {
    rows.first()
        .and_then(TsvRow::file_type)
        .unwrap_or_default()
}

pub fn write_tsv<W: Write>(writer: W, rows: &[TsvRow]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .from_writer(writer);
    csv_writer.write_record([FILE_TYPE_LABEL, file_type(rows), FILE_TYPE_DESCRIPTION])?;
    csv_writer.write_record(TsvColumn::ALL.iter().map(TsvColumn::as_str))?;
    for row in rows {
        csv_writer.write_record(row.to_record())?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn render_tsv(rows: &[TsvRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_tsv(&mut buffer, rows)?;
    String::from_utf8(buffer).context("submission sheet is not UTF-8")
}

pub fn write_tsv_file(path: &Path, rows: &[TsvRow]) -> Result<()> {
    let output = create_output(path)?;
    write_tsv(output, rows).with_context(|| format!("write {}", path.display()))
}
