use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::archive::{
    ArchiveRecord, ExperimentRef, ExperimentSet, ManifestEntry, TsvColumn, TsvRow, entry,
};

/// Forward or reverse read of a paired run, judged from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadRole {
    Forward,
    Reverse,
}

impl ReadRole {
    /// Looks for an `R1`/`R2` token (delimited by `_` or `.`), last one
    /// wins. Files without a marker fill the forward slot.
    pub fn from_file_name(file_name: &str) -> Self {
        file_name
            .rsplit(['_', '.'])
            .find_map(|token| match token {
                "R1" => Some(ReadRole::Forward),
                "R2" => Some(ReadRole::Reverse),
                _ => None,
            })
            .unwrap_or(ReadRole::Forward)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadRole::Forward => "forward",
            ReadRole::Reverse => "reverse",
        }
    }

    fn columns(self) -> (TsvColumn, TsvColumn) {
        match self {
            ReadRole::Forward => (TsvColumn::ForwardFileName, TsvColumn::ForwardFileMd5),
            ReadRole::Reverse => (TsvColumn::ReverseFileName, TsvColumn::ReverseFileMd5),
        }
    }
}

/// `<FILE filename filetype checksum_method checksum/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFile {
    pub filename: String,
    pub filetype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl ResultFile {
    pub fn read_role(&self) -> ReadRole {
        let name = self.filename.rsplit('/').next().unwrap_or(&self.filename);
        ReadRole::from_file_name(name)
    }
}

impl ArchiveRecord for ResultFile {
    fn manifest(&self) -> Vec<ManifestEntry> {
        vec![entry(&self.filetype.to_uppercase(), &self.filename)]
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        let (name_column, md5_column) = self.read_role().columns();
        let mut row = TsvRow::new()
            .with(name_column, &self.filename)
            .with(md5_column, self.checksum.clone().unwrap_or_default());
        row.set_file_type(&self.filetype);
        vec![row]
    }
}

/// `<RUN_ATTRIBUTE><TAG/><VALUE/><UNITS/></RUN_ATTRIBUTE>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "TAG")]
    pub tag: String,
    #[serde(rename = "VALUE", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "UNITS", default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl ArchiveRecord for Attribute {
    fn manifest(&self) -> Vec<ManifestEntry> {
        let value = [self.value.as_deref(), self.units.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        vec![entry(&self.tag.to_uppercase(), value)]
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        Vec::new()
    }
}

const RUN_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `<RUN center_name run_date run_center>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RunRepr", into = "RunRepr")]
pub struct Run {
    pub title: String,
    pub experiment_ref: ExperimentRef,
    pub run_date: NaiveDateTime,
    pub run_center: String,
    pub files: Vec<ResultFile>,
    pub run_attributes: Vec<Attribute>,
}

impl Run {
    /// Archive `center_name`, the same as the run center.
    pub fn center_name(&self) -> &str {
        &self.run_center
    }

    pub fn formatted_run_date(&self) -> String {
        self.run_date.format(RUN_DATE_FORMAT).to_string()
    }
}

impl ArchiveRecord for Run {
    fn manifest(&self) -> Vec<ManifestEntry> {
        self.files.iter().flat_map(ArchiveRecord::manifest).collect()
    }

    /// All files of the run share a single row.
    fn tsv_rows(&self) -> Vec<TsvRow> {
        let row = self
            .files
            .iter()
            .flat_map(ArchiveRecord::tsv_rows)
            .fold(TsvRow::new(), |merged, file_row| merged.merged(&file_row));
        vec![row]
    }
}

/// `<RUN_SET>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSet {
    #[serde(rename = "RUN", default)]
    pub runs: Vec<Run>,
}

impl RunSet {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Runs whose experiment is part of `experiments`.
    pub fn restrict_to_experiments(&self, experiments: &ExperimentSet) -> RunSet {
        RunSet::new(
            self.runs
                .iter()
                .filter(|run| experiments.contains(&run.experiment_ref))
                .cloned()
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl ArchiveRecord for RunSet {
    fn manifest(&self) -> Vec<ManifestEntry> {
        self.runs.iter().flat_map(ArchiveRecord::manifest).collect()
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        self.runs.iter().flat_map(ArchiveRecord::tsv_rows).collect()
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RunRepr {
    #[serde(rename = "TITLE")]
    title: String,
    #[serde(rename = "EXPERIMENT_REF")]
    experiment_ref: ExperimentRef,
    #[serde(rename = "RUN_ATTRIBUTES", default, skip_serializing_if = "Option::is_none")]
    run_attributes: Option<RunAttributes>,
    #[serde(rename = "DATA_BLOCK")]
    data_block: DataBlock,
    run_date: String,
    run_center: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center_name: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
struct RunAttributes {
    #[serde(rename = "RUN_ATTRIBUTE", default)]
    run_attribute: Vec<Attribute>,
}

#[derive(Clone, Serialize, Deserialize)]
struct DataBlock {
    #[serde(rename = "FILES")]
    files: Files,
}

#[derive(Clone, Serialize, Deserialize)]
struct Files {
    #[serde(rename = "FILE", default)]
    file: Vec<ResultFile>,
}

impl TryFrom<RunRepr> for Run {
    type Error = String;

    fn try_from(repr: RunRepr) -> Result<Self, Self::Error> {
        let run_date = NaiveDateTime::parse_from_str(&repr.run_date, RUN_DATE_FORMAT)
            .map_err(|err| format!("invalid run_date '{}': {err}", repr.run_date))?;
        Ok(Run {
            title: repr.title,
            experiment_ref: repr.experiment_ref,
            run_date,
            run_center: repr.run_center,
            files: repr.data_block.files.file,
            run_attributes: repr
                .run_attributes
                .map(|attributes| attributes.run_attribute)
                .unwrap_or_default(),
        })
    }
}

impl From<Run> for RunRepr {
    fn from(run: Run) -> Self {
        let run_date = run.formatted_run_date();
        RunRepr {
            title: run.title,
            experiment_ref: run.experiment_ref,
            run_attributes: (!run.run_attributes.is_empty()).then(|| RunAttributes {
                run_attribute: run.run_attributes,
            }),
            data_block: DataBlock {
                files: Files { file: run.files },
            },
            run_date,
            center_name: Some(run.run_center.clone()),
            run_center: run.run_center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fastq(name: &str, md5: &str) -> ResultFile {
        ResultFile {
            filename: name.to_string(),
            filetype: "fastq".to_string(),
            checksum_method: Some("MD5".to_string()),
            checksum: Some(md5.to_string()),
        }
    }

    #[test]
    fn test_read_role_from_file_name() {
        assert_eq!(
            ReadRole::from_file_name("S1_S1_L001_R1_001.fastq.gz"),
            ReadRole::Forward
        );
        assert_eq!(
            ReadRole::from_file_name("S1_S1_L001_R2_001.fastq.gz"),
            ReadRole::Reverse
        );
        assert_eq!(ReadRole::from_file_name("R2-sample.fastq.gz"), ReadRole::Forward);
        assert_eq!(ReadRole::from_file_name("undetermined.fastq"), ReadRole::Forward);
    }

    #[test]
    fn test_paired_files_share_one_row() {
        let run = Run {
            title: "run".to_string(),
            experiment_ref: ExperimentRef::new("lib-1"),
            run_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            run_center: "center".to_string(),
            files: vec![
                fastq("project/S1_L001_R1_001.fastq.gz", "aaa"),
                fastq("project/S1_L001_R2_001.fastq.gz", "bbb"),
            ],
            run_attributes: Vec::new(),
        };
        let rows = run.tsv_rows();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get(TsvColumn::ForwardFileName), Some("project/S1_L001_R1_001.fastq.gz"));
        assert_eq!(row.get(TsvColumn::ForwardFileMd5), Some("aaa"));
        assert_eq!(row.get(TsvColumn::ReverseFileMd5), Some("bbb"));
        assert_eq!(row.file_type(), Some("fastq"));

        let manifest = run.manifest();
        assert_eq!(manifest[0], ("FASTQ".to_string(), "project/S1_L001_R1_001.fastq.gz".to_string()));
    }

    #[test]
    fn test_attribute_manifest_joins_units() {
        let attribute = Attribute {
            tag: "read_length".to_string(),
            value: Some("151".to_string()),
            units: Some("bp".to_string()),
        };
        assert_eq!(
            attribute.manifest(),
            vec![("READ_LENGTH".to_string(), "151 bp".to_string())]
        );
    }
}
