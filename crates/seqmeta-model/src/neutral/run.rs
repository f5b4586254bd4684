use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::neutral::experiment::ExperimentRef;
use crate::neutral::platform::IlluminaPlatform;

pub const DEFAULT_RUN_CENTER: &str = "SNP&SEQ Technology Platform";

/// A file produced by a run, usually a fastq file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFile {
    pub filepath: String,
    pub filetype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_method: Option<String>,
}

impl ResultFile {
    pub fn fastq(filepath: impl Into<String>, md5: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            filetype: "fastq".to_string(),
            checksum: Some(md5.into()),
            checksum_method: Some("MD5".to_string()),
        }
    }

    pub fn file_name(&self) -> &str {
        Path::new(&self.filepath)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.filepath)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl Attribute {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: Some(value.into()),
            units: None,
        }
    }
}

/// Sequencing of one experiment's library on one flowcell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub run_alias: String,
    #[serde(with = "run_date_format")]
    pub run_date: NaiveDateTime,
    pub run_center: String,
    pub experiment: ExperimentRef,
    pub platform: IlluminaPlatform,
    #[serde(default)]
    pub fastqfiles: Vec<ResultFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flowcell {
    pub runfolder_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samplesheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_parameters: Option<String>,
    #[serde(default)]
    pub sequencing_runs: Vec<Run>,
}

impl Flowcell {
    pub fn runfolder_name(&self) -> &str {
        Path::new(&self.runfolder_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.runfolder_path)
    }
}

/// `YYYY-MM-DD HH:MM:SS[.ffffff]`; a `T` separator is accepted on input.
mod run_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text.replacen('T', " ", 1), FORMAT)
            .map_err(|err| serde::de::Error::custom(format!("invalid run date '{text}': {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_run_date_accepts_both_separators() {
        #[derive(Deserialize, Serialize)]
        struct Dated {
            #[serde(with = "run_date_format")]
            date: NaiveDateTime,
        }
        let expected = NaiveDate::from_ymd_opt(2023, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap();
        for text in ["2023-03-14 09:26:53", "2023-03-14T09:26:53"] {
            let parsed: Dated =
                serde_json::from_value(serde_json::json!({ "date": text })).unwrap();
            assert_eq!(parsed.date, expected);
        }
        let json = serde_json::to_value(Dated { date: expected }).unwrap();
        assert_eq!(json["date"], "2023-03-14 09:26:53");
    }

    #[test]
    fn test_file_name() {
        let file = ResultFile::fastq("/data/run/AB-1234-1_S1_L001_R1_001.fastq.gz", "abc");
        assert_eq!(file.file_name(), "AB-1234-1_S1_L001_R1_001.fastq.gz");
        assert_eq!(file.checksum_method.as_deref(), Some("MD5"));
    }
}
