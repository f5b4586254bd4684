//! Integration tests for the extract and export pipelines.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use seqmeta_cli::pipeline::{
    export_submission, extract_lims, load_json, neutral_output_name, output_dir_or_current,
};
use seqmeta_core::default_registry;
use seqmeta_model::neutral;
use seqmeta_report::{ExportFormat, ExportOptions};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "seqmeta-cli-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn lims_sample(name: &str, project: &str) -> Value {
    json!({
        "name": name,
        "sample_id": name,
        "project": project,
        "udf_application": "Target re-seq",
        "udf_sample_type": "gDNA",
        "udf_library_preparation_kit": "Twist Human Core Exome",
        "udf_sequencing_instrument": "NovaSeq X 25B",
        "udf_read_length": "151+10+10+151",
        "udf_insert_size_bp": 350,
        "udf_index": "ACGTACGT",
        "udf_index2": "TTAACCGG",
        "udf_id": "2-123456"
    })
}

fn lims_container() -> Value {
    json!({
        "result": {
            "name": "22FCYNLT3",
            "samples": [
                lims_sample("AB-1234-1", "AB-1234"),
                lims_sample("CD-5678-1", "CD-5678"),
            ]
        }
    })
}

fn run(sample: &str, project: &str) -> Value {
    json!({
        "run_alias": format!("{sample}_22FCYNLT3"),
        "run_date": "2024-02-01 10:15:00",
        "run_center": "SNP&SEQ Technology Platform",
        "experiment": {
            "alias": format!("{sample}_2-123456"),
            "project": {"project_id": project}
        },
        "platform": {"model_name": "NovaSeqX"},
        "fastqfiles": [
            {
                "filepath": format!("{project}/{sample}_S1_L001_R1_001.fastq.gz"),
                "filetype": "fastq",
                "checksum": "aaa",
                "checksum_method": "MD5"
            },
            {
                "filepath": format!("{project}/{sample}_S1_L001_R2_001.fastq.gz"),
                "filetype": "fastq",
                "checksum": "bbb",
                "checksum_method": "MD5"
            }
        ]
    })
}

fn flowcell() -> Value {
    json!({
        "runfolder_path": "/data/runfolders/240201_LH00202_0042_A22FCYNLT3",
        "sequencing_runs": [run("AB-1234-1", "AB-1234"), run("CD-5678-1", "CD-5678")]
    })
}

#[test]
fn test_neutral_output_name_drops_last_extension() {
    assert_eq!(
        neutral_output_name(Path::new("/tmp/22FCYNLT3.lims.json")),
        "22FCYNLT3.lims.ngi.json"
    );
    assert_eq!(neutral_output_name(Path::new("container")), "container.ngi.json");
    assert_eq!(output_dir_or_current(None), PathBuf::from("."));
}

#[test]
fn test_extract_lims_writes_neutral_experiments() {
    let dir = unique_temp_dir("extract");
    let input = dir.join("22FCYNLT3.json");
    write_json(&input, &lims_container());

    let result = extract_lims(default_registry(), &input, &dir).unwrap();

    assert_eq!(result.container, "22FCYNLT3");
    assert_eq!(result.samples, 2);
    assert_eq!(result.experiments, 2);
    assert_eq!(result.output, dir.join("22FCYNLT3.ngi.json"));

    let experiments: neutral::ExperimentSet = load_json(&result.output).unwrap();
    let aliases: Vec<&str> = experiments
        .experiments
        .iter()
        .map(|experiment| experiment.alias.as_str())
        .collect();
    assert_eq!(aliases, ["AB-1234-1_2-123456", "CD-5678-1_2-123456"]);
    assert_eq!(experiments.projects().len(), 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_extract_then_export_per_project() {
    let dir = unique_temp_dir("export");
    let input = dir.join("22FCYNLT3.json");
    write_json(&input, &lims_container());
    let extracted = extract_lims(default_registry(), &input, &dir).unwrap();
    let flowcell_path = dir.join("flowcell.ngi.json");
    write_json(&flowcell_path, &flowcell());

    let out = dir.join("submission");
    let options = ExportOptions::new(&out);
    let result =
        export_submission(default_registry(), &flowcell_path, &extracted.output, &options).unwrap();

    assert_eq!(result.runfolder, "240201_LH00202_0042_A22FCYNLT3");
    let projects: Vec<&str> = result.projects.iter().map(|p| p.project.as_str()).collect();
    assert_eq!(projects, ["AB-1234", "CD-5678"]);
    assert_eq!(result.output_count(), 12);

    for name in [
        "AB-1234-experiment.xml",
        "AB-1234-run.xml",
        "AB-1234-experiment.json",
        "CD-5678-run.json",
        "AB-1234-1_2-123456.manifest",
        "CD-5678.metadata.ena.tsv",
    ] {
        assert!(out.join(name).is_file(), "{name}");
    }

    let manifest = fs::read_to_string(out.join("AB-1234-1_2-123456.manifest")).unwrap();
    assert!(manifest.contains("INSTRUMENT\tIllumina NovaSeq X\n"));
    assert!(manifest.contains("LIBRARY_STRATEGY\tTARGETED_CAPTURE\n"));
    assert!(manifest.contains("LIBRARY_SELECTION\tHYBRID_SELECTION\n"));

    let xml = fs::read_to_string(out.join("CD-5678-run.xml")).unwrap();
    assert!(xml.contains("center_name=\"SNP&amp;SEQ Technology Platform\""));
    assert!(xml.contains("<EXPERIMENT_REF refname=\"CD-5678-1_2-123456\"/>"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_dry_run_with_selected_formats() {
    let dir = unique_temp_dir("dry");
    let input = dir.join("22FCYNLT3.json");
    write_json(&input, &lims_container());
    let extracted = extract_lims(default_registry(), &input, &dir).unwrap();
    let flowcell_path = dir.join("flowcell.ngi.json");
    write_json(&flowcell_path, &flowcell());

    let out = dir.join("planned");
    let options = ExportOptions::new(&out)
        .with_formats([ExportFormat::Manifest])
        .with_dry_run(true);
    let result =
        export_submission(default_registry(), &flowcell_path, &extracted.output, &options).unwrap();

    assert!(result.dry_run);
    assert_eq!(result.output_count(), 2);
    assert!(!out.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_input_reports_path() {
    let dir = unique_temp_dir("missing");
    let err = extract_lims(default_registry(), &dir.join("absent.json"), &dir).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
    fs::remove_dir_all(&dir).unwrap();
}
