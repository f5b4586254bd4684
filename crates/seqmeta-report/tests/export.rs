//! Per-project export to disk.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use seqmeta_model::archive::{
    Experiment, ExperimentRef, ExperimentSet, Library, LibraryDescriptor, LibraryLayout,
    Platform, ResultFile, Run, RunSet, SampleDescriptor, StudyRef,
};
use seqmeta_model::{CanonicalMap, IlluminaModel, LibrarySelection, LibrarySource, LibraryStrategy};
use seqmeta_report::{ExportFormat, ExportOptions, export_projects, partition_projects};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "seqmeta-report-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

fn experiment(project: &str, sample: &str) -> Experiment {
    Experiment {
        alias: format!("{sample}_lib"),
        title: format!("{project} - {sample}"),
        study_ref: StudyRef::new(project),
        design: Library {
            design_description: None,
            sample_descriptor: SampleDescriptor::new(sample),
            library_descriptor: LibraryDescriptor {
                strategy: LibraryStrategy::Wgs,
                source: LibrarySource::Genomic,
                selection: LibrarySelection::Random,
                layout: LibraryLayout::Paired {
                    nominal_length: None,
                },
                construction_protocol: None,
            },
        },
        platform: Platform::illumina(IlluminaModel::NovaSeqX),
    }
}

fn run(project: &str, sample: &str) -> Run {
    Run {
        title: sample.to_string(),
        experiment_ref: ExperimentRef::new(format!("{sample}_lib")),
        run_date: NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        run_center: "SNP-SEQ".to_string(),
        files: vec![ResultFile {
            filename: format!("{project}/{sample}_R1.fastq.gz"),
            filetype: "fastq".to_string(),
            checksum_method: Some("MD5".to_string()),
            checksum: Some("abc".to_string()),
        }],
        run_attributes: Vec::new(),
    }
}

fn submission() -> (ExperimentSet, RunSet) {
    let experiments = ExperimentSet::new(vec![
        experiment("CD-5678", "CD-5678-1"),
        experiment("AB-1234", "AB-1234-1"),
        experiment("AB-1234", "AB-1234-2"),
    ]);
    let runs = RunSet::new(vec![
        run("AB-1234", "AB-1234-1"),
        run("CD-5678", "CD-5678-1"),
        run("AB-1234", "AB-1234-2"),
        run("EF-9012", "EF-9012-1"),
    ]);
    (experiments, runs)
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn partition_groups_runs_by_study() {
    let (experiments, runs) = submission();
    let projects = partition_projects(&experiments, &runs);

    let ids: Vec<&str> = projects.iter().map(|p| p.project_id()).collect();
    assert_eq!(ids, ["AB-1234", "CD-5678"]);
    assert_eq!(projects[0].experiments.len(), 2);
    assert_eq!(projects[0].runs.len(), 2);
    assert_eq!(projects[1].runs.runs[0].title, "CD-5678-1");
}

#[test]
fn export_writes_every_format_per_project() {
    let dir = unique_temp_dir("all");
    let (experiments, runs) = submission();
    let exports = export_projects(&experiments, &runs, &ExportOptions::new(&dir)).unwrap();

    assert_eq!(exports.len(), 2);
    assert_eq!(
        file_names(&exports[0].outputs),
        [
            "AB-1234-experiment.xml",
            "AB-1234-run.xml",
            "AB-1234-experiment.json",
            "AB-1234-run.json",
            "AB-1234-1_lib.manifest",
            "AB-1234-2_lib.manifest",
            "AB-1234.metadata.ena.tsv",
        ]
    );
    for output in exports.iter().flat_map(|export| &export.outputs) {
        assert!(output.is_file(), "{}", output.display());
    }

    let json = fs::read_to_string(dir.join("AB-1234-experiment.json")).unwrap();
    let parsed = ExperimentSet::from_json_str(&json).unwrap();
    assert_eq!(parsed, experiments.restrict_to_study(&StudyRef::new("AB-1234")));

    let tsv = fs::read_to_string(dir.join("CD-5678.metadata.ena.tsv")).unwrap();
    assert_eq!(tsv.lines().count(), 3);

    let manifest = fs::read_to_string(dir.join("CD-5678-1_lib.manifest")).unwrap();
    assert!(manifest.starts_with("NAME\tCD-5678-1_lib\nSTUDY\tCD-5678\n"));
    assert!(manifest.ends_with("FASTQ\tCD-5678/CD-5678-1_R1.fastq.gz\n"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn dry_run_plans_without_writing() {
    let dir = unique_temp_dir("dry");
    let (experiments, runs) = submission();
    let options = ExportOptions::new(&dir)
        .with_formats([ExportFormat::Tsv, ExportFormat::Xml])
        .with_dry_run(true);
    let exports = export_projects(&experiments, &runs, &options).unwrap();

    assert_eq!(
        file_names(&exports[1].outputs),
        ["CD-5678-experiment.xml", "CD-5678-run.xml", "CD-5678.metadata.ena.tsv"]
    );
    assert!(!dir.exists());
}

#[test]
fn run_center_override_applies_to_every_run() {
    let dir = unique_temp_dir("center");
    let (experiments, runs) = submission();
    let options = ExportOptions::new(&dir)
        .with_formats([ExportFormat::Json])
        .with_run_center("National Genomics Infrastructure");
    export_projects(&experiments, &runs, &options).unwrap();

    let json = fs::read_to_string(dir.join("AB-1234-run.json")).unwrap();
    let parsed = RunSet::from_json_str(&json).unwrap();
    assert_eq!(parsed.len(), 2);
    assert!(
        parsed
            .runs
            .iter()
            .all(|run| run.center_name() == "National Genomics Infrastructure")
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn project_without_runs_skips_the_sheet() {
    let dir = unique_temp_dir("empty");
    let experiments = ExperimentSet::new(vec![experiment("GH-3456", "GH-3456-1")]);
    let options = ExportOptions::new(&dir).with_formats([ExportFormat::Tsv, ExportFormat::Manifest]);
    let exports = export_projects(&experiments, &RunSet::default(), &options).unwrap();

    assert_eq!(exports[0].runs, 0);
    assert!(exports[0].outputs.is_empty());
}

#[test]
fn export_format_parses_case_insensitively() {
    assert_eq!("XML".parse::<ExportFormat>(), Ok(ExportFormat::Xml));
    assert_eq!(" tsv ".parse::<ExportFormat>(), Ok(ExportFormat::Tsv));
    assert_eq!(
        "csv".parse::<ExportFormat>(),
        Err("Unknown export format: csv".to_string())
    );
    assert_eq!(ExportFormat::Manifest.to_string(), "manifest");
}
