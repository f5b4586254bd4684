//! Neutral model to archive conversions.

use chrono::NaiveDate;

use seqmeta_core::{
    ArchiveEntity, ConversionCause, ConversionError, ConversionRegistry, default_registry,
};
use seqmeta_map::MappingError;
use seqmeta_model::archive::{self, ArchiveRecord};
use seqmeta_model::neutral::{
    Attribute, Experiment, ExperimentSet, Flowcell, IlluminaPlatform, Library, LibraryLayout,
    Pool, ResultFile, Run, SampleDescriptor, SequencingPlatform, StudyRef,
};
use seqmeta_model::{
    Application, IlluminaModel, LibraryKit, LibrarySelection, LibrarySource, LibraryStrategy,
    Source, TaxonomyNode,
};

fn registry() -> &'static ConversionRegistry {
    default_registry()
}

fn sample() -> SampleDescriptor {
    SampleDescriptor::new("AB-1234-1")
        .with_sample_id("AB-1234-1")
        .with_library("AB-1234-1_lib", "ACGTACGT+TTAACCGG")
}

fn library(application: &str, sample_type: &str, kit: &str) -> Library {
    Library {
        sample: Some(sample()),
        pool: None,
        description: None,
        application: Application::standard().classify(Some(application)),
        sample_type: Source::standard().classify(Some(sample_type)),
        library_kit: LibraryKit::standard().classify(Some(kit)),
        layout: LibraryLayout::paired(Some(350)),
        library_protocol: Some(kit.to_string()),
    }
}

fn experiment() -> Experiment {
    Experiment {
        alias: "AB-1234-1_lib".to_string(),
        title: "AB-1234 - AB-1234-1 - Target re-seq - gDNA - Twist Human Core Exome".to_string(),
        project: StudyRef::new("AB-1234"),
        platform: IlluminaPlatform::new("NovaSeq X 25B").unwrap(),
        library: library("Target re-seq", "gDNA", "Twist Human Core Exome"),
    }
}

fn run() -> Run {
    Run {
        run_alias: "230314_LH00217_0031_A225HMVLT3".to_string(),
        run_date: NaiveDate::from_ymd_opt(2023, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap(),
        run_center: "SNP&SEQ Technology Platform".to_string(),
        experiment: experiment().reference(),
        platform: IlluminaPlatform::new("NovaSeqX").unwrap(),
        fastqfiles: vec![
            ResultFile::fastq("AB-1234/AB-1234-1_S1_L001_R1_001.fastq.gz", "a1"),
            ResultFile::fastq("AB-1234/AB-1234-1_S1_L001_R2_001.fastq.gz", "b2"),
        ],
        run_attributes: vec![Attribute::new("flowcell_lane", "1")],
    }
}

#[test]
fn experiment_converts_part_by_part() {
    let converted = registry().to_archive::<archive::Experiment>(&experiment()).unwrap();

    assert_eq!(converted.alias, "AB-1234-1_lib");
    assert_eq!(converted.study_ref, archive::StudyRef::new("AB-1234"));
    assert_eq!(
        converted.platform,
        archive::Platform::illumina(IlluminaModel::NovaSeqX)
    );

    let design = &converted.design;
    assert_eq!(design.sample_descriptor, archive::SampleDescriptor::new("AB-1234-1"));
    let descriptor = &design.library_descriptor;
    assert_eq!(descriptor.strategy, LibraryStrategy::TargetedCapture);
    assert_eq!(descriptor.source, LibrarySource::Genomic);
    assert_eq!(descriptor.selection, LibrarySelection::HybridSelection);
    assert_eq!(
        descriptor.layout,
        archive::LibraryLayout::Paired {
            nominal_length: Some(350)
        }
    );
    assert_eq!(
        descriptor.construction_protocol.as_deref(),
        Some("Twist Human Core Exome")
    );
}

#[test]
fn single_and_unknown_layouts_become_single() {
    for layout in [LibraryLayout::single(), LibraryLayout::default()] {
        let converted = registry().to_archive::<archive::LibraryLayout>(&layout).unwrap();
        assert_eq!(converted, archive::LibraryLayout::Single {});
    }
}

#[test]
fn experiment_reference_projects_to_alias() {
    let reference = experiment().reference();
    let converted = registry().to_archive::<archive::ExperimentRef>(&reference).unwrap();
    assert_eq!(converted, archive::ExperimentRef::new("AB-1234-1_lib"));
    assert_eq!(converted.reference(), converted);
}

#[test]
fn run_keeps_files_and_attributes() {
    let converted = registry().to_archive::<archive::Run>(&run()).unwrap();
    assert_eq!(converted.title, "230314_LH00217_0031_A225HMVLT3");
    assert_eq!(converted.experiment_ref, archive::ExperimentRef::new("AB-1234-1_lib"));
    assert_eq!(converted.center_name(), "SNP&SEQ Technology Platform");
    assert_eq!(converted.formatted_run_date(), "2023-03-14T09:26:53");
    assert_eq!(converted.files.len(), 2);
    assert_eq!(converted.files[1].checksum.as_deref(), Some("b2"));
    assert_eq!(converted.files[1].checksum_method.as_deref(), Some("MD5"));
    assert_eq!(
        converted.run_attributes,
        vec![archive::Attribute {
            tag: "flowcell_lane".to_string(),
            value: Some("1".to_string()),
            units: None,
        }]
    );

    let manifest = converted.manifest();
    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest[0].0, "FASTQ");
}

#[test]
fn flowcell_becomes_run_set() {
    let flowcell = Flowcell {
        runfolder_path: "/proj/runs/230314_LH00217_0031_A225HMVLT3".to_string(),
        samplesheet: None,
        run_parameters: None,
        sequencing_runs: vec![run(), run()],
    };
    let entity = registry().convert_neutral_to_archive(&flowcell).unwrap();
    let ArchiveEntity::RunSet(runs) = entity else {
        panic!("expected a run set, got {entity:?}");
    };
    assert_eq!(runs.len(), 2);
}

#[test]
fn experiment_set_converts_every_experiment() {
    let set = ExperimentSet {
        experiments: vec![experiment(), experiment()],
    };
    let converted = registry().to_archive::<archive::ExperimentSet>(&set).unwrap();
    assert_eq!(converted.len(), 2);
    assert_eq!(converted.studies(), vec![archive::StudyRef::new("AB-1234")]);
}

#[test]
fn mapping_miss_surfaces_from_library() {
    let mut experiment = experiment();
    experiment.library = library("RNA-seq", "gDNA", "");

    let err = registry()
        .to_archive::<archive::Experiment>(&experiment)
        .unwrap_err();
    match err {
        ConversionError::Archive {
            from: "Library",
            to: "Library",
            cause: ConversionCause::Mapping(MappingError::NoMatchingRule { sample_type, .. }),
        } => assert_eq!(sample_type, "DNA.GENOMIC"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn library_without_sample_is_rejected() {
    let mut library = library("WG re-seq", "gDNA", "TruSeq DNA PCR-free");
    library.sample = None;
    let err = registry().to_archive::<archive::Library>(&library).unwrap_err();
    assert!(err.to_string().contains("sample"));
}

#[test]
fn pool_member_converts_as_sample() {
    let member = seqmeta_model::neutral::PoolMember::new(sample());
    let converted = registry()
        .to_archive::<archive::SampleDescriptor>(&member)
        .unwrap();
    assert_eq!(converted, archive::SampleDescriptor::new("AB-1234-1"));
}

#[test]
fn concepts_without_archive_counterpart_fail() {
    let err = registry()
        .convert_neutral_to_archive(&Pool::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Archive {
            from: "Pool",
            to: "ArchiveEntity",
            cause: ConversionCause::NoConverter,
        }
    ));

    let platform = SequencingPlatform {
        model_name: Some("NovaSeq".to_string()),
    };
    let err = registry()
        .to_archive::<archive::Platform>(&platform)
        .unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Archive {
            from: "SequencingPlatform",
            to: "Platform",
            cause: ConversionCause::NoConverter,
        }
    ));
}
