//! Lab export to neutral model conversions.

use seqmeta_core::{
    ConversionCause, ConversionError, ConversionRegistry, NeutralEntity, default_registry,
};
use seqmeta_model::lab::{
    UDF_APPLICATION, UDF_ID, UDF_INDEX, UDF_INDEX2, UDF_INSERT_SIZE_BP,
    UDF_LIBRARY_PREPARATION_KIT, UDF_READ_LENGTH, UDF_SAMPLE_TYPE, UDF_SEQUENCING_INSTRUMENT,
};
use seqmeta_model::neutral::{
    Experiment, ExperimentRef, ExperimentSet, IlluminaPlatform, Library, LibraryLayout, Pool,
    PoolMember, ReadLabel, SampleDescriptor, StudyRef,
};
use seqmeta_model::{
    Application, CanonicalMap, LibraryKit, LimsSample, LimsSequencingContainer, ModelError, Source,
};

fn lims_sample(name: &str) -> LimsSample {
    LimsSample::new(name)
        .with_sample_id(name)
        .with_project_id("AB-1234")
        .with_udf(UDF_APPLICATION, "Target re-seq")
        .with_udf(UDF_SAMPLE_TYPE, "gDNA")
        .with_udf(UDF_LIBRARY_PREPARATION_KIT, "Twist Human Core Exome")
        .with_udf(UDF_SEQUENCING_INSTRUMENT, "NovaSeq X 25B")
        .with_udf(UDF_READ_LENGTH, "151+10+10+151")
        .with_udf(UDF_INSERT_SIZE_BP, "350")
        .with_udf(UDF_INDEX, "ACGTACGT")
        .with_udf(UDF_INDEX2, "TTAACCGG")
        .with_udf(UDF_ID, "2-123456")
}

fn registry() -> &'static ConversionRegistry {
    default_registry()
}

#[test]
fn sample_descriptor_resolves_library_id_and_tag() {
    let descriptor = registry()
        .to_neutral::<SampleDescriptor>(&lims_sample("AB-1234-1"))
        .unwrap();
    assert_eq!(
        descriptor,
        SampleDescriptor::new("AB-1234-1")
            .with_sample_id("AB-1234-1")
            .with_library("AB-1234-1_2-123456", "ACGTACGT+TTAACCGG")
    );
}

#[test]
fn untyped_lab_conversion_uses_first_registered_converter() {
    let entity = registry()
        .convert_lab_to_neutral(&lims_sample("AB-1234-1"))
        .unwrap();
    assert!(matches!(entity, NeutralEntity::SampleDescriptor(_)));

    let container = LimsSequencingContainer::new("HXXXXDSX5", vec![lims_sample("AB-1234-1")]);
    let entity = registry().convert_lab_to_neutral(&container).unwrap();
    assert!(matches!(entity, NeutralEntity::Pool(pool) if pool.len() == 1));
}

#[test]
fn experiment_is_assembled_from_its_parts() {
    let experiment = registry()
        .to_neutral::<Experiment>(&lims_sample("AB-1234-1"))
        .unwrap();

    assert_eq!(experiment.alias, "AB-1234-1_2-123456");
    assert_eq!(
        experiment.title,
        "AB-1234 - AB-1234-1 - Target re-seq - gDNA - Twist Human Core Exome"
    );
    assert_eq!(experiment.project, StudyRef::new("AB-1234"));
    assert_eq!(experiment.platform.model_name(), "NovaSeqX");

    let library = &experiment.library;
    assert_eq!(library.application.node(), Application::TargetSeq);
    assert_eq!(library.sample_type.node(), Source::DnaGenomic);
    assert_eq!(library.library_kit.node(), LibraryKit::GenomicTarget);
    assert_eq!(library.library_protocol.as_deref(), Some("Twist Human Core Exome"));
    assert_eq!(library.layout, LibraryLayout::paired(Some(350)));
    assert_eq!(library.layout.is_paired, Some(true));
}

#[test]
fn experiment_reference_points_at_converted_experiment() {
    let sample = lims_sample("AB-1234-1");
    let reference = registry().to_neutral::<ExperimentRef>(&sample).unwrap();
    let experiment = registry().to_neutral::<Experiment>(&sample).unwrap();
    assert!(reference.is_reference_to(&experiment));
    assert_eq!(reference, experiment.reference());
}

#[test]
fn library_without_kit_keeps_empty_protocol() {
    let mut sample = lims_sample("AB-1234-1");
    sample.udf.remove(UDF_LIBRARY_PREPARATION_KIT);
    let library = registry().to_neutral::<Library>(&sample).unwrap();
    assert!(library.library_kit.is_unclassified());
    assert_eq!(library.library_protocol.as_deref(), Some(""));
}

#[test]
fn experiment_title_leaves_missing_labels_empty() {
    let mut sample = lims_sample("AB-1234-1");
    sample.udf.remove(UDF_LIBRARY_PREPARATION_KIT);
    sample.udf.remove(UDF_SAMPLE_TYPE);
    let experiment = registry().to_neutral::<Experiment>(&sample).unwrap();
    assert_eq!(experiment.title, "AB-1234 - AB-1234-1 - Target re-seq -  - ");
}

#[test]
fn read_labels_follow_index_tags() {
    let labels = registry()
        .to_neutral::<Vec<ReadLabel>>(&lims_sample("AB-1234-1"))
        .unwrap();
    let expected: Vec<ReadLabel> = ["ACGTACGT", "TTAACCGG"]
        .into_iter()
        .map(|label| ReadLabel {
            label: label.to_string(),
            read_group_tag: Some("AB-1234-1_2-123456".to_string()),
        })
        .collect();
    assert_eq!(labels, expected);
}

#[test]
fn pool_skips_members_that_fail() {
    let mut broken = lims_sample("AB-1234-2");
    broken.udf.remove(UDF_ID);
    let container = LimsSequencingContainer::new(
        "HXXXXDSX5",
        vec![lims_sample("AB-1234-1"), broken, lims_sample("AB-1234-3")],
    );

    let pool = registry().to_neutral::<Pool>(&container).unwrap();
    let names: Vec<&str> = pool.samples.iter().map(PoolMember::member_name).collect();
    assert_eq!(names, vec!["AB-1234-1", "AB-1234-3"]);
}

#[test]
fn experiment_set_skips_samples_that_fail() {
    let mut no_instrument = lims_sample("AB-1234-2");
    no_instrument.udf.remove(UDF_SEQUENCING_INSTRUMENT);
    let container = LimsSequencingContainer::new(
        "HXXXXDSX5",
        vec![lims_sample("AB-1234-1"), no_instrument],
    );

    let set = registry().to_neutral::<ExperimentSet>(&container).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.experiments[0].alias, "AB-1234-1_2-123456");
}

#[test]
fn missing_instrument_is_wrapped_once() {
    let mut sample = lims_sample("AB-1234-1");
    sample.udf.remove(UDF_SEQUENCING_INSTRUMENT);

    let err = registry()
        .to_neutral::<IlluminaPlatform>(&sample)
        .unwrap_err();
    assert!(matches!(
        &err,
        ConversionError::Neutral {
            from: "LimsSample",
            to: "IlluminaPlatform",
            cause: ConversionCause::Model(ModelError::MissingField {
                field: UDF_SEQUENCING_INSTRUMENT,
                ..
            }),
        }
    ));

    // The nested failure surfaces unchanged from the experiment conversion.
    let nested = registry().to_neutral::<Experiment>(&sample).unwrap_err();
    assert!(matches!(
        nested,
        ConversionError::Neutral {
            to: "IlluminaPlatform",
            ..
        }
    ));
}

#[test]
fn unknown_instrument_is_reported() {
    let sample = lims_sample("AB-1234-1").with_udf(UDF_SEQUENCING_INSTRUMENT, "PromethION");
    let err = registry()
        .to_neutral::<IlluminaPlatform>(&sample)
        .unwrap_err();
    assert!(matches!(
        err.cause(),
        ConversionCause::Model(ModelError::InstrumentModelNotRecognized { needle }) if needle == "PromethION"
    ));
}

#[test]
fn missing_project_fails_study_reference() {
    let mut sample = lims_sample("AB-1234-1");
    sample.project_id = None;
    let err = registry().to_neutral::<StudyRef>(&sample).unwrap_err();
    assert!(err.to_string().contains("project"));
}

#[test]
fn container_json_converts_end_to_end() {
    let json = r#"{
        "result": {
            "name": "HXXXXDSX5",
            "samples": [
                {
                    "name": "AB-1234-1",
                    "sample_id": "AB-1234-1",
                    "project": "AB-1234",
                    "udf_application": "WG re-seq",
                    "udf_sample_type": "gDNA",
                    "udf_library_preparation_kit": "TruSeq DNA PCR-free",
                    "udf_sequencing_instrument": "NovaSeq",
                    "udf_read_length": "151x2",
                    "udf_insert_size_bp": 450,
                    "udf_sample_library_id": "AB-1234-1_lib",
                    "udf_index": "ACGT",
                    "udf_index2": null
                }
            ]
        }
    }"#;
    let container = LimsSequencingContainer::from_json_str(json).unwrap();
    let set = registry().to_neutral::<ExperimentSet>(&container).unwrap();
    assert_eq!(set.len(), 1);

    let experiment = &set.experiments[0];
    assert_eq!(experiment.alias, "AB-1234-1_lib");
    assert_eq!(experiment.platform.model_name(), "NovaSeq");
    assert_eq!(experiment.library.library_kit.node(), LibraryKit::GenomicWholeGenome);
    assert_eq!(experiment.library.layout.target_insert_size, Some(450));
    assert_eq!(
        experiment.library.sample.as_ref().and_then(|s| s.sample_library_tag.as_deref()),
        Some("ACGT")
    );
}
