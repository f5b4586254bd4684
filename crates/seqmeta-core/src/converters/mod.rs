//! Concept converters and the registry that dispatches to them.
//!
//! Each concept (sample, study, platform, ...) has one converter that knows
//! how to turn the neutral entity into its archive counterpart and, where
//! the lab export carries the concept, how to build it from lab rows.
//! Converters call back into the registry for their parts, so a composite
//! conversion is the composition of its concept conversions.

mod experiment;
mod library;
mod platform;
mod registry;
mod run;
mod sample;
mod study;

pub use experiment::{ExperimentConverter, ExperimentRefConverter, ExperimentSetConverter};
pub use library::{LibraryConverter, LibraryLayoutConverter};
pub use platform::PlatformConverter;
pub use registry::{ConversionRegistry, default_registry};
pub use run::{AttributeConverter, ResultFileConverter, RunConverter, RunSetConverter};
pub use sample::{PoolConverter, PoolMemberConverter, ReadLabelConverter, SampleDescriptorConverter};
pub use study::StudyRefConverter;

use crate::entity::{ArchiveEntity, ArchiveKind, LabKind, LabRef, NeutralEntity, NeutralKind, NeutralRef};
use crate::error::{ConversionCause, ConverterFailure, ConverterResult};

/// Conversion logic for one concept.
///
/// Both directions default to "no converter"; a converter only implements
/// the directions its descriptor declares.
pub trait ConceptConverter: Send + Sync {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        _model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        Err(unsupported())
    }

    fn to_neutral(
        &self,
        _registry: &ConversionRegistry,
        _model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        Err(unsupported())
    }
}

/// A registered converter together with the kinds it links.
pub struct ConverterDescriptor {
    concept: &'static str,
    neutral: NeutralKind,
    archive: Option<ArchiveKind>,
    lab: Option<LabKind>,
    converter: Box<dyn ConceptConverter>,
}

impl ConverterDescriptor {
    pub fn new(
        concept: &'static str,
        neutral: NeutralKind,
        converter: Box<dyn ConceptConverter>,
    ) -> Self {
        Self {
            concept,
            neutral,
            archive: None,
            lab: None,
            converter,
        }
    }

    #[must_use]
    pub fn with_archive(mut self, archive: ArchiveKind) -> Self {
        self.archive = Some(archive);
        self
    }

    #[must_use]
    pub fn with_lab(mut self, lab: LabKind) -> Self {
        self.lab = Some(lab);
        self
    }

    pub fn concept(&self) -> &'static str {
        self.concept
    }

    pub fn neutral_kind(&self) -> NeutralKind {
        self.neutral
    }

    pub fn archive_kind(&self) -> Option<ArchiveKind> {
        self.archive
    }

    pub fn lab_kind(&self) -> Option<LabKind> {
        self.lab
    }

    pub(crate) fn converter(&self) -> &dyn ConceptConverter {
        self.converter.as_ref()
    }
}

impl std::fmt::Debug for ConverterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterDescriptor")
            .field("concept", &self.concept)
            .field("neutral", &self.neutral)
            .field("archive", &self.archive)
            .field("lab", &self.lab)
            .finish_non_exhaustive()
    }
}

/// The standard converters, in lookup order.
pub fn standard_descriptors() -> Vec<ConverterDescriptor> {
    vec![
        ConverterDescriptor::new(
            "sample",
            NeutralKind::SampleDescriptor,
            Box::new(SampleDescriptorConverter),
        )
        .with_archive(ArchiveKind::SampleDescriptor)
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "pool member",
            NeutralKind::PoolMember,
            Box::new(PoolMemberConverter),
        )
        .with_archive(ArchiveKind::SampleDescriptor)
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "read label",
            NeutralKind::ReadLabel,
            Box::new(ReadLabelConverter),
        )
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new("pool", NeutralKind::Pool, Box::new(PoolConverter))
            .with_lab(LabKind::SequencingContainer),
        ConverterDescriptor::new("study", NeutralKind::StudyRef, Box::new(StudyRefConverter))
            .with_archive(ArchiveKind::StudyRef)
            .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "platform",
            NeutralKind::IlluminaPlatform,
            Box::new(PlatformConverter),
        )
        .with_archive(ArchiveKind::Platform)
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "library layout",
            NeutralKind::LibraryLayout,
            Box::new(LibraryLayoutConverter),
        )
        .with_archive(ArchiveKind::LibraryLayout)
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new("library", NeutralKind::Library, Box::new(LibraryConverter))
            .with_archive(ArchiveKind::Library)
            .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "experiment reference",
            NeutralKind::ExperimentRef,
            Box::new(ExperimentRefConverter),
        )
        .with_archive(ArchiveKind::ExperimentRef)
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "experiment",
            NeutralKind::Experiment,
            Box::new(ExperimentConverter),
        )
        .with_archive(ArchiveKind::Experiment)
        .with_lab(LabKind::Sample),
        ConverterDescriptor::new(
            "experiment set",
            NeutralKind::ExperimentSet,
            Box::new(ExperimentSetConverter),
        )
        .with_archive(ArchiveKind::ExperimentSet)
        .with_lab(LabKind::SequencingContainer),
        ConverterDescriptor::new(
            "result file",
            NeutralKind::ResultFile,
            Box::new(ResultFileConverter),
        )
        .with_archive(ArchiveKind::ResultFile),
        ConverterDescriptor::new(
            "attribute",
            NeutralKind::Attribute,
            Box::new(AttributeConverter),
        )
        .with_archive(ArchiveKind::Attribute),
        ConverterDescriptor::new("run", NeutralKind::Run, Box::new(RunConverter))
            .with_archive(ArchiveKind::Run),
        ConverterDescriptor::new("run set", NeutralKind::Flowcell, Box::new(RunSetConverter))
            .with_archive(ArchiveKind::RunSet),
    ]
}

/// Failure for an input variant a converter does not handle.
pub(crate) fn unsupported() -> ConverterFailure {
    ConverterFailure::Cause(ConversionCause::NoConverter)
}
