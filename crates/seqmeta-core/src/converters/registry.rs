//! Ordered registry of concept converters.

use std::sync::OnceLock;

use tracing::{debug, trace};

use seqmeta_map::MappingTable;
use seqmeta_model::Taxonomies;

use super::{ConverterDescriptor, standard_descriptors};
use crate::entity::{
    ArchiveEntity, ArchiveTarget, LabModel, LabRef, NeutralEntity, NeutralModel, NeutralRef,
    NeutralTarget,
};
use crate::error::{ConversionCause, ConversionError, ConverterFailure, Result};

const ANY_ARCHIVE: &str = "ArchiveEntity";
const ANY_NEUTRAL: &str = "NeutralEntity";

/// Converters between the lab, neutral and archive schemas.
///
/// Lookup for a neutral input walks its kind's ancestry, most specific kind
/// first; within one kind the earliest registered converter wins. The
/// registry is immutable once built and can be shared across threads.
pub struct ConversionRegistry {
    descriptors: Vec<ConverterDescriptor>,
    taxonomies: Taxonomies,
    mapping_table: MappingTable,
}

impl ConversionRegistry {
    /// An empty registry using the given configuration.
    pub fn new(taxonomies: Taxonomies, mapping_table: MappingTable) -> Self {
        Self {
            descriptors: Vec::new(),
            taxonomies,
            mapping_table,
        }
    }

    /// A registry holding every standard converter.
    pub fn standard(taxonomies: Taxonomies, mapping_table: MappingTable) -> Self {
        let mut registry = Self::new(taxonomies, mapping_table);
        for descriptor in standard_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    /// Appends a converter; earlier registrations take precedence.
    pub fn register(&mut self, descriptor: ConverterDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn descriptors(&self) -> &[ConverterDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn taxonomies(&self) -> &Taxonomies {
        &self.taxonomies
    }

    pub fn mapping_table(&self) -> &MappingTable {
        &self.mapping_table
    }

    /// Convert any neutral entity with the most specific matching converter.
    pub fn convert_neutral_to_archive(&self, model: &dyn NeutralModel) -> Result<ArchiveEntity> {
        let view = model.as_neutral();
        let descriptor = self
            .archive_descriptor(view, |_| true)
            .ok_or_else(|| no_archive_converter(view, ANY_ARCHIVE))?;
        self.run_archive(descriptor, view)
    }

    /// Convert any lab entity with the first converter accepting its kind.
    pub fn convert_lab_to_neutral(&self, model: &dyn LabModel) -> Result<NeutralEntity> {
        let view = model.as_lab();
        let descriptor = self
            .lab_descriptor(view, |_| true)
            .ok_or_else(|| no_neutral_converter(view, ANY_NEUTRAL))?;
        self.run_neutral(descriptor, view)
    }

    /// Convert a neutral entity into a specific archive type.
    pub fn to_archive<A: ArchiveTarget>(&self, model: &dyn NeutralModel) -> Result<A> {
        let view = model.as_neutral();
        let target = A::KIND.as_str();
        let descriptor = self
            .archive_descriptor(view, |descriptor| descriptor.archive_kind() == Some(A::KIND))
            .ok_or_else(|| no_archive_converter(view, target))?;
        let entity = self.run_archive(descriptor, view)?;
        A::from_entity(entity).map_err(|other| ConversionError::Archive {
            from: view.kind().as_str(),
            to: target,
            cause: ConversionCause::UnexpectedOutput {
                expected: target,
                found: other.kind().as_str(),
            },
        })
    }

    /// Convert a lab entity into a specific neutral type.
    pub fn to_neutral<N: NeutralTarget>(&self, model: &dyn LabModel) -> Result<N> {
        let view = model.as_lab();
        let target = N::KIND.as_str();
        let descriptor = self
            .lab_descriptor(view, |descriptor| descriptor.neutral_kind() == N::KIND)
            .ok_or_else(|| no_neutral_converter(view, target))?;
        let entity = self.run_neutral(descriptor, view)?;
        N::from_entity(entity).map_err(|other| ConversionError::Neutral {
            from: view.kind().as_str(),
            to: target,
            cause: ConversionCause::UnexpectedOutput {
                expected: target,
                found: other.kind().as_str(),
            },
        })
    }

    fn archive_descriptor(
        &self,
        view: NeutralRef<'_>,
        accept: impl Fn(&ConverterDescriptor) -> bool,
    ) -> Option<&ConverterDescriptor> {
        view.kind().ancestry().find_map(|kind| {
            self.descriptors.iter().find(|&descriptor| {
                descriptor.neutral_kind() == kind
                    && descriptor.archive_kind().is_some()
                    && accept(descriptor)
            })
        })
    }

    fn lab_descriptor(
        &self,
        view: LabRef<'_>,
        accept: impl Fn(&ConverterDescriptor) -> bool,
    ) -> Option<&ConverterDescriptor> {
        self.descriptors
            .iter()
            .find(|&descriptor| descriptor.lab_kind() == Some(view.kind()) && accept(descriptor))
    }

    fn run_archive(
        &self,
        descriptor: &ConverterDescriptor,
        view: NeutralRef<'_>,
    ) -> Result<ArchiveEntity> {
        trace!(concept = descriptor.concept(), from = %view.kind(), "neutral to archive");
        let to = descriptor.archive_kind().map_or(ANY_ARCHIVE, |kind| kind.as_str());
        descriptor
            .converter()
            .to_archive(self, view)
            .map_err(|failure| match failure {
                ConverterFailure::Nested(err) => err,
                ConverterFailure::Cause(cause) => {
                    let err = ConversionError::Archive {
                        from: view.kind().as_str(),
                        to,
                        cause,
                    };
                    debug!(error = %err, "conversion failed");
                    err
                }
            })
    }

    fn run_neutral(
        &self,
        descriptor: &ConverterDescriptor,
        view: LabRef<'_>,
    ) -> Result<NeutralEntity> {
        trace!(concept = descriptor.concept(), from = %view.kind(), "lab to neutral");
        descriptor
            .converter()
            .to_neutral(self, view)
            .map_err(|failure| match failure {
                ConverterFailure::Nested(err) => err,
                ConverterFailure::Cause(cause) => {
                    let err = ConversionError::Neutral {
                        from: view.kind().as_str(),
                        to: descriptor.neutral_kind().as_str(),
                        cause,
                    };
                    debug!(error = %err, "conversion failed");
                    err
                }
            })
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::standard(Taxonomies::standard(), MappingTable::standard().clone())
    }
}

impl std::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("descriptors", &self.descriptors)
            .finish_non_exhaustive()
    }
}

fn no_archive_converter(view: NeutralRef<'_>, to: &'static str) -> ConversionError {
    ConversionError::Archive {
        from: view.kind().as_str(),
        to,
        cause: ConversionCause::NoConverter,
    }
}

fn no_neutral_converter(view: LabRef<'_>, to: &'static str) -> ConversionError {
    ConversionError::Neutral {
        from: view.kind().as_str(),
        to,
        cause: ConversionCause::NoConverter,
    }
}

static DEFAULT_REGISTRY: OnceLock<ConversionRegistry> = OnceLock::new();

/// The standard registry with the standard taxonomies and mapping table,
/// built on first use.
pub fn default_registry() -> &'static ConversionRegistry {
    DEFAULT_REGISTRY.get_or_init(ConversionRegistry::default)
}
