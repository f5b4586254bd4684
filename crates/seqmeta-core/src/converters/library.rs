use seqmeta_model::{ModelError, archive, neutral};

use super::{ConceptConverter, ConversionRegistry, unsupported};
use crate::entity::{ArchiveEntity, LabRef, NeutralEntity, NeutralRef};
use crate::error::ConverterResult;

/// Library layouts: paired libraries carry the target insert size as the
/// archive's nominal length.
pub struct LibraryLayoutConverter;

impl ConceptConverter for LibraryLayoutConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::LibraryLayout(layout) = model else {
            return Err(unsupported());
        };
        let archive_layout = if layout.is_paired == Some(true) {
            archive::LibraryLayout::Paired {
                nominal_length: layout.target_insert_size,
            }
        } else {
            archive::LibraryLayout::Single {}
        };
        Ok(ArchiveEntity::LibraryLayout(archive_layout))
    }

    fn to_neutral(
        &self,
        _registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        Ok(NeutralEntity::LibraryLayout(neutral::LibraryLayout {
            is_paired: sample.is_paired(),
            fragment_size: sample.fragment_size(),
            fragment_upper: sample.fragment_upper(),
            fragment_lower: sample.fragment_lower(),
            target_insert_size: sample.insert_size_bp(),
        }))
    }
}

/// Libraries. Towards the archive the classified attributes go through the
/// mapping table; from the lab the raw labels are classified.
pub struct LibraryConverter;

impl ConceptConverter for LibraryConverter {
    fn to_archive(
        &self,
        registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::Library(library) = model else {
            return Err(unsupported());
        };
        let descriptor = registry.mapping_table().map(
            &library.sample_type,
            &library.application,
            &library.library_kit,
        )?;
        let sample = library.sample.as_ref().ok_or(ModelError::MissingField {
            entity: "Library",
            field: "sample",
        })?;
        let sample_descriptor = registry.to_archive::<archive::SampleDescriptor>(sample)?;
        let layout = registry.to_archive::<archive::LibraryLayout>(&library.layout)?;
        Ok(ArchiveEntity::Library(archive::Library {
            design_description: library.description.clone(),
            sample_descriptor,
            library_descriptor: archive::LibraryDescriptor {
                strategy: descriptor.strategy(),
                source: descriptor.source(),
                selection: descriptor.selection(),
                layout,
                construction_protocol: library
                    .library_protocol
                    .clone()
                    .filter(|protocol| !protocol.is_empty()),
            },
        }))
    }

    fn to_neutral(
        &self,
        registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        let taxonomies = registry.taxonomies();
        let kit = sample.library_preparation_kit();
        Ok(NeutralEntity::Library(neutral::Library {
            sample: Some(registry.to_neutral::<neutral::SampleDescriptor>(sample)?),
            pool: None,
            description: None,
            application: taxonomies.classify_application(sample.application().as_deref()),
            sample_type: taxonomies.classify_source(sample.sample_type().as_deref()),
            library_kit: taxonomies.classify_library_kit(kit.as_deref()),
            layout: registry.to_neutral::<neutral::LibraryLayout>(sample)?,
            library_protocol: Some(kit.unwrap_or_default()),
        }))
    }
}
