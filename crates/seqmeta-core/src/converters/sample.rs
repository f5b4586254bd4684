use tracing::error;

use seqmeta_model::{archive, neutral};

use super::{ConceptConverter, ConversionRegistry, unsupported};
use crate::entity::{ArchiveEntity, LabRef, NeutralEntity, NeutralRef};
use crate::error::ConverterResult;

/// Sample descriptors; the archive only keeps the sample name.
pub struct SampleDescriptorConverter;

impl ConceptConverter for SampleDescriptorConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let sample = model.sample_descriptor().ok_or_else(unsupported)?;
        Ok(ArchiveEntity::SampleDescriptor(
            archive::SampleDescriptor::new(sample.sample_name.clone()),
        ))
    }

    fn to_neutral(
        &self,
        _registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        let index_tag = sample.index_tag();
        Ok(NeutralEntity::SampleDescriptor(neutral::SampleDescriptor {
            sample_name: sample.sample_name.clone(),
            sample_id: sample.sample_id.clone(),
            sample_library_id: Some(sample.sample_library_id()?),
            sample_library_tag: (!index_tag.is_empty()).then_some(index_tag),
        }))
    }
}

/// Pool members convert exactly like the sample they wrap.
pub struct PoolMemberConverter;

impl ConceptConverter for PoolMemberConverter {
    fn to_archive(
        &self,
        registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        SampleDescriptorConverter.to_archive(registry, model)
    }

    fn to_neutral(
        &self,
        registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        let descriptor = registry.to_neutral::<neutral::SampleDescriptor>(sample)?;
        Ok(NeutralEntity::PoolMember(neutral::PoolMember::new(
            descriptor,
        )))
    }
}

/// Read labels of a pooled lab sample.
pub struct ReadLabelConverter;

impl ConceptConverter for ReadLabelConverter {
    fn to_neutral(
        &self,
        registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        let member = registry.to_neutral::<neutral::PoolMember>(sample)?;
        Ok(NeutralEntity::ReadLabels(member.read_labels()))
    }
}

/// Pools built from a sequencing container. Members that cannot be
/// converted are logged and left out.
pub struct PoolConverter;

impl ConceptConverter for PoolConverter {
    fn to_neutral(
        &self,
        registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::SequencingContainer(container) = model else {
            return Err(unsupported());
        };
        let samples = container
            .samples
            .iter()
            .filter_map(
                |sample| match registry.to_neutral::<neutral::PoolMember>(sample) {
                    Ok(member) => Some(member),
                    Err(err) => {
                        error!(
                            container = %container.name,
                            sample = %sample.sample_name,
                            error = %err,
                            "pool member skipped"
                        );
                        None
                    }
                },
            )
            .collect();
        Ok(NeutralEntity::Pool(neutral::Pool { samples }))
    }
}
