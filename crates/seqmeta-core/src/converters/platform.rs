use seqmeta_model::lab::UDF_SEQUENCING_INSTRUMENT;
use seqmeta_model::{IlluminaModel, ModelError, archive, neutral};

use super::{ConceptConverter, ConversionRegistry, unsupported};
use crate::entity::{ArchiveEntity, LabRef, NeutralEntity, NeutralRef};
use crate::error::ConverterResult;

/// Illumina platforms. The lab side must name the sequencing instrument.
pub struct PlatformConverter;

impl ConceptConverter for PlatformConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::IlluminaPlatform(platform) = model else {
            return Err(unsupported());
        };
        let instrument_model = IlluminaModel::from_model_name(Some(platform.model_name()))?;
        Ok(ArchiveEntity::Platform(archive::Platform::illumina(
            instrument_model,
        )))
    }

    fn to_neutral(
        &self,
        _registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        let instrument = sample
            .sequencing_instrument()
            .ok_or(ModelError::MissingField {
                entity: "LimsSample",
                field: UDF_SEQUENCING_INSTRUMENT,
            })?;
        Ok(NeutralEntity::IlluminaPlatform(neutral::IlluminaPlatform::new(
            &instrument,
        )?))
    }
}
