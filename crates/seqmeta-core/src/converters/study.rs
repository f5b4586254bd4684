use seqmeta_model::{ModelError, archive, neutral};

use super::{ConceptConverter, ConversionRegistry, unsupported};
use crate::entity::{ArchiveEntity, LabRef, NeutralEntity, NeutralRef};
use crate::error::ConverterResult;

/// Study references, keyed by project id.
pub struct StudyRefConverter;

impl ConceptConverter for StudyRefConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::StudyRef(study) = model else {
            return Err(unsupported());
        };
        Ok(ArchiveEntity::StudyRef(archive::StudyRef::new(
            study.project_id.clone(),
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
        let project_id = sample.project_id.clone().ok_or(ModelError::MissingField {
            entity: "LimsSample",
            field: "project",
        })?;
        Ok(NeutralEntity::StudyRef(neutral::StudyRef::new(project_id)))
    }
}
