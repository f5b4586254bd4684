use seqmeta_model::archive;

use super::{ConceptConverter, ConversionRegistry, unsupported};
use crate::entity::{ArchiveEntity, NeutralRef};
use crate::error::ConverterResult;

/// Result files, copied field for field; the file path becomes the filename.
pub struct ResultFileConverter;

impl ConceptConverter for ResultFileConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::ResultFile(file) = model else {
            return Err(unsupported());
        };
        Ok(ArchiveEntity::ResultFile(archive::ResultFile {
            filename: file.filepath.clone(),
            filetype: file.filetype.clone(),
            checksum_method: file.checksum_method.clone(),
            checksum: file.checksum.clone(),
        }))
    }
}

/// Run attributes, copied as tag, value and units.
pub struct AttributeConverter;

impl ConceptConverter for AttributeConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::Attribute(attribute) = model else {
            return Err(unsupported());
        };
        Ok(ArchiveEntity::Attribute(archive::Attribute {
            tag: attribute.tag.clone(),
            value: attribute.value.clone(),
            units: attribute.units.clone(),
        }))
    }
}

/// Sequencing runs. The run points at its experiment through the
/// experiment's alias.
pub struct RunConverter;

impl ConceptConverter for RunConverter {
    fn to_archive(
        &self,
        registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::Run(run) = model else {
            return Err(unsupported());
        };
        let files = run
            .fastqfiles
            .iter()
            .map(|file| registry.to_archive::<archive::ResultFile>(file))
            .collect::<Result<Vec<_>, _>>()?;
        let run_attributes = run
            .run_attributes
            .iter()
            .map(|attribute| registry.to_archive::<archive::Attribute>(attribute))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ArchiveEntity::Run(archive::Run {
            title: run.run_alias.clone(),
            experiment_ref: registry.to_archive::<archive::ExperimentRef>(&run.experiment)?,
            run_date: run.run_date,
            run_center: run.run_center.clone(),
            files,
            run_attributes,
        }))
    }
}

/// A flowcell becomes the run set of its sequencing runs.
pub struct RunSetConverter;

impl ConceptConverter for RunSetConverter {
    fn to_archive(
        &self,
        registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::Flowcell(flowcell) = model else {
            return Err(unsupported());
        };
        let runs = flowcell
            .sequencing_runs
            .iter()
            .map(|run| registry.to_archive::<archive::Run>(run))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ArchiveEntity::RunSet(archive::RunSet::new(runs)))
    }
}
