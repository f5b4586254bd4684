use tracing::error;

use seqmeta_model::{archive, neutral};

use super::{ConceptConverter, ConversionRegistry, unsupported};
use crate::entity::{ArchiveEntity, LabRef, NeutralEntity, NeutralRef};
use crate::error::ConverterResult;

/// Experiment references, identified by the experiment alias.
pub struct ExperimentRefConverter;

impl ConceptConverter for ExperimentRefConverter {
    fn to_archive(
        &self,
        _registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::ExperimentRef(reference) = model else {
            return Err(unsupported());
        };
        Ok(ArchiveEntity::ExperimentRef(archive::ExperimentRef::new(
            reference.alias.clone(),
        )))
    }

    fn to_neutral(
        &self,
        registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::Sample(sample) = model else {
            return Err(unsupported());
        };
        Ok(NeutralEntity::ExperimentRef(neutral::ExperimentRef {
            alias: sample.sample_library_id()?,
            project: registry.to_neutral::<neutral::StudyRef>(sample)?,
            sample: Some(registry.to_neutral::<neutral::SampleDescriptor>(sample)?),
        }))
    }
}

/// Experiments, converted part by part.
pub struct ExperimentConverter;

impl ConceptConverter for ExperimentConverter {
    fn to_archive(
        &self,
        registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::Experiment(experiment) = model else {
            return Err(unsupported());
        };
        Ok(ArchiveEntity::Experiment(archive::Experiment {
            alias: experiment.alias.clone(),
            title: experiment.title.clone(),
            study_ref: registry.to_archive::<archive::StudyRef>(&experiment.project)?,
            design: registry.to_archive::<archive::Library>(&experiment.library)?,
            platform: registry.to_archive::<archive::Platform>(&experiment.platform)?,
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
        let descriptor = registry.to_neutral::<neutral::SampleDescriptor>(sample)?;
        let project = registry.to_neutral::<neutral::StudyRef>(sample)?;
        let platform = registry.to_neutral::<neutral::IlluminaPlatform>(sample)?;
        let alias = sample.sample_library_id()?;
        let library = registry.to_neutral::<neutral::Library>(sample)?;
        // Absent labels leave their title field empty.
        let title = format!(
            "{} - {} - {} - {} - {}",
            project.project_id,
            descriptor.sample_name,
            library.application,
            library.sample_type,
            library.library_kit
        );
        Ok(NeutralEntity::Experiment(neutral::Experiment {
            alias,
            title,
            project,
            platform,
            library,
        }))
    }
}

/// Experiment sets. From the lab every container sample becomes one
/// experiment; samples that fail to convert are logged and left out.
pub struct ExperimentSetConverter;

impl ConceptConverter for ExperimentSetConverter {
    fn to_archive(
        &self,
        registry: &ConversionRegistry,
        model: NeutralRef<'_>,
    ) -> ConverterResult<ArchiveEntity> {
        let NeutralRef::ExperimentSet(set) = model else {
            return Err(unsupported());
        };
        let experiments = set
            .experiments
            .iter()
            .map(|experiment| registry.to_archive::<archive::Experiment>(experiment))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ArchiveEntity::ExperimentSet(archive::ExperimentSet::new(
            experiments,
        )))
    }

    fn to_neutral(
        &self,
        registry: &ConversionRegistry,
        model: LabRef<'_>,
    ) -> ConverterResult<NeutralEntity> {
        let LabRef::SequencingContainer(container) = model else {
            return Err(unsupported());
        };
        let experiments = container
            .samples
            .iter()
            .filter_map(
                |sample| match registry.to_neutral::<neutral::Experiment>(sample) {
                    Ok(experiment) => Some(experiment),
                    Err(err) => {
                        error!(
                            container = %container.name,
                            sample = %sample.sample_name,
                            error = %err,
                            "experiment skipped"
                        );
                        None
                    }
                },
            )
            .collect();
        Ok(NeutralEntity::ExperimentSet(neutral::ExperimentSet {
            experiments,
        }))
    }
}
