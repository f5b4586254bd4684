//! Closed sets of entity kinds per schema, with owned and borrowed views.
//!
//! Converters are keyed by kind. Neutral kinds form a small subtype
//! hierarchy (a pool member is a sample descriptor, an Illumina platform is
//! a sequencing platform) that registry lookup walks from the most specific
//! kind upwards.

use std::fmt;

use seqmeta_model::{LimsSample, LimsSequencingContainer, archive, neutral};

/// Kinds of neutral entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeutralKind {
    SampleDescriptor,
    PoolMember,
    ReadLabel,
    Pool,
    StudyRef,
    SequencingPlatform,
    IlluminaPlatform,
    LibraryLayout,
    Library,
    ExperimentRef,
    Experiment,
    ExperimentSet,
    ResultFile,
    Attribute,
    Run,
    Flowcell,
}

impl NeutralKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeutralKind::SampleDescriptor => "SampleDescriptor",
            NeutralKind::PoolMember => "PoolMember",
            NeutralKind::ReadLabel => "ReadLabel",
            NeutralKind::Pool => "Pool",
            NeutralKind::StudyRef => "StudyRef",
            NeutralKind::SequencingPlatform => "SequencingPlatform",
            NeutralKind::IlluminaPlatform => "IlluminaPlatform",
            NeutralKind::LibraryLayout => "LibraryLayout",
            NeutralKind::Library => "Library",
            NeutralKind::ExperimentRef => "ExperimentRef",
            NeutralKind::Experiment => "Experiment",
            NeutralKind::ExperimentSet => "ExperimentSet",
            NeutralKind::ResultFile => "ResultFile",
            NeutralKind::Attribute => "Attribute",
            NeutralKind::Run => "Run",
            NeutralKind::Flowcell => "Flowcell",
        }
    }

    /// The kind this one specializes, if any.
    pub fn parent(&self) -> Option<NeutralKind> {
        match self {
            NeutralKind::PoolMember => Some(NeutralKind::SampleDescriptor),
            NeutralKind::IlluminaPlatform => Some(NeutralKind::SequencingPlatform),
            _ => None,
        }
    }

    /// This kind followed by its ancestors, most specific first.
    pub fn ancestry(self) -> impl Iterator<Item = NeutralKind> {
        std::iter::successors(Some(self), NeutralKind::parent)
    }
}

impl fmt::Display for NeutralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of archive entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    StudyRef,
    SampleDescriptor,
    ExperimentRef,
    Platform,
    LibraryLayout,
    Library,
    Experiment,
    ExperimentSet,
    ResultFile,
    Attribute,
    Run,
    RunSet,
}

impl ArchiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveKind::StudyRef => "StudyRef",
            ArchiveKind::SampleDescriptor => "SampleDescriptor",
            ArchiveKind::ExperimentRef => "ExperimentRef",
            ArchiveKind::Platform => "Platform",
            ArchiveKind::LibraryLayout => "LibraryLayout",
            ArchiveKind::Library => "Library",
            ArchiveKind::Experiment => "Experiment",
            ArchiveKind::ExperimentSet => "ExperimentSet",
            ArchiveKind::ResultFile => "ResultFile",
            ArchiveKind::Attribute => "Attribute",
            ArchiveKind::Run => "Run",
            ArchiveKind::RunSet => "RunSet",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of lab entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabKind {
    Sample,
    SequencingContainer,
}

impl LabKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabKind::Sample => "LimsSample",
            LabKind::SequencingContainer => "LimsSequencingContainer",
        }
    }
}

impl fmt::Display for LabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned neutral entity produced by a lab conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum NeutralEntity {
    SampleDescriptor(neutral::SampleDescriptor),
    PoolMember(neutral::PoolMember),
    ReadLabels(Vec<neutral::ReadLabel>),
    Pool(neutral::Pool),
    StudyRef(neutral::StudyRef),
    SequencingPlatform(neutral::SequencingPlatform),
    IlluminaPlatform(neutral::IlluminaPlatform),
    LibraryLayout(neutral::LibraryLayout),
    Library(neutral::Library),
    ExperimentRef(neutral::ExperimentRef),
    Experiment(neutral::Experiment),
    ExperimentSet(neutral::ExperimentSet),
    ResultFile(neutral::ResultFile),
    Attribute(neutral::Attribute),
    Run(neutral::Run),
    Flowcell(neutral::Flowcell),
}

impl NeutralEntity {
    pub fn kind(&self) -> NeutralKind {
        match self {
            NeutralEntity::SampleDescriptor(_) => NeutralKind::SampleDescriptor,
            NeutralEntity::PoolMember(_) => NeutralKind::PoolMember,
            NeutralEntity::ReadLabels(_) => NeutralKind::ReadLabel,
            NeutralEntity::Pool(_) => NeutralKind::Pool,
            NeutralEntity::StudyRef(_) => NeutralKind::StudyRef,
            NeutralEntity::SequencingPlatform(_) => NeutralKind::SequencingPlatform,
            NeutralEntity::IlluminaPlatform(_) => NeutralKind::IlluminaPlatform,
            NeutralEntity::LibraryLayout(_) => NeutralKind::LibraryLayout,
            NeutralEntity::Library(_) => NeutralKind::Library,
            NeutralEntity::ExperimentRef(_) => NeutralKind::ExperimentRef,
            NeutralEntity::Experiment(_) => NeutralKind::Experiment,
            NeutralEntity::ExperimentSet(_) => NeutralKind::ExperimentSet,
            NeutralEntity::ResultFile(_) => NeutralKind::ResultFile,
            NeutralEntity::Attribute(_) => NeutralKind::Attribute,
            NeutralEntity::Run(_) => NeutralKind::Run,
            NeutralEntity::Flowcell(_) => NeutralKind::Flowcell,
        }
    }
}

/// A borrowed neutral entity handed to converters.
#[derive(Debug, Clone, Copy)]
pub enum NeutralRef<'a> {
    SampleDescriptor(&'a neutral::SampleDescriptor),
    PoolMember(&'a neutral::PoolMember),
    ReadLabel(&'a neutral::ReadLabel),
    Pool(&'a neutral::Pool),
    StudyRef(&'a neutral::StudyRef),
    SequencingPlatform(&'a neutral::SequencingPlatform),
    IlluminaPlatform(&'a neutral::IlluminaPlatform),
    LibraryLayout(&'a neutral::LibraryLayout),
    Library(&'a neutral::Library),
    ExperimentRef(&'a neutral::ExperimentRef),
    Experiment(&'a neutral::Experiment),
    ExperimentSet(&'a neutral::ExperimentSet),
    ResultFile(&'a neutral::ResultFile),
    Attribute(&'a neutral::Attribute),
    Run(&'a neutral::Run),
    Flowcell(&'a neutral::Flowcell),
}

impl<'a> NeutralRef<'a> {
    pub fn kind(&self) -> NeutralKind {
        match self {
            NeutralRef::SampleDescriptor(_) => NeutralKind::SampleDescriptor,
            NeutralRef::PoolMember(_) => NeutralKind::PoolMember,
            NeutralRef::ReadLabel(_) => NeutralKind::ReadLabel,
            NeutralRef::Pool(_) => NeutralKind::Pool,
            NeutralRef::StudyRef(_) => NeutralKind::StudyRef,
            NeutralRef::SequencingPlatform(_) => NeutralKind::SequencingPlatform,
            NeutralRef::IlluminaPlatform(_) => NeutralKind::IlluminaPlatform,
            NeutralRef::LibraryLayout(_) => NeutralKind::LibraryLayout,
            NeutralRef::Library(_) => NeutralKind::Library,
            NeutralRef::ExperimentRef(_) => NeutralKind::ExperimentRef,
            NeutralRef::Experiment(_) => NeutralKind::Experiment,
            NeutralRef::ExperimentSet(_) => NeutralKind::ExperimentSet,
            NeutralRef::ResultFile(_) => NeutralKind::ResultFile,
            NeutralRef::Attribute(_) => NeutralKind::Attribute,
            NeutralRef::Run(_) => NeutralKind::Run,
            NeutralRef::Flowcell(_) => NeutralKind::Flowcell,
        }
    }

    /// The sample descriptor view, which pool members also provide.
    pub fn sample_descriptor(self) -> Option<&'a neutral::SampleDescriptor> {
        match self {
            NeutralRef::SampleDescriptor(sample) => Some(sample),
            NeutralRef::PoolMember(member) => Some(member.descriptor()),
            _ => None,
        }
    }
}

/// An owned archive entity.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveEntity {
    StudyRef(archive::StudyRef),
    SampleDescriptor(archive::SampleDescriptor),
    ExperimentRef(archive::ExperimentRef),
    Platform(archive::Platform),
    LibraryLayout(archive::LibraryLayout),
    Library(archive::Library),
    Experiment(archive::Experiment),
    ExperimentSet(archive::ExperimentSet),
    ResultFile(archive::ResultFile),
    Attribute(archive::Attribute),
    Run(archive::Run),
    RunSet(archive::RunSet),
}

impl ArchiveEntity {
    pub fn kind(&self) -> ArchiveKind {
        match self {
            ArchiveEntity::StudyRef(_) => ArchiveKind::StudyRef,
            ArchiveEntity::SampleDescriptor(_) => ArchiveKind::SampleDescriptor,
            ArchiveEntity::ExperimentRef(_) => ArchiveKind::ExperimentRef,
            ArchiveEntity::Platform(_) => ArchiveKind::Platform,
            ArchiveEntity::LibraryLayout(_) => ArchiveKind::LibraryLayout,
            ArchiveEntity::Library(_) => ArchiveKind::Library,
            ArchiveEntity::Experiment(_) => ArchiveKind::Experiment,
            ArchiveEntity::ExperimentSet(_) => ArchiveKind::ExperimentSet,
            ArchiveEntity::ResultFile(_) => ArchiveKind::ResultFile,
            ArchiveEntity::Attribute(_) => ArchiveKind::Attribute,
            ArchiveEntity::Run(_) => ArchiveKind::Run,
            ArchiveEntity::RunSet(_) => ArchiveKind::RunSet,
        }
    }
}

/// A borrowed lab entity handed to converters.
#[derive(Debug, Clone, Copy)]
pub enum LabRef<'a> {
    Sample(&'a LimsSample),
    SequencingContainer(&'a LimsSequencingContainer),
}

impl LabRef<'_> {
    pub fn kind(&self) -> LabKind {
        match self {
            LabRef::Sample(_) => LabKind::Sample,
            LabRef::SequencingContainer(_) => LabKind::SequencingContainer,
        }
    }
}

/// A neutral value that can be converted to the archive schema.
pub trait NeutralModel {
    fn as_neutral(&self) -> NeutralRef<'_>;

    fn neutral_kind(&self) -> NeutralKind {
        self.as_neutral().kind()
    }
}

/// A lab value that can be converted to the neutral schema.
pub trait LabModel {
    fn as_lab(&self) -> LabRef<'_>;

    fn lab_kind(&self) -> LabKind {
        self.as_lab().kind()
    }
}

/// A neutral type that typed lab conversions can produce.
pub trait NeutralTarget: Sized {
    const KIND: NeutralKind;

    /// The wrapped value, or the entity back when it is of another kind.
    fn from_entity(entity: NeutralEntity) -> Result<Self, NeutralEntity>;
}

/// An archive type that typed neutral conversions can produce.
pub trait ArchiveTarget: Sized {
    const KIND: ArchiveKind;

    fn from_entity(entity: ArchiveEntity) -> Result<Self, ArchiveEntity>;
}

macro_rules! neutral_entity {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl NeutralModel for $ty {
                fn as_neutral(&self) -> NeutralRef<'_> {
                    NeutralRef::$variant(self)
                }
            }

            impl NeutralTarget for $ty {
                const KIND: NeutralKind = NeutralKind::$variant;

                fn from_entity(entity: NeutralEntity) -> Result<Self, NeutralEntity> {
                    match entity {
                        NeutralEntity::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

neutral_entity! {
    SampleDescriptor => neutral::SampleDescriptor,
    PoolMember => neutral::PoolMember,
    Pool => neutral::Pool,
    StudyRef => neutral::StudyRef,
    SequencingPlatform => neutral::SequencingPlatform,
    IlluminaPlatform => neutral::IlluminaPlatform,
    LibraryLayout => neutral::LibraryLayout,
    Library => neutral::Library,
    ExperimentRef => neutral::ExperimentRef,
    Experiment => neutral::Experiment,
    ExperimentSet => neutral::ExperimentSet,
    ResultFile => neutral::ResultFile,
    Attribute => neutral::Attribute,
    Run => neutral::Run,
    Flowcell => neutral::Flowcell,
}

impl NeutralModel for neutral::ReadLabel {
    fn as_neutral(&self) -> NeutralRef<'_> {
        NeutralRef::ReadLabel(self)
    }
}

/// Read labels come out of a lab sample as a list.
impl NeutralTarget for Vec<neutral::ReadLabel> {
    const KIND: NeutralKind = NeutralKind::ReadLabel;

    fn from_entity(entity: NeutralEntity) -> Result<Self, NeutralEntity> {
        match entity {
            NeutralEntity::ReadLabels(labels) => Ok(labels),
            other => Err(other),
        }
    }
}

macro_rules! archive_entity {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl ArchiveTarget for $ty {
                const KIND: ArchiveKind = ArchiveKind::$variant;

                fn from_entity(entity: ArchiveEntity) -> Result<Self, ArchiveEntity> {
                    match entity {
                        ArchiveEntity::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

archive_entity! {
    StudyRef => archive::StudyRef,
    SampleDescriptor => archive::SampleDescriptor,
    ExperimentRef => archive::ExperimentRef,
    Platform => archive::Platform,
    LibraryLayout => archive::LibraryLayout,
    Library => archive::Library,
    Experiment => archive::Experiment,
    ExperimentSet => archive::ExperimentSet,
    ResultFile => archive::ResultFile,
    Attribute => archive::Attribute,
    Run => archive::Run,
    RunSet => archive::RunSet,
}

impl LabModel for LimsSample {
    fn as_lab(&self) -> LabRef<'_> {
        LabRef::Sample(self)
    }
}

impl LabModel for LimsSequencingContainer {
    fn as_lab(&self) -> LabRef<'_> {
        LabRef::SequencingContainer(self)
    }
}
