//! Neutral schema: the internal model between the lab export and the archive.
//!
//! Entities are plain values with structural equality. Composite entities
//! own their parts; cross-entity links go through reference projections
//! such as [`ExperimentRef`].

mod experiment;
mod library;
mod platform;
mod run;
mod sample;

pub use experiment::{Experiment, ExperimentRef, ExperimentSet};
pub use library::{Library, LibraryLayout};
pub use platform::{IlluminaPlatform, SequencingPlatform};
pub use run::{Attribute, DEFAULT_RUN_CENTER, Flowcell, ResultFile, Run};
pub use sample::{Pool, PoolMember, ReadLabel, SampleDescriptor, StudyRef};
