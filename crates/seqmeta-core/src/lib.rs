//! Conversion between the lab, neutral and archive metadata schemas.
//!
//! [`ConversionRegistry`] holds one converter per concept. Lab exports are
//! converted to the neutral model with [`ConversionRegistry::to_neutral`];
//! neutral entities go to the archive with [`ConversionRegistry::to_archive`].

pub mod converters;
pub mod entity;
pub mod error;

pub use converters::{
    ConceptConverter, ConversionRegistry, ConverterDescriptor, default_registry,
    standard_descriptors,
};
pub use entity::{
    ArchiveEntity, ArchiveKind, ArchiveTarget, LabKind, LabModel, LabRef, NeutralEntity,
    NeutralKind, NeutralModel, NeutralRef, NeutralTarget,
};
pub use error::{ConversionCause, ConversionError, ConverterFailure, ConverterResult, Result};
