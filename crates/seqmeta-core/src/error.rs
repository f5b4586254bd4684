//! Error types for schema conversion.

use thiserror::Error;

use seqmeta_map::MappingError;
use seqmeta_model::ModelError;

/// Why a single conversion step failed.
#[derive(Debug, Error)]
pub enum ConversionCause {
    #[error("no converter registered")]
    NoConverter,
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("converter produced {found} where {expected} was expected")]
    UnexpectedOutput {
        expected: &'static str,
        found: &'static str,
    },
}

/// A failed conversion, naming the input and target kinds.
///
/// Failures inside nested conversions surface unchanged; only the step that
/// actually failed is wrapped.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("cannot convert neutral {from} to archive {to}: {cause}")]
    Archive {
        from: &'static str,
        to: &'static str,
        #[source]
        cause: ConversionCause,
    },
    #[error("cannot convert lab {from} to neutral {to}: {cause}")]
    Neutral {
        from: &'static str,
        to: &'static str,
        #[source]
        cause: ConversionCause,
    },
}

impl ConversionError {
    pub fn cause(&self) -> &ConversionCause {
        match self {
            ConversionError::Archive { cause, .. } | ConversionError::Neutral { cause, .. } => {
                cause
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// What a converter body returns: either its own failure, which the registry
/// wraps with the input and target kinds, or a nested conversion error that
/// is passed through as is.
#[derive(Debug)]
pub enum ConverterFailure {
    Cause(ConversionCause),
    Nested(ConversionError),
}

impl From<ModelError> for ConverterFailure {
    fn from(err: ModelError) -> Self {
        ConverterFailure::Cause(ConversionCause::Model(err))
    }
}

impl From<MappingError> for ConverterFailure {
    fn from(err: MappingError) -> Self {
        ConverterFailure::Cause(ConversionCause::Mapping(err))
    }
}

impl From<ConversionError> for ConverterFailure {
    fn from(err: ConversionError) -> Self {
        ConverterFailure::Nested(err)
    }
}

pub type ConverterResult<T> = std::result::Result<T, ConverterFailure>;
