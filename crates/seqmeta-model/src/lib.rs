//! Sequencing metadata models.
//!
//! - [`taxonomy`] and [`library_design`]: the term classifier and the three
//!   taxonomies it is used with.
//! - [`vocabulary`]: archive controlled vocabularies.
//! - [`lab`], [`neutral`], [`archive`]: the three schemas metadata moves
//!   through.
//! - [`canonical`]: the canonical-map round trip shared by all entities.

pub mod archive;
pub mod canonical;
pub mod error;
pub mod lab;
pub mod library_design;
pub mod neutral;
pub mod taxonomy;
pub mod vocabulary;

pub use canonical::{CanonicalMap, CanonicalObject};
pub use error::{ModelError, Result, TaxonomyError, TaxonomyIssue};
pub use lab::{LimsSample, LimsSequencingContainer};
pub use library_design::{
    Application, ApplicationAttribute, LibraryKit, LibraryKitAttribute, Source, SourceAttribute,
    Taxonomies,
};
pub use taxonomy::{ClassifiedAttribute, NodeDecl, Taxonomy, TaxonomyNode};
pub use vocabulary::{IlluminaModel, LibrarySelection, LibrarySource, LibraryStrategy};
