//! Cross-schema mapping from classified library attributes to the archive's
//! library strategy, source and selection.

pub mod descriptor;
pub mod error;
pub mod table;

pub use descriptor::{ArchiveLibraryDescriptor, LibraryDesign};
pub use error::{MappingError, MappingTableError, Result, RuleIssue};
pub use table::{MappingRule, MappingTable, STANDARD_RULES};
