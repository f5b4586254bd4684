//! CLI library components for the sequencing metadata tool.

#![allow(missing_docs)]

pub mod logging;
pub mod pipeline;
pub mod types;
