//! Error types for cross-schema mapping.

use thiserror::Error;

/// Errors from mapping a taxonomy triple to an archive descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No rule admits the classified triple.
    #[error(
        "no mapping rule for source '{sample_type}', application '{application}', library kit '{library_kit}'"
    )]
    NoMatchingRule {
        sample_type: &'static str,
        application: &'static str,
        library_kit: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, MappingError>;

/// A structural problem in a mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleIssue {
    #[error("rule {rule} ({design}) has no {position} nodes")]
    EmptyPosition {
        rule: usize,
        design: &'static str,
        position: &'static str,
    },
    #[error(
        "rules {first} ({first_design}) and {second} ({second_design}) both match {sample_type}/{application}/{library_kit} at specificity {specificity}"
    )]
    AmbiguousRules {
        first: usize,
        first_design: &'static str,
        second: usize,
        second_design: &'static str,
        specificity: usize,
        sample_type: &'static str,
        application: &'static str,
        library_kit: &'static str,
    },
}

/// Every issue found by [`crate::MappingTable::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mapping table has {} issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct MappingTableError {
    pub issues: Vec<RuleIssue>,
}

fn join_issues(issues: &[RuleIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
