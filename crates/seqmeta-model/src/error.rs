use thiserror::Error;

/// Errors raised while building or parsing lab, neutral and archive entities.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("invalid value '{value}' for {entity}.{field}: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("instrument model not recognized: '{needle}'")]
    InstrumentModelNotRecognized { needle: String },
    #[error("unknown {kind} value: '{value}'")]
    VocabularyNotRecognized { kind: &'static str, value: String },
    #[error("{type_name} does not serialize to a map")]
    NotAMap { type_name: &'static str },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// A structural problem found in a taxonomy declaration table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyIssue {
    #[error("root node {root} is not declared")]
    MissingRoot { root: &'static str },
    #[error("node {node} has no parent but is not the root")]
    ExtraRoot { node: &'static str },
    #[error("node {node} is declared more than once")]
    DuplicateNode { node: &'static str },
    #[error("node {node} refers to parent {parent} before it is declared")]
    ParentNotDeclared {
        node: &'static str,
        parent: &'static str,
    },
    #[error("node {node} declares a blank synonym")]
    BlankSynonym { node: &'static str },
    #[error("synonym '{synonym}' is claimed by both {first} and {second}")]
    DuplicateSynonym {
        synonym: String,
        first: &'static str,
        second: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{taxonomy} taxonomy has {} issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct TaxonomyError {
    pub taxonomy: &'static str,
    pub issues: Vec<TaxonomyIssue>,
}

fn join_issues(issues: &[TaxonomyIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
