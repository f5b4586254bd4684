//! Hierarchical term classifier for free-text lab metadata.
//!
//! A taxonomy is a tree of nodes declared in a static table. Each row names a
//! node, its parent and the synonyms that identify it:
//!
//! - **Leaf nodes** carry the synonyms lab staff actually type (e.g. `gdna`).
//! - **Grouping nodes** (e.g. `DNA`) carry no synonyms and only yield to a
//!   more specific child.
//! - **The root** carries no synonyms and catches everything that nothing
//!   else claims.
//!
//! ## Matching
//!
//! Labels and synonyms are compared after normalization: lower-cased, with
//! hyphens and spaces removed. Labels additionally lose the `rml-` marker
//! used for ready-made library pools, so `"RML- Single cell"` and
//! `"single-cell"` compare equal.
//!
//! Children are searched depth-first in declaration order and the first
//! matching subtree wins. A node matches itself only when no child matched.
//! An unmatched, empty or absent label yields the root, so classification
//! never fails.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::de::{DeserializeSeed, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{TaxonomyError, TaxonomyIssue};

/// Marker prepended to labels of ready-made library pools.
pub const POOL_MARKER: &str = "rml-";

/// A node kind of one taxonomy.
///
/// Implemented by plain enums; the declaration table lists every variant with
/// its parent and synonyms.
pub trait TaxonomyNode: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Human-readable taxonomy name, used in diagnostics.
    const TAXONOMY: &'static str;

    /// The catch-all root node.
    const ROOT: Self;

    /// Declaration table in search order.
    const DECLARATIONS: &'static [NodeDecl<Self>];

    /// Stable dotted key of the node, e.g. `GENOMIC.TARGET`.
    fn key(self) -> &'static str;

    /// The process-wide taxonomy built from [`Self::DECLARATIONS`].
    fn standard() -> &'static Taxonomy<Self>;
}

/// One row of a taxonomy declaration table.
#[derive(Debug, Clone, Copy)]
pub struct NodeDecl<N> {
    pub node: N,
    pub parent: Option<N>,
    pub synonyms: &'static [&'static str],
}

impl<N> NodeDecl<N> {
    pub const fn root(node: N) -> Self {
        Self {
            node,
            parent: None,
            synonyms: &[],
        }
    }

    pub const fn group(node: N, parent: N) -> Self {
        Self {
            node,
            parent: Some(parent),
            synonyms: &[],
        }
    }

    pub const fn leaf(node: N, parent: N, synonyms: &'static [&'static str]) -> Self {
        Self {
            node,
            parent: Some(parent),
            synonyms,
        }
    }
}

/// Normalize a synonym for comparison.
pub fn normalize_synonym(synonym: &str) -> String {
    synonym
        .to_lowercase()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect()
}

/// Normalize a lab-entered label for comparison.
pub fn normalize_label(label: &str) -> String {
    normalize_synonym(&label.to_lowercase().replace(POOL_MARKER, ""))
}

#[derive(Debug)]
struct Entry<N> {
    node: N,
    parent: Option<N>,
    synonyms: &'static [&'static str],
    normalized: Vec<String>,
    children: Vec<usize>,
}

impl<N> Entry<N> {
    fn new(node: N, parent: Option<N>, synonyms: &'static [&'static str]) -> Self {
        Self {
            node,
            parent,
            synonyms,
            normalized: synonyms.iter().map(|s| normalize_synonym(s)).collect(),
            children: Vec::new(),
        }
    }
}

/// An immutable classification tree.
#[derive(Debug)]
pub struct Taxonomy<N: TaxonomyNode> {
    declarations: &'static [NodeDecl<N>],
    entries: Vec<Entry<N>>,
    index: HashMap<N, usize>,
}

impl<N: TaxonomyNode> Taxonomy<N> {
    /// Build a tree from a declaration table.
    ///
    /// Construction never fails; rows that cannot be placed hang off the
    /// root. Use [`Taxonomy::validate`] to surface table defects.
    pub fn new(declarations: &'static [NodeDecl<N>]) -> Self {
        let mut entries = vec![Entry::new(N::ROOT, None, &[])];
        let mut index = HashMap::from([(N::ROOT, 0)]);

        for decl in declarations {
            if decl.node == N::ROOT {
                entries[0] = Entry::new(N::ROOT, None, decl.synonyms);
                continue;
            }
            if index.contains_key(&decl.node) {
                continue;
            }
            index.insert(decl.node, entries.len());
            entries.push(Entry::new(
                decl.node,
                Some(decl.parent.unwrap_or(N::ROOT)),
                decl.synonyms,
            ));
        }

        for position in 1..entries.len() {
            let parent = entries[position]
                .parent
                .and_then(|parent| index.get(&parent).copied())
                .unwrap_or(0);
            entries[parent].children.push(position);
        }

        Self {
            declarations,
            entries,
            index,
        }
    }

    pub fn name(&self) -> &'static str {
        N::TAXONOMY
    }

    pub fn root(&self) -> N {
        N::ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All nodes in declaration order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.entries.iter().map(|entry| entry.node)
    }

    pub fn children(&self, node: N) -> Vec<N> {
        self.entry(node)
            .map(|entry| {
                entry
                    .children
                    .iter()
                    .map(|&child| self.entries[child].node)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn parent(&self, node: N) -> Option<N> {
        self.entry(node).and_then(|entry| entry.parent)
    }

    pub fn synonyms(&self, node: N) -> &'static [&'static str] {
        self.entry(node).map(|entry| entry.synonyms).unwrap_or(&[])
    }

    /// Distance from the root.
    pub fn depth(&self, node: N) -> usize {
        let mut depth = 0;
        let mut current = self.parent(node);
        while let Some(parent) = current
            && depth < self.entries.len()
        {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Look up a node by its dotted key (case-insensitive).
    pub fn node_by_key(&self, key: &str) -> Option<N> {
        let key = key.trim();
        self.nodes().find(|node| node.key().eq_ignore_ascii_case(key))
    }

    /// Classify a free-text label.
    pub fn classify(&self, label: Option<&str>) -> ClassifiedAttribute<N> {
        let raw = label.map(str::to_string);
        let node = label
            .map(normalize_label)
            .filter(|needle| !needle.is_empty())
            .and_then(|needle| self.find(0, &needle))
            .unwrap_or(N::ROOT);
        if node == N::ROOT {
            tracing::debug!(
                taxonomy = N::TAXONOMY,
                label = label.unwrap_or_default(),
                "label left unclassified"
            );
        }
        ClassifiedAttribute::new(node, raw)
    }

    /// Check the declaration table for structural defects.
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        let mut issues = Vec::new();
        let mut declared = HashSet::new();
        let mut claimed: HashMap<String, N> = HashMap::new();

        for decl in self.declarations {
            if !declared.insert(decl.node) {
                issues.push(TaxonomyIssue::DuplicateNode {
                    node: decl.node.key(),
                });
            }
            match decl.parent {
                None if decl.node != N::ROOT => issues.push(TaxonomyIssue::ExtraRoot {
                    node: decl.node.key(),
                }),
                Some(parent) if !declared.contains(&parent) => {
                    issues.push(TaxonomyIssue::ParentNotDeclared {
                        node: decl.node.key(),
                        parent: parent.key(),
                    });
                }
                _ => {}
            }
            for synonym in decl.synonyms {
                let normalized = normalize_synonym(synonym);
                if normalized.is_empty() {
                    issues.push(TaxonomyIssue::BlankSynonym {
                        node: decl.node.key(),
                    });
                    continue;
                }
                if let Some(owner) = claimed.insert(normalized.clone(), decl.node)
                    && owner != decl.node
                {
                    issues.push(TaxonomyIssue::DuplicateSynonym {
                        synonym: normalized,
                        first: owner.key(),
                        second: decl.node.key(),
                    });
                }
            }
        }
        if !declared.contains(&N::ROOT) {
            issues.insert(0, TaxonomyIssue::MissingRoot { root: N::ROOT.key() });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(TaxonomyError {
                taxonomy: N::TAXONOMY,
                issues,
            })
        }
    }

    fn entry(&self, node: N) -> Option<&Entry<N>> {
        self.index.get(&node).map(|&position| &self.entries[position])
    }

    fn find(&self, position: usize, needle: &str) -> Option<N> {
        let entry = &self.entries[position];
        entry
            .children
            .iter()
            .find_map(|&child| self.find(child, needle))
            .or_else(|| {
                entry
                    .normalized
                    .iter()
                    .any(|synonym| synonym == needle)
                    .then_some(entry.node)
            })
    }
}

/// The result of classifying a label: the matched node plus the raw label.
///
/// Equality compares nodes only. The canonical map is
/// `{"description": <raw label>}`. `Deserialize` re-classifies the label
/// against the standard taxonomy; use a `&Taxonomy` as a [`DeserializeSeed`]
/// (or [`Taxonomy::attribute_from_value`]) to parse against another one.
#[derive(Debug, Clone)]
pub struct ClassifiedAttribute<N: TaxonomyNode> {
    node: N,
    label: Option<String>,
}

impl<N: TaxonomyNode> ClassifiedAttribute<N> {
    pub fn new(node: N, label: Option<String>) -> Self {
        Self { node, label }
    }

    pub fn node(&self) -> N {
        self.node
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The raw label, or an empty string.
    pub fn description(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    pub fn is_unclassified(&self) -> bool {
        self.node == N::ROOT
    }
}

impl<N: TaxonomyNode> Default for ClassifiedAttribute<N> {
    fn default() -> Self {
        Self::new(N::ROOT, None)
    }
}

impl<N: TaxonomyNode> PartialEq for ClassifiedAttribute<N> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<N: TaxonomyNode> Eq for ClassifiedAttribute<N> {}

impl<N: TaxonomyNode> fmt::Display for ClassifiedAttribute<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl<N: TaxonomyNode> Serialize for ClassifiedAttribute<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state =
            serializer.serialize_struct("ClassifiedAttribute", usize::from(self.label.is_some()))?;
        match &self.label {
            Some(label) => state.serialize_field("description", label)?,
            None => state.skip_field("description")?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct DescriptionRepr {
    #[serde(default)]
    description: Option<String>,
}

impl<'de, N: TaxonomyNode> DeserializeSeed<'de> for &Taxonomy<N> {
    type Value = ClassifiedAttribute<N>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let repr = DescriptionRepr::deserialize(deserializer)?;
        Ok(self.classify(repr.description.as_deref()))
    }
}

impl<'de, N: TaxonomyNode> Deserialize<'de> for ClassifiedAttribute<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DeserializeSeed::deserialize(N::standard(), deserializer)
    }
}

impl<N: TaxonomyNode> Taxonomy<N> {
    /// Parse a canonical map, classifying its label against this taxonomy.
    pub fn attribute_from_value(
        &self,
        value: serde_json::Value,
    ) -> Result<ClassifiedAttribute<N>, serde_json::Error> {
        DeserializeSeed::deserialize(self, value)
    }
}
