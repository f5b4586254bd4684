use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveRecord, ManifestEntry, SampleDescriptor, TsvColumn, TsvRow, entry};
use crate::vocabulary::{LibrarySelection, LibrarySource, LibraryStrategy};

/// `LIBRARY_LAYOUT`: either `<PAIRED NOMINAL_LENGTH=".."/>` or `<SINGLE/>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryLayout {
    #[serde(rename = "PAIRED")]
    Paired {
        #[serde(
            rename = "NOMINAL_LENGTH",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        nominal_length: Option<u32>,
    },
    #[serde(rename = "SINGLE")]
    Single {},
}

impl LibraryLayout {
    pub fn kind(&self) -> &'static str {
        match self {
            LibraryLayout::Paired { .. } => "PAIRED",
            LibraryLayout::Single {} => "SINGLE",
        }
    }

    pub fn is_paired(&self) -> bool {
        matches!(self, LibraryLayout::Paired { .. })
    }

    /// Nominal insert size; only paired layouts carry one.
    pub fn insert_size(&self) -> Option<u32> {
        match self {
            LibraryLayout::Paired { nominal_length } => *nominal_length,
            LibraryLayout::Single {} => None,
        }
    }
}

/// `LIBRARY_DESCRIPTOR`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDescriptor {
    #[serde(rename = "LIBRARY_STRATEGY")]
    pub strategy: LibraryStrategy,
    #[serde(rename = "LIBRARY_SOURCE")]
    pub source: LibrarySource,
    #[serde(rename = "LIBRARY_SELECTION")]
    pub selection: LibrarySelection,
    #[serde(rename = "LIBRARY_LAYOUT")]
    pub layout: LibraryLayout,
    #[serde(
        rename = "LIBRARY_CONSTRUCTION_PROTOCOL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub construction_protocol: Option<String>,
}

/// `DESIGN`: the library of an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(
        rename = "DESIGN_DESCRIPTION",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub design_description: Option<String>,
    #[serde(rename = "SAMPLE_DESCRIPTOR")]
    pub sample_descriptor: SampleDescriptor,
    #[serde(rename = "LIBRARY_DESCRIPTOR")]
    pub library_descriptor: LibraryDescriptor,
}

impl Library {
    pub fn layout(&self) -> &LibraryLayout {
        &self.library_descriptor.layout
    }
}

impl ArchiveRecord for Library {
    fn manifest(&self) -> Vec<ManifestEntry> {
        let descriptor = &self.library_descriptor;
        let mut manifest = Vec::new();
        if let Some(description) = self.design_description.as_deref().filter(|d| !d.is_empty()) {
            manifest.push(entry("DESCRIPTION", description));
        }
        manifest.push(entry("LIBRARY_STRATEGY", descriptor.strategy.name()));
        manifest.push(entry("LIBRARY_SOURCE", descriptor.source.name()));
        manifest.push(entry("LIBRARY_SELECTION", descriptor.selection.name()));
        manifest.extend(self.sample_descriptor.manifest());
        manifest
    }

    fn tsv_rows(&self) -> Vec<TsvRow> {
        let descriptor = &self.library_descriptor;
        let mut row = TsvRow::new()
            .with(
                TsvColumn::DesignDescription,
                self.design_description.clone().unwrap_or_default(),
            )
            .with(TsvColumn::LibrarySource, descriptor.source.name())
            .with(TsvColumn::LibrarySelection, descriptor.selection.name())
            .with(TsvColumn::LibraryStrategy, descriptor.strategy.name())
            .with(TsvColumn::LibraryLayout, descriptor.layout.kind())
            .with(
                TsvColumn::LibraryConstructionProtocol,
                descriptor.construction_protocol.clone().unwrap_or_default(),
            );
        if let Some(insert_size) = descriptor.layout.insert_size() {
            row.insert(TsvColumn::InsertSize, insert_size.to_string());
        }
        self.sample_descriptor
            .tsv_rows()
            .iter()
            .map(|sample_row| row.clone().merged(sample_row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(layout: LibraryLayout) -> Library {
        Library {
            design_description: None,
            sample_descriptor: SampleDescriptor::new("AB-1234-1"),
            library_descriptor: LibraryDescriptor {
                strategy: LibraryStrategy::TargetedCapture,
                source: LibrarySource::Genomic,
                selection: LibrarySelection::HybridSelection,
                layout,
                construction_protocol: Some("Twist Human Core Exome".to_string()),
            },
        }
    }

    #[test]
    fn test_single_layout_has_no_insert_size() {
        let rows = library(LibraryLayout::Single {}).tsv_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(TsvColumn::LibraryLayout), Some("SINGLE"));
        assert!(!rows[0].contains(TsvColumn::InsertSize));
        assert_eq!(rows[0].get(TsvColumn::Sample), Some("AB-1234-1"));
        assert_eq!(rows[0].get(TsvColumn::DesignDescription), Some(""));
    }

    #[test]
    fn test_paired_layout_reports_insert_size() {
        let rows = library(LibraryLayout::Paired {
            nominal_length: Some(350),
        })
        .tsv_rows();
        assert_eq!(rows[0].get(TsvColumn::LibraryLayout), Some("PAIRED"));
        assert_eq!(rows[0].get(TsvColumn::InsertSize), Some("350"));
    }

    #[test]
    fn test_manifest_uses_symbolic_names() {
        let manifest = library(LibraryLayout::Single {}).manifest();
        let keys: Vec<&str> = manifest.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["LIBRARY_STRATEGY", "LIBRARY_SOURCE", "LIBRARY_SELECTION", "SAMPLE"]
        );
        assert_eq!(manifest[0].1, "TARGETED_CAPTURE");
        assert_eq!(manifest[2].1, "HYBRID_SELECTION");
    }

    #[test]
    fn test_layout_json_shape() {
        let single = serde_json::to_value(LibraryLayout::Single {}).unwrap();
        assert_eq!(single, serde_json::json!({"SINGLE": {}}));
        let paired = serde_json::to_value(LibraryLayout::Paired {
            nominal_length: Some(300),
        })
        .unwrap();
        assert_eq!(paired, serde_json::json!({"PAIRED": {"NOMINAL_LENGTH": 300}}));
    }
}
