//! Archive library descriptors produced by the mapping table.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use seqmeta_model::{LibrarySelection, LibrarySource, LibraryStrategy};

/// Named library design, one per mapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum LibraryDesign {
    Unspecified,
    RnaSeqUnspecified,
    RnaSeqMrna,
    RnaSeqTotal,
    SingleCellUnspecified,
    SingleCellTranscriptomic,
    EpigeneticsUnspecified,
    EpigeneticsChipSeq,
    EpigeneticsBisulfite,
    TargetCaptureExomeUnspecified,
    TargetCaptureExomeTwist,
    WgsUnspecified,
    MetagenomicsUnspecified,
    MetagenomicsGenomic,
    OlinkExploreUnspecified,
}

impl LibraryDesign {
    pub const ALL: [LibraryDesign; 15] = [
        LibraryDesign::Unspecified,
        LibraryDesign::RnaSeqUnspecified,
        LibraryDesign::RnaSeqMrna,
        LibraryDesign::RnaSeqTotal,
        LibraryDesign::SingleCellUnspecified,
        LibraryDesign::SingleCellTranscriptomic,
        LibraryDesign::EpigeneticsUnspecified,
        LibraryDesign::EpigeneticsChipSeq,
        LibraryDesign::EpigeneticsBisulfite,
        LibraryDesign::TargetCaptureExomeUnspecified,
        LibraryDesign::TargetCaptureExomeTwist,
        LibraryDesign::WgsUnspecified,
        LibraryDesign::MetagenomicsUnspecified,
        LibraryDesign::MetagenomicsGenomic,
        LibraryDesign::OlinkExploreUnspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryDesign::Unspecified => "Unspecified",
            LibraryDesign::RnaSeqUnspecified => "RNASeq.Unspecified",
            LibraryDesign::RnaSeqMrna => "RNASeq.MRNA",
            LibraryDesign::RnaSeqTotal => "RNASeq.Total",
            LibraryDesign::SingleCellUnspecified => "SingleCell.Unspecified",
            LibraryDesign::SingleCellTranscriptomic => "SingleCell.Transcriptomic",
            LibraryDesign::EpigeneticsUnspecified => "Epigenetics.Unspecified",
            LibraryDesign::EpigeneticsChipSeq => "Epigenetics.ChIPSeq",
            LibraryDesign::EpigeneticsBisulfite => "Epigenetics.Bisulfite",
            LibraryDesign::TargetCaptureExomeUnspecified => "TargetCaptureExome.Unspecified",
            LibraryDesign::TargetCaptureExomeTwist => "TargetCaptureExome.Twist",
            LibraryDesign::WgsUnspecified => "WGS.Unspecified",
            LibraryDesign::MetagenomicsUnspecified => "Metagenomics.Unspecified",
            LibraryDesign::MetagenomicsGenomic => "Metagenomics.Genomic",
            LibraryDesign::OlinkExploreUnspecified => "OLinkExplore.Unspecified",
        }
    }
}

impl From<LibraryDesign> for &'static str {
    fn from(design: LibraryDesign) -> Self {
        design.as_str()
    }
}

impl fmt::Display for LibraryDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryDesign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LibraryDesign::ALL
            .into_iter()
            .find(|design| design.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown library design: {s}"))
    }
}

/// Strategy, source and selection the archive expects for one library design.
///
/// Descriptors are only handed out by [`crate::MappingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArchiveLibraryDescriptor {
    design: LibraryDesign,
    strategy: LibraryStrategy,
    source: LibrarySource,
    selection: LibrarySelection,
}

impl ArchiveLibraryDescriptor {
    pub(crate) const fn new(
        design: LibraryDesign,
        strategy: LibraryStrategy,
        source: LibrarySource,
        selection: LibrarySelection,
    ) -> Self {
        Self {
            design,
            strategy,
            source,
            selection,
        }
    }

    pub fn design(&self) -> LibraryDesign {
        self.design
    }

    pub fn strategy(&self) -> LibraryStrategy {
        self.strategy
    }

    pub fn source(&self) -> LibrarySource {
        self.source
    }

    pub fn selection(&self) -> LibrarySelection {
        self.selection
    }
}

impl fmt::Display for ArchiveLibraryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.design, self.strategy, self.source, self.selection
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_names_parse_back() {
        for design in LibraryDesign::ALL {
            assert_eq!(design.as_str().parse::<LibraryDesign>(), Ok(design));
        }
        assert_eq!(
            "targetcaptureexome.twist".parse::<LibraryDesign>(),
            Ok(LibraryDesign::TargetCaptureExomeTwist)
        );
        assert!("Exome".parse::<LibraryDesign>().is_err());
    }

    #[test]
    fn test_descriptor_display() {
        let descriptor = ArchiveLibraryDescriptor::new(
            LibraryDesign::RnaSeqMrna,
            LibraryStrategy::SsRnaSeq,
            LibrarySource::Transcriptomic,
            LibrarySelection::PolyA,
        );
        assert_eq!(
            descriptor.to_string(),
            "RNASeq.MRNA (ssRNA-seq, TRANSCRIPTOMIC, PolyA)"
        );
    }
}
