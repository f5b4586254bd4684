//! Controlled vocabularies of the sequence read archive.
//!
//! Every term has two spellings: the archive *value* written to JSON and XML
//! (e.g. `Targeted-Capture`) and the symbolic *name* used by the manifest and
//! the read submission sheet (e.g. `TARGETED_CAPTURE`). Parsing accepts
//! either spelling, case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

fn parse_term<T: Copy>(
    kind: &str,
    s: &str,
    all: &[T],
    value: impl Fn(T) -> &'static str,
    name: impl Fn(T) -> &'static str,
) -> std::result::Result<T, String> {
    let needle = s.trim();
    all.iter()
        .copied()
        .find(|term| value(*term).eq_ignore_ascii_case(needle) || name(*term).eq_ignore_ascii_case(needle))
        .ok_or_else(|| format!("Unknown {kind}: {s}"))
}

/// Library strategy (`LIBRARY_STRATEGY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LibraryStrategy {
    #[serde(rename = "ssRNA-seq")]
    SsRnaSeq,
    #[serde(rename = "RNA-Seq")]
    RnaSeq,
    #[serde(rename = "ChIP-Seq")]
    ChipSeq,
    #[serde(rename = "Bisulfite-Seq")]
    BisulfiteSeq,
    #[serde(rename = "Targeted-Capture")]
    TargetedCapture,
    #[serde(rename = "WGS")]
    Wgs,
    #[serde(rename = "WXS")]
    Wxs,
    #[serde(rename = "AMPLICON")]
    Amplicon,
    #[serde(rename = "OTHER")]
    Other,
}

impl LibraryStrategy {
    pub const ALL: &'static [LibraryStrategy] = &[
        LibraryStrategy::SsRnaSeq,
        LibraryStrategy::RnaSeq,
        LibraryStrategy::ChipSeq,
        LibraryStrategy::BisulfiteSeq,
        LibraryStrategy::TargetedCapture,
        LibraryStrategy::Wgs,
        LibraryStrategy::Wxs,
        LibraryStrategy::Amplicon,
        LibraryStrategy::Other,
    ];

    /// Archive value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryStrategy::SsRnaSeq => "ssRNA-seq",
            LibraryStrategy::RnaSeq => "RNA-Seq",
            LibraryStrategy::ChipSeq => "ChIP-Seq",
            LibraryStrategy::BisulfiteSeq => "Bisulfite-Seq",
            LibraryStrategy::TargetedCapture => "Targeted-Capture",
            LibraryStrategy::Wgs => "WGS",
            LibraryStrategy::Wxs => "WXS",
            LibraryStrategy::Amplicon => "AMPLICON",
            LibraryStrategy::Other => "OTHER",
        }
    }

    /// Symbolic name.
    pub fn name(&self) -> &'static str {
        match self {
            LibraryStrategy::SsRnaSeq => "SS_RNA_SEQ",
            LibraryStrategy::RnaSeq => "RNA_SEQ",
            LibraryStrategy::ChipSeq => "CH_IP_SEQ",
            LibraryStrategy::BisulfiteSeq => "BISULFITE_SEQ",
            LibraryStrategy::TargetedCapture => "TARGETED_CAPTURE",
            LibraryStrategy::Wgs => "WGS",
            LibraryStrategy::Wxs => "WXS",
            LibraryStrategy::Amplicon => "AMPLICON",
            LibraryStrategy::Other => "OTHER",
        }
    }
}

impl fmt::Display for LibraryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LibraryStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_term("library strategy", s, Self::ALL, |t| t.as_str(), |t| t.name())
    }
}

/// Library source (`LIBRARY_SOURCE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LibrarySource {
    #[serde(rename = "GENOMIC")]
    Genomic,
    #[serde(rename = "TRANSCRIPTOMIC")]
    Transcriptomic,
    #[serde(rename = "TRANSCRIPTOMIC SINGLE CELL")]
    TranscriptomicSingleCell,
    #[serde(rename = "METAGENOMIC")]
    Metagenomic,
    #[serde(rename = "METATRANSCRIPTOMIC")]
    Metatranscriptomic,
    #[serde(rename = "SYNTHETIC")]
    Synthetic,
    #[serde(rename = "OTHER")]
    Other,
}

impl LibrarySource {
    pub const ALL: &'static [LibrarySource] = &[
        LibrarySource::Genomic,
        LibrarySource::Transcriptomic,
        LibrarySource::TranscriptomicSingleCell,
        LibrarySource::Metagenomic,
        LibrarySource::Metatranscriptomic,
        LibrarySource::Synthetic,
        LibrarySource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibrarySource::Genomic => "GENOMIC",
            LibrarySource::Transcriptomic => "TRANSCRIPTOMIC",
            LibrarySource::TranscriptomicSingleCell => "TRANSCRIPTOMIC SINGLE CELL",
            LibrarySource::Metagenomic => "METAGENOMIC",
            LibrarySource::Metatranscriptomic => "METATRANSCRIPTOMIC",
            LibrarySource::Synthetic => "SYNTHETIC",
            LibrarySource::Other => "OTHER",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LibrarySource::TranscriptomicSingleCell => "TRANSCRIPTOMIC_SINGLE_CELL",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for LibrarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LibrarySource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_term("library source", s, Self::ALL, |t| t.as_str(), |t| t.name())
    }
}

/// Library selection (`LIBRARY_SELECTION`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LibrarySelection {
    #[serde(rename = "RANDOM")]
    Random,
    #[serde(rename = "PCR")]
    Pcr,
    #[serde(rename = "PolyA")]
    PolyA,
    #[serde(rename = "Inverse rRNA")]
    InverseRrna,
    #[serde(rename = "ChIP")]
    Chip,
    #[serde(rename = "Hybrid Selection")]
    HybridSelection,
    #[serde(rename = "padlock probes capture method")]
    PadlockProbesCaptureMethod,
    #[serde(rename = "unspecified")]
    Unspecified,
    #[serde(rename = "other")]
    Other,
}

impl LibrarySelection {
    pub const ALL: &'static [LibrarySelection] = &[
        LibrarySelection::Random,
        LibrarySelection::Pcr,
        LibrarySelection::PolyA,
        LibrarySelection::InverseRrna,
        LibrarySelection::Chip,
        LibrarySelection::HybridSelection,
        LibrarySelection::PadlockProbesCaptureMethod,
        LibrarySelection::Unspecified,
        LibrarySelection::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibrarySelection::Random => "RANDOM",
            LibrarySelection::Pcr => "PCR",
            LibrarySelection::PolyA => "PolyA",
            LibrarySelection::InverseRrna => "Inverse rRNA",
            LibrarySelection::Chip => "ChIP",
            LibrarySelection::HybridSelection => "Hybrid Selection",
            LibrarySelection::PadlockProbesCaptureMethod => "padlock probes capture method",
            LibrarySelection::Unspecified => "unspecified",
            LibrarySelection::Other => "other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LibrarySelection::Random => "RANDOM",
            LibrarySelection::Pcr => "PCR",
            LibrarySelection::PolyA => "POLY_A",
            LibrarySelection::InverseRrna => "INVERSE_R_RNA",
            LibrarySelection::Chip => "CH_IP",
            LibrarySelection::HybridSelection => "HYBRID_SELECTION",
            LibrarySelection::PadlockProbesCaptureMethod => "PADLOCK_PROBES_CAPTURE_METHOD",
            LibrarySelection::Unspecified => "UNSPECIFIED",
            LibrarySelection::Other => "OTHER",
        }
    }
}

impl fmt::Display for LibrarySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LibrarySelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_term("library selection", s, Self::ALL, |t| t.as_str(), |t| t.name())
    }
}

/// Illumina instrument model (`INSTRUMENT_MODEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum IlluminaModel {
    #[serde(rename = "Illumina NovaSeq X")]
    NovaSeqX,
    #[serde(rename = "Illumina NovaSeq 6000")]
    NovaSeq6000,
    #[serde(rename = "Illumina MiSeq")]
    MiSeq,
    #[serde(rename = "Illumina iSeq 100")]
    ISeq100,
    #[serde(rename = "HiSeq X Ten")]
    HiSeqXTen,
    #[serde(rename = "Illumina HiSeq 2500")]
    HiSeq2500,
    #[serde(rename = "Illumina HiSeq 2000")]
    HiSeq2000,
    #[serde(rename = "NextSeq 500")]
    NextSeq500,
    #[serde(rename = "unspecified")]
    Unspecified,
}

impl IlluminaModel {
    pub const ALL: &'static [IlluminaModel] = &[
        IlluminaModel::NovaSeqX,
        IlluminaModel::NovaSeq6000,
        IlluminaModel::MiSeq,
        IlluminaModel::ISeq100,
        IlluminaModel::HiSeqXTen,
        IlluminaModel::HiSeq2500,
        IlluminaModel::HiSeq2000,
        IlluminaModel::NextSeq500,
        IlluminaModel::Unspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IlluminaModel::NovaSeqX => "Illumina NovaSeq X",
            IlluminaModel::NovaSeq6000 => "Illumina NovaSeq 6000",
            IlluminaModel::MiSeq => "Illumina MiSeq",
            IlluminaModel::ISeq100 => "Illumina iSeq 100",
            IlluminaModel::HiSeqXTen => "HiSeq X Ten",
            IlluminaModel::HiSeq2500 => "Illumina HiSeq 2500",
            IlluminaModel::HiSeq2000 => "Illumina HiSeq 2000",
            IlluminaModel::NextSeq500 => "NextSeq 500",
            IlluminaModel::Unspecified => "unspecified",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IlluminaModel::NovaSeqX => "ILLUMINA_NOVA_SEQ_X",
            IlluminaModel::NovaSeq6000 => "ILLUMINA_NOVA_SEQ_6000",
            IlluminaModel::MiSeq => "ILLUMINA_MI_SEQ",
            IlluminaModel::ISeq100 => "ILLUMINA_I_SEQ_100",
            IlluminaModel::HiSeqXTen => "HI_SEQ_X_TEN",
            IlluminaModel::HiSeq2500 => "ILLUMINA_HI_SEQ_2500",
            IlluminaModel::HiSeq2000 => "ILLUMINA_HI_SEQ_2000",
            IlluminaModel::NextSeq500 => "NEXT_SEQ_500",
            IlluminaModel::Unspecified => "UNSPECIFIED",
        }
    }

    /// Resolve a neutral platform model name such as `NovaSeqX` or `HiSeq2500`.
    ///
    /// An absent or empty name is `Unspecified`; any other unknown name is an
    /// error.
    pub fn from_model_name(model_name: Option<&str>) -> Result<Self> {
        let needle = model_name.unwrap_or_default().trim().to_lowercase();
        match needle.as_str() {
            "novaseqx" => Ok(IlluminaModel::NovaSeqX),
            "novaseq" => Ok(IlluminaModel::NovaSeq6000),
            "miseq" => Ok(IlluminaModel::MiSeq),
            "iseq" => Ok(IlluminaModel::ISeq100),
            "hiseqx" => Ok(IlluminaModel::HiSeqXTen),
            "hiseq2500" => Ok(IlluminaModel::HiSeq2500),
            "hiseq" => Ok(IlluminaModel::HiSeq2000),
            "nextseq" => Ok(IlluminaModel::NextSeq500),
            "" => Ok(IlluminaModel::Unspecified),
            _ => Err(ModelError::InstrumentModelNotRecognized {
                needle: model_name.unwrap_or_default().to_string(),
            }),
        }
    }
}

impl fmt::Display for IlluminaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IlluminaModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_term("instrument model", s, Self::ALL, |t| t.as_str(), |t| t.name())
    }
}
