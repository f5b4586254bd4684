//! The application, source and library kit taxonomies.
//!
//! Declaration order is search order: within a parent, earlier children are
//! tried first.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::TaxonomyError;
use crate::taxonomy::{ClassifiedAttribute, NodeDecl, Taxonomy, TaxonomyNode};

/// Sequencing application requested for a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Application {
    Unclassified,
    RnaSeq,
    SingleCell,
    Epigenetics,
    TargetSeq,
    DeNovo,
    ReSeq,
    Metagenomics,
    Olink,
}

/// Type of material submitted for library preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Unclassified,
    Rna,
    RnaTotal,
    RnaDepleted,
    Dna,
    DnaGenomic,
    DnaHmw,
    DnaAmplicon,
    Immunoprecipitated,
    WholeInput,
    WholeInputSerum,
    WholeInputCells,
}

/// Library preparation kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryKit {
    Unclassified,
    Transcriptomic,
    TranscriptomicMrna,
    TranscriptomicTotal,
    TranscriptomicChromium,
    Methylation,
    MethylationBisulfite,
    Genomic,
    GenomicWholeGenome,
    GenomicTarget,
    Proteomic,
    ProteomicOlinkExplore,
}

static APPLICATIONS: OnceLock<Taxonomy<Application>> = OnceLock::new();
static SOURCES: OnceLock<Taxonomy<Source>> = OnceLock::new();
static LIBRARY_KITS: OnceLock<Taxonomy<LibraryKit>> = OnceLock::new();

impl TaxonomyNode for Application {
    const TAXONOMY: &'static str = "application";
    const ROOT: Self = Application::Unclassified;
    const DECLARATIONS: &'static [NodeDecl<Self>] = &[
        NodeDecl::root(Application::Unclassified),
        NodeDecl::leaf(Application::RnaSeq, Application::Unclassified, &["rna-seq"]),
        NodeDecl::leaf(
            Application::SingleCell,
            Application::Unclassified,
            &["single-cell"],
        ),
        NodeDecl::leaf(
            Application::Epigenetics,
            Application::Unclassified,
            &["epigenetics", "splat"],
        ),
        NodeDecl::leaf(
            Application::TargetSeq,
            Application::Unclassified,
            &["target re-seq"],
        ),
        NodeDecl::leaf(Application::DeNovo, Application::Unclassified, &["de novo"]),
        NodeDecl::leaf(
            Application::ReSeq,
            Application::Unclassified,
            &["wg re-seq", "wg re-seq human"],
        ),
        NodeDecl::leaf(
            Application::Metagenomics,
            Application::Unclassified,
            &["metagenomics"],
        ),
        NodeDecl::leaf(
            Application::Olink,
            Application::Unclassified,
            &["olink explore"],
        ),
    ];

    fn key(self) -> &'static str {
        match self {
            Application::Unclassified => "APPLICATION",
            Application::RnaSeq => "RNASEQ",
            Application::SingleCell => "SINGLECELL",
            Application::Epigenetics => "EPIGENETICS",
            Application::TargetSeq => "TARGETSEQ",
            Application::DeNovo => "DENOVO",
            Application::ReSeq => "RESEQ",
            Application::Metagenomics => "METAGENOMICS",
            Application::Olink => "OLINK",
        }
    }

    fn standard() -> &'static Taxonomy<Self> {
        APPLICATIONS.get_or_init(|| Taxonomy::new(Self::DECLARATIONS))
    }
}

impl TaxonomyNode for Source {
    const TAXONOMY: &'static str = "source";
    const ROOT: Self = Source::Unclassified;
    const DECLARATIONS: &'static [NodeDecl<Self>] = &[
        NodeDecl::root(Source::Unclassified),
        NodeDecl::group(Source::Rna, Source::Unclassified),
        NodeDecl::leaf(Source::RnaTotal, Source::Rna, &["total RNA"]),
        NodeDecl::leaf(Source::RnaDepleted, Source::Rna, &["rRNA depleted RNA"]),
        NodeDecl::group(Source::Dna, Source::Unclassified),
        NodeDecl::leaf(Source::DnaGenomic, Source::Dna, &["gdna"]),
        NodeDecl::leaf(Source::DnaHmw, Source::Dna, &["hmw dna"]),
        NodeDecl::leaf(Source::DnaAmplicon, Source::Dna, &["amplicon"]),
        NodeDecl::leaf(Source::Immunoprecipitated, Source::Unclassified, &["chip"]),
        NodeDecl::group(Source::WholeInput, Source::Unclassified),
        NodeDecl::leaf(Source::WholeInputSerum, Source::WholeInput, &["serum"]),
        NodeDecl::leaf(Source::WholeInputCells, Source::WholeInput, &["cells/nuclei"]),
    ];

    fn key(self) -> &'static str {
        match self {
            Source::Unclassified => "SOURCE",
            Source::Rna => "RNA",
            Source::RnaTotal => "RNA.TOTAL",
            Source::RnaDepleted => "RNA.DEPLETED",
            Source::Dna => "DNA",
            Source::DnaGenomic => "DNA.GENOMIC",
            Source::DnaHmw => "DNA.HMW",
            Source::DnaAmplicon => "DNA.AMPLICON",
            Source::Immunoprecipitated => "IMMUNOPRECIPITATED",
            Source::WholeInput => "WHOLEINPUT",
            Source::WholeInputSerum => "WHOLEINPUT.SERUM",
            Source::WholeInputCells => "WHOLEINPUT.CELLS",
        }
    }

    fn standard() -> &'static Taxonomy<Self> {
        SOURCES.get_or_init(|| Taxonomy::new(Self::DECLARATIONS))
    }
}

impl TaxonomyNode for LibraryKit {
    const TAXONOMY: &'static str = "library kit";
    const ROOT: Self = LibraryKit::Unclassified;
    const DECLARATIONS: &'static [NodeDecl<Self>] = &[
        NodeDecl::root(LibraryKit::Unclassified),
        NodeDecl::group(LibraryKit::Transcriptomic, LibraryKit::Unclassified),
        NodeDecl::leaf(
            LibraryKit::TranscriptomicMrna,
            LibraryKit::Transcriptomic,
            &[
                "truseq stranded mrna sample preparation kit",
                "truseq stranded mrna sample preparation kit ht",
            ],
        ),
        NodeDecl::leaf(
            LibraryKit::TranscriptomicTotal,
            LibraryKit::Transcriptomic,
            &[
                "truseq stranded total rna (ribo-zero tm gold)",
                "truseq stranded total rna (ribo-zero tm gold) ht",
                "truseq stranded with ribo-zero other",
                "illumina stranded total rna ligation (with ribo-zero plus)",
            ],
        ),
        NodeDecl::leaf(
            LibraryKit::TranscriptomicChromium,
            LibraryKit::Transcriptomic,
            &[
                "Chromium single cell 3\u{2019} Library prep",
                "Chromium single cell 3\u{b4}Library prep",
            ],
        ),
        NodeDecl::group(LibraryKit::Methylation, LibraryKit::Unclassified),
        NodeDecl::leaf(
            LibraryKit::MethylationBisulfite,
            LibraryKit::Methylation,
            &["splat", "nebnext enzymatic methyl-seq kit"],
        ),
        NodeDecl::group(LibraryKit::Genomic, LibraryKit::Unclassified),
        NodeDecl::leaf(
            LibraryKit::GenomicWholeGenome,
            LibraryKit::Genomic,
            &[
                "thruplex smarter dna-seq",
                "thruplex smarter dna-seq kit",
                "truseq dna nano sample preparation kit ht",
                "truseq dna nano sample preparation kit lt",
                "truseq dna pcr-free sample preparation kit ht",
                "truseq dna pcr-free sample preparation kit lt",
                "truseq dna pcr-free",
            ],
        ),
        NodeDecl::leaf(
            LibraryKit::GenomicTarget,
            LibraryKit::Genomic,
            &[
                "twist human core exome",
                "twist human comprehensive exome ef lib kit",
            ],
        ),
        NodeDecl::group(LibraryKit::Proteomic, LibraryKit::Unclassified),
        NodeDecl::leaf(
            LibraryKit::ProteomicOlinkExplore,
            LibraryKit::Proteomic,
            &[
                "olink explore 1536",
                "olink explore 3072",
                "olink explore 384",
                "olink explore ht",
                "explore ht",
            ],
        ),
    ];

    fn key(self) -> &'static str {
        match self {
            LibraryKit::Unclassified => "LIBRARYKIT",
            LibraryKit::Transcriptomic => "TRANSCRIPTOMIC",
            LibraryKit::TranscriptomicMrna => "TRANSCRIPTOMIC.MRNA",
            LibraryKit::TranscriptomicTotal => "TRANSCRIPTOMIC.TOTAL",
            LibraryKit::TranscriptomicChromium => "TRANSCRIPTOMIC.CHROMIUM",
            LibraryKit::Methylation => "METHYLATION",
            LibraryKit::MethylationBisulfite => "METHYLATION.BISULFITE",
            LibraryKit::Genomic => "GENOMIC",
            LibraryKit::GenomicWholeGenome => "GENOMIC.WHOLEGENOME",
            LibraryKit::GenomicTarget => "GENOMIC.TARGET",
            LibraryKit::Proteomic => "PROTEOMIC",
            LibraryKit::ProteomicOlinkExplore => "PROTEOMIC.OLINKEXPLORE",
        }
    }

    fn standard() -> &'static Taxonomy<Self> {
        LIBRARY_KITS.get_or_init(|| Taxonomy::new(Self::DECLARATIONS))
    }
}

macro_rules! node_display_and_parse {
    ($($node:ty),+) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.key())
                }
            }

            impl FromStr for $node {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$node>::standard()
                        .node_by_key(s)
                        .ok_or_else(|| format!("Unknown {} node: {s}", <$node>::TAXONOMY))
                }
            }
        )+
    };
}

node_display_and_parse!(Application, Source, LibraryKit);

pub type ApplicationAttribute = ClassifiedAttribute<Application>;
pub type SourceAttribute = ClassifiedAttribute<Source>;
pub type LibraryKitAttribute = ClassifiedAttribute<LibraryKit>;

/// The three taxonomies used to classify a library, passed around as one
/// piece of configuration.
#[derive(Debug, Clone, Copy)]
pub struct Taxonomies {
    pub application: &'static Taxonomy<Application>,
    pub source: &'static Taxonomy<Source>,
    pub library_kit: &'static Taxonomy<LibraryKit>,
}

impl Taxonomies {
    pub fn standard() -> Self {
        Self {
            application: Application::standard(),
            source: Source::standard(),
            library_kit: LibraryKit::standard(),
        }
    }

    /// Validate all three taxonomies, reporting the first inconsistent one.
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        self.application.validate()?;
        self.source.validate()?;
        self.library_kit.validate()
    }

    pub fn classify_application(&self, label: Option<&str>) -> ApplicationAttribute {
        self.application.classify(label)
    }

    pub fn classify_source(&self, label: Option<&str>) -> SourceAttribute {
        self.source.classify(label)
    }

    pub fn classify_library_kit(&self, label: Option<&str>) -> LibraryKitAttribute {
        self.library_kit.classify(label)
    }
}

impl Default for Taxonomies {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_taxonomies_validate() {
        Taxonomies::standard().validate().expect("standard taxonomies");
    }

    #[test]
    fn test_parse_node_keys() {
        assert_eq!("genomic.target".parse(), Ok(LibraryKit::GenomicTarget));
        assert_eq!("DNA.GENOMIC".parse(), Ok(Source::DnaGenomic));
        assert!("NOT.A.NODE".parse::<Application>().is_err());
    }

    #[test]
    fn test_tree_shape() {
        let sources = Source::standard();
        assert_eq!(sources.len(), 12);
        assert_eq!(
            sources.children(Source::Dna),
            vec![Source::DnaGenomic, Source::DnaHmw, Source::DnaAmplicon]
        );
        assert_eq!(sources.parent(Source::WholeInputCells), Some(Source::WholeInput));
        assert_eq!(sources.depth(Source::WholeInputCells), 2);
        assert_eq!(sources.depth(Source::Unclassified), 0);
    }
}
