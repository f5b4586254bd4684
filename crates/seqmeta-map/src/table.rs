//! Rule table from classified (source, application, library kit) triples to
//! archive library descriptors.
//!
//! Every rule lists the nodes it admits at each position. When several rules
//! match, the one constraining the most positions (sets without the taxonomy
//! root) wins, and among equally specific rules the later one wins.

use std::sync::OnceLock;

use tracing::debug;

use seqmeta_model::{
    Application, ApplicationAttribute, LibraryKit, LibraryKitAttribute, LibrarySelection,
    LibrarySource, LibraryStrategy, Source, SourceAttribute, TaxonomyNode,
};

use crate::descriptor::{ArchiveLibraryDescriptor, LibraryDesign};
use crate::error::{MappingError, MappingTableError, Result, RuleIssue};

use seqmeta_model::{
    Application as A, LibraryKit as K, LibrarySelection as Sel, LibrarySource as Src,
    LibraryStrategy as Str, Source as S,
};

/// One row of the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule {
    sample_types: &'static [Source],
    applications: &'static [Application],
    library_kits: &'static [LibraryKit],
    descriptor: ArchiveLibraryDescriptor,
}

impl MappingRule {
    pub const fn new(
        sample_types: &'static [Source],
        applications: &'static [Application],
        library_kits: &'static [LibraryKit],
        design: LibraryDesign,
        strategy: LibraryStrategy,
        source: LibrarySource,
        selection: LibrarySelection,
    ) -> Self {
        Self {
            sample_types,
            applications,
            library_kits,
            descriptor: ArchiveLibraryDescriptor::new(design, strategy, source, selection),
        }
    }

    pub fn sample_types(&self) -> &'static [Source] {
        self.sample_types
    }

    pub fn applications(&self) -> &'static [Application] {
        self.applications
    }

    pub fn library_kits(&self) -> &'static [LibraryKit] {
        self.library_kits
    }

    pub fn design(&self) -> LibraryDesign {
        self.descriptor.design()
    }

    pub fn descriptor(&self) -> &ArchiveLibraryDescriptor {
        &self.descriptor
    }

    pub fn matches(&self, sample_type: Source, application: Application, kit: LibraryKit) -> bool {
        self.sample_types.contains(&sample_type)
            && self.applications.contains(&application)
            && self.library_kits.contains(&kit)
    }

    /// Number of positions whose node set excludes the taxonomy root.
    pub fn specificity(&self) -> usize {
        usize::from(!self.sample_types.contains(&Source::ROOT))
            + usize::from(!self.applications.contains(&Application::ROOT))
            + usize::from(!self.library_kits.contains(&LibraryKit::ROOT))
    }

    /// First triple admitted by both rules, if any.
    fn overlap(&self, other: &MappingRule) -> Option<(Source, Application, LibraryKit)> {
        let sample_type = first_shared(self.sample_types, other.sample_types)?;
        let application = first_shared(self.applications, other.applications)?;
        let kit = first_shared(self.library_kits, other.library_kits)?;
        Some((sample_type, application, kit))
    }
}

fn first_shared<N: TaxonomyNode>(left: &[N], right: &[N]) -> Option<N> {
    left.iter().copied().find(|node| right.contains(node))
}

const RNA_SOURCES: &[Source] = &[S::RnaTotal, S::RnaDepleted, S::Unclassified];
const GENOMIC_SOURCES: &[Source] = &[S::DnaGenomic, S::Unclassified];
const CAPTURE_SOURCES: &[Source] = &[S::DnaGenomic, S::DnaHmw, S::Unclassified];
const ANY_KIT: &[LibraryKit] = &[K::Unclassified];

/// The standard rules, in declaration order.
pub const STANDARD_RULES: [MappingRule; 15] = [
    MappingRule::new(
        &[S::Unclassified],
        &[A::Unclassified],
        ANY_KIT,
        LibraryDesign::Unspecified,
        Str::Other,
        Src::Other,
        Sel::Other,
    ),
    MappingRule::new(
        RNA_SOURCES,
        &[A::RnaSeq],
        ANY_KIT,
        LibraryDesign::RnaSeqUnspecified,
        Str::SsRnaSeq,
        Src::Transcriptomic,
        Sel::Unspecified,
    ),
    MappingRule::new(
        RNA_SOURCES,
        &[A::RnaSeq],
        &[K::TranscriptomicMrna],
        LibraryDesign::RnaSeqMrna,
        Str::SsRnaSeq,
        Src::Transcriptomic,
        Sel::PolyA,
    ),
    MappingRule::new(
        RNA_SOURCES,
        &[A::RnaSeq],
        &[K::TranscriptomicTotal],
        LibraryDesign::RnaSeqTotal,
        Str::SsRnaSeq,
        Src::Transcriptomic,
        Sel::InverseRrna,
    ),
    MappingRule::new(
        &[S::WholeInputCells, S::Unclassified],
        &[A::SingleCell],
        ANY_KIT,
        LibraryDesign::SingleCellUnspecified,
        Str::Other,
        Src::Other,
        Sel::Unspecified,
    ),
    MappingRule::new(
        &[S::WholeInputCells, S::Unclassified],
        &[A::SingleCell],
        &[K::TranscriptomicChromium],
        LibraryDesign::SingleCellTranscriptomic,
        Str::SsRnaSeq,
        Src::TranscriptomicSingleCell,
        Sel::PolyA,
    ),
    MappingRule::new(
        &[S::DnaGenomic, S::Immunoprecipitated, S::Unclassified],
        &[A::Epigenetics],
        ANY_KIT,
        LibraryDesign::EpigeneticsUnspecified,
        Str::Other,
        Src::Other,
        Sel::Unspecified,
    ),
    MappingRule::new(
        &[S::Immunoprecipitated, S::Unclassified],
        &[A::Epigenetics],
        &[K::GenomicWholeGenome],
        LibraryDesign::EpigeneticsChipSeq,
        Str::ChipSeq,
        Src::Genomic,
        Sel::Chip,
    ),
    MappingRule::new(
        GENOMIC_SOURCES,
        &[A::Epigenetics],
        &[K::MethylationBisulfite],
        LibraryDesign::EpigeneticsBisulfite,
        Str::BisulfiteSeq,
        Src::Genomic,
        Sel::Random,
    ),
    MappingRule::new(
        CAPTURE_SOURCES,
        &[A::TargetSeq],
        ANY_KIT,
        LibraryDesign::TargetCaptureExomeUnspecified,
        Str::TargetedCapture,
        Src::Genomic,
        Sel::Unspecified,
    ),
    MappingRule::new(
        CAPTURE_SOURCES,
        &[A::TargetSeq],
        &[K::GenomicTarget],
        LibraryDesign::TargetCaptureExomeTwist,
        Str::TargetedCapture,
        Src::Genomic,
        Sel::HybridSelection,
    ),
    MappingRule::new(
        GENOMIC_SOURCES,
        &[A::ReSeq, A::DeNovo],
        &[K::GenomicWholeGenome, K::Unclassified],
        LibraryDesign::WgsUnspecified,
        Str::Wgs,
        Src::Genomic,
        Sel::Random,
    ),
    MappingRule::new(
        GENOMIC_SOURCES,
        &[A::Metagenomics],
        ANY_KIT,
        LibraryDesign::MetagenomicsUnspecified,
        Str::Other,
        Src::Metagenomic,
        Sel::Unspecified,
    ),
    MappingRule::new(
        GENOMIC_SOURCES,
        &[A::Metagenomics],
        &[K::GenomicWholeGenome],
        LibraryDesign::MetagenomicsGenomic,
        Str::Wgs,
        Src::Metagenomic,
        Sel::Random,
    ),
    MappingRule::new(
        &[S::WholeInputSerum, S::Unclassified],
        &[A::Olink],
        &[K::ProteomicOlinkExplore],
        LibraryDesign::OlinkExploreUnspecified,
        Str::Other,
        Src::Other,
        Sel::PadlockProbesCaptureMethod,
    ),
];

static STANDARD: OnceLock<MappingTable> = OnceLock::new();

/// Ordered list of mapping rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    rules: Vec<MappingRule>,
}

impl MappingTable {
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }

    /// The shared standard table.
    pub fn standard() -> &'static MappingTable {
        STANDARD.get_or_init(|| MappingTable::new(STANDARD_RULES.to_vec()))
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// Map classified attributes to the archive descriptor of the most
    /// specific matching rule.
    pub fn map(
        &self,
        sample_type: &SourceAttribute,
        application: &ApplicationAttribute,
        library_kit: &LibraryKitAttribute,
    ) -> Result<ArchiveLibraryDescriptor> {
        self.map_nodes(sample_type.node(), application.node(), library_kit.node())
    }

    pub fn map_nodes(
        &self,
        sample_type: Source,
        application: Application,
        library_kit: LibraryKit,
    ) -> Result<ArchiveLibraryDescriptor> {
        let best = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(sample_type, application, library_kit))
            .max_by_key(|(index, rule)| (rule.specificity(), *index));

        match best {
            Some((index, rule)) => {
                debug!(
                    rule = index + 1,
                    design = %rule.design(),
                    sample_type = sample_type.key(),
                    application = application.key(),
                    library_kit = library_kit.key(),
                    "mapping rule selected"
                );
                Ok(rule.descriptor)
            }
            None => Err(MappingError::NoMatchingRule {
                sample_type: sample_type.key(),
                application: application.key(),
                library_kit: library_kit.key(),
            }),
        }
    }

    /// Report empty positions and equally specific rules that admit a
    /// common triple. Rule numbers in the report are 1-based.
    pub fn validate(&self) -> std::result::Result<(), MappingTableError> {
        let mut issues = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let positions = [
                ("source", rule.sample_types.is_empty()),
                ("application", rule.applications.is_empty()),
                ("library kit", rule.library_kits.is_empty()),
            ];
            for (position, empty) in positions {
                if empty {
                    issues.push(RuleIssue::EmptyPosition {
                        rule: index + 1,
                        design: rule.design().as_str(),
                        position,
                    });
                }
            }
        }

        for (i, first) in self.rules.iter().enumerate() {
            for (j, second) in self.rules.iter().enumerate().skip(i + 1) {
                if first.specificity() != second.specificity() {
                    continue;
                }
                if let Some((sample_type, application, kit)) = first.overlap(second) {
                    issues.push(RuleIssue::AmbiguousRules {
                        first: i + 1,
                        first_design: first.design().as_str(),
                        second: j + 1,
                        second_design: second.design().as_str(),
                        specificity: first.specificity(),
                        sample_type: sample_type.key(),
                        application: application.key(),
                        library_kit: kit.key(),
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(MappingTableError { issues })
        }
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        MappingTable::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specificity_counts_constrained_positions() {
        let specificities: Vec<usize> = STANDARD_RULES.iter().map(MappingRule::specificity).collect();
        assert_eq!(specificities, vec![0, 1, 2, 2, 1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 2]);
    }

    #[test]
    fn test_overlap_requires_every_position() {
        let mrna = STANDARD_RULES[2];
        let total = STANDARD_RULES[3];
        assert_eq!(mrna.overlap(&total), None);
        let rna_any = STANDARD_RULES[1];
        assert_eq!(
            rna_any.overlap(&mrna),
            None,
            "kit sets differ between the generic and the mRNA rule"
        );
    }
}
