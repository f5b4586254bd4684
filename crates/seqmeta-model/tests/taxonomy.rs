#![allow(missing_docs)]

use std::sync::OnceLock;

use proptest::prelude::*;
use seqmeta_model::{
    Application, CanonicalMap, LibraryKit, LibraryKitAttribute, NodeDecl, Source, Taxonomy,
    TaxonomyIssue, TaxonomyNode,
};

fn declared_synonyms<N: TaxonomyNode>() -> Vec<(N, &'static str)> {
    N::DECLARATIONS
        .iter()
        .flat_map(|decl| decl.synonyms.iter().map(move |synonym| (decl.node, *synonym)))
        .collect()
}

fn assert_table<N: TaxonomyNode>(cases: &[(&str, N)]) {
    for (label, expected) in cases {
        let classified = N::standard().classify(Some(*label));
        assert_eq!(
            classified.node(),
            *expected,
            "{} label '{label}' classified as {}",
            N::TAXONOMY,
            classified.node().key()
        );
    }
}

fn assert_synonyms_classify_to_declaring_node<N: TaxonomyNode>() {
    for (node, synonym) in declared_synonyms::<N>() {
        assert_eq!(
            N::standard().classify(Some(synonym)).node(),
            node,
            "{} synonym '{synonym}'",
            N::TAXONOMY
        );
    }
}

#[test]
fn test_every_synonym_classifies_to_its_node() {
    assert_synonyms_classify_to_declaring_node::<Application>();
    assert_synonyms_classify_to_declaring_node::<Source>();
    assert_synonyms_classify_to_declaring_node::<LibraryKit>();
}

#[test]
fn test_absent_and_empty_labels_are_unclassified() {
    assert!(Application::standard().classify(None).is_unclassified());
    assert!(Application::standard().classify(Some("")).is_unclassified());
    assert!(Source::standard().classify(None).is_unclassified());
    assert!(Source::standard().classify(Some("")).is_unclassified());
    assert!(LibraryKit::standard().classify(None).is_unclassified());
    assert!(LibraryKit::standard().classify(Some("")).is_unclassified());
    assert!(LibraryKit::standard().classify(Some(" - ")).is_unclassified());
}

#[test]
fn test_unclassified_keeps_raw_label() {
    let classified = LibraryKit::standard().classify(Some("Zymo - Seq RRBS Library Kit"));
    assert_eq!(classified.node(), LibraryKit::Unclassified);
    assert_eq!(classified.label(), Some("Zymo - Seq RRBS Library Kit"));
    assert_eq!(classified.to_string(), "Zymo - Seq RRBS Library Kit");
}

#[test]
fn test_application_labels() {
    assert_table(&[
        ("Epigenetics", Application::Epigenetics),
        ("Metagenomics", Application::Metagenomics),
        ("Olink Explore", Application::Olink),
        ("Other", Application::Unclassified),
        ("Ready-made library", Application::Unclassified),
        ("RML- Epigenetics", Application::Epigenetics),
        ("RML- Metagenomics", Application::Metagenomics),
        ("RML- Other", Application::Unclassified),
        ("RML- RNA-seq", Application::RnaSeq),
        ("RML- Single cell", Application::SingleCell),
        ("RML- Target re-seq", Application::TargetSeq),
        ("RML- WG re-seq", Application::ReSeq),
        ("RML- WG re-seq Human", Application::ReSeq),
        ("RNA-seq", Application::RnaSeq),
        ("Single cell", Application::SingleCell),
        ("SPLAT", Application::Epigenetics),
        ("Target re-seq", Application::TargetSeq),
        ("WG re-seq", Application::ReSeq),
        ("WG re-seq Human", Application::ReSeq),
        ("de novo", Application::DeNovo),
    ]);
}

#[test]
fn test_source_labels() {
    assert_table(&[
        ("gDNA", Source::DnaGenomic),
        ("ChIP", Source::Immunoprecipitated),
        ("Ready-made library", Source::Unclassified),
        ("Serum", Source::WholeInputSerum),
        ("Amplicon", Source::DnaAmplicon),
        ("total RNA", Source::RnaTotal),
        ("rRNA depleted RNA", Source::RnaDepleted),
        ("cells / nuclei", Source::WholeInputCells),
        ("HMW DNA", Source::DnaHmw),
    ]);
}

#[test]
fn test_library_kit_labels() {
    assert_table(&[
        (
            "Chromium single cell 3\u{2019} Library prep",
            LibraryKit::TranscriptomicChromium,
        ),
        (
            "Chromium single cell 3\u{b4}Library prep",
            LibraryKit::TranscriptomicChromium,
        ),
        ("custom", LibraryKit::Unclassified),
        ("Explore HT", LibraryKit::ProteomicOlinkExplore),
        (
            "Illumina Stranded Total RNA Ligation(with Ribo-Zero Plus)",
            LibraryKit::TranscriptomicTotal,
        ),
        (
            "NEBNext Enzymatic Methyl-seq kit",
            LibraryKit::MethylationBisulfite,
        ),
        ("Olink Explore 1536", LibraryKit::ProteomicOlinkExplore),
        ("Olink Explore 3072", LibraryKit::ProteomicOlinkExplore),
        ("Olink Explore 384", LibraryKit::ProteomicOlinkExplore),
        ("RML", LibraryKit::Unclassified),
        ("SPLAT", LibraryKit::MethylationBisulfite),
        ("ThruPLEX DNA - Seq Kit", LibraryKit::Unclassified),
        ("ThruPLEX SMARTer DNA - seq", LibraryKit::GenomicWholeGenome),
        (
            "TruSeq DNA Nano Sample Preparation kit HT",
            LibraryKit::GenomicWholeGenome,
        ),
        ("TruSeq DNA PCR - free", LibraryKit::GenomicWholeGenome),
        (
            "TruSeq DNA PCR - Free Sample Preparation kit HT",
            LibraryKit::GenomicWholeGenome,
        ),
        (
            "TruSeq stranded mRNA Sample Preparation kit",
            LibraryKit::TranscriptomicMrna,
        ),
        (
            "TruSeq stranded mRNA Sample Preparation kit HT",
            LibraryKit::TranscriptomicMrna,
        ),
        (
            "TruSeq stranded Total RNA(Ribo - zero TM Gold)",
            LibraryKit::TranscriptomicTotal,
        ),
        (
            "Twist Human Comprehensive Exome EF lib kit",
            LibraryKit::GenomicTarget,
        ),
        ("Twist Human Core Exome", LibraryKit::GenomicTarget),
        ("Zymo - Seq RRBS Library Kit", LibraryKit::Unclassified),
    ]);
}

#[test]
fn test_grouping_nodes_never_match() {
    assert!(Source::standard().classify(Some("DNA")).is_unclassified());
    assert!(LibraryKit::standard().classify(Some("GENOMIC")).is_unclassified());
}

#[test]
fn test_equality_ignores_label() {
    let kits = LibraryKit::standard();
    assert_eq!(
        kits.classify(Some("Twist Human Core Exome")),
        kits.classify(Some("twist human comprehensive exome ef lib kit"))
    );
    assert_ne!(
        kits.classify(Some("Twist Human Core Exome")),
        kits.classify(Some("TruSeq DNA PCR-free"))
    );
}

#[test]
fn test_classified_attribute_canonical_map() {
    let kit = LibraryKit::standard().classify(Some("Twist Human Core Exome"));
    let map = kit.to_map().unwrap();
    assert_eq!(
        serde_json::Value::Object(map.clone()),
        serde_json::json!({"description": "Twist Human Core Exome"})
    );
    let parsed = LibraryKitAttribute::from_map(map).unwrap();
    assert_eq!(parsed, kit);
    assert_eq!(parsed.label(), Some("Twist Human Core Exome"));

    let absent = LibraryKit::standard().classify(None);
    assert!(absent.to_map().unwrap().is_empty());
    assert!(
        LibraryKitAttribute::from_map(serde_json::Map::new())
            .unwrap()
            .is_unclassified()
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Broken {
    Root,
    Left,
    Right,
    Orphan,
}

static BROKEN: OnceLock<Taxonomy<Broken>> = OnceLock::new();

impl TaxonomyNode for Broken {
    const TAXONOMY: &'static str = "broken";
    const ROOT: Self = Broken::Root;
    const DECLARATIONS: &'static [NodeDecl<Self>] = &[
        NodeDecl::root(Broken::Root),
        NodeDecl::leaf(Broken::Left, Broken::Root, &["same-name"]),
        NodeDecl::leaf(Broken::Right, Broken::Root, &["Same Name", ""]),
        NodeDecl::root(Broken::Orphan),
    ];

    fn key(self) -> &'static str {
        match self {
            Broken::Root => "ROOT",
            Broken::Left => "LEFT",
            Broken::Right => "RIGHT",
            Broken::Orphan => "ORPHAN",
        }
    }

    fn standard() -> &'static Taxonomy<Self> {
        BROKEN.get_or_init(|| Taxonomy::new(Self::DECLARATIONS))
    }
}

#[test]
fn test_validate_reports_table_defects() {
    let error = Broken::standard().validate().unwrap_err();
    assert_eq!(error.taxonomy, "broken");
    assert!(error.issues.contains(&TaxonomyIssue::DuplicateSynonym {
        synonym: "samename".to_string(),
        first: "LEFT",
        second: "RIGHT",
    }));
    assert!(error.issues.contains(&TaxonomyIssue::BlankSynonym { node: "RIGHT" }));
    assert!(error.issues.contains(&TaxonomyIssue::ExtraRoot { node: "ORPHAN" }));

    // the first declared child still wins
    assert_eq!(
        Broken::standard().classify(Some("same name")).node(),
        Broken::Left
    );
}

fn mangle(synonym: &str, case_mask: u64, separators: &[(usize, bool)]) -> String {
    let mut chars: Vec<char> = synonym
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if case_mask & (1 << (i % 64)) != 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();
    for (position, hyphen) in separators {
        let at = position % (chars.len() + 1);
        chars.insert(at, if *hyphen { '-' } else { ' ' });
    }
    chars.into_iter().collect()
}

proptest! {
    /// Case and separator noise never changes the classification.
    #[test]
    fn prop_kit_synonym_noise_is_ignored(
        index in 0usize..64,
        case_mask in any::<u64>(),
        separators in proptest::collection::vec((0usize..80, any::<bool>()), 0..4),
    ) {
        let synonyms = declared_synonyms::<LibraryKit>();
        let (node, synonym) = synonyms[index % synonyms.len()];
        let label = mangle(synonym, case_mask, &separators);
        prop_assert_eq!(LibraryKit::standard().classify(Some(label.as_str())).node(), node);
    }

    /// Classification is total: any label yields some node.
    #[test]
    fn prop_source_classification_never_fails(label in ".{0,40}") {
        let classified = Source::standard().classify(Some(label.as_str()));
        prop_assert_eq!(classified.label(), Some(label.as_str()));
    }
}
