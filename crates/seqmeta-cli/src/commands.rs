use std::fmt;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info_span;

use seqmeta_core::default_registry;
use seqmeta_map::MappingTable;
use seqmeta_model::{Taxonomy, TaxonomyNode};
use seqmeta_report::{ExportFormat, ExportOptions};

use seqmeta_cli::pipeline::{export_submission, extract_lims, output_dir_or_current};
use seqmeta_cli::types::{ExportResult, ExtractResult};

use crate::cli::{ExportArgs, ExportFormatArg, ExtractLimsArgs, TaxonomyArg, TaxonomyArgs};
use crate::summary::{apply_table_style, header_cell, node_list};

pub fn run_extract_lims(args: &ExtractLimsArgs) -> Result<ExtractResult> {
    let span = info_span!("extract_lims", input = %args.input.display());
    let _guard = span.enter();
    let output_dir = output_dir_or_current(args.outdir.as_deref());
    extract_lims(default_registry(), &args.input, &output_dir)
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let output_dir = output_dir_or_current(args.outdir.as_deref());
    let mut options = ExportOptions::new(output_dir).with_dry_run(args.dry_run);
    if !args.formats.is_empty() {
        options = options.with_formats(args.formats.iter().copied().map(export_format));
    }
    if let Some(center) = &args.run_center {
        options = options.with_run_center(center);
    }
    export_submission(default_registry(), &args.flowcell, &args.experiments, &options)
}

pub fn run_taxonomy(args: &TaxonomyArgs) -> Result<()> {
    let taxonomies = default_registry().taxonomies();
    let table = match args.taxonomy {
        TaxonomyArg::Application => taxonomy_table(taxonomies.application),
        TaxonomyArg::Source => taxonomy_table(taxonomies.source),
        TaxonomyArg::LibraryKit => taxonomy_table(taxonomies.library_kit),
    };
    println!("{table}");
    Ok(())
}

pub fn run_mapping() -> Result<()> {
    let mapping_table = MappingTable::standard();
    mapping_table
        .validate()
        .context("standard mapping table is inconsistent")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Design"),
        header_cell("Sample types"),
        header_cell("Applications"),
        header_cell("Library kits"),
        header_cell("Strategy"),
        header_cell("Source"),
        header_cell("Selection"),
    ]);
    apply_table_style(&mut table);
    for rule in mapping_table.rules() {
        let descriptor = rule.descriptor();
        table.add_row(vec![
            Cell::new(descriptor.design()),
            node_list(rule.sample_types()),
            node_list(rule.applications()),
            node_list(rule.library_kits()),
            Cell::new(descriptor.strategy()),
            Cell::new(descriptor.source()),
            Cell::new(descriptor.selection()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn taxonomy_table<N: TaxonomyNode + fmt::Display>(taxonomy: &Taxonomy<N>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(taxonomy.name()), header_cell("Synonyms")]);
    apply_table_style(&mut table);
    let mut pending = vec![taxonomy.root()];
    while let Some(node) = pending.pop() {
        let indent = "  ".repeat(taxonomy.depth(node));
        table.add_row(vec![
            Cell::new(format!("{indent}{node}")),
            Cell::new(taxonomy.synonyms(node).join(", ")),
        ]);
        pending.extend(taxonomy.children(node).into_iter().rev());
    }
    table
}

fn export_format(format: ExportFormatArg) -> ExportFormat {
    match format {
        ExportFormatArg::Xml => ExportFormat::Xml,
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Manifest => ExportFormat::Manifest,
        ExportFormatArg::Tsv => ExportFormat::Tsv,
    }
}
