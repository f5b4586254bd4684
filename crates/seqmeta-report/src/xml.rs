//! XML rendering of experiment and run sets.
//!
//! Element order follows the archive's submission schema: `TITLE`,
//! `STUDY_REF`, `DESIGN`, `PLATFORM` for experiments and `TITLE`,
//! `EXPERIMENT_REF`, `DATA_BLOCK`, `RUN_ATTRIBUTES` for runs.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use seqmeta_model::archive::{
    Attribute, Experiment, ExperimentSet, Library, LibraryLayout, Platform, ResultFile, Run,
    RunSet,
};

use crate::common::{create_output, write_reference, write_text_element};

/// Render an experiment set as an `EXPERIMENT_SET` document.
pub fn experiment_set_xml(experiments: &ExperimentSet) -> Result<String> {
    let mut buffer = Vec::new();
    write_experiment_set_xml(&mut buffer, experiments)?;
    String::from_utf8(buffer).context("experiment set XML is not UTF-8")
}

/// Render a run set as a `RUN_SET` document.
pub fn run_set_xml(runs: &RunSet) -> Result<String> {
    let mut buffer = Vec::new();
    write_run_set_xml(&mut buffer, runs)?;
    String::from_utf8(buffer).context("run set XML is not UTF-8")
}

pub fn write_experiment_set_xml<W: Write>(writer: W, experiments: &ExperimentSet) -> Result<()> {
    let mut xml = start_document(writer)?;
    xml.write_event(Event::Start(BytesStart::new("EXPERIMENT_SET")))?;
    for experiment in &experiments.experiments {
        write_experiment(&mut xml, experiment)?;
    }
    xml.write_event(Event::End(BytesEnd::new("EXPERIMENT_SET")))?;
    finish_document(xml)
}

pub fn write_run_set_xml<W: Write>(writer: W, runs: &RunSet) -> Result<()> {
    let mut xml = start_document(writer)?;
    xml.write_event(Event::Start(BytesStart::new("RUN_SET")))?;
    for run in &runs.runs {
        write_run(&mut xml, run)?;
    }
    xml.write_event(Event::End(BytesEnd::new("RUN_SET")))?;
    finish_document(xml)
}

pub fn write_experiment_set_file(path: &Path, experiments: &ExperimentSet) -> Result<()> {
    let output = create_output(path)?;
    write_experiment_set_xml(output, experiments).with_context(|| format!("write {}", path.display()))
}

pub fn write_run_set_file(path: &Path, runs: &RunSet) -> Result<()> {
    let output = create_output(path)?;
    write_run_set_xml(output, runs).with_context(|| format!("write {}", path.display()))
}

fn start_document<W: Write>(writer: W) -> Result<Writer<W>> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(xml)
}

fn finish_document<W: Write>(xml: Writer<W>) -> Result<()> {
    let mut inner = xml.into_inner();
    inner.write_all(b"\n")?;
    inner.flush()?;
    Ok(())
}

fn write_experiment<W: Write>(xml: &mut Writer<W>, experiment: &Experiment) -> Result<()> {
    let mut node = BytesStart::new("EXPERIMENT");
    node.push_attribute(("alias", experiment.alias.as_str()));
    xml.write_event(Event::Start(node))?;
    write_text_element(xml, "TITLE", &experiment.title)?;
    write_reference(xml, "STUDY_REF", &experiment.study_ref.refname)?;
    write_design(xml, &experiment.design)?;
    write_platform(xml, &experiment.platform)?;
    xml.write_event(Event::End(BytesEnd::new("EXPERIMENT")))?;
    Ok(())
}

fn write_design<W: Write>(xml: &mut Writer<W>, library: &Library) -> Result<()> {
    let descriptor = &library.library_descriptor;
    xml.write_event(Event::Start(BytesStart::new("DESIGN")))?;
    if let Some(description) = library.design_description.as_deref() {
        write_text_element(xml, "DESIGN_DESCRIPTION", description)?;
    }
    write_reference(xml, "SAMPLE_DESCRIPTOR", &library.sample_descriptor.refname)?;

    xml.write_event(Event::Start(BytesStart::new("LIBRARY_DESCRIPTOR")))?;
    write_text_element(xml, "LIBRARY_STRATEGY", descriptor.strategy.as_str())?;
    write_text_element(xml, "LIBRARY_SOURCE", descriptor.source.as_str())?;
    write_text_element(xml, "LIBRARY_SELECTION", descriptor.selection.as_str())?;
    xml.write_event(Event::Start(BytesStart::new("LIBRARY_LAYOUT")))?;
    let mut layout = BytesStart::new(descriptor.layout.kind());
    if let LibraryLayout::Paired {
        nominal_length: Some(length),
    } = descriptor.layout
    {
        let length_text = length.to_string();
        layout.push_attribute(("NOMINAL_LENGTH", length_text.as_str()));
    }
    xml.write_event(Event::Empty(layout))?;
    xml.write_event(Event::End(BytesEnd::new("LIBRARY_LAYOUT")))?;
    if let Some(protocol) = descriptor.construction_protocol.as_deref() {
        write_text_element(xml, "LIBRARY_CONSTRUCTION_PROTOCOL", protocol)?;
    }
    xml.write_event(Event::End(BytesEnd::new("LIBRARY_DESCRIPTOR")))?;

    xml.write_event(Event::End(BytesEnd::new("DESIGN")))?;
    Ok(())
}

fn write_platform<W: Write>(xml: &mut Writer<W>, platform: &Platform) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("PLATFORM")))?;
    xml.write_event(Event::Start(BytesStart::new(platform.platform_name())))?;
    write_text_element(xml, "INSTRUMENT_MODEL", platform.instrument_model())?;
    xml.write_event(Event::End(BytesEnd::new(platform.platform_name())))?;
    xml.write_event(Event::End(BytesEnd::new("PLATFORM")))?;
    Ok(())
}

fn write_run<W: Write>(xml: &mut Writer<W>, run: &Run) -> Result<()> {
    let run_date = run.formatted_run_date();
    let mut node = BytesStart::new("RUN");
    node.push_attribute(("center_name", run.center_name()));
    node.push_attribute(("run_date", run_date.as_str()));
    node.push_attribute(("run_center", run.run_center.as_str()));
    xml.write_event(Event::Start(node))?;
    write_text_element(xml, "TITLE", &run.title)?;
    write_reference(xml, "EXPERIMENT_REF", &run.experiment_ref.refname)?;

    xml.write_event(Event::Start(BytesStart::new("DATA_BLOCK")))?;
    xml.write_event(Event::Start(BytesStart::new("FILES")))?;
    for file in &run.files {
        write_file(xml, file)?;
    }
    xml.write_event(Event::End(BytesEnd::new("FILES")))?;
    xml.write_event(Event::End(BytesEnd::new("DATA_BLOCK")))?;

    if !run.run_attributes.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("RUN_ATTRIBUTES")))?;
        for attribute in &run.run_attributes {
            write_attribute(xml, attribute)?;
        }
        xml.write_event(Event::End(BytesEnd::new("RUN_ATTRIBUTES")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("RUN")))?;
    Ok(())
}

fn write_file<W: Write>(xml: &mut Writer<W>, file: &ResultFile) -> Result<()> {
    let mut node = BytesStart::new("FILE");
    node.push_attribute(("filename", file.filename.as_str()));
    node.push_attribute(("filetype", file.filetype.as_str()));
    if let Some(method) = file.checksum_method.as_deref() {
        node.push_attribute(("checksum_method", method));
    }
    if let Some(checksum) = file.checksum.as_deref() {
        node.push_attribute(("checksum", checksum));
    }
    xml.write_event(Event::Empty(node))?;
    Ok(())
}

fn write_attribute<W: Write>(xml: &mut Writer<W>, attribute: &Attribute) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("RUN_ATTRIBUTE")))?;
    write_text_element(xml, "TAG", &attribute.tag)?;
    if let Some(value) = attribute.value.as_deref() {
        write_text_element(xml, "VALUE", value)?;
    }
    if let Some(units) = attribute.units.as_deref() {
        write_text_element(xml, "UNITS", units)?;
    }
    xml.write_event(Event::End(BytesEnd::new("RUN_ATTRIBUTE")))?;
    Ok(())
}
