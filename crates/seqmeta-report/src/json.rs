//! JSON rendering: the canonical map, pretty-printed.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use seqmeta_model::CanonicalMap;

use crate::common::create_output;

pub fn to_json_value<T: CanonicalMap>(value: &T) -> Result<Value> {
    Ok(Value::Object(value.to_map()?))
}

/// Write the canonical map of `value` to `path`, two-space indented.
pub fn write_json_file<T: CanonicalMap>(path: &Path, value: &T) -> Result<()> {
    let json = to_json_value(value)?;
    let mut output = create_output(path)?;
    serde_json::to_writer_pretty(&mut output, &json)
        .with_context(|| format!("write {}", path.display()))?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
