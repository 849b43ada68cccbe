//! Pretty-print a JSON or YAML document.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn execute(path: &Path) -> Result<i32> {
    let document = load_document(path)?;
    println!("{}", plog::try_jsonify(&document)?);
    Ok(0)
}

fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML in {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))?,
        _ => bail!("Unsupported document format: {}", path.display()),
    };

    plog::debugf!("loaded {}", path.display());
    Ok(value)
}
