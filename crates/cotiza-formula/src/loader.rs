//! Load catalog and quotation documents (YAML, JSON or TOML).

use std::path::Path;

use cotiza_core::catalog::{Catalog, Quotation};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FormulaError, Result};

/// Parse a document from a YAML string.
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_yaml::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))
}

/// Parse a document from a JSON string.
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))
}

/// Parse a document from a TOML string.
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))
}

/// Load a document from a file, picking the format by extension.
///
/// Unknown extensions try JSON, then YAML, then TOML; the YAML error is
/// reported if all three fail.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "loading document");
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => parse_yaml(&content),
        Some("json") => parse_json(&content),
        Some("toml") => parse_toml(&content),
        _ => parse_json(&content)
            .or_else(|_| parse_yaml(&content))
            .or_else(|yaml_err| parse_toml(&content).map_err(|_| yaml_err)),
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    load_document(path)
}

pub fn load_quotation(path: &Path) -> Result<Quotation> {
    load_document(path)
}
