use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrafficError {
    #[error("Cannot read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Cannot write {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Malformed JSON in {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Cannot encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One transaction from a proxy capture. Every field is optional in the
/// capture file and defaults to its empty value. The timestamp is kept
/// as whatever JSON the capture tool wrote.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CapturedRequest {
    pub method: String,
    pub url: String,
    #[serde(deserialize_with = "lenient_headers")]
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub response: Value,
    pub timestamp: Value,
}

impl Default for CapturedRequest {
    fn default() -> Self {
        Self {
            method: String::new(),
            url: String::new(),
            headers: BTreeMap::new(),
            body: Value::Object(Default::default()),
            response: Value::Object(Default::default()),
            timestamp: Value::String(String::new()),
        }
    }
}

impl CapturedRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Header maps as capture tools write them: `null` is an empty map and
/// non-string values are kept in their JSON text form.
pub(crate) fn lenient_headers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => (name, value),
            other => (name, other.to_string()),
        })
        .collect())
}

/// Reads a capture file holding a JSON array of transactions.
pub fn load_captures(path: impl AsRef<Path>) -> Result<Vec<CapturedRequest>, TrafficError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| TrafficError::Read(path.to_path_buf(), e))?;
    let captures: Vec<CapturedRequest> =
        serde_json::from_str(&content).map_err(|e| TrafficError::Parse(path.to_path_buf(), e))?;
    log::debug!("Loaded {} captured requests from {}", captures.len(), path.display());
    Ok(captures)
}
