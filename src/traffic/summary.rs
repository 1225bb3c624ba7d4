use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::traffic::capture::lenient_headers;
use crate::traffic::CapturedRequest;

/// The representative transaction kept for one endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EndpointRecord {
    pub method: String,
    pub url: String,
    #[serde(default, deserialize_with = "lenient_headers")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub request_body: Value,
    #[serde(default)]
    pub response: Value,
    #[serde(default)]
    pub timestamp: Value,
}

impl From<&CapturedRequest> for EndpointRecord {
    fn from(capture: &CapturedRequest) -> Self {
        Self {
            method: capture.method.clone(),
            url: capture.url.clone(),
            headers: capture.headers.clone(),
            request_body: capture.body.clone(),
            response: capture.response.clone(),
            timestamp: capture.timestamp.clone(),
        }
    }
}

/// Endpoints keyed by `"<METHOD> <path>"`, in first-seen order.
///
/// Inserting an existing key replaces its record but keeps its position, so
/// the serialized object lists endpoints in the order traffic first hit them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointSummary {
    entries: Vec<(String, EndpointRecord)>,
    index: HashMap<String, usize>,
}

impl EndpointSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record previously stored under `key`, if any.
    pub fn insert(&mut self, key: String, record: EndpointRecord) -> Option<EndpointRecord> {
        match self.index.get(&key).copied() {
            Some(position) => Some(std::mem::replace(&mut self.entries[position].1, record)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&EndpointRecord> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for EndpointSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

struct SummaryVisitor;

impl<'de> Visitor<'de> for SummaryVisitor {
    type Value = EndpointSummary;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of endpoint records keyed by \"<METHOD> <path>\"")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut summary = EndpointSummary::new();
        while let Some((key, record)) = access.next_entry::<String, EndpointRecord>()? {
            summary.insert(key, record);
        }
        Ok(summary)
    }
}

impl<'de> Deserialize<'de> for EndpointSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SummaryVisitor)
    }
}
