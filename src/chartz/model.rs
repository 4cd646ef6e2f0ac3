use crate::error::LoadError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One custom chart: the JSON document from its `song.tmb` plus the
/// directory name it was loaded from.
///
/// The document is kept verbatim. Keys outside the declared column schema
/// (note data, lyrics, background blobs) ride along untouched through the
/// whole edit/persist cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// The chart's directory name. Unique within a batch, never edited.
    pub id: String,
    pub data: Map<String, Value>,
}

impl Chart {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// The outcome of scanning a charts directory: every chart that loaded,
/// plus one entry per directory that didn't.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub charts: BTreeMap<String, Chart>,
    pub errors: Vec<LoadError>,
}
