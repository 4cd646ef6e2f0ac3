use super::ChartStore;
use crate::error::{ChartzError, Result};
use crate::model::{Chart, ScanResult};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory chart storage for tests.
///
/// Writes to a poisoned chart id fail, so partial-failure flushes can be
/// exercised without a filesystem.
#[derive(Default)]
pub struct InMemoryStore {
    documents: BTreeMap<String, Map<String, Value>>,
    poisoned: BTreeSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, doc: Map<String, Value>) {
        self.documents.insert(id.into(), doc);
    }

    /// Make every subsequent write to `id` fail.
    pub fn poison_writes(&mut self, id: impl Into<String>) {
        self.poisoned.insert(id.into());
    }

    pub fn document(&self, id: &str) -> Option<&Map<String, Value>> {
        self.documents.get(id)
    }
}

impl ChartStore for InMemoryStore {
    fn scan(&self) -> Result<ScanResult> {
        let mut result = ScanResult::default();
        for (id, doc) in &self.documents {
            result
                .charts
                .insert(id.clone(), Chart::new(id.clone(), doc.clone()));
        }
        Ok(result)
    }

    fn read_chart(&self, id: &str) -> Result<Map<String, Value>> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| ChartzError::Store(format!("no such chart: {}", id)))
    }

    fn write_chart(&mut self, id: &str, doc: &Map<String, Value>) -> Result<()> {
        if self.poisoned.contains(id) {
            return Err(ChartzError::Store(format!("write refused for {}", id)));
        }
        self.documents.insert(id.to_string(), doc.clone());
        Ok(())
    }
}
