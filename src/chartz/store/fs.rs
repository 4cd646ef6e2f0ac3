use super::ChartStore;
use crate::error::{ChartzError, LoadError, Result};
use crate::model::{Chart, ScanResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// The fixed metadata filename inside each chart directory.
pub const CHART_FILENAME: &str = "song.tmb";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn chart_file(&self, id: &str) -> PathBuf {
        self.root.join(id).join(CHART_FILENAME)
    }

    /// Read and parse one metadata file. The error string carries enough
    /// context to be shown as-is in a report.
    fn read_document(path: &Path) -> std::result::Result<Map<String, Value>, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(format!(
                "{} does not contain a JSON object",
                path.display()
            )),
        }
    }
}

impl ChartStore for FileStore {
    fn scan(&self) -> Result<ScanResult> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            ChartzError::Store(format!(
                "cannot read charts directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut result = ScanResult::default();
        for entry in entries {
            let entry = entry.map_err(ChartzError::Io)?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().into_owned();

            let chart_file = path.join(CHART_FILENAME);
            if !chart_file.exists() {
                result.errors.push(LoadError::warning(
                    &id,
                    format!("no {} file, skipped", CHART_FILENAME),
                ));
                continue;
            }

            match Self::read_document(&chart_file) {
                Ok(doc) => {
                    result.charts.insert(id.clone(), Chart::new(id, doc));
                }
                Err(message) => result.errors.push(LoadError::error(&id, message)),
            }
        }

        Ok(result)
    }

    fn read_chart(&self, id: &str) -> Result<Map<String, Value>> {
        Self::read_document(&self.chart_file(id)).map_err(ChartzError::Store)
    }

    fn write_chart(&mut self, id: &str, doc: &Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(doc).map_err(ChartzError::Serialization)?;
        fs::write(self.chart_file(id), content).map_err(ChartzError::Io)?;
        Ok(())
    }
}
