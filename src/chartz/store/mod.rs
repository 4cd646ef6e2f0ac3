//! # Storage Layer
//!
//! This module defines the storage abstraction for chart documents. The
//! [`ChartStore`] trait allows the engine to work with different backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Keep the edit/flush logic **decoupled** from file layout details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One chart per subdirectory of the charts root
//!   - Chart metadata in `song.tmb` (a JSON object) inside each directory
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Per-chart write poisoning for partial-failure tests
//!
//! ## The read-before-write contract
//!
//! A flush never writes from the in-memory copy captured at scan time.
//! [`ChartStore::read_chart`] re-reads the current document so edits merge
//! onto whatever is on disk now, and fields not under edit keep any value
//! they gained out-of-band since the scan.

use crate::error::Result;
use crate::model::ScanResult;
use serde_json::{Map, Value};

pub mod fs;
pub mod memory;

/// Abstract interface for chart document storage.
pub trait ChartStore {
    /// Load every chart under the root. Per-chart problems are collected in
    /// the result; only a failure to enumerate the root itself is an `Err`,
    /// and then no partial batch is returned.
    fn scan(&self) -> Result<ScanResult>;

    /// Read one chart's current document, fresh from the backend.
    fn read_chart(&self, id: &str) -> Result<Map<String, Value>>;

    /// Replace one chart's document wholesale.
    fn write_chart(&mut self, id: &str, doc: &Map<String, Value>) -> Result<()>;
}
