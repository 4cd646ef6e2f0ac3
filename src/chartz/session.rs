//! The in-memory edit session.
//!
//! An [`EditSession`] holds every staged-but-unflushed cell edit, keyed by
//! (chart id, column key). Staging validates first and records second: a
//! rejected edit returns its [`ValidationError`] without touching the
//! pending map, so whatever was staged for that cell before survives.
//!
//! A chart is "dirty" exactly when it has at least one pending entry; the
//! dirty set is derived from the map, never stored separately. One session
//! spans one loaded batch; a re-scan starts a fresh session.

use crate::columns::{coerce, get_spec, CellValue};
use crate::error::ValidationError;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct EditSession {
    pending: BTreeMap<String, BTreeMap<String, CellValue>>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw edit text for a column and stage it for a chart.
    ///
    /// On success the staged value replaces any earlier value for the same
    /// cell (last write wins) and is returned so the presentation layer can
    /// echo it back into the cell.
    pub fn stage(
        &mut self,
        chart_id: &str,
        column: &str,
        raw: &str,
    ) -> Result<CellValue, ValidationError> {
        let spec =
            get_spec(column).ok_or_else(|| ValidationError::UnknownColumn(column.to_string()))?;
        let value = coerce(spec, raw)?;
        self.pending
            .entry(chart_id.to_string())
            .or_default()
            .insert(column.to_string(), value.clone());
        Ok(value)
    }

    /// Stage a field removal: on flush the key is deleted from the
    /// document rather than written as null.
    pub fn stage_clear(&mut self, chart_id: &str, column: &str) -> Result<(), ValidationError> {
        get_spec(column).ok_or_else(|| ValidationError::UnknownColumn(column.to_string()))?;
        self.pending
            .entry(chart_id.to_string())
            .or_default()
            .insert(column.to_string(), CellValue::Clear);
        Ok(())
    }

    /// The value currently staged for a cell, if any.
    pub fn staged(&self, chart_id: &str, column: &str) -> Option<&CellValue> {
        self.pending.get(chart_id)?.get(column)
    }

    /// Drop a single pending edit.
    pub fn discard(&mut self, chart_id: &str, column: &str) {
        if let Some(cells) = self.pending.get_mut(chart_id) {
            cells.remove(column);
            if cells.is_empty() {
                self.pending.remove(chart_id);
            }
        }
    }

    /// Drop every pending edit.
    pub fn discard_all(&mut self) {
        self.pending.clear();
    }

    /// Drop every pending edit for one chart. Called after the chart
    /// persists successfully.
    pub fn clear_chart(&mut self, chart_id: &str) {
        self.pending.remove(chart_id);
    }

    /// Ids of charts with at least one pending edit, in id order.
    pub fn dirty_ids(&self) -> Vec<String> {
        self.pending.keys().cloned().collect()
    }

    pub fn is_dirty(&self, chart_id: &str) -> bool {
        self.pending.contains_key(chart_id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// All pending edits for one chart, in column-key order.
    pub fn pending_for(&self, chart_id: &str) -> Option<&BTreeMap<String, CellValue>> {
        self.pending.get(chart_id)
    }
}
