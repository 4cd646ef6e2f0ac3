//! Aggregated error reporting.
//!
//! Load and persist problems are collected per batch operation and shown
//! once, in an order that is reproducible across runs with the same input.

use crate::error::{LoadError, PersistError, Severity};

/// One line of an aggregated report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReportEntry {
    pub chart_id: String,
    pub severity: Severity,
    pub message: String,
}

/// Merge load and persist errors into one deterministically ordered list,
/// sorted by (chart id, severity, message).
pub fn aggregate(load_errors: &[LoadError], persist_errors: &[PersistError]) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = load_errors
        .iter()
        .map(|e| ReportEntry {
            chart_id: e.chart_id.clone(),
            severity: e.severity,
            message: e.message.clone(),
        })
        .chain(persist_errors.iter().map(|e| ReportEntry {
            chart_id: e.chart_id.clone(),
            severity: Severity::Error,
            message: e.message.clone(),
        }))
        .collect();
    entries.sort();
    entries
}
