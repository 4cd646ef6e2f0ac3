//! # API Facade
//!
//! [`ChartzApi`] is the single entry point a front end drives: it owns the
//! store, the batch of loaded charts, the edit session, and the sort state,
//! and dispatches operations to the command layer.
//!
//! The facade never prints and never assumes a terminal; it takes plain
//! arguments and returns plain `Result` types, so the same core serves the
//! CLI or any other presentation.
//!
//! ## Generic Over ChartStore
//!
//! `ChartzApi<S: ChartStore>` is generic over the storage backend:
//! - Production: `ChartzApi<FileStore>`
//! - Testing: `ChartzApi<InMemoryStore>`
//!
//! ## Lifecycle
//!
//! `open` scans once; a fatal root failure propagates before any chart is
//! presented. `rescan` reloads the batch and starts a fresh session;
//! pending edits never outlive the batch they were staged against.

use crate::columns::CellValue;
use crate::commands::{self, flush::FlushOutcome, CmdResult};
use crate::error::{ChartzError, LoadError, Result};
use crate::model::Chart;
use crate::rows::SortState;
use crate::session::EditSession;
use crate::store::ChartStore;
use std::collections::BTreeMap;

pub struct ChartzApi<S: ChartStore> {
    store: S,
    charts: BTreeMap<String, Chart>,
    load_errors: Vec<LoadError>,
    session: EditSession,
    sort: SortState,
}

impl<S: ChartStore> ChartzApi<S> {
    /// Scan the store and open an edit session over the result.
    pub fn open(store: S) -> Result<Self> {
        let scan = store.scan()?;
        Ok(Self {
            store,
            charts: scan.charts,
            load_errors: scan.errors,
            session: EditSession::new(),
            sort: SortState::new(),
        })
    }

    /// Reload the batch from the store, dropping all pending edits and the
    /// active sort.
    pub fn rescan(&mut self) -> Result<()> {
        let scan = self.store.scan()?;
        self.charts = scan.charts;
        self.load_errors = scan.errors;
        self.session = EditSession::new();
        self.sort = SortState::new();
        Ok(())
    }

    pub fn charts(&self) -> &BTreeMap<String, Chart> {
        &self.charts
    }

    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.charts.get(id)
    }

    pub fn load_errors(&self) -> &[LoadError] {
        &self.load_errors
    }

    /// Presentable rows under the active sort, with the load report.
    pub fn list(&self) -> CmdResult {
        commands::list::run(&self.charts, &self.load_errors, &self.session, &self.sort)
    }

    /// Header-click sorting: toggles direction on the active column.
    pub fn sort_by(&mut self, column: &str) -> Result<()> {
        self.sort.activate(column)?;
        Ok(())
    }

    /// One-shot sorting with an explicit direction.
    pub fn set_sort(&mut self, column: &str, descending: bool) -> Result<()> {
        self.sort.set(column, descending)?;
        Ok(())
    }

    /// Validate and stage one cell edit, returning the staged value for
    /// the presentation layer to echo.
    pub fn stage(&mut self, chart_id: &str, column: &str, raw: &str) -> Result<CellValue> {
        self.ensure_chart(chart_id)?;
        Ok(self.session.stage(chart_id, column, raw)?)
    }

    /// Stage a field removal for one cell.
    pub fn stage_clear(&mut self, chart_id: &str, column: &str) -> Result<()> {
        self.ensure_chart(chart_id)?;
        self.session.stage_clear(chart_id, column)?;
        Ok(())
    }

    pub fn discard(&mut self, chart_id: &str, column: &str) {
        self.session.discard(chart_id, column);
    }

    pub fn discard_all(&mut self) {
        self.session.discard_all();
    }

    pub fn dirty_ids(&self) -> Vec<String> {
        self.session.dirty_ids()
    }

    /// Reconcile every pending edit onto disk. Successes leave the session;
    /// failures stay dirty and are reported in the outcome.
    pub fn flush(&mut self) -> FlushOutcome {
        let outcome = commands::flush::run(&mut self.store, &mut self.session);
        for (id, doc) in &outcome.persisted {
            if let Some(chart) = self.charts.get_mut(id) {
                chart.data = doc.clone();
            }
        }
        outcome
    }

    /// Re-scan the store and report, without touching the open batch.
    pub fn check(&self) -> Result<CmdResult> {
        commands::check::run(&self.store)
    }

    pub fn export(&self, ids: &[String]) -> Result<CmdResult> {
        commands::export::run(&self.store, ids)
    }

    fn ensure_chart(&self, id: &str) -> Result<()> {
        if self.charts.contains_key(id) {
            Ok(())
        } else {
            Err(ChartzError::Api(format!("No chart named '{}'", id)))
        }
    }
}
