//! Row projection and ordering.
//!
//! Charts are projected into flat [`Row`]s for tabular display: one cell of
//! presented text per registry column, in registry order. A cell presents
//! its staged value when one exists, otherwise the stored value's text, so
//! sorting compares exactly what the user sees.
//!
//! A row's dirty flag is derived from the session at projection time; it is
//! never carried through a reorder as stored row state.

use crate::columns::{position, stored_text, COLUMNS};
use crate::error::ValidationError;
use crate::model::Chart;
use crate::session::EditSession;
use std::collections::BTreeMap;

/// One presentable table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    /// Presented cell text, one entry per [`COLUMNS`] entry, same order.
    pub cells: Vec<String>,
    pub dirty: bool,
}

/// Project loaded charts through the column schema, overlaying staged edits.
///
/// Rows come out in chart-id order; apply [`sort_rows`] afterwards for a
/// column ordering.
pub fn project_rows(charts: &BTreeMap<String, Chart>, session: &EditSession) -> Vec<Row> {
    charts
        .values()
        .map(|chart| {
            let cells = COLUMNS
                .iter()
                .map(|spec| match session.staged(&chart.id, spec.key) {
                    Some(staged) => staged.text(),
                    None => stored_text(chart.value(spec.key)),
                })
                .collect();
            Row {
                id: chart.id.clone(),
                cells,
                dirty: session.is_dirty(&chart.id),
            }
        })
        .collect()
}

/// Which column the table is ordered by, and in which direction.
///
/// Activating the column that is already active flips the direction;
/// activating a different column makes it the sort key, ascending.
#[derive(Debug, Default)]
pub struct SortState {
    column: Option<&'static str>,
    pub descending: bool,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self) -> Option<&'static str> {
        self.column
    }

    /// Header-click semantics: toggle on the active column, reset to
    /// ascending on a new one.
    pub fn activate(&mut self, column: &str) -> Result<(), ValidationError> {
        let spec = crate::columns::get_spec(column)
            .ok_or_else(|| ValidationError::UnknownColumn(column.to_string()))?;
        if self.column == Some(spec.key) {
            self.descending = !self.descending;
        } else {
            self.column = Some(spec.key);
            self.descending = false;
        }
        Ok(())
    }

    /// One-shot selection of a key and direction.
    pub fn set(&mut self, column: &str, descending: bool) -> Result<(), ValidationError> {
        let spec = crate::columns::get_spec(column)
            .ok_or_else(|| ValidationError::UnknownColumn(column.to_string()))?;
        self.column = Some(spec.key);
        self.descending = descending;
        Ok(())
    }
}

/// Stable sort by the presented text of one column.
///
/// Descending order is the exact reverse of the ascending sequence, ties
/// included, so toggling a header twice reverses the visible order.
pub fn sort_rows(rows: &mut [Row], column: &str, descending: bool) -> Result<(), ValidationError> {
    let index =
        position(column).ok_or_else(|| ValidationError::UnknownColumn(column.to_string()))?;
    sort_rows_by_position(rows, index, descending);
    Ok(())
}

pub(crate) fn sort_rows_by_position(rows: &mut [Row], index: usize, descending: bool) {
    rows.sort_by(|a, b| a.cells[index].cmp(&b.cells[index]));
    if descending {
        rows.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart(id: &str, doc: serde_json::Value) -> (String, Chart) {
        let map = match doc {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        };
        (id.to_string(), Chart::new(id, map))
    }

    fn batch(entries: Vec<(String, Chart)>) -> BTreeMap<String, Chart> {
        entries.into_iter().collect()
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|row| row.id.as_str()).collect()
    }

    fn cell<'a>(rows: &'a [Row], id: &str, column: &str) -> &'a str {
        let row = rows.iter().find(|row| row.id == id).unwrap();
        &row.cells[position(column).unwrap()]
    }

    #[test]
    fn projection_presents_stored_values_as_text() {
        let charts = batch(vec![chart(
            "fanfare",
            json!({"name": "Fanfare", "year": 1824, "tempo": 140.0, "bgdata": [1, 2]}),
        )]);
        let rows = project_rows(&charts, &EditSession::new());

        assert_eq!(cell(&rows, "fanfare", "name"), "Fanfare");
        assert_eq!(cell(&rows, "fanfare", "year"), "1824");
        assert_eq!(cell(&rows, "fanfare", "genre"), "");
        assert!(!rows[0].dirty);
    }

    #[test]
    fn staged_edits_overlay_stored_values() {
        let charts = batch(vec![chart("a", json!({"name": "Old", "UNK1": 3}))]);
        let mut session = EditSession::new();
        session.stage("a", "name", "New").unwrap();
        session.stage("a", "UNK1", "").unwrap();

        let rows = project_rows(&charts, &session);
        assert_eq!(cell(&rows, "a", "name"), "New");
        assert_eq!(cell(&rows, "a", "UNK1"), "");
        assert!(rows[0].dirty);
    }

    #[test]
    fn sort_is_stable_and_toggle_reverses_exactly() {
        let charts = batch(vec![
            chart("a", json!({"genre": "Jazz"})),
            chart("b", json!({"genre": "Classical"})),
            chart("c", json!({"genre": "Jazz"})),
            chart("d", json!({"genre": "Ambient"})),
        ]);
        let session = EditSession::new();

        let mut rows = project_rows(&charts, &session);
        sort_rows(&mut rows, "genre", false).unwrap();
        // Equal genres keep id order (stability).
        assert_eq!(ids(&rows), vec!["d", "b", "a", "c"]);

        let ascending = ids(&rows)
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>();
        sort_rows(&mut rows, "genre", true).unwrap();
        let descending = ids(&rows);
        let reversed: Vec<&str> = ascending.iter().rev().map(|s| s.as_str()).collect();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn sort_compares_presented_text_including_pending_edits() {
        let charts = batch(vec![
            chart("a", json!({"name": "Zebra Song"})),
            chart("b", json!({"name": "Aardvark Song"})),
        ]);
        let mut session = EditSession::new();
        session.stage("a", "name", "A Renamed Song").unwrap();

        let mut rows = project_rows(&charts, &session);
        sort_rows(&mut rows, "name", false).unwrap();
        assert_eq!(ids(&rows), vec!["a", "b"]);
    }

    #[test]
    fn dirty_flags_are_recomputed_per_projection() {
        let charts = batch(vec![chart("a", json!({"name": "Song"}))]);
        let mut session = EditSession::new();
        session.stage("a", "name", "Other").unwrap();
        assert!(project_rows(&charts, &session)[0].dirty);

        session.discard("a", "name");
        assert!(!project_rows(&charts, &session)[0].dirty);
    }

    #[test]
    fn sort_state_toggles_on_repeat_activation() {
        let mut sort = SortState::new();
        sort.activate("tempo").unwrap();
        assert_eq!(sort.column(), Some("tempo"));
        assert!(!sort.descending);

        sort.activate("tempo").unwrap();
        assert!(sort.descending);

        // A different column resets to ascending.
        sort.activate("name").unwrap();
        assert_eq!(sort.column(), Some("name"));
        assert!(!sort.descending);
    }

    #[test]
    fn sort_state_rejects_unknown_columns() {
        let mut sort = SortState::new();
        assert!(sort.activate("bgdata").is_err());
        assert_eq!(sort.column(), None);
    }

    #[test]
    fn sorting_by_unknown_column_is_an_error() {
        let mut rows = Vec::new();
        assert!(matches!(
            sort_rows(&mut rows, "nope", false),
            Err(ValidationError::UnknownColumn(_))
        ));
    }
}
