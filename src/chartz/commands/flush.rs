use crate::columns::CellValue;
use crate::commands::{report_messages, CmdMessage, CmdResult};
use crate::error::PersistError;
use crate::report;
use crate::session::EditSession;
use crate::store::ChartStore;
use serde_json::{Map, Value};

/// What a reconciliation pass did.
#[derive(Debug, Default)]
pub struct FlushOutcome {
    /// Charts that persisted, with the merged document each one now holds
    /// on disk.
    pub persisted: Vec<(String, Map<String, Value>)>,
    /// Charts that failed and stayed dirty.
    pub errors: Vec<PersistError>,
}

/// Merge every dirty chart's staged edits onto its on-disk document.
///
/// Charts are processed independently, in id order. Each one is re-read
/// from the store first, so fields not under edit keep whatever value they
/// have on disk now, even if it changed after the scan. A chart that fails
/// to read, parse, or write gets a [`PersistError`] and keeps its pending
/// edits for a retry; the pass continues with the next chart. An empty
/// session writes nothing.
pub fn run<S: ChartStore>(store: &mut S, session: &mut EditSession) -> FlushOutcome {
    let mut outcome = FlushOutcome::default();

    for id in session.dirty_ids() {
        let mut doc = match store.read_chart(&id) {
            Ok(doc) => doc,
            Err(e) => {
                outcome.errors.push(PersistError::new(&id, e.to_string()));
                continue;
            }
        };

        let Some(pending) = session.pending_for(&id) else {
            continue;
        };
        for (column, cell) in pending {
            match cell {
                CellValue::Clear => {
                    doc.remove(column);
                }
                CellValue::Set(value) => {
                    doc.insert(column.clone(), value.to_json());
                }
            }
        }

        if let Err(e) = store.write_chart(&id, &doc) {
            outcome.errors.push(PersistError::new(&id, e.to_string()));
            continue;
        }

        session.clear_chart(&id);
        outcome.persisted.push((id, doc));
    }

    outcome
}

/// Render a flush outcome as printable messages.
pub fn report(outcome: &FlushOutcome) -> CmdResult {
    let mut result = CmdResult::default()
        .with_affected(outcome.persisted.iter().map(|(id, _)| id.clone()).collect());

    if outcome.persisted.is_empty() && outcome.errors.is_empty() {
        result.add_message(CmdMessage::info("Nothing to save."));
        return result;
    }

    if !outcome.persisted.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "Saved {} chart(s).",
            outcome.persisted.len()
        )));
    }
    for message in report_messages(&report::aggregate(&[], &outcome.errors)) {
        result.add_message(message);
    }
    if !outcome.errors.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} chart(s) failed to save and stay pending.",
            outcome.errors.len()
        )));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn store_with(id: &str, value: serde_json::Value) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.insert(id, doc(value));
        store
    }

    #[test]
    fn merges_staged_edits_onto_the_document() {
        let mut store = store_with("waltz", json!({"name": "Old", "year": 1999}));
        let mut session = EditSession::new();
        session.stage("waltz", "name", "New Name").unwrap();
        session.stage("waltz", "difficulty", "7").unwrap();

        let outcome = run(&mut store, &mut session);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.persisted.len(), 1);

        let saved = store.document("waltz").unwrap();
        assert_eq!(saved["name"], json!("New Name"));
        assert_eq!(saved["difficulty"], json!(7));
        assert_eq!(saved["year"], json!(1999));
        assert!(session.is_empty());
    }

    #[test]
    fn clear_removes_the_key_without_writing_null() {
        let mut store = store_with("waltz", json!({"name": "Song", "UNK1": 3}));
        let mut session = EditSession::new();
        session.stage("waltz", "UNK1", "").unwrap();

        run(&mut store, &mut session);

        let saved = store.document("waltz").unwrap();
        assert!(!saved.contains_key("UNK1"));
        assert_eq!(saved["name"], json!("Song"));
    }

    #[test]
    fn unknown_fields_survive_the_cycle() {
        let mut store = store_with(
            "waltz",
            json!({"name": "Song", "notes": [[0, 1, 2]], "bgdata": {"blob": true}}),
        );
        let mut session = EditSession::new();
        session.stage("waltz", "name", "Renamed").unwrap();

        run(&mut store, &mut session);

        let saved = store.document("waltz").unwrap();
        assert_eq!(saved["notes"], json!([[0, 1, 2]]));
        assert_eq!(saved["bgdata"], json!({"blob": true}));
    }

    #[test]
    fn out_of_band_changes_to_unedited_fields_survive() {
        let mut store = store_with("waltz", json!({"name": "Song", "tempo": 120}));
        let mut session = EditSession::new();
        session.stage("waltz", "name", "Renamed").unwrap();

        // Simulates an external edit landing between scan and flush.
        store.insert("waltz", doc(json!({"name": "Song", "tempo": 999})));

        run(&mut store, &mut session);

        let saved = store.document("waltz").unwrap();
        assert_eq!(saved["tempo"], json!(999));
        assert_eq!(saved["name"], json!("Renamed"));
    }

    #[test]
    fn one_failure_does_not_block_other_charts() {
        let mut store = InMemoryStore::new();
        store.insert("good", doc(json!({"name": "Good"})));
        store.insert("bad", doc(json!({"name": "Bad"})));
        store.poison_writes("bad");

        let mut session = EditSession::new();
        session.stage("bad", "name", "Changed").unwrap();
        session.stage("good", "name", "Changed").unwrap();

        let outcome = run(&mut store, &mut session);

        assert_eq!(outcome.persisted.len(), 1);
        assert_eq!(outcome.persisted[0].0, "good");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].chart_id, "bad");

        // The failed chart stays dirty for a retry; the saved one is clean.
        assert!(session.is_dirty("bad"));
        assert!(!session.is_dirty("good"));
    }

    #[test]
    fn missing_chart_reports_and_stays_dirty() {
        let mut store = InMemoryStore::new();
        let mut session = EditSession::new();
        session.stage("ghost", "name", "X").unwrap();

        let outcome = run(&mut store, &mut session);
        assert_eq!(outcome.errors.len(), 1);
        assert!(session.is_dirty("ghost"));
    }

    #[test]
    fn empty_session_performs_zero_writes() {
        let mut store = store_with("waltz", json!({"name": "Song"}));
        // Any write at all would fail loudly.
        store.poison_writes("waltz");

        let outcome = run(&mut store, &mut EditSession::new());
        assert!(outcome.persisted.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn report_mentions_successes_and_failures() {
        let outcome = FlushOutcome {
            persisted: vec![("a".to_string(), Map::new())],
            errors: vec![PersistError::new("b", "write refused for b")],
        };
        let result = report(&outcome);
        assert_eq!(result.affected, vec!["a".to_string()]);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Saved 1 chart(s)")));
        assert!(result.messages.iter().any(|m| m.content.contains("b:")));
    }
}
