use crate::commands::{report_messages, CmdResult};
use crate::error::LoadError;
use crate::model::Chart;
use crate::report;
use crate::rows::{project_rows, sort_rows, SortState};
use crate::session::EditSession;
use std::collections::BTreeMap;

/// Project the loaded batch into presentable rows, ordered by the active
/// sort state, with the batch's load report attached.
pub fn run(
    charts: &BTreeMap<String, Chart>,
    load_errors: &[LoadError],
    session: &EditSession,
    sort: &SortState,
) -> CmdResult {
    let mut rows = project_rows(charts, session);
    if let Some(column) = sort.column() {
        // The sort state only ever holds registry keys.
        let _ = sort_rows(&mut rows, column, sort.descending);
    }

    let mut result = CmdResult::default().with_rows(rows);
    for message in report_messages(&report::aggregate(load_errors, &[])) {
        result.add_message(message);
    }
    result
}
