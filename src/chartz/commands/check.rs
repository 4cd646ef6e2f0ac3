use crate::commands::{report_messages, CmdMessage, CmdResult};
use crate::error::Result;
use crate::report;
use crate::store::ChartStore;

/// Scan the charts directory and report what loaded and what didn't,
/// without touching anything.
pub fn run<S: ChartStore>(store: &S) -> Result<CmdResult> {
    let scan = store.scan()?;
    let mut result = CmdResult::default();

    if scan.errors.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "All {} chart(s) loaded cleanly.",
            scan.charts.len()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} chart(s) loaded, {} problem(s):",
            scan.charts.len(),
            scan.errors.len()
        )));
        for message in report_messages(&report::aggregate(&scan.errors, &[])) {
            result.add_message(message);
        }
    }

    Ok(result)
}
