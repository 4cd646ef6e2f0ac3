use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ChartzError, Result};
use crate::model::Chart;
use crate::store::ChartStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;

/// Pack chart documents into a timestamped tar.gz in the working directory.
///
/// With no ids given, every loadable chart is exported; otherwise each
/// named chart must exist.
pub fn run<S: ChartStore>(store: &S, ids: &[String]) -> Result<CmdResult> {
    let charts = resolve_charts(store, ids)?;

    if charts.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No charts to export."));
        return Ok(result);
    }

    let now = Utc::now();
    let filename = format!("chartz-{}.tar.gz", now.format("%Y-%m-%d_%H%M%S"));
    let file = File::create(&filename).map_err(ChartzError::Io)?;
    write_archive(file, &charts)?;

    let mut result =
        CmdResult::default().with_affected(charts.iter().map(|c| c.id.clone()).collect());
    result.add_message(CmdMessage::success(format!(
        "Exported {} chart(s) to {}",
        charts.len(),
        filename
    )));
    Ok(result)
}

fn resolve_charts<S: ChartStore>(store: &S, ids: &[String]) -> Result<Vec<Chart>> {
    let mut scan = store.scan()?;
    if ids.is_empty() {
        return Ok(scan.charts.into_values().collect());
    }
    ids.iter()
        .map(|id| {
            scan.charts
                .remove(id)
                .ok_or_else(|| ChartzError::Api(format!("No chart named '{}'", id)))
        })
        .collect()
}

fn write_archive<W: Write>(writer: W, charts: &[Chart]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for chart in charts {
        let content =
            serde_json::to_string_pretty(&chart.data).map_err(ChartzError::Serialization)?;
        let entry_name = format!("charts/{}/song.tmb", chart.id);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(ChartzError::Io)?;
    }

    tar.finish().map_err(ChartzError::Io)?;
    Ok(())
}
