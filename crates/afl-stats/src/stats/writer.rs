// CSV output for filtered tables and metric summaries.

use crate::stats::error::StatsError;
use crate::stats::record::{PlayerStat, RELEVANT_COLUMNS};
use crate::stats::summary::MetricSummary;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn create_parent_dirs(path: &Path) -> Result<(), StatsError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| StatsError::Io {
                path: parent.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

fn csv_err(path: &Path, source: csv::Error) -> StatsError {
    if source.is_io_error() {
        StatsError::Io {
            path: path.to_path_buf(),
            source: source.into(),
        }
    } else {
        StatsError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Write stat rows with the relevant-column header. The header is written
/// even when there are no rows so the file can be loaded back.
pub fn write_stats_to<'a, W, I>(wtr: W, rows: I) -> Result<usize, csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a PlayerStat>,
{
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(wtr);
    writer.write_record(RELEVANT_COLUMNS)?;
    let mut count = 0;
    for stat in rows {
        writer.serialize(stat)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write the summary as `player_name,<label>...`, one row per player.
pub fn write_summary_to<W: Write>(wtr: W, summary: &MetricSummary) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    let mut header = Vec::with_capacity(summary.labels.len() + 1);
    header.push("player_name");
    header.extend(summary.labels.iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in &summary.rows {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.player_name.clone());
        record.extend(row.values.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write stat rows to `path`, creating parent directories as needed.
pub fn write_stats<'a, I>(path: &Path, rows: I) -> Result<(), StatsError>
where
    I: IntoIterator<Item = &'a PlayerStat>,
{
    create_parent_dirs(path)?;
    let file = std::fs::File::create(path).map_err(|e| StatsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let count = write_stats_to(file, rows).map_err(|e| csv_err(path, e))?;
    info!("Wrote {} stat rows to {}", count, path.display());
    Ok(())
}

/// Write a metric summary to `path`, creating parent directories as needed.
pub fn write_summary(path: &Path, summary: &MetricSummary) -> Result<(), StatsError> {
    create_parent_dirs(path)?;
    let file = std::fs::File::create(path).map_err(|e| StatsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_summary_to(file, summary).map_err(|e| csv_err(path, e))?;
    info!(
        "Wrote summary of {} players to {}",
        summary.rows.len(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
