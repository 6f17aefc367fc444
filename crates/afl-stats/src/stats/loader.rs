// Stat export loading and header validation.
//
// Reads the comma-delimited AFL player stats export. The header row must name
// every relevant column; extra columns are ignored. Rows that fail to
// deserialize are skipped with a warning rather than aborting the load.

use crate::stats::error::StatsError;
use crate::stats::record::{Metric, PlayerStat, RELEVANT_COLUMNS};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Rows read from a stats export, before any cleaning.
#[derive(Debug, Clone, Default)]
pub struct LoadedStats {
    pub records: Vec<PlayerStat>,
    /// Rows dropped because they could not be parsed.
    pub skipped_rows: usize,
}

/// Columns from [`RELEVANT_COLUMNS`] that do not appear in `headers`.
pub fn missing_columns<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = headers.into_iter().collect();
    RELEVANT_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect()
}

/// Blank out non-finite numbers so `NaN`/`inf` cells are treated as missing.
fn clear_non_finite(stat: &mut PlayerStat) {
    for metric in Metric::ALL {
        let value = stat.metric_mut(metric);
        if value.is_some_and(|v| !v.is_finite()) {
            *value = None;
        }
    }
}

/// Reader-based loader. `origin` only labels errors and log lines.
pub(crate) fn read_stats<R: Read>(rdr: R, origin: &Path) -> Result<LoadedStats, StatsError> {
    let mut reader = csv::Reader::from_reader(rdr);

    let headers = reader.headers().map_err(|e| StatsError::Csv {
        path: origin.to_path_buf(),
        source: e,
    })?;
    let missing = missing_columns(headers.iter());
    if !missing.is_empty() {
        return Err(StatsError::Schema {
            path: origin.to_path_buf(),
            missing,
        });
    }

    let mut loaded = LoadedStats::default();
    for (idx, result) in reader.deserialize::<PlayerStat>().enumerate() {
        match result {
            Ok(mut stat) => {
                clear_non_finite(&mut stat);
                loaded.records.push(stat);
            }
            Err(e) if e.is_io_error() => {
                return Err(StatsError::Csv {
                    path: origin.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                // idx is zero-based over data rows; +2 accounts for the header.
                warn!("skipping malformed stats row {}: {}", idx + 2, e);
                loaded.skipped_rows += 1;
            }
        }
    }

    debug!(
        "read {} rows from {} ({} skipped)",
        loaded.records.len(),
        origin.display(),
        loaded.skipped_rows
    );
    Ok(loaded)
}

/// Load a stats export from disk.
///
/// Fails with [`StatsError::NotFound`] when the file cannot be opened and with
/// [`StatsError::Schema`] when a required column is absent from the header.
pub fn load_stats(path: &Path) -> Result<LoadedStats, StatsError> {
    let file = std::fs::File::open(path).map_err(|e| StatsError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let loaded = read_stats(file, path)?;
    info!("Loaded {} stat rows from {}", loaded.records.len(), path.display());
    if loaded.skipped_rows > 0 {
        warn!(
            "{} malformed rows skipped in {}",
            loaded.skipped_rows,
            path.display()
        );
    }
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
