// Missing-value normalization and duplicate removal.

use crate::stats::record::{Metric, PlayerStat, TextField, UNKNOWN};
use std::collections::HashSet;
use tracing::info;

/// Fill blank cells and drop rows with no identity at all.
///
/// Every blank metric becomes `0.0` and every blank field listed in
/// `text_defaults` becomes [`UNKNOWN`]. Afterwards any row whose `providerId`,
/// given name and surname are all still blank is removed. Returns the number
/// of rows removed.
pub fn normalize(records: &mut Vec<PlayerStat>, text_defaults: &[TextField]) -> usize {
    for stat in records.iter_mut() {
        for metric in Metric::ALL {
            let value = stat.metric_mut(metric);
            if value.is_none() {
                *value = Some(0.0);
            }
        }
        for &field in text_defaults {
            let value = stat.text_mut(field);
            if value.is_none() {
                *value = Some(UNKNOWN.to_string());
            }
        }
    }

    let before = records.len();
    records.retain(|stat| {
        stat.provider_id.is_some() || stat.given_name.is_some() || stat.surname.is_some()
    });
    let removed = before - records.len();
    info!("Normalized {} rows, removed {} invalid rows", records.len(), removed);
    removed
}

/// Key identifying one player's appearance in one game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub provider_id: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub utc_start_time: Option<String>,
}

impl DedupKey {
    pub fn of(stat: &PlayerStat) -> Self {
        Self {
            provider_id: stat.provider_id.clone(),
            given_name: stat.given_name.clone(),
            surname: stat.surname.clone(),
            utc_start_time: stat.utc_start_time.clone(),
        }
    }
}

/// Keep the first row for each [`DedupKey`], preserving order. Returns the
/// number of duplicates removed.
pub fn deduplicate(records: &mut Vec<PlayerStat>) -> usize {
    let before = records.len();
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(before);
    records.retain(|stat| seen.insert(DedupKey::of(stat)));
    let removed = before - records.len();
    info!("Removed {} duplicate rows", removed);
    removed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
