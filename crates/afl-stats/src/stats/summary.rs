// Top-N player rankings and the combined metric summary table.

use crate::stats::record::{Metric, PlayerStat};
use std::collections::BTreeMap;

/// Number of players kept per ranking unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// A player's summed value for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub player_name: String,
    pub total: f64,
}

/// Sum `metric` per player and return the `n` highest totals, descending.
///
/// Players are grouped by [`PlayerStat::player_name`]. Equal totals rank in
/// ascending name order.
pub fn top_players<'a, I>(records: I, metric: Metric, n: usize) -> Vec<RankedPlayer>
where
    I: IntoIterator<Item = &'a PlayerStat>,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for stat in records {
        *totals.entry(stat.player_name()).or_insert(0.0) += stat.metric(metric);
    }

    let mut groups: Vec<RankedPlayer> = totals
        .into_iter()
        .map(|(player_name, total)| RankedPlayer { player_name, total })
        .collect();

    // sort_by is stable, so ties stay in name order.
    groups.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups.truncate(n);
    groups
}

// ---------------------------------------------------------------------------
// Combined summary
// ---------------------------------------------------------------------------

/// One labelled column of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryColumn {
    pub label: String,
    pub metric: Metric,
}

impl SummaryColumn {
    pub fn new(label: impl Into<String>, metric: Metric) -> Self {
        Self {
            label: label.into(),
            metric,
        }
    }

    /// Goals, disposals and metres gained.
    pub fn core_metrics() -> Vec<SummaryColumn> {
        vec![
            SummaryColumn::new("Top Goals", Metric::Goals),
            SummaryColumn::new("Top Disposals", Metric::Disposals),
            SummaryColumn::new("Top Metres Gained", Metric::MetresGained),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub player_name: String,
    /// One value per summary column, in column order.
    pub values: Vec<f64>,
}

/// Top-N rankings for several metrics merged into one table indexed by
/// player name.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub labels: Vec<String>,
    /// Every player present in at least one ranking, sorted by name. A player
    /// missing from a ranking has `0.0` in that column.
    pub rows: Vec<SummaryRow>,
}

impl MetricSummary {
    pub fn build<'a, I>(records: I, columns: &[SummaryColumn], n: usize) -> Self
    where
        I: IntoIterator<Item = &'a PlayerStat> + Clone,
    {
        let mut merged: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (col, column) in columns.iter().enumerate() {
            for ranked in top_players(records.clone(), column.metric, n) {
                let values = merged
                    .entry(ranked.player_name)
                    .or_insert_with(|| vec![0.0; columns.len()]);
                values[col] = ranked.total;
            }
        }

        Self {
            labels: columns.iter().map(|c| c.label.clone()).collect(),
            rows: merged
                .into_iter()
                .map(|(player_name, values)| SummaryRow {
                    player_name,
                    values,
                })
                .collect(),
        }
    }

    /// Value of `label` for `player_name`, if both exist.
    pub fn value(&self, player_name: &str, label: &str) -> Option<f64> {
        let col = self.labels.iter().position(|l| l == label)?;
        self.rows
            .iter()
            .find(|r| r.player_name == player_name)
            .map(|r| r.values[col])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
