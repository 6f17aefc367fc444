// Stats processor: owns one loaded table and runs the cleaning pipeline.
//
// Lifecycle:
// 1. `new()` records the input and output paths; nothing is read yet.
// 2. `load_data()` loads the export, normalizes blanks, drops duplicates.
// 3. Filtering, rankings and saving operate on the cleaned table and fail
//    with `StatsError::NotLoaded` if step 2 has not run.

use crate::config::Config;
use crate::stats::clean::{deduplicate, normalize};
use crate::stats::filter::{self, GameFilter};
use crate::stats::loader::load_stats;
use crate::stats::record::{Metric, PlayerStat, TextField};
use crate::stats::summary::{self, MetricSummary, RankedPlayer, SummaryColumn};
use crate::stats::writer::write_stats;
use crate::stats::StatsError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Row counts from one `load_data()` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_loaded: usize,
    pub malformed_skipped: usize,
    pub invalid_removed: usize,
    pub duplicates_removed: usize,
    pub rows_kept: usize,
}

#[derive(Debug, Clone)]
pub struct StatsProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    text_defaults: Vec<TextField>,
    records: Option<Vec<PlayerStat>>,
}

impl StatsProcessor {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            text_defaults: TextField::ALL.to_vec(),
            records: None,
        }
    }

    /// Processor reading `data.raw` and saving to `data.filtered`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_paths.raw, &config.data_paths.filtered)
            .with_text_defaults(config.text_defaults.clone())
    }

    /// Override which text columns are defaulted to "Unknown".
    pub fn with_text_defaults(mut self, fields: Vec<TextField>) -> Self {
        self.text_defaults = fields;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// Load, normalize and deduplicate the input file, replacing any table
    /// loaded earlier.
    pub fn load_data(&mut self) -> Result<CleaningReport, StatsError> {
        let loaded = load_stats(&self.input_path)?;
        let mut records = loaded.records;
        let rows_loaded = records.len();

        let invalid_removed = normalize(&mut records, &self.text_defaults);
        let duplicates_removed = deduplicate(&mut records);

        let report = CleaningReport {
            rows_loaded,
            malformed_skipped: loaded.skipped_rows,
            invalid_removed,
            duplicates_removed,
            rows_kept: records.len(),
        };
        info!(
            "Cleaned {}: {} rows kept ({} invalid, {} duplicates removed)",
            self.input_path.display(),
            report.rows_kept,
            report.invalid_removed,
            report.duplicates_removed
        );

        self.records = Some(records);
        Ok(report)
    }

    /// The cleaned table.
    pub fn records(&self) -> Result<&[PlayerStat], StatsError> {
        self.records.as_deref().ok_or(StatsError::NotLoaded)
    }

    /// The first `n` rows of the cleaned table.
    pub fn preview(&self, n: usize) -> Result<&[PlayerStat], StatsError> {
        let records = self.records()?;
        Ok(&records[..n.min(records.len())])
    }

    pub fn filter_stats_by_game(
        &self,
        game_filter: &GameFilter,
    ) -> Result<Vec<&PlayerStat>, StatsError> {
        let rows = filter::filter_by_game(self.records()?, game_filter);
        info!("Filter {:?} matched {} rows", game_filter, rows.len());
        Ok(rows)
    }

    /// Write `rows` to the output path.
    pub fn save_filtered_data(&self, rows: &[&PlayerStat]) -> Result<(), StatsError> {
        if !self.is_loaded() {
            return Err(StatsError::NotLoaded);
        }
        write_stats(&self.output_path, rows.iter().copied())
    }

    pub fn top_players(&self, metric: Metric, n: usize) -> Result<Vec<RankedPlayer>, StatsError> {
        Ok(summary::top_players(self.records()?, metric, n))
    }

    /// Like [`Self::top_players`], naming the metric by its column.
    pub fn top_players_by_column(
        &self,
        column: &str,
        n: usize,
    ) -> Result<Vec<RankedPlayer>, StatsError> {
        let metric =
            Metric::from_column(column).ok_or_else(|| StatsError::UnknownMetric(column.into()))?;
        self.top_players(metric, n)
    }

    pub fn summary(
        &self,
        columns: &[SummaryColumn],
        n: usize,
    ) -> Result<MetricSummary, StatsError> {
        Ok(MetricSummary::build(self.records()?, columns, n))
    }

    /// All rows for `player_name` ("Given Surname") in game `game_id`.
    pub fn player_game_rows(
        &self,
        game_id: &str,
        player_name: &str,
    ) -> Result<Vec<&PlayerStat>, StatsError> {
        Ok(filter::player_game_rows(self.records()?, game_id, player_name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::record::RELEVANT_COLUMNS;
    use std::fs;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/player_stats.csv");

    fn loaded() -> StatsProcessor {
        let mut processor = StatsProcessor::new(FIXTURE, "unused.csv");
        processor.load_data().unwrap();
        processor
    }

    #[test]
    fn load_data_reports_counts() {
        let mut processor = StatsProcessor::new(FIXTURE, "unused.csv");
        assert!(!processor.is_loaded());

        let report = processor.load_data().unwrap();
        assert_eq!(
            report,
            CleaningReport {
                rows_loaded: 5,
                malformed_skipped: 0,
                invalid_removed: 0,
                duplicates_removed: 1,
                rows_kept: 4,
            }
        );
        assert!(processor.is_loaded());
    }

    #[test]
    fn cleaned_table_has_no_blank_metrics_or_names() {
        let processor = loaded();
        let records = processor.records().unwrap();
        for stat in records {
            for metric in Metric::ALL {
                assert!(stat.metric_value(metric).is_some());
            }
            for field in TextField::ALL {
                assert!(stat.text(field).is_some());
            }
        }
        assert!(records.iter().any(|s| s.given_name.as_deref() == Some("Unknown")));
        assert!(records.iter().any(|s| s.team_name.as_deref() == Some("Unknown")));

        let tom = records.iter().find(|s| s.player_name() == "Tom Brown").unwrap();
        assert_eq!(tom.goals, Some(0.0));
        assert_eq!(tom.disposals, Some(15.0));
    }

    #[test]
    fn operations_before_load_fail() {
        let processor = StatsProcessor::new(FIXTURE, "unused.csv");
        assert!(matches!(processor.records(), Err(StatsError::NotLoaded)));
        assert!(matches!(
            processor.filter_stats_by_game(&GameFilter::default()),
            Err(StatsError::NotLoaded)
        ));
        assert!(matches!(
            processor.top_players(Metric::Goals, 10),
            Err(StatsError::NotLoaded)
        ));
        assert!(matches!(
            processor.summary(&SummaryColumn::core_metrics(), 10),
            Err(StatsError::NotLoaded)
        ));
        assert!(matches!(
            processor.save_filtered_data(&[]),
            Err(StatsError::NotLoaded)
        ));
        assert!(matches!(
            processor.player_game_rows("CD_M20240140002", "John Doe"),
            Err(StatsError::NotLoaded)
        ));
    }

    #[test]
    fn missing_input_is_not_found() {
        let mut processor = StatsProcessor::new("non_existent_file.csv", "unused.csv");
        let err = processor.load_data().unwrap_err();
        assert!(matches!(err, StatsError::NotFound { .. }), "got: {err}");
        assert!(!processor.is_loaded());
    }

    #[test]
    fn filter_by_game_and_opponent() {
        let processor = loaded();

        let rows = processor
            .filter_stats_by_game(&GameFilter::game("CD_M20240140002"))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows
            .iter()
            .all(|s| s.provider_id.as_deref() == Some("CD_M20240140002")));

        let rows = processor
            .filter_stats_by_game(&GameFilter::opponent("Carlton"))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|s| s.involves_team("Carlton")));
    }

    #[test]
    fn saved_filter_loads_back_with_same_shape() {
        let tmp = std::env::temp_dir().join("afl_stats_processor_save");
        let _ = fs::remove_dir_all(&tmp);
        let output = tmp.join("processed/filtered.csv");

        let mut processor = StatsProcessor::new(FIXTURE, &output);
        processor.load_data().unwrap();
        let rows = processor
            .filter_stats_by_game(&GameFilter::opponent("Collingwood"))
            .unwrap();
        processor.save_filtered_data(&rows).unwrap();

        assert!(output.is_file());
        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().next(), Some(RELEVANT_COLUMNS.join(",").as_str()));

        let reloaded = load_stats(&output).unwrap();
        assert_eq!(reloaded.records.len(), rows.len());
        let expected: Vec<PlayerStat> = rows.into_iter().cloned().collect();
        assert_eq!(reloaded.records, expected);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn top_players_over_cleaned_table() {
        let processor = loaded();
        let ranked = processor.top_players(Metric::Goals, 10).unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.player_name.as_str()).collect();
        // John Doe's duplicate row was dropped, so his single goal counts once.
        assert_eq!(names, vec!["Unknown Unknown", "Mike Smith", "John Doe", "Tom Brown"]);
        assert_eq!(ranked[2].total, 1.0);

        let by_column = processor.top_players_by_column("goals", 2).unwrap();
        assert_eq!(by_column, ranked[..2].to_vec());

        let err = processor.top_players_by_column("Goals", 2).unwrap_err();
        assert!(matches!(err, StatsError::UnknownMetric(ref c) if c == "Goals"));
    }

    #[test]
    fn summary_over_cleaned_table() {
        let processor = loaded();
        let summary = processor.summary(&SummaryColumn::core_metrics(), 10).unwrap();
        assert_eq!(summary.rows.len(), 4);
        assert_eq!(summary.value("John Doe", "Top Disposals"), Some(10.0));
        assert_eq!(summary.value("Tom Brown", "Top Metres Gained"), Some(0.0));
        assert_eq!(summary.value("Mike Smith", "Top Metres Gained"), Some(350.0));
    }

    #[test]
    fn verification_lookup() {
        let processor = loaded();
        let rows = processor
            .player_game_rows("CD_M20240140002", "John Doe")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].goals, Some(1.0));
    }

    #[test]
    fn preview_is_capped_by_table_size() {
        let processor = loaded();
        assert_eq!(processor.preview(2).unwrap().len(), 2);
        assert_eq!(processor.preview(50).unwrap().len(), 4);
    }

    #[test]
    fn custom_text_defaults_drop_rows_without_identity() {
        let mut processor =
            StatsProcessor::new(FIXTURE, "unused.csv").with_text_defaults(vec![TextField::TeamName]);
        let report = processor.load_data().unwrap();
        assert_eq!(report.invalid_removed, 1);
        assert_eq!(report.rows_kept, 3);
    }
}
