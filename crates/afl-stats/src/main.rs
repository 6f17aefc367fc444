// AFL stats pipeline entry point.
//
// Run sequence:
// 1. Initialize tracing (stderr)
// 2. Load config
// 3. Load, normalize and deduplicate the raw export
// 4. Filter by game/opponent and save the filtered table
// 5. Rank the filtered rows per metric and save the summary

use afl_stats::config;
use afl_stats::processor::StatsProcessor;
use afl_stats::stats::summary::{self, MetricSummary};
use afl_stats::stats::writer;

use anyhow::Context;
use std::path::Path;
use tracing::{info, warn};

/// Rows logged as a sample after filtering.
const PREVIEW_ROWS: usize = 5;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("AFL stats pipeline starting");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: raw={}, top_n={}, {} summary columns",
        config.data_paths.raw,
        config.top_n,
        config.summary_columns.len()
    );

    // 3. Load and clean
    let mut processor = StatsProcessor::from_config(&config);
    let report = processor
        .load_data()
        .with_context(|| format!("failed to load {}", processor.input_path().display()))?;
    info!(
        "Loaded {} rows, kept {} ({} malformed, {} invalid, {} duplicates)",
        report.rows_loaded,
        report.rows_kept,
        report.malformed_skipped,
        report.invalid_removed,
        report.duplicates_removed
    );

    // 4. Filter and save
    let filtered = processor
        .filter_stats_by_game(&config.filter)
        .context("failed to filter stats")?;
    if filtered.is_empty() {
        warn!("Filter {:?} matched no rows", config.filter);
    }
    for stat in filtered.iter().take(PREVIEW_ROWS) {
        info!(
            "  {} | {} | {} v {} | goals={} disposals={}",
            stat.provider_id.as_deref().unwrap_or("-"),
            stat.player_name(),
            stat.home_team_name.as_deref().unwrap_or("-"),
            stat.away_team_name.as_deref().unwrap_or("-"),
            stat.goals.unwrap_or_default(),
            stat.disposals.unwrap_or_default()
        );
    }
    processor
        .save_filtered_data(&filtered)
        .context("failed to save filtered stats")?;
    info!(
        "Saved {} filtered rows to {}",
        filtered.len(),
        processor.output_path().display()
    );

    // 5. Summarize the filtered rows
    let metric_summary = MetricSummary::build(
        filtered.iter().copied(),
        &config.summary_columns,
        config.top_n,
    );
    for column in &config.summary_columns {
        let ranked = summary::top_players(filtered.iter().copied(), column.metric, config.top_n);
        info!("{}:", column.label);
        for (rank, player) in ranked.iter().enumerate() {
            info!("  {:>2}. {} ({})", rank + 1, player.player_name, player.total);
        }
    }
    writer::write_summary(Path::new(&config.data_paths.summary), &metric_summary)
        .context("failed to save metric summary")?;

    info!("AFL stats pipeline finished");
    Ok(())
}

/// Initialize tracing to stderr, filtered by `RUST_LOG` when set.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("afl_stats=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
