// Configuration loading and parsing (config/stats.toml).

use crate::stats::filter::GameFilter;
use crate::stats::record::{Metric, TextField};
use crate::stats::summary::SummaryColumn;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "stats.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data_paths: DataPaths,
    pub filter: GameFilter,
    /// Text columns defaulted to "Unknown" during normalization.
    pub text_defaults: Vec<TextField>,
    pub top_n: usize,
    pub summary_columns: Vec<SummaryColumn>,
}

// ---------------------------------------------------------------------------
// stats.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire stats.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StatsFile {
    data: DataPaths,
    #[serde(default)]
    filter: GameFilter,
    #[serde(default)]
    cleaning: CleaningSection,
    summary: SummarySection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Raw stats export to load.
    pub raw: String,
    /// Destination of the filtered table.
    pub filtered: String,
    /// Destination of the metric summary.
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CleaningSection {
    string_defaults: Vec<String>,
}

impl Default for CleaningSection {
    fn default() -> Self {
        Self {
            string_defaults: TextField::ALL
                .iter()
                .map(|f| f.column().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SummarySection {
    top_n: usize,
    columns: Vec<SummaryColumnEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct SummaryColumnEntry {
    label: String,
    metric: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/stats.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: StatsFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    build(file)
}

/// Ensure `config/stats.toml` exists by copying it from `defaults/` when
/// missing. Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the crate root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    let source = defaults_dir.join(CONFIG_FILE);
    let target = config_dir.join(CONFIG_FILE);
    if !source.is_file() || target.exists() {
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;

    Ok(vec![target])
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures the default config file is copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn build(file: StatsFile) -> Result<Config, ConfigError> {
    let paths = &file.data;
    for (name, value) in [
        ("data.raw", &paths.raw),
        ("data.filtered", &paths.filtered),
        ("data.summary", &paths.summary),
    ] {
        if value.trim().is_empty() {
            return Err(invalid(name, "must not be empty"));
        }
    }

    let mut text_defaults = Vec::with_capacity(file.cleaning.string_defaults.len());
    for column in &file.cleaning.string_defaults {
        let field = TextField::from_column(column).ok_or_else(|| {
            invalid(
                "cleaning.string_defaults",
                format!("`{column}` is not a text column"),
            )
        })?;
        if !text_defaults.contains(&field) {
            text_defaults.push(field);
        }
    }

    if file.summary.top_n == 0 {
        return Err(invalid("summary.top_n", "must be greater than 0"));
    }
    if file.summary.columns.is_empty() {
        return Err(invalid("summary.columns", "at least one column is required"));
    }

    let mut labels = HashSet::new();
    let mut summary_columns = Vec::with_capacity(file.summary.columns.len());
    for entry in &file.summary.columns {
        let label = entry.label.trim();
        if label.is_empty() {
            return Err(invalid("summary.columns.label", "must not be empty"));
        }
        if !labels.insert(label.to_string()) {
            return Err(invalid(
                "summary.columns.label",
                format!("duplicate label `{label}`"),
            ));
        }
        let metric = Metric::from_column(&entry.metric).ok_or_else(|| {
            invalid(
                "summary.columns.metric",
                format!("`{}` is not a numeric column", entry.metric),
            )
        })?;
        summary_columns.push(SummaryColumn::new(label, metric));
    }

    Ok(Config {
        data_paths: file.data,
        filter: file.filter,
        text_defaults,
        top_n: file.summary.top_n,
        summary_columns,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn default_text() -> String {
        fs::read_to_string(crate_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    /// Write `text` as config/stats.toml under a fresh temp dir and load it.
    fn load_text(dir_name: &str, text: &str) -> (PathBuf, Result<Config, ConfigError>) {
        let tmp = std::env::temp_dir().join(dir_name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), text).unwrap();
        let result = load_config_from(&tmp);
        (tmp, result)
    }

    fn expect_validation(result: Result<Config, ConfigError>, expected_field: &str) {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected_field),
            Err(other) => panic!("expected ValidationError, got: {other}"),
            Ok(_) => panic!("expected ValidationError for {expected_field}, got Ok"),
        }
    }

    #[test]
    fn load_default_config() {
        let (tmp, result) = load_text("afl_stats_config_defaults", &default_text());
        let config = result.expect("defaults should be valid");

        assert_eq!(config.data_paths.raw, "data/raw/afl_player_stats_2023_2024.csv");
        assert_eq!(
            config.data_paths.filtered,
            "data/processed/afl_player_stats_filtered.csv"
        );
        assert_eq!(config.data_paths.summary, "data/summary/core_metrics_summary.csv");
        assert_eq!(config.filter.game_id.as_deref(), Some("CD_M20240140002"));
        assert_eq!(config.filter.opponent.as_deref(), Some("Brisbane Lions"));
        assert_eq!(config.text_defaults, TextField::ALL.to_vec());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.summary_columns, SummaryColumn::core_metrics());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn filter_and_cleaning_sections_are_optional() {
        let text = r#"
[data]
raw = "in.csv"
filtered = "out.csv"
summary = "summary.csv"

[summary]
top_n = 5

[[summary.columns]]
label = "Top Tackles"
metric = "tackles"
"#;
        let (tmp, result) = load_text("afl_stats_config_optional", text);
        let config = result.expect("should load without filter/cleaning");
        assert!(config.filter.is_empty());
        assert_eq!(config.text_defaults, TextField::ALL.to_vec());
        assert_eq!(
            config.summary_columns,
            vec![SummaryColumn::new("Top Tackles", Metric::Tackles)]
        );
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_top_n_zero() {
        let text = default_text().replace("top_n = 10", "top_n = 0");
        let (tmp, result) = load_text("afl_stats_config_top_n", &text);
        expect_validation(result, "summary.top_n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_metric() {
        let text = default_text().replace("metric = \"goals\"", "metric = \"Goals\"");
        let (tmp, result) = load_text("afl_stats_config_metric", &text);
        expect_validation(result, "summary.columns.metric");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_duplicate_label() {
        let text = default_text().replace("\"Top Disposals\"", "\"Top Goals\"");
        let (tmp, result) = load_text("afl_stats_config_label", &text);
        expect_validation(result, "summary.columns.label");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_numeric_column_as_string_default() {
        let text = default_text().replace("\"team.name\", ", "\"goals\", ");
        let (tmp, result) = load_text("afl_stats_config_defaults_col", &text);
        expect_validation(result, "cleaning.string_defaults");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_path() {
        let text = default_text().replace(
            "raw = \"data/raw/afl_player_stats_2023_2024.csv\"",
            "raw = \"\"",
        );
        let (tmp, result) = load_text("afl_stats_config_empty_path", &text);
        expect_validation(result, "data.raw");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let (tmp, result) = load_text("afl_stats_config_parse", "[data\nraw = ");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("afl_stats_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("config/stats.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_file() {
        let tmp = std::env::temp_dir().join("afl_stats_config_copy");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), default_text()).unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, vec![tmp.join("config").join(CONFIG_FILE)]);
        assert!(load_config_from(&tmp).is_ok());

        // Second call leaves the existing file alone.
        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("afl_stats_config_skip");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), default_text()).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), "# customised\n").unwrap();

        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        let kept = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(kept, "# customised\n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("afl_stats_config_no_dirs");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }
}
