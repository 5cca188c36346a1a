use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rigwise_core::config::{resolve_config_path, AppConfig, LoadOptions};
use serde::Serialize;
use toml::Value;

use crate::commands::{load_config, CommandResult};

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct ConfigReport {
    config_file: Option<PathBuf>,
    entries: Vec<ConfigEntry>,
}

/// Effective configuration with per-key source attribution (flag > env > file > default).
pub fn run(options: LoadOptions) -> CommandResult {
    let config_file = resolve_config_path(options.config_path.as_deref());
    let flagged = flagged_keys(&options);
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let config_doc = load_config_file_doc(config_file.as_deref());
    let attribution = Attribution {
        doc: config_doc.as_ref(),
        path: config_file.as_deref(),
        flagged: &flagged,
    };

    let report = ConfigReport { entries: entries(&config, &attribution), config_file };
    CommandResult::success_with(COMMAND, "effective configuration", Some(report))
}

fn entries(config: &AppConfig, attribution: &Attribution<'_>) -> Vec<ConfigEntry> {
    vec![
        attribution.entry(
            "catalog.data_dir",
            config.catalog.data_dir.display().to_string(),
            &["RIGWISE_CATALOG_DATA_DIR"],
        ),
        attribution.entry(
            "catalog.exchange_rate",
            config.catalog.exchange_rate.to_string(),
            &["RIGWISE_CATALOG_EXCHANGE_RATE"],
        ),
        attribution.entry(
            "engine.candidate_limit",
            config.engine.candidate_limit.to_string(),
            &["RIGWISE_ENGINE_CANDIDATE_LIMIT"],
        ),
        attribution.entry(
            "engine.search_limit",
            config.engine.search_limit.to_string(),
            &["RIGWISE_ENGINE_SEARCH_LIMIT"],
        ),
        attribution.entry(
            "engine.max_search_limit",
            config.engine.max_search_limit.to_string(),
            &["RIGWISE_ENGINE_MAX_SEARCH_LIMIT"],
        ),
        attribution.entry(
            "logging.level",
            config.logging.level.clone(),
            &["RIGWISE_LOGGING_LEVEL", "RIGWISE_LOG_LEVEL"],
        ),
        attribution.entry(
            "logging.format",
            format!("{:?}", config.logging.format).to_ascii_lowercase(),
            &["RIGWISE_LOGGING_FORMAT", "RIGWISE_LOG_FORMAT"],
        ),
    ]
}

struct Attribution<'a> {
    doc: Option<&'a Value>,
    path: Option<&'a Path>,
    flagged: &'a [&'static str],
}

impl Attribution<'_> {
    fn entry(&self, key: &'static str, value: String, env_keys: &[&str]) -> ConfigEntry {
        ConfigEntry { key, value, source: self.source(key, env_keys) }
    }

    fn source(&self, key_path: &str, env_keys: &[&str]) -> String {
        if self.flagged.iter().any(|flagged| *flagged == key_path) {
            return "cli flag".to_string();
        }

        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn flagged_keys(options: &LoadOptions) -> Vec<&'static str> {
    let overrides = &options.overrides;
    [
        ("catalog.data_dir", overrides.data_dir.is_some()),
        ("engine.candidate_limit", overrides.candidate_limit.is_some()),
        ("logging.level", overrides.log_level.is_some()),
        ("logging.format", overrides.log_format.is_some()),
    ]
    .into_iter()
    .filter_map(|(key, set)| set.then_some(key))
    .collect()
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
