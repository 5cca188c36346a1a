pub mod components;
pub mod config;
pub mod doctor;
pub mod metrics;
pub mod recommend;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use rigwise_core::config::{AppConfig, LoadOptions};
use rigwise_core::{ApplicationError, Catalog, DirectorySource, RecommendationEngine};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome<T> {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with::<()>(command, message, None)
    }

    pub fn success_with<T: Serialize>(
        command: &str,
        message: impl Into<String>,
        data: Option<T>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(&payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome::<()> {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }

    pub fn from_application_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => EXIT_CONFIG,
            ApplicationError::Domain(_) | ApplicationError::Generation(_) => EXIT_INPUT,
        };
        Self::failure(command, error.error_class(), error.to_string(), exit_code)
    }
}

fn serialize_payload<T: Serialize>(payload: &CommandOutcome<T>) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"{}\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            escape_json(&payload.command),
            escape_json(&error.to_string())
        )
    })
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub(crate) fn load_config(command: &str, options: LoadOptions) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    })
}

pub(crate) fn open_engine(config: &AppConfig) -> RecommendationEngine<DirectorySource> {
    let catalog = Catalog::with_exchange_rate(
        DirectorySource::new(&config.catalog.data_dir),
        config.catalog.exchange_rate,
    );
    RecommendationEngine::new(Arc::new(catalog))
        .with_candidate_limit(config.engine.candidate_limit)
        .with_search_limits(config.engine.search_limits())
}

pub(crate) fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read `{}`", path.display()))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).with_context(|| format!("could not decode `{}`", path.display()))
}

pub(crate) fn input_failure(command: &str, error: anyhow::Error) -> CommandResult {
    CommandResult::failure(command, "invalid_input", format!("{error:#}"), EXIT_INPUT)
}
