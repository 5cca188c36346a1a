use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{SearchLimits, DEFAULT_EXCHANGE_RATE, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::engine::DEFAULT_PROMPT_CANDIDATES;

pub const DEFAULT_CONFIG_FILE: &str = "rigwise.toml";
pub const NESTED_CONFIG_FILE: &str = "config/rigwise.toml";

const MAX_CANDIDATE_LIMIT: usize = 100;
const SEARCH_LIMIT_CEILING: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub exchange_rate: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    pub candidate_limit: usize,
    pub search_limit: usize,
    pub max_search_limit: usize,
}

impl EngineConfig {
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits { default_limit: self.search_limit, max_limit: self.max_search_limit }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub candidate_limit: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                data_dir: PathBuf::from("data/components"),
                exchange_rate: DEFAULT_EXCHANGE_RATE,
            },
            engine: EngineConfig {
                candidate_limit: DEFAULT_PROMPT_CANDIDATES,
                search_limit: DEFAULT_SEARCH_LIMIT,
                max_search_limit: MAX_SEARCH_LIMIT,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(data_dir) = catalog.data_dir {
                self.catalog.data_dir = data_dir;
            }
            if let Some(exchange_rate) = catalog.exchange_rate {
                self.catalog.exchange_rate = exchange_rate;
            }
        }

        if let Some(engine) = patch.engine {
            if let Some(candidate_limit) = engine.candidate_limit {
                self.engine.candidate_limit = candidate_limit;
            }
            if let Some(search_limit) = engine.search_limit {
                self.engine.search_limit = search_limit;
            }
            if let Some(max_search_limit) = engine.max_search_limit {
                self.engine.max_search_limit = max_search_limit;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("RIGWISE_CATALOG_DATA_DIR") {
            self.catalog.data_dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("RIGWISE_CATALOG_EXCHANGE_RATE") {
            self.catalog.exchange_rate = parse_decimal("RIGWISE_CATALOG_EXCHANGE_RATE", &value)?;
        }

        if let Some(value) = read_env("RIGWISE_ENGINE_CANDIDATE_LIMIT") {
            self.engine.candidate_limit = parse_usize("RIGWISE_ENGINE_CANDIDATE_LIMIT", &value)?;
        }
        if let Some(value) = read_env("RIGWISE_ENGINE_SEARCH_LIMIT") {
            self.engine.search_limit = parse_usize("RIGWISE_ENGINE_SEARCH_LIMIT", &value)?;
        }
        if let Some(value) = read_env("RIGWISE_ENGINE_MAX_SEARCH_LIMIT") {
            self.engine.max_search_limit =
                parse_usize("RIGWISE_ENGINE_MAX_SEARCH_LIMIT", &value)?;
        }

        let log_level =
            read_env("RIGWISE_LOGGING_LEVEL").or_else(|| read_env("RIGWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("RIGWISE_LOGGING_FORMAT").or_else(|| read_env("RIGWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.catalog.data_dir = data_dir;
        }
        if let Some(candidate_limit) = overrides.candidate_limit {
            self.engine.candidate_limit = candidate_limit;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_engine(&self.engine)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// The file `load` would read, if any.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("catalog.data_dir must not be empty".to_string()));
    }

    if catalog.exchange_rate <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "catalog.exchange_rate must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_engine(engine: &EngineConfig) -> Result<(), ConfigError> {
    if engine.candidate_limit == 0 || engine.candidate_limit > MAX_CANDIDATE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "engine.candidate_limit must be in range 1..={MAX_CANDIDATE_LIMIT}"
        )));
    }

    if engine.max_search_limit == 0 || engine.max_search_limit > SEARCH_LIMIT_CEILING {
        return Err(ConfigError::Validation(format!(
            "engine.max_search_limit must be in range 1..={SEARCH_LIMIT_CEILING}"
        )));
    }

    if engine.search_limit == 0 || engine.search_limit > engine.max_search_limit {
        return Err(ConfigError::Validation(
            "engine.search_limit must be in range 1..=engine.max_search_limit".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| invalid_override(key, value))
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| invalid_override(key, value))
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    engine: Option<EnginePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    data_dir: Option<PathBuf>,
    exchange_rate: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    candidate_limit: Option<usize>,
    search_limit: Option<usize>,
    max_search_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
