use std::path::PathBuf;

use thiserror::Error;

use crate::domain::component::ComponentType;

/// Why a category's dataset could not be read. Never escapes the catalog loader: a failing
/// dataset degrades to an empty catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read `{category}` dataset `{path}`: {source}")]
    ReadDataset { category: ComponentType, path: PathBuf, source: std::io::Error },
    #[error("could not parse `{category}` dataset: {source}")]
    ParseDataset { category: ComponentType, source: serde_json::Error },
    #[error("no dataset registered for `{category}`")]
    Unavailable { category: ComponentType },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generated reply contains no JSON object")]
    MissingJson,
    #[error("generated reply does not match the expected shape: {0}")]
    Schema(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable tag for structured command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Generation(_) => "generation_reply",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Generation(_) => "The generated recommendation could not be understood.",
            Self::Configuration(_) => "The service configuration is invalid.",
        }
    }
}
