//! Error types for tofuref

use thiserror::Error;

/// Result type alias for tofuref operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Registry API errors
///
/// These never reach the UI directly: the cached client turns them into an
/// empty payload after logging.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid registry response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            RegistryError::Network("Failed to connect to registry".to_string())
        } else {
            RegistryError::Network(err.to_string())
        }
    }
}

/// Local cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine the user cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Invalid cache pattern: {0}")]
    Pattern(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoHome,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Invalid navigation requests (selecting things that do not exist)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No provider selected. Pick a provider first.")]
    NoProviderSelected,

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider {provider} has no version {version}")]
    UnknownVersion { provider: String, version: String },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}
