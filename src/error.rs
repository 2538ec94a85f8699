//! Error types for the pixiv client.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use crate::cookies::CookieError;
use thiserror::Error;

/// Main error type for session and scraping operations.
#[derive(Error, Debug)]
pub enum PixivError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Client configuration was rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Cookie file could not be loaded
    #[error("Failed to load cookies: {0}")]
    Cookie(#[from] CookieError),

    /// The site did not report a logged-in session
    #[error("Authentication failed for {0}")]
    AuthenticationFailed(String),

    /// The detail page matched none of the known work layouts
    #[error("Unhandled work type for work {0}")]
    UnhandledWorkType(u64),

    /// The required element isn't found in HTML
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// URL parsing or joining failed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Missing required configuration value
    #[error("Missing required config value: {0}")]
    MissingValue(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type alias for library operations.
pub type Result<T, E = PixivError> = std::result::Result<T, E>;
