//! Error types for relnote.

use thiserror::Error;

/// Main error type for relnote operations.
#[derive(Error, Debug)]
pub enum RelnoteError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("{which} PR #{number} was not found among merged pull requests")]
    BoundaryNotFound { which: &'static str, number: u64 },

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using RelnoteError
pub type Result<T> = std::result::Result<T, RelnoteError>;

impl RelnoteError {
    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    pub fn boundary_not_found(which: &'static str, number: u64) -> Self {
        Self::BoundaryNotFound { which, number }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for RelnoteError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
