//! Common error types.

use thiserror::Error;

/// Main error type for the browser shell.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Presence error: {0}")]
    Presence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    pub fn presence(msg: impl Into<String>) -> Self {
        Self::Presence(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
