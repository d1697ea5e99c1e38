// src/error.rs
use folio_composer::ComposerError;
use folio_source::SourceError;
use thiserror::Error;

/// The error type for every editor operation and the CLI.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Page editing failed: {0}")]
    Composer(#[from] ComposerError),

    #[error("Could not load input: {0}")]
    Source(#[from] SourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for FolioError {
    fn from(e: config::ConfigError) -> Self {
        FolioError::Config(e.to_string())
    }
}

/// Coarse classification of a [`FolioError`], for callers that need to map
/// failures onto status codes or exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IndexOutOfRange,
    LengthMismatch,
    Format,
    Io,
    MissingSource,
    /// A named input resolves outside the directory inputs are confined to.
    Forbidden,
    Config,
    Serialization,
}

impl FolioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolioError::Composer(e) => match e {
                ComposerError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
                ComposerError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
                ComposerError::Format(_) | ComposerError::Pdf(_) => ErrorKind::Format,
                ComposerError::Io(_) => ErrorKind::Io,
            },
            FolioError::Source(SourceError::NotFound(_)) => ErrorKind::MissingSource,
            FolioError::Source(SourceError::Forbidden(_)) => ErrorKind::Forbidden,
            FolioError::Source(SourceError::LoadFailed { .. }) | FolioError::Io(_) => ErrorKind::Io,
            FolioError::Config(_) => ErrorKind::Config,
            FolioError::Json(_) => ErrorKind::Serialization,
        }
    }
}
