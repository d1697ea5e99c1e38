//! Byte sources for PDF documents.
//!
//! The page editor reads its inputs through the [`DocumentSource`] trait so
//! it can work with files on disk or with buffers that are already in memory
//! (uploaded files, test fixtures).
//!
//! ## Available Sources
//!
//! - [`FilesystemSource`]: Reads from the local filesystem
//! - [`InMemorySource`]: Pre-populated in-memory storage

mod filesystem;
mod memory;

pub use filesystem::FilesystemSource;
pub use memory::InMemorySource;

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for document loading operations.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The name resolves outside the directory the source is confined to.
    #[error("Access denied: '{0}' is outside the source directory")]
    Forbidden(String),

    #[error("Failed to load document '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

impl SourceError {
    /// `true` when the document simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Shared document bytes (reference-counted).
pub type SharedDocumentData = Arc<Vec<u8>>;

/// A place documents can be loaded from by name.
pub trait DocumentSource: Send + Sync + Debug {
    /// Load the raw bytes of a document.
    ///
    /// Implementations must return [`SourceError::NotFound`] only when the
    /// name does not resolve to a document.
    fn load(&self, name: &str) -> Result<SharedDocumentData, SourceError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}
