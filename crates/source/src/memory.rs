use crate::{DocumentSource, SharedDocumentData, SourceError};
use std::collections::HashMap;
use std::sync::Arc;

/// An in-memory document source, filled up front with
/// [`InMemorySource::with_document`].
///
/// This is the natural home for uploaded buffers that never touch the disk.
#[derive(Debug, Default)]
pub struct InMemorySource {
    documents: HashMap<String, SharedDocumentData>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document under `name`, replacing any previous one.
    pub fn with_document(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.documents.insert(name.into(), Arc::new(data));
        self
    }
}

impl DocumentSource for InMemorySource {
    fn load(&self, name: &str) -> Result<SharedDocumentData, SourceError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemorySource"
    }
}
