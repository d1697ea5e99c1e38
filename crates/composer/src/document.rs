//! The loaded-document model: an ordered list of page handles over a parsed
//! `lopdf::Document`.

use crate::error::ComposerError;
use lopdf::{Document, Object, ObjectId, dictionary};
use std::io::{Read, Write};
use std::path::Path;

/// Version written when no input contributes one.
pub const DEFAULT_PDF_VERSION: &str = "1.7";

/// A parsed PDF document with its pages resolved into display order.
///
/// Pages are addressed by zero-based index. The page list is computed once at
/// load time; the editing functions in this crate never mutate a
/// `PdfDocument` they receive and always return a new one.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    inner: Document,
    pages: Vec<ObjectId>,
}

impl PdfDocument {
    /// Parses a PDF from an in-memory byte buffer.
    ///
    /// Input that is not a PDF, or a PDF without a catalog and page tree, is
    /// rejected with [`ComposerError::Format`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ComposerError> {
        let inner = Document::load_mem(bytes).map_err(|e| ComposerError::Format(e.to_string()))?;
        Self::from_lopdf(inner)
    }

    /// Reads the whole stream and parses it as a PDF.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ComposerError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Opens and parses a PDF file. The file handle is closed before this returns.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ComposerError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Wraps an already-parsed `lopdf::Document`, validating its page tree.
    pub fn from_lopdf(inner: Document) -> Result<Self, ComposerError> {
        let root_id = inner
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|_| ComposerError::Format("trailer has no /Root catalog".to_string()))?;
        let catalog = inner
            .get_dictionary(root_id)
            .map_err(|_| ComposerError::Format(format!("catalog {:?} is missing", root_id)))?;
        catalog
            .get(b"Pages")
            .and_then(Object::as_reference)
            .map_err(|_| ComposerError::Format("catalog has no /Pages tree".to_string()))?;

        let pages: Vec<ObjectId> = inner.get_pages().into_values().collect();
        log::debug!("Loaded PDF {} with {} pages", inner.version, pages.len());
        Ok(Self { inner, pages })
    }

    /// Creates a valid document with no pages.
    pub fn empty() -> Self {
        let mut inner = Document::with_version(DEFAULT_PDF_VERSION);
        let pages_id = inner.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);
        Self { inner, pages: Vec::new() }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The version from the `%PDF-x.y` header.
    pub fn version(&self) -> &str {
        &self.inner.version
    }

    /// The object id of the page at `index`, if it exists.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.pages.get(index).copied()
    }

    /// Returns the concatenated, decoded content streams of one page.
    pub fn page_content(&self, index: usize) -> Result<Vec<u8>, ComposerError> {
        let page_id = self.checked_page("document", index)?;
        Ok(self.inner.get_page_content(page_id)?)
    }

    /// Converts a signed page index (as typed by a user) into a valid
    /// zero-based index for this document.
    pub fn resolve_index(&self, document: &'static str, index: i64) -> Result<usize, ComposerError> {
        match usize::try_from(index) {
            Ok(i) if i < self.page_count() => Ok(i),
            _ => Err(ComposerError::IndexOutOfRange {
                document,
                index,
                page_count: self.page_count(),
            }),
        }
    }

    pub(crate) fn checked_page(
        &self,
        document: &'static str,
        index: usize,
    ) -> Result<ObjectId, ComposerError> {
        self.page_id(index)
            .ok_or_else(|| ComposerError::out_of_range(document, index, self.page_count()))
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.inner.version = version.into();
    }

    /// Writes `/Producer` into a fresh `/Info` dictionary.
    pub fn set_producer(&mut self, producer: &str) {
        let info_id = self.inner.add_object(dictionary! {
            "Producer" => Object::string_literal(producer),
        });
        self.inner.trailer.set("Info", info_id);
    }

    /// Flate-compresses every stream that is not already filtered.
    pub fn compress(&mut self) {
        self.inner.compress();
    }

    /// Serializes the document into `writer`.
    pub fn write_to<W: Write>(&mut self, writer: &mut W) -> Result<(), ComposerError> {
        self.inner.save_to(writer)?;
        Ok(())
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>, ComposerError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Serializes the document and writes it to `path`.
    ///
    /// The bytes are produced in memory first, so a serialization failure
    /// leaves no partial file behind.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ComposerError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Borrows the underlying `lopdf` document.
    pub fn as_lopdf(&self) -> &Document {
        &self.inner
    }
}

impl TryFrom<Document> for PdfDocument {
    type Error = ComposerError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        PdfDocument::from_lopdf(doc)
    }
}

/// Orders `major.minor` version strings; unparsable parts count as zero.
pub(crate) fn version_key(version: &str) -> (u32, u32) {
    let mut parts = version.trim().splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor)
}
