//! Folio: build new PDF documents out of the pages of existing ones.
//!
//! The page operations themselves live in `folio-composer` and work on
//! already-loaded [`PdfDocument`]s. This crate adds the [`Editor`], which
//! loads inputs by name from a [`DocumentSource`], validates user-supplied
//! page numbers and applies the output settings from [`EditorConfig`].
//!
//! ```no_run
//! use folio::Editor;
//!
//! # fn main() -> Result<(), folio::FolioError> {
//! let editor = Editor::new();
//! let mut merged = editor.merge(&["a.pdf", "b.pdf", "c.pdf"])?;
//! merged.save("merged.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod editor;
pub mod error;

pub use config::EditorConfig;
pub use editor::{Editor, MergeOutcome};
pub use error::{ErrorKind, FolioError};

pub use folio_composer::{
    ComposerError, DEFAULT_PDF_VERSION, PdfDocument, extract_page, insert_document,
    merge_documents, replace_page, replace_pages,
};
pub use folio_source::{
    DocumentSource, FilesystemSource, InMemorySource, SharedDocumentData, SourceError,
};
