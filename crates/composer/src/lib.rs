//! PDF page editing on top of lopdf.
//!
//! This crate builds new PDF documents out of the pages of existing ones:
//! - Extracting a single page
//! - Replacing one or several pages with pages from another document
//! - Merging documents end to end
//! - Inserting a document after a given page
//!
//! Pages are copied whole, together with every object they reference
//! (content streams, resources, fonts, images, annotations). Inputs are
//! never modified.

mod assembler;
mod copier;
mod document;
mod edit;
mod error;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use document::{DEFAULT_PDF_VERSION, PdfDocument};
pub use edit::{extract_page, insert_document, merge_documents, replace_page, replace_pages};
pub use error::ComposerError;
