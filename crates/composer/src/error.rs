use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("Page index {index} is out of range for the {document} document ({page_count} pages)")]
    IndexOutOfRange {
        document: &'static str,
        index: i64,
        page_count: usize,
    },

    #[error(
        "Index lists differ in length: {source_indices} source pages, {replacement_indices} replacement pages"
    )]
    LengthMismatch {
        source_indices: usize,
        replacement_indices: usize,
    },

    #[error("Not a valid PDF document: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}

impl ComposerError {
    pub(crate) fn out_of_range(document: &'static str, index: usize, page_count: usize) -> Self {
        ComposerError::IndexOutOfRange {
            document,
            index: i64::try_from(index).unwrap_or(i64::MAX),
            page_count,
        }
    }
}
