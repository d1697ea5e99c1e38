// src/editor.rs
use crate::config::EditorConfig;
use crate::error::FolioError;
use folio_composer::{ComposerError, PdfDocument};
use folio_source::{DocumentSource, FilesystemSource};

/// Result of a best-effort merge.
#[derive(Debug)]
pub struct MergeOutcome {
    pub document: PdfDocument,
    /// Names that could not be found and were left out, in input order.
    pub skipped: Vec<String>,
}

/// Loads documents by name from a [`DocumentSource`] and runs the page
/// operations on them.
///
/// Page numbers are signed, zero-based and validated against the loaded
/// document, so values typed by a user (including negative ones) are
/// reported as `IndexOutOfRange` instead of wrapping. Every document the
/// editor returns has the [`EditorConfig`] output settings applied.
#[derive(Debug)]
pub struct Editor {
    source: Box<dyn DocumentSource>,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            source: Box::new(FilesystemSource::unconfined()),
            config: EditorConfig::default(),
        }
    }
}

impl Editor {
    /// Creates an editor reading from the filesystem with default settings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an editor from configuration. Inputs are confined to
    /// `base_dir` when one is set.
    pub fn from_config(config: EditorConfig) -> Self {
        let source: Box<dyn DocumentSource> = match &config.base_dir {
            Some(dir) => Box::new(FilesystemSource::new(dir)),
            None => Box::new(FilesystemSource::unconfined()),
        };
        Self { source, config }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the source documents are loaded from.
    pub fn with_source<S: DocumentSource + 'static>(mut self, source: S) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Loads and parses the document `name`.
    pub fn load(&self, name: &str) -> Result<PdfDocument, FolioError> {
        let bytes = self.source.load(name)?;
        let doc = PdfDocument::from_bytes(&bytes)?;
        log::debug!(
            "Loaded '{}' from {} ({} pages)",
            name,
            self.source.name(),
            doc.page_count()
        );
        Ok(doc)
    }

    pub fn extract_page(&self, name: &str, page: i64) -> Result<PdfDocument, FolioError> {
        let source = self.load(name)?;
        let index = source.resolve_index("source", page)?;
        let output = folio_composer::extract_page(&source, index)?;
        Ok(self.finish(output))
    }

    pub fn replace_page(
        &self,
        name: &str,
        page: i64,
        replacement: &str,
        replacement_page: i64,
    ) -> Result<PdfDocument, FolioError> {
        self.replace_pages(name, &[page], replacement, &[replacement_page])
    }

    pub fn replace_pages(
        &self,
        name: &str,
        pages: &[i64],
        replacement: &str,
        replacement_pages: &[i64],
    ) -> Result<PdfDocument, FolioError> {
        if pages.len() != replacement_pages.len() {
            return Err(ComposerError::LengthMismatch {
                source_indices: pages.len(),
                replacement_indices: replacement_pages.len(),
            }
            .into());
        }
        let source = self.load(name)?;
        let replacement_doc = self.load(replacement)?;

        let source_indices = pages
            .iter()
            .map(|&p| source.resolve_index("source", p))
            .collect::<Result<Vec<_>, _>>()?;
        let replacement_indices = replacement_pages
            .iter()
            .map(|&p| replacement_doc.resolve_index("replacement", p))
            .collect::<Result<Vec<_>, _>>()?;

        let output = folio_composer::replace_pages(
            &source,
            &source_indices,
            &replacement_doc,
            &replacement_indices,
        )?;
        Ok(self.finish(output))
    }

    /// Inserts `to_insert` after page `after` of `target`, or at the end when
    /// `after` is `None`.
    pub fn insert_document(
        &self,
        target: &str,
        to_insert: &str,
        after: Option<i64>,
    ) -> Result<PdfDocument, FolioError> {
        let target_doc = self.load(target)?;
        let insert_doc = self.load(to_insert)?;
        let after = after
            .map(|p| target_doc.resolve_index("target", p))
            .transpose()?;

        let output = folio_composer::insert_document(&target_doc, &insert_doc, after)?;
        Ok(self.finish(output))
    }

    /// Merges the named documents in order, skipping names that don't exist.
    /// See [`Editor::merge_report`].
    pub fn merge<S: AsRef<str>>(&self, names: &[S]) -> Result<PdfDocument, FolioError> {
        Ok(self.merge_report(names)?.document)
    }

    /// Merges the named documents in order and reports which were skipped.
    ///
    /// Only a missing document is tolerated. A document that can't be read,
    /// lies outside a confined source or isn't a valid PDF aborts the merge.
    pub fn merge_report<S: AsRef<str>>(&self, names: &[S]) -> Result<MergeOutcome, FolioError> {
        let mut documents = Vec::with_capacity(names.len());
        let mut skipped = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.load(name) {
                Ok(doc) => documents.push(doc),
                Err(FolioError::Source(e)) if e.is_not_found() => {
                    log::warn!("Skipping missing merge input '{}'", name);
                    skipped.push(name.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        let document = folio_composer::merge_documents(&documents)?;
        Ok(MergeOutcome {
            document: self.finish(document),
            skipped,
        })
    }

    /// Applies the output settings of the configuration.
    pub fn finish(&self, mut doc: PdfDocument) -> PdfDocument {
        if let Some(version) = &self.config.pdf_version {
            doc.set_version(version.as_str());
        }
        if let Some(producer) = &self.config.producer {
            doc.set_producer(producer);
        }
        if self.config.compress {
            doc.compress();
        }
        doc
    }
}
