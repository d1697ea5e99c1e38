//! Builds a fresh document out of pages taken from one or more sources.

use crate::copier::ObjectCopier;
use crate::document::{DEFAULT_PDF_VERSION, PdfDocument, version_key};
use crate::error::ComposerError;
use lopdf::{Document, Object, ObjectId, dictionary};
use std::collections::HashMap;

/// One page slot of the output: page `index` of source number `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) source: usize,
    pub(crate) index: usize,
}

impl Placement {
    pub(crate) fn new(source: usize, index: usize) -> Self {
        Self { source, index }
    }
}

/// Collects sources and an ordered list of placements, then copies the
/// placed pages into a new document with a single flat page tree.
#[derive(Default)]
pub(crate) struct PageAssembler<'a> {
    sources: Vec<&'a PdfDocument>,
    placements: Vec<Placement>,
}

impl<'a> PageAssembler<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a source document and returns its handle for placements.
    pub(crate) fn add_source(&mut self, doc: &'a PdfDocument) -> usize {
        self.sources.push(doc);
        self.sources.len() - 1
    }

    pub(crate) fn place(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Places pages `range` of `source` in order.
    pub(crate) fn place_range(&mut self, source: usize, range: std::ops::Range<usize>) {
        self.placements
            .extend(range.map(|index| Placement::new(source, index)));
    }

    pub(crate) fn place_all(&mut self, source: usize) {
        let count = self.sources[source].page_count();
        self.place_range(source, 0..count);
    }

    pub(crate) fn assemble(self) -> Result<PdfDocument, ComposerError> {
        let mut target = Document::with_version(self.output_version());
        let pages_id = target.new_object_id();

        // Every source page gets the id of its first placement up front, so
        // in-document references between placed pages survive the copy.
        let mut id_maps: Vec<HashMap<ObjectId, ObjectId>> = vec![HashMap::new(); self.sources.len()];
        let mut slots = Vec::with_capacity(self.placements.len());
        for placement in &self.placements {
            let source_page = self.sources[placement.source].checked_page("source", placement.index)?;
            let new_id = target.new_object_id();
            id_maps[placement.source].entry(source_page).or_insert(new_id);
            slots.push((placement.source, source_page, new_id));
        }

        let mut kids = Vec::with_capacity(slots.len());
        for (source, source_page, new_id) in slots {
            ObjectCopier::new(self.sources[source].as_lopdf(), &mut target, &mut id_maps[source])
                .copy_page(source_page, new_id, pages_id)?;
            kids.push(Object::Reference(new_id));
        }

        let count = kids.len() as i64;
        target.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }
            .into(),
        );
        let catalog_id = target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        target.trailer.set("Root", catalog_id);

        PdfDocument::from_lopdf(target)
    }

    /// The highest version among sources that contribute at least one page.
    fn output_version(&self) -> String {
        self.placements
            .iter()
            .map(|p| self.sources[p.source].version())
            .max_by_key(|v| version_key(v))
            .unwrap_or(DEFAULT_PDF_VERSION)
            .to_string()
    }
}
