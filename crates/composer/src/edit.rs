//! Page-level editing operations.
//!
//! Every operation validates all indices before any page is copied and
//! returns a brand new [`PdfDocument`]; the inputs are only read.

use crate::assembler::{PageAssembler, Placement};
use crate::document::PdfDocument;
use crate::error::ComposerError;

/// Produces a single-page document holding page `index` of `source`.
pub fn extract_page(source: &PdfDocument, index: usize) -> Result<PdfDocument, ComposerError> {
    source.checked_page("source", index)?;

    let mut assembler = PageAssembler::new();
    let src = assembler.add_source(source);
    assembler.place(Placement::new(src, index));
    let output = assembler.assemble()?;

    log::info!("Extracted page {} of {}", index, source.page_count());
    Ok(output)
}

/// Replaces page `source_index` of `source` with page `replacement_index` of
/// `replacement`. Every other page is copied unchanged, in order.
pub fn replace_page(
    source: &PdfDocument,
    source_index: usize,
    replacement: &PdfDocument,
    replacement_index: usize,
) -> Result<PdfDocument, ComposerError> {
    replace_pages(source, &[source_index], replacement, &[replacement_index])
}

/// Replaces several pages at once: position `source_indices[k]` receives
/// page `replacement_indices[k]` of `replacement`.
///
/// The pairs are applied left to right, so when a position is named more
/// than once the last pair wins.
pub fn replace_pages(
    source: &PdfDocument,
    source_indices: &[usize],
    replacement: &PdfDocument,
    replacement_indices: &[usize],
) -> Result<PdfDocument, ComposerError> {
    if source_indices.len() != replacement_indices.len() {
        return Err(ComposerError::LengthMismatch {
            source_indices: source_indices.len(),
            replacement_indices: replacement_indices.len(),
        });
    }
    for &index in source_indices {
        source.checked_page("source", index)?;
    }
    for &index in replacement_indices {
        replacement.checked_page("replacement", index)?;
    }

    let mut assembler = PageAssembler::new();
    let src = assembler.add_source(source);
    let rep = assembler.add_source(replacement);

    let mut slots: Vec<Placement> = (0..source.page_count())
        .map(|index| Placement::new(src, index))
        .collect();
    for (&at, &with) in source_indices.iter().zip(replacement_indices) {
        slots[at] = Placement::new(rep, with);
    }
    for slot in slots {
        assembler.place(slot);
    }
    let output = assembler.assemble()?;

    log::info!(
        "Replaced {} page(s) in a {}-page document",
        source_indices.len(),
        source.page_count()
    );
    Ok(output)
}

/// Concatenates the pages of `sources` in order. No sources gives a valid
/// document with zero pages.
pub fn merge_documents<'a, I>(sources: I) -> Result<PdfDocument, ComposerError>
where
    I: IntoIterator<Item = &'a PdfDocument>,
{
    let mut assembler = PageAssembler::new();
    let mut merged = 0;
    for doc in sources {
        let src = assembler.add_source(doc);
        assembler.place_all(src);
        merged += 1;
    }
    let output = assembler.assemble()?;

    log::info!("Merged {} document(s) into {} pages", merged, output.page_count());
    Ok(output)
}

/// Inserts every page of `to_insert` after page `after_index` of `target`.
///
/// `None` appends after the last page. The result is
/// `target[..=after_index] + to_insert[..] + target[after_index + 1..]`.
pub fn insert_document(
    target: &PdfDocument,
    to_insert: &PdfDocument,
    after_index: Option<usize>,
) -> Result<PdfDocument, ComposerError> {
    let split = match after_index {
        Some(index) => {
            target.checked_page("target", index)?;
            index + 1
        }
        None => target.page_count(),
    };

    let mut assembler = PageAssembler::new();
    let tgt = assembler.add_source(target);
    let ins = assembler.add_source(to_insert);
    assembler.place_range(tgt, 0..split);
    assembler.place_all(ins);
    assembler.place_range(tgt, split..target.page_count());
    let output = assembler.assemble()?;

    log::info!(
        "Inserted {} page(s) at position {} of a {}-page document",
        to_insert.page_count(),
        split,
        target.page_count()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dummy, page_texts};

    #[test]
    fn test_extract_page() {
        let source = dummy(3, "Page");
        let out = extract_page(&source, 1).unwrap();
        assert_eq!(page_texts(&out), vec!["Page 2"]);
        assert_eq!(out.page_content(0).unwrap(), source.page_content(1).unwrap());
    }

    #[test]
    fn test_extract_page_out_of_range() {
        let source = dummy(3, "Page");
        let result = extract_page(&source, 3);
        assert!(matches!(
            result,
            Err(ComposerError::IndexOutOfRange { document: "source", index: 3, page_count: 3 })
        ));
    }

    #[test]
    fn test_extract_page_leaves_other_pages_behind() {
        let source = dummy(5, "Page");
        let out = extract_page(&source, 4).unwrap();
        let streams = out
            .as_lopdf()
            .objects
            .values()
            .filter(|o| o.as_stream().is_ok())
            .count();
        assert_eq!(streams, 1);
    }

    #[test]
    fn test_replace_page() {
        let source = dummy(3, "Source");
        let replacement = dummy(2, "Replacement");
        let out = replace_page(&source, 1, &replacement, 0).unwrap();
        assert_eq!(
            page_texts(&out),
            vec!["Source 1", "Replacement 1", "Source 3"]
        );
        assert_eq!(out.page_content(0).unwrap(), source.page_content(0).unwrap());
        assert_eq!(out.page_content(2).unwrap(), source.page_content(2).unwrap());
    }

    #[test]
    fn test_replace_page_checks_both_documents() {
        let source = dummy(3, "Source");
        let replacement = dummy(1, "Replacement");
        assert!(matches!(
            replace_page(&source, 3, &replacement, 0),
            Err(ComposerError::IndexOutOfRange { document: "source", .. })
        ));
        assert!(matches!(
            replace_page(&source, 0, &replacement, 1),
            Err(ComposerError::IndexOutOfRange { document: "replacement", .. })
        ));
    }

    #[test]
    fn test_replace_pages() {
        let source = dummy(4, "S");
        let replacement = dummy(3, "R");
        let out = replace_pages(&source, &[3, 0], &replacement, &[0, 2]).unwrap();
        assert_eq!(page_texts(&out), vec!["R 3", "S 2", "S 3", "R 1"]);
    }

    #[test]
    fn test_replace_pages_last_write_wins() {
        let source = dummy(2, "S");
        let replacement = dummy(3, "R");
        let out = replace_pages(&source, &[1, 1], &replacement, &[0, 2]).unwrap();
        assert_eq!(page_texts(&out), vec!["S 1", "R 3"]);
    }

    #[test]
    fn test_replace_pages_length_mismatch() {
        let source = dummy(2, "S");
        let replacement = dummy(2, "R");
        let result = replace_pages(&source, &[0, 1], &replacement, &[0]);
        assert!(matches!(
            result,
            Err(ComposerError::LengthMismatch { source_indices: 2, replacement_indices: 1 })
        ));
    }

    #[test]
    fn test_replace_pages_with_no_pairs_copies_source() {
        let source = dummy(2, "S");
        let replacement = dummy(1, "R");
        let out = replace_pages(&source, &[], &replacement, &[]).unwrap();
        assert_eq!(page_texts(&out), vec!["S 1", "S 2"]);
    }

    #[test]
    fn test_merge_documents() {
        let a = dummy(2, "A");
        let b = dummy(3, "B");
        let out = merge_documents([&a, &b]).unwrap();
        assert_eq!(out.page_count(), 5);
        assert_eq!(page_texts(&out), vec!["A 1", "A 2", "B 1", "B 2", "B 3"]);
    }

    #[test]
    fn test_merge_no_documents() {
        let out = merge_documents(std::iter::empty::<&PdfDocument>()).unwrap();
        assert_eq!(out.page_count(), 0);
    }

    #[test]
    fn test_insert_document_after_index() {
        let target = dummy(3, "T");
        let insert = dummy(2, "I");
        let out = insert_document(&target, &insert, Some(0)).unwrap();
        assert_eq!(page_texts(&out), vec!["T 1", "I 1", "I 2", "T 2", "T 3"]);
    }

    #[test]
    fn test_insert_document_defaults_to_append() {
        let target = dummy(2, "T");
        let insert = dummy(1, "I");
        let default = insert_document(&target, &insert, None).unwrap();
        let explicit = insert_document(&target, &insert, Some(1)).unwrap();
        assert_eq!(page_texts(&default), vec!["T 1", "T 2", "I 1"]);
        assert_eq!(page_texts(&default), page_texts(&explicit));
    }

    #[test]
    fn test_insert_document_out_of_range() {
        let target = dummy(2, "T");
        let insert = dummy(1, "I");
        assert!(matches!(
            insert_document(&target, &insert, Some(2)),
            Err(ComposerError::IndexOutOfRange { document: "target", index: 2, page_count: 2 })
        ));
    }

    #[test]
    fn test_insert_into_empty_target_appends() {
        let target = PdfDocument::empty();
        let insert = dummy(2, "I");
        let out = insert_document(&target, &insert, None).unwrap();
        assert_eq!(page_texts(&out), vec!["I 1", "I 2"]);
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let source = dummy(3, "S");
        let before = source.as_lopdf().objects.len();
        let _ = extract_page(&source, 0).unwrap();
        let _ = merge_documents([&source, &source]).unwrap();
        assert_eq!(source.as_lopdf().objects.len(), before);
        assert_eq!(page_texts(&source), vec!["S 1", "S 2", "S 3"]);
    }
}
