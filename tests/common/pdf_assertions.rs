use folio::PdfDocument;
use lopdf::{Dictionary, Object};

pub use folio_composer::test_utils::page_texts;

/// Reloads the serialized form of `doc` and returns its page texts, proving
/// the output is a readable PDF and not only a valid in-memory object graph.
pub fn reloaded_page_texts(doc: &mut PdfDocument) -> Vec<String> {
    let bytes = doc.to_bytes().expect("serializable document");
    let reloaded = PdfDocument::from_bytes(&bytes).expect("reloadable document");
    page_texts(&reloaded)
}

/// The page dictionary of page `index`.
pub fn page_dict(doc: &PdfDocument, index: usize) -> &Dictionary {
    let id = doc.page_id(index).expect("page exists");
    doc.as_lopdf().get_dictionary(id).expect("page dictionary")
}

/// Resolves `obj` through a reference if it is one.
pub fn resolve<'a>(doc: &'a PdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.as_lopdf().get_object(*id).expect("referenced object"),
        _ => obj,
    }
}
