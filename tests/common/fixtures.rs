use folio_composer::test_utils::text_content;
use lopdf::{Document, Stream, dictionary};

pub use folio_composer::test_utils::dummy_pdf_bytes;

/// A two-level page tree whose pages inherit `Resources`, `MediaBox` and
/// `Rotate` from an intermediate `Pages` node instead of declaring them.
pub fn nested_tree_pdf_bytes(text_prefix: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let root_pages_id = doc.new_object_id();
    let branch_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids = vec![];
    for i in 1..=2 {
        let content = text_content(&format!("{} {}", text_prefix, i));
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => branch_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        branch_id,
        dictionary! {
            "Type" => "Pages",
            "Parent" => root_pages_id,
            "Kids" => kids,
            "Count" => 2,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "Rotate" => 90,
        }
        .into(),
    );
    doc.objects.insert(
        root_pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![branch_id.into()],
            "Count" => 2,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("failed to save fixture");
    bytes
}
