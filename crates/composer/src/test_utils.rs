//! In-memory fixture documents for tests and benchmarks.
//!
//! Every page draws a single "<prefix> X" label with `Tj`, which
//! [`page_texts`] reads back to check page order after an edit.

use crate::PdfDocument;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

/// Content stream bytes drawing `label` in font `/F1`.
pub fn text_content(label: &str) -> Vec<u8> {
    Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![100.into(), 700.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(label.as_bytes().to_vec(), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
    }
    .encode()
    .expect("failed to encode content")
}

/// Creates a PDF with `num_pages` pages sharing one font resource.
pub fn create_dummy_pdf(num_pages: u32, text_prefix: &str) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = (1..=num_pages)
        .map(|i| {
            let content = text_content(&format!("{} {}", text_prefix, i));
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => num_pages as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn dummy(num_pages: u32, text_prefix: &str) -> PdfDocument {
    PdfDocument::try_from(create_dummy_pdf(num_pages, text_prefix))
        .expect("fixture has a page tree")
}

/// Serialized form of [`create_dummy_pdf`].
pub fn dummy_pdf_bytes(num_pages: u32, text_prefix: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    create_dummy_pdf(num_pages, text_prefix)
        .save_to(&mut bytes)
        .expect("failed to save fixture");
    bytes
}

/// Returns the text drawn by `Tj` on every page, in page order.
pub fn page_texts(doc: &PdfDocument) -> Vec<String> {
    (0..doc.page_count())
        .map(|i| {
            let content = doc.page_content(i).expect("page content");
            Content::decode(&content)
                .expect("decodable content")
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first())
                .filter_map(|o| o.as_str().ok())
                .map(|s| String::from_utf8_lossy(s).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
