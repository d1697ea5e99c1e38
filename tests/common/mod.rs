pub mod fixtures;
pub mod pdf_assertions;

use folio::{Editor, InMemorySource};
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// An editor over in-memory documents, with compression off so page
/// content can be compared byte for byte.
pub fn editor_with(documents: &[(&str, Vec<u8>)]) -> Editor {
    let mut source = InMemorySource::new();
    for (name, bytes) in documents {
        source = source.with_document(*name, bytes.clone());
    }
    let config = folio::EditorConfig {
        compress: false,
        ..Default::default()
    };
    Editor::new().with_config(config).with_source(source)
}

/// Writes `bytes` to `dir/name` and returns the full path as a string.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write fixture");
    path.to_string_lossy().into_owned()
}
