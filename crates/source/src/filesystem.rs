//! Filesystem-backed document source.
//!
//! A source created with [`FilesystemSource::new`] is confined to its base
//! directory: absolute names and names that climb out with `..` are refused
//! with [`SourceError::Forbidden`]. [`FilesystemSource::unconfined`] resolves
//! names exactly as given and is meant for command-line use where the caller
//! picks the paths.

use crate::{DocumentSource, SharedDocumentData, SourceError};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemSource {
    base_path: PathBuf,
    /// Canonicalized base path for the confinement check.
    canonical_base: Option<PathBuf>,
    confined: bool,
}

impl FilesystemSource {
    /// Creates a source that only reads files below `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
            confined: true,
        }
    }

    /// Creates a source that reads any path, relative to the working directory.
    pub fn unconfined() -> Self {
        Self {
            base_path: PathBuf::new(),
            canonical_base: None,
            confined: false,
        }
    }

    /// Resolves `name` to a path, or `None` if it would escape the base directory.
    fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        if !self.confined {
            return Some(PathBuf::from(name));
        }

        if Path::new(name).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(name);
        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // The file doesn't exist (yet); reject obvious traversal.
        if Path::new(name)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(full_path)
    }
}

impl DocumentSource for FilesystemSource {
    fn load(&self, name: &str) -> Result<SharedDocumentData, SourceError> {
        let full_path = self.resolve_path(name).ok_or_else(|| {
            log::warn!("Blocked access to '{}' outside {}", name, self.base_path.display());
            SourceError::Forbidden(name.to_string())
        })?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(name.to_string())
            } else {
                SourceError::LoadFailed {
                    path: name.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "FilesystemSource"
    }
}
