use crate::error::FolioError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when none is passed explicitly.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

/// Prefix for per-key overrides, e.g. `FOLIO__COMPRESS=false`.
const ENV_PREFIX: &str = "FOLIO";

/// Settings applied to every document the editor writes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Forces the `%PDF-x.y` header of outputs. By default the highest
    /// version among the inputs is kept.
    pub pdf_version: Option<String>,
    /// Flate-compress output streams that are stored uncompressed.
    pub compress: bool,
    /// Written to `/Info /Producer` of outputs.
    pub producer: Option<String>,
    /// Confines named inputs to this directory.
    pub base_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pdf_version: None,
            compress: true,
            producer: Some("folio".to_string()),
            base_dir: None,
        }
    }
}

impl EditorConfig {
    /// Loads the configuration from defaults, an optional TOML file, then
    /// `FOLIO__*` environment variables.
    ///
    /// The file is `path` if given, otherwise the one named by `FOLIO_CONFIG`.
    pub fn load(path: Option<&Path>) -> Result<Self, FolioError> {
        let file = path.map(Path::to_path_buf).or_else(|| {
            std::env::var_os(CONFIG_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        Self::load_with_env(file.as_deref(), None)
    }

    /// Like [`EditorConfig::load`], reading overrides from `env` instead of
    /// the process environment when it is `Some`.
    pub(crate) fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, FolioError> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            if !file.exists() {
                return Err(FolioError::Config(format!(
                    "config file '{}' does not exist",
                    file.display()
                )));
            }
            builder = builder.add_source(config::File::from(file));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(env),
        );

        let config: EditorConfig = builder.build()?.try_deserialize()?;
        log::debug!("Loaded editor configuration: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::load_with_env(None, Some(HashMap::new())).unwrap();
        assert_eq!(config, EditorConfig::default());
        assert!(config.compress);
        assert_eq!(config.producer.as_deref(), Some("folio"));
    }

    #[test]
    fn test_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "compress = false\npdf_version = \"1.5\"\n").unwrap();

        let config = EditorConfig::load_with_env(Some(&path), Some(HashMap::new())).unwrap();
        assert!(!config.compress);
        assert_eq!(config.pdf_version.as_deref(), Some("1.5"));
        assert_eq!(config.producer.as_deref(), Some("folio"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "compress = false\n").unwrap();

        let env = HashMap::from([
            ("FOLIO__COMPRESS".to_string(), "true".to_string()),
            ("FOLIO__PRODUCER".to_string(), "scanner".to_string()),
        ]);
        let config = EditorConfig::load_with_env(Some(&path), Some(env)).unwrap();
        assert!(config.compress);
        assert_eq!(config.producer.as_deref(), Some("scanner"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = EditorConfig::load_with_env(Some(Path::new("/no/such/folio.toml")), None);
        assert!(matches!(result, Err(FolioError::Config(_))));
    }
}
