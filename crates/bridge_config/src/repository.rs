//! Configuration loading from the file system.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::documents::GeneratorDocument;
use crate::error::{ConfigError, ConfigResult};

const CONFIGURATION_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Source of configuration documents.
#[async_trait]
pub trait ConfigurationRepository {
    /// Loads every configuration document found under `path`.
    async fn load_configuration(&self, path: &Path) -> ConfigResult<Vec<GeneratorDocument>>;
}

/// Loads configuration documents from a directory of YAML files.
///
/// Files are read in name order so that the first-found semantics of the
/// resolver are deterministic across runs. Each file may contain multiple
/// YAML documents.
#[derive(Debug, Default)]
pub struct FileConfigurationRepository;

impl FileConfigurationRepository {
    pub fn new() -> Self {
        Self
    }

    fn configuration_files(path: &Path) -> Vec<PathBuf> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .map_or(false, |ext| CONFIGURATION_EXTENSIONS.contains(&ext))
            })
            .collect()
    }
}

#[async_trait]
impl ConfigurationRepository for FileConfigurationRepository {
    async fn load_configuration(&self, path: &Path) -> ConfigResult<Vec<GeneratorDocument>> {
        if !path.is_dir() {
            return Err(ConfigError::DirectoryNotFound(path.to_path_buf()));
        }

        debug!("Loading configuration files from {:?}", path);

        let mut documents = Vec::new();
        for file in Self::configuration_files(path) {
            debug!("Reading configuration file {:?}", file);
            let content = tokio::fs::read_to_string(&file).await?;
            for document in serde_yaml::Deserializer::from_str(&content) {
                documents.push(GeneratorDocument::deserialize(document)?);
            }
        }

        debug!("Loaded {} configuration documents", documents.len());
        Ok(documents)
    }
}
