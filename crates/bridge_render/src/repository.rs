//! Template loading and saving on the file system.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, trace};
use walkdir::WalkDir;

use bridge_model::TopologyModel;

use crate::error::{RenderError, RenderResult};
use crate::renderer::{RenderArgs, TemplateRenderer};

/// File extension marking a renderable template.
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Source and sink for template content.
#[async_trait]
pub trait TemplateRepository {
    /// Loads the content of a template file.
    async fn load_template(&self, path: &Path) -> RenderResult<String>;

    /// Saves rendered content, creating parent directories as needed.
    async fn save_template(&self, path: &Path, content: &str) -> RenderResult<()>;
}

/// Template repository backed by the local file system.
#[derive(Debug, Default)]
pub struct FileTemplateRepository;

impl FileTemplateRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TemplateRepository for FileTemplateRepository {
    async fn load_template(&self, path: &Path) -> RenderResult<String> {
        trace!("Loading template file {:?}", path);

        if !path.is_file() {
            return Err(RenderError::TemplateFileNotFound(path.to_path_buf()));
        }

        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn save_template(&self, path: &Path, content: &str) -> RenderResult<()> {
        trace!("Saving template file {:?}", path);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

/// Renders every `.hbs` file in `source` against the model and writes the
/// result, minus the template extension, into `target`.
///
/// Used for configuration documents that are themselves templated (e.g.
/// `generation.yaml.hbs` becomes `generation.yaml`). Returns the paths
/// written, in file-name order.
pub async fn render_config_dir(
    renderer: &TemplateRenderer,
    model: &TopologyModel,
    source: &Path,
    target: &Path,
) -> RenderResult<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(RenderError::DirectoryNotFound(source.to_path_buf()));
    }

    debug!("Rendering configuration files from {:?} to {:?}", source, target);
    tokio::fs::create_dir_all(target).await?;

    let repository = FileTemplateRepository::new();
    let mut written = Vec::new();

    for entry in WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let is_template = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext == TEMPLATE_EXTENSION);
        if !is_template {
            continue;
        }

        let content = repository.load_template(path).await?;
        let rendered = renderer.render(&content, model, &RenderArgs::new())?;

        let output = match path.file_stem() {
            Some(stem) => target.join(stem),
            None => continue,
        };
        repository.save_template(&output, &rendered).await?;
        written.push(output);
    }

    debug!("Rendered {} configuration files", written.len());
    Ok(written)
}
