//! Generate command - resolve and render artifacts for a topology model.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use bridge_config::{ConfigurationRepository, FileConfigurationRepository};
use bridge_generator::ResourceGenerator;
use bridge_model::{ArtifactCarrier, MessageBus, TopologyModel};
use bridge_render::{
    FileTemplateRepository, RenderArgs, TemplateRenderer, TemplateRepository, ENGINE,
    TEMPLATE_EXTENSION,
};

#[derive(Args)]
pub struct GenerateArgs {
    /// Topology model file (JSON or YAML)
    #[arg(short, long)]
    model: PathBuf,

    /// Directory containing configuration documents
    #[arg(short, long)]
    config: PathBuf,

    /// Directory containing the template files referenced by configuration
    #[arg(short, long)]
    templates: PathBuf,

    /// Output directory for rendered artifacts
    #[arg(short, long, default_value = "out")]
    out: PathBuf,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let mut model = super::load_model(&args.model)?;

    let repository = FileConfigurationRepository::new();
    let documents = repository.load_configuration(&args.config).await?;
    info!("Loaded {} configuration documents", documents.len());

    let generator = ResourceGenerator::new();
    generator.generate(&mut model, &documents, &CancellationToken::new())?;

    let renderer = TemplateRenderer::new();
    let rendered = render_artifacts(&renderer, &model, &args.templates, &args.out).await?;

    println!(
        "Rendered {} artifact files to {}",
        rendered,
        args.out.display()
    );
    Ok(())
}

/// Renders every resolved template file and snippet attached to the model.
async fn render_artifacts(
    renderer: &TemplateRenderer,
    model: &TopologyModel,
    templates_dir: &Path,
    out_dir: &Path,
) -> Result<usize> {
    let Some(bus) = model.message_bus.as_ref() else {
        return Ok(0);
    };

    let repository = FileTemplateRepository::new();
    let mut rendered = 0usize;

    for node in carriers(bus) {
        for resource in node.resources() {
            if !resource.template_type.eq_ignore_ascii_case(ENGINE) {
                debug!(
                    "Skipping template '{}' with engine '{}'",
                    resource.template_key, resource.template_type
                );
                continue;
            }

            for file in &resource.files {
                let content = repository.load_template(&templates_dir.join(file)).await?;
                let output = renderer
                    .render(
                        &content,
                        model,
                        &RenderArgs::new()
                            .with_node(node)
                            .with_resource_template(resource),
                    )
                    .with_context(|| format!("Failed to render template file {file}"))?;

                let target = artifact_path(out_dir, resource.output_path.as_deref(), file);
                repository.save_template(&target, &output).await?;
                rendered += 1;
            }
        }

        for snippet in node.snippets() {
            if !snippet.snippet_type.eq_ignore_ascii_case(ENGINE) {
                continue;
            }

            let Some(file) = snippet.file.as_deref() else {
                continue;
            };

            let content = repository.load_template(&templates_dir.join(file)).await?;
            let output = renderer
                .render(
                    &content,
                    model,
                    &RenderArgs::new()
                        .with_node(node)
                        .with_resource_snippet(snippet),
                )
                .with_context(|| format!("Failed to render snippet file {file}"))?;

            let target = artifact_path(out_dir, snippet.output_path.as_deref(), file);
            repository.save_template(&target, &output).await?;
            rendered += 1;
        }
    }

    Ok(rendered)
}

/// Every node of the tree, in generation order.
fn carriers(bus: &MessageBus) -> Vec<&dyn ArtifactCarrier> {
    let mut nodes: Vec<&dyn ArtifactCarrier> = vec![bus];
    for application in &bus.applications {
        nodes.push(application);
        nodes.extend(application.messages.iter().map(|m| m as &dyn ArtifactCarrier));
        nodes.extend(application.channels.iter().map(|c| c as &dyn ArtifactCarrier));
        nodes.extend(
            application
                .intermediaries
                .iter()
                .map(|i| i as &dyn ArtifactCarrier),
        );
        nodes.extend(application.endpoints.iter().map(|e| e as &dyn ArtifactCarrier));
    }
    nodes
}

/// Output location for a rendered artifact: the optional per-artifact
/// output path, then the template file name minus the engine extension,
/// sanitized.
fn artifact_path(out_dir: &Path, output_path: Option<&str>, file: &str) -> PathBuf {
    let stripped = file
        .strip_suffix(&format!(".{TEMPLATE_EXTENSION}"))
        .unwrap_or(file);

    let relative = match output_path {
        Some(prefix) => format!("{prefix}/{stripped}"),
        None => stripped.to_string(),
    };

    out_dir.join(bridge_render::functions::safe_file_path(&relative))
}
