//! Render-config command - render templated configuration documents.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use bridge_render::{render_config_dir, TemplateRenderer};

#[derive(Args)]
pub struct RenderConfigArgs {
    /// Topology model file (JSON or YAML)
    #[arg(short, long)]
    model: PathBuf,

    /// Directory containing `.hbs` configuration templates
    #[arg(short, long)]
    source: PathBuf,

    /// Directory to write the rendered configuration documents into
    #[arg(short, long)]
    target: PathBuf,
}

pub async fn execute(args: RenderConfigArgs) -> Result<()> {
    let model = super::load_model(&args.model)?;
    let renderer = TemplateRenderer::new();

    let written = render_config_dir(&renderer, &model, &args.source, &args.target).await?;
    info!("Rendered {} configuration documents", written.len());

    println!(
        "Rendered {} configuration documents to {}",
        written.len(),
        args.target.display()
    );
    Ok(())
}
