//! CLI command definitions.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bridge_model::TopologyModel;

pub mod generate;
pub mod render_config;

/// BusBridge - integration topology migration artifact generator
#[derive(Parser)]
#[command(name = "busbridge")]
#[command(version, about = "BusBridge - integration topology migration artifact generator")]
#[command(long_about = r#"
BusBridge resolves deployment artifacts for an integration topology that is
being migrated to a new messaging platform, and renders them through
Handlebars templates.

WORKFLOWS:
  generate       → Resolve artifacts for every topology node and render them
  render-config  → Render templated configuration documents against a model

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Rendering error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and render artifacts for a topology model
    Generate(generate::GenerateArgs),

    /// Render templated configuration documents against a model
    #[command(name = "render-config")]
    RenderConfig(render_config::RenderConfigArgs),
}

/// Reads a topology model from a JSON or YAML file, chosen by extension.
pub(crate) fn load_model(path: &Path) -> Result<TopologyModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;

    let model = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Model file {} is not valid YAML", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Model file {} is not valid JSON", path.display()))?,
    };

    Ok(model)
}
