//! # bridge_render
//!
//! Template rendering for BusBridge artifacts.
//!
//! A [`TemplateRenderer`] evaluates logic-enabled Handlebars templates
//! against a render scope assembled per call: the whole topology model,
//! the node being rendered (plus its bus, application and a type-narrowed
//! alias), and optional resolved-artifact and workflow objects. A small
//! table of helper functions (environment lookup, region normalization,
//! JSON escaping, path sanitization) is registered once and available to
//! every template.
//!
//! ## Example
//!
//! ```rust
//! use bridge_model::{TargetVariant, TopologyModel};
//! use bridge_render::{RenderArgs, TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let model = TopologyModel::new(TargetVariant::MultiTenant, "dev");
//!
//! let rendered = renderer
//!     .render("env={{ model.deployment_environment }}", &model, &RenderArgs::new())
//!     .unwrap();
//! assert_eq!(rendered, "env=dev");
//! ```

pub mod error;
pub mod functions;
pub mod renderer;
pub mod repository;

pub use error::{RenderError, RenderResult};
pub use renderer::{RenderArgs, TemplateRenderer, ENGINE};
pub use repository::{
    render_config_dir, FileTemplateRepository, TemplateRepository, TEMPLATE_EXTENSION,
};
