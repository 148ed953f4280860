//! Template rendering against a topology model.

use handlebars::Handlebars;
use serde_json::{Map, Value};
use tracing::warn;

use bridge_model::{
    ArtifactCarrier, NodeRef, ResourceSnippet, ResourceTemplate, TopologyModel, WorkflowObject,
};

use crate::error::RenderResult;
use crate::functions;

/// Engine key carried by template and snippet definitions that this
/// renderer can evaluate.
pub const ENGINE: &str = "handlebars";

/// Optional objects bound into the render scope alongside the model.
#[derive(Clone, Copy, Default)]
pub struct RenderArgs<'a> {
    pub node: Option<&'a dyn ArtifactCarrier>,
    pub resource_template: Option<&'a ResourceTemplate>,
    pub resource_snippet: Option<&'a ResourceSnippet>,
    pub workflow_object: Option<&'a WorkflowObject>,
}

impl<'a> RenderArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: &'a dyn ArtifactCarrier) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_resource_template(mut self, template: &'a ResourceTemplate) -> Self {
        self.resource_template = Some(template);
        self
    }

    pub fn with_resource_snippet(mut self, snippet: &'a ResourceSnippet) -> Self {
        self.resource_snippet = Some(snippet);
        self
    }

    pub fn with_workflow_object(mut self, object: &'a WorkflowObject) -> Self {
        self.workflow_object = Some(object);
        self
    }
}

/// Renders logic-enabled templates against a topology model.
///
/// The registry is immutable after construction: helpers are registered
/// once and every render call builds its own scope, so independent renders
/// can run concurrently on the same renderer without observing each
/// other's bindings.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a renderer with the helper table registered.
    ///
    /// Strict mode stays off: an unresolved variable reference renders as
    /// the empty string instead of failing the template.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        // Artifacts are JSON/YAML/code, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        functions::register(&mut registry);
        Self { registry }
    }

    /// Renders a template string against the model and the optional
    /// context objects.
    pub fn render(
        &self,
        template: &str,
        model: &TopologyModel,
        args: &RenderArgs<'_>,
    ) -> RenderResult<String> {
        let scope = build_scope(model, args)?;
        Ok(self.registry.render_template(template, &scope)?)
    }
}

/// Assembles the named-variable scope for one render call.
///
/// `model` is always bound. When a node is supplied it is located in the
/// model so that its bus and application can be bound too, and the node is
/// rebound under a type-narrowed alias so templates can use kind-specific
/// fields without casting. A node that cannot be located leaves only
/// `model` bound; the render still proceeds.
fn build_scope(model: &TopologyModel, args: &RenderArgs<'_>) -> RenderResult<Map<String, Value>> {
    let mut scope = Map::new();
    scope.insert("model".to_string(), serde_json::to_value(model)?);

    if let Some(node) = args.node {
        let located = model.find_messaging_object(node.key());

        // The locator hands back the bus even when the key matches
        // nothing, so attachment means the key resolved to the bus
        // itself, an application or a leaf node.
        let attached = located.node.is_some()
            || located.application.is_some()
            || located.message_bus.map_or(false, |bus| bus.key == node.key());

        if attached {
            if let Some(bus) = located.message_bus {
                scope.insert("message_bus".to_string(), serde_json::to_value(bus)?);
            }

            if let Some(application) = located.application {
                scope.insert("application".to_string(), serde_json::to_value(application)?);
            }

            if let Some(found) = located.node {
                scope.insert("messaging_object".to_string(), found.to_value());

                // Closed dispatch over the node kind: one alias per variant.
                let alias = match found {
                    NodeRef::Message(_) => "message",
                    NodeRef::Channel(_) => "channel",
                    NodeRef::Intermediary(_) => "intermediary",
                    NodeRef::Endpoint(_) => "endpoint",
                };
                scope.insert(alias.to_string(), found.to_value());
            }
        } else {
            // Render proceeds with no extra bindings.
            warn!(
                "Messaging object with key '{}' is not in the target model",
                node.key()
            );
        }
    }

    if let Some(template) = args.resource_template {
        scope.insert("resource_template".to_string(), serde_json::to_value(template)?);
    }

    if let Some(snippet) = args.resource_snippet {
        scope.insert("resource_snippet".to_string(), serde_json::to_value(snippet)?);
    }

    if let Some(object) = args.workflow_object {
        scope.insert("workflow_object".to_string(), serde_json::to_value(object)?);
    }

    Ok(scope)
}
