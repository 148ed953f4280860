//! Workflow objects used for nested process-definition rendering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An element of a process definition (activity, variable, channel, ...)
/// rendered through snippets.
///
/// Workflow objects live inside intermediary property bags rather than in
/// the topology tree itself; the renderer binds one as `workflow_object`
/// when a snippet renders a fragment of a process definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowObject {
    pub name: String,
    pub key: String,
    /// Free-form tag describing the workflow element, e.g. `activity`.
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl WorkflowObject {
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            object_type: object_type.into(),
            properties: HashMap::new(),
        }
    }
}
