//! Resolved artifact records attached to topology nodes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A deployment artifact resolved for a node from a template definition.
///
/// Built by the lookup engine by copying fields out of a matched template
/// definition, with `files` narrowed to the file groups whose environment
/// list contains the active deployment environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResourceTemplate {
    pub template_key: String,
    /// Key of the template engine used to render the artifact files.
    pub template_type: String,
    pub resource_name: String,
    pub resource_type: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    /// Template files applicable to the active deployment environment.
    #[serde(default)]
    pub files: Vec<String>,
}

/// A code or DSL fragment resolved for a node from a snippet definition.
///
/// Unlike a template, a snippet carries at most one file for the active
/// environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResourceSnippet {
    pub snippet_key: String,
    /// Key of the template engine used to render the snippet.
    pub snippet_type: String,
    pub resource_name: String,
    pub resource_type: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    /// Snippet file applicable to the active deployment environment.
    #[serde(default)]
    pub file: Option<String>,
}
