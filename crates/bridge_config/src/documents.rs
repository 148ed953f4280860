//! Configuration document definitions.
//!
//! A configuration document is a YAML mapping with up to four top-level
//! collections: `resourceMaps`, `resources`, `resourceTemplates` and
//! `resourceSnippets`. A run loads a set of documents; the same key may be
//! defined redundantly across documents and lookups stop at the first
//! document that defines it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One parsed configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorDocument {
    #[serde(default)]
    pub resource_maps: Vec<ResourceMap>,
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    #[serde(default)]
    pub resource_templates: Vec<TemplateDefinition>,
    #[serde(default)]
    pub resource_snippets: Vec<SnippetDefinition>,
}

/// Maps a node's resource map key to an ordered list of resource ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMap {
    pub map: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// A resource id paired with its target rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub resource: String,
    #[serde(default)]
    pub targets: Vec<TargetRule>,
}

/// Templates and snippets applicable when one of the rule's target
/// variants is active.
///
/// Rules are tested in declaration order and are not mutually exclusive:
/// every matching rule contributes its templates and snippets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetRule {
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub snippets: Vec<String>,
}

impl TargetRule {
    /// Case-insensitive test against the active target variant.
    pub fn matches(&self, variant: &str) -> bool {
        self.target.iter().any(|t| t.eq_ignore_ascii_case(variant))
    }
}

/// Declares a deployment artifact built from one or more template files.
///
/// `template` identifies the definition; `templateType`, `resourceName`
/// and `resourceType` are mandatory but only checked when a rule actually
/// selects the definition, so an unused malformed entry does not poison
/// the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub template: String,
    #[serde(default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub resource_name: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    /// List of single-entry `{name: value}` maps, as authored in YAML.
    #[serde(default)]
    pub tags: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub parameters: Vec<HashMap<String, serde_yaml::Value>>,
    #[serde(default)]
    pub files: Vec<TemplateFileGroup>,
}

/// A group of template files scoped to a set of deployment environments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFileGroup {
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Declares a code/DSL fragment built from a single template file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDefinition {
    pub snippet: String,
    #[serde(default)]
    pub snippet_type: Option<String>,
    #[serde(default)]
    pub resource_name: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub parameters: Vec<HashMap<String, serde_yaml::Value>>,
    #[serde(default)]
    pub files: Vec<SnippetFileEntry>,
}

/// A single snippet file scoped to a set of deployment environments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetFileEntry {
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Flattens a YAML list of single-entry maps into one dictionary, with
/// values converted to JSON for the render scope.
pub(crate) fn flatten_parameters(
    entries: &[HashMap<String, serde_yaml::Value>],
) -> HashMap<String, serde_json::Value> {
    let mut flattened = HashMap::new();
    for entry in entries {
        for (name, value) in entry {
            let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
            flattened.insert(name.clone(), json);
        }
    }
    flattened
}

/// Flattens a YAML list of single-entry string maps into one dictionary.
pub(crate) fn flatten_tags(entries: &[HashMap<String, String>]) -> HashMap<String, String> {
    let mut flattened = HashMap::new();
    for entry in entries {
        for (name, value) in entry {
            flattened.insert(name.clone(), value.clone());
        }
    }
    flattened
}
