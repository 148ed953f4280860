//! Artifact resolution against the configuration document set.
//!
//! Given a node's resource map key, the resolver walks the loaded
//! documents to find the applicable template and snippet definitions for
//! the active target variant, then materializes them with their file lists
//! narrowed to the active deployment environment.
//!
//! Documents are scanned directly on every lookup; the sets are small and
//! loaded once per run, so no key index is built.

use tracing::trace;

use bridge_model::{ResourceSnippet, ResourceTemplate};

use crate::documents::{
    flatten_parameters, flatten_tags, GeneratorDocument, ResourceEntry, ResourceMap,
    SnippetDefinition, TemplateDefinition,
};
use crate::error::{ConfigError, ConfigResult};

/// Templates and snippets resolved for one resource map key.
#[derive(Debug, Clone, Default)]
pub struct ResolvedArtifacts {
    pub templates: Vec<ResourceTemplate>,
    pub snippets: Vec<ResourceSnippet>,
}

impl ResolvedArtifacts {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.snippets.is_empty()
    }
}

/// Resolves artifact definitions from a set of configuration documents.
///
/// The resolver never mutates the topology; callers append the returned
/// records to the node they resolved for.
pub struct ArtifactResolver<'a> {
    documents: &'a [GeneratorDocument],
}

impl<'a> ArtifactResolver<'a> {
    pub fn new(documents: &'a [GeneratorDocument]) -> Self {
        Self { documents }
    }

    /// Resolves the artifacts for a resource map key.
    ///
    /// Returns [`ConfigError::ResourceMapNotFound`] when no document
    /// defines the map (recoverable) and [`ConfigError::MissingField`]
    /// when a selected definition is malformed (fatal). Resource ids with
    /// no matching entry and rules for other variants are skipped.
    pub fn resolve(
        &self,
        resource_map_key: &str,
        target_variant: &str,
        deployment_environment: &str,
    ) -> ConfigResult<ResolvedArtifacts> {
        let map = self
            .find_map(resource_map_key)
            .ok_or_else(|| ConfigError::ResourceMapNotFound(resource_map_key.to_string()))?;

        let mut resolved = ResolvedArtifacts::default();

        for resource_id in &map.resources {
            trace!("Looking for targets for resource '{}'", resource_id);

            let Some(entry) = self.find_resource(resource_id) else {
                trace!("Resource '{}' has no entry, skipping", resource_id);
                continue;
            };

            // Rules are not mutually exclusive: every rule naming the
            // active variant contributes.
            for rule in &entry.targets {
                if !rule.matches(target_variant) {
                    continue;
                }

                for template_key in &rule.templates {
                    if let Some(definition) = self.find_template(template_key) {
                        resolved
                            .templates
                            .push(materialize_template(definition, deployment_environment)?);
                    }
                }

                for snippet_key in &rule.snippets {
                    if let Some(definition) = self.find_snippet(snippet_key) {
                        resolved
                            .snippets
                            .push(materialize_snippet(definition, deployment_environment)?);
                    }
                }
            }
        }

        Ok(resolved)
    }

    fn find_map(&self, key: &str) -> Option<&ResourceMap> {
        trace!("Looking for resource map '{}'", key);
        self.documents
            .iter()
            .flat_map(|d| &d.resource_maps)
            .find(|m| m.map == key)
    }

    fn find_resource(&self, key: &str) -> Option<&ResourceEntry> {
        self.documents
            .iter()
            .flat_map(|d| &d.resources)
            .find(|r| r.resource == key)
    }

    fn find_template(&self, key: &str) -> Option<&TemplateDefinition> {
        trace!("Looking for template '{}'", key);
        self.documents
            .iter()
            .flat_map(|d| &d.resource_templates)
            .find(|t| t.template == key)
    }

    fn find_snippet(&self, key: &str) -> Option<&SnippetDefinition> {
        trace!("Looking for snippet '{}'", key);
        self.documents
            .iter()
            .flat_map(|d| &d.resource_snippets)
            .find(|s| s.snippet == key)
    }
}

/// Copies a template definition into a resolved record, narrowing its file
/// groups to the active deployment environment.
fn materialize_template(
    definition: &TemplateDefinition,
    deployment_environment: &str,
) -> ConfigResult<ResourceTemplate> {
    let mut files = Vec::new();
    for group in &definition.files {
        if matches_environment(&group.env, deployment_environment) {
            files.extend(group.paths.iter().cloned());
        }
    }

    Ok(ResourceTemplate {
        template_key: definition.template.clone(),
        template_type: mandatory(&definition.template_type, &definition.template, "templateType")?,
        resource_name: mandatory(&definition.resource_name, &definition.template, "resourceName")?,
        resource_type: mandatory(&definition.resource_type, &definition.template, "resourceType")?,
        output_path: definition.output_path.clone(),
        tags: flatten_tags(&definition.tags),
        parameters: flatten_parameters(&definition.parameters),
        files,
    })
}

/// Copies a snippet definition into a resolved record.
///
/// When several file entries match the environment, the last one processed
/// wins. Existing configuration sets rely on that ordering; do not
/// silently change it to first-match.
fn materialize_snippet(
    definition: &SnippetDefinition,
    deployment_environment: &str,
) -> ConfigResult<ResourceSnippet> {
    let mut file = None;
    for entry in &definition.files {
        if matches_environment(&entry.env, deployment_environment) {
            file = entry.path.clone();
        }
    }

    Ok(ResourceSnippet {
        snippet_key: definition.snippet.clone(),
        snippet_type: mandatory(&definition.snippet_type, &definition.snippet, "snippetType")?,
        resource_name: mandatory(&definition.resource_name, &definition.snippet, "resourceName")?,
        resource_type: mandatory(&definition.resource_type, &definition.snippet, "resourceType")?,
        output_path: definition.output_path.clone(),
        parameters: flatten_parameters(&definition.parameters),
        file,
    })
}

fn matches_environment(env: &[String], deployment_environment: &str) -> bool {
    env.iter()
        .any(|e| e.eq_ignore_ascii_case(deployment_environment))
}

fn mandatory(
    value: &Option<String>,
    definition: &str,
    field: &'static str,
) -> ConfigResult<String> {
    value.clone().ok_or_else(|| ConfigError::MissingField {
        definition: definition.to_string(),
        field,
    })
}

/// Convenience constructor for tests and small tools: parses a single
/// YAML document string into a one-document set.
pub fn documents_from_str(yaml: &str) -> ConfigResult<Vec<GeneratorDocument>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(yaml) {
        documents.push(serde::Deserialize::deserialize(document)?);
    }
    Ok(documents)
}
