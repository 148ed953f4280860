//! # bridge_config
//!
//! Declarative configuration for artifact generation.
//!
//! Configuration documents are YAML mappings with four top-level
//! collections: resource maps, resources, resource templates and resource
//! snippets. The [`ArtifactResolver`] walks a loaded document set to find
//! the templates and snippets applicable to a topology node for the
//! active target variant, narrowing file lists to the active deployment
//! environment.
//!
//! ## Example
//!
//! ```rust
//! use bridge_config::{documents_from_str, ArtifactResolver};
//!
//! let yaml = r#"
//! resourceMaps:
//!   - map: applicationQueue
//!     resources: [queueResource]
//! resources:
//!   - resource: queueResource
//!     targets:
//!       - target: [multi-tenant]
//!         templates: [deployQueue]
//! resourceTemplates:
//!   - template: deployQueue
//!     templateType: handlebars
//!     resourceName: queue
//!     resourceType: messaging.queue
//!     files:
//!       - env: [dev]
//!         paths: [queue.json.hbs]
//! "#;
//!
//! let documents = documents_from_str(yaml).unwrap();
//! let resolver = ArtifactResolver::new(&documents);
//! let resolved = resolver.resolve("applicationQueue", "multi-tenant", "dev").unwrap();
//! assert_eq!(resolved.templates[0].files, vec!["queue.json.hbs"]);
//! ```

pub mod documents;
pub mod error;
pub mod repository;
pub mod resolver;

pub use documents::{
    GeneratorDocument, ResourceEntry, ResourceMap, SnippetDefinition, SnippetFileEntry,
    TargetRule, TemplateDefinition, TemplateFileGroup,
};
pub use error::{ConfigError, ConfigResult};
pub use repository::{ConfigurationRepository, FileConfigurationRepository};
pub use resolver::{documents_from_str, ArtifactResolver, ResolvedArtifacts};
