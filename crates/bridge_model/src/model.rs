//! The topology model root and node lookup.

use serde::{Deserialize, Serialize};

use crate::nodes::{Application, MessageBus, NodeRef};
use crate::resources::ResourceTemplate;

/// Deployment platform flavor that artifacts are filtered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TargetVariant {
    /// Shared multi-tenant messaging platform.
    #[default]
    MultiTenant,
    /// Dedicated single-tenant environment.
    Isolated,
}

impl TargetVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetVariant::MultiTenant => "multi-tenant",
            TargetVariant::Isolated => "isolated",
        }
    }
}

impl std::fmt::Display for TargetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of locating a node by key: the node together with its ancestors.
///
/// All fields are `None` when the bus is absent; `application` and `node`
/// stay `None` when the key names the bus or matches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Located<'a> {
    pub message_bus: Option<&'a MessageBus>,
    pub application: Option<&'a Application>,
    pub node: Option<NodeRef<'a>>,
}

/// The in-memory model of the topology being migrated.
///
/// Upstream discovery stages populate the tree; this crate only reads it,
/// apart from the artifact attachments appended by the resource generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyModel {
    /// Platform flavor used to filter target rules in configuration.
    #[serde(default)]
    pub target_variant: TargetVariant,
    /// Environment tier (dev/test/prod, ...) used to filter artifact files.
    #[serde(default)]
    pub deployment_environment: String,
    #[serde(default)]
    pub subscription_id: Option<String>,
    /// Primary platform region, as a display name (e.g. `West Europe`).
    #[serde(default)]
    pub primary_region: Option<String>,
    #[serde(default)]
    pub secondary_region: Option<String>,
    /// Unique value used to prefix or suffix generated resource names.
    #[serde(default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub message_bus: Option<MessageBus>,
}

impl TopologyModel {
    pub fn new(
        target_variant: TargetVariant,
        deployment_environment: impl Into<String>,
    ) -> Self {
        Self {
            target_variant,
            deployment_environment: deployment_environment.into(),
            ..Default::default()
        }
    }

    /// Locates a node by its key, together with its owning bus and
    /// application.
    ///
    /// The bus key is checked first, then each application in declaration
    /// order; within an application, messages, channels, endpoints and
    /// intermediaries are scanned in that fixed order and the first exact
    /// key match wins. Node keys are expected to be unique; under
    /// duplicates the first match in traversal order is returned.
    pub fn find_messaging_object(&self, key: &str) -> Located<'_> {
        let Some(bus) = self.message_bus.as_ref() else {
            return Located::default();
        };

        if bus.key == key {
            return Located {
                message_bus: Some(bus),
                application: None,
                node: None,
            };
        }

        for application in &bus.applications {
            if application.key == key {
                return Located {
                    message_bus: Some(bus),
                    application: Some(application),
                    node: None,
                };
            }

            let node = application
                .messages
                .iter()
                .find(|m| m.key == key)
                .map(NodeRef::from)
                .or_else(|| {
                    application
                        .channels
                        .iter()
                        .find(|c| c.key == key)
                        .map(NodeRef::from)
                })
                .or_else(|| {
                    application
                        .endpoints
                        .iter()
                        .find(|e| e.key == key)
                        .map(NodeRef::from)
                })
                .or_else(|| {
                    application
                        .intermediaries
                        .iter()
                        .find(|i| i.key == key)
                        .map(NodeRef::from)
                });

            if node.is_some() {
                return Located {
                    message_bus: Some(bus),
                    application: Some(application),
                    node,
                };
            }
        }

        Located {
            message_bus: Some(bus),
            application: None,
            node: None,
        }
    }

    /// Finds the first resolved template with the given key on any leaf
    /// node.
    ///
    /// Bus- and application-level attachments are not searched; use
    /// [`TopologyModel::all_resource_templates`] for the full set.
    pub fn find_resource_template(&self, template_key: &str) -> Option<&ResourceTemplate> {
        let bus = self.message_bus.as_ref()?;

        for application in &bus.applications {
            let found = application
                .messages
                .iter()
                .flat_map(|m| &m.resources)
                .chain(application.channels.iter().flat_map(|c| &c.resources))
                .chain(application.intermediaries.iter().flat_map(|i| &i.resources))
                .chain(application.endpoints.iter().flat_map(|e| &e.resources))
                .find(|r| r.template_key == template_key);
            if found.is_some() {
                return found;
            }
        }

        None
    }

    /// Iterates over every resolved template in the model, bus and
    /// application attachments included.
    pub fn all_resource_templates(&self) -> impl Iterator<Item = &ResourceTemplate> {
        self.message_bus.iter().flat_map(|bus| {
            bus.resources.iter().chain(bus.applications.iter().flat_map(|a| {
                a.resources
                    .iter()
                    .chain(a.messages.iter().flat_map(|m| &m.resources))
                    .chain(a.channels.iter().flat_map(|c| &c.resources))
                    .chain(a.intermediaries.iter().flat_map(|i| &i.resources))
                    .chain(a.endpoints.iter().flat_map(|e| &e.resources))
            }))
        })
    }
}
