//! Topology node definitions.
//!
//! The topology is a tree: a message bus owns applications, and each
//! application owns the messages, channels, intermediaries and endpoints
//! that make up an integration solution. Every node carries a unique
//! colon-delimited key (`Bus:AppA:ChannelX`), an optional resource map key
//! that opts the node into artifact generation, and the artifact records
//! attached to it by the resource generator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::resources::{ResourceSnippet, ResourceTemplate};

/// Kind tag for a topology node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    MessageBus,
    Application,
    Message,
    Channel,
    Endpoint,
    Intermediary,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::MessageBus => "message_bus",
            NodeKind::Application => "application",
            NodeKind::Message => "message",
            NodeKind::Channel => "channel",
            NodeKind::Endpoint => "endpoint",
            NodeKind::Intermediary => "intermediary",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message payload style carried on the bus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Document,
    Envelope,
    Command,
    Event,
    Ack,
    Nack,
}

/// Serialized representation of a message body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageContentKind {
    #[default]
    Json,
    Xml,
    Delimited,
    Positional,
    Yaml,
    Binary,
}

/// Messaging strategy a channel implements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    #[default]
    PointToPoint,
    PublishSubscribe,
    Datatype,
    DeadLetter,
    InvalidMessage,
    GuaranteedDelivery,
}

/// Delivery guarantee offered by a channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryGuarantee {
    #[default]
    None,
    AtLeastOnce,
}

/// Connection strategy an endpoint uses against the bus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    #[default]
    Adapter,
    ServiceActivator,
    IdempotentReceiver,
    EventDrivenConsumer,
    CompetingConsumer,
    PollingConsumer,
    MessageDispatcher,
    Subscriber,
}

/// Direction and conversation style of an endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExchangePattern {
    #[default]
    Receive,
    Accept,
    ReceiveResponse,
    Send,
    FireForget,
}

/// Processing role an intermediary plays between endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntermediaryKind {
    #[default]
    MessageRouter,
    MessageProcessor,
    MessageTranslator,
    Splitter,
    Aggregator,
    ProcessManager,
}

/// The root messaging construct that owns all applications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBus {
    pub name: String,
    pub key: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resource_map_key: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    #[serde(default)]
    pub snippets: Vec<ResourceSnippet>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl MessageBus {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            node_type: NodeKind::MessageBus,
            ..Default::default()
        }
    }
}

/// An integration solution that sends and receives messages over the bus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub key: String,
    #[serde(rename = "type", default = "application_kind")]
    pub node_type: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resource_map_key: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    #[serde(default)]
    pub snippets: Vec<ResourceSnippet>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub intermediaries: Vec<Intermediary>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

fn application_kind() -> NodeKind {
    NodeKind::Application
}

impl Application {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            node_type: NodeKind::Application,
            ..Default::default()
        }
    }
}

/// A data structure exchanged over the bus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    pub key: String,
    #[serde(rename = "type", default = "message_kind")]
    pub node_type: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub message_kind: MessageKind,
    #[serde(default)]
    pub content_kind: MessageContentKind,
    #[serde(default)]
    pub resource_map_key: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    #[serde(default)]
    pub snippets: Vec<ResourceSnippet>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

fn message_kind() -> NodeKind {
    NodeKind::Message
}

impl Message {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            node_type: NodeKind::Message,
            ..Default::default()
        }
    }
}

/// A conduit that carries messages between endpoints and intermediaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub key: String,
    #[serde(rename = "type", default = "channel_kind")]
    pub node_type: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_kind: ChannelKind,
    #[serde(default)]
    pub delivery_guarantee: DeliveryGuarantee,
    #[serde(default)]
    pub resource_map_key: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    #[serde(default)]
    pub snippets: Vec<ResourceSnippet>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

fn channel_kind() -> NodeKind {
    NodeKind::Channel
}

impl Channel {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            node_type: NodeKind::Channel,
            ..Default::default()
        }
    }
}

/// An application connection point that sends or receives over channels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub key: String,
    #[serde(rename = "type", default = "endpoint_kind")]
    pub node_type: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoint_kind: EndpointKind,
    #[serde(default)]
    pub exchange_pattern: ExchangePattern,
    #[serde(default)]
    pub resource_map_key: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    #[serde(default)]
    pub snippets: Vec<ResourceSnippet>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

fn endpoint_kind() -> NodeKind {
    NodeKind::Endpoint
}

impl Endpoint {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            node_type: NodeKind::Endpoint,
            ..Default::default()
        }
    }
}

/// A processing step acting on messages as they flow between endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intermediary {
    pub name: String,
    pub key: String,
    #[serde(rename = "type", default = "intermediary_kind")]
    pub node_type: NodeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub intermediary_kind: IntermediaryKind,
    #[serde(default)]
    pub resource_map_key: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTemplate>,
    #[serde(default)]
    pub snippets: Vec<ResourceSnippet>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

fn intermediary_kind() -> NodeKind {
    NodeKind::Intermediary
}

impl Intermediary {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            node_type: NodeKind::Intermediary,
            ..Default::default()
        }
    }
}

/// Common surface for nodes that can carry resolved artifacts.
///
/// The resource generator walks the tree through this trait so the attach
/// logic is written once for all six node types; the renderer uses it to
/// accept any node kind as render context.
pub trait ArtifactCarrier {
    fn name(&self) -> &str;
    fn key(&self) -> &str;
    fn kind(&self) -> NodeKind;
    fn resource_map_key(&self) -> Option<&str>;
    fn resources(&self) -> &[ResourceTemplate];
    fn snippets(&self) -> &[ResourceSnippet];
    fn resources_mut(&mut self) -> &mut Vec<ResourceTemplate>;
    fn snippets_mut(&mut self) -> &mut Vec<ResourceSnippet>;
}

macro_rules! impl_artifact_carrier {
    ($($ty:ty),+) => {
        $(impl ArtifactCarrier for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn key(&self) -> &str {
                &self.key
            }

            fn kind(&self) -> NodeKind {
                self.node_type
            }

            fn resource_map_key(&self) -> Option<&str> {
                self.resource_map_key.as_deref()
            }

            fn resources(&self) -> &[ResourceTemplate] {
                &self.resources
            }

            fn snippets(&self) -> &[ResourceSnippet] {
                &self.snippets
            }

            fn resources_mut(&mut self) -> &mut Vec<ResourceTemplate> {
                &mut self.resources
            }

            fn snippets_mut(&mut self) -> &mut Vec<ResourceSnippet> {
                &mut self.snippets
            }
        })+
    };
}

impl_artifact_carrier!(MessageBus, Application, Message, Channel, Endpoint, Intermediary);

/// Borrowed reference to a leaf node, tagged with its kind.
///
/// The closed set of variants is what drives the type-narrowed template
/// binding: each variant maps to exactly one extra variable name in the
/// render scope.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Message(&'a Message),
    Channel(&'a Channel),
    Endpoint(&'a Endpoint),
    Intermediary(&'a Intermediary),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Message(m) => &m.name,
            NodeRef::Channel(c) => &c.name,
            NodeRef::Endpoint(e) => &e.name,
            NodeRef::Intermediary(i) => &i.name,
        }
    }

    pub fn key(&self) -> &'a str {
        match self {
            NodeRef::Message(m) => &m.key,
            NodeRef::Channel(c) => &c.key,
            NodeRef::Endpoint(e) => &e.key,
            NodeRef::Intermediary(i) => &i.key,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Message(_) => NodeKind::Message,
            NodeRef::Channel(_) => NodeKind::Channel,
            NodeRef::Endpoint(_) => NodeKind::Endpoint,
            NodeRef::Intermediary(_) => NodeKind::Intermediary,
        }
    }

    /// Serialize the underlying node to a JSON value.
    pub fn to_value(&self) -> serde_json::Value {
        let result = match self {
            NodeRef::Message(m) => serde_json::to_value(m),
            NodeRef::Channel(c) => serde_json::to_value(c),
            NodeRef::Endpoint(e) => serde_json::to_value(e),
            NodeRef::Intermediary(i) => serde_json::to_value(i),
        };
        result.unwrap_or(serde_json::Value::Null)
    }
}

impl<'a> From<&'a Message> for NodeRef<'a> {
    fn from(node: &'a Message) -> Self {
        NodeRef::Message(node)
    }
}

impl<'a> From<&'a Channel> for NodeRef<'a> {
    fn from(node: &'a Channel) -> Self {
        NodeRef::Channel(node)
    }
}

impl<'a> From<&'a Endpoint> for NodeRef<'a> {
    fn from(node: &'a Endpoint) -> Self {
        NodeRef::Endpoint(node)
    }
}

impl<'a> From<&'a Intermediary> for NodeRef<'a> {
    fn from(node: &'a Intermediary) -> Self {
        NodeRef::Intermediary(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_tags() {
        let channel = Channel::new("OrderQueue", "Bus:AppA:OrderQueue");
        let value = serde_json::to_value(&channel).unwrap();
        assert_eq!(value["type"], "channel");
        assert_eq!(value["name"], "OrderQueue");
    }

    #[test]
    fn test_node_ref_kind() {
        let message = Message::new("Order", "Bus:AppA:Order");
        let node = NodeRef::from(&message);
        assert_eq!(node.kind(), NodeKind::Message);
        assert_eq!(node.key(), "Bus:AppA:Order");
    }

    #[test]
    fn test_deserialize_defaults_kind_tag() {
        let app: Application = serde_yaml::from_str(
            r#"
name: AppA
key: Bus:AppA
"#,
        )
        .unwrap();
        assert_eq!(app.node_type, NodeKind::Application);
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_artifact_carrier_surface() {
        let mut endpoint = Endpoint::new("FtpReceive", "Bus:AppA:FtpReceive");
        endpoint.resource_map_key = Some("endpointFtp".into());

        let carrier: &mut dyn ArtifactCarrier = &mut endpoint;
        assert_eq!(carrier.resource_map_key(), Some("endpointFtp"));
        assert!(carrier.resources_mut().is_empty());
    }
}
