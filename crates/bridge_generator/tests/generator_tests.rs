//! Integration tests for the generation walk.

use bridge_config::{documents_from_str, GeneratorDocument};
use bridge_generator::{GenerateError, ResourceGenerator};
use bridge_model::{
    Application, Channel, Endpoint, Intermediary, Message, MessageBus, TargetVariant,
    TopologyModel,
};
use tokio_util::sync::CancellationToken;

/// One map/resource/template chain usable by any node kind.
fn config() -> Vec<GeneratorDocument> {
    documents_from_str(
        r#"
resourceMaps:
  - map: anyNode
    resources: [anyResource]
resources:
  - resource: anyResource
    targets:
      - target: [multi-tenant]
        templates: [deployAny]
        snippets: [anySnippet]
resourceTemplates:
  - template: deployAny
    templateType: handlebars
    resourceName: any
    resourceType: messaging.any
    files:
      - env: [dev]
        paths: [any.json.hbs]
resourceSnippets:
  - snippet: anySnippet
    snippetType: handlebars
    resourceName: any-snippet
    resourceType: messaging.any.snippet
    files:
      - env: [dev]
        path: any.hbs
"#,
    )
    .unwrap()
}

fn full_model() -> TopologyModel {
    let mut bus = MessageBus::new("Bus", "Bus");
    bus.resource_map_key = Some("anyNode".into());

    let mut app = Application::new("AppA", "Bus:AppA");
    app.resource_map_key = Some("anyNode".into());

    let mut message = Message::new("Order", "Bus:AppA:Order");
    message.resource_map_key = Some("anyNode".into());
    app.messages.push(message);

    let mut channel = Channel::new("OrderQueue", "Bus:AppA:OrderQueue");
    channel.resource_map_key = Some("anyNode".into());
    app.channels.push(channel);

    let mut intermediary = Intermediary::new("OrderRouter", "Bus:AppA:OrderRouter");
    intermediary.resource_map_key = Some("anyNode".into());
    app.intermediaries.push(intermediary);

    let mut endpoint = Endpoint::new("FtpReceive", "Bus:AppA:FtpReceive");
    endpoint.resource_map_key = Some("anyNode".into());
    app.endpoints.push(endpoint);

    bus.applications.push(app);

    let mut model = TopologyModel::new(TargetVariant::MultiTenant, "dev");
    model.message_bus = Some(bus);
    model
}

#[test]
fn every_node_kind_is_populated() {
    let documents = config();
    let mut model = full_model();

    ResourceGenerator::new()
        .generate(&mut model, &documents, &CancellationToken::new())
        .unwrap();

    let bus = model.message_bus.as_ref().unwrap();
    assert_eq!(bus.resources.len(), 1);
    assert_eq!(bus.snippets.len(), 1);

    let app = &bus.applications[0];
    assert_eq!(app.resources.len(), 1);
    assert_eq!(app.messages[0].resources.len(), 1);
    assert_eq!(app.channels[0].resources.len(), 1);
    assert_eq!(app.intermediaries[0].resources.len(), 1);
    assert_eq!(app.endpoints[0].resources.len(), 1);
    assert_eq!(app.endpoints[0].snippets.len(), 1);
}

#[test]
fn generation_is_accumulate_only() {
    let documents = config();
    let mut model = full_model();
    let generator = ResourceGenerator::new();

    generator
        .generate(&mut model, &documents, &CancellationToken::new())
        .unwrap();
    generator
        .generate(&mut model, &documents, &CancellationToken::new())
        .unwrap();

    // A second pass appends, it does not replace.
    let bus = model.message_bus.as_ref().unwrap();
    assert_eq!(bus.resources.len(), 2);
    assert_eq!(bus.applications[0].messages[0].resources.len(), 2);
}

#[test]
fn cancellation_aborts_before_applications() {
    let documents = config();
    let mut model = full_model();

    let token = CancellationToken::new();
    token.cancel();

    let err = ResourceGenerator::new()
        .generate(&mut model, &documents, &token)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Cancelled));

    // The bus is processed before the first application check, and its
    // attachments survive the abort.
    let bus = model.message_bus.as_ref().unwrap();
    assert_eq!(bus.resources.len(), 1);
    assert!(bus.applications[0].messages[0].resources.is_empty());
}

#[test]
fn malformed_definition_aborts_the_walk() {
    let documents = documents_from_str(
        r#"
resourceMaps:
  - map: anyNode
    resources: [anyResource]
resources:
  - resource: anyResource
    targets:
      - target: [multi-tenant]
        templates: [brokenTemplate]
resourceTemplates:
  - template: brokenTemplate
    resourceName: any
    resourceType: messaging.any
"#,
    )
    .unwrap();
    let mut model = full_model();

    let err = ResourceGenerator::new()
        .generate(&mut model, &documents, &CancellationToken::new())
        .unwrap_err();
    assert!(err.to_string().contains("templateType"));
}

#[test]
fn nodes_without_map_keys_resolve_nothing() {
    let documents = config();
    let mut bus = MessageBus::new("Bus", "Bus");
    bus.applications.push(Application::new("AppA", "Bus:AppA"));

    let mut model = TopologyModel::new(TargetVariant::MultiTenant, "dev");
    model.message_bus = Some(bus);

    ResourceGenerator::new()
        .generate(&mut model, &documents, &CancellationToken::new())
        .unwrap();

    let bus = model.message_bus.as_ref().unwrap();
    assert!(bus.resources.is_empty());
    assert!(bus.applications[0].resources.is_empty());
}

#[test]
fn variant_filter_applies_across_the_walk() {
    let documents = config();
    let mut model = full_model();
    model.target_variant = TargetVariant::Isolated;

    ResourceGenerator::new()
        .generate(&mut model, &documents, &CancellationToken::new())
        .unwrap();

    // The only rule targets multi-tenant, so nothing resolves.
    let bus = model.message_bus.as_ref().unwrap();
    assert!(bus.resources.is_empty());
    assert!(bus.applications[0].endpoints[0].resources.is_empty());
}
