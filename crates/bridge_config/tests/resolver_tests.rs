//! Integration tests for artifact resolution across document sets.

use bridge_config::{documents_from_str, ArtifactResolver, ConfigError, GeneratorDocument};

fn document(yaml: &str) -> GeneratorDocument {
    let mut documents = documents_from_str(yaml).unwrap();
    documents.remove(0)
}

/// A split document set: the map lives in one document, the resource and
/// definitions in another.
fn split_config() -> Vec<GeneratorDocument> {
    vec![
        document(
            r#"
resourceMaps:
  - map: topicPublisher
    resources: [topicResource]
"#,
        ),
        document(
            r#"
resources:
  - resource: topicResource
    targets:
      - target: [multi-tenant, isolated]
        templates: [deployTopic]
      - target: [isolated]
        templates: [deployTopicNetworking]
resourceTemplates:
  - template: deployTopic
    templateType: handlebars
    resourceName: topic
    resourceType: messaging.topic
    outputPath: topics
    files:
      - env: [dev, test]
        paths: [topic.json.hbs, topic.params.json.hbs]
      - env: [prod]
        paths: [topic.prod.json.hbs]
  - template: deployTopicNetworking
    templateType: handlebars
    resourceName: topic-networking
    resourceType: messaging.topic.network
    files:
      - env: [prod]
        paths: [topic-vnet.json.hbs]
"#,
        ),
    ]
}

#[test]
fn resolves_across_documents() {
    let documents = split_config();
    let resolver = ArtifactResolver::new(&documents);

    let resolved = resolver.resolve("topicPublisher", "multi-tenant", "test").unwrap();
    assert_eq!(resolved.templates.len(), 1);
    assert_eq!(
        resolved.templates[0].files,
        vec!["topic.json.hbs", "topic.params.json.hbs"]
    );
    assert_eq!(resolved.templates[0].output_path.as_deref(), Some("topics"));
}

#[test]
fn multiple_matching_rules_accumulate() {
    let documents = split_config();
    let resolver = ArtifactResolver::new(&documents);

    // "isolated" appears in both rules, so both templates resolve.
    let resolved = resolver.resolve("topicPublisher", "isolated", "prod").unwrap();
    let keys: Vec<_> = resolved.templates.iter().map(|t| t.template_key.as_str()).collect();
    assert_eq!(keys, vec!["deployTopic", "deployTopicNetworking"]);
}

#[test]
fn variant_match_is_case_insensitive() {
    let documents = split_config();
    let resolver = ArtifactResolver::new(&documents);

    let resolved = resolver.resolve("topicPublisher", "ISOLATED", "prod").unwrap();
    assert_eq!(resolved.templates.len(), 2);
}

#[test]
fn first_document_wins_for_redundant_keys() {
    let mut documents = split_config();
    documents.insert(
        0,
        document(
            r#"
resourceMaps:
  - map: topicPublisher
    resources: []
"#,
        ),
    );

    let resolver = ArtifactResolver::new(&documents);
    let resolved = resolver.resolve("topicPublisher", "multi-tenant", "dev").unwrap();

    // The empty map in the first document shadows the later definition.
    assert!(resolved.is_empty());
}

#[test]
fn missing_map_reports_the_key() {
    let documents = split_config();
    let resolver = ArtifactResolver::new(&documents);

    match resolver.resolve("queueConsumer", "multi-tenant", "dev") {
        Err(ConfigError::ResourceMapNotFound(key)) => assert_eq!(key, "queueConsumer"),
        other => panic!("expected ResourceMapNotFound, got {other:?}"),
    }
}

#[test]
fn non_matching_variant_resolves_empty() {
    let doc = document(
        r#"
resourceMaps:
  - map: onlyIsolated
    resources: [isoResource]
resources:
  - resource: isoResource
    targets:
      - target: [isolated]
        templates: [deployIso]
resourceTemplates:
  - template: deployIso
    templateType: handlebars
    resourceName: iso
    resourceType: messaging.iso
"#,
    );
    let resolver = ArtifactResolver::new(std::slice::from_ref(&doc));

    let resolved = resolver.resolve("onlyIsolated", "multi-tenant", "dev").unwrap();
    assert!(resolved.is_empty());
}

#[test]
fn snippet_resolution_carries_parameters() {
    let doc = document(
        r#"
resourceMaps:
  - map: routerLogic
    resources: [routerResource]
resources:
  - resource: routerResource
    targets:
      - target: [multi-tenant]
        snippets: [routerExpression]
resourceSnippets:
  - snippet: routerExpression
    snippetType: handlebars
    resourceName: router-expression
    resourceType: workflow.expression
    outputPath: workflows/router
    parameters:
      - scenario: contentRouting
      - retries: 3
    files:
      - env: [dev, prod]
        path: router-expression.hbs
"#,
    );
    let resolver = ArtifactResolver::new(std::slice::from_ref(&doc));

    let resolved = resolver.resolve("routerLogic", "multi-tenant", "prod").unwrap();
    assert_eq!(resolved.snippets.len(), 1);

    let snippet = &resolved.snippets[0];
    assert_eq!(snippet.file.as_deref(), Some("router-expression.hbs"));
    assert_eq!(snippet.parameters["scenario"], serde_json::json!("contentRouting"));
    assert_eq!(snippet.parameters["retries"], serde_json::json!(3));
    assert_eq!(snippet.output_path.as_deref(), Some("workflows/router"));
}
