//! Integration tests for the topology locator.

use bridge_model::{
    Application, Channel, Endpoint, Intermediary, Message, MessageBus, NodeKind, NodeRef,
    TargetVariant, TopologyModel,
};

fn two_app_model() -> TopologyModel {
    let mut bus = MessageBus::new("Enterprise Bus", "Bus");

    let mut app_a = Application::new("AppA", "Bus:AppA");
    app_a.messages.push(Message::new("Order", "Bus:AppA:Order"));
    app_a.channels.push(Channel::new("OrderQueue", "Bus:AppA:OrderQueue"));
    app_a
        .endpoints
        .push(Endpoint::new("FtpReceive", "Bus:AppA:FtpReceive"));
    app_a
        .intermediaries
        .push(Intermediary::new("OrderRouter", "Bus:AppA:OrderRouter"));

    let mut app_b = Application::new("AppB", "Bus:AppB");
    app_b.messages.push(Message::new("Invoice", "Bus:AppB:Invoice"));

    bus.applications.push(app_a);
    bus.applications.push(app_b);

    let mut model = TopologyModel::new(TargetVariant::MultiTenant, "dev");
    model.message_bus = Some(bus);
    model
}

#[test]
fn locates_nodes_in_second_application() {
    let model = two_app_model();
    let found = model.find_messaging_object("Bus:AppB:Invoice");

    assert_eq!(found.application.map(|a| a.name.as_str()), Some("AppB"));
    let node = found.node.expect("invoice should be found");
    assert_eq!(node.kind(), NodeKind::Message);
    assert_eq!(node.name(), "Invoice");
}

#[test]
fn locates_each_leaf_kind() {
    let model = two_app_model();

    for (key, kind) in [
        ("Bus:AppA:Order", NodeKind::Message),
        ("Bus:AppA:OrderQueue", NodeKind::Channel),
        ("Bus:AppA:FtpReceive", NodeKind::Endpoint),
        ("Bus:AppA:OrderRouter", NodeKind::Intermediary),
    ] {
        let found = model.find_messaging_object(key);
        assert_eq!(found.node.map(|n| n.kind()), Some(kind), "key {key}");
    }
}

#[test]
fn duplicate_keys_resolve_to_first_in_traversal_order() {
    // Key uniqueness is not enforced by the model; the locator scans
    // messages before channels, so the message wins here.
    let mut bus = MessageBus::new("Bus", "Bus");
    let mut app = Application::new("AppA", "Bus:AppA");
    app.messages.push(Message::new("AsMessage", "Bus:AppA:Dup"));
    app.channels.push(Channel::new("AsChannel", "Bus:AppA:Dup"));
    bus.applications.push(app);

    let mut model = TopologyModel::new(TargetVariant::MultiTenant, "dev");
    model.message_bus = Some(bus);

    let found = model.find_messaging_object("Bus:AppA:Dup");
    match found.node {
        Some(NodeRef::Message(m)) => assert_eq!(m.name, "AsMessage"),
        other => panic!("expected the message to win, got {other:?}"),
    }
}

#[test]
fn empty_key_matches_nothing() {
    let model = two_app_model();
    let found = model.find_messaging_object("");
    assert!(found.message_bus.is_some());
    assert!(found.node.is_none());
}
