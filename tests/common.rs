//! Common test utilities for building pipeline graphs and snapshots.
use flowspec::prelude::*;

/// Builds a node with the given attribute pairs.
#[allow(dead_code)]
pub fn node_with_attrs(
    id: &str,
    kind: NodeKind,
    subtype: &str,
    attrs: &[(&str, AttrValue)],
) -> PipelineNode {
    let mut node = PipelineNode::new(id, kind, subtype);
    for (key, value) in attrs {
        node.attributes.insert((*key).to_string(), value.clone());
    }
    node
}

/// The three-stage pipeline from the export scenario: a database source
/// feeding a kafka processor feeding an API output.
#[allow(dead_code)]
pub fn create_scenario_pipeline() -> PipelineGraph {
    let mut graph = PipelineGraph::default();

    graph.add_node(node_with_attrs(
        "src-1",
        NodeKind::DataSource,
        "database",
        &[
            ("label", AttrValue::from("Orders DB")),
            ("connectionUrl", AttrValue::from("postgres://db:5432/shop")),
            ("table", AttrValue::from("orders")),
            ("query", AttrValue::from("SELECT * FROM orders")),
            ("username", AttrValue::from("reader")),
            ("password", AttrValue::from("secret")),
        ],
    ));
    graph.add_node(node_with_attrs(
        "proc-1",
        NodeKind::Processor,
        "kafka",
        &[
            ("label", AttrValue::from("Order Stream")),
            ("brokerUrl", AttrValue::from("kafka:9092")),
            ("topic", AttrValue::from("orders-topic")),
            ("partitions", AttrValue::from(3.0)),
            ("businessRules", AttrValue::from("dedupe by order id")),
        ],
    ));
    graph.add_node(node_with_attrs(
        "out-1",
        NodeKind::Output,
        "api",
        &[
            ("label", AttrValue::from("Orders API")),
            ("destination", AttrValue::from("/sink")),
            ("format", AttrValue::from("json")),
        ],
    ));

    graph.add_edge(PipelineEdge::new("e1", "src-1", "proc-1"));
    graph.add_edge(PipelineEdge::new("e2", "proc-1", "out-1"));

    graph
}

/// A snapshot whose single node id serves as an identity marker.
#[allow(dead_code)]
pub fn marked_snapshot(marker: &str) -> Snapshot {
    let mut graph = PipelineGraph::default();
    graph.add_node(PipelineNode::new(marker, NodeKind::Processor, "transform"));
    Snapshot::capture(&graph, Viewport::default())
}

/// Asserts that every `$ref` in the document resolves to an existing entry
/// in the section it points into.
#[allow(dead_code)]
pub fn assert_refs_resolve(document: &AsyncApiDocument) {
    for server in document.servers.values() {
        for scheme_ref in &server.security {
            assert!(
                document
                    .components
                    .security_schemes
                    .contains_key(scheme_ref.target()),
                "unresolved security scheme ref '{}'",
                scheme_ref.target()
            );
        }
    }
    for channel in document.channels.values() {
        for message_ref in channel.messages.values() {
            assert!(
                document
                    .components
                    .messages
                    .contains_key(message_ref.target()),
                "unresolved message ref '{}'",
                message_ref.target()
            );
        }
    }
    for operation in document.operations.values() {
        assert!(
            document.channels.contains_key(operation.channel.target()),
            "unresolved channel ref '{}'",
            operation.channel.target()
        );
        if let Some(bindings) = &operation.bindings {
            if let Some(server_ref) = &bindings.source_server {
                assert!(
                    document.servers.contains_key(server_ref.target()),
                    "unresolved server ref '{}'",
                    server_ref.target()
                );
            }
        }
    }
    for message in document.components.messages.values() {
        if let Some(payload_ref) = &message.payload {
            assert!(
                document.components.schemas.contains_key(payload_ref.target()),
                "unresolved schema ref '{}'",
                payload_ref.target()
            );
        }
    }
}
