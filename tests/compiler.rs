//! Tests for the graph-to-document compiler passes.
mod common;
use common::*;
use flowspec::prelude::*;

#[test]
fn test_scenario_pipeline_compiles_expected_document() {
    let document = Compiler::builder(create_scenario_pipeline()).build().compile();

    // One server for the database source, one for the kafka broker.
    let db_server = document
        .servers
        .get(&DocumentKey::for_node(Section::Servers, "src-1"))
        .expect("database server missing");
    assert_eq!(db_server.host.as_deref(), Some("postgres://db:5432/shop"));
    assert_eq!(db_server.protocol, Protocol::Sql);

    let broker = document
        .servers
        .get(&DocumentKey::for_node(Section::Servers, "proc-1"))
        .expect("kafka broker server missing");
    assert_eq!(broker.host.as_deref(), Some("kafka:9092"));
    assert_eq!(broker.protocol, Protocol::Kafka);

    // The source-to-processor edge is addressed by the kafka topic.
    let flow_channel = document
        .channels
        .get(&DocumentKey::for_edge(Section::Channels, "src-1", "proc-1"))
        .expect("edge channel missing");
    assert_eq!(flow_channel.address, "orders-topic");

    // The output channel uses the declared destination and json content type.
    let out_channel = document
        .channels
        .get(&DocumentKey::for_node(Section::Channels, "out-1"))
        .expect("output channel missing");
    assert_eq!(out_channel.address, "/sink");

    let out_message = document
        .components
        .messages
        .get(&DocumentKey::for_node(Section::Messages, "out-1"))
        .expect("output message missing");
    assert_eq!(out_message.content_type, "application/json");

    assert_refs_resolve(&document);
}

#[test]
fn test_broker_server_omitted_without_broker_url() {
    let mut graph = create_scenario_pipeline();
    let processor = graph
        .nodes
        .iter_mut()
        .find(|node| node.id == "proc-1")
        .unwrap();
    processor.attributes.remove("brokerUrl");

    let document = Compiler::builder(graph).build().compile();
    assert!(
        !document
            .servers
            .contains_key(&DocumentKey::for_node(Section::Servers, "proc-1"))
    );
    // The topic-addressed channel is still emitted via the edge pass.
    let channel = document
        .channels
        .get(&DocumentKey::for_edge(Section::Channels, "src-1", "proc-1"))
        .unwrap();
    assert_eq!(channel.address, "orders-topic");
}

#[test]
fn test_source_schema_carries_table_and_query() {
    let document = Compiler::builder(create_scenario_pipeline()).build().compile();
    let schema = document
        .components
        .schemas
        .get(&DocumentKey::for_node(Section::Schemas, "src-1"))
        .expect("source schema missing");
    assert_eq!(schema.schema_type, "object");
    assert_eq!(schema.title.as_deref(), Some("orders"));
    assert_eq!(schema.raw_query.as_deref(), Some("SELECT * FROM orders"));
}

#[test]
fn test_credentials_synthesize_security_scheme() {
    let document = Compiler::builder(create_scenario_pipeline()).build().compile();

    let scheme = document
        .components
        .security_schemes
        .get(&DocumentKey::for_node(Section::SecuritySchemes, "src-1"))
        .expect("security scheme missing");
    assert_eq!(scheme.scheme_type, "userPassword");

    let server = document
        .servers
        .get(&DocumentKey::for_node(Section::Servers, "src-1"))
        .unwrap();
    assert_eq!(server.security.len(), 1);
}

#[test]
fn test_no_security_scheme_without_credentials() {
    let mut graph = create_scenario_pipeline();
    let source = graph
        .nodes
        .iter_mut()
        .find(|node| node.id == "src-1")
        .unwrap();
    source.attributes.remove("username");
    source.attributes.remove("password");

    let document = Compiler::builder(graph).build().compile();
    assert!(document.components.security_schemes.is_empty());
    let server = document
        .servers
        .get(&DocumentKey::for_node(Section::Servers, "src-1"))
        .unwrap();
    assert!(server.security.is_empty());
}

#[test]
fn test_edge_message_payload_refs_source_schema() {
    let document = Compiler::builder(create_scenario_pipeline()).build().compile();
    let message = document
        .components
        .messages
        .get(&DocumentKey::for_edge(Section::Messages, "src-1", "proc-1"))
        .expect("edge message missing");
    assert_eq!(message.content_type, "application/json");
    let payload = message.payload.as_ref().expect("payload ref missing");
    assert_eq!(
        payload.target(),
        &DocumentKey::for_node(Section::Schemas, "src-1")
    );
}

#[test]
fn test_operation_bindings_carry_processor_config_and_server_ref() {
    let document = Compiler::builder(create_scenario_pipeline()).build().compile();
    let operation = document
        .operations
        .get(&DocumentKey::for_edge(Section::Operations, "src-1", "proc-1"))
        .expect("edge operation missing");

    let bindings = operation.bindings.as_ref().expect("bindings missing");
    assert_eq!(
        bindings.processor.get("businessRules"),
        Some(&AttrValue::from("dedupe by order id"))
    );
    assert_eq!(
        bindings.processor.get("topic"),
        Some(&AttrValue::from("orders-topic"))
    );
    assert_eq!(
        bindings.source_server.as_ref().map(|r| r.target().clone()),
        Some(DocumentKey::for_node(Section::Servers, "src-1"))
    );
}

#[test]
fn test_channel_address_falls_back_per_priority() {
    // Kafka target without a topic gets a synthetic topic name.
    let mut graph = PipelineGraph::default();
    graph.add_node(node_with_attrs("a", NodeKind::DataSource, "database", &[]));
    graph.add_node(node_with_attrs("b", NodeKind::Processor, "kafka", &[]));
    graph.add_edge(PipelineEdge::new("e1", "a", "b"));
    let document = Compiler::builder(graph).build().compile();
    let channel = document
        .channels
        .get(&DocumentKey::for_edge(Section::Channels, "a", "b"))
        .unwrap();
    assert_eq!(channel.address, "topic-a-to-b");

    // A tabled data source feeding a non-kafka processor uses data/<table>.
    let mut graph = PipelineGraph::default();
    graph.add_node(node_with_attrs(
        "a",
        NodeKind::DataSource,
        "database",
        &[("table", AttrValue::from("events"))],
    ));
    graph.add_node(node_with_attrs("b", NodeKind::Processor, "filter", &[]));
    graph.add_edge(PipelineEdge::new("e1", "a", "b"));
    let document = Compiler::builder(graph).build().compile();
    let channel = document
        .channels
        .get(&DocumentKey::for_edge(Section::Channels, "a", "b"))
        .unwrap();
    assert_eq!(channel.address, "data/events");

    // Anything else gets the synthetic flow address.
    let mut graph = PipelineGraph::default();
    graph.add_node(node_with_attrs("a", NodeKind::Processor, "transform", &[]));
    graph.add_node(node_with_attrs("b", NodeKind::Processor, "filter", &[]));
    graph.add_edge(PipelineEdge::new("e1", "a", "b"));
    let document = Compiler::builder(graph).build().compile();
    let channel = document
        .channels
        .get(&DocumentKey::for_edge(Section::Channels, "a", "b"))
        .unwrap();
    assert_eq!(channel.address, "flow/a-to-b");
}

#[test]
fn test_dangling_edge_is_skipped_not_fatal() {
    let mut graph = create_scenario_pipeline();
    graph.add_edge(PipelineEdge::new("e3", "src-1", "ghost"));

    let document = Compiler::builder(graph).build().compile();
    assert!(
        !document
            .channels
            .contains_key(&DocumentKey::for_edge(Section::Channels, "src-1", "ghost"))
    );
    // Everything else is unaffected.
    assert_eq!(document.channels.len(), 3);
    assert_refs_resolve(&document);
}

#[test]
fn test_empty_graph_compiles_to_minimal_document() {
    let document = Compiler::builder(PipelineGraph::default()).build().compile();
    assert_eq!(document.asyncapi, "3.0.0");
    assert_eq!(document.info.title, "Data Pipeline API");
    assert_eq!(document.info.version, "1.0.0");
    assert!(document.servers.is_empty());
    assert!(document.channels.is_empty());
    assert!(document.operations.is_empty());
    assert!(document.components.messages.is_empty());
    assert!(document.components.schemas.is_empty());
}

#[test]
fn test_metadata_overrides_info_block() {
    let document = Compiler::builder(PipelineGraph::default())
        .with_title("Orders Pipeline")
        .with_version("2.1.0")
        .with_description("Order flow contract")
        .build()
        .compile();
    assert_eq!(document.info.title, "Orders Pipeline");
    assert_eq!(document.info.version, "2.1.0");
    assert_eq!(document.info.description, "Order flow contract");
}

#[test]
fn test_compile_is_deterministic() {
    let compiler = Compiler::builder(create_scenario_pipeline()).build();
    let first = compiler.compile();
    let second = compiler.compile();
    assert_eq!(first, second);
    assert_eq!(render(&first), render(&second));
}

#[test]
fn test_output_without_incoming_edges_is_omitted() {
    let mut graph = PipelineGraph::default();
    graph.add_node(node_with_attrs(
        "lonely",
        NodeKind::Output,
        "api",
        &[("destination", AttrValue::from("/nowhere"))],
    ));

    let document = Compiler::builder(graph).build().compile();
    assert!(document.channels.is_empty());
    assert!(document.operations.is_empty());
}

#[test]
fn test_output_first_incoming_edge_wins() {
    let mut graph = PipelineGraph::default();
    graph.add_node(node_with_attrs(
        "first",
        NodeKind::DataSource,
        "database",
        &[("table", AttrValue::from("first_table"))],
    ));
    graph.add_node(node_with_attrs(
        "second",
        NodeKind::DataSource,
        "database",
        &[("table", AttrValue::from("second_table"))],
    ));
    graph.add_node(node_with_attrs("sink", NodeKind::Output, "api", &[]));
    graph.add_edge(PipelineEdge::new("e1", "first", "sink"));
    graph.add_edge(PipelineEdge::new("e2", "second", "sink"));

    let document = Compiler::builder(graph).build().compile();
    let message = document
        .components
        .messages
        .get(&DocumentKey::for_node(Section::Messages, "sink"))
        .unwrap();
    // Only the first producer, by edge insertion order, is represented.
    assert_eq!(
        message.payload.as_ref().map(|r| r.target().clone()),
        Some(DocumentKey::for_node(Section::Schemas, "first"))
    );
}

#[test]
fn test_output_destination_falls_back_to_synthetic_address() {
    let mut graph = PipelineGraph::default();
    graph.add_node(node_with_attrs("src", NodeKind::DataSource, "database", &[]));
    graph.add_node(node_with_attrs(
        "out",
        NodeKind::Output,
        "file",
        &[("format", AttrValue::from("csv"))],
    ));
    graph.add_edge(PipelineEdge::new("e1", "src", "out"));

    let document = Compiler::builder(graph).build().compile();
    let channel = document
        .channels
        .get(&DocumentKey::for_node(Section::Channels, "out"))
        .unwrap();
    assert_eq!(channel.address, "/api/output/out");

    let message = document
        .components
        .messages
        .get(&DocumentKey::for_node(Section::Messages, "out"))
        .unwrap();
    assert_eq!(message.content_type, "text/csv");
}
