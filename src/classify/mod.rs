//! Maps a node's `(kind, subtype)` pair to protocol semantics.
//!
//! The subtype vocabulary is open: anything the table does not recognize
//! degrades to [`Protocol::Generic`] with no extracted attributes, never an
//! error. All subtype-specific knowledge lives here so the compiler passes
//! stay free of per-protocol conditionals.

use crate::graph::{AttributeMap, PipelineNode};
use serde::Serialize;
use std::fmt;

/// Transport protocol implied by a node subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Kafka,
    Http,
    Sql,
    Mongodb,
    Elasticsearch,
    Neo4j,
    File,
    Generic,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Kafka => "kafka",
            Protocol::Http => "http",
            Protocol::Sql => "sql",
            Protocol::Mongodb => "mongodb",
            Protocol::Elasticsearch => "elasticsearch",
            Protocol::Neo4j => "neo4j",
            Protocol::File => "file",
            Protocol::Generic => "generic",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The semantics a node's subtype implies: transport tag, content type for
/// its declared `format`, and the subset of its attributes relevant to that
/// transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolProfile {
    pub protocol: Protocol,
    pub content_type: &'static str,
    pub attributes: AttributeMap,
}

/// Processor configuration attributes surfaced into operation bindings
/// regardless of transport.
pub const PROCESSOR_RULE_ATTRIBUTES: &[&str] = &[
    "businessRules",
    "transformationRules",
    "filterCondition",
    "groupBy",
    "aggregations",
];

/// Resolves a subtype to its transport protocol. Case-insensitive; unknown
/// subtypes map to [`Protocol::Generic`].
pub fn protocol_for_subtype(subtype: &str) -> Protocol {
    match subtype.to_ascii_lowercase().as_str() {
        "kafka" => Protocol::Kafka,
        "database" | "sql" | "postgres" | "mysql" => Protocol::Sql,
        "mongodb" | "mongo" => Protocol::Mongodb,
        "elastic" | "elasticsearch" => Protocol::Elasticsearch,
        "neo4j" => Protocol::Neo4j,
        "file" => Protocol::File,
        "api" | "http" | "rest" => Protocol::Http,
        _ => Protocol::Generic,
    }
}

/// Maps a declared payload format to its content type.
pub fn content_type_for(format: Option<&str>) -> &'static str {
    match format.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",
        Some("avro") => "application/avro",
        Some("parquet") => "application/parquet",
        _ => "application/octet-stream",
    }
}

/// The attribute names that carry meaning for a given transport.
pub fn relevant_attributes(protocol: Protocol) -> &'static [&'static str] {
    match protocol {
        Protocol::Kafka => &["brokerUrl", "topic", "partitions", "replicationFactor"],
        Protocol::Sql => &["connectionUrl", "table", "query", "username", "password"],
        Protocol::Mongodb => &["connectionUrl", "collection", "query"],
        Protocol::Elasticsearch => &["connectionUrl", "endpoint", "index", "query"],
        Protocol::Neo4j => &["connectionUrl", "query"],
        Protocol::File => &["filePath", "format", "delimiter", "filePattern"],
        Protocol::Http => &["endpoint", "method", "headers"],
        Protocol::Generic => &[],
    }
}

/// The attribute a server host is read from for a given transport.
pub fn connection_attribute(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Kafka => "brokerUrl",
        Protocol::Http => "endpoint",
        Protocol::Elasticsearch => "endpoint",
        Protocol::File => "filePath",
        _ => "connectionUrl",
    }
}

/// Classifies a node into its protocol profile. Pure and total: every node,
/// however sparse its attributes, yields a profile.
pub fn classify(node: &PipelineNode) -> ProtocolProfile {
    let protocol = protocol_for_subtype(&node.subtype);
    let mut attributes = AttributeMap::default();
    for key in relevant_attributes(protocol) {
        if let Some(value) = node.attr(key) {
            attributes.insert((*key).to_string(), value.clone());
        }
    }
    ProtocolProfile {
        protocol,
        content_type: content_type_for(node.attr_str("format")),
        attributes,
    }
}
