use super::keys::{DocumentKey, Ref};
use crate::classify::Protocol;
use crate::graph::AttrValue;
use indexmap::IndexMap;
use serde::Serialize;

/// The AsyncAPI specification version every compiled document declares.
pub const ASYNCAPI_VERSION: &str = "3.0.0";

/// The compiled AsyncAPI 3.0.0 document. Every keyed section is an
/// insertion-ordered map so re-serializing an unchanged compilation is
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsyncApiDocument {
    pub asyncapi: String,
    pub info: Info,
    pub servers: IndexMap<DocumentKey, Server>,
    pub channels: IndexMap<DocumentKey, Channel>,
    pub operations: IndexMap<DocumentKey, Operation>,
    pub components: Components,
}

impl AsyncApiDocument {
    /// An empty document carrying only the info block. A zero-node graph
    /// compiles to exactly this.
    pub fn new(info: Info) -> Self {
        AsyncApiDocument {
            asyncapi: ASYNCAPI_VERSION.to_string(),
            info,
            servers: IndexMap::new(),
            channels: IndexMap::new(),
            operations: IndexMap::new(),
            components: Components::default(),
        }
    }
}

/// The `info` block: document title, version, description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// A messaging server derived from a data source or kafka broker node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub protocol: Protocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Ref>,
}

/// A synthesized credentials scheme attached to a server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecurityScheme {
    pub fn user_password(description: Option<String>) -> Self {
        SecurityScheme {
            scheme_type: "userPassword".to_string(),
            description,
        }
    }
}

/// An addressable conduit carrying one or more message types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub address: String,
    pub messages: IndexMap<DocumentKey, Ref>,
}

/// AsyncAPI operation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationAction {
    Send,
    Receive,
}

/// Vendor extension attached to an operation: the target processor's
/// configuration and a back-reference to the source's server.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FlowBindings {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub processor: IndexMap<String, AttrValue>,
    #[serde(rename = "sourceServer", skip_serializing_if = "Option::is_none")]
    pub source_server: Option<Ref>,
}

impl FlowBindings {
    pub fn is_empty(&self) -> bool {
        self.processor.is_empty() && self.source_server.is_none()
    }
}

/// A send/receive action bound to a channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub action: OperationAction,
    pub channel: Ref,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "x-flow-bindings", skip_serializing_if = "Option::is_none")]
    pub bindings: Option<FlowBindings>,
}

/// A message definition referenced by channels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Ref>,
}

/// A JSON-Schema-like payload shape for a data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: IndexMap<String, Schema>,
    #[serde(rename = "x-raw-query", skip_serializing_if = "Option::is_none")]
    pub raw_query: Option<String>,
}

impl Schema {
    /// A bare `{type: object}` schema, the minimum emitted per data source.
    pub fn object() -> Self {
        Schema {
            schema_type: "object".to_string(),
            title: None,
            description: None,
            properties: IndexMap::new(),
            raw_query: None,
        }
    }
}

/// The `components` block. `securitySchemes` is omitted entirely when no
/// scheme was synthesized.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    pub messages: IndexMap<DocumentKey, Message>,
    pub schemas: IndexMap<DocumentKey, Schema>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<DocumentKey, SecurityScheme>,
}
