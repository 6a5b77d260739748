//! Serde layer for the persisted workflow files written by the visual
//! designer.
//!
//! The on-disk shape mirrors the canvas library's `toObject()` output: nodes
//! carry their attributes in an open `data` bag, edges may carry a label and
//! an ontology binding, and the whole file optionally embeds the ontology
//! itself. Only `nodes` and `edges` matter to the compiler; everything else
//! is round-tripped untouched.

use super::conversion::IntoPipeline;
use super::definition::{
    AttrValue, AttributeMap, EntityBinding, NodeKind, PipelineEdge, PipelineGraph, PipelineNode,
    Position, Viewport,
};
use crate::error::{GraphConversionError, WorkflowError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A complete persisted editing session: `{nodes, edges, viewport?, ontology?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ontology: Option<serde_json::Value>,
}

/// A node as stored on disk: `{id, type, position, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// An edge as stored on disk: `{id, source, target, label?, data?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl WorkflowDocument {
    /// Parses a workflow from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, WorkflowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a workflow from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| WorkflowError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Serializes the workflow back to pretty-printed JSON for persistence.
    pub fn to_json_string(&self) -> Result<String, WorkflowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The subtype the editor assumes when a node's `data` bag omits one.
fn default_subtype(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::DataSource => "database",
        NodeKind::Processor => "transform",
        NodeKind::Output => "database",
    }
}

/// Coerces a `data` bag into a scalar attribute map, dropping the keys the
/// caller claims for itself and anything non-scalar.
fn collect_attributes(
    data: &serde_json::Map<String, serde_json::Value>,
    reserved: &[&str],
) -> AttributeMap {
    let mut attributes = AttributeMap::default();
    for (key, value) in data {
        if reserved.contains(&key.as_str()) {
            continue;
        }
        match AttrValue::from_json(value) {
            Some(scalar) => {
                attributes.insert(key.clone(), scalar);
            }
            None => {
                tracing::debug!(key = %key, "dropping non-scalar workflow attribute");
            }
        }
    }
    attributes
}

fn entity_binding(data: &serde_json::Map<String, serde_json::Value>) -> Option<EntityBinding> {
    let entity_id = data.get("entityId")?.as_str()?;
    if entity_id.is_empty() {
        return None;
    }
    let mut properties = AttributeMap::default();
    if let Some(serde_json::Value::Object(props)) = data.get("properties") {
        for (key, value) in props {
            if let Some(scalar) = AttrValue::from_json(value) {
                properties.insert(key.clone(), scalar);
            }
        }
    }
    Some(EntityBinding {
        entity_id: entity_id.to_string(),
        properties,
    })
}

impl IntoPipeline for WorkflowDocument {
    fn into_pipeline(self) -> Result<PipelineGraph, GraphConversionError> {
        let mut graph = PipelineGraph::default();
        let mut seen = HashSet::new();

        for node in self.nodes {
            let Some(kind) = NodeKind::parse(&node.node_type) else {
                tracing::debug!(
                    id = %node.id,
                    node_type = %node.node_type,
                    "skipping workflow node of unknown type"
                );
                continue;
            };
            if !seen.insert(node.id.clone()) {
                return Err(GraphConversionError::Validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            let subtype = node
                .data
                .get("subtype")
                .and_then(|value| value.as_str())
                .unwrap_or(default_subtype(kind))
                .to_string();
            graph.add_node(PipelineNode {
                id: node.id,
                kind,
                subtype,
                attributes: collect_attributes(&node.data, &["subtype"]),
                position: node.position,
            });
        }

        for edge in self.edges {
            let data = edge.data.unwrap_or_default();
            let mut attributes =
                collect_attributes(&data, &["entityId", "properties"]);
            if let Some(label) = edge.label {
                attributes
                    .entry("label".to_string())
                    .or_insert(AttrValue::String(label));
            }
            graph.add_edge(PipelineEdge {
                id: edge.id,
                source: edge.source,
                target: edge.target,
                attributes,
                entity: entity_binding(&data),
            });
        }

        Ok(graph)
    }
}
