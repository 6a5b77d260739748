use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute bag attached to nodes and edges.
pub type AttributeMap = AHashMap<String, AttrValue>;

/// The role a pipeline stage plays. Closed set; changing a node's kind is
/// modeled as delete + create by the editing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "dataSource")]
    DataSource,
    #[serde(rename = "processor")]
    Processor,
    #[serde(rename = "output")]
    Output,
}

impl NodeKind {
    /// Parses the wire vocabulary used by the visual editor.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dataSource" => Some(NodeKind::DataSource),
            "processor" => Some(NodeKind::Processor),
            "output" => Some(NodeKind::Output),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::DataSource => "dataSource",
            NodeKind::Processor => "processor",
            NodeKind::Output => "output",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scalar attribute values carried by nodes and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerces a JSON value into a scalar attribute, dropping anything
    /// non-scalar (arrays, objects, null).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(AttrValue::String(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(AttrValue::Number),
            serde_json::Value::Bool(b) => Some(AttrValue::Bool(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{}", s),
            AttrValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            AttrValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Canvas coordinate of a node. Irrelevant to compilation, kept so a loaded
/// workflow round-trips with its layout intact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Canvas viewport, round-trip only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// A single pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineNode {
    pub id: String,
    pub kind: NodeKind,
    pub subtype: String,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default)]
    pub position: Position,
}

impl PipelineNode {
    pub fn new(
        id: impl Into<String>,
        kind: NodeKind,
        subtype: impl Into<String>,
    ) -> Self {
        PipelineNode {
            id: id.into(),
            kind,
            subtype: subtype.into(),
            attributes: AttributeMap::default(),
            position: Position::default(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// String attribute lookup; non-string values yield `None`.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_str)
    }

    /// The node's label, falling back to its id when the label is absent or
    /// empty.
    pub fn display_name(&self) -> &str {
        self.attr_str("label")
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Optional ontology binding on an edge: which entity the data flowing over
/// the edge represents, plus per-property values. Owned by the ontology
/// collaborator; the compiler ignores it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityBinding {
    #[serde(rename = "entityId")]
    pub entity_id: String,
    #[serde(default)]
    pub properties: AttributeMap,
}

/// A directed data-flow relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityBinding>,
}

impl PipelineEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        PipelineEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            attributes: AttributeMap::default(),
            entity: None,
        }
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_str)
    }
}

/// The editable pipeline model: nodes and edges in insertion order. Owned by
/// the editing session; the compiler only ever borrows it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineGraph {
    pub nodes: Vec<PipelineNode>,
    pub edges: Vec<PipelineEdge>,
}

impl PipelineGraph {
    pub fn node(&self, id: &str) -> Option<&PipelineNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn add_node(&mut self, node: PipelineNode) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: PipelineEdge) {
        self.edges.push(edge);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
