use serde::{Serialize, Serializer};
use std::fmt;

/// The document section a generated key belongs to. Determines both the key
/// prefix and the `$ref` path under which entries are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Servers,
    Channels,
    Operations,
    Messages,
    Schemas,
    SecuritySchemes,
}

impl Section {
    /// Key prefix partitioning the key space per role.
    fn prefix(&self) -> &'static str {
        match self {
            Section::Servers => "server",
            Section::Channels => "channel",
            Section::Operations => "operation",
            Section::Messages => "message",
            Section::Schemas => "schema",
            Section::SecuritySchemes => "scheme",
        }
    }

    /// JSON-pointer base for `$ref` strings into this section.
    fn ref_base(&self) -> &'static str {
        match self {
            Section::Servers => "#/servers",
            Section::Channels => "#/channels",
            Section::Operations => "#/operations",
            Section::Messages => "#/components/messages",
            Section::Schemas => "#/components/schemas",
            Section::SecuritySchemes => "#/components/securitySchemes",
        }
    }
}

/// A deterministic key into one document section.
///
/// Keys are derived purely from node/edge identity, so recompiling an
/// unchanged graph reproduces them exactly. Two distinct `(section, id)`
/// pairs never collide: ids are unique within a graph and the section prefix
/// partitions the key space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    section: Section,
    key: String,
}

impl DocumentKey {
    /// Key for an entry derived from a single node: `"{prefix}-{node id}"`.
    pub fn for_node(section: Section, node_id: &str) -> Self {
        DocumentKey {
            section,
            key: format!("{}-{}", section.prefix(), node_id),
        }
    }

    /// Key for an entry derived from an edge:
    /// `"{prefix}-{source id}-to-{target id}"`.
    pub fn for_edge(section: Section, source_id: &str, target_id: &str) -> Self {
        DocumentKey {
            section,
            key: format!("{}-{}-to-{}", section.prefix(), source_id, target_id),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The full `$ref` string addressing this key.
    pub fn ref_path(&self) -> String {
        format!("{}/{}", self.section.ref_base(), self.key)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl Serialize for DocumentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

/// A tagged cross-reference to another document entry. Rendered at
/// serialization time as `{"$ref": "#/..."}` with a plain string value, never
/// a YAML anchor or alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    target: DocumentKey,
}

impl Ref {
    pub fn to(target: DocumentKey) -> Self {
        Ref { target }
    }

    pub fn target(&self) -> &DocumentKey {
        &self.target
    }
}

impl Serialize for Ref {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$ref", &self.target.ref_path())?;
        map.end()
    }
}
