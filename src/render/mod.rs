//! Renders a compiled document to exportable text.
//!
//! YAML is the primary format: 2-space indentation, key insertion order
//! preserved, `$ref` values emitted as plain strings. If YAML emission fails
//! the renderer falls back to pretty-printed JSON so export never
//! hard-fails.

use crate::document::AsyncApiDocument;

/// Renders the document, falling back from YAML to JSON on failure. Always
/// returns exportable text.
pub fn render(document: &AsyncApiDocument) -> String {
    match to_yaml(document) {
        Ok(yaml) => yaml,
        Err(error) => {
            tracing::warn!(%error, "YAML rendering failed, falling back to JSON");
            match to_json(document) {
                Ok(json) => json,
                Err(error) => {
                    tracing::error!(%error, "JSON fallback failed, emitting empty document");
                    String::from("{}")
                }
            }
        }
    }
}

/// Renders canonical YAML, surfacing the error to callers that want it.
pub fn to_yaml(document: &AsyncApiDocument) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(document)
}

/// Renders pretty-printed JSON.
pub fn to_json(document: &AsyncApiDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}
