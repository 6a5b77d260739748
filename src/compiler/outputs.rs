//! Channel and operation emission for output nodes.

use super::GraphIndex;
use crate::classify;
use crate::document::{
    AsyncApiDocument, Channel, DocumentKey, Message, Operation, OperationAction, Ref, Section,
};
use crate::graph::NodeKind;
use indexmap::IndexMap;

/// Pass 4: every `Output` node fed by at least one edge becomes a channel
/// and a `receive` operation. Only the first incoming edge (insertion order)
/// determines the payload source; additional producers into the same output
/// are not separately represented. Outputs with no incoming edges are
/// omitted.
pub(super) fn emit_output_channels(index: &GraphIndex<'_>, document: &mut AsyncApiDocument) {
    for node in index
        .graph
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Output)
    {
        let Some(edge) = index.first_incoming(&node.id) else {
            continue;
        };

        let profile = classify::classify(node);
        let feeding_source = index
            .node(&edge.source)
            .filter(|source| source.kind == NodeKind::DataSource);

        let channel_key = DocumentKey::for_node(Section::Channels, &node.id);
        let message_key = DocumentKey::for_node(Section::Messages, &node.id);
        let operation_key = DocumentKey::for_node(Section::Operations, &node.id);

        document.components.messages.insert(
            message_key.clone(),
            Message {
                name: node.display_name().to_string(),
                title: node.display_name().to_string(),
                summary: node.attr_str("description").map(str::to_owned),
                content_type: profile.content_type.to_string(),
                payload: feeding_source
                    .map(|source| Ref::to(DocumentKey::for_node(Section::Schemas, &source.id))),
            },
        );

        let mut messages = IndexMap::new();
        messages.insert(message_key.clone(), Ref::to(message_key));
        document.channels.insert(
            channel_key.clone(),
            Channel {
                address: node
                    .attr_str("destination")
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("/api/output/{}", node.id)),
                messages,
            },
        );

        document.operations.insert(
            operation_key,
            Operation {
                action: OperationAction::Receive,
                channel: Ref::to(channel_key),
                summary: Some(format!("Receive data from {}", node.display_name())),
                description: node.attr_str("description").map(str::to_owned),
                bindings: None,
            },
        );
    }
}
