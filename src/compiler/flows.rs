//! Edge-driven message, channel, and operation emission.

use super::GraphIndex;
use crate::classify;
use crate::document::{
    AsyncApiDocument, Channel, DocumentKey, FlowBindings, Message, Operation, OperationAction,
    Ref, Section,
};
use crate::graph::{NodeKind, PipelineEdge, PipelineNode};
use indexmap::IndexMap;

/// Pass 3: every edge with resolvable endpoints becomes one message, one
/// channel, and one `send` operation. Edges pointing at nodes absent from
/// the graph are skipped, not fatal.
pub(super) fn emit_edge_flows(index: &GraphIndex<'_>, document: &mut AsyncApiDocument) {
    for edge in &index.graph.edges {
        let (Some(source), Some(target)) = (index.node(&edge.source), index.node(&edge.target))
        else {
            tracing::debug!(
                edge = %edge.id,
                source = %edge.source,
                target = %edge.target,
                "skipping edge with missing endpoint"
            );
            continue;
        };

        let message_key = DocumentKey::for_edge(Section::Messages, &edge.source, &edge.target);
        let channel_key = DocumentKey::for_edge(Section::Channels, &edge.source, &edge.target);
        let operation_key = DocumentKey::for_edge(Section::Operations, &edge.source, &edge.target);

        let title = format!("{} to {}", source.display_name(), target.display_name());
        document.components.messages.insert(
            message_key.clone(),
            Message {
                name: title.clone(),
                title,
                summary: edge.attr_str("description").map(str::to_owned),
                content_type: "application/json".to_string(),
                payload: (source.kind == NodeKind::DataSource)
                    .then(|| Ref::to(DocumentKey::for_node(Section::Schemas, &source.id))),
            },
        );

        let mut messages = IndexMap::new();
        messages.insert(message_key.clone(), Ref::to(message_key));
        document.channels.insert(
            channel_key.clone(),
            Channel {
                address: channel_address(edge, source, target),
                messages,
            },
        );

        document.operations.insert(
            operation_key,
            Operation {
                action: OperationAction::Send,
                channel: Ref::to(channel_key),
                summary: Some(format!(
                    "Send data from {} to {}",
                    source.display_name(),
                    target.display_name()
                )),
                description: edge
                    .attr_str("label")
                    .or_else(|| edge.attr_str("description"))
                    .map(str::to_owned),
                bindings: flow_bindings(source, target),
            },
        );
    }
}

/// Channel address resolution, in priority order: the kafka target's topic
/// (synthetic `topic-…` fallback), the data-source's table as `data/<table>`,
/// then the synthetic `flow/<source>-to-<target>`.
fn channel_address(edge: &PipelineEdge, source: &PipelineNode, target: &PipelineNode) -> String {
    if target.kind == NodeKind::Processor && target.subtype.eq_ignore_ascii_case("kafka") {
        return target
            .attr_str("topic")
            .map(str::to_owned)
            .unwrap_or_else(|| format!("topic-{}-to-{}", edge.source, edge.target));
    }
    if source.kind == NodeKind::DataSource {
        if let Some(table) = source.attr_str("table") {
            return format!("data/{}", table);
        }
    }
    format!("flow/{}-to-{}", edge.source, edge.target)
}

/// Builds the operation's vendor-extension bindings: the target processor's
/// configuration (rule attributes first, then transport-specific ones, in
/// table order for deterministic output) and a back-reference to the
/// source's server. `None` when there is nothing to carry.
fn flow_bindings(source: &PipelineNode, target: &PipelineNode) -> Option<FlowBindings> {
    let mut bindings = FlowBindings::default();

    if target.kind == NodeKind::Processor {
        let protocol = classify::protocol_for_subtype(&target.subtype);
        let keys = classify::PROCESSOR_RULE_ATTRIBUTES
            .iter()
            .chain(classify::relevant_attributes(protocol));
        for key in keys {
            if let Some(value) = target.attr(key) {
                bindings.processor.insert((*key).to_string(), value.clone());
            }
        }
    }

    if source.kind == NodeKind::DataSource {
        bindings.source_server = Some(Ref::to(DocumentKey::for_node(
            Section::Servers,
            &source.id,
        )));
    }

    if bindings.is_empty() {
        None
    } else {
        Some(bindings)
    }
}
