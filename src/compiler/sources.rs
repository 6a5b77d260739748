//! Server and schema emission for data-source and kafka broker nodes.

use super::GraphIndex;
use crate::classify;
use crate::document::{AsyncApiDocument, DocumentKey, Ref, Schema, Section, SecurityScheme, Server};
use crate::graph::NodeKind;

/// Pass 1: every `DataSource` node contributes a server and a payload
/// schema. Credentials, when present, additionally synthesize a
/// `userPassword` security scheme wired into the server's security list.
pub(super) fn emit_source_servers(index: &GraphIndex<'_>, document: &mut AsyncApiDocument) {
    for node in index
        .graph
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::DataSource)
    {
        let profile = classify::classify(node);

        let mut server = Server {
            host: node
                .attr_str(classify::connection_attribute(profile.protocol))
                .map(str::to_owned),
            protocol: profile.protocol,
            description: Some(
                node.attr_str("description")
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("Server for {}", node.display_name())),
            ),
            security: Vec::new(),
        };

        if node.attr("username").is_some() || node.attr("password").is_some() {
            let scheme_key = DocumentKey::for_node(Section::SecuritySchemes, &node.id);
            document.components.security_schemes.insert(
                scheme_key.clone(),
                SecurityScheme::user_password(Some(format!(
                    "Credentials for {}",
                    node.display_name()
                ))),
            );
            server.security.push(Ref::to(scheme_key));
        }

        document
            .servers
            .insert(DocumentKey::for_node(Section::Servers, &node.id), server);

        let mut schema = Schema::object();
        schema.title = node.attr_str("table").map(str::to_owned);
        schema.description = Some(
            node.attr_str("description")
                .map(str::to_owned)
                .unwrap_or_else(|| format!("Schema for {}", node.display_name())),
        );
        schema.raw_query = node.attr_str("query").map(str::to_owned);
        document
            .components
            .schemas
            .insert(DocumentKey::for_node(Section::Schemas, &node.id), schema);
    }
}

/// Pass 2: kafka processors that declare a broker URL contribute an
/// additional kafka server. Processors without one are left out; the topic
/// they write to still surfaces through the edge pass.
pub(super) fn emit_broker_servers(index: &GraphIndex<'_>, document: &mut AsyncApiDocument) {
    for node in index.graph.nodes.iter().filter(|node| {
        node.kind == NodeKind::Processor && node.subtype.eq_ignore_ascii_case("kafka")
    }) {
        let Some(broker_url) = node.attr_str("brokerUrl") else {
            continue;
        };
        document.servers.insert(
            DocumentKey::for_node(Section::Servers, &node.id),
            Server {
                host: Some(broker_url.to_string()),
                protocol: classify::Protocol::Kafka,
                description: Some(format!("Kafka broker for {}", node.display_name())),
                security: Vec::new(),
            },
        );
    }
}
