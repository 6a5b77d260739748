//! # Flowspec - Pipeline Graph to AsyncAPI Compiler
//!
//! **Flowspec** turns visually assembled data-pipeline graphs (sources,
//! processors, outputs) into complete AsyncAPI 3.0.0 documents describing the
//! equivalent messaging contract. It also ships the bounded undo/redo history
//! engine that keeps such a graph consistent across edits.
//!
//! ## Core Workflow
//!
//! The compiler is format-agnostic: it operates on a canonical
//! [`PipelineGraph`](graph::PipelineGraph). The primary workflow is:
//!
//! 1.  **Load your graph**: parse your editor's format, or use the bundled
//!     [`WorkflowDocument`](graph::WorkflowDocument) layer for the persisted
//!     designer JSON.
//! 2.  **Convert**: implement [`IntoPipeline`](graph::IntoPipeline) for your
//!     own model to translate it into a `PipelineGraph`.
//! 3.  **Compile**: `Compiler::builder(graph).build().compile()` walks the
//!     graph once and emits a cross-referenced
//!     [`AsyncApiDocument`](document::AsyncApiDocument). Compilation never
//!     fails: malformed pieces degrade to omissions.
//! 4.  **Render**: [`render`](render::render) produces YAML (JSON fallback),
//!     deterministically, with key insertion order preserved.
//!
//! Editing sessions push [`Snapshot`](history::Snapshot)s into a
//! [`History`](history::History) after every mutation; `undo`/`redo` hand
//! back deep copies to apply to the live graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowspec::prelude::*;
//!
//! // A database source feeding a kafka processor.
//! let mut graph = PipelineGraph::default();
//!
//! let mut orders = PipelineNode::new("orders-db", NodeKind::DataSource, "database");
//! orders
//!     .attributes
//!     .insert("table".to_string(), AttrValue::from("orders"));
//! graph.add_node(orders);
//!
//! let mut stream = PipelineNode::new("stream", NodeKind::Processor, "kafka");
//! stream
//!     .attributes
//!     .insert("topic".to_string(), AttrValue::from("orders-topic"));
//! graph.add_node(stream);
//!
//! graph.add_edge(PipelineEdge::new("e1", "orders-db", "stream"));
//!
//! let document = Compiler::builder(graph)
//!     .with_title("Orders Pipeline")
//!     .build()
//!     .compile();
//!
//! let yaml = render(&document);
//! assert!(yaml.contains("asyncapi: 3.0.0"));
//! assert!(yaml.contains("address: orders-topic"));
//! ```

pub mod classify;
pub mod compiler;
pub mod document;
pub mod error;
pub mod graph;
pub mod history;
pub mod prelude;
pub mod render;
