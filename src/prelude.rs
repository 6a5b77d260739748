//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so callers can pull
//! in the whole compile-and-export surface with a single `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowspec::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workflow = WorkflowDocument::from_file("path/to/workflow.json")?;
//! let graph = workflow.into_pipeline()?;
//!
//! let compiler = Compiler::builder(graph)
//!     .with_title("Orders Pipeline")
//!     .build();
//! let document = compiler.compile();
//!
//! println!("{}", render(&document));
//! # Ok(())
//! # }
//! ```

// Compilation and rendering
pub use crate::compiler::{Compiler, CompilerBuilder, Metadata};
pub use crate::render::{render, to_json, to_yaml};

// Graph model and conversion
pub use crate::graph::{
    AttrValue, AttributeMap, IntoPipeline, NodeKind, PipelineEdge, PipelineGraph, PipelineNode,
    Position, Viewport, WorkflowDocument,
};

// Document model
pub use crate::document::{AsyncApiDocument, DocumentKey, Ref, Section};

// History engine
pub use crate::history::{DEFAULT_MAX_HISTORY, History, Snapshot};

// Classifier
pub use crate::classify::{Protocol, ProtocolProfile, classify};

// Error types
pub use crate::error::{GraphConversionError, WorkflowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
