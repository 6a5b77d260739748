use super::definition::PipelineGraph;
use crate::error::GraphConversionError;

/// A trait for custom front-end models that can be converted into a
/// [`PipelineGraph`].
///
/// This is the extension point that keeps the compiler format-agnostic. Any
/// editor or storage layer with its own node/edge representation implements
/// this trait to hand the compiler a canonical graph. The crate ships one
/// implementation, for the persisted workflow JSON written by the visual
/// designer (see [`super::WorkflowDocument`]).
///
/// # Example
///
/// ```rust
/// use flowspec::graph::{IntoPipeline, NodeKind, PipelineGraph, PipelineNode};
/// use flowspec::error::GraphConversionError;
///
/// struct MyStage { id: String, role: String }
/// struct MyPipeline { stages: Vec<MyStage> }
///
/// impl IntoPipeline for MyPipeline {
///     fn into_pipeline(self) -> Result<PipelineGraph, GraphConversionError> {
///         let mut graph = PipelineGraph::default();
///         for stage in self.stages {
///             let kind = NodeKind::parse(&stage.role).ok_or_else(|| {
///                 GraphConversionError::Validation(format!(
///                     "unknown stage role '{}'",
///                     stage.role
///                 ))
///             })?;
///             graph.add_node(PipelineNode::new(stage.id, kind, "generic"));
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoPipeline {
    /// Consumes the object and converts it into a canonical pipeline graph.
    fn into_pipeline(self) -> Result<PipelineGraph, GraphConversionError>;
}
