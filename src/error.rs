use thiserror::Error;

/// Errors that can occur while loading or saving a persisted workflow file.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("failed to read workflow file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse workflow JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when converting a custom front-end model into a
/// `PipelineGraph`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("invalid pipeline data: {0}")]
    Validation(String),
}
