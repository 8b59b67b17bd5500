// src/pipeline/error.rs

use thiserror::Error;

/// Errors the pipeline can produce. Only `GenerationFailed` ever reaches
/// the caller; the classifier variants are absorbed into documented
/// defaults inside the classify stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The classification collaborator could not be reached or answered
    /// with a non-success status. Recovered locally; never surfaced.
    #[error("classification collaborator unavailable: {0}")]
    ClassificationUnavailable(String),

    /// The classification collaborator answered, but the payload did not
    /// validate against the closed result record. Recovered locally.
    #[error("malformed classifier output: {0}")]
    MalformedClassifierOutput(String),

    /// The generation collaborator failed. Fatal: fabricating a reply is
    /// worse than failing loudly, so no partial response is returned.
    #[error("generation collaborator failed: {0}")]
    GenerationFailed(String),
}
