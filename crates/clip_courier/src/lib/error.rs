use std::path::PathBuf;

/// Failure taxonomy for one pipeline job.
///
/// `ArtifactNotFound` is kept distinct from `FetchFailed`: the former means
/// the naming contract with the extraction tool broke, the latter that the
/// tool itself failed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid source url: {0}")]
    InvalidInput(String),
    #[error("media fetch failed: {cause}")]
    FetchFailed { cause: String },
    #[error("fetched artifact not found at {} or any sibling extension", requested.display())]
    ArtifactNotFound { requested: PathBuf },
    #[error("transcription failed: {cause}")]
    TranscriptionFailed { cause: String },
    #[error("enrichment failed: {cause}")]
    EnrichmentFailed { cause: String },
    #[error("failed to write output artifact: {0}")]
    OutputWrite(#[from] std::io::Error),
    #[error("failed to read artifact for delivery: {0}")]
    DeliveryRead(std::io::Error),
}
