pub mod openai;

use std::{fmt::Debug, future::Future, path::Path};

/// Transcript text plus whatever language metadata the service volunteered.
/// The language is best-effort; callers fall back to "unknown".
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
    pub language: Option<String>,
}

/// Speech-to-text over a finished audio artifact.
pub trait Transcriber {
    const TRANSCRIPTION_MODEL: &'static str;

    type Error: Debug + Send;

    fn transcribe(
        &self,
        audio: &Path,
    ) -> impl Future<Output = Result<Transcript, Self::Error>> + Send;
}

/// Which fixed instruction template an enrichment call runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOp {
    Summarize,
    Translate,
    DetailedAnalysis,
}

/// Text generation over a transcript. Summary and detailed analysis are
/// independent of each other; translation output feeds both when requested.
pub trait Enricher {
    const ENRICHMENT_MODEL: &'static str;

    type Error: Debug + Send;

    fn enrich(
        &self,
        op: EnrichOp,
        transcript: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
