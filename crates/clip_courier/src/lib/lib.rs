mod error;
mod llm;
mod pipeline;
pub mod fetch;
pub mod notify;
pub mod output;
pub mod server;
pub mod storage;
pub mod tracing;
pub mod types;
pub mod validate;

pub use error::PipelineError;
pub use llm::{openai, EnrichOp, Enricher, Transcriber, Transcript};
pub use pipeline::{builder::MediaPipelineBuilder, Delivery, MediaPipeline};
