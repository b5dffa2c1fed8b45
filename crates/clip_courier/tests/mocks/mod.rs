pub mod enricher;
pub mod fetcher;
pub mod transcriber;
