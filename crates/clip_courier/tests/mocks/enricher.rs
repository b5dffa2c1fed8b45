use std::sync::{Arc, Mutex};

use clip_courier::{EnrichOp, Enricher};

#[derive(Clone)]
pub struct MockEnricher {
    pub calls: Arc<Mutex<Vec<(EnrichOp, String)>>>,
    pub fail_with: Option<String>,
}

impl Default for MockEnricher {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockEnricher {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl Enricher for MockEnricher {
    const ENRICHMENT_MODEL: &'static str = "mock-gpt";
    type Error = anyhow::Error;

    async fn enrich(&self, op: EnrichOp, transcript: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push((op, transcript.to_string()));
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(match op {
            EnrichOp::Summarize => "mock summary".to_string(),
            EnrichOp::Translate => "translated text".to_string(),
            EnrichOp::DetailedAnalysis => "mock analysis".to_string(),
        })
    }
}
