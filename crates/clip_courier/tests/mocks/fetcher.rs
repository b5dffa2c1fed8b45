use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use clip_courier::fetch::{FetchRequest, MediaFetcher};

/// Writes a fake artifact where the request's template points, optionally
/// with a different extension than requested (a tool that negotiated
/// another container), or nothing at all (a naming-contract breach).
#[derive(Clone)]
pub struct MockFetcher {
    pub produced_ext: Option<&'static str>,
    pub skip_write: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            produced_ext: None,
            skip_write: false,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            delay: None,
        }
    }
}

impl MockFetcher {
    pub fn with_ext(ext: &'static str) -> Self {
        Self {
            produced_ext: Some(ext),
            ..Default::default()
        }
    }

    pub fn writing_nothing() -> Self {
        Self {
            skip_write: true,
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }

    /// A fetch that takes a while, like a real download would.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }
}

impl MediaFetcher for MockFetcher {
    type Error = anyhow::Error;

    async fn fetch(&self, request: &FetchRequest) -> Result<(), Self::Error> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.calls.lock().unwrap().push(request.source.to_string());

        if !self.skip_write {
            let mut path = request.template.requested_path();
            if let Some(ext) = self.produced_ext {
                path.set_extension(ext);
            }
            std::fs::write(&path, b"mock media bytes")?;
        }
        Ok(())
    }
}
