use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use clip_courier::{Transcriber, Transcript};

#[derive(Clone)]
pub struct MockTranscriber {
    pub text: String,
    pub language: Option<String>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriber {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            language: Some("en".to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn without_language(text: &str) -> Self {
        Self {
            language: None,
            ..Self::new(text)
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }
}

impl Transcriber for MockTranscriber {
    const TRANSCRIPTION_MODEL: &'static str = "mock-whisper";
    type Error = anyhow::Error;

    async fn transcribe(&self, audio: &std::path::Path) -> Result<Transcript, Self::Error> {
        self.calls.lock().unwrap().push(audio.to_path_buf());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        anyhow::ensure!(audio.is_file(), "audio artifact must exist when transcribed");
        Ok(Transcript {
            text: self.text.clone(),
            language: self.language.clone(),
        })
    }
}
