use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Deserialize;

use crate::{EnrichOp, Enricher, Transcriber, Transcript};

#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl OpenAIClient {
    const SUMMARY_PROMPT: &'static str = include_str!("./prompts/summary.txt");
    const ANALYSIS_PROMPT: &'static str = include_str!("./prompts/analysis.txt");
    const TRANSLATE_PROMPT: &'static str = include_str!("./prompts/translate.txt");

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_transcribe_request(
        &self,
        file: impl Into<PathBuf>,
        model_name: impl Into<String>,
    ) -> Result<TranscribeResponse, OpenAIError> {
        let audio_path = file.into();
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".into());

        let bytes = tokio::fs::read(&audio_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .unwrap();

        let form = reqwest::multipart::Form::new()
            .text("model", model_name.into())
            .text("response_format", "verbose_json")
            .part("file", part);

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<TranscribeResponse>().await?)
    }

    pub async fn send_completion_request(
        &self,
        model_name: impl Into<String>,
        system_prompt: &str,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": model_name.into(),
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl Transcriber for OpenAIClient {
    const TRANSCRIPTION_MODEL: &'static str = "whisper-1";
    type Error = OpenAIError;

    async fn transcribe(&self, audio: &Path) -> Result<Transcript, Self::Error> {
        let response = self
            .send_transcribe_request(audio, Self::TRANSCRIPTION_MODEL)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))?;

        Ok(Transcript {
            text: response.text,
            language: response.language,
        })
    }
}

impl Enricher for OpenAIClient {
    const ENRICHMENT_MODEL: &'static str = "gpt-4o-mini";
    type Error = OpenAIError;

    async fn enrich(&self, op: EnrichOp, transcript: &str) -> Result<String, Self::Error> {
        let system_prompt = match op {
            EnrichOp::Summarize => Self::SUMMARY_PROMPT,
            EnrichOp::Translate => Self::TRANSLATE_PROMPT,
            EnrichOp::DetailedAnalysis => Self::ANALYSIS_PROMPT,
        };
        let user_content = match op {
            EnrichOp::Summarize => format!("Summarize the following:\n\n{transcript}"),
            EnrichOp::Translate => format!("Translate the following:\n\n{transcript}"),
            EnrichOp::DetailedAnalysis => {
                format!("The transcription of the content follows:\n\n{transcript}")
            }
        };

        let response = self
            .send_completion_request(Self::ENRICHMENT_MODEL, system_prompt, user_content)
            .await
            .inspect_err(|e| tracing::error!(error = %e, ?op, "Failed to enrich transcript"))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| OpenAIError::Api {
                status: 0,
                message: "no content in response".into(),
            })?;

        Ok(text.trim().to_string())
    }
}
