use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Video,
    Audio,
    Transcript,
}

impl JobKind {
    /// The media the fetcher has to pull for this job.
    pub fn media_kind(&self) -> MediaKind {
        match self {
            JobKind::Video => MediaKind::Video,
            JobKind::Audio | JobKind::Transcript => MediaKind::Audio,
        }
    }
}

/// Format policy handed to the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn target_ext(&self) -> &'static str {
        match self {
            MediaKind::Video => "mp4",
            MediaKind::Audio => "mp3",
        }
    }
}

/// One end-to-end invocation of the pipeline. Owned by the request handler
/// that created it; never shared across requests.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub source: Url,
    pub kind: JobKind,
    pub started_at: DateTime<Utc>,
}

impl Job {
    pub fn new(source: Url, kind: JobKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            kind,
            started_at: Utc::now(),
        }
    }

    /// Per-job unique file-name stem. Using the job id here keeps concurrent
    /// jobs of the same kind from clobbering each other's artifacts.
    pub fn base_name(&self) -> String {
        self.id.simple().to_string()
    }
}

/// Ephemeral, in-memory product of a transcription job. Only ever persisted
/// inside the assembled output artifact.
#[derive(Debug, Clone)]
pub struct TranscriptBundle {
    pub transcript: String,
    pub language: Option<String>,
    pub translated: Option<String>,
    pub summary: String,
    pub analysis: String,
}

impl TranscriptBundle {
    pub fn language_or_unknown(&self) -> &str {
        self.language.as_deref().unwrap_or("unknown")
    }
}
