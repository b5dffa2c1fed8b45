pub mod builder;

use crate::{
    fetch::{naming, naming::OutputTemplate, FetchRequest, MediaFetcher},
    notify::ProgressNotifier,
    output,
    storage::{ArtifactGuard, StorageAreas},
    types::{Job, JobKind, TranscriptBundle},
    EnrichOp, Enricher, PipelineError, Transcriber,
};

/// A finished artifact on its way out the door. Dropping the guard deletes
/// the file, so the response body must own the delivery until the last byte
/// is sent.
#[derive(Debug)]
pub struct Delivery {
    pub guard: ArtifactGuard,
    pub file_name: String,
    pub content_type: &'static str,
}

/// The acquisition-and-artifact pipeline: fetch, transcribe, enrich,
/// assemble. Generic over its external collaborators so tests can
/// substitute fakes.
pub struct MediaPipeline<F, T, E>
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    storage: StorageAreas,
    fetcher: F,
    transcriber: T,
    enricher: E,
    notifier: ProgressNotifier,
}

impl<F, T, E> MediaPipeline<F, T, E>
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    pub fn storage(&self) -> &StorageAreas {
        &self.storage
    }

    pub fn notifier(&self) -> &ProgressNotifier {
        &self.notifier
    }

    /// Runs one job end to end. Start/end events fire on every path;
    /// failures surface as a single `PipelineError` and any partial
    /// artifact is removed by its guard on the way out.
    pub async fn run(&self, job: &Job) -> Result<Delivery, PipelineError> {
        self.run_inner(job, false).await
    }

    /// Transcription with the translation step enabled; summary and
    /// analysis then run over the translated text. Non-transcript jobs
    /// behave exactly as under [`MediaPipeline::run`].
    pub async fn run_translated_transcript(&self, job: &Job) -> Result<Delivery, PipelineError> {
        self.run_inner(job, true).await
    }

    #[tracing::instrument(skip_all, fields(job_id = %job.id, source = %job.source))]
    async fn run_inner(&self, job: &Job, translate: bool) -> Result<Delivery, PipelineError> {
        self.notifier.job_started(job);

        let result = match job.kind {
            JobKind::Video | JobKind::Audio => self.fetch_media(job).await.map(|guard| Delivery {
                file_name: guard.file_name(),
                content_type: "application/octet-stream",
                guard,
            }),
            JobKind::Transcript => self.transcribe(job, translate).await,
        };

        self.notifier.job_finished(job);

        result.inspect_err(
            |e| tracing::error!(error = %e, kind = ?job.kind, "pipeline job failed"),
        )
    }

    /// Fetches the job's media and reconciles the naming template against
    /// what the tool actually produced.
    async fn fetch_media(&self, job: &Job) -> Result<ArtifactGuard, PipelineError> {
        let kind = job.kind.media_kind();
        let template = OutputTemplate::new(
            self.storage.area_for(kind),
            job.base_name(),
            kind.target_ext(),
        );
        let request = FetchRequest {
            source: job.source.clone(),
            kind,
            template,
        };

        self.fetcher
            .fetch(&request)
            .await
            .map_err(|e| PipelineError::FetchFailed {
                cause: format!("{e:?}"),
            })?;

        // Re-resolve from disk rather than trusting a cached prediction.
        let resolved = naming::resolve_artifact(&request.template)?;
        Ok(ArtifactGuard::new(resolved))
    }

    /// The transcription path: audio fetch, speech-to-text, enrichment,
    /// assembly. The audio guard is dropped as soon as the transcript
    /// exists, so the audio never outlives its usefulness.
    async fn transcribe(&self, job: &Job, translate: bool) -> Result<Delivery, PipelineError> {
        let audio = self.fetch_media(job).await?;

        let transcript = self
            .transcriber
            .transcribe(audio.path())
            .await
            .map_err(|e| PipelineError::TranscriptionFailed {
                cause: format!("{e:?}"),
            })?;

        tracing::info!(
            language = transcript.language.as_deref().unwrap_or("unknown"),
            chars = transcript.text.len(),
            "audio transcribed"
        );
        drop(audio);

        let bundle = self.enrich(transcript.text, transcript.language, translate).await?;

        let output_path = self
            .storage
            .outputs
            .join(format!("{}_output.txt", job.base_name()));
        output::write_output(&bundle, &output_path)?;
        let guard = ArtifactGuard::new(output_path);

        Ok(Delivery {
            file_name: guard.file_name(),
            content_type: "text/plain; charset=utf-8",
            guard,
        })
    }

    /// Translation, when requested, completes before summary and analysis
    /// and both then operate on the translated text. Summary and analysis
    /// have no dependency on each other and run concurrently.
    async fn enrich(
        &self,
        transcript: String,
        language: Option<String>,
        translate: bool,
    ) -> Result<TranscriptBundle, PipelineError> {
        let outcome = async {
            let translated = if translate {
                Some(self.enricher.enrich(EnrichOp::Translate, &transcript).await?)
            } else {
                None
            };

            let enrich_input = translated.as_deref().unwrap_or(&transcript);
            let (summary, analysis) = tokio::try_join!(
                self.enricher.enrich(EnrichOp::Summarize, enrich_input),
                self.enricher.enrich(EnrichOp::DetailedAnalysis, enrich_input),
            )?;

            Ok::<_, E::Error>((translated, summary, analysis))
        }
        .await;

        let (translated, summary, analysis) = outcome.map_err(|e| {
            // The transcript survived; keep it diagnosable without a re-run.
            tracing::error!(
                error = ?e,
                transcript_chars = transcript.len(),
                "enrichment failed after successful transcription"
            );
            PipelineError::EnrichmentFailed {
                cause: format!("{e:?}"),
            }
        })?;

        Ok(TranscriptBundle {
            transcript,
            language,
            translated,
            summary,
            analysis,
        })
    }
}
