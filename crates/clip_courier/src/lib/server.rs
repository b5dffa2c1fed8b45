//! HTTP surface: three form-driven download operations plus the SSE
//! progress feed. All pipeline wiring stays behind `MediaPipeline`; the
//! handlers only validate, run and stream the result out.

use std::{
    convert::Infallible,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    body::StreamBody,
    extract::{Form, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Router,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::{bytes::Bytes, io::ReaderStream};
use tower_http::cors::CorsLayer;

use crate::{
    fetch::MediaFetcher,
    pipeline::Delivery,
    storage::ArtifactGuard,
    types::{Job, JobKind},
    validate::validate_source,
    Enricher, MediaPipeline, PipelineError, Transcriber,
};

#[derive(Debug, Deserialize)]
pub struct SourceForm {
    pub video_url: Option<String>,
    /// Transcript-only: also translate, and enrich over the translation.
    pub translate: Option<bool>,
}

pub fn build_router<F, T, E>(pipeline: Arc<MediaPipeline<F, T, E>>) -> Router
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/download_video", post(download_video::<F, T, E>))
        .route("/download_audio", post(download_audio::<F, T, E>))
        .route("/transcribe_audio", post(transcribe_audio::<F, T, E>))
        .route("/stream", get(stream_events::<F, T, E>))
        .with_state(pipeline)
        .layer(CorsLayer::permissive())
}

async fn index() -> impl IntoResponse {
    "clip-courier"
}

async fn health() -> impl IntoResponse {
    "ok"
}

async fn download_video<F, T, E>(
    State(pipeline): State<Arc<MediaPipeline<F, T, E>>>,
    Form(form): Form<SourceForm>,
) -> Response
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    handle_job(pipeline, form, JobKind::Video).await
}

async fn download_audio<F, T, E>(
    State(pipeline): State<Arc<MediaPipeline<F, T, E>>>,
    Form(form): Form<SourceForm>,
) -> Response
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    handle_job(pipeline, form, JobKind::Audio).await
}

async fn transcribe_audio<F, T, E>(
    State(pipeline): State<Arc<MediaPipeline<F, T, E>>>,
    Form(form): Form<SourceForm>,
) -> Response
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    handle_job(pipeline, form, JobKind::Transcript).await
}

async fn handle_job<F, T, E>(
    pipeline: Arc<MediaPipeline<F, T, E>>,
    form: SourceForm,
    kind: JobKind,
) -> Response
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    // Reject before any subprocess or paid API call happens.
    let source = match validate_source(form.video_url.as_deref()) {
        Ok(source) => source,
        Err(e) => return e.into_response(),
    };

    let translate = form.translate.unwrap_or(false);
    let job = Job::new(source, kind);

    // Run on a detached task: a client hanging up cancels the handler
    // future, but the job keeps its subprocess and API calls running to
    // completion and its guards still clean up the artifacts.
    let handle = tokio::spawn(async move {
        if kind == JobKind::Transcript && translate {
            pipeline.run_translated_transcript(&job).await
        } else {
            pipeline.run(&job).await
        }
    });

    match handle.await {
        Ok(Ok(delivery)) => deliver(delivery).await,
        Ok(Err(e)) => e.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "pipeline task panicked or was aborted");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Streams the artifact out as an attachment. The body owns the artifact
/// guard, so the file is deleted once the stream is dropped, whether the
/// transfer completed or the client went away.
async fn deliver(delivery: Delivery) -> Response {
    let file = match tokio::fs::File::open(delivery.guard.path()).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(error = %e, path = %delivery.guard.path().display(), "failed to open artifact for delivery");
            return PipelineError::DeliveryRead(e).into_response();
        }
    };

    let body = StreamBody::new(GuardedStream {
        inner: ReaderStream::new(file),
        _guard: delivery.guard,
    });

    let headers = [
        (header::CONTENT_TYPE, delivery.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", delivery.file_name),
        ),
    ];

    (headers, body).into_response()
}

struct GuardedStream {
    inner: ReaderStream<tokio::fs::File>,
    _guard: ArtifactGuard,
}

impl Stream for GuardedStream {
    type Item = Result<Bytes, std::io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

async fn stream_events<F, T, E>(
    State(pipeline): State<Arc<MediaPipeline<F, T, E>>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    F: MediaFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    E: Enricher + Send + Sync + 'static,
{
    let events =
        BroadcastStream::new(pipeline.notifier().subscribe()).filter_map(|event| async move {
            let event = event.ok()?;
            Event::default().event("spinner").json_data(&event).ok().map(Ok)
        });

    Sse::new(events).keep_alive(KeepAlive::default())
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = match &self {
            PipelineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
