use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use clip_courier::{
    fetch::ytdlp::YtDlpFetcher,
    openai::OpenAIClient,
    server::build_router,
    storage::{spawn_sweeper, StorageAreas, SweepConfig},
    tracing::init_tracing_subscriber,
    MediaPipelineBuilder,
};
use ytdlp_runner::YtDlp;

#[derive(Parser)]
#[command(name = "clip-courier", about = "Media download and transcription server")]
struct Cli {
    /// Bind host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_key: String,

    /// Override the OpenAI API base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Path to a yt-dlp cookies file
    #[arg(long, env = "YTDLP_COOKIES_PATH")]
    cookies_path: Option<PathBuf>,

    /// yt-dlp executable
    #[arg(long, env = "YTDLP_BINARY", default_value = "yt-dlp")]
    ytdlp_binary: PathBuf,

    /// Root directory for the video/audio/output storage areas
    #[arg(long, env = "STORAGE_ROOT", default_value = "downloads")]
    storage_root: PathBuf,

    /// Seconds between artifact sweep cycles
    #[arg(long, env = "SWEEP_INTERVAL_SECS", default_value = "300")]
    sweep_interval_secs: u64,

    /// Maximum artifact age in seconds before the sweep removes it.
    /// Keep this well above worst-case pipeline latency.
    #[arg(long, env = "ARTIFACT_MAX_AGE_SECS", default_value = "3600")]
    artifact_max_age_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let storage = StorageAreas::init(&cli.storage_root)?;
    spawn_sweeper(
        storage.clone(),
        SweepConfig {
            interval: Duration::from_secs(cli.sweep_interval_secs),
            max_age: Duration::from_secs(cli.artifact_max_age_secs),
        },
    );

    let yt_dlp = YtDlp::new_with_cookies(cli.cookies_path).with_binary(cli.ytdlp_binary);

    // One client handles both transcription and enrichment.
    let mut openai = OpenAIClient::new(&cli.openai_key);
    if let Some(base_url) = cli.openai_base_url {
        openai = openai.with_base_url(base_url);
    }

    let pipeline = MediaPipelineBuilder::new(storage)
        .fetcher(YtDlpFetcher(yt_dlp))
        .transcriber(openai.clone())
        .enricher(openai)
        .build();

    let app = build_router(Arc::new(pipeline));
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;

    tracing::info!(%addr, "clip-courier listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
