use std::ops::Deref;

use ytdlp_runner::{YtDlp, YtDlpError};

use crate::{
    fetch::{FetchRequest, MediaFetcher},
    types::MediaKind,
};

const AUDIO_QUALITY: &str = "192K";

/// Production fetcher backed by the yt-dlp binary.
pub struct YtDlpFetcher(pub YtDlp);

impl Deref for YtDlpFetcher {
    type Target = YtDlp;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MediaFetcher for YtDlpFetcher {
    type Error = YtDlpError;

    async fn fetch(&self, request: &FetchRequest) -> Result<(), Self::Error> {
        let template = request.template.to_ytdlp_template();
        let target = request.kind.target_ext();

        match request.kind {
            MediaKind::Video => {
                self.download_video(request.source.as_str(), target, &template)
                    .await
            }
            MediaKind::Audio => {
                self.download_audio(request.source.as_str(), target, AUDIO_QUALITY, &template)
                    .await
            }
        }
        .inspect_err(
            |e| tracing::error!(error = ?e, source = %request.source, "yt-dlp fetch failed"),
        )
    }
}
