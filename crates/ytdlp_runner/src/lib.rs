//! Async driver for the external `yt-dlp` binary.
//!
//! Assembles one format/post-processing policy per invocation and captures
//! stderr so callers can surface the underlying cause of a failed fetch.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum YtDlpError {
    #[error("failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("yt-dlp exited with {status}: {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },
}

/// Handle to the yt-dlp executable, optionally carrying a cookies file.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies: Option<PathBuf>,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            cookies: None,
        }
    }

    pub fn new_with_cookies(cookies: Option<PathBuf>) -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            cookies,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Best combined video+audio, recoded to `target_format`, written to
    /// `output_template` (a yt-dlp `%(ext)s`-style template).
    pub async fn download_video(
        &self,
        url: &str,
        target_format: &str,
        output_template: &Path,
    ) -> Result<(), YtDlpError> {
        let args = self.video_args(url, target_format, output_template);
        self.run(&args).await
    }

    /// Best audio-only stream, extracted to `codec` at `quality`
    /// (e.g. "mp3", "192K").
    pub async fn download_audio(
        &self,
        url: &str,
        codec: &str,
        quality: &str,
        output_template: &Path,
    ) -> Result<(), YtDlpError> {
        let args = self.audio_args(url, codec, quality, output_template);
        self.run(&args).await
    }

    fn video_args(&self, url: &str, target_format: &str, output_template: &Path) -> Vec<String> {
        let mut args = self.common_args(output_template);
        args.extend([
            "-f".into(),
            "bestvideo+bestaudio/best".into(),
            "--recode-video".into(),
            target_format.into(),
        ]);
        args.push(url.into());
        args
    }

    fn audio_args(
        &self,
        url: &str,
        codec: &str,
        quality: &str,
        output_template: &Path,
    ) -> Vec<String> {
        let mut args = self.common_args(output_template);
        args.extend([
            "-f".into(),
            "bestaudio/best".into(),
            "-x".into(),
            "--audio-format".into(),
            codec.into(),
            "--audio-quality".into(),
            quality.into(),
        ]);
        args.push(url.into());
        args
    }

    fn common_args(&self, output_template: &Path) -> Vec<String> {
        let mut args = vec![
            "--no-playlist".into(),
            "--no-progress".into(),
            "-o".into(),
            output_template.to_string_lossy().into_owned(),
        ];
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".into());
            args.push(cookies.to_string_lossy().into_owned());
        }
        args
    }

    async fn run(&self, args: &[String]) -> Result<(), YtDlpError> {
        tracing::debug!(binary = %self.binary.display(), ?args, "invoking yt-dlp");

        let output = Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| YtDlpError::Spawn {
                binary: self.binary.to_string_lossy().into_owned(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(YtDlpError::NonZeroExit {
                status: output.status,
                stderr,
            });
        }

        Ok(())
    }
}
