//! Reconciles the requested output template against the file the extraction
//! tool actually produced. The tool is free to pick a different container
//! than the requested extension (a requested `.mp4` can arrive as `.mkv`,
//! a `.webm` source survives audio extraction as `.mp3`, and so on), so a
//! fixed suffix rewrite is never trusted; the file's existence is.

use std::path::{Path, PathBuf};

use crate::PipelineError;

/// Directory + unique stem + requested extension. Rendered to a yt-dlp
/// `%(ext)s` template before the fetch, resolved against disk after it.
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    dir: PathBuf,
    base: String,
    requested_ext: String,
}

impl OutputTemplate {
    pub fn new(dir: impl Into<PathBuf>, base: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base: base.into(),
            requested_ext: ext.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The template handed to the extraction tool.
    pub fn to_ytdlp_template(&self) -> PathBuf {
        self.dir.join(format!("{}.%(ext)s", self.base))
    }

    /// The path we asked for. May not be what we got.
    pub fn requested_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base, self.requested_ext))
    }
}

/// Locates the artifact after a reported-successful fetch. Checks the
/// requested path first, then scans the area for any file sharing the
/// template's stem (the tool negotiated a different container). Nothing
/// found is a first-class `ArtifactNotFound`, never a silent miss.
pub fn resolve_artifact(template: &OutputTemplate) -> Result<PathBuf, PipelineError> {
    let requested = template.requested_path();
    if requested.is_file() {
        return Ok(requested);
    }

    let entries = std::fs::read_dir(template.dir()).map_err(|e| {
        tracing::error!(error = %e, dir = %template.dir().display(), "failed to list storage area");
        PipelineError::ArtifactNotFound {
            requested: requested.clone(),
        }
    })?;

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s == template.base);
        if stem_matches {
            tracing::info!(
                requested = %requested.display(),
                resolved = %path.display(),
                "extraction tool chose a different container"
            );
            return Ok(path);
        }
    }

    Err(PipelineError::ArtifactNotFound { requested })
}
