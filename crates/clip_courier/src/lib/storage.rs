//! Artifact lifecycle: the per-job delete-on-drop guard and the periodic
//! time-to-live sweep. The two run on independent cadences over the same
//! directories, so both treat an already-missing file as success.

use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tokio::task::JoinHandle;

use crate::types::MediaKind;

/// The three directories the pipeline is allowed to write under.
#[derive(Debug, Clone)]
pub struct StorageAreas {
    pub videos: PathBuf,
    pub audios: PathBuf,
    pub outputs: PathBuf,
}

impl StorageAreas {
    pub fn init(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let areas = Self {
            videos: root.join("videos"),
            audios: root.join("audios"),
            outputs: root.join("outputs"),
        };
        for dir in areas.all() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(areas)
    }

    pub fn area_for(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Video => &self.videos,
            MediaKind::Audio => &self.audios,
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.videos, &self.audios, &self.outputs]
    }
}

/// Owns one artifact on disk and deletes it when dropped. The terminal
/// deliverable's guard is moved into the response body, so deletion fires
/// once transmission finishes, on success, failure or disconnect alike.
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".into())
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "artifact removed"),
            // The sweep may have won the race; either order is fine.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "failed to remove artifact")
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    pub interval: Duration,
    pub max_age: Duration,
}

/// Removes every regular file in `dir` whose mtime is older than `max_age`.
/// Returns how many files were removed. Files vanishing mid-scan are not
/// errors; a concurrent delete-after-delivery may get there first.
pub fn sweep_area(dir: &Path, max_age: Duration) -> io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(dir)?.filter_map(|e| e.ok()) {
        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "failed to stat artifact");
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let stale = metadata
            .modified()
            .ok()
            .and_then(|mtime| now.duration_since(mtime).ok())
            .is_some_and(|age| age >= max_age);
        if !stale {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "swept stale artifact");
                removed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "failed to sweep artifact")
            }
        }
    }

    Ok(removed)
}

/// Process-wide safety net against leaked artifacts: scans every storage
/// area on a fixed interval, independent of any in-flight job. The max age
/// must stay well above worst-case pipeline latency.
pub fn spawn_sweeper(areas: StorageAreas, config: SweepConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(config.interval);
        loop {
            tick.tick().await;
            for dir in areas.all() {
                match sweep_area(dir, config.max_age) {
                    Ok(0) => {}
                    Ok(n) => tracing::info!(dir = %dir.display(), removed = n, "sweep cycle"),
                    Err(e) => {
                        tracing::warn!(error = %e, dir = %dir.display(), "sweep cycle failed")
                    }
                }
            }
        }
    })
}
