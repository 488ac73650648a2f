//! Temporary audio artifacts
//!
//! Recordings and synthesized replies live in `charla-*` files under
//! the system temp directory for at most one turn. Each artifact
//! deletes itself on drop; `sweep_leaked_artifacts` runs at teardown to
//! catch files leaked by earlier aborted runs. Cleanup failures are
//! logged and never propagated.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use super::AudioError;

const ARTIFACT_PREFIX: &str = "charla-";
const ARTIFACT_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// A scoped temp file holding one turn's audio
#[derive(Debug)]
pub struct TempAudioArtifact {
    path: PathBuf,
}

impl TempAudioArtifact {
    /// Write `data` into a fresh artifact in the system temp directory.
    pub fn create(data: &[u8], extension: &str) -> Result<Self, AudioError> {
        Self::create_in(std::env::temp_dir(), data, extension)
    }

    /// Write `data` into a fresh artifact under `dir`.
    pub fn create_in(
        dir: impl AsRef<Path>,
        data: &[u8],
        extension: &str,
    ) -> Result<Self, AudioError> {
        let filename = format!("{ARTIFACT_PREFIX}{}.{extension}", Uuid::new_v4());
        let path = dir.as_ref().join(filename);
        fs::write(&path, data)?;
        debug!(path = %path.display(), bytes = data.len(), "Audio artifact created");
        Ok(Self { path })
    }

    /// Path of the artifact on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudioArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to delete audio artifact");
        }
    }
}

/// Delete leaked `charla-*` audio files from the system temp directory.
///
/// Returns the number of files removed. Only files matching the
/// artifact naming scheme are touched.
pub fn sweep_leaked_artifacts() -> usize {
    sweep_dir(std::env::temp_dir())
}

/// Sweep a specific directory for leaked artifacts.
pub fn sweep_dir(dir: impl AsRef<Path>) -> usize {
    let entries = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.as_ref().display(), error = %e, "Could not sweep temp directory");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_artifact(&path) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed leaked audio artifact");
                removed += 1;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove artifact"),
        }
    }
    removed
}

fn is_artifact(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(ARTIFACT_PREFIX));
    let ext_matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| ARTIFACT_EXTENSIONS.contains(&e));
    name_matches && ext_matches
}
