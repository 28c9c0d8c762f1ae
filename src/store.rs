//! Upload of benchmark result files

use std::fs;
use std::path::{Path, PathBuf};

/// Destination for benchmark result files
pub trait ArtifactStore {
    /// Store `local_path` as `object_name` inside `bucket`.
    ///
    /// Failures are logged and reported as `false`; they never abort a run.
    fn upload(&self, local_path: &Path, object_name: &str, bucket: &str) -> bool;
}

/// Stores artifacts as files under `<root>/<bucket>/<object_name>`
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn object_path(&self, object_name: &str, bucket: &str) -> PathBuf {
        self.root.join(bucket).join(object_name)
    }

    fn copy(&self, local_path: &Path, destination: &Path) -> std::io::Result<u64> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(local_path, destination)
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn upload(&self, local_path: &Path, object_name: &str, bucket: &str) -> bool {
        let destination = self.object_path(object_name, bucket);
        match self.copy(local_path, &destination) {
            Ok(bytes) => {
                tracing::info!(
                    source = %local_path.display(),
                    destination = %destination.display(),
                    bytes,
                    "uploaded artifact"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    source = %local_path.display(),
                    destination = %destination.display(),
                    error = %e,
                    "artifact upload failed"
                );
                false
            }
        }
    }
}
