use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Temporary files created while combining one job's audio.
///
/// Paths are registered before they are written, so a partially written file
/// is still removed by [`TempArtifacts::cleanup`].
#[derive(Debug)]
pub struct TempArtifacts {
    dir: PathBuf,
    job_id: String,
    paths: Vec<PathBuf>,
}

impl TempArtifacts {
    pub fn new(dir: &Path) -> Self {
        let dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        let job_id = format!(
            "{}_{}",
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            Uuid::new_v4().simple()
        );

        Self {
            dir,
            job_id,
            paths: Vec::new(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("narrator_{}_segment_{:04}.wav", self.job_id, index))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(format!("narrator_{}_concat.txt", self.job_id))
    }

    /// Where the transcoder writes before the result is moved to `output`.
    ///
    /// Lives next to `output` so the final rename stays on one filesystem, and
    /// keeps the extension the transcoder picks its encoder from.
    pub fn staging_path(&self, output: &Path) -> PathBuf {
        let file_name = output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        output.with_file_name(format!(".narrator_{}_{}", self.job_id, file_name))
    }

    /// Track a path some other process will create
    pub fn register(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Paths created so far, in creation order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub async fn write(&mut self, path: PathBuf, contents: &[u8]) -> std::io::Result<()> {
        self.paths.push(path.clone());
        tokio::fs::write(&path, contents).await
    }

    /// Delete every registered file. Failures are logged and otherwise
    /// ignored; returns how many files were removed.
    pub async fn cleanup(&mut self) -> usize {
        let mut removed = 0;

        for path in self.paths.drain(..) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove temporary file"
                    );
                }
            }
        }

        tracing::debug!(job_id = %self.job_id, removed, "Temporary files cleaned up");
        removed
    }
}
