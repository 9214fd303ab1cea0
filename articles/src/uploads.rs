//! Directory where uploaded images are kept and served from.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub async fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Writes `data` under a fresh name and returns that name.
    /// Only the extension of `original_name` survives.
    pub async fn save(&self, original_name: Option<&str>, data: &Bytes) -> io::Result<String> {
        self.ensure().await?;
        let file_name = stored_name(original_name);
        let path = self.root.join(&file_name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        let written = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;
        drop(file);
        discard_on_error(&path, written).await?;

        tracing::info!("Saved upload {} ({} bytes)", file_name, data.len());
        Ok(file_name)
    }

    /// Best-effort delete, a missing file is fine.
    /// Names with more than one path component are left alone.
    pub async fn remove(&self, file_name: &str) {
        if !is_plain_name(file_name) {
            tracing::warn!("Refusing to delete upload with odd name {:?}", file_name);
            return;
        }
        let path = self.root.join(file_name);

        match fs::remove_file(&path).await {
            Ok(()) => tracing::info!("Deleted upload {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Upload {} already gone", path.display());
            }
            Err(e) => tracing::warn!("Failed to delete {} with error: {}", path.display(), e),
        }
    }
}

/// A single file name with no directory part, as stored names always are
pub fn is_plain_name(name: &str) -> bool {
    !name.contains('\\')
        && Path::new(name)
            .file_name()
            .is_some_and(|n| n.to_str() == Some(name))
}

/// Drops a half written file so a failed save leaves nothing behind
async fn discard_on_error<T>(path: &Path, result: io::Result<T>) -> io::Result<T> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!("Failed to discard {} with error: {}", path.display(), e);
        }
    }
    result
}

fn stored_name(original_name: Option<&str>) -> String {
    let ext = original_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        ext
    )
}
