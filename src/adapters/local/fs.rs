use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Ensure every directory exists, creating missing parents. Idempotent.
pub async fn prepare_directories<P: AsRef<Path>>(dirs: &[P]) -> io::Result<()> {
    for dir in dirs {
        tokio::fs::create_dir_all(dir.as_ref()).await?;
        debug!(dir = ?dir.as_ref(), "directory ready");
    }
    Ok(())
}

/// The name an upload is stored under: the last normal component of the
/// client-supplied filename. `None` when nothing usable is left.
pub fn stored_file_name(raw: &str) -> Option<String> {
    match Path::new(raw).components().next_back()? {
        Component::Normal(name) => name.to_str().map(str::to_owned),
        _ => None,
    }
}

/// A fresh staging file inside `upload_dir`, so the final rename never
/// crosses filesystems.
pub fn staging_path(upload_dir: &Path) -> PathBuf {
    upload_dir.join(format!(".upload-{}.part", Uuid::new_v4()))
}

/// Atomically move a staged upload to its stable path, replacing any
/// previous upload with the same name.
pub async fn persist_upload(staging: &Path, stored: &Path) -> io::Result<()> {
    tokio::fs::rename(staging, stored).await
}
