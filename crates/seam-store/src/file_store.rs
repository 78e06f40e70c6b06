//! File-based content storage backend.
//!
//! Stores one file per item at `{base_dir}/{space_id}/{content_id}`.
//! Content IDs may contain `/`, which maps to nested directories.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::{ContentStream, DataSource};

/// File-based content store.
///
/// Writes are atomic: data lands in a temporary file first, then is
/// renamed into place, so readers never observe a half-written item.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn content_path(&self, space_id: &str, content_id: &str) -> PathBuf {
        self.base_dir.join(space_id).join(content_id)
    }
}

#[async_trait::async_trait]
impl DataSource for FileStore {
    async fn get_content(
        &self,
        space_id: &str,
        content_id: &str,
    ) -> Result<ContentStream, StoreError> {
        let path = self.content_path(space_id, content_id);
        match tokio::fs::File::open(&path).await {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                space_id: space_id.to_string(),
                content_id: content_id.to_string(),
            }),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn put_content(
        &self,
        space_id: &str,
        content_id: &str,
        data: Bytes,
    ) -> Result<(), StoreError> {
        let path = self.content_path(space_id, content_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Atomic write: temp file in the same directory, then rename.
        // The full item name is kept in the temp name — chunk keys contain
        // dots, so with_extension would collide across sibling chunks.
        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        tokio::fs::write(&tmp_path, &data).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!(
            space_id,
            content_id,
            path = %path.display(),
            size = data.len(),
            "stored content to file"
        );
        Ok(())
    }
}
