//! Attachment blob storage: write-and-reference persistence for uploads.
//!
//! The catalog only ever writes blobs; retrieval is delegated to the
//! static-file layer that serves the upload directory under the public
//! prefix.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ItemResult;

/// An uploaded file ready to be persisted.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Storage abstraction for attachment blobs.
///
/// Implementations persist the content durably and return a stable
/// reference string usable to retrieve it later. Injected behind this trait
/// so the filesystem backend can be swapped for object storage or an
/// in-memory fake in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persist `content` under a collision-resistant name derived from
    /// `original_filename` and return the public reference.
    async fn save(&self, original_filename: &str, content: &[u8]) -> ItemResult<String>;
}

/// Filesystem-backed attachment store.
///
/// Blobs are written under `root` as `<random-token>_<original-filename>`;
/// the returned reference is `<public_prefix>/<blob-name>`. The random token
/// makes names collision-free, so an existing blob is never overwritten.
pub struct FsAttachmentStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// The directory blobs are written to.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn save(&self, original_filename: &str, content: &[u8]) -> ItemResult<String> {
        // Strip any path components a client may have smuggled into the name
        let original = original_filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original_filename);
        let blob_name = format!("{}_{}", Uuid::new_v4(), original);
        let full_path = self.root.join(&blob_name);

        debug!(blob = %blob_name, size = content.len(), "attachment_store: write");

        fs::create_dir_all(&self.root).await.inspect_err(|e| {
            warn!(root = %self.root.display(), error = %e, "attachment_store: create_dir_all failed");
        })?;

        // Atomic write: temp file + rename
        let temp_path = full_path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await.inspect_err(|e| {
            warn!(temp_path = %temp_path.display(), error = %e, "attachment_store: create failed");
        })?;
        file.write_all(content).await.inspect_err(|e| {
            warn!(error = %e, "attachment_store: write_all failed");
        })?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &full_path).await.inspect_err(|e| {
            warn!(from = %temp_path.display(), to = %full_path.display(), error = %e, "attachment_store: rename failed");
        })?;

        Ok(format!("{}/{}", self.public_prefix, blob_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_returns_prefixed_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path(), "/uploads");

        let reference = store.save("photo.jpg", b"jpeg bytes").await.unwrap();

        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with("_photo.jpg"));
    }

    #[tokio::test]
    async fn test_save_writes_content_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path(), "/uploads");

        let reference = store.save("photo.jpg", b"jpeg bytes").await.unwrap();

        let blob_name = reference.strip_prefix("/uploads/").unwrap();
        let on_disk = std::fs::read(dir.path().join(blob_name)).unwrap();
        assert_eq!(on_disk, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_identical_uploads_get_distinct_references() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path(), "/uploads");

        let first = store.save("photo.jpg", b"same").await.unwrap();
        let second = store.save("photo.jpg", b"same").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_save_strips_client_path_components() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(dir.path(), "/uploads");

        let reference = store.save("../../etc/passwd", b"data").await.unwrap();

        assert!(reference.ends_with("_passwd"));
        assert!(!reference.contains(".."));
    }

    #[tokio::test]
    async fn test_save_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FsAttachmentStore::new(&nested, "/uploads");

        let reference = store.save("photo.jpg", b"data").await.unwrap();

        let blob_name = reference.strip_prefix("/uploads/").unwrap();
        assert!(nested.join(blob_name).exists());
    }
}
