use crate::traits::{Storage, StorageBackend, StorageError, StorageResult, StoredFile};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    public_path: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// The directory is not touched here; it is created (with any missing
    /// parents) by the first write.
    ///
    /// # Arguments
    /// * `base_path` - Directory uploads are written to (e.g., "./uploads")
    /// * `public_path` - URL path the directory is served under (e.g., "/uploads")
    pub fn new(base_path: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        let public_path = public_path.into();
        LocalStorage {
            base_path: base_path.into(),
            public_path: format!("/{}", public_path.trim_matches('/')),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a storage key to its filesystem path.
    ///
    /// Keys are single path segments, so anything that could name a parent or
    /// a nested directory is refused before a path is built.
    fn key_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains('\0')
        {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a flat file name",
                filename
            )));
        }

        Ok(self.base_path.join(filename))
    }

    /// Generate the site-relative URL for a key
    fn generate_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_path.trim_end_matches('/'), filename)
    }

    async fn ensure_base_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create storage directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    async fn write_file(path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, filename: &str, data: Bytes) -> StorageResult<StoredFile> {
        let path = self.key_to_path(filename)?;
        let size = data.len() as u64;

        self.ensure_base_dir().await?;

        let start = std::time::Instant::now();

        if let Err(e) = Self::write_file(&path, &data).await {
            // Never leave a truncated file behind a failed upload
            if let Err(cleanup_err) = fs::remove_file(&path).await {
                if cleanup_err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %path.display(),
                        "Failed to remove incomplete upload"
                    );
                }
            }
            return Err(e);
        }

        let url = self.generate_url(filename);

        tracing::info!(
            path = %path.display(),
            key = %filename,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredFile {
            filename: filename.to_string(),
            url,
            size,
        })
    }

    async fn delete(&self, filename: &str) -> StorageResult<()> {
        let path = self.key_to_path(filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), key = %filename, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, filename: &str) -> StorageResult<bool> {
        let path = self.key_to_path(filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn health_check(&self) -> StorageResult<()> {
        match fs::metadata(&self.base_path).await {
            Ok(meta) if !meta.is_dir() => Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.base_path.display()
            ))),
            Ok(meta) if meta.permissions().readonly() => Err(StorageError::ConfigError(format!(
                "{} is read-only",
                self.base_path.display()
            ))),
            Ok(_) => Ok(()),
            // Created on first upload
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
