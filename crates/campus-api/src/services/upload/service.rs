//! Upload service
//!
//! validate → name → store → build URLs. Each request is handled end to end
//! with no retries; a storage failure is surfaced to the caller immediately.

use campus_core::validation::stored_filename;
use campus_core::{AppError, UploadResult};

use crate::state::{AppState, UploadState};
use crate::utils::origin::RequestOrigin;

use super::types::UploadRequest;

pub struct UploadService<'a> {
    upload: &'a UploadState,
    public_base_url: Option<&'a str>,
}

impl<'a> UploadService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            upload: &state.upload,
            public_base_url: state.config.upload.public_base_url.as_deref(),
        }
    }

    /// Validate, persist, and return the public URLs of an uploaded file.
    pub async fn upload(
        &self,
        request: UploadRequest,
        origin: &RequestOrigin,
    ) -> Result<UploadResult, AppError> {
        let file = self.upload.validators.run(request)?;

        let received_at = self.upload.clock.now_millis();
        let filename = stored_filename(received_at, &file.original_name);

        tracing::info!(
            original_filename = %file.original_name,
            stored_filename = %filename,
            content_type = %file.content_type,
            size_bytes = file.size,
            "Processing upload"
        );

        let stored = self
            .upload
            .storage
            .put(&filename, file.data)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, stored_filename = %filename, "Failed to store upload");
                AppError::from(e)
            })?;

        let base_url = match self.public_base_url {
            Some(base) => base.to_string(),
            None => origin.base_url(),
        };
        let absolute_url = format!("{}{}", base_url, stored.url);

        tracing::info!(
            url = %stored.url,
            absolute_url = %absolute_url,
            "Upload stored"
        );

        Ok(UploadResult {
            url: stored.url,
            absolute_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::services::upload::IncomingFile;
    use async_trait::async_trait;
    use bytes::Bytes;
    use campus_core::Config;
    use campus_storage::{
        LocalStorage, Storage, StorageBackend, StorageError, StorageResult, StoredFile,
    };
    use std::sync::Arc;
    use tempfile::tempdir;

    /// Storage whose writes always fail, e.g. a full disk
    struct FailingStorage;

    #[async_trait]
    impl Storage for FailingStorage {
        async fn put(&self, _filename: &str, _data: Bytes) -> StorageResult<StoredFile> {
            Err(StorageError::UploadFailed("No space left on device".to_string()))
        }

        async fn delete(&self, _filename: &str) -> StorageResult<()> {
            Ok(())
        }

        async fn exists(&self, _filename: &str) -> StorageResult<bool> {
            Ok(false)
        }

        async fn health_check(&self) -> StorageResult<()> {
            Err(StorageError::ConfigError("disk full".to_string()))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn test_config(base_url: Option<&str>) -> Config {
        let mut config = Config::from_vars(|_| None).unwrap();
        config.upload.public_base_url = base_url.map(String::from);
        config
    }

    fn origin() -> RequestOrigin {
        RequestOrigin {
            scheme: "http".to_string(),
            host: "host".to_string(),
        }
    }

    fn photo() -> UploadRequest {
        UploadRequest::with_file(IncomingFile::new(
            "My Photo (1).jpg",
            "image/jpeg",
            vec![7u8; 2048],
        ))
    }

    #[tokio::test]
    async fn test_stores_under_timestamped_sanitized_name() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path(), "/uploads"));
        let state = AppState::new(
            test_config(None),
            storage,
            Arc::new(FixedClock::new(1_700_000_000_000)),
        );

        let result = UploadService::new(&state)
            .upload(photo(), &origin())
            .await
            .unwrap();

        assert_eq!(result.url, "/uploads/1700000000000-My_Photo__1_.jpg");
        assert_eq!(
            result.absolute_url,
            "http://host/uploads/1700000000000-My_Photo__1_.jpg"
        );
        let written = std::fs::read(dir.path().join("1700000000000-My_Photo__1_.jpg")).unwrap();
        assert_eq!(written.len(), 2048);
    }

    #[tokio::test]
    async fn test_configured_base_url_wins_over_request_origin() {
        let dir = tempdir().unwrap();
        let state = AppState::new(
            test_config(Some("https://school.example")),
            Arc::new(LocalStorage::new(dir.path(), "/uploads")),
            Arc::new(FixedClock::new(42)),
        );

        let result = UploadService::new(&state)
            .upload(photo(), &origin())
            .await
            .unwrap();

        assert_eq!(
            result.absolute_url,
            "https://school.example/uploads/42-My_Photo__1_.jpg"
        );
    }

    #[tokio::test]
    async fn test_rejected_upload_writes_nothing() {
        let dir = tempdir().unwrap();
        let state = AppState::new(
            test_config(None),
            Arc::new(LocalStorage::new(dir.path().join("uploads"), "/uploads")),
            Arc::new(FixedClock::new(1)),
        );

        let request = UploadRequest::with_file(IncomingFile::new(
            "archive.zip",
            "application/zip",
            vec![1u8; 16],
        ));
        let result = UploadService::new(&state).upload(request, &origin()).await;

        assert!(matches!(result, Err(AppError::UnsupportedMediaType(_))));
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_storage_errors_surface_as_storage_failure() {
        let state = AppState::new(
            test_config(None),
            Arc::new(FailingStorage),
            Arc::new(FixedClock::new(1)),
        );

        let result = UploadService::new(&state).upload(photo(), &origin()).await;
        assert!(matches!(result, Err(AppError::StorageFailure(_))));
    }

    #[tokio::test]
    async fn test_sequential_uploads_get_distinct_names() {
        let dir = tempdir().unwrap();
        let clock = Arc::new(FixedClock::new(1_000));
        let state = AppState::new(
            test_config(None),
            Arc::new(LocalStorage::new(dir.path(), "/uploads")),
            clock.clone(),
        );
        let service = UploadService::new(&state);
        let png = || UploadRequest::with_file(IncomingFile::new("a.png", "image/png", vec![1u8]));

        let first = service.upload(png(), &origin()).await.unwrap();
        clock.advance(2);
        let second = service.upload(png(), &origin()).await.unwrap();

        assert_ne!(first.url, second.url);
        assert!(dir.path().join("1000-a.png").exists());
        assert!(dir.path().join("1002-a.png").exists());
    }
}
