//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// A file persisted by a storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Key the file was stored under
    pub filename: String,
    /// Site-relative URL the file is served at
    pub url: String,
    /// Bytes written
    pub size: u64,
}

/// Storage abstraction trait
///
/// The upload service talks to this trait only, so tests and alternative
/// deployments can swap the backend without touching the pipeline.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `filename`, replacing any file with the same key.
    async fn put(&self, filename: &str, data: Bytes) -> StorageResult<StoredFile>;

    /// Delete a file by key. Deleting a missing file succeeds.
    async fn delete(&self, filename: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, filename: &str) -> StorageResult<bool>;

    /// Check that the backend can currently accept writes
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

impl From<StorageError> for campus_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(msg) => campus_core::AppError::InvalidInput(msg),
            other => campus_core::AppError::StorageFailure(other.to_string()),
        }
    }
}
