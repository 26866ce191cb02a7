//! Storage setup and initialization

use anyhow::{Context, Result};
use campus_core::Config;
use campus_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the uploads storage backend. The directory itself is created on first upload.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = LocalStorage::new(&config.upload.upload_dir, config.upload.public_path.clone());

    if let Err(e) = storage.health_check().await {
        // Uploads report write failures per request
        tracing::warn!(
            error = %e,
            upload_dir = %config.upload.upload_dir.display(),
            "Upload directory is not writable yet"
        );
    }

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    tracing::info!(
        backend = %storage.backend_type(),
        upload_dir = %cwd.join(storage.base_path()).display(),
        public_path = %config.upload.public_path,
        "Storage abstraction initialized successfully"
    );

    Ok(Arc::new(storage))
}
