//! Application state
//!
//! Built once by the composition root ([`crate::setup`]) and shared with every
//! handler through `Arc`. Nothing in the process is lazily initialised on
//! first use.

use std::sync::Arc;

use campus_core::{Config, UploadConfig};
use campus_storage::Storage;

use crate::clock::Clock;
use crate::services::upload::ValidationPipeline;

/// Upload dependencies: where files go, how requests are checked, what time it is.
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn Storage>,
    pub validators: Arc<ValidationPipeline>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload: UploadState,
}

impl AppState {
    /// Assemble state with the standard validation pipeline for `config.upload`.
    pub fn new(config: Config, storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        let validators = Arc::new(ValidationPipeline::standard(&config.upload));
        Self {
            config,
            upload: UploadState {
                storage,
                validators,
                clock,
            },
        }
    }

    pub fn upload_config(&self) -> &UploadConfig {
        &self.config.upload
    }
}
