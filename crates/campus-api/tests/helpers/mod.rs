//! Test helpers: build AppState and router for integration tests.
//!
//! Each app writes into its own temporary uploads directory and reads time
//! from a [`FixedClock`] the test can move.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use campus_api::setup::routes;
use campus_api::{AppState, FixedClock};
use campus_core::Config;
use campus_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Millisecond timestamp the test clock starts at
pub const TEST_EPOCH_MILLIS: i64 = 1_700_000_000_000;

/// Test application: server, clock, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub clock: Arc<FixedClock>,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn stored_path(&self, filename: &str) -> PathBuf {
        self.upload_dir.join(filename)
    }

    /// Files currently present in the uploads directory
    pub fn stored_files(&self) -> Vec<String> {
        match std::fs::read_dir(&self.upload_dir) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            }
            Err(_) => Vec::new(),
        }
    }
}

/// Setup test app with default configuration.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust configuration first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    // Nested so tests can observe the directory being created on first upload
    let upload_dir = temp_dir.path().join("public").join("uploads");

    let mut config = Config::from_vars(|_| None).expect("Failed to build default config");
    config.upload.upload_dir = upload_dir.clone();
    configure(&mut config);

    let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(
        &config.upload.upload_dir,
        config.upload.public_path.clone(),
    ));
    let clock = Arc::new(FixedClock::new(TEST_EPOCH_MILLIS));
    let state = Arc::new(AppState::new(config.clone(), storage, clock.clone()));

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        clock,
        upload_dir,
        _temp_dir: temp_dir,
    }
}
