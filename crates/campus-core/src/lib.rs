//! Campus Core Library
//!
//! Configuration, error types, wire models and the filename/media-type rules
//! shared by the storage backend and the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, LogFormat, ServerConfig, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ApiResponse, ErrorBody, UploadResult};
