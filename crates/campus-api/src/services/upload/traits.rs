//! Traits for upload validation

use campus_core::AppError;

use super::types::UploadRequest;

/// One step of the upload validation pipeline.
///
/// Validators run in the order they were registered and the first failure
/// ends the request, so each validator may assume the ones before it passed.
pub trait UploadValidator: Send + Sync {
    /// Short name, used in logs
    fn name(&self) -> &'static str;

    /// Accept the request or reject it with a terminal error
    fn validate(&self, request: &UploadRequest) -> Result<(), AppError>;
}
