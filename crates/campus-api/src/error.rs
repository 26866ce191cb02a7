//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; every failure renders as the
//! `{ "success": false, "error": "<message>" }` envelope with the status code
//! carried by the underlying [`AppError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::{AppError, ErrorBody, ErrorMetadata, LogLevel};
use campus_storage::StorageError;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from campus-core)
///
/// Conversions via `From` never expose details; handlers that have the
/// configuration use [`HttpAppError::new`] with
/// [`Config::expose_error_details`](campus_core::Config::expose_error_details).
#[derive(Debug)]
pub struct HttpAppError {
    error: AppError,
    expose_details: bool,
}

impl HttpAppError {
    pub fn new(error: AppError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }

    pub fn into_inner(self) -> AppError {
        self.error
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError::new(err, false)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError::from(AppError::from(err))
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError::from(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Build the client-facing body. Details are added only when asked for, and
/// never for sensitive errors.
pub fn error_body(error: &AppError, expose_details: bool) -> ErrorBody {
    let mut body = ErrorBody::new(error.client_message());
    if expose_details && !error.is_sensitive() {
        let detailed = error.detailed_message();
        if detailed != body.error {
            body.details = Some(detailed);
        }
    }
    body
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = error_body(app_error, self.expose_details);

        (status, Json(body)).into_response()
    }
}
