use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use campus_core::{ApiResponse, AppError, UploadResult};

use crate::error::HttpAppError;
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::origin::RequestOrigin;
use crate::utils::upload::extract_upload_request;

/// Upload file handler
///
/// Accepts `multipart/form-data` with a single part named `file` and returns
/// the relative and absolute URLs the stored file is served at.
///
/// # Errors
/// - `AppError::NoFileProvided` - No `file` part (including non-multipart bodies)
/// - `AppError::UnsupportedMediaType` - Declared type outside the allow-list
/// - `AppError::PayloadTooLarge` - File exceeds the size ceiling
/// - `AppError::StorageFailure` - Writing to the uploads directory failed
#[tracing::instrument(
    skip(state, multipart),
    fields(
        origin = %origin.base_url(),
        operation = "upload_file"
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    origin: RequestOrigin,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<UploadResult>>, HttpAppError> {
    let expose_details = state.config.expose_error_details();
    let fail = |error: AppError| HttpAppError::new(error, expose_details);

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            // Not a multipart body, so there is no file part to read
            tracing::debug!(rejection = %rejection, "Upload request is not multipart");
            return Err(fail(AppError::NoFileProvided));
        }
    };

    let request = extract_upload_request(multipart, state.upload_config().max_file_size)
        .await
        .map_err(fail)?;

    let result = UploadService::new(&state)
        .upload(request, &origin)
        .await
        .map_err(fail)?;

    Ok(Json(ApiResponse::ok(result)))
}
