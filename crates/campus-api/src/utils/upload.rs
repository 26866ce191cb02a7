//! Multipart parsing for the upload endpoint

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::BytesMut;
use campus_core::AppError;

use crate::constants::FILE_FIELD;
use crate::services::upload::{IncomingFile, UploadRequest};

/// Content type assumed when the part does not declare one
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

fn map_multipart_error(err: MultipartError, max_file_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            max: max_file_size as u64,
        }
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read the `file` part of a multipart body.
///
/// Other fields are skipped and only the first `file` part is used. At most
/// `max_file_size + 1` bytes are buffered: once the part grows past the
/// ceiling reading stops, and the recorded size is enough for the validation
/// pipeline to reject it.
pub async fn extract_upload_request(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<UploadRequest, AppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, max_file_size))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        let mut data = BytesMut::new();
        let mut size: u64 = 0;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| map_multipart_error(e, max_file_size))?
        {
            size += chunk.len() as u64;
            if size > max_file_size as u64 {
                tracing::debug!(
                    max_file_size,
                    observed_bytes = size,
                    "Upload exceeded size ceiling, stopped reading"
                );
                break;
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(UploadRequest::with_file(IncomingFile {
            original_name,
            content_type,
            data: data.freeze(),
            size,
        }));
    }

    Ok(UploadRequest::empty())
}
