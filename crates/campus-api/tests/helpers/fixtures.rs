//! Multipart payload builders

use axum_test::multipart::{MultipartForm, Part};

/// Deterministic payload of `len` bytes
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// A form with a single `file` part
pub fn file_form(filename: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data).file_name(filename).mime_type(mime_type),
    )
}

/// A form carrying only text fields
pub fn text_only_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("title", "Sports day")
        .add_text("category", "gallery")
}
