//! Types used by the upload service

use bytes::Bytes;

/// The `file` part of an upload request, as declared by the client
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Client-supplied filename, unsanitized
    pub original_name: String,
    /// Client-declared media type, as sent
    pub content_type: String,
    /// Buffered payload; cut short once it passes the size ceiling
    pub data: Bytes,
    /// Bytes observed on the wire for this part (may exceed `data.len()`)
    pub size: u64,
}

impl IncomingFile {
    pub fn new(
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self {
            original_name: original_name.into(),
            content_type: content_type.into(),
            size: data.len() as u64,
            data,
        }
    }
}

/// A parsed multipart upload request
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file: Option<IncomingFile>,
}

impl UploadRequest {
    pub fn with_file(file: IncomingFile) -> Self {
        Self { file: Some(file) }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
