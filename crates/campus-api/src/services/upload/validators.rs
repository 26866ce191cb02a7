//! Upload validators and the ordered pipeline that runs them

use campus_core::validation::{is_allowed_content_type, normalize_content_type};
use campus_core::{AppError, UploadConfig};

use super::traits::UploadValidator;
use super::types::{IncomingFile, UploadRequest};

/// Rejects requests without a `file` part
pub struct FilePresent;

impl UploadValidator for FilePresent {
    fn name(&self) -> &'static str {
        "file_present"
    }

    fn validate(&self, request: &UploadRequest) -> Result<(), AppError> {
        match request.file {
            Some(_) => Ok(()),
            None => Err(AppError::NoFileProvided),
        }
    }
}

/// Rejects declared media types outside the allow-list.
///
/// Only the client-declared type is checked; this is not a content check.
pub struct MediaTypeAllowed {
    allowed: Vec<String>,
}

impl MediaTypeAllowed {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl UploadValidator for MediaTypeAllowed {
    fn name(&self) -> &'static str {
        "media_type_allowed"
    }

    fn validate(&self, request: &UploadRequest) -> Result<(), AppError> {
        let Some(file) = &request.file else {
            return Ok(());
        };

        if is_allowed_content_type(&file.content_type, &self.allowed) {
            Ok(())
        } else {
            Err(AppError::UnsupportedMediaType(normalize_content_type(
                &file.content_type,
            )))
        }
    }
}

/// Rejects payloads larger than the configured ceiling
pub struct SizeWithinLimit {
    max_file_size: u64,
}

impl SizeWithinLimit {
    pub fn new(max_file_size: usize) -> Self {
        Self {
            max_file_size: max_file_size as u64,
        }
    }
}

impl UploadValidator for SizeWithinLimit {
    fn name(&self) -> &'static str {
        "size_within_limit"
    }

    fn validate(&self, request: &UploadRequest) -> Result<(), AppError> {
        match &request.file {
            Some(file) if file.size > self.max_file_size => Err(AppError::PayloadTooLarge {
                max: self.max_file_size,
            }),
            _ => Ok(()),
        }
    }
}

/// Ordered list of validators, short-circuiting on the first failure
pub struct ValidationPipeline {
    validators: Vec<Box<dyn UploadValidator>>,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Presence, then media type, then size.
    pub fn standard(config: &UploadConfig) -> Self {
        Self::new()
            .with(FilePresent)
            .with(MediaTypeAllowed::new(config.allowed_content_types.clone()))
            .with(SizeWithinLimit::new(config.max_file_size))
    }

    pub fn with(mut self, validator: impl UploadValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Names of the registered validators, in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator in order and hand back the accepted file.
    pub fn run(&self, request: UploadRequest) -> Result<IncomingFile, AppError> {
        for validator in &self.validators {
            if let Err(e) = validator.validate(&request) {
                tracing::debug!(
                    validator = validator.name(),
                    error = %e,
                    "Upload rejected"
                );
                return Err(e);
            }
        }

        request.file.ok_or(AppError::NoFileProvided)
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(max: usize) -> ValidationPipeline {
        let config = UploadConfig {
            max_file_size: max,
            ..UploadConfig::default()
        };
        ValidationPipeline::standard(&config)
    }

    fn oversized(content_type: &str, size: u64) -> UploadRequest {
        let mut file = IncomingFile::new("big.bin", content_type, vec![0u8; 4]);
        file.size = size;
        UploadRequest::with_file(file)
    }

    #[test]
    fn test_standard_order_is_presence_type_size() {
        assert_eq!(
            pipeline(10).names(),
            vec!["file_present", "media_type_allowed", "size_within_limit"]
        );
    }

    #[test]
    fn test_missing_file_is_rejected_first() {
        let result = pipeline(10).run(UploadRequest::empty());
        assert!(matches!(result, Err(AppError::NoFileProvided)));
    }

    #[test]
    fn test_unsupported_type_is_reported_before_size() {
        let result = pipeline(10).run(oversized("application/zip", 1_000));
        match result {
            Err(AppError::UnsupportedMediaType(ct)) => assert_eq!(ct, "application/zip"),
            other => panic!("Expected UnsupportedMediaType, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_allowed_type_is_too_large() {
        let result = pipeline(10).run(oversized("image/png", 11));
        assert!(matches!(result, Err(AppError::PayloadTooLarge { max: 10 })));
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        let file = IncomingFile::new("a.png", "image/png", vec![1u8; 10]);
        let accepted = pipeline(10).run(UploadRequest::with_file(file)).unwrap();
        assert_eq!(accepted.original_name, "a.png");
        assert_eq!(accepted.size, 10);
    }

    #[test]
    fn test_declared_type_with_parameters_is_accepted() {
        let file = IncomingFile::new("clip.webm", "video/webm; codecs=vp9", vec![1u8; 3]);
        assert!(pipeline(10).run(UploadRequest::with_file(file)).is_ok());
    }

    #[test]
    fn test_empty_pipeline_still_requires_a_file() {
        let result = ValidationPipeline::new().run(UploadRequest::empty());
        assert!(matches!(result, Err(AppError::NoFileProvided)));
    }
}
