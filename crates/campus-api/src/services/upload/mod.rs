//! Upload pipeline: request types, validators and the storing service

mod service;
mod traits;
mod types;
mod validators;

pub use service::UploadService;
pub use traits::UploadValidator;
pub use types::{IncomingFile, UploadRequest};
pub use validators::{FilePresent, MediaTypeAllowed, SizeWithinLimit, ValidationPipeline};
