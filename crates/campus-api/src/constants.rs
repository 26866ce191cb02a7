//! API constants

/// Upload endpoint
pub const UPLOAD_ROUTE: &str = "/api/upload";

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// Headroom allowed on top of the file ceiling for multipart boundaries and part headers
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Service name reported in logs
pub const SERVICE_NAME: &str = "campus-api";
