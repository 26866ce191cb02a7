//! Filename and media-type rules for uploads
//!
//! Media-type checks trust the client-declared `Content-Type` of the part;
//! file contents are never inspected.

/// Default payload ceiling: 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Default accepted media types
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
    "video/ogg",
];

/// Name used when the client supplies an empty filename
const FALLBACK_FILENAME: &str = "file";

fn is_safe_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Path separators never survive, so the result is always a single flat path
/// segment. Dots are kept, which means `..` alone stays `..`; callers always
/// prefix the result (see [`stored_filename`]) before touching the filesystem.
pub fn sanitize_filename(filename: &str) -> String {
    if filename.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    filename
        .chars()
        .map(|c| if is_safe_filename_char(c) { c } else { '_' })
        .collect()
}

/// On-disk name for an upload received at `received_at_millis`.
pub fn stored_filename(received_at_millis: i64, original_filename: &str) -> String {
    format!(
        "{}-{}",
        received_at_millis,
        sanitize_filename(original_filename)
    )
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Check a declared content type against the allow-list.
pub fn is_allowed_content_type(content_type: &str, allowed: &[String]) -> bool {
    let normalized = normalize_content_type(content_type);
    allowed.iter().any(|ct| ct.eq_ignore_ascii_case(&normalized))
}
