//! Campus Storage Library
//!
//! Storage abstraction for uploaded files and its local filesystem
//! implementation.
//!
//! # Key format
//!
//! Keys are flat file names inside the storage root: no `/`, no `\`, and never
//! `.` or `..` on their own. A backend resolves a key to exactly one file
//! directly under its root.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult, StoredFile};
