//! Campus API Library
//!
//! HTTP upload endpoint, validation pipeline and application setup.

pub mod clock;
pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::HttpAppError;
pub use state::AppState;
