pub mod origin;
pub mod upload;
