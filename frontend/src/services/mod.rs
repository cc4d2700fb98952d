//! Browser-side services.
//!
//! - [`file`] - Reading selected files
//! - [`transform`] - `/api/transform` and `/api/download` requests
//! - [`download`] - Saving bytes through an object URL

pub mod download;
pub mod file;
pub mod transform;

pub use download::save_bytes;
pub use file::read_file_bytes;
pub use transform::{request_download, request_transform};
