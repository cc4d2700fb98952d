//! Application configuration.
//!
//! Centralized configuration for the Regex Preview frontend. Values are
//! fixed at build time; set `REGEX_PREVIEW_BACKEND_URL` when running
//! `trunk build` to point at a service on another origin.

/// Transformation service base URL.
///
/// Empty means same origin, with `/api` proxied by the dev server.
pub const BACKEND_URL: &str = match option_env!("REGEX_PREVIEW_BACKEND_URL") {
    Some(url) => url,
    None => "",
};

/// Page title.
pub const APP_NAME: &str = "Regex Pattern Match & Replace";

/// Maximum file size accepted for preview (in bytes).
///
/// 50 MB limit.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Maximum activity log entries to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// `accept` attribute of the file picker.
pub use regex_preview::ACCEPTED_EXTENSIONS;
