//! UI components.
//!
//! # Layout Components
//! - [`Header`] - Page title
//!
//! # Feature Components
//! - [`CommandForm`] - File picker, command input and submit
//! - [`ContentCard`] - Original/after tabs with highlighted and diffed tables
//! - [`LogsPanel`] - Activity log

mod header;
pub mod logs;
mod preview;
mod upload;

pub use header::*;
pub use logs::*;
pub use preview::*;
pub use upload::*;
