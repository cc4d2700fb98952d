//! # Regex Preview - tabular preview, match highlighting and diffing
//!
//! Client-side logic for previewing a CSV/Excel upload, highlighting the
//! matches of the regex a transformation service applied, and marking the
//! cells that service changed.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌─────────────┐    ┌──────────────┐
//! │ CSV / XLSX │───▶│   Parser   │───▶│   Preview   │───▶│  Highlight   │
//! │   bytes    │    │ (auto-enc) │    │ (100 rows)  │    │ (regexUsed)  │
//! └────────────┘    └────────────┘    └─────────────┘    └──────────────┘
//!                                            │
//!                         /api/transform     ▼
//!                   ┌─────────────────────────────┐    ┌──────────────┐
//!                   │ TransformResult (+original) │───▶│     Diff     │
//!                   └─────────────────────────────┘    └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`table`] - Row/column model
//! - [`parser`] - File format dispatch and decoders
//! - [`highlight`] - Regex match segments
//! - [`diff`] - Cell change detection
//! - [`api`] - Service request/response contract
//! - [`controller`] - Preview state machine

pub mod error;
pub mod table;

// Parsing
pub mod parser;

// Rendering support
pub mod highlight;
pub mod diff;

// Service contract
pub mod api;

// State
pub mod controller;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ClientError, ClientResult, ParseError, ParseResult, RequestError, ValidationError,
};

pub use table::{unique_headers, Cell, Row, Table, PREVIEW_ROW_LIMIT};

pub use parser::{parse, parse_preview, Decoder, Preview, TableFormat, ACCEPTED_EXTENSIONS};

pub use highlight::{highlight, Highlighter, Segment, Segments};

pub use diff::{is_changed, ChangeSummary};

pub use api::{
    endpoint_url, request_error, ExportFormat, RequestForm, TransformPayload, TransformResult,
    DOWNLOAD_FAILED, DOWNLOAD_PATH, TRANSFORM_FAILED, TRANSFORM_PATH,
};

pub use controller::{Phase, PendingRequest, PreviewController, SelectedFile, Tab};
