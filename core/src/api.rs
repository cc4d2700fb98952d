//! Request/response contract of the transformation service.
//!
//! # Endpoints
//!
//! | Method | Path            | Fields                         | Success body        |
//! |--------|-----------------|--------------------------------|---------------------|
//! | POST   | `/api/transform`| `file`, `payload`              | [`TransformResult`] |
//! | POST   | `/api/download` | `file`, `payload`, `format`    | raw file bytes      |
//!
//! Failures carry a JSON body `{"detail": "..."}`. Download failures
//! arrive as a binary body and go through the same [`request_error`].

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::RequestError;
use crate::table::Row;

/// Transform endpoint path.
pub const TRANSFORM_PATH: &str = "/api/transform";

/// Download endpoint path.
pub const DOWNLOAD_PATH: &str = "/api/download";

/// Message used when a failed transform gives no better one.
pub const TRANSFORM_FAILED: &str = "Request failed";

/// Message used when a failed download gives no better one.
pub const DOWNLOAD_FAILED: &str = "Download failed";

// =============================================================================
// Request Types
// =============================================================================

/// JSON sent in the `payload` multipart field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformPayload {
    pub instruction: String,
    /// Restrict the pattern to these columns; `None` lets the service decide.
    pub columns: Option<Vec<String>>,
}

impl TransformPayload {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            columns: None,
        }
    }

    pub fn to_json(&self) -> String {
        json!({
            "instruction": self.instruction,
            "columns": self.columns,
        })
        .to_string()
    }
}

/// Export kinds offered by the download endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Value of the `format` multipart field.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Name given to the saved file.
    pub fn file_name(self) -> String {
        format!("processed_data.{}", self.as_str())
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "Download CSV",
            ExportFormat::Xlsx => "Download Excel",
        }
    }
}

/// Text fields of a multipart request, alongside the `file` part.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestForm {
    pub payload: TransformPayload,
    pub format: Option<ExportFormat>,
}

impl RequestForm {
    pub fn transform(instruction: impl Into<String>) -> Self {
        Self {
            payload: TransformPayload::new(instruction),
            format: None,
        }
    }

    pub fn download(instruction: impl Into<String>, format: ExportFormat) -> Self {
        Self {
            payload: TransformPayload::new(instruction),
            format: Some(format),
        }
    }

    /// Endpoint this form is posted to.
    pub fn path(&self) -> &'static str {
        match self.format {
            Some(_) => DOWNLOAD_PATH,
            None => TRANSFORM_PATH,
        }
    }

    /// `(name, value)` pairs in the order they are appended.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("payload", self.payload.to_json())];
        if let Some(format) = self.format {
            fields.push(("format", format.as_str().to_string()));
        }
        fields
    }
}

/// Join the configured base URL and an endpoint path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

// =============================================================================
// Response Types
// =============================================================================

/// Successful transform response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub columns: Vec<String>,
    /// Transformed rows, capped by the service for display.
    pub rows: Vec<Row>,
    /// Pre-transform values of the same rows, paired by index with `rows`.
    #[serde(default)]
    pub rows_original: Vec<Row>,
    pub regex_used: String,
    #[serde(default)]
    pub columns_applied: Vec<String>,
    /// Row count of the full transformed file.
    pub total_rows: usize,
}

impl TransformResult {
    /// Applied columns for display, `(none)` when empty.
    pub fn applied_columns_label(&self) -> String {
        if self.columns_applied.is_empty() {
            "(none)".to_string()
        } else {
            self.columns_applied.join(", ")
        }
    }
}

/// Error body convention of the service.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// The `detail` message of an error body, if it has one.
pub fn error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
}

/// Build the error for a non-success response.
///
/// Prefers the service `detail`, then `transport_message`, then `fallback`.
pub fn request_error(
    status: u16,
    body: &[u8],
    transport_message: Option<&str>,
    fallback: &str,
) -> RequestError {
    let message = error_detail(body)
        .or_else(|| {
            transport_message
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string());
    RequestError::new(Some(status), message)
}
