//! Error types for the Regex Preview client.
//!
//! - [`ParseError`] - turning an uploaded file into a preview table
//! - [`ValidationError`] - local checks run before any request is sent
//! - [`RequestError`] - failures reported by the transformation service
//! - [`ClientError`] - top-level wrapper surfaced to the user
//!
//! Invalid highlight patterns have no variant here: the highlighter
//! swallows them and renders the cell unhighlighted.

use thiserror::Error;

// =============================================================================
// Parsing Errors
// =============================================================================

/// Errors while decoding an uploaded file into a [`crate::Table`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file extension is not one of the accepted tabular formats.
    #[error("Unsupported file type. Use CSV/XLS/XLSX.")]
    UnsupportedFormat {
        /// Name of the rejected file.
        file_name: String,
    },

    /// Malformed delimited-text record.
    #[error("Preview failed: invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or read.
    #[error("Preview failed: invalid spreadsheet: {0}")]
    Spreadsheet(String),

    /// Workbook opened but contains no worksheet.
    #[error("Preview failed: spreadsheet has no sheets")]
    NoSheets,

    /// File rejected before decoding (too large, unreadable).
    #[error("{0}")]
    Rejected(String),
}

impl From<calamine::Error> for ParseError {
    fn from(err: calamine::Error) -> Self {
        ParseError::Spreadsheet(err.to_string())
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Local validation failures. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Submission without a selected file.
    #[error("Please select a CSV/XLS/XLSX file.")]
    MissingFile,

    /// Submission with a blank instruction.
    #[error("Please enter a command.")]
    MissingInstruction,

    /// Download requested without both a file and an instruction.
    #[error("Please upload a file and enter a command first.")]
    NothingToDownload,

    /// Another request is still waiting for the service.
    #[error("A request is already in progress.")]
    RequestInFlight,
}

// =============================================================================
// Request Errors
// =============================================================================

/// Transport failure or non-success response from the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    /// Human-readable message, preferably the service's `detail`.
    pub message: String,
}

impl RequestError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Failure that happened before any response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}

// =============================================================================
// Client Errors (top-level)
// =============================================================================

/// Everything the controller can surface to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for controller operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let err: ClientError = ValidationError::MissingFile.into();
        assert_eq!(err.to_string(), "Please select a CSV/XLS/XLSX file.");

        let err: ClientError = RequestError::new(Some(400), "Invalid regex").into();
        assert_eq!(err.to_string(), "Invalid regex");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = ParseError::UnsupportedFormat {
            file_name: "notes.txt".into(),
        };
        assert_eq!(err.to_string(), "Unsupported file type. Use CSV/XLS/XLSX.");
    }

    #[test]
    fn test_decode_failures_read_as_preview_failures() {
        let err: ClientError = ParseError::NoSheets.into();
        assert_eq!(err.to_string(), "Preview failed: spreadsheet has no sheets");

        let err = ParseError::Spreadsheet("zip header missing".into());
        assert_eq!(err.to_string(), "Preview failed: invalid spreadsheet: zip header missing");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = RequestError::transport("connection refused");
        assert_eq!(err.status, None);
        assert_eq!(err.message, "connection refused");
    }
}
