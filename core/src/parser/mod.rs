//! Uploaded file to preview table.
//!
//! The file name picks a [`TableFormat`] once; each format owns one
//! [`Decoder`]. Decoders return every data row they find and the preview
//! is truncated to [`PREVIEW_ROW_LIMIT`] afterwards.
//!
//! # Example
//! ```
//! use regex_preview::parser::parse;
//!
//! let table = parse(b"name,age\nAlice,30\nBob,25", "people.csv").unwrap();
//! assert_eq!(table.columns, vec!["name", "age"]);
//! assert_eq!(table.rows.len(), 2);
//! ```

mod delimited;
mod spreadsheet;

pub use delimited::{
    decode_content, detect_delimiter, detect_encoding, parse_delimited, DelimitedDecoder,
};
pub use spreadsheet::{table_from_range, SpreadsheetDecoder};

use std::ffi::OsStr;
use std::path::Path;

use crate::error::{ParseError, ParseResult};
use crate::table::{Table, PREVIEW_ROW_LIMIT};

/// Extensions accepted by the upload control, in `accept` attribute form.
pub const ACCEPTED_EXTENSIONS: &str = ".csv,.xls,.xlsx";

/// Decodes raw bytes of one format into a full table.
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> ParseResult<Table>;
}

/// The tabular formats a user can upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `.csv`
    DelimitedText,
    /// `.xls`, `.xlsx`
    Spreadsheet,
}

impl TableFormat {
    /// Resolve the format from a file name's extension, ignoring case.
    pub fn from_file_name(file_name: &str) -> ParseResult<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(TableFormat::DelimitedText),
            Some("xls") | Some("xlsx") => Ok(TableFormat::Spreadsheet),
            _ => Err(ParseError::UnsupportedFormat {
                file_name: file_name.to_string(),
            }),
        }
    }

    pub fn decoder(self) -> &'static dyn Decoder {
        match self {
            TableFormat::DelimitedText => &DelimitedDecoder,
            TableFormat::Spreadsheet => &SpreadsheetDecoder,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableFormat::DelimitedText => "CSV",
            TableFormat::Spreadsheet => "Excel",
        }
    }
}

/// Capped table derived from an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub table: Table,
    /// Data rows the decoder produced before truncation.
    pub decoded_rows: usize,
    pub format: TableFormat,
}

impl Preview {
    pub fn is_truncated(&self) -> bool {
        self.decoded_rows > self.table.rows.len()
    }
}

/// Parse an uploaded file into a table of at most [`PREVIEW_ROW_LIMIT`] rows.
pub fn parse(bytes: &[u8], file_name: &str) -> ParseResult<Table> {
    parse_preview(bytes, file_name).map(|preview| preview.table)
}

/// Like [`parse`], keeping the pre-truncation row count and format.
pub fn parse_preview(bytes: &[u8], file_name: &str) -> ParseResult<Preview> {
    let format = TableFormat::from_file_name(file_name)?;
    log::debug!("Decoding '{}' as {} ({} bytes)", file_name, format.label(), bytes.len());

    let mut table = format.decoder().decode(bytes)?;
    let decoded_rows = table.rows.len();
    table.truncate(PREVIEW_ROW_LIMIT);

    log::debug!(
        "Preview of '{}': {} columns, {} of {} rows",
        file_name,
        table.columns.len(),
        table.rows.len(),
        decoded_rows
    );

    Ok(Preview {
        table,
        decoded_rows,
        format,
    })
}
