//! Delimited text with encoding and delimiter auto-detection.

use encoding_rs::Encoding;

use super::Decoder;
use crate::error::ParseResult;
use crate::table::{unique_headers, Row, Table};

/// Candidate separators, in tie-break order.
const SEPARATORS: [char; 4] = [',', ';', '\t', '|'];

/// Decoder for `.csv` uploads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedDecoder;

impl Decoder for DelimitedDecoder {
    fn decode(&self, bytes: &[u8]) -> ParseResult<Table> {
        let encoding = detect_encoding(bytes);
        let content = decode_content(bytes, &encoding);
        let delimiter = detect_delimiter(&content);

        log::debug!("CSV encoding: {}, delimiter: {:?}", encoding, delimiter);

        parse_delimited(&content, delimiter)
    }
}

/// Detect the encoding of raw bytes, preferring UTF-8 when the bytes are valid UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-15".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the named encoding.
///
/// Unknown labels fall back to UTF-8. Malformed sequences become U+FFFD
/// and a leading byte order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let encoding = Encoding::for_label(encoding.as_bytes()).unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Pick the separator occurring most often in the first non-blank line.
///
/// Ties and lines without any separator resolve to `,`.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut best_sep = SEPARATORS[0];
    let mut best_count = 0;

    for &sep in &SEPARATORS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text with an explicit separator.
///
/// The first record is the header. Short records leave trailing columns
/// absent, extra fields are dropped and empty lines are skipped.
pub fn parse_delimited(content: &str, delimiter: char) -> ParseResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let columns = unique_headers(reader.headers()?.iter());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, field)| (column.clone(), field))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let table = parse_delimited("name;age\nAlice;30\nBob;25", ';').unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].display("name"), "Alice");
        assert_eq!(table.rows[1].display("age"), "25");
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name,value\n\"Smith, Jane\",\"said \"\"hi\"\"\"";
        let table = parse_delimited(csv, ',').unwrap();

        assert_eq!(table.rows[0].display("name"), "Smith, Jane");
        assert_eq!(table.rows[0].display("value"), "said \"hi\"");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let table = parse_delimited("a,b\n1,2\n\n3,4\n\n", ',').unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_record_of_empty_fields_is_a_row() {
        let table = parse_delimited("a,b\n1,2\n,\n3,4", ',').unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].display("a"), "");
        assert_eq!(table.rows[1].display("b"), "");
        assert_eq!(table.rows[2].display("a"), "3");

        let table = parse_delimited("a,b\n1,2\n , \n3,4", ',').unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].display("a"), " ");
    }

    #[test]
    fn test_short_record_leaves_columns_absent() {
        let table = parse_delimited("a,b,c\n1,2", ',').unwrap();

        assert_eq!(table.rows[0].get("b").map(|c| c.display().into_owned()), Some("2".into()));
        assert_eq!(table.rows[0].get("c"), None);
        assert_eq!(table.rows[0].display("c"), "");
    }

    #[test]
    fn test_extra_fields_dropped() {
        let table = parse_delimited("a,b\n1,2,3,4", ',').unwrap();

        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0].display("b"), "2");
    }

    #[test]
    fn test_values_keep_whitespace() {
        let table = parse_delimited("a\n  padded  ", ',').unwrap();
        assert_eq!(table.rows[0].display("a"), "  padded  ");
    }

    #[test]
    fn test_duplicate_headers_made_unique() {
        let table = parse_delimited("x,x\n1,2", ',').unwrap();
        assert_eq!(table.columns, vec!["x", "x_1"]);
        assert_eq!(table.rows[0].display("x_1"), "2");
    }

    #[test]
    fn test_empty_content() {
        let table = parse_delimited("", ',').unwrap();
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter("single\nvalue"), ',');
        assert_eq!(detect_delimiter(""), ',');
    }

    #[test]
    fn test_utf8_detected_and_bom_dropped() {
        let bytes = b"\xEF\xBB\xBFname\nZo\xC3\xAB";
        assert_eq!(detect_encoding(bytes), "utf-8");

        let table = DelimitedDecoder.decode(bytes).unwrap();
        assert_eq!(table.columns, vec!["name"]);
        assert_eq!(table.rows[0].display("name"), "Zoë");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        assert_eq!(decode_content(bytes, "iso-8859-15"), "Société");
    }

    #[test]
    fn test_unknown_label_falls_back_to_utf8() {
        assert_eq!(decode_content(b"plain", "no-such-charset"), "plain");
    }
}
