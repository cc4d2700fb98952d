//! Excel workbooks (`.xls`, `.xlsx`). Only the first sheet is read.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use super::Decoder;
use crate::error::{ParseError, ParseResult};
use crate::table::{unique_headers, Cell, Row, Table};

/// Decoder for `.xls`/`.xlsx` uploads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetDecoder;

impl Decoder for SpreadsheetDecoder {
    fn decode(&self, bytes: &[u8]) -> ParseResult<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet = workbook
            .sheet_names()
            .into_iter()
            .next()
            .ok_or(ParseError::NoSheets)?;
        let range = workbook.worksheet_range(&sheet)?;

        log::debug!("Reading sheet '{}' ({:?})", sheet, range.get_size());

        Ok(table_from_range(&range))
    }
}

/// Build a table from a sheet range.
///
/// The first row of the used range is the header. Blank rows are skipped;
/// every other row gets a value for every column, empty cells becoming `""`.
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut sheet_rows = range.rows();

    let Some(header) = sheet_rows.next() else {
        return Table::default();
    };
    let columns = unique_headers(header.iter().map(|cell| cell.to_string()));

    let rows = sheet_rows
        .filter(|cells| cells.iter().any(|cell| !is_blank(cell)))
        .map(|cells| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let cell = cells
                        .get(i)
                        .map(cell_from_data)
                        .unwrap_or_else(|| Cell::Text(String::new()));
                    (column.clone(), cell)
                })
                .collect::<Row>()
        })
        .collect();

    Table::new(columns, rows)
}

fn is_blank(data: &Data) -> bool {
    match data {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Dates keep their serial number, as the sheet stores them.
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::from(*i),
        Data::Float(f) => Cell::from_f64(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::from_f64(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
        Data::Empty => Cell::Text(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), value.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_header_and_rows() {
        let range = sheet(&[
            &[text("name"), text("age")],
            &[text("Alice"), Data::Float(30.0)],
            &[text("Bob"), Data::Int(25)],
        ]);

        let table = table_from_range(&range);

        assert_eq!(table.columns, vec!["name", "age"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].display("age"), "30");
        assert!(matches!(table.rows[0].get("age"), Some(Cell::Number(_))));
        assert_eq!(table.rows[1].display("name"), "Bob");
    }

    #[test]
    fn test_missing_cells_default_to_empty_string() {
        let range = sheet(&[
            &[text("a"), text("b"), text("c")],
            &[text("1"), Data::Empty, Data::Empty],
        ]);

        let table = table_from_range(&range);

        assert_eq!(table.rows[0].get("b"), Some(&Cell::Text(String::new())));
        assert_eq!(table.rows[0].get("c"), Some(&Cell::Text(String::new())));
    }

    #[test]
    fn test_blank_rows_skipped() {
        let range = sheet(&[
            &[text("a")],
            &[text("x")],
            &[Data::Empty],
            &[text("y")],
        ]);

        let table = table_from_range(&range);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].display("a"), "y");
    }

    #[test]
    fn test_blank_and_duplicate_headers() {
        let range = sheet(&[
            &[text("id"), Data::Empty, text("id")],
            &[Data::Int(1), Data::Bool(true), Data::Int(2)],
        ]);

        let table = table_from_range(&range);

        assert_eq!(table.columns, vec!["id", "__EMPTY", "id_1"]);
        assert_eq!(table.rows[0].display("__EMPTY"), "true");
        assert_eq!(table.rows[0].display("id_1"), "2");
    }

    #[test]
    fn test_header_only_sheet() {
        let range = sheet(&[&[text("only"), text("headers")]]);
        let table = table_from_range(&range);

        assert_eq!(table.columns, vec!["only", "headers"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_empty_range() {
        let table = table_from_range(&Range::empty());
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}
