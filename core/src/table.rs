//! Uniform row/column model shared by the preview and the service result.
//!
//! Rows are keyed by column name; display order always comes from
//! [`Table::columns`]. A key missing from a row renders as an empty cell.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Maximum number of rows kept in a preview table.
pub const PREVIEW_ROW_LIMIT: usize = 100;

// =============================================================================
// Cell
// =============================================================================

/// A scalar cell value as decoded from a file or received from the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Absent or null.
    #[default]
    Empty,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Cell {
    /// Display string used for rendering, highlighting and diffing.
    ///
    /// Floats with no fractional part print without decimals, so `5.0`
    /// and `5` render the same way the service's JSON is shown.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(s) => Cow::Borrowed(s),
            Cell::Bool(b) => Cow::Owned(b.to_string()),
            Cell::Number(n) => Cow::Owned(format_number(n)),
        }
    }

    /// Numeric cell from a float, falling back to text for NaN/infinity.
    pub fn from_f64(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(value.to_string()),
        }
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{:.0}", f);
            }
        }
    }
    n.to_string()
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

/// Display string of an optional cell; `None` renders empty.
pub fn display_or_empty(cell: Option<&Cell>) -> Cow<'_, str> {
    cell.map(Cell::display).unwrap_or(Cow::Borrowed(""))
}

// =============================================================================
// Row
// =============================================================================

/// One record: column name to cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Cell>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.0.insert(column.into(), cell.into());
    }

    /// Display string for `column`, empty when the key is missing.
    pub fn display(&self, column: &str) -> Cow<'_, str> {
        display_or_empty(self.get(column))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// =============================================================================
// Table
// =============================================================================

/// Ordered columns plus ordered rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep the first `limit` rows, in order.
    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }
}

/// Make header names usable as unique row keys.
///
/// Names are trimmed, a blank name becomes `__EMPTY`, and repeats get a
/// `_1`, `_2`, ... suffix that does not collide with an existing name.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw: Vec<String> = raw
        .into_iter()
        .map(|s| {
            let name = s.as_ref().trim();
            if name.is_empty() {
                "__EMPTY".to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for name in &raw {
        if !out.contains(name) {
            out.push(name.clone());
            continue;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}_{}", name, n);
            if !out.contains(&candidate) && !raw.contains(&candidate) {
                out.push(candidate);
                break;
            }
            n += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Empty.display(), "");
        assert_eq!(Cell::from("Alice").display(), "Alice");
        assert_eq!(Cell::from(30_i64).display(), "30");
        assert_eq!(Cell::from_f64(5.0).display(), "5");
        assert_eq!(Cell::from_f64(30.5).display(), "30.5");
        assert_eq!(Cell::from(true).display(), "true");
    }

    #[test]
    fn test_cell_deserialization() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, 5, 2.5, "x", false]"#).unwrap();
        assert_eq!(cells[0], Cell::Empty);
        assert_eq!(cells[1].display(), "5");
        assert_eq!(cells[2].display(), "2.5");
        assert_eq!(cells[3], Cell::Text("x".into()));
        assert_eq!(cells[4], Cell::Bool(false));
    }

    #[test]
    fn test_row_missing_key_renders_empty() {
        let row: Row = [("name", "Alice")].into_iter().collect();
        assert_eq!(row.display("name"), "Alice");
        assert_eq!(row.display("age"), "");
    }

    #[test]
    fn test_row_is_transparent_json_object() {
        let row: Row = serde_json::from_str(r#"{"x": 5, "y": null}"#).unwrap();
        assert_eq!(row.display("x"), "5");
        assert_eq!(row.get("y"), Some(&Cell::Empty));
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"x":5,"y":null}"#);
    }

    #[test]
    fn test_unique_headers() {
        let headers = unique_headers(["id", " name ", "", "name", "name", ""]);
        assert_eq!(
            headers,
            vec!["id", "name", "__EMPTY", "name_1", "name_2", "__EMPTY_1"]
        );
    }

    #[test]
    fn test_unique_headers_skips_existing_suffix() {
        let headers = unique_headers(["a", "a", "a_1"]);
        assert_eq!(headers, vec!["a", "a_2", "a_1"]);
    }

    #[test]
    fn test_truncate_keeps_order() {
        let rows = (0..5)
            .map(|i| [("n", i as i64)].into_iter().collect::<Row>())
            .collect();
        let mut table = Table::new(vec!["n".into()], rows);
        table.truncate(3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[2].display("n"), "2");
    }
}
