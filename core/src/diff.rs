//! Cell-level change detection between a result and its original rows.
//!
//! Rows are paired by position: `rows[i]` is compared with
//! `rows_original[i]`. Values are compared by their display string, so a
//! number and the same digits as text count as unchanged.

use crate::api::TransformResult;
use crate::table::{display_or_empty, Cell};

/// Whether a cell's displayed value differs. Absent values display as `""`.
pub fn is_changed(original: Option<&Cell>, new: Option<&Cell>) -> bool {
    display_or_empty(original) != display_or_empty(new)
}

/// Counts over the displayed rows of a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub changed_cells: usize,
    pub changed_rows: usize,
}

impl TransformResult {
    /// Whether the cell at (`row`, `column`) differs from its original.
    pub fn is_cell_changed(&self, row: usize, column: &str) -> bool {
        let original = self.rows_original.get(row).and_then(|r| r.get(column));
        let new = self.rows.get(row).and_then(|r| r.get(column));
        is_changed(original, new)
    }

    /// Whether every displayed row has an original to compare against.
    pub fn is_aligned(&self) -> bool {
        self.rows.len() == self.rows_original.len()
    }

    pub fn change_summary(&self) -> ChangeSummary {
        if !self.is_aligned() {
            log::warn!(
                "Result has {} rows but {} original rows; pairing by position",
                self.rows.len(),
                self.rows_original.len()
            );
        }

        let mut summary = ChangeSummary::default();
        for row in 0..self.rows.len() {
            let changed = self
                .columns
                .iter()
                .filter(|column| self.is_cell_changed(row, column))
                .count();
            if changed > 0 {
                summary.changed_cells += changed;
                summary.changed_rows += 1;
            }
        }
        summary
    }
}
