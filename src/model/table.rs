//! Table cell types.

use super::Quad;
use serde::{Deserialize, Serialize};

/// Cells of a table region, in payload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCells {
    /// Cells in the table
    pub cells: Vec<TableCell>,
}

impl TableCells {
    /// Create a cell collection.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Get the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, TableCell> {
        self.cells.iter()
    }

    /// Number of grid rows covered by the cells.
    pub fn row_count(&self) -> u32 {
        self.cells
            .iter()
            .map(|c| c.row.saturating_add(c.row_span.max(1)))
            .max()
            .unwrap_or(0)
    }

    /// Number of grid columns covered by the cells.
    pub fn column_count(&self) -> u32 {
        self.cells
            .iter()
            .map(|c| c.col.saturating_add(c.col_span.max(1)))
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a TableCells {
    type Item = &'a TableCell;
    type IntoIter = std::slice::Iter<'a, TableCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// A single cell inside a table region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell outline in source page coordinates
    pub position: Quad,

    /// Logical row index
    pub row_index: u32,

    /// Logical column index
    pub col_index: u32,

    /// Grid row the cell starts on
    pub row: u32,

    /// Number of rows this cell spans
    pub row_span: u32,

    /// Grid column the cell starts on
    pub col: u32,

    /// Number of columns this cell spans
    pub col_span: u32,

    /// Identity string supplied by the payload, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_identity: Option<String>,

    /// Cell text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TableCell {
    /// Create a 1x1 cell at the given grid position.
    pub fn new(position: Quad, row: u32, col: u32) -> Self {
        Self {
            position,
            row_index: row,
            col_index: col,
            row,
            row_span: 1,
            col,
            col_span: 1,
            cell_identity: None,
            text: None,
        }
    }

    /// Set row span and return self.
    pub fn row_span(mut self, span: u32) -> Self {
        self.row_span = span;
        self
    }

    /// Set column span and return self.
    pub fn col_span(mut self, span: u32) -> Self {
        self.col_span = span;
        self
    }

    /// Set the payload identity and return self.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.cell_identity = Some(identity.into());
        self
    }

    /// Set cell text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}
