//! Compound identifiers for table cells.
//!
//! A cell inside a table region is addressed by one string token so that it
//! can serve as a UI key and be mapped back to the originating cell:
//!
//! ```text
//! {table}_cell_{row_index}_{col_index}_cell_{row}_{row_span}_cell_{col}_{col_span}
//! ```
//!
//! The `_cell_` word never occurs inside a numeric group, and the groups are
//! read from the right, so table ids may themselves contain underscores.
//!
//! # Example
//!
//! ```
//! use regionlink::codec::{decode, encode};
//! use regionlink::model::{ContentId, Quad, TableCell};
//!
//! let cell = TableCell::new(Quad::from_rect(0.0, 0.0, 10.0, 10.0).unwrap(), 0, 0);
//! let token = encode(&ContentId::from("T1"), &cell);
//! assert_eq!(token, "T1_cell_0_0_cell_0_1_cell_0_1");
//!
//! let id = decode(&token).unwrap();
//! assert_eq!((id.row, id.row_span, id.col, id.col_span), (0, 1, 0, 1));
//! ```

use crate::model::{ContentId, TableCell, TableCells};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Delimiter between the table id and each numeric group.
pub const CELL_DELIMITER: &str = "_cell_";

/// Marker of cells belonging to rows the backend skipped.
pub const SKIP_ROW_SENTINEL: &str = "_skip_row_";

/// Decoded cell address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundCellId {
    /// Canonical id of the table region
    pub table_id: String,
    /// Logical row index
    pub row_index: u32,
    /// Logical column index
    pub col_index: u32,
    /// Grid row
    pub row: u32,
    /// Rows spanned
    pub row_span: u32,
    /// Grid column
    pub col: u32,
    /// Columns spanned
    pub col_span: u32,
}

impl CompoundCellId {
    /// Check if this id addresses the given cell.
    pub fn addresses(&self, cell: &TableCell) -> bool {
        self.row_index == cell.row_index
            && self.col_index == cell.col_index
            && self.row == cell.row
            && self.row_span == cell.row_span
            && self.col == cell.col
            && self.col_span == cell.col_span
    }

    /// Find the addressed cell in a table.
    pub fn locate<'a>(&self, cells: &'a TableCells) -> Option<&'a TableCell> {
        cells.iter().find(|c| self.addresses(c))
    }
}

/// Encoder/decoder for compound cell tokens.
pub struct CellIdentifierCodec {
    pattern: Regex,
}

impl CellIdentifierCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?s)(.*)_cell_([0-9]+)_([0-9]+)_cell_([0-9]+)_([0-9]+)_cell_([0-9]+)_([0-9]+)$",
            )
            .expect("cell token pattern is valid"),
        }
    }

    /// Encode a cell of the given table into a token.
    ///
    /// Cells whose payload identity carries the skipped-row marker keep that
    /// identity, so their token decodes to "no identity".
    pub fn encode(&self, table_id: &ContentId, cell: &TableCell) -> String {
        if let Some(identity) = cell
            .cell_identity
            .as_deref()
            .filter(|id| id.contains(SKIP_ROW_SENTINEL))
        {
            return format!("{}{}{}", table_id, CELL_DELIMITER, identity);
        }

        format!(
            "{table}{d}{}_{}{d}{}_{}{d}{}_{}",
            cell.row_index,
            cell.col_index,
            cell.row,
            cell.row_span,
            cell.col,
            cell.col_span,
            table = table_id,
            d = CELL_DELIMITER,
        )
    }

    /// Decode a token.
    ///
    /// Returns `None` for skipped-row tokens, tokens with fewer than three
    /// numeric groups, and groups that are not unsigned integers. Never
    /// panics, whatever the input.
    pub fn decode(&self, token: &str) -> Option<CompoundCellId> {
        if token.contains(SKIP_ROW_SENTINEL) {
            return None;
        }

        let caps = self.pattern.captures(token)?;
        let field = |i: usize| -> Option<u32> { caps.get(i)?.as_str().parse().ok() };

        Some(CompoundCellId {
            table_id: caps.get(1)?.as_str().to_string(),
            row_index: field(2)?,
            col_index: field(3)?,
            row: field(4)?,
            row_span: field(5)?,
            col: field(6)?,
            col_span: field(7)?,
        })
    }

    /// Check if a token could address a cell at all.
    pub fn is_cell_token(&self, token: &str) -> bool {
        self.decode(token).is_some()
    }
}

impl Default for CellIdentifierCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CellIdentifierCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellIdentifierCodec").finish_non_exhaustive()
    }
}

fn shared() -> &'static CellIdentifierCodec {
    static CODEC: OnceLock<CellIdentifierCodec> = OnceLock::new();
    CODEC.get_or_init(CellIdentifierCodec::new)
}

/// Encode a cell token with the shared codec.
pub fn encode(table_id: &ContentId, cell: &TableCell) -> String {
    shared().encode(table_id, cell)
}

/// Decode a cell token with the shared codec.
pub fn decode(token: &str) -> Option<CompoundCellId> {
    shared().decode(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quad;

    fn cell(row_index: u32, col_index: u32) -> TableCell {
        TableCell::new(Quad::from_rect(0.0, 0.0, 1.0, 1.0).unwrap(), row_index, col_index)
    }

    #[test]
    fn test_encode_layout() {
        let c = cell(0, 0);
        assert_eq!(encode(&ContentId::from("T1"), &c), "T1_cell_0_0_cell_0_1_cell_0_1");
        assert_eq!(encode(&ContentId::from(12), &c), "12_cell_0_0_cell_0_1_cell_0_1");
    }

    #[test]
    fn test_round_trip_with_spans() {
        let mut c = cell(3, 4).row_span(2).col_span(5);
        c.row = 6;
        c.col = 9;
        let token = encode(&ContentId::from("tbl_cell_7"), &c);
        let id = decode(&token).unwrap();

        assert_eq!(id.table_id, "tbl_cell_7");
        assert!(id.addresses(&c));
        assert_eq!(
            (id.row_index, id.col_index, id.row, id.row_span, id.col, id.col_span),
            (3, 4, 6, 2, 9, 5)
        );
    }

    #[test]
    fn test_distinct_cells_distinct_tokens() {
        let table = ContentId::from(1);
        let a = encode(&table, &cell(1, 11));
        let b = encode(&table, &cell(11, 1));
        assert_ne!(a, b);
        assert_ne!(a, encode(&ContentId::from(2), &cell(1, 11)));
    }

    #[test]
    fn test_round_trip_empty_table_id() {
        let c = cell(2, 1);
        let token = encode(&ContentId::from(""), &c);
        assert_eq!(token, "_cell_2_1_cell_2_1_cell_1_1");
        let id = decode(&token).unwrap();
        assert_eq!(id.table_id, "");
        assert!(id.addresses(&c));
    }

    #[test]
    fn test_skip_row_tokens() {
        let c = cell(0, 0).with_identity("2_skip_row_0");
        let token = encode(&ContentId::from(5), &c);
        assert_eq!(token, "5_cell_2_skip_row_0");
        assert!(decode(&token).is_none());
        assert!(decode("5_cell_0_0_cell_0_1_cell_0_1_skip_row_").is_none());
    }

    #[test]
    fn test_plain_identity_is_not_used_for_keys() {
        let c = cell(1, 2).with_identity("abc");
        let token = encode(&ContentId::from(5), &c);
        assert!(decode(&token).unwrap().addresses(&c));
    }

    #[test]
    fn test_decode_malformed() {
        for token in [
            "",
            "5",
            "5_cell_",
            "5_cell_0_0",
            "5_cell_0_0_cell_0_1",
            "5_cell_0_x_cell_0_1_cell_0_1",
            "5_cell_0_0_cell_0_1_cell_0_-1",
            "5_cell_0_0_cell_0_1_cell_0_99999999999",
            "5_cell_0_0_cell_0_1_cell_0_1_2",
            "5_cell_٣_0_cell_0_1_cell_0_1",
        ] {
            assert!(decode(token).is_none(), "{:?} should not decode", token);
        }
    }

    #[test]
    fn test_locate() {
        let cells = TableCells::new(vec![cell(0, 0), cell(0, 1), cell(1, 0)]);
        let token = encode(&ContentId::from(3), &cells.cells[1]);
        let id = decode(&token).unwrap();
        assert_eq!(id.locate(&cells), Some(&cells.cells[1]));
    }
}
