//! The labelled key grid.
//!
//! A [`Grid`] is a fixed `rows × columns` table of characters, laid over the
//! screen the way the keys sit on the keyboard.  Labels only name hotkeys;
//! geometry comes from a cell's position, never from its label.

use crate::operation::is_reserved_key;
use serde::Serialize;
use std::collections::HashMap;

/// A grid position, `(row, column)`, 0-indexed from the top-left.
///
/// Indices are signed: inset arithmetic may legitimately step outside the
/// nominal grid to reach the true screen edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: i32,
    pub column: i32,
}

impl Cell {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Top-left and bottom-right corners of the box enclosing `a` and `b`.
    pub fn bounding(a: Cell, b: Cell) -> (Cell, Cell) {
        (
            Cell::new(a.row.min(b.row), a.column.min(b.column)),
            Cell::new(a.row.max(b.row), a.column.max(b.column)),
        )
    }
}

/// A grid cell together with its hotkey label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledCell {
    pub cell: Cell,
    pub label: char,
}

/// Errors from building a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("grid row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("label {label:?} appears at both ({first_row}, {first_column}) and ({row}, {column})")]
    DuplicateLabel {
        label: char,
        first_row: usize,
        first_column: usize,
        row: usize,
        column: usize,
    },
    #[error("label {label:?} at ({row}, {column}) cannot be used in a hotkey")]
    ReservedLabel {
        label: char,
        row: usize,
        column: usize,
    },
}

/// A rectangular table of unique cell labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    labels: Vec<Vec<char>>,
}

impl Grid {
    /// Build a grid from rows of labels.
    ///
    /// Every row must have the same, non-zero length and no label may repeat:
    /// two cells sharing a label would also share every hotkey.  Labels must
    /// not be hotkey delimiters (`:` `,`) or whitespace.
    pub fn new(labels: Vec<Vec<char>>) -> Result<Self, GridError> {
        let expected = labels.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let mut seen: HashMap<char, (usize, usize)> = HashMap::new();
        for (row, cells) in labels.iter().enumerate() {
            if cells.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            for (column, &label) in cells.iter().enumerate() {
                if is_reserved_key(label) {
                    return Err(GridError::ReservedLabel { label, row, column });
                }
                if let Some(&(first_row, first_column)) = seen.get(&label) {
                    return Err(GridError::DuplicateLabel {
                        label,
                        first_row,
                        first_column,
                        row,
                        column,
                    });
                }
                seen.insert(label, (row, column));
            }
        }
        Ok(Self { labels })
    }

    /// Build a grid from one string per row, one label per `char`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        Self::new(rows.iter().map(|r| r.as_ref().chars().collect()).collect())
    }

    /// Nominal row count, margin row included.
    pub fn rows(&self) -> usize {
        self.labels.len()
    }

    /// Nominal column count, margin column included.
    pub fn columns(&self) -> usize {
        self.labels[0].len()
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = LabeledCell> + '_ {
        self.labels.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(column, &label)| LabeledCell {
                cell: Cell::new(row as i32, column as i32),
                label,
            })
        })
    }

    /// Cells at or after `start` in row-major reading order.
    pub fn cells_from(&self, start: Cell) -> impl Iterator<Item = LabeledCell> + '_ {
        self.cells()
            .filter(move |c| (c.cell.row, c.cell.column) >= (start.row, start.column))
    }
}

//  Tests
