//! Rectangular seat occupancy grid.

use super::SeatIndex;

/// Most seats a single grid may hold.
pub const MAX_SEATS: usize = 1 << 20;

/// A seat resolved against a grid: its linear index plus row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPosition {
    /// Linear, row-major index.
    pub index: usize,
    /// Row number, from 0.
    pub row: usize,
    /// Column number within the row, from 0.
    pub column: usize,
}

/// Occupancy of a voyage's seats, stored as a flat row-major buffer.
///
/// `false` means empty, `true` means sold. Linear index `n` maps to
/// `row = n / columns`, `column = n % columns`.
///
/// # Examples
///
/// ```
/// use voyage_ledger::domain::{SeatGrid, SeatIndex};
///
/// let grid = SeatGrid::new(2, 3);
/// let seat = grid.locate(SeatIndex::new(4)).unwrap();
/// assert_eq!((seat.row, seat.column), (1, 1));
///
/// // Past the last seat
/// assert!(grid.locate(SeatIndex::new(6)).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl SeatGrid {
    /// Create an all-empty grid.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of seats per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of seats.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Resolve a seat index, returning `None` if it lies outside the grid.
    pub fn locate(&self, seat: SeatIndex) -> Option<SeatPosition> {
        let index = usize::try_from(seat.get()).ok()?;
        if index >= self.cells.len() {
            return None;
        }
        Some(SeatPosition {
            index,
            row: index / self.columns,
            column: index % self.columns,
        })
    }

    /// Whether the seat is sold.
    pub fn is_occupied(&self, position: SeatPosition) -> bool {
        self.cells[position.index]
    }

    /// Flip a seat between empty and sold.
    pub fn toggle(&mut self, position: SeatPosition) {
        self.cells[position.index] = !self.cells[position.index];
    }

    /// Mark every seat empty.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of sold seats.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&sold| sold).count()
    }

    /// Iterate over every seat with its position and occupancy, row by row.
    pub fn seats(&self) -> impl Iterator<Item = (SeatPosition, bool)> + '_ {
        self.cells.iter().enumerate().map(|(index, &sold)| {
            (
                SeatPosition {
                    index,
                    row: index / self.columns,
                    column: index % self.columns,
                },
                sold,
            )
        })
    }

    /// Iterate over rows as occupancy slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.columns.max(1))
    }
}
