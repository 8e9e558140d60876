//! The character grid a game is played on.
//!
//! A [Board] is a fixed size, row major array of [Cell]s. The character
//! alphabet only exists at the text boundary (see `persistence`); inside the
//! engine every cell is a tagged [Cell].
mod cell;
pub mod dimensions;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use cell::{Cell, CellKind};
pub use dimensions::Dimensions;

use crate::types::{EmptyCellGettableGame, FoodGettableGame, Move, SizeDeterminableGame};

/// A (row, column) coordinate on the board, row 0 is the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    #[allow(missing_docs)]
    pub row: u32,
    #[allow(missing_docs)]
    pub col: u32,
}

impl Position {
    #[allow(missing_docs)]
    pub fn new(row: u32, col: u32) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular grid of cells. The size never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<Cell>,
    dimensions: Dimensions,
}

impl Board {
    /// a board of the given size with every cell set to `fill`
    pub fn new(dimensions: Dimensions, fill: Cell) -> Self {
        Board {
            cells: vec![fill; dimensions.cell_count()],
            dimensions,
        }
    }

    /// a board whose outermost ring is wall and everything else is empty
    pub fn walled(dimensions: Dimensions) -> Self {
        let mut board = Board::new(dimensions, Cell::Empty);
        let (w, h) = (dimensions.width(), dimensions.height());
        for row in 0..h {
            for col in 0..w {
                if row == 0 || col == 0 || row + 1 == h || col + 1 == w {
                    board.set(Position::new(row, col), Cell::Wall);
                }
            }
        }
        board
    }

    pub(crate) fn from_cells(cells: Vec<Cell>, dimensions: Dimensions) -> Self {
        debug_assert_eq!(cells.len(), dimensions.cell_count());
        Board { cells, dimensions }
    }

    #[allow(missing_docs)]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Read the cell at `pos`, None when `pos` is off the board
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.dimensions.index_of(pos).map(|idx| self.cells[idx])
    }

    /// Write the cell at `pos`. Returns false (and changes nothing) when
    /// `pos` is off the board
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.dimensions.index_of(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// the neighbouring position in direction `mv`, if it is on the board
    pub fn step(&self, pos: Position, mv: Move) -> Option<Position> {
        self.dimensions.step(pos, mv)
    }

    /// the rows of the board, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let width = self.width() as usize;
        (0..self.height() as usize).map(move |row| &self.cells[row * width..(row + 1) * width])
    }

    /// every position paired with its cell, in row major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (self.dimensions.position_of(idx), *cell))
    }

    /// every position whose cell matches `pred`, in row major order
    pub fn positions_where<F>(&self, pred: F) -> impl Iterator<Item = Position> + '_
    where
        F: Fn(Cell) -> bool + 'static,
    {
        self.iter()
            .filter(move |(_, cell)| pred(*cell))
            .map(|(pos, _)| pos)
    }

    #[allow(missing_docs)]
    pub fn food_positions(&self) -> Vec<Position> {
        self.positions_where(Cell::is_food).collect()
    }

    #[allow(missing_docs)]
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions_where(Cell::is_empty)
    }

    /// counts the cells of the given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }
}

impl SizeDeterminableGame for Board {
    fn get_width(&self) -> u32 {
        self.width()
    }

    fn get_height(&self) -> u32 {
        self.height()
    }
}

impl FoodGettableGame for Board {
    fn get_all_food_as_positions(&self) -> Vec<Position> {
        self.food_positions()
    }
}

impl EmptyCellGettableGame for Board {
    fn get_empty_cells(&self) -> Box<dyn Iterator<Item = Position> + '_> {
        Box::new(self.empty_positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walled_board() {
        let board = Board::walled(Dimensions::new(5, 4));
        assert_eq!(board.count(CellKind::Wall), 2 * 5 + 2 * 2);
        assert_eq!(board.count(CellKind::Empty), 3 * 2);
        assert_eq!(board.get(Position::new(1, 1)), Some(Cell::Empty));
        assert_eq!(board.get(Position::new(3, 4)), Some(Cell::Wall));
    }

    #[test]
    fn test_get_and_set_respect_bounds() {
        let mut board = Board::new(Dimensions::new(2, 2), Cell::Empty);
        assert!(board.set(Position::new(1, 0), Cell::Food));
        assert_eq!(board.get(Position::new(1, 0)), Some(Cell::Food));
        assert!(!board.set(Position::new(2, 0), Cell::Food));
        assert_eq!(board.get(Position::new(0, 2)), None);
        assert_eq!(board.food_positions(), vec![Position::new(1, 0)]);
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut board = Board::new(Dimensions::new(3, 2), Cell::Empty);
        board.set(Position::new(1, 2), Cell::Wall);
        let rows = board.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &[Cell::Empty; 3]);
        assert_eq!(rows[1], &[Cell::Empty, Cell::Empty, Cell::Wall]);
    }

    #[test]
    fn test_zero_width_rows() {
        let board = Board::new(Dimensions::new(0, 2), Cell::Empty);
        assert_eq!(board.rows().count(), 2);
        assert!(board.rows().all(|r| r.is_empty()));
    }
}
