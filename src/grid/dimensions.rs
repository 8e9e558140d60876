//! The size of a board, fixed once the board is built.
//!
//! Cells are stored row major, so a [Position] maps to `row * width + col`.

use serde::{Deserialize, Serialize};

use super::Position;
use crate::types::Move;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Width and height of a board
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    #[allow(missing_docs)]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// number of columns in every row
    pub fn width(&self) -> u32 {
        self.width
    }

    /// number of rows
    pub fn height(&self) -> u32 {
        self.height
    }

    #[allow(missing_docs)]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// determines if a given position is on the board
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// The position one step from `pos` in direction `mv`, or None if the
    /// step leaves the board on any edge
    pub fn step(&self, pos: Position, mv: Move) -> Option<Position> {
        let v = mv.to_vector();
        let row = i64::from(pos.row) + v.rows;
        let col = i64::from(pos.col) + v.cols;
        if row < 0 || col < 0 || row >= i64::from(self.height) || col >= i64::from(self.width) {
            return None;
        }
        Some(Position::new(row as u32, col as u32))
    }

    pub(crate) fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.width as usize + pos.col as usize)
        } else {
            None
        }
    }

    pub(crate) fn position_of(&self, index: usize) -> Position {
        debug_assert!(index < self.cell_count());
        let width = self.width as usize;
        Position::new((index / width) as u32, (index % width) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_on_board() {
        let d = Dimensions::new(3, 2);
        let corner = Position::new(0, 0);
        assert_eq!(d.step(corner, Move::Up), None);
        assert_eq!(d.step(corner, Move::Left), None);
        assert_eq!(d.step(corner, Move::Right), Some(Position::new(0, 1)));
        assert_eq!(d.step(corner, Move::Down), Some(Position::new(1, 0)));

        let far = Position::new(1, 2);
        assert_eq!(d.step(far, Move::Down), None);
        assert_eq!(d.step(far, Move::Right), None);
    }

    #[test]
    fn test_index_round_trip() {
        let d = Dimensions::new(4, 3);
        for idx in 0..d.cell_count() {
            assert_eq!(d.index_of(d.position_of(idx)), Some(idx));
        }
        assert_eq!(d.index_of(Position::new(3, 0)), None);
        assert_eq!(d.index_of(Position::new(0, 4)), None);
    }
}
