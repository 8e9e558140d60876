//! Strategies for putting down replacement food after a snake eats.
//!
//! The tick engine asks a [FoodPlacer] for new food right after the snake
//! that ate has moved, so the placer sees the board as that snake left it.
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::error::FoodError;
use crate::grid::{Board, Cell};
use crate::types::EmptyCellGettableGame;

/// Something that can put one piece of food on a board
pub trait FoodPlacer {
    /// Place exactly one food on an empty cell of `board`, or report why not
    fn place_food(&mut self, board: &mut Board) -> Result<(), FoodError>;
}

impl<F> FoodPlacer for F
where
    F: FnMut(&mut Board) -> Result<(), FoodError>,
{
    fn place_food(&mut self, board: &mut Board) -> Result<(), FoodError> {
        self(board)
    }
}

/// Places food on an empty cell chosen uniformly at random
#[derive(Debug, Clone)]
pub struct RandomFood<R: Rng = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomFood<R> {
    #[allow(missing_docs)]
    pub fn new(rng: R) -> Self {
        RandomFood { rng }
    }
}

impl RandomFood<SmallRng> {
    /// a placer that makes the same choices every run for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    #[allow(missing_docs)]
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> FoodPlacer for RandomFood<R> {
    fn place_food(&mut self, board: &mut Board) -> Result<(), FoodError> {
        let pos = board
            .get_empty_cells()
            .choose(&mut self.rng)
            .ok_or(FoodError::NoEmptyCell)?;
        trace!(%pos, "placing food");
        board.set(pos, Cell::Food);
        Ok(())
    }
}

/// Places food on the first empty cell scanning rows top to bottom. Useful
/// when a run has to be reproducible without any randomness at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmptyFood;

impl FoodPlacer for FirstEmptyFood {
    fn place_food(&mut self, board: &mut Board) -> Result<(), FoodError> {
        let pos = board
            .empty_positions()
            .next()
            .ok_or(FoodError::NoEmptyCell)?;
        board.set(pos, Cell::Food);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellKind, Dimensions, Position};

    #[test]
    fn test_first_empty_scans_row_major() {
        let mut board = Board::walled(Dimensions::new(4, 4));
        board.set(Position::new(1, 1), Cell::Wall);
        FirstEmptyFood.place_food(&mut board).unwrap();
        assert_eq!(board.food_positions(), vec![Position::new(1, 2)]);
    }

    #[test]
    fn test_random_food_lands_on_empty_cell() {
        let mut board = Board::walled(Dimensions::new(6, 5));
        let empty_before = board.count(CellKind::Empty);
        let mut placer = RandomFood::seeded(42);
        for _ in 0..3 {
            placer.place_food(&mut board).unwrap();
        }
        assert_eq!(board.count(CellKind::Food), 3);
        assert_eq!(board.count(CellKind::Empty), empty_before - 3);
        assert_eq!(board.count(CellKind::Wall), 2 * 6 + 2 * 3);
    }

    #[test]
    fn test_seeded_placement_is_reproducible() {
        let run = |seed| {
            let mut board = Board::walled(Dimensions::new(10, 10));
            let mut placer = RandomFood::seeded(seed);
            for _ in 0..5 {
                placer.place_food(&mut board).unwrap();
            }
            board.food_positions()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_full_board_reports_no_empty_cell() {
        let mut board = Board::new(Dimensions::new(3, 3), Cell::Wall);
        assert_eq!(
            RandomFood::seeded(1).place_food(&mut board),
            Err(FoodError::NoEmptyCell)
        );
        assert_eq!(
            FirstEmptyFood.place_food(&mut board),
            Err(FoodError::NoEmptyCell)
        );
        assert_eq!(board.count(CellKind::Wall), 9);
    }
}
