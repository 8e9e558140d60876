//! The game state aggregate: one [Board] plus the snake records that index it.
//!
//! The board is the single source of truth. A [SnakeRecord] caches where a
//! snake's head and tail sit so a tick does not need to retrace the whole
//! trail; the tick engine updates both views together.
mod tick;
mod trace;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub use tick::{NextSquare, TickSummary};

use crate::error::BoardError;
use crate::grid::{Board, Cell, Dimensions, Position};
use crate::types::{
    EmptyCellGettableGame, FoodGettableGame, HeadGettableGame, Move, SizeDeterminableGame,
    SnakeIDGettableGame, SnakeId,
};

/// Rows in the default board
pub const DEFAULT_ROWS: u32 = 18;
/// Columns in the default board
pub const DEFAULT_COLS: u32 = 20;

/// Head and tail coordinates of one snake, plus whether it is still moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnakeRecord {
    #[allow(missing_docs)]
    pub head: Position,
    #[allow(missing_docs)]
    pub tail: Position,
    #[allow(missing_docs)]
    pub alive: bool,
}

/// A board together with the snakes living on it. Snake ids index `snakes`
/// and never change for the lifetime of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    snakes: Vec<SnakeRecord>,
}

impl GameState {
    /// The fixed starting board: walls around the edge, one three segment
    /// snake in the top left heading right, and food right in front of it.
    pub fn default_state() -> Self {
        let mut board = Board::walled(Dimensions::new(DEFAULT_COLS, DEFAULT_ROWS));
        let tail = Position::new(2, 2);
        let head = Position::new(2, 4);
        board.set(tail, Cell::Tail(Move::Right));
        board.set(Position::new(2, 3), Cell::Body(Move::Right));
        board.set(head, Cell::Head(Move::Right));
        board.set(Position::new(2, 5), Cell::Food);

        GameState {
            board,
            snakes: vec![SnakeRecord {
                head,
                tail,
                alive: true,
            }],
        }
    }

    /// Builds a state from a board alone, tracing every snake from its tail.
    /// This is how a loaded board gets its snake records.
    #[instrument(level = "trace", skip_all)]
    pub fn from_board(board: Board) -> Result<Self, BoardError> {
        let snakes = trace::discover_snakes(&board)?;
        Self::with_snakes(board, snakes)
    }

    /// Builds a state from a board and an explicit list of snakes, rejecting
    /// a list that disagrees with what is drawn on the board
    pub fn with_snakes(board: Board, snakes: Vec<SnakeRecord>) -> Result<Self, BoardError> {
        if snakes.len() > usize::from(u16::MAX) + 1 {
            return Err(BoardError::TooManySnakes);
        }
        let state = GameState { board, snakes };
        state.check_consistency()?;
        Ok(state)
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn snakes(&self) -> &[SnakeRecord] {
        &self.snakes
    }

    /// splits the state back into its board and snake records
    pub fn into_parts(self) -> (Board, Vec<SnakeRecord>) {
        (self.board, self.snakes)
    }

    /// the record for a snake, or an error if no such snake exists
    pub fn snake(&self, snake_id: SnakeId) -> Result<&SnakeRecord, BoardError> {
        self.snakes
            .get(snake_id.as_usize())
            .ok_or(BoardError::UnknownSnake(snake_id))
    }

    #[allow(missing_docs)]
    pub fn snake_count(&self) -> usize {
        self.snakes.len()
    }

    #[allow(missing_docs)]
    pub fn alive_snake_count(&self) -> usize {
        self.snakes.iter().filter(|s| s.alive).count()
    }

    /// true once no snake is left moving
    pub fn is_over(&self) -> bool {
        self.alive_snake_count() == 0
    }

    /// every segment of a snake from tail to head
    pub fn snake_segments(&self, snake_id: SnakeId) -> Result<Vec<Position>, BoardError> {
        let snake = self.snake(snake_id)?;
        let mut segments = vec![];
        trace::walk_trail(&self.board, snake_id, snake.tail, |pos, _| {
            segments.push(pos);
            Ok(())
        })?;
        Ok(segments)
    }

    /// number of cells a snake occupies, head and tail included
    pub fn snake_length(&self, snake_id: SnakeId) -> Result<usize, BoardError> {
        let snake = self.snake(snake_id)?;
        let trail = trace::walk_trail(&self.board, snake_id, snake.tail, |_, _| Ok(()))?;
        Ok(trail.segments)
    }

    /// Checks that every snake record agrees with the board: the trail from
    /// the recorded tail reaches the recorded head, the head symbol matches
    /// the alive flag, and no two trails share a cell.
    pub fn check_consistency(&self) -> Result<(), BoardError> {
        let mut occupied: FxHashSet<Position> = FxHashSet::default();
        for (idx, record) in self.snakes.iter().enumerate() {
            let snake = SnakeId(idx as u16);
            let trail = trace::walk_trail(&self.board, snake, record.tail, |at, _| {
                if occupied.insert(at) {
                    Ok(())
                } else {
                    Err(BoardError::BranchedTrail { snake, at })
                }
            })?;

            if trail.head != record.head {
                return Err(BoardError::HeadMismatch {
                    snake,
                    recorded: record.head,
                    found: trail.head,
                });
            }
            if trail.alive != record.alive {
                return Err(BoardError::CorruptSnake {
                    snake,
                    at: record.head,
                });
            }
        }
        Ok(())
    }

    /// true if [GameState::check_consistency] passes
    pub fn assert_consistency(&self) -> bool {
        self.check_consistency().is_ok()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::default_state()
    }
}

impl SnakeIDGettableGame for GameState {
    type SnakeIDType = SnakeId;

    fn get_snake_ids(&self) -> Vec<Self::SnakeIDType> {
        (0..self.snakes.len()).map(|i| SnakeId(i as u16)).collect()
    }
}

impl HeadGettableGame for GameState {
    fn get_head_as_position(&self, snake_id: &Self::SnakeIDType) -> Position {
        self.snakes[snake_id.as_usize()].head
    }

    fn get_tail_as_position(&self, snake_id: &Self::SnakeIDType) -> Position {
        self.snakes[snake_id.as_usize()].tail
    }
}

impl SizeDeterminableGame for GameState {
    fn get_width(&self) -> u32 {
        self.board.get_width()
    }

    fn get_height(&self) -> u32 {
        self.board.get_height()
    }
}

impl FoodGettableGame for GameState {
    fn get_all_food_as_positions(&self) -> Vec<Position> {
        self.board.get_all_food_as_positions()
    }
}

impl EmptyCellGettableGame for GameState {
    fn get_empty_cells(&self) -> Box<dyn Iterator<Item = Position> + '_> {
        self.board.get_empty_cells()
    }
}
