#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! A state engine for snakes moving around a character grid.
//!
//! Each snake is drawn straight onto the board: its tail and body cells point
//! towards the next segment and its head points the way it is travelling, so
//! the board alone is enough to rebuild every snake. A [GameState] pairs the
//! [Board] with per-snake head and tail records and advances all snakes one
//! cell per [GameState::tick].
//!
//! ```
//! use snake_grid_engine::{FirstEmptyFood, GameState, NextSquare, Cell, SnakeId};
//!
//! let mut game = GameState::default_state();
//! assert_eq!(game.next_square(SnakeId(0)).unwrap(), NextSquare::Cell(Cell::Food));
//! let summary = game.tick(&mut FirstEmptyFood).unwrap();
//! assert_eq!(summary.grew, 1);
//! ```
//!
//! Boards are written and read as plain text, one line per row:
//! ```plain
//! #######
//! #d>D* #
//! #######
//! ```

pub mod error;
pub mod food;
pub mod grid;
pub mod persistence;
pub mod sim;
pub mod state;
pub mod types;

pub use error::{BoardError, FoodError};
pub use food::{FirstEmptyFood, FoodPlacer, RandomFood};
pub use grid::{Board, Cell, CellKind, Dimensions, Position};
pub use persistence::GameSnapshot;
pub use sim::{RunSummary, SimConfig};
pub use state::{GameState, NextSquare, SnakeRecord, TickSummary};
pub use types::{Move, SnakeId};

/// Loads a game from board text, tracing every snake on it
pub fn board_fixture(board: &str) -> Result<GameState, BoardError> {
    GameState::from_board(board.parse()?)
}
