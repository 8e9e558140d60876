#![allow(missing_docs)]
//! error types for loading, tracing and ticking boards
use thiserror::Error;

use crate::grid::Position;
use crate::types::SnakeId;

/// Errors raised while building, loading or advancing a board
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown symbol {symbol:?} at row {row} column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("trail of snake {snake} breaks at {at}")]
    BrokenTrail { snake: SnakeId, at: Position },

    #[error("trail of snake {snake} starting at {tail} never reaches a head")]
    CyclicTrail { snake: SnakeId, tail: Position },

    #[error("unknown snake {0}")]
    UnknownSnake(SnakeId),

    #[error("trail of snake {snake} runs into another snake at {at}")]
    BranchedTrail { snake: SnakeId, at: Position },

    #[error("board holds more than {max} snakes", max = u16::MAX)]
    TooManySnakes,

    #[error("snake {snake} has no head symbol at {at}")]
    CorruptSnake { snake: SnakeId, at: Position },

    #[error("snake {snake} traces to a head at {found}, but is recorded at {recorded}")]
    HeadMismatch {
        snake: SnakeId,
        recorded: Position,
        found: Position,
    },

    #[error("board of {rows}x{cols} cells does not fit u32 coordinates")]
    TooLarge { rows: usize, cols: usize },

    #[error("snapshot is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors a food placer can report back to the tick engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FoodError {
    #[error("no empty cell left to place food on")]
    NoEmptyCell,
}
