//! various types that are useful for working with the snake grid
use crate::grid::Position;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::time::Duration;

/// A vector with which to do positional math. Rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// row delta
    pub rows: i64,
    /// column delta
    pub cols: i64,
}

/// Represents a direction of travel on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Right,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Left => write!(f, "left"),
            Move::Right => write!(f, "right"),
            Move::Up => write!(f, "up"),
            Move::Down => write!(f, "down"),
        }
    }
}

impl Move {
    /// convert this move to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Left => Vector { rows: 0, cols: -1 },
            Move::Right => Vector { rows: 0, cols: 1 },
            Move::Up => Vector { rows: -1, cols: 0 },
            Move::Down => Vector { rows: 1, cols: 0 },
        }
    }
}

/// token to represent a snake id. Ids are assigned in the order tails are
/// found scanning the board row by row, and stay stable for the life of a
/// `GameState`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[repr(transparent)]
pub struct SnakeId(pub u16);

impl SnakeId {
    /// convert this snake ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Serialize for SnakeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game for which one can get the snake ids
pub trait SnakeIDGettableGame {
    #[allow(missing_docs)]
    type SnakeIDType: PartialEq + Debug + Serialize + Eq + Hash + Clone + Send;

    #[allow(missing_docs)]
    fn get_snake_ids(&self) -> Vec<Self::SnakeIDType>;
}

/// Instruments to be used with simulation
pub trait SimulatorInstruments: std::fmt::Debug {
    #[allow(missing_docs)]
    fn observe_simulation(&self, duration: Duration);
}

/// Instruments that ignore every observation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstruments;

impl SimulatorInstruments for NoopInstruments {
    fn observe_simulation(&self, _duration: Duration) {}
}

/// A game for which the head and tail of a snake can be got.
pub trait HeadGettableGame: SnakeIDGettableGame {
    /// get the head position for a given snake id
    fn get_head_as_position(&self, snake_id: &Self::SnakeIDType) -> Position;

    /// get the tail position for a given snake id
    fn get_tail_as_position(&self, snake_id: &Self::SnakeIDType) -> Position;
}

/// A game for which the food on the board can be queried
pub trait FoodGettableGame {
    /// every food cell on the board, in row major order
    fn get_all_food_as_positions(&self) -> Vec<Position>;
}

/// a game for which the size of the game board can be determined
pub trait SizeDeterminableGame {
    #[allow(missing_docs)]
    fn get_width(&self) -> u32;
    #[allow(missing_docs)]
    fn get_height(&self) -> u32;
}

/// a game where the empty cells can be listed
pub trait EmptyCellGettableGame {
    /// iterate the empty cells of the board, in row major order
    fn get_empty_cells(&self) -> Box<dyn Iterator<Item = Position> + '_>;
}
