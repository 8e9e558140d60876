use std::fmt;

use crate::types::{Move, Vector};

/// Coarse classification of a cell
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[allow(missing_docs)]
    Wall,
    #[allow(missing_docs)]
    Food,
    #[allow(missing_docs)]
    Empty,
    /// last segment of a snake
    Tail,
    /// interior segment of a snake
    Body,
    /// head of a live snake
    Head,
    /// head of a dead snake
    DeadHead,
}

/// The contents of a single board cell.
///
/// Snake segments carry the direction toward the next segment on the way to
/// the head; a live head carries the direction the snake is travelling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// open space, `' '`
    Empty,
    /// `'#'`
    Wall,
    /// `'*'`
    Food,
    /// `w a s d`
    Tail(Move),
    /// `^ < v >`
    Body(Move),
    /// `W A S D`
    Head(Move),
    /// `x`, inert forever
    DeadHead,
}

impl Cell {
    /// decode a board character, returns None for characters outside the alphabet
    pub fn from_char(c: char) -> Option<Self> {
        let cell = match c {
            ' ' => Cell::Empty,
            '#' => Cell::Wall,
            '*' => Cell::Food,
            'w' => Cell::Tail(Move::Up),
            'a' => Cell::Tail(Move::Left),
            's' => Cell::Tail(Move::Down),
            'd' => Cell::Tail(Move::Right),
            '^' => Cell::Body(Move::Up),
            '<' => Cell::Body(Move::Left),
            'v' => Cell::Body(Move::Down),
            '>' => Cell::Body(Move::Right),
            'W' => Cell::Head(Move::Up),
            'A' => Cell::Head(Move::Left),
            'S' => Cell::Head(Move::Down),
            'D' => Cell::Head(Move::Right),
            'x' => Cell::DeadHead,
            _ => return None,
        };
        Some(cell)
    }

    /// encode this cell as its board character
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Food => '*',
            Cell::Tail(Move::Up) => 'w',
            Cell::Tail(Move::Left) => 'a',
            Cell::Tail(Move::Down) => 's',
            Cell::Tail(Move::Right) => 'd',
            Cell::Body(Move::Up) => '^',
            Cell::Body(Move::Left) => '<',
            Cell::Body(Move::Down) => 'v',
            Cell::Body(Move::Right) => '>',
            Cell::Head(Move::Up) => 'W',
            Cell::Head(Move::Left) => 'A',
            Cell::Head(Move::Down) => 'S',
            Cell::Head(Move::Right) => 'D',
            Cell::DeadHead => 'x',
        }
    }

    #[allow(missing_docs)]
    pub fn kind(self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Wall => CellKind::Wall,
            Cell::Food => CellKind::Food,
            Cell::Tail(_) => CellKind::Tail,
            Cell::Body(_) => CellKind::Body,
            Cell::Head(_) => CellKind::Head,
            Cell::DeadHead => CellKind::DeadHead,
        }
    }

    /// The direction this cell continues in, None for cells that are not part
    /// of a direction chain (including a dead head)
    pub fn direction(self) -> Option<Move> {
        match self {
            Cell::Tail(m) | Cell::Body(m) | Cell::Head(m) => Some(m),
            _ => None,
        }
    }

    /// the coordinate delta this cell encodes, zero for cells that do not move
    pub fn delta(self) -> Vector {
        self.direction()
            .map(Move::to_vector)
            .unwrap_or(Vector { rows: 0, cols: 0 })
    }

    #[allow(missing_docs)]
    pub fn is_tail(self) -> bool {
        matches!(self, Cell::Tail(_))
    }

    /// true for both live and dead heads
    pub fn is_head(self) -> bool {
        matches!(self, Cell::Head(_) | Cell::DeadHead)
    }

    /// true for any of the thirteen snake symbols
    pub fn is_snake(self) -> bool {
        matches!(
            self,
            Cell::Tail(_) | Cell::Body(_) | Cell::Head(_) | Cell::DeadHead
        )
    }

    #[allow(missing_docs)]
    pub fn is_food(self) -> bool {
        self == Cell::Food
    }

    #[allow(missing_docs)]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// walls and snake segments kill whatever runs into them
    pub fn is_obstacle(self) -> bool {
        self == Cell::Wall || self.is_snake()
    }

    /// turns a body segment into the tail segment pointing the same way
    pub fn body_to_tail(self) -> Option<Self> {
        match self {
            Cell::Body(m) => Some(Cell::Tail(m)),
            _ => None,
        }
    }

    /// turns a live head into the body segment pointing the same way
    pub fn head_to_body(self) -> Option<Self> {
        match self {
            Cell::Head(m) => Some(Cell::Body(m)),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
