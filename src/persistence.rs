//! Text and JSON forms of a board.
//!
//! The text form is one line per row, top to bottom, each line holding the
//! row's cell symbols and nothing else. Snake records are never written; a
//! loaded board gets them back by tracing trails (see [GameState::from_board]).
//! The JSON snapshot carries the rows plus the records so they can be checked
//! against each other on load.
use std::fmt::{self, Write as _};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::num::TryFromIntError;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::BoardError;
use crate::grid::{Board, Cell, Dimensions};
use crate::state::{GameState, SnakeRecord};

impl FromStr for Board {
    type Err = BoardError;

    /// Rows are split on line endings, a trailing `\r` is dropped and a last
    /// line without a newline still counts. Every row must be as wide as the
    /// first one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_rows(s.lines())
    }
}

impl Board {
    /// Builds a board from rows that are already split, one string per row.
    /// A line ending inside a row is an unknown symbol like any other.
    fn from_rows<'a>(rows: impl IntoIterator<Item = &'a str>) -> Result<Self, BoardError> {
        let mut cells = vec![];
        let mut width = None;
        let mut height = 0;

        for (row, line) in rows.into_iter().enumerate() {
            let start = cells.len();
            for (col, symbol) in line.chars().enumerate() {
                let cell =
                    Cell::from_char(symbol).ok_or(BoardError::UnknownSymbol { row, col, symbol })?;
                cells.push(cell);
            }

            let actual = cells.len() - start;
            let expected = *width.get_or_insert(actual);
            if actual != expected {
                return Err(BoardError::RaggedRow {
                    row,
                    expected,
                    actual,
                });
            }
            height = row + 1;
        }

        let width = width.unwrap_or(0);
        let too_large = |_: TryFromIntError| BoardError::TooLarge {
            rows: height,
            cols: width,
        };
        let dimensions = Dimensions::new(
            u32::try_from(width).map_err(too_large)?,
            u32::try_from(height).map_err(too_large)?,
        );
        Ok(Board::from_cells(cells, dimensions))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                f.write_char(cell.as_char())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl Board {
    /// Writes every row to `out` as one newline terminated line. This is the
    /// exact text [Board::load] reads back.
    pub fn write_rows<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in self.rows() {
            let line: String = row.iter().map(|cell| cell.as_char()).collect();
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// reads a board from a text file
    #[instrument(level = "trace", skip_all)]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let path = path.as_ref();
        let board: Board = fs::read_to_string(path)?.parse()?;
        debug!(
            path = %path.display(),
            width = board.width(),
            height = board.height(),
            "loaded board"
        );
        Ok(board)
    }

    /// writes the board to a text file, replacing whatever was there
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BoardError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_rows(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.board(), f)
    }
}

/// The JSON form of a [GameState]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// board rows top to bottom, without line endings
    pub rows: Vec<String>,
    /// one record per snake, in id order
    pub snakes: Vec<SnakeRecord>,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        GameSnapshot {
            rows: state
                .board()
                .rows()
                .map(|row| row.iter().map(|cell| cell.as_char()).collect())
                .collect(),
            snakes: state.snakes().to_vec(),
        }
    }
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = BoardError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        let board = Board::from_rows(snapshot.rows.iter().map(String::as_str))?;
        GameState::with_snakes(board, snapshot.snakes)
    }
}

impl GameState {
    /// Loads a board from a text file and traces its snakes
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        GameState::from_board(Board::load(path)?)
    }

    /// Saves the board as text. Snake records are not written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BoardError> {
        self.board().save(path)
    }

    /// renders the board to any sink, in the same format [GameState::save] uses
    pub fn write_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.board().write_rows(out)
    }

    #[allow(missing_docs)]
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(&GameSnapshot::from(self))?)
    }

    /// Reads a JSON snapshot, rejecting one whose snake records disagree with
    /// its rows
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        GameState::try_from(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellKind, Position};
    use crate::types::SnakeId;

    const DEFAULT_BOARD: &str = include_str!("../fixtures/default_board.txt");
    const ARENA: &str = include_str!("../fixtures/arena.txt");

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("snake-grid-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_default_fixture_matches_default_state() {
        let board: Board = DEFAULT_BOARD.parse().unwrap();
        assert_eq!(board.to_string(), DEFAULT_BOARD);
        assert_eq!(
            GameState::from_board(board).unwrap(),
            GameState::default_state()
        );
    }

    #[test]
    fn test_parse_arena() {
        let g = GameState::from_board(ARENA.parse().unwrap()).unwrap();
        assert_eq!(g.board().height(), 12);
        assert_eq!(g.board().width(), 16);
        assert_eq!(g.snake_count(), 4);
        assert_eq!(g.board().count(CellKind::Food), 4);
        let tails = g.snakes().iter().map(|s| s.tail).collect::<Vec<_>>();
        assert_eq!(
            tails,
            vec![
                Position::new(2, 2),
                Position::new(3, 11),
                Position::new(7, 5),
                Position::new(7, 7),
            ]
        );
        assert_eq!(g.snake_length(SnakeId(2)).unwrap(), 6);
    }

    #[test]
    fn test_line_endings() {
        let unix: Board = "#d>D#\n#####\n".parse().unwrap();
        let windows: Board = "#d>D#\r\n#####\r\n".parse().unwrap();
        let unterminated: Board = "#d>D#\n#####".parse().unwrap();
        assert_eq!(unix, windows);
        assert_eq!(unix, unterminated);
        assert_eq!(unix.height(), 2);
    }

    #[test]
    fn test_empty_text_is_empty_board() {
        let board: Board = "".parse().unwrap();
        assert_eq!(board.width(), 0);
        assert_eq!(board.height(), 0);
        assert_eq!(board.to_string(), "");
    }

    #[test]
    fn test_unknown_symbol() {
        let err = "###\n#?#\n".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            BoardError::UnknownSymbol {
                row: 1,
                col: 1,
                symbol: '?'
            }
        ));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = "####\n##\n####\n".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            BoardError::RaggedRow {
                row: 1,
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_write_rows_matches_display() {
        let g = GameState::from_board(ARENA.parse().unwrap()).unwrap();
        let mut out = vec![];
        g.write_board(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ARENA);
        assert_eq!(g.to_string(), ARENA);
    }

    #[test]
    fn test_file_round_trip_after_ticks() {
        let mut g = GameState::from_board(ARENA.parse().unwrap()).unwrap();
        for _ in 0..3 {
            g.tick(&mut crate::food::FirstEmptyFood).unwrap();
        }
        let path = temp_path("round-trip.txt");
        g.save(&path).unwrap();
        let loaded = GameState::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.board(), g.board());
        assert_eq!(loaded.alive_snake_count(), 2);
        // ids follow tail order, and snake 3's tail now comes before snake 1's
        assert_eq!(loaded.snakes()[1], g.snakes()[3]);
        assert_eq!(loaded.snakes()[2], g.snakes()[1]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Board::load(temp_path("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }

    #[test]
    fn test_json_snapshot() {
        let g = GameState::default_state();
        let json = g.to_json().unwrap();
        assert_eq!(GameState::from_json(&json).unwrap(), g);

        let mut snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.rows[2], "# d>D*             #");
        snapshot.snakes[0].alive = false;
        assert!(matches!(
            GameState::try_from(snapshot),
            Err(BoardError::CorruptSnake { .. })
        ));
        assert!(matches!(
            GameState::from_json("{\"rows\": 3}"),
            Err(BoardError::Json(_))
        ));
    }

    #[test]
    fn test_snapshot_rows_cannot_hold_line_breaks() {
        let snapshot = |rows: &[&str]| GameSnapshot {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            snakes: vec![],
        };
        for row in ["#d>D#\n#####", "#d>D#\r"] {
            let err = GameState::try_from(snapshot(&[row])).unwrap_err();
            assert!(
                matches!(err, BoardError::UnknownSymbol { row: 0, col: 5, .. }),
                "{:?}",
                err
            );
        }

        let g = GameState::try_from(snapshot(&["#####", "", "#####"]));
        assert!(matches!(
            g,
            Err(BoardError::RaggedRow {
                row: 1,
                expected: 5,
                actual: 0
            })
        ));

        let g = GameState::try_from(snapshot(&["", ""])).unwrap();
        assert_eq!(g.board().height(), 2);
        assert_eq!(g.board().width(), 0);
    }
}
