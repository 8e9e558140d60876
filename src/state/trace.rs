use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::BoardError;
use crate::grid::{Board, Cell, Position};
use crate::types::SnakeId;

use super::SnakeRecord;

/// Where a trail walked from a tail ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Trail {
    pub head: Position,
    pub alive: bool,
    pub segments: usize,
}

/// Follows the direction chain from `tail` until it reaches a head, calling
/// `visit` on every segment on the way (tail first, head last).
///
/// The walk is bounded by the number of cells on the board, so a chain that
/// loops back on itself is reported instead of spinning forever.
pub(crate) fn walk_trail(
    board: &Board,
    snake: SnakeId,
    tail: Position,
    mut visit: impl FnMut(Position, Cell) -> Result<(), BoardError>,
) -> Result<Trail, BoardError> {
    let limit = board.dimensions().cell_count();
    let mut at = tail;

    for steps in 0..limit {
        let cell = board
            .get(at)
            .ok_or(BoardError::BrokenTrail { snake, at })?;
        visit(at, cell)?;

        let heading = match cell {
            Cell::Head(_) | Cell::DeadHead if steps > 0 => {
                return Ok(Trail {
                    head: at,
                    alive: cell != Cell::DeadHead,
                    segments: steps + 1,
                });
            }
            Cell::Tail(m) if steps == 0 => m,
            Cell::Body(m) if steps > 0 => m,
            _ => return Err(BoardError::BrokenTrail { snake, at }),
        };

        at = board
            .step(at, heading)
            .ok_or(BoardError::BrokenTrail { snake, at })?;
    }

    Err(BoardError::CyclicTrail { snake, tail })
}

/// Rebuilds every snake record from the board alone. Each tail symbol starts
/// one snake; ids follow the order tails are found scanning rows top to
/// bottom, columns left to right.
#[instrument(level = "trace", skip_all)]
pub(crate) fn discover_snakes(board: &Board) -> Result<Vec<SnakeRecord>, BoardError> {
    let records = board
        .positions_where(Cell::is_tail)
        .enumerate()
        .map(|(idx, tail)| {
            let snake = SnakeId(u16::try_from(idx).map_err(|_| BoardError::TooManySnakes)?);
            let trail = walk_trail(board, snake, tail, |_, _| Ok(()))?;
            Ok(SnakeRecord {
                head: trail.head,
                tail,
                alive: trail.alive,
            })
        })
        .collect::<Result<Vec<_>, BoardError>>()?;

    debug!(
        count = records.len(),
        heads = %records.iter().map(|s| s.head).join(" "),
        "traced snakes"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_trail_reaches_head() {
        let b = board("#####\n#d>D#\n#####\n");
        let trail = walk_trail(&b, SnakeId(0), Position::new(1, 1), |_, _| Ok(())).unwrap();
        assert_eq!(
            trail,
            Trail {
                head: Position::new(1, 3),
                alive: true,
                segments: 3
            }
        );
    }

    #[test]
    fn test_trail_bends() {
        let b = board("######\n#s   #\n#>>vx#\n#  >^#\n######\n");
        let mut visited = vec![];
        let trail = walk_trail(&b, SnakeId(0), Position::new(1, 1), |pos, _| {
            visited.push(pos);
            Ok(())
        });
        let trail = trail.unwrap();
        assert_eq!(trail.head, Position::new(2, 4));
        assert!(!trail.alive);
        assert_eq!(trail.segments, 7);
        assert_eq!(visited.len(), 7);
        assert_eq!(visited[0], Position::new(1, 1));
    }

    #[test]
    fn test_broken_trail() {
        let b = board("#####\n#d> #\n#####\n");
        let err = walk_trail(&b, SnakeId(0), Position::new(1, 1), |_, _| Ok(())).unwrap_err();
        assert!(matches!(
            err,
            BoardError::BrokenTrail { at, .. } if at == Position::new(1, 3)
        ));
    }

    #[test]
    fn test_trail_off_the_edge() {
        let b = board("d>\n");
        let err = walk_trail(&b, SnakeId(0), Position::new(0, 0), |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, BoardError::BrokenTrail { at, .. } if at == Position::new(0, 1)));
    }

    #[test]
    fn test_cyclic_trail() {
        // the tail feeds a ring of body segments that never reaches a head
        let b = board("s  \n>>v\n^<<\n");
        let err = walk_trail(&b, SnakeId(0), Position::new(0, 0), |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, BoardError::CyclicTrail { .. }));
    }

    #[test]
    fn test_discovery_order() {
        let b = board("#######\n#  s s#\n#  v D#\n#  S  #\n#d>D  #\n#######\n");
        let snakes = discover_snakes(&b).unwrap();
        assert_eq!(snakes.len(), 3);
        assert_eq!(snakes[0].tail, Position::new(1, 3));
        assert_eq!(snakes[0].head, Position::new(3, 3));
        assert_eq!(snakes[1].tail, Position::new(1, 5));
        assert_eq!(snakes[1].head, Position::new(2, 5));
        assert_eq!(snakes[2].tail, Position::new(4, 1));
        assert_eq!(snakes[2].head, Position::new(4, 3));
        assert!(snakes.iter().all(|s| s.alive));
    }

    #[test]
    fn test_snake_ids_are_limited_to_u16() {
        let most = usize::from(u16::MAX) + 1;
        let b = board(&format!("{}\n", "dD".repeat(most)));
        let snakes = discover_snakes(&b).unwrap();
        assert_eq!(snakes.len(), most);
        assert_eq!(snakes[most - 1].tail, Position::new(0, 2 * u16::MAX as u32));

        let b = board(&format!("{}\n", "dD".repeat(most + 1)));
        assert!(matches!(
            discover_snakes(&b),
            Err(BoardError::TooManySnakes)
        ));
    }
}
