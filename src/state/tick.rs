use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::error::BoardError;
use crate::food::FoodPlacer;
use crate::grid::{Cell, Position};
use crate::types::{Move, NoopInstruments, SimulatorInstruments, SnakeId};

use super::GameState;

/// What a snake's head is about to move into
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NextSquare {
    /// the cell one step ahead of the head
    Cell(Cell),
    /// the step would leave the board, which kills like a wall does
    OffBoard,
    /// the snake is dead and will not move again
    Dead,
}

/// Counts of what happened to the snakes during one tick
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// snakes that moved one cell without growing
    pub moved: usize,
    /// snakes that ate food and grew by one segment
    pub grew: usize,
    /// snakes that died this tick
    pub died: usize,
    /// times the food placer could not place replacement food
    pub food_failures: usize,
}

impl GameState {
    /// Looks one cell ahead of a snake's head without changing anything
    pub fn next_square(&self, snake_id: SnakeId) -> Result<NextSquare, BoardError> {
        let snake = self.snake(snake_id)?;
        if !snake.alive {
            return Ok(NextSquare::Dead);
        }
        let heading = self.heading(snake_id)?;
        Ok(self
            .board
            .step(snake.head, heading)
            .and_then(|pos| self.board.get(pos))
            .map_or(NextSquare::OffBoard, NextSquare::Cell))
    }

    /// Advances every live snake by one cell, see [GameState::tick_with_instruments]
    pub fn tick<F>(&mut self, food: &mut F) -> Result<TickSummary, BoardError>
    where
        F: FoodPlacer + ?Sized,
    {
        self.tick_with_instruments(food, &NoopInstruments)
    }

    /// Advances every live snake by one cell.
    ///
    /// Snakes move in id order and each one sees the board as the snakes
    /// before it left it, so a snake can run into a snake that already moved
    /// this tick. A snake heading into food grows and `food` is asked to put
    /// down a replacement; a snake heading into a wall, any snake segment or
    /// off the board dies where it stands; anything else is a plain move.
    ///
    /// An error means a snake record no longer matches the board. The state
    /// should be thrown away when that happens.
    #[instrument(level = "trace", skip_all)]
    pub fn tick_with_instruments<F, I>(
        &mut self,
        food: &mut F,
        instruments: &I,
    ) -> Result<TickSummary, BoardError>
    where
        F: FoodPlacer + ?Sized,
        I: SimulatorInstruments,
    {
        let start = Instant::now();
        let mut summary = TickSummary::default();

        for idx in 0..self.snakes.len() {
            let snake_id = SnakeId(idx as u16);
            match self.next_square(snake_id)? {
                NextSquare::Dead => continue,
                NextSquare::Cell(Cell::Food) => {
                    let head = self.advance_head(snake_id)?;
                    debug!(snake = %snake_id, %head, "snake ate");
                    summary.grew += 1;
                    if let Err(err) = food.place_food(&mut self.board) {
                        warn!(snake = %snake_id, %err, "could not place replacement food");
                        summary.food_failures += 1;
                    }
                }
                NextSquare::Cell(cell) if cell.is_obstacle() => {
                    debug!(snake = %snake_id, into = %cell, "snake crashed");
                    self.kill(snake_id);
                    summary.died += 1;
                }
                NextSquare::OffBoard => {
                    debug!(snake = %snake_id, "snake left the board");
                    self.kill(snake_id);
                    summary.died += 1;
                }
                NextSquare::Cell(_) => {
                    let head = self.advance_head(snake_id)?;
                    let tail = self.advance_tail(snake_id)?;
                    debug!(snake = %snake_id, %head, %tail, "snake moved");
                    summary.moved += 1;
                }
            }
        }

        instruments.observe_simulation(start.elapsed());
        Ok(summary)
    }

    /// the direction a live snake's head is pointing
    fn heading(&self, snake_id: SnakeId) -> Result<Move, BoardError> {
        let at = self.snake(snake_id)?.head;
        match self.board.get(at) {
            Some(Cell::Head(heading)) => Ok(heading),
            _ => Err(BoardError::CorruptSnake { snake: snake_id, at }),
        }
    }

    /// Moves the head one cell forward. The new head keeps the old heading
    /// and the cell it left becomes body pointing the same way.
    fn advance_head(&mut self, snake_id: SnakeId) -> Result<Position, BoardError> {
        let idx = snake_id.as_usize();
        let old_head = self.snakes[idx].head;
        let corrupt = || BoardError::CorruptSnake {
            snake: snake_id,
            at: old_head,
        };

        let (head, heading) = match self.board.get(old_head) {
            Some(head @ Cell::Head(heading)) => (head, heading),
            _ => return Err(corrupt()),
        };
        let new_head = self.board.step(old_head, heading).ok_or_else(corrupt)?;
        let neck = head.head_to_body().ok_or_else(corrupt)?;

        self.board.set(new_head, head);
        self.board.set(old_head, neck);
        self.snakes[idx].head = new_head;
        Ok(new_head)
    }

    /// Moves the tail one cell along its trail: the old tail cell empties and
    /// the body segment after it becomes the new tail.
    fn advance_tail(&mut self, snake_id: SnakeId) -> Result<Position, BoardError> {
        let idx = snake_id.as_usize();
        let old_tail = self.snakes[idx].tail;
        let broken = |at| BoardError::BrokenTrail { snake: snake_id, at };

        let heading = match self.board.get(old_tail) {
            Some(Cell::Tail(heading)) => heading,
            _ => return Err(broken(old_tail)),
        };
        let new_tail = self
            .board
            .step(old_tail, heading)
            .ok_or_else(|| broken(old_tail))?;
        let tail = self
            .board
            .get(new_tail)
            .and_then(Cell::body_to_tail)
            .ok_or_else(|| broken(new_tail))?;

        self.board.set(new_tail, tail);
        self.board.set(old_tail, Cell::Empty);
        self.snakes[idx].tail = new_tail;
        Ok(new_tail)
    }

    /// The snake stays where it is and its head turns into the dead marker
    fn kill(&mut self, snake_id: SnakeId) {
        let snake = &mut self.snakes[snake_id.as_usize()];
        snake.alive = false;
        self.board.set(snake.head, Cell::DeadHead);
    }
}
