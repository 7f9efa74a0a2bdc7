use std::collections::VecDeque;

use log::debug;

use crate::geometry::{Cell, GridGeometry};
use crate::input::{Direction, direction_change_is_valid};

/// Connector shape of a body segment, derived from the motion through it.
///
/// Corners are named after the two cell sides the body connects, with north
/// being the top of the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum TurnKind {
    #[default]
    Straight,
    CornerNE,
    CornerNW,
    CornerSE,
    CornerSW,
}

impl TurnKind {
    /// Derives the shape for a segment entered moving `incoming` and left
    /// moving `outgoing`.
    #[must_use]
    pub fn from_motion(incoming: Direction, outgoing: Direction) -> Self {
        if incoming == outgoing || incoming == outgoing.opposite() {
            return Self::Straight;
        }

        // The body touches the side it came in through and the side it leaves by.
        let sides = [incoming.opposite(), outgoing];
        let north = sides.contains(&Direction::Up);
        let east = sides.contains(&Direction::Right);

        match (north, east) {
            (true, true) => Self::CornerNE,
            (true, false) => Self::CornerNW,
            (false, true) => Self::CornerSE,
            (false, false) => Self::CornerSW,
        }
    }
}

/// One body unit: where it is now and where it moves on the next step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    cell: Cell,
    next_cell: Cell,
    turn: TurnKind,
}

impl Segment {
    #[must_use]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Position this segment takes after the upcoming step.
    #[must_use]
    pub fn next_cell(&self) -> Cell {
        self.next_cell
    }

    /// Connector shape; always `Straight` for the head and the tail.
    #[must_use]
    pub fn turn(&self) -> TurnKind {
        self.turn
    }
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StepOutcome {
    pub head: Cell,
    /// Number of segments cut away by a self-collision, if one happened.
    pub truncated: Option<usize>,
}

/// Segment chain and movement state. Index 0 is the head.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Segment>,
    direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Cell, direction: Direction, geometry: &GridGeometry) -> Self {
        let mut body = VecDeque::new();
        body.push_front(Segment {
            cell: start,
            next_cell: geometry.advance(start, direction),
            turn: TurnKind::Straight,
        });

        Self { body, direction }
    }

    /// Creates a snake from explicit cells (front is head).
    ///
    /// Each segment's next cell is the cell of the segment in front of it,
    /// as if the body had been moving normally.
    ///
    /// # Panics
    ///
    /// Panics when `cells` is empty.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>, direction: Direction, geometry: &GridGeometry) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least one segment");

        let mut body = VecDeque::with_capacity(cells.len());
        let mut ahead = geometry.advance(cells[0], direction);
        for cell in cells {
            body.push_back(Segment {
                cell,
                next_cell: ahead,
                turn: TurnKind::Straight,
            });
            ahead = cell;
        }

        let mut snake = Self { body, direction };
        snake.refresh_turns(geometry);
        snake
    }

    /// Applies one movement step in `requested`, or in the current direction
    /// when `requested` would reverse into the neck.
    pub fn step(&mut self, requested: Direction, geometry: &GridGeometry) -> StepOutcome {
        if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
        }

        let head = geometry.advance(self.head(), self.direction);
        let truncated = self.truncate_at(head);

        // Conveyor: every follower takes its stored next cell and queues the
        // fresh cell of the segment in front of it.
        let mut ahead = head;
        for (index, segment) in self.body.iter_mut().enumerate() {
            if index == 0 {
                segment.cell = head;
                segment.next_cell = geometry.advance(head, self.direction);
            } else {
                segment.cell = segment.next_cell;
                segment.next_cell = ahead;
            }
            ahead = segment.cell;
        }

        self.refresh_turns(geometry);

        StepOutcome { head, truncated }
    }

    /// Appends a tail segment on the current tail's cell. It holds still for
    /// one step while the rest of the body moves on.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(Segment {
            cell: tail.cell,
            next_cell: tail.cell,
            turn: TurnKind::Straight,
        });
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body
            .front()
            .expect("snake body must always contain at least one segment")
            .cell
    }

    fn tail(&self) -> Segment {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Direction the tail is travelling in, when it is moving at all.
    #[must_use]
    pub fn tail_heading(&self, geometry: &GridGeometry) -> Option<Direction> {
        if self.body.len() < 2 {
            return None;
        }
        let tail = self.tail();
        geometry.direction_between(tail.cell, tail.next_cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    /// Cuts the body at the first interior segment on `head`, keeping the
    /// segments in front of it plus the current tail.
    fn truncate_at(&mut self, head: Cell) -> Option<usize> {
        let last = self.body.len().checked_sub(1)?;
        let hit = (1..last).find(|&index| self.body[index].cell == head)?;

        let removed = self.body.drain(hit..last).count();
        debug!("self-collision at {head:?}: segment {hit} hit, {removed} removed");
        Some(removed)
    }

    fn refresh_turns(&mut self, geometry: &GridGeometry) {
        let len = self.body.len();
        for index in 0..len {
            let turn = if index == 0 || index + 1 == len {
                TurnKind::Straight
            } else {
                let here = self.body[index].cell;
                let incoming = geometry.direction_between(self.body[index + 1].cell, here);
                let outgoing = geometry.direction_between(here, self.body[index - 1].cell);
                match (incoming, outgoing) {
                    (Some(incoming), Some(outgoing)) => TurnKind::from_motion(incoming, outgoing),
                    _ => TurnKind::Straight,
                }
            };
            self.body[index].turn = turn;
        }
    }
}
