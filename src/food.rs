use log::debug;
use rand::Rng;

use crate::geometry::{Cell, GridGeometry};

/// Visual tag of a food item; an index into the configured kind names.
///
/// The simulation never interprets it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FoodKind(pub usize);

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}

impl Food {
    #[must_use]
    pub fn new(cell: Cell, kind: FoodKind) -> Self {
        Self { cell, kind }
    }
}

/// Owns the batch of food items active in the current round.
#[derive(Debug, Clone)]
pub struct FoodManager {
    items: Vec<Food>,
    kind_count: usize,
}

impl FoodManager {
    /// Creates an empty manager drawing from `kind_count` visual kinds.
    #[must_use]
    pub fn new(kind_count: usize) -> Self {
        Self {
            items: Vec::new(),
            kind_count: kind_count.max(1),
        }
    }

    /// Replaces the whole batch with between one and `kind_count` items on
    /// random cells.
    ///
    /// Cells are not checked against the snake or each other; collisions are
    /// recomputed every step, so overlapping placements are harmless.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, geometry: &GridGeometry) -> &[Food] {
        self.items.clear();

        let count = rng.gen_range(1..=self.kind_count);
        for _ in 0..count {
            let cell = Cell {
                x: rng.gen_range(0..i32::from(geometry.cells_x)),
                y: rng.gen_range(0..i32::from(geometry.cells_y)),
            };
            let kind = FoodKind(rng.gen_range(0..self.kind_count));
            self.items.push(Food::new(cell, kind));
        }

        debug!("respawned {} food item(s): {:?}", self.items.len(), self.items);
        &self.items
    }

    /// Returns true iff any active item sits on `head`.
    #[must_use]
    pub fn consumed_by(&self, head: Cell) -> bool {
        self.items.iter().any(|food| food.cell == head)
    }

    /// Replaces the batch with explicit items.
    pub fn set_items(&mut self, items: Vec<Food>) {
        self.items = items;
    }

    #[must_use]
    pub fn items(&self) -> &[Food] {
        &self.items
    }

    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.kind_count
    }
}
