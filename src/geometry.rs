//! Coordinate math for the wrap-around grid.
//!
//! Canonical positions are cell indices. Pixel coordinates are derived on
//! demand for the presentation layer and never fed back into the simulation.

use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How a head leaving the grid re-enters it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Leaving any edge lands on the first valid cell of the opposite edge.
    #[default]
    Toroidal,
    /// Leaving the right/bottom edge lands on index 0, but leaving the
    /// left/top edge lands on index `cells`, one past the last visible cell.
    /// The following move in the same direction brings it back on the grid.
    FarEdge,
}

/// Fixed grid dimensions for one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridGeometry {
    pub cells_x: u16,
    pub cells_y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
    pub wrap_mode: WrapMode,
}

impl GridGeometry {
    #[must_use]
    pub fn new(cells_x: u16, cells_y: u16, cell_width: u16, cell_height: u16) -> Self {
        Self {
            cells_x,
            cells_y,
            cell_width,
            cell_height,
            wrap_mode: WrapMode::default(),
        }
    }

    /// Derives integer cell extents from a viewport size, once per session.
    #[must_use]
    pub fn from_viewport(width_px: u32, height_px: u32, cells_x: u16, cells_y: u16) -> Self {
        let extent = |viewport: u32, cells: u16| {
            let size = viewport / u32::from(cells.max(1));
            u16::try_from(size).unwrap_or(u16::MAX).max(1)
        };

        Self::new(
            cells_x,
            cells_y,
            extent(width_px, cells_x),
            extent(height_px, cells_y),
        )
    }

    #[must_use]
    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    /// Returns true when `cell` is a visible grid cell.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.cells_x)
            && cell.y < i32::from(self.cells_y)
    }

    /// Pixel coordinates of the top-left corner of `cell`.
    #[must_use]
    pub fn to_pixel(self, cell: Cell) -> (i32, i32) {
        (
            cell.x * i32::from(self.cell_width),
            cell.y * i32::from(self.cell_height),
        )
    }

    /// Cell containing the pixel `(x, y)`.
    #[must_use]
    pub fn cell_at_pixel(self, x: i32, y: i32) -> Cell {
        Cell {
            x: cell_index_of(x, self.cell_width),
            y: cell_index_of(y, self.cell_height),
        }
    }

    /// Applies the wrap rule to a pixel position.
    #[must_use]
    pub fn wrap_pixel(self, x: i32, y: i32) -> (i32, i32) {
        let span_x = i32::from(self.cells_x) * i32::from(self.cell_width);
        let span_y = i32::from(self.cells_y) * i32::from(self.cell_height);

        (
            wrap_axis(x, span_x, self.wrap_mode),
            wrap_axis(y, span_y, self.wrap_mode),
        )
    }

    /// Applies the wrap rule to a cell position.
    #[must_use]
    pub fn wrap_cell(self, cell: Cell) -> Cell {
        Cell {
            x: wrap_axis(cell.x, i32::from(self.cells_x), self.wrap_mode),
            y: wrap_axis(cell.y, i32::from(self.cells_y), self.wrap_mode),
        }
    }

    /// Returns the cell one step from `cell` in `direction`, wrapped.
    #[must_use]
    pub fn advance(self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap_cell(Cell {
            x: cell.x + dx,
            y: cell.y + dy,
        })
    }

    /// Returns which cardinal edge the move `from -> to` crossed.
    ///
    /// Wrapped moves are recognised in both wrap modes. Returns `None` when
    /// the cells are equal or not adjacent.
    #[must_use]
    pub fn direction_between(self, from: Cell, to: Cell) -> Option<Direction> {
        let step_x = axis_step(to.x - from.x, i32::from(self.cells_x))?;
        let step_y = axis_step(to.y - from.y, i32::from(self.cells_y))?;

        match (step_x, step_y) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            _ => None,
        }
    }
}

/// Floor division of a pixel coordinate into a cell index.
#[must_use]
pub fn cell_index_of(position: i32, cell_size: u16) -> i32 {
    position.div_euclid(i32::from(cell_size.max(1)))
}

fn wrap_axis(value: i32, upper_bound: i32, mode: WrapMode) -> i32 {
    match mode {
        WrapMode::Toroidal => value.rem_euclid(upper_bound.max(1)),
        WrapMode::FarEdge if value >= upper_bound => 0,
        WrapMode::FarEdge if value < 0 => upper_bound,
        WrapMode::FarEdge => value,
    }
}

/// Normalises a one-axis delta to -1, 0 or 1, treating wrap jumps as unit moves.
fn axis_step(delta: i32, cells: i32) -> Option<i32> {
    match delta {
        0 => Some(0),
        1 => Some(1),
        -1 => Some(-1),
        // Right/bottom exit lands on 0 from `cells - 1` (or from `cells` under far-edge).
        d if d == -(cells - 1) || d == -cells => Some(1),
        d if d == cells - 1 || d == cells => Some(-1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, GridGeometry, WrapMode, cell_index_of};

    fn grid(mode: WrapMode) -> GridGeometry {
        GridGeometry::new(24, 24, 10, 10).with_wrap_mode(mode)
    }

    #[test]
    fn cell_index_floors_pixel_positions() {
        assert_eq!(cell_index_of(0, 10), 0);
        assert_eq!(cell_index_of(9, 10), 0);
        assert_eq!(cell_index_of(30, 10), 3);
        assert_eq!(cell_index_of(-1, 10), -1);
    }

    #[test]
    fn toroidal_wrap_lands_on_last_valid_cell() {
        let geometry = grid(WrapMode::Toroidal);

        assert_eq!(geometry.wrap_cell(Cell::new(-1, 5)), Cell::new(23, 5));
        assert_eq!(geometry.wrap_cell(Cell::new(24, 5)), Cell::new(0, 5));
        assert_eq!(geometry.wrap_cell(Cell::new(5, -1)), Cell::new(5, 23));
        assert_eq!(geometry.wrap_pixel(-10, 240), (230, 0));
    }

    #[test]
    fn far_edge_wrap_lands_one_past_the_grid() {
        let geometry = grid(WrapMode::FarEdge);

        assert_eq!(geometry.wrap_cell(Cell::new(-1, 5)), Cell::new(24, 5));
        assert_eq!(geometry.wrap_cell(Cell::new(24, 5)), Cell::new(0, 5));
        assert_eq!(geometry.wrap_pixel(-10, 240), (240, 0));

        let parked = geometry.advance(Cell::new(0, 0), Direction::Left);
        assert!(!geometry.contains(parked));
        assert_eq!(
            geometry.advance(parked, Direction::Left),
            Cell::new(23, 0)
        );
    }

    #[test]
    fn direction_between_handles_wrapped_edges() {
        let geometry = grid(WrapMode::Toroidal);

        assert_eq!(
            geometry.direction_between(Cell::new(23, 0), Cell::new(0, 0)),
            Some(Direction::Right)
        );
        assert_eq!(
            geometry.direction_between(Cell::new(0, 0), Cell::new(23, 0)),
            Some(Direction::Left)
        );
        assert_eq!(
            geometry.direction_between(Cell::new(4, 0), Cell::new(4, 23)),
            Some(Direction::Up)
        );
        assert_eq!(
            geometry.direction_between(Cell::new(4, 5), Cell::new(4, 6)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn direction_between_understands_far_edge_parking() {
        let geometry = grid(WrapMode::FarEdge);

        assert_eq!(
            geometry.direction_between(Cell::new(0, 3), Cell::new(24, 3)),
            Some(Direction::Left)
        );
        assert_eq!(
            geometry.direction_between(Cell::new(24, 3), Cell::new(0, 3)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn direction_between_rejects_non_adjacent_cells() {
        let geometry = grid(WrapMode::Toroidal);

        assert_eq!(
            geometry.direction_between(Cell::new(2, 2), Cell::new(2, 2)),
            None
        );
        assert_eq!(
            geometry.direction_between(Cell::new(2, 2), Cell::new(3, 3)),
            None
        );
        assert_eq!(
            geometry.direction_between(Cell::new(2, 2), Cell::new(5, 2)),
            None
        );
    }

    #[test]
    fn viewport_derives_whole_pixel_cells() {
        let geometry = GridGeometry::from_viewport(1000, 500, 24, 24);

        assert_eq!(geometry.cell_width, 41);
        assert_eq!(geometry.cell_height, 20);
        assert_eq!(geometry.to_pixel(Cell::new(2, 3)), (82, 60));
        assert_eq!(geometry.cell_at_pixel(82, 60), Cell::new(2, 3));
    }

    #[test]
    fn tiny_viewport_keeps_cells_at_least_one_pixel() {
        let geometry = GridGeometry::from_viewport(10, 10, 24, 24);

        assert_eq!((geometry.cell_width, geometry.cell_height), (1, 1));
    }
}
