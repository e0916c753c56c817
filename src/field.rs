use std::ops::RangeInclusive;

use rand::Rng;

use crate::config::GameConfig;

/// A grid cell, in cell units (not logical units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

/// The play field: a fixed logical canvas cut into square blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    width: i32,
    height: i32,
    block: i32,
}

impl Field {
    pub fn new(width: i32, height: i32, block: i32) -> Self {
        Field { width, height, block }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Field::new(config.width, config.height, config.block)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn block(&self) -> i32 {
        self.block
    }

    pub fn cols(&self) -> i32 {
        self.width / self.block
    }

    pub fn rows(&self) -> i32 {
        self.height / self.block
    }

    pub fn center(&self) -> Cell {
        self.cell_at(self.width / 2, self.height / 2)
    }

    /// Maps a logical coordinate to the cell containing it.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        Cell::new(x.div_euclid(self.block), y.div_euclid(self.block))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols() && cell.y >= 0 && cell.y < self.rows()
    }

    /// Where food may spawn. The top three rows sit under the score panel.
    pub fn food_region(&self) -> Region {
        Region::new(0..=self.cols() - 1, 3..=self.rows() - 1)
    }

    /// Where obstacles may spawn, inset from every edge.
    pub fn obstacle_region(&self) -> Region {
        Region::new(2..=self.cols() - 3, 4..=self.rows() - 3)
    }
}

/// A rectangular block of cells used for random placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    cols: RangeInclusive<i32>,
    rows: RangeInclusive<i32>,
}

impl Region {
    pub fn new(cols: RangeInclusive<i32>, rows: RangeInclusive<i32>) -> Self {
        Region { cols, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty() || self.rows.is_empty()
    }

    /// Draws a uniformly random cell. Returns `None` for an empty region.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if self.is_empty() {
            return None;
        }

        let x = rng.gen_range(self.cols.clone());
        let y = rng.gen_range(self.rows.clone());
        Some(Cell::new(x, y))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.clone().flat_map(move |y| self.cols.clone().map(move |x| Cell::new(x, y)))
    }
}
