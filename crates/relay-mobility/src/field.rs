//! `DroneField` — the drone arena.

use std::fmt;

use relay_core::{DroneId, Point, SimRng};
use relay_spatial::NodeSnapshot;

use crate::{MobilityError, MobilityResult};

/// An integer grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Cell { x, y }
    }

    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Positions of every drone, indexed by `DroneId`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroneField {
    width:  u32,
    height: u32,
    cells:  Vec<Cell>,
}

impl DroneField {
    /// Scatter `count` drones uniformly over the grid.
    pub fn random(count: usize, width: u32, height: u32, rng: &mut SimRng) -> MobilityResult<Self> {
        check_shape(count, width, height)?;
        let cells = (0..count)
            .map(|_| Cell::new(rng.gen_range(0..width), rng.gen_range(0..height)))
            .collect();
        Ok(Self { width, height, cells })
    }

    /// Use explicit cells; drone `i` is `cells[i]`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> MobilityResult<Self> {
        check_shape(cells.len(), width, height)?;
        if let Some((i, c)) = cells.iter().enumerate().find(|(_, c)| c.x >= width || c.y >= height) {
            return Err(MobilityError::OutOfBounds {
                drone: DroneId(i as u32),
                x:     c.x,
                y:     c.y,
                width,
                height,
            });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The drone every route starts from.
    pub fn start(&self) -> DroneId {
        DroneId(0)
    }

    /// The drone every route ends at.
    pub fn end(&self) -> DroneId {
        DroneId(self.cells.len() as u32 - 1)
    }

    pub fn cell(&self, drone: DroneId) -> Option<Cell> {
        self.cells.get(drone.index()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DroneId, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (DroneId(i as u32), c))
    }

    /// Move `drone` to `cell`, clamped to the grid.
    pub fn set_cell(&mut self, drone: DroneId, cell: Cell) {
        let clamped = self.clamp(cell.x as i64, cell.y as i64);
        if let Some(slot) = self.cells.get_mut(drone.index()) {
            *slot = clamped;
        }
    }

    /// Clamp signed coordinates onto the grid.
    pub fn clamp(&self, x: i64, y: i64) -> Cell {
        Cell::new(
            x.clamp(0, self.width as i64 - 1) as u32,
            y.clamp(0, self.height as i64 - 1) as u32,
        )
    }

    /// Immutable per-tick view of all drone positions.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::new(self.iter().map(|(id, c)| (id, c.to_point())))
    }
}

fn check_shape(count: usize, width: u32, height: u32) -> MobilityResult<()> {
    if width == 0 || height == 0 {
        return Err(MobilityError::EmptyGrid { width, height });
    }
    if count < 2 {
        return Err(MobilityError::TooFewDrones(count));
    }
    Ok(())
}
