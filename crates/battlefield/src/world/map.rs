use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CellCoord, Rect, CELL_SIZE_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map must be at least one cell wide and high, got {width}x{height}")]
    Empty { width: u32, height: u32 },
}

/// Map size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDimensions {
    pub width_cells: u32,
    pub height_cells: u32,
}

impl MapDimensions {
    pub fn new(width_cells: u32, height_cells: u32) -> Result<Self, MapError> {
        if width_cells == 0 || height_cells == 0 {
            return Err(MapError::Empty {
                width: width_cells,
                height: height_cells,
            });
        }
        Ok(Self {
            width_cells,
            height_cells,
        })
    }

    pub fn size_px(&self) -> (u32, u32) {
        (
            self.width_cells.saturating_mul(CELL_SIZE_PX as u32),
            self.height_cells.saturating_mul(CELL_SIZE_PX as u32),
        )
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width_cells
            && (cell.y as u32) < self.height_cells
    }

    /// Cells of `cells` that exist on this map.
    pub fn clip(&self, cells: Rect) -> Rect {
        let x = cells.x.max(0);
        let y = cells.y.max(0);
        let right = cells.right().min(self.width_cells as i32);
        let bottom = cells.bottom().min(self.height_cells as i32);
        Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }
}
