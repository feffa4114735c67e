use std::collections::HashMap;

use crate::geometry::CellCoord;

/// Per-player fog of war. Stores "is shrouded" per visited cell; a cell that was
/// never stored is shrouded.
#[derive(Debug, Clone, Default)]
pub struct Shroud {
    shrouded: HashMap<CellCoord, bool>,
}

impl Shroud {
    pub fn is_visible(&self, cell: CellCoord) -> bool {
        !self.shrouded.get(&cell).copied().unwrap_or(true)
    }

    pub fn reveal(&mut self, cell: CellCoord) {
        self.shrouded.insert(cell, false);
    }

    pub fn shroud(&mut self, cell: CellCoord) {
        self.shrouded.insert(cell, true);
    }

    pub fn revealed_count(&self) -> usize {
        self.shrouded.values().filter(|shrouded| !**shrouded).count()
    }
}
