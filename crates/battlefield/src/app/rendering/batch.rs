use crate::geometry::{Rect, CELL_SIZE_PX};
use crate::world::{EntityId, EntityProvider, FactionColor};

/// Back-to-front draw order: grid row, then column, then id for ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawOrderKey {
    pub row: i32,
    pub column: i32,
    pub id: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntry {
    pub entity: EntityId,
    pub faction: FactionColor,
    pub bounds: Rect,
    pub selected: bool,
    pub key: DrawOrderKey,
}

/// Entities to draw this frame, already in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBatch {
    entries: Vec<RenderEntry>,
}

impl RenderBatch {
    /// Collects everything intersecting `view` grown by one cell per side, so
    /// entities sliding in from the edges are already present.
    pub fn rebuild<P: EntityProvider + ?Sized>(view: Rect, provider: &P) -> Self {
        let query = view.grow(CELL_SIZE_PX);
        let mut entries: Vec<RenderEntry> = provider
            .find_entities_within(query)
            .into_iter()
            .filter(|entity| !entity.destroyed)
            .map(|entity| {
                let cell = entity.cell();
                RenderEntry {
                    entity: entity.id,
                    faction: entity.faction,
                    bounds: entity.bounds(),
                    selected: entity.selected,
                    key: DrawOrderKey {
                        row: cell.y,
                        column: cell.x,
                        id: entity.id,
                    },
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.key);
        Self { entries }
    }

    pub fn entries(&self) -> &[RenderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for RenderBatch {
    type Item = RenderEntry;
    type IntoIter = std::vec::IntoIter<RenderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
