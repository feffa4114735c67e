use serde::{Deserialize, Serialize};

use super::player::{FactionColor, Player, PlayerId};
use crate::geometry::{CellCoord, MapPoint, Rect, Vec2, CELL_SIZE_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Size of an entity in map cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const SINGLE_CELL: Footprint = Footprint {
        width: 1,
        height: 1,
    };

    /// Saturates at `i32::MAX` for footprints too large for pixel space.
    pub fn size_px(&self) -> (i32, i32) {
        (cells_to_px(self.width), cells_to_px(self.height))
    }

    pub fn half_dimensions_px(&self) -> Vec2 {
        let (width, height) = self.size_px();
        Vec2 {
            x: width as f32 * 0.5,
            y: height as f32 * 0.5,
        }
    }
}

fn cells_to_px(cells: u32) -> i32 {
    i32::try_from(cells)
        .unwrap_or(i32::MAX)
        .saturating_mul(CELL_SIZE_PX)
}

impl Default for Footprint {
    fn default() -> Self {
        Self::SINGLE_CELL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityData {
    pub name: String,
    #[serde(default)]
    pub footprint: Footprint,
    #[serde(default)]
    pub power_production: u32,
    #[serde(default)]
    pub power_consumption: u32,
}

impl EntityData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            footprint: Footprint::SINGLE_CELL,
            power_production: 0,
            power_consumption: 0,
        }
    }

    pub fn with_footprint(mut self, width: u32, height: u32) -> Self {
        self.footprint = Footprint { width, height };
        self
    }

    pub fn with_power_production(mut self, power: u32) -> Self {
        self.power_production = power;
        self
    }

    pub fn with_power_consumption(mut self, power: u32) -> Self {
        self.power_consumption = power;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub owner: PlayerId,
    pub faction: FactionColor,
    pub data: EntityData,
    pub position: MapPoint,
    pub destroyed: bool,
    pub selected: bool,
}

impl Entity {
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.data.footprint.size_px();
        Rect::new(self.position.x, self.position.y, width, height)
    }

    pub fn cell(&self) -> CellCoord {
        self.position.to_cell()
    }

    pub fn occupies_cell(&self, cell: CellCoord) -> bool {
        let origin = cell.top_left();
        self.bounds().contains(origin.x, origin.y)
    }

    pub fn belongs_to(&self, player: PlayerId) -> bool {
        self.owner == player
    }
}

/// Spatial and id lookups over the live entity collection.
pub trait EntityProvider {
    fn find_entities_within(&self, rect: Rect) -> Vec<&Entity>;
    fn entity(&self, id: EntityId) -> Option<&Entity>;
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Default)]
pub struct EntityRepository {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
}

impl EntityRepository {
    /// Spawns an entity for `owner` and registers it with the owner's membership views.
    pub fn spawn_for(&mut self, owner: &mut Player, data: EntityData, position: MapPoint) -> EntityId {
        let id = self.allocator.allocate();
        let entity = Entity {
            id,
            owner: owner.id(),
            faction: owner.faction_color(),
            data,
            position,
            destroyed: false,
            selected: false,
        };
        owner.add_entity(&entity);
        self.entities.push(entity);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn mark_destroyed(&mut self, id: EntityId) -> bool {
        match self.find_entity_mut(id) {
            Some(entity) if !entity.destroyed => {
                entity.destroyed = true;
                entity.selected = false;
                true
            }
            _ => false,
        }
    }

    /// Drops destroyed entities and hands them back so owners can be updated.
    pub fn remove_destroyed(&mut self) -> Vec<Entity> {
        let (destroyed, alive): (Vec<Entity>, Vec<Entity>) = self
            .entities
            .drain(..)
            .partition(|entity| entity.destroyed);
        self.entities = alive;
        destroyed
    }

    pub fn find_at_cell(&self, cell: CellCoord) -> Option<&Entity> {
        self.entities
            .iter()
            .rev()
            .find(|entity| !entity.destroyed && entity.occupies_cell(cell))
    }

    /// Selects the controlling player's entity under `cell`, if any.
    pub fn select_at_cell(&mut self, cell: CellCoord, player: PlayerId) -> Vec<EntityId> {
        let Some(id) = self
            .find_at_cell(cell)
            .filter(|entity| entity.belongs_to(player))
            .map(|entity| entity.id)
        else {
            return Vec::new();
        };
        if let Some(entity) = self.find_entity_mut(id) {
            entity.selected = true;
        }
        vec![id]
    }

    pub fn select_within(&mut self, rect: Rect, player: PlayerId) -> Vec<EntityId> {
        let mut selected = Vec::new();
        for entity in &mut self.entities {
            if entity.destroyed || !entity.belongs_to(player) {
                continue;
            }
            if entity.bounds().intersects(&rect) {
                entity.selected = true;
                selected.push(entity.id);
            }
        }
        selected
    }

    pub fn deselect_all(&mut self) -> Vec<EntityId> {
        let mut deselected = Vec::new();
        for entity in &mut self.entities {
            if entity.selected {
                entity.selected = false;
                deselected.push(entity.id);
            }
        }
        deselected
    }

    pub fn selected(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.selected)
    }

    pub fn resolve(&self, ids: &[EntityId]) -> Vec<&Entity> {
        ids.iter().filter_map(|id| self.entity(*id)).collect()
    }
}

impl EntityProvider for EntityRepository {
    fn find_entities_within(&self, rect: Rect) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|entity| entity.bounds().intersects(&rect))
            .collect()
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32) -> Player {
        Player::new(PlayerId(id), format!("player-{id}"), FactionColor::Red)
    }

    #[test]
    fn allocator_never_reuses_ids() {
        let mut allocator = EntityIdAllocator::default();
        assert_eq!(allocator.allocate(), EntityId(0));
        assert_eq!(allocator.allocate(), EntityId(1));
        assert_eq!(allocator.allocate(), EntityId(2));
    }

    #[test]
    fn spawn_registers_with_owner_and_copies_faction() {
        let mut repo = EntityRepository::default();
        let mut owner = Player::new(PlayerId(3), "atreides", FactionColor::Blue);
        let id = repo.spawn_for(
            &mut owner,
            EntityData::new("windtrap").with_power_production(100),
            MapPoint::new(64, 64),
        );

        let entity = repo.entity(id).expect("spawned");
        assert_eq!(entity.owner, PlayerId(3));
        assert_eq!(entity.faction, FactionColor::Blue);
        assert_eq!(owner.total_power_produced(), 100);
    }

    #[test]
    fn oversized_footprint_saturates_pixel_size() {
        let footprint = Footprint {
            width: u32::MAX,
            height: 3,
        };
        assert_eq!(footprint.size_px(), (i32::MAX, 3 * CELL_SIZE_PX));
        assert_eq!(Footprint::SINGLE_CELL.size_px(), (CELL_SIZE_PX, CELL_SIZE_PX));
    }

    #[test]
    fn find_within_uses_footprint_bounds() {
        let mut repo = EntityRepository::default();
        let mut owner = player(0);
        let structure = repo.spawn_for(
            &mut owner,
            EntityData::new("refinery").with_footprint(3, 2),
            MapPoint::new(0, 0),
        );
        repo.spawn_for(&mut owner, EntityData::new("trike"), MapPoint::new(320, 320));

        let found: Vec<EntityId> = repo
            .find_entities_within(Rect::new(80, 40, 10, 10))
            .iter()
            .map(|entity| entity.id)
            .collect();
        assert_eq!(found, vec![structure]);
    }

    #[test]
    fn select_at_cell_ignores_other_players() {
        let mut repo = EntityRepository::default();
        let mut mine = player(0);
        let mut theirs = player(1);
        let own = repo.spawn_for(&mut mine, EntityData::new("quad"), MapPoint::new(32, 32));
        repo.spawn_for(&mut theirs, EntityData::new("quad"), MapPoint::new(64, 32));

        assert_eq!(repo.select_at_cell(CellCoord::new(1, 1), PlayerId(0)), vec![own]);
        assert!(repo.select_at_cell(CellCoord::new(2, 1), PlayerId(0)).is_empty());
        assert_eq!(repo.selected().count(), 1);

        assert_eq!(repo.deselect_all(), vec![own]);
        assert_eq!(repo.selected().count(), 0);
    }

    #[test]
    fn select_within_skips_destroyed() {
        let mut repo = EntityRepository::default();
        let mut mine = player(0);
        let a = repo.spawn_for(&mut mine, EntityData::new("a"), MapPoint::new(0, 0));
        let b = repo.spawn_for(&mut mine, EntityData::new("b"), MapPoint::new(32, 0));
        assert!(repo.mark_destroyed(b));
        assert!(!repo.mark_destroyed(b));

        assert_eq!(repo.select_within(Rect::new(0, 0, 64, 32), PlayerId(0)), vec![a]);
    }

    #[test]
    fn remove_destroyed_returns_removed_entities() {
        let mut repo = EntityRepository::default();
        let mut mine = player(0);
        let a = repo.spawn_for(&mut mine, EntityData::new("a"), MapPoint::new(0, 0));
        let b = repo.spawn_for(&mut mine, EntityData::new("b"), MapPoint::new(32, 0));
        repo.mark_destroyed(a);

        let removed = repo.remove_destroyed();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, a);
        assert_eq!(repo.entity_count(), 1);
        assert!(repo.entity(b).is_some());
    }
}
