use std::collections::{BTreeMap, BTreeSet};

use super::entity::{Entity, EntityId, EntityProvider};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PowerRating {
    production: u32,
    consumption: u32,
}

/// Owned entities plus the producer and consumer indices derived from them.
///
/// Every mutation goes through `add`/`remove`, which update all three views
/// together, so the producer and consumer sets are always subsets of the owned
/// set holding exactly the members with a positive rating.
#[derive(Debug, Clone, Default)]
pub struct PowerGrid {
    owned: BTreeMap<EntityId, PowerRating>,
    producing: BTreeSet<EntityId>,
    consuming: BTreeSet<EntityId>,
}

impl PowerGrid {
    pub fn add(&mut self, entity: &Entity) {
        let rating = PowerRating {
            production: entity.data.power_production,
            consumption: entity.data.power_consumption,
        };
        // re-adding replaces the old rating
        self.producing.remove(&entity.id);
        self.consuming.remove(&entity.id);
        if rating.production > 0 {
            self.producing.insert(entity.id);
        }
        if rating.consumption > 0 {
            self.consuming.insert(entity.id);
        }
        self.owned.insert(entity.id, rating);
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        self.producing.remove(&id);
        self.consuming.remove(&id);
        self.owned.remove(&id).is_some()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.owned.contains_key(&id)
    }

    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    pub fn producing_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.producing.iter().copied()
    }

    pub fn consuming_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.consuming.iter().copied()
    }

    /// Widened to `u64` so any number of maximal ratings sums without overflow.
    pub fn total_produced(&self) -> u64 {
        self.producing
            .iter()
            .filter_map(|id| self.owned.get(id))
            .map(|rating| u64::from(rating.production))
            .fold(0, u64::saturating_add)
    }

    pub fn total_consumed(&self) -> u64 {
        self.consuming
            .iter()
            .filter_map(|id| self.owned.get(id))
            .map(|rating| u64::from(rating.consumption))
            .fold(0, u64::saturating_add)
    }

    /// Owned entities the provider still knows about and that are not destroyed.
    pub fn alive_count<P: EntityProvider + ?Sized>(&self, provider: &P) -> usize {
        self.owned
            .keys()
            .filter_map(|id| provider.entity(*id))
            .filter(|entity| !entity.destroyed)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreditLedger {
    credits: f32,
    animated_credits: i32,
}

impl CreditLedger {
    pub fn new(starting_credits: i32) -> Self {
        Self {
            credits: starting_credits as f32,
            animated_credits: starting_credits,
        }
    }

    pub fn credits(&self) -> i32 {
        self.credits as i32
    }

    pub fn credits_exact(&self) -> f32 {
        self.credits
    }

    pub fn animated_credits(&self) -> i32 {
        self.animated_credits
    }

    pub fn add(&mut self, amount: f32) {
        self.credits += amount;
    }

    pub fn set(&mut self, credits: i32) {
        self.credits = credits as f32;
        self.animated_credits = credits;
    }

    pub fn can_buy(&self, cost: i32) -> bool {
        cost as f32 <= self.credits
    }

    /// All or nothing: an unaffordable amount leaves the balance untouched.
    pub fn spend(&mut self, amount: i32) -> bool {
        if !self.can_buy(amount) {
            return false;
        }
        self.credits -= amount as f32;
        true
    }

    pub fn tick(&mut self, _delta_seconds: f32) {
        self.animated_credits = self.credits.floor() as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapPoint;
    use crate::world::{EntityData, EntityRepository, FactionColor, Player, PlayerId};

    fn entity(id: u64, production: u32, consumption: u32) -> Entity {
        Entity {
            id: EntityId(id),
            owner: PlayerId(0),
            faction: FactionColor::Red,
            data: EntityData::new("test")
                .with_power_production(production)
                .with_power_consumption(consumption),
            position: MapPoint::default(),
            destroyed: false,
            selected: false,
        }
    }

    fn assert_subsets_consistent(grid: &PowerGrid, live: &[Entity]) {
        let expected_produced: u64 = live
            .iter()
            .filter(|e| e.data.power_production > 0)
            .map(|e| u64::from(e.data.power_production))
            .sum();
        let expected_consumed: u64 = live
            .iter()
            .filter(|e| e.data.power_consumption > 0)
            .map(|e| u64::from(e.data.power_consumption))
            .sum();
        assert_eq!(grid.total_produced(), expected_produced);
        assert_eq!(grid.total_consumed(), expected_consumed);
        assert!(grid.producing_ids().all(|id| grid.contains(id)));
        assert!(grid.consuming_ids().all(|id| grid.contains(id)));
        assert_eq!(grid.owned_count(), live.len());
    }

    #[test]
    fn power_totals_follow_add_and_remove() {
        let mut grid = PowerGrid::default();
        let mut live = Vec::new();
        let script: [(bool, u64, u32, u32); 9] = [
            (true, 1, 100, 0),
            (true, 2, 0, 30),
            (true, 3, 0, 0),
            (true, 4, 20, 15),
            (false, 2, 0, 0),
            (true, 5, 0, 45),
            (false, 9, 0, 0),
            (false, 4, 0, 0),
            (true, 6, 60, 10),
        ];
        for (add, id, production, consumption) in script {
            if add {
                let e = entity(id, production, consumption);
                grid.add(&e);
                live.push(e);
            } else {
                let was_member = live.iter().any(|e| e.id == EntityId(id));
                assert_eq!(grid.remove(EntityId(id)), was_member);
                live.retain(|e| e.id != EntityId(id));
            }
            assert_subsets_consistent(&grid, &live);
        }
        assert_eq!(grid.total_produced(), 160);
        assert_eq!(grid.total_consumed(), 55);
    }

    #[test]
    fn maximal_ratings_sum_without_overflow() {
        let mut grid = PowerGrid::default();
        grid.add(&entity(1, u32::MAX, u32::MAX));
        grid.add(&entity(2, u32::MAX, 0));
        assert_eq!(grid.total_produced(), 2 * u64::from(u32::MAX));
        assert_eq!(grid.total_consumed(), u64::from(u32::MAX));
    }

    #[test]
    fn readding_replaces_rating() {
        let mut grid = PowerGrid::default();
        grid.add(&entity(1, 100, 0));
        grid.add(&entity(1, 0, 20));
        assert_eq!(grid.total_produced(), 0);
        assert_eq!(grid.total_consumed(), 20);
        assert_eq!(grid.owned_count(), 1);
    }

    #[test]
    fn alive_count_reflects_destroyed_flag_without_removal() {
        let mut repo = EntityRepository::default();
        let mut player = Player::new(PlayerId(0), "harkonnen", FactionColor::Red);
        let a = repo.spawn_for(&mut player, EntityData::new("a"), MapPoint::new(0, 0));
        repo.spawn_for(&mut player, EntityData::new("b"), MapPoint::new(32, 0));
        assert_eq!(player.alive_entity_count(&repo), 2);

        repo.mark_destroyed(a);
        assert_eq!(player.alive_entity_count(&repo), 1);
        assert_eq!(player.entity_count(), 2);
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut ledger = CreditLedger::new(2000);
        assert!(!ledger.spend(2500));
        assert_eq!(ledger.credits(), 2000);
        assert!(ledger.spend(500));
        assert_eq!(ledger.credits(), 1500);
        assert!(ledger.spend(1500));
        assert_eq!(ledger.credits(), 0);
        assert!(!ledger.spend(1));
    }

    #[test]
    fn animated_credits_catch_up_on_tick() {
        let mut ledger = CreditLedger::new(0);
        ledger.add(1234.0);
        assert_eq!(ledger.animated_credits(), 0);
        ledger.tick(0.016);
        assert_eq!(ledger.animated_credits(), 1234);

        ledger.add(0.75);
        ledger.tick(0.016);
        assert_eq!(ledger.animated_credits(), 1234);
        assert_eq!(ledger.credits(), 1234);
    }
}
