use std::fmt;

use serde::{Deserialize, Serialize};

use super::economy::{CreditLedger, PowerGrid};
use super::entity::{Entity, EntityId, EntityProvider};
use super::shroud::Shroud;
use crate::app::rendering::Rgba;
use crate::geometry::CellCoord;

pub const DEFAULT_STARTING_CREDITS: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Recolor tag applied to everything a player owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Grey,
}

impl FactionColor {
    pub fn rgba(self) -> Rgba {
        match self {
            FactionColor::Red => [214, 50, 48, 255],
            FactionColor::Green => [72, 170, 70, 255],
            FactionColor::Blue => [58, 110, 220, 255],
            FactionColor::Yellow => [232, 196, 64, 255],
            FactionColor::Purple => [150, 80, 190, 255],
            FactionColor::Grey => [150, 150, 150, 255],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    faction_color: FactionColor,
    shroud: Shroud,
    power: PowerGrid,
    ledger: CreditLedger,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, faction_color: FactionColor) -> Self {
        Self::with_starting_credits(id, name, faction_color, DEFAULT_STARTING_CREDITS)
    }

    pub fn with_starting_credits(
        id: PlayerId,
        name: impl Into<String>,
        faction_color: FactionColor,
        starting_credits: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            faction_color,
            shroud: Shroud::default(),
            power: PowerGrid::default(),
            ledger: CreditLedger::new(starting_credits),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faction_color(&self) -> FactionColor {
        self.faction_color
    }

    pub fn is_cpu(&self) -> bool {
        self.name.eq_ignore_ascii_case("CPU")
    }

    pub fn is_visible(&self, cell: CellCoord) -> bool {
        self.shroud.is_visible(cell)
    }

    pub fn reveal(&mut self, cell: CellCoord) {
        self.shroud.reveal(cell);
    }

    pub fn shroud(&mut self, cell: CellCoord) {
        self.shroud.shroud(cell);
    }

    pub fn add_entity(&mut self, entity: &Entity) {
        self.power.add(entity);
    }

    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        self.power.remove(id)
    }

    pub fn owns(&self, id: EntityId) -> bool {
        self.power.contains(id)
    }

    pub fn entity_count(&self) -> usize {
        self.power.owned_count()
    }

    pub fn alive_entity_count<P: EntityProvider + ?Sized>(&self, provider: &P) -> usize {
        self.power.alive_count(provider)
    }

    pub fn total_power_produced(&self) -> u64 {
        self.power.total_produced()
    }

    pub fn total_power_consumed(&self) -> u64 {
        self.power.total_consumed()
    }

    pub fn power_balance(&self) -> i64 {
        let produced = i64::try_from(self.total_power_produced()).unwrap_or(i64::MAX);
        let consumed = i64::try_from(self.total_power_consumed()).unwrap_or(i64::MAX);
        produced.saturating_sub(consumed)
    }

    pub fn credits(&self) -> i32 {
        self.ledger.credits()
    }

    pub fn credits_exact(&self) -> f32 {
        self.ledger.credits_exact()
    }

    pub fn animated_credits(&self) -> i32 {
        self.ledger.animated_credits()
    }

    pub fn add_credits(&mut self, amount: f32) {
        self.ledger.add(amount);
    }

    pub fn set_credits(&mut self, credits: i32) {
        self.ledger.set(credits);
    }

    pub fn can_buy(&self, cost: i32) -> bool {
        self.ledger.can_buy(cost)
    }

    pub fn spend(&mut self, amount: i32) -> bool {
        self.ledger.spend(amount)
    }

    pub fn tick(&mut self, delta_seconds: f32) {
        self.ledger.tick(delta_seconds);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player{{name='{}', faction={:?}}}", self.name, self.faction_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapPoint;
    use crate::world::{EntityData, EntityRepository};

    fn player() -> Player {
        Player::new(PlayerId(1), "ordos", FactionColor::Green)
    }

    #[test]
    fn starts_with_default_credits_and_full_shroud() {
        let player = player();
        assert_eq!(player.credits(), DEFAULT_STARTING_CREDITS);
        assert_eq!(player.animated_credits(), DEFAULT_STARTING_CREDITS);
        assert!(!player.is_visible(CellCoord::new(0, 0)));
        assert!(!player.is_visible(CellCoord::new(12, 40)));
    }

    #[test]
    fn spend_rejects_more_than_available() {
        let mut player = player();
        assert!(!player.spend(2500));
        assert_eq!(player.credits(), 2000);
        assert!(player.spend(500));
        assert_eq!(player.credits(), 1500);
    }

    #[test]
    fn animated_credits_match_after_one_tick() {
        let mut player = Player::with_starting_credits(PlayerId(1), "ordos", FactionColor::Green, 0);
        player.add_credits(1234.0);
        player.tick(1.0 / 60.0);
        assert_eq!(player.animated_credits(), 1234);
    }

    #[test]
    fn set_credits_updates_display_immediately() {
        let mut player = player();
        player.set_credits(1234);
        assert_eq!(player.credits(), 1234);
        assert_eq!(player.animated_credits(), 1234);
        assert!(player.can_buy(1234));
        assert!(!player.can_buy(1235));
    }

    #[test]
    fn shroud_round_trip_per_player() {
        let mut player = player();
        let other = Player::new(PlayerId(2), "cpu", FactionColor::Red);
        let cell = CellCoord::new(3, 4);

        player.reveal(cell);
        assert!(player.is_visible(cell));
        assert!(!other.is_visible(cell));

        player.shroud(cell);
        assert!(!player.is_visible(cell));
    }

    #[test]
    fn power_balance_tracks_structures() {
        let mut repo = EntityRepository::default();
        let mut player = player();
        let windtrap = repo.spawn_for(
            &mut player,
            EntityData::new("windtrap").with_power_production(100),
            MapPoint::new(0, 0),
        );
        repo.spawn_for(
            &mut player,
            EntityData::new("refinery").with_power_consumption(30),
            MapPoint::new(64, 0),
        );
        assert_eq!(player.power_balance(), 70);

        assert!(player.remove_entity(windtrap));
        assert!(!player.remove_entity(windtrap));
        assert_eq!(player.total_power_produced(), 0);
        assert_eq!(player.power_balance(), -30);
        assert!(!player.owns(windtrap));
    }

    #[test]
    fn power_balance_handles_maximal_ratings() {
        let mut repo = EntityRepository::default();
        let mut player = player();
        for x in [0, 64] {
            repo.spawn_for(
                &mut player,
                EntityData::new("fusion").with_power_production(u32::MAX),
                MapPoint::new(x, 0),
            );
        }
        repo.spawn_for(
            &mut player,
            EntityData::new("palace").with_power_consumption(u32::MAX),
            MapPoint::new(128, 0),
        );
        assert_eq!(player.total_power_produced(), 2 * u64::from(u32::MAX));
        assert_eq!(player.power_balance(), i64::from(u32::MAX));
    }

    #[test]
    fn cpu_detection_ignores_case() {
        assert!(Player::new(PlayerId(9), "cpu", FactionColor::Grey).is_cpu());
        assert!(!player().is_cpu());
    }
}
