mod economy;
mod entity;
mod map;
mod player;
mod shroud;

pub use economy::{CreditLedger, PowerGrid};
pub use entity::{
    Entity, EntityData, EntityId, EntityIdAllocator, EntityProvider, EntityRepository, Footprint,
};
pub use map::{MapDimensions, MapError};
pub use player::{FactionColor, Player, PlayerId, DEFAULT_STARTING_CREDITS};
pub use shroud::Shroud;
