//! Battlefield viewport and interaction core for a tile-based real-time strategy game.
//!
//! The [`BattleField`] widget owns the camera and the active mouse mode. It reads
//! entities through [`EntityProvider`] each frame and draws onto any [`DrawSurface`].

pub mod app;
pub mod config;
pub mod geometry;
pub mod world;

pub use app::{BattleField, BattlefieldEvent, DrawSurface, GuiComposite, SurfaceError};
pub use config::{BattlefieldConfig, ConfigError};
pub use world::{EntityProvider, EntityRepository, MapDimensions, Player, PlayerId};
