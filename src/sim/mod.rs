//! Scene state machine and entity simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Time enters only as the per-tick `dt` and through the periodic ticker
//! - Seeded RNG only
//! - Draw calls and audio cues leave through traits and events

pub mod entities;
pub mod pool;
pub mod scenes;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod ticker;
pub mod world;

pub use entities::{JumpPhysics, Penguin, Player};
pub use pool::{PresentPool, PresentSlot, SlotStatus};
pub use scenes::SceneHandlers;
pub use sprite::{AnimatedSprite, Sprite, Transform};
pub use state::{EndingStage, GameEvent, LapConfig, Scene, SessionState};
pub use tick::{Game, InputEvent, Key, TickContext, TickInput};
pub use ticker::{Clock, ManualClock, PeriodicTicker, SystemClock};
pub use world::World;
