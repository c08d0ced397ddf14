//! Disaster Before Christmas - a short scene-driven arcade game
//!
//! Core modules:
//! - `sim`: Scene state machine and entity simulation (the only stateful part)
//! - `renderer`: Render contract (draw a texture region into a rectangle)
//! - `audio`: Audio contract and volume mixing
//! - `assets`: Texture/sound handles and the asset manifest
//! - `settings`: Runtime preferences

pub mod assets;
pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetManifest, Assets, MusicId, SoundId, Texture, TextureId};
pub use error::StartupError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Screen dimensions
    pub const WIDTH: f32 = 1280.0;
    pub const HEIGHT: f32 = 640.0 * 1.4;

    /// Slow-logic interval (spawn countdown, banners, ending stages)
    pub const TICK_PERIOD_MS: u64 = 50;

    /// Player defaults
    pub const PLAYER_FRAMES: u32 = 3;
    pub const PLAYER_SCALE: f32 = 4.0;
    /// Horizontal speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 640.0;
    /// Initial upward jump velocity (pixels/s)
    pub const JUMP_VELOCITY: f32 = 1000.0;
    /// Subtracted from the jump velocity once per tick (not dt-scaled)
    pub const JUMP_GRAVITY_DECREMENT: f32 = 30.0;
    /// Gap between the player's feet and the bottom of the screen
    pub const FLOOR_MARGIN: f32 = 10.0;

    /// Penguin patrol
    pub const PENGUIN_COUNT: usize = 3;
    pub const PENGUIN_FRAMES: u32 = 2;
    pub const PENGUIN_SCALE: f32 = 3.0;
    pub const PENGUIN_Y: f32 = 30.0;
    pub const PENGUIN_BASE_SPEED: f32 = 120.0;
    pub const PATROL_LEFT: Vec2 = Vec2::new(10.0, 10.0);
    pub const PATROL_RIGHT: Vec2 = Vec2::new(WIDTH - 100.0, 10.0);
    pub const BOUNCE_THRESHOLD: f32 = 30.0;

    /// Presents
    pub const POOL_CAPACITY: usize = 10;
    pub const PRESENT_SCALE: f32 = 3.0;
    /// Smaller presents when stacked next to the sleigh
    pub const STAGED_PRESENT_SCALE: f32 = 2.0;
    /// Fall speed (pixels/s)
    pub const PRESENT_FALL_SPEED: f32 = 120.0;
    pub const PICKUP_RADIUS: f32 = 50.0;
    pub const INITIAL_PRESENT_COUNTDOWN: i32 = 30;
    pub const MIN_PRESENT_COUNTDOWN: i32 = 10;

    /// Delivery
    pub const STACK_X: f32 = 150.0;
    pub const CARRY_RADIUS: f32 = 60.0;
    pub const DROP_RADIUS: f32 = 120.0;
    pub const DROP_POINT: Vec2 = Vec2::new(WIDTH - 220.0, HEIGHT - 140.0);
    pub const SLEIGH_FRAMES: u32 = 4;
    pub const SLEIGH_SCALE: f32 = 3.0;

    /// Banner lengths, in ticker fires
    pub const NARRATIVE_TICKS: i32 = 200;
    pub const BANNER_TICKS: i32 = 60;

    /// Completed chase/delivery laps before the ending plays
    pub const LAPS_BEFORE_ENDING: u32 = 3;

    /// Ending actors
    pub const SANTA_FRAMES: u32 = 2;
    pub const SANTA_SCALE: f32 = 4.0;
    pub const SANTA_WALK_SPEED: f32 = 180.0;
    pub const SLEIGH_FLY_VELOCITY: Vec2 = Vec2::new(260.0, -160.0);

    /// Background scale (backgrounds are authored at low resolution)
    pub const BACKGROUND_SCALE: f32 = 2.9;
    pub const LABEL_SCALE: f32 = 3.0;
    pub const NARRATIVE_LABEL_SCALE: f32 = 2.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(3.0, 4.0), Vec2::new(0.0, 0.0)), 5.0);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }
}
