//! Scene enumeration and session progress state
//!
//! Everything the scenes share between ticks lives in [`SessionState`]; the
//! current [`Scene`] is owned by the driver in `tick.rs`.

use serde::{Deserialize, Serialize};

use crate::assets::{MusicId, SoundId};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Title screen, waiting for confirm
    Home,
    /// Story card shown for a fixed number of ticker fires
    Narrative,
    /// Catch presents dropped by patrolling penguins
    Chase,
    /// "Load the sleigh!" banner
    TransitionToDelivery,
    /// Carry the staged presents to the sleigh
    Delivery,
    /// Linear cutscene after the final lap
    Ending,
}

impl Scene {
    pub const ALL: [Scene; 6] = [
        Scene::Home,
        Scene::Narrative,
        Scene::Chase,
        Scene::TransitionToDelivery,
        Scene::Delivery,
        Scene::Ending,
    ];

    /// Every legal edge of the state machine
    pub fn can_transition_to(self, next: Scene) -> bool {
        matches!(
            (self, next),
            (Scene::Home, Scene::Narrative)
                | (Scene::Narrative, Scene::Chase)
                | (Scene::Chase, Scene::TransitionToDelivery)
                | (Scene::TransitionToDelivery, Scene::Delivery)
                | (Scene::Delivery, Scene::Chase)
                | (Scene::Delivery, Scene::Ending)
                | (Scene::Ending, Scene::Home)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::Home => "Home",
            Scene::Narrative => "Narrative",
            Scene::Chase => "Chase",
            Scene::TransitionToDelivery => "TransitionToDelivery",
            Scene::Delivery => "Delivery",
            Scene::Ending => "Ending",
        }
    }
}

/// Steps of the ending cutscene, keyed by ticker fires since it began
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EndingStage {
    NightFall,
    SantaWalks,
    Boarding,
    Liftoff,
    HoHoHo,
    Flyaway,
    TheEnd,
}

impl EndingStage {
    /// (first tick, stage), ascending
    pub const THRESHOLDS: [(u32, EndingStage); 7] = [
        (0, EndingStage::NightFall),
        (20, EndingStage::SantaWalks),
        (60, EndingStage::Boarding),
        (80, EndingStage::Liftoff),
        (140, EndingStage::HoHoHo),
        (160, EndingStage::Flyaway),
        (200, EndingStage::TheEnd),
    ];

    /// Stage in effect after `ticks` fires
    pub fn at(ticks: u32) -> EndingStage {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(start, _)| ticks >= *start)
            .map(|(_, stage)| *stage)
            .unwrap_or(EndingStage::NightFall)
    }

    /// Stage that begins exactly at `ticks`, if any
    pub fn starting_at(ticks: u32) -> Option<EndingStage> {
        Self::THRESHOLDS
            .iter()
            .find(|(start, _)| *start == ticks)
            .map(|(_, stage)| *stage)
    }
}

/// Difficulty for one chase/delivery lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapConfig {
    /// Presents to catch before the delivery banner
    pub required_pickups: i32,
    /// Presents stacked next to the sleigh
    pub staged_presents: usize,
}

impl LapConfig {
    const BASE_PICKUPS: i32 = 10;
    const PICKUP_STEP: i32 = 2;
    const MIN_PICKUPS: i32 = 4;
    const BASE_STAGED: usize = 5;
    const STAGED_STEP: usize = 2;

    pub fn for_lap(lap: u32) -> Self {
        let required = Self::BASE_PICKUPS - Self::PICKUP_STEP * lap as i32;
        let staged = Self::BASE_STAGED + Self::STAGED_STEP * lap as usize;
        Self {
            required_pickups: required.max(Self::MIN_PICKUPS),
            staged_presents: staged.min(POOL_CAPACITY - 1),
        }
    }
}

/// Fire-and-forget notifications for the host (audio, scene bookkeeping)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(SoundId),
    PlayMusic(MusicId),
    PauseMusic,
    ResumeMusic,
    SceneChanged { from: Scene, to: Scene },
}

/// Progress shared by all scenes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Pickups during the chase; banner countdown during Narrative and
    /// TransitionToDelivery
    pub score: i32,
    /// Ticker fires left before the next spawn
    pub present_countdown: i32,
    /// Value the countdown resets to; shrinks toward the floor
    pub max_present_countdown: i32,
    /// Completed chase/delivery laps
    pub lap: u32,
    /// Difficulty of the current lap
    pub lap_config: LapConfig,
    pub carrying: bool,
    pub jump_velocity: f32,
    pub jumping: bool,
    /// Player's grounded y
    pub floor_y: f32,
    /// Topmost staged present; `None` once the stack is used up
    pub stack_top: Option<usize>,
    /// Presents dropped into the sleigh this lap
    pub delivered: u32,
    /// Presents caught over the whole run
    pub total_pickups: u32,
    /// Ticker fires since the ending began
    pub ending_ticks: u32,
}

impl SessionState {
    pub fn new(floor_y: f32) -> Self {
        Self {
            score: 0,
            present_countdown: INITIAL_PRESENT_COUNTDOWN,
            max_present_countdown: INITIAL_PRESENT_COUNTDOWN,
            lap: 0,
            lap_config: LapConfig::for_lap(0),
            carrying: false,
            jump_velocity: 0.0,
            jumping: false,
            floor_y,
            stack_top: None,
            delivered: 0,
            total_pickups: 0,
            ending_ticks: 0,
        }
    }

    /// Fresh run: difficulty ramp and laps back to the start
    pub fn reset_run(&mut self) {
        *self = Self::new(self.floor_y);
    }

    /// Whether another lap follows the current delivery
    pub fn is_final_lap(&self) -> bool {
        self.lap + 1 >= LAPS_BEFORE_ENDING
    }
}
