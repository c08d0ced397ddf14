//! Scene state machine driver
//!
//! Each host tick: poll the periodic ticker once, run the current scene's
//! update, and perform any transition it requests. Rendering and input events
//! are routed to the current scene the same way.

use super::state::{GameEvent, Scene};
use super::ticker::{Clock, PeriodicTicker};
use super::world::World;
use crate::assets::Assets;
use crate::renderer::Renderer;
use crate::settings::Settings;

/// Held keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub confirm: bool,
}

/// Named keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Confirm,
}

/// Discrete input delivered by the event pump
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    PointerMotion { x: f32, y: f32 },
}

/// What a scene update sees of the current tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Wall-clock seconds since the previous tick
    pub dt: f32,
    /// The periodic ticker fired this tick (same answer for every reader)
    pub ready: bool,
    pub input: TickInput,
}

/// The running game: current scene, world and slow-logic ticker
pub struct Game {
    scene: Scene,
    world: World,
    ticker: PeriodicTicker,
    clock: Box<dyn Clock>,
    time_ticks: u64,
}

impl Game {
    /// Start on the title screen
    pub fn new(assets: &Assets, settings: &Settings, clock: Box<dyn Clock>) -> Self {
        let seed = settings.seed.unwrap_or_else(|| {
            log::warn!("No RNG seed configured, falling back to seed 0");
            0
        });
        let ticker = PeriodicTicker::new(settings.tick_period_ms, clock.now_ms());
        let mut game = Self {
            scene: Scene::Home,
            world: World::new(assets, seed),
            ticker,
            clock,
            time_ticks: 0,
        };
        (Scene::Home.handlers().enter)(&mut game.world);
        log::info!(
            "Game created (seed {}, ticker every {} ms), starting at {}",
            seed,
            game.ticker.period_ms(),
            game.scene.as_str()
        );
        game
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Ticks simulated so far
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Route a discrete input event to the current scene
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Some(next) = (self.scene.handlers().on_event)(&mut self.world, event) {
            self.transition(next);
        }
    }

    /// Advance the current scene by `dt` seconds
    ///
    /// Audio cues and scene changes queue up inside the world until
    /// [`Game::drain_events`] takes them; the host must drain once per frame.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.time_ticks += 1;
        let ctx = TickContext {
            dt,
            ready: self.ticker.is_ready(self.clock.now_ms()),
            input: *input,
        };
        if let Some(next) = (self.scene.handlers().update)(&mut self.world, &ctx) {
            self.transition(next);
        }
    }

    /// Draw the current scene
    pub fn render(&self, renderer: &mut dyn Renderer) {
        (self.scene.handlers().render)(&self.world, renderer);
    }

    /// Take the audio cues and scene changes emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }

    fn transition(&mut self, next: Scene) {
        debug_assert!(
            self.scene.can_transition_to(next),
            "illegal scene transition {:?} -> {:?}",
            self.scene,
            next
        );
        log::info!("Scene {} -> {}", self.scene.as_str(), next.as_str());
        self.world.emit(GameEvent::SceneChanged {
            from: self.scene,
            to: next,
        });
        self.scene = next;
        self.ticker.reset(self.clock.now_ms());
        (next.handlers().enter)(&mut self.world);
    }

    /// Jump straight into a scene (tests and debug hosts)
    pub fn force_scene(&mut self, scene: Scene) {
        log::debug!("Forcing scene {}", scene.as_str());
        self.scene = scene;
        self.ticker.reset(self.clock.now_ms());
        (scene.handlers().enter)(&mut self.world);
    }
}
