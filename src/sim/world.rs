//! Everything the scenes operate on
//!
//! The world owns the session progress, every actor, the RNG and the outgoing
//! event queue. Scene handlers receive it by reference; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{spawn_present, JumpPhysics, Penguin, Player};
use super::pool::PresentPool;
use super::sprite::{AnimatedSprite, Sprite};
use super::state::{GameEvent, SessionState};
use crate::assets::{Assets, MusicId, SoundId, Texture};
use crate::consts::*;

/// Full-screen backdrops
#[derive(Debug, Clone)]
pub struct Backgrounds {
    pub home: Sprite,
    pub night: Sprite,
    pub sky: Sprite,
}

/// Pre-rendered text labels
#[derive(Debug, Clone)]
pub struct Labels {
    pub welcome: Sprite,
    pub narrative: Sprite,
    pub score: Sprite,
    pub delivery: Sprite,
    pub the_end: Sprite,
}

/// Label centered horizontally at `y`, nudged right by `offset_x`
fn centered_label(texture: Texture, scale: f32, y: f32, offset_x: f32) -> Sprite {
    let mut label = Sprite::new(texture);
    label.set_scale(scale);
    label.transform.x = WIDTH / 2.0 - label.transform.w / 2.0 + offset_x;
    label.transform.y = y;
    label
}

pub struct World {
    pub session: SessionState,
    pub player: Player,
    pub penguins: [Penguin; PENGUIN_COUNT],
    pub presents: PresentPool,
    /// Texture for presents carried or loaded outside the pool
    pub present_texture: Texture,
    pub sleigh: AnimatedSprite,
    pub santa: AnimatedSprite,
    pub santa_visible: bool,
    pub backgrounds: Backgrounds,
    pub labels: Labels,
    pub jump: JumpPhysics,
    penguin_texture: Texture,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl World {
    pub fn new(assets: &Assets, seed: u64) -> Self {
        let mut player = Player::new(assets.player);
        player.place_on_floor((WIDTH - player.sprite.transform.w - 10.0) / 2.0);

        let mut sleigh = AnimatedSprite::new(assets.sleigh, SLEIGH_FRAMES);
        sleigh.set_scale(SLEIGH_SCALE);

        let mut santa = AnimatedSprite::new(assets.santa, SANTA_FRAMES);
        santa.set_scale(SANTA_SCALE);

        let background = |texture| Sprite::placed(texture, BACKGROUND_SCALE, Vec2::new(-200.0, 0.0));

        let mut world = Self {
            session: SessionState::new(player.floor_y()),
            player,
            penguins: Penguin::lineup(assets.penguin),
            presents: PresentPool::new(assets.present, PRESENT_SCALE),
            present_texture: assets.present,
            sleigh,
            santa,
            santa_visible: false,
            backgrounds: Backgrounds {
                home: background(assets.home_background),
                night: background(assets.night_background),
                sky: background(assets.sky_background),
            },
            labels: Labels {
                welcome: centered_label(assets.welcome_label, LABEL_SCALE, HEIGHT / 4.0 - 15.0, 110.0),
                narrative: centered_label(
                    assets.narrative_label,
                    NARRATIVE_LABEL_SCALE,
                    HEIGHT / 4.0 - 15.0,
                    35.0,
                ),
                score: Sprite::placed(assets.score_label, 1.0, Vec2::new(10.0, 150.0)),
                delivery: centered_label(assets.delivery_label, LABEL_SCALE, HEIGHT / 3.0, 0.0),
                the_end: centered_label(assets.the_end_label, LABEL_SCALE, HEIGHT / 3.0, 0.0),
            },
            jump: JumpPhysics::default(),
            penguin_texture: assets.penguin,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        world.park_sleigh();
        world
    }

    /// Drop a present from a random penguin
    pub fn spawn_present(&mut self) -> Option<usize> {
        spawn_present(&mut self.presents, &self.penguins, &mut self.rng)
    }

    /// Put the penguins back at their starting line-up
    pub fn reset_penguins(&mut self) {
        self.penguins = Penguin::lineup(self.penguin_texture);
    }

    /// Sleigh parked over the drop point, empty
    pub fn park_sleigh(&mut self) {
        let t = &mut self.sleigh.transform;
        t.x = DROP_POINT.x - t.w / 2.0;
        t.y = DROP_POINT.y - t.h / 2.0;
        self.sleigh.set_frame(0);
    }

    /// Player back on the floor, mid-screen, not jumping
    pub fn ground_player(&mut self) {
        let x = (WIDTH - self.player.sprite.transform.w - 10.0) / 2.0;
        self.player.place_on_floor(x);
        self.session.floor_y = self.player.floor_y();
        self.session.jumping = false;
        self.session.jump_velocity = 0.0;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play_sound(&mut self, sound: SoundId) {
        self.emit(GameEvent::PlaySound(sound));
    }

    pub fn play_music(&mut self, track: MusicId) {
        self.emit(GameEvent::PlayMusic(track));
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}
