//! Entity simulation
//!
//! Kinematics and proximity checks used by the Chase and Delivery scenes.
//! Every proximity test is point-to-point Euclidean distance; sprites are
//! treated as points, not boxes.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::PresentPool;
use super::sprite::{AnimatedSprite, Transform};
use super::state::SessionState;
use super::tick::TickInput;
use crate::assets::Texture;
use crate::consts::*;
use crate::distance;

/// Frames of the player strip
const PLAYER_IDLE_FRAME: u32 = 0;
const PLAYER_LEFT_FRAME: u32 = 1;
const PLAYER_RIGHT_FRAME: u32 = 2;

/// The elf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub sprite: AnimatedSprite,
}

impl Player {
    pub fn new(texture: Texture) -> Self {
        let mut sprite = AnimatedSprite::new(texture, PLAYER_FRAMES);
        sprite.set_scale(PLAYER_SCALE);
        Self { sprite }
    }

    /// Grounded y for this sprite's height
    pub fn floor_y(&self) -> f32 {
        HEIGHT - self.sprite.transform.h - FLOOR_MARGIN
    }

    /// Stand on the floor at `x`
    pub fn place_on_floor(&mut self, x: f32) {
        self.sprite.transform.x = x;
        self.sprite.transform.y = self.floor_y();
    }

    pub fn center(&self) -> Vec2 {
        self.sprite.transform.center()
    }

    /// Instantaneous horizontal movement from held keys
    pub fn move_lateral(&mut self, input: &TickInput, dt: f32) {
        let mut direction = 0.0;
        if input.left {
            direction -= 1.0;
        }
        if input.right {
            direction += 1.0;
        }

        let transform = &mut self.sprite.transform;
        transform.x = (transform.x + direction * PLAYER_SPEED * dt).clamp(0.0, WIDTH - transform.w);

        let frame = if direction < 0.0 {
            PLAYER_LEFT_FRAME
        } else if direction > 0.0 {
            PLAYER_RIGHT_FRAME
        } else {
            PLAYER_IDLE_FRAME
        };
        self.sprite.set_frame(frame % self.sprite.total_frames());
    }
}

/// Jump tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPhysics {
    /// Upward speed at takeoff (pixels/s)
    pub initial_velocity: f32,
    /// Subtracted from the velocity every tick, regardless of dt
    pub gravity_decrement: f32,
}

impl Default for JumpPhysics {
    fn default() -> Self {
        Self {
            initial_velocity: JUMP_VELOCITY,
            gravity_decrement: JUMP_GRAVITY_DECREMENT,
        }
    }
}

impl JumpPhysics {
    /// Advance the jump by one tick; returns true on the landing tick
    pub fn step(
        &self,
        transform: &mut Transform,
        session: &mut SessionState,
        jump_held: bool,
        dt: f32,
    ) -> bool {
        if jump_held && !session.jumping {
            session.jump_velocity = self.initial_velocity;
            session.jumping = true;
        }
        if !session.jumping {
            return false;
        }

        transform.y -= session.jump_velocity * dt;
        session.jump_velocity -= self.gravity_decrement;

        if transform.y >= session.floor_y {
            transform.y = session.floor_y;
            session.jumping = false;
            session.jump_velocity = 0.0;
            return true;
        }
        false
    }
}

/// A present-stealing penguin walking back and forth along the top
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penguin {
    pub sprite: AnimatedSprite,
    /// Signed horizontal speed (pixels/s)
    pub velocity: f32,
}

impl Penguin {
    pub fn new(texture: Texture, x: f32, velocity: f32) -> Self {
        let mut sprite = AnimatedSprite::new(texture, PENGUIN_FRAMES);
        sprite.set_scale(PENGUIN_SCALE);
        sprite.transform.x = x;
        sprite.transform.y = PENGUIN_Y;
        Self { sprite, velocity }
    }

    /// The starting line-up: spread across the screen, alternating direction,
    /// each faster than the last
    pub fn lineup(texture: Texture) -> [Penguin; PENGUIN_COUNT] {
        std::array::from_fn(|i| {
            let frame_width = (texture.width / PENGUIN_FRAMES) as f32 * PENGUIN_SCALE;
            let x = (WIDTH - frame_width - 10.0) / PENGUIN_COUNT as f32 * i as f32 + 50.0;
            let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
            let mut penguin = Penguin::new(texture, x, direction * PENGUIN_BASE_SPEED * (i + 1) as f32);
            // Middle penguin starts facing the other way
            if i == 1 {
                penguin.sprite.advance_frame();
            }
            penguin
        })
    }

    pub fn pos(&self) -> Vec2 {
        self.sprite.transform.pos()
    }

    /// Move one tick; returns true if the penguin turned around
    ///
    /// Turning only happens while heading toward the boundary it is close to,
    /// so a penguin still inside the threshold after turning does not turn
    /// back again. Overshooting a boundary point also turns it.
    pub fn patrol(&mut self, dt: f32) -> bool {
        let pos = self.pos();
        let heading_left = self.velocity < 0.0;
        let heading_right = self.velocity > 0.0;

        let at_left = distance(pos, PATROL_LEFT) < BOUNCE_THRESHOLD || pos.x < PATROL_LEFT.x;
        let at_right = distance(PATROL_RIGHT, pos) < BOUNCE_THRESHOLD || pos.x > PATROL_RIGHT.x;

        let bounced = (at_left && heading_left) || (at_right && heading_right);
        if bounced {
            self.velocity = -self.velocity;
            self.sprite.advance_frame();
        }

        self.sprite.transform.x += self.velocity * dt;
        bounced
    }
}

/// Count down one ticker fire; returns true when a spawn is due
///
/// On expiry the countdown restarts from the ceiling, and the ceiling itself
/// shrinks by one down to `MIN_PRESENT_COUNTDOWN`.
pub fn advance_spawn_countdown(session: &mut SessionState) -> bool {
    session.present_countdown -= 1;
    if session.present_countdown >= 0 {
        return false;
    }
    session.present_countdown = session.max_present_countdown;
    if session.max_present_countdown > MIN_PRESENT_COUNTDOWN {
        session.max_present_countdown -= 1;
    }
    true
}

/// Drop a present from a random penguin; `None` when the pool is full
pub fn spawn_present<R: Rng>(
    pool: &mut PresentPool,
    penguins: &[Penguin],
    rng: &mut R,
) -> Option<usize> {
    if penguins.is_empty() {
        return None;
    }
    let dropper = rng.random_range(0..penguins.len());
    let slot = pool.activate_first(penguins[dropper].pos());
    match slot {
        Some(index) => log::debug!("Penguin {} dropped present into slot {}", dropper, index),
        None => log::warn!("Present pool full, skipping spawn"),
    }
    slot
}

/// Move falling presents down and retire those leaving the screen
pub fn fall_presents(pool: &mut PresentPool, dt: f32) {
    for index in 0..pool.capacity() {
        if !pool.slot(index).is_active() {
            continue;
        }
        pool.translate(index, Vec2::new(0.0, PRESENT_FALL_SPEED * dt));
        let y = pool.slot(index).pos().y;
        if !(0.0..=HEIGHT).contains(&y) {
            pool.deactivate(index);
        }
    }
}

/// Catch every active present within reach; returns how many were caught
pub fn collect_pickups(pool: &mut PresentPool, player_center: Vec2) -> u32 {
    let mut caught = 0;
    for index in 0..pool.capacity() {
        let slot = pool.slot(index);
        if slot.is_active() && distance(player_center, slot.pos()) < PICKUP_RADIUS {
            pool.deactivate(index);
            caught += 1;
        }
    }
    caught
}

/// Stack `count` presents next to the sleigh, slot 0 at the bottom
pub fn stage_presents(pool: &mut PresentPool, session: &mut SessionState, count: usize) {
    pool.reset(STAGED_PRESENT_SCALE);
    let count = count.min(pool.capacity());
    let size = pool.present_size();
    for index in 0..count {
        let y = HEIGHT - FLOOR_MARGIN - (index + 1) as f32 * size.y;
        pool.activate(index, Vec2::new(STACK_X, y));
    }
    session.stack_top = count.checked_sub(1);
    session.carrying = false;
    session.delivered = 0;
}

/// Lift the top staged present if the player is on it
pub fn try_carry(pool: &mut PresentPool, session: &mut SessionState, player_center: Vec2) -> bool {
    if session.carrying {
        return false;
    }
    let Some(top) = session.stack_top else {
        return false;
    };
    if distance(player_center, pool.slot(top).pos()) >= CARRY_RADIUS {
        return false;
    }
    pool.deactivate(top);
    session.stack_top = top.checked_sub(1);
    session.carrying = true;
    log::debug!("Picked up staged present {}", top);
    true
}

/// Drop the carried present into the sleigh if close enough
pub fn try_drop(session: &mut SessionState, player_center: Vec2) -> bool {
    if !session.carrying || distance(player_center, DROP_POINT) >= DROP_RADIUS {
        return false;
    }
    session.carrying = false;
    session.delivered += 1;
    log::debug!("Delivered present {}", session.delivered);
    true
}

/// The stack is used up and nothing is in hand
pub fn delivery_complete(session: &SessionState) -> bool {
    session.stack_top.is_none() && !session.carrying
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn texture(width: u32, height: u32) -> Texture {
        Texture {
            id: TextureId(1),
            width,
            height,
        }
    }

    fn player() -> Player {
        let mut player = Player::new(texture(48, 32));
        player.place_on_floor(400.0);
        player
    }

    fn session_for(player: &Player) -> SessionState {
        SessionState::new(player.floor_y())
    }

    fn pool() -> PresentPool {
        PresentPool::new(texture(16, 16), PRESENT_SCALE)
    }

    #[test]
    fn test_lateral_movement() {
        let mut player = player();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        player.move_lateral(&left, 0.5);
        assert_eq!(player.sprite.transform.x, 80.0);
        assert_eq!(player.sprite.frame(), PLAYER_LEFT_FRAME);

        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        player.move_lateral(&both, 0.5);
        assert_eq!(player.sprite.transform.x, 80.0);

        // Clamped at the screen edge
        player.move_lateral(&left, 1.0);
        assert_eq!(player.sprite.transform.x, 0.0);
    }

    #[test]
    fn test_jump_returns_to_floor() {
        let mut player = player();
        let mut session = session_for(&player);
        let jump = JumpPhysics::default();
        let floor = session.floor_y;

        assert!(!jump.step(&mut player.sprite.transform, &mut session, true, DT));
        assert!(session.jumping);
        assert!(player.sprite.transform.y < floor);

        let mut ticks = 0;
        while session.jumping {
            jump.step(&mut player.sprite.transform, &mut session, false, DT);
            ticks += 1;
            assert!(ticks < 1000, "jump never landed");
        }
        assert_eq!(player.sprite.transform.y, floor);
        assert_eq!(session.jump_velocity, 0.0);

        // Can jump again straight away
        jump.step(&mut player.sprite.transform, &mut session, true, DT);
        assert!(session.jumping);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut player = player();
        let mut session = session_for(&player);
        let jump = JumpPhysics::default();
        jump.step(&mut player.sprite.transform, &mut session, true, DT);
        let velocity = session.jump_velocity;
        jump.step(&mut player.sprite.transform, &mut session, true, DT);
        assert_eq!(session.jump_velocity, velocity - JUMP_GRAVITY_DECREMENT);
    }

    fn peak_height(initial_velocity: f32, dt: f32) -> f32 {
        let mut player = player();
        let mut session = session_for(&player);
        let jump = JumpPhysics {
            initial_velocity,
            gravity_decrement: JUMP_GRAVITY_DECREMENT,
        };
        let floor = session.floor_y;
        let mut highest = floor;
        jump.step(&mut player.sprite.transform, &mut session, true, dt);
        while session.jumping {
            highest = highest.min(player.sprite.transform.y);
            jump.step(&mut player.sprite.transform, &mut session, false, dt);
        }
        floor - highest
    }

    #[test]
    fn test_staged_top_reachable_by_jump() {
        let mut session = session_for(&player());
        let mut pool = PresentPool::new(texture(16, 16), PRESENT_SCALE);
        stage_presents(&mut pool, &mut session, 9);
        let top_y = pool.slot(8).pos().y;
        let grounded_center_y = player().center().y;
        let needed = grounded_center_y - top_y - CARRY_RADIUS;
        assert!(peak_height(JUMP_VELOCITY, DT) > needed);
    }

    proptest! {
        #[test]
        fn prop_jump_lands_and_rearms(dt in 0.005f32..0.05) {
            let mut player = player();
            let mut session = session_for(&player);
            let jump = JumpPhysics::default();
            jump.step(&mut player.sprite.transform, &mut session, true, dt);
            let mut ticks = 0;
            while session.jumping && ticks < 10_000 {
                jump.step(&mut player.sprite.transform, &mut session, false, dt);
                ticks += 1;
            }
            prop_assert!(!session.jumping);
            prop_assert_eq!(player.sprite.transform.y, session.floor_y);
            prop_assert_eq!(session.jump_velocity, 0.0);
        }

        #[test]
        fn prop_peak_grows_with_velocity(v in 200.0f32..1500.0, extra in 1.0f32..500.0) {
            let low = peak_height(v, DT);
            let high = peak_height(v + extra, DT);
            prop_assert!(high >= low);
            prop_assert_eq!(peak_height(v, DT), low);
        }

        #[test]
        fn prop_patrol_bounces_once_at_right(start in 300.0f32..900.0, speed in 60.0f32..360.0, dt in 0.005f32..0.05) {
            let mut penguin = Penguin::new(texture(32, 24), start, speed);
            let mut bounces = 0;
            let mut max_x = start;
            // Long enough to reach the right edge and head back, not to reach the left
            let ticks = ((PATROL_RIGHT.x - start) / (speed * dt)) as usize + 20;
            for _ in 0..ticks {
                if penguin.patrol(dt) {
                    bounces += 1;
                    prop_assert!(penguin.velocity < 0.0);
                }
                max_x = max_x.max(penguin.sprite.transform.x);
            }
            prop_assert_eq!(bounces, 1);
            prop_assert!(max_x <= PATROL_RIGHT.x + speed * dt);
        }
    }

    #[test]
    fn test_patrol_flips_frame_on_bounce() {
        let mut penguin = Penguin::new(texture(32, 24), PATROL_LEFT.x + 5.0, -120.0);
        assert_eq!(penguin.sprite.frame(), 0);
        assert!(penguin.patrol(DT));
        assert_eq!(penguin.velocity, 120.0);
        assert_eq!(penguin.sprite.frame(), 1);
        // Still inside the threshold but heading away: no second bounce
        assert!(!penguin.patrol(DT));
        assert_eq!(penguin.velocity, 120.0);
    }

    #[test]
    fn test_lineup() {
        let penguins = Penguin::lineup(texture(32, 24));
        assert_eq!(penguins[0].velocity, 120.0);
        assert_eq!(penguins[1].velocity, -240.0);
        assert_eq!(penguins[2].velocity, 360.0);
        assert_eq!(penguins[1].sprite.frame(), 1);
        assert_eq!(penguins[0].pos(), Vec2::new(50.0, PENGUIN_Y));
    }

    #[test]
    fn test_spawn_countdown_ramp() {
        let mut session = SessionState::new(700.0);
        let spawns = (0..31).filter(|_| advance_spawn_countdown(&mut session)).count();
        assert_eq!(spawns, 1);
        assert_eq!(session.max_present_countdown, 29);
        assert_eq!(session.present_countdown, 30);

        // Ceiling bottoms out
        session.max_present_countdown = MIN_PRESENT_COUNTDOWN;
        session.present_countdown = 0;
        assert!(advance_spawn_countdown(&mut session));
        assert_eq!(session.max_present_countdown, MIN_PRESENT_COUNTDOWN);
    }

    #[test]
    fn test_spawn_at_penguin_position() {
        let penguins = Penguin::lineup(texture(32, 24));
        let mut pool = pool();
        let mut rng = Pcg32::seed_from_u64(42);
        let index = spawn_present(&mut pool, &penguins, &mut rng).unwrap();
        assert_eq!(index, 0);
        let pos = pool.slot(0).pos();
        assert!(penguins.iter().any(|p| p.pos() == pos));
    }

    #[test]
    fn test_fall_and_retire() {
        let mut pool = pool();
        pool.activate(0, Vec2::new(100.0, 100.0));
        pool.activate(1, Vec2::new(100.0, HEIGHT - 1.0));
        fall_presents(&mut pool, 0.5);
        assert_eq!(pool.slot(0).pos(), Vec2::new(100.0, 160.0));
        assert!(!pool.slot(1).is_active());
    }

    #[test]
    fn test_pickup_in_and_out_of_radius() {
        let mut pool = pool();
        let center = Vec2::new(500.0, 500.0);
        pool.activate(0, center + Vec2::new(30.0, 30.0));
        pool.activate(1, center + Vec2::new(60.0, 0.0));
        assert_eq!(collect_pickups(&mut pool, center), 1);
        assert!(!pool.slot(0).is_active());
        assert!(pool.slot(1).is_active());
        assert_eq!(collect_pickups(&mut pool, center), 0);
    }

    #[test]
    fn test_carry_and_drop_cycle() {
        let mut pool = pool();
        let mut session = SessionState::new(700.0);
        stage_presents(&mut pool, &mut session, 2);
        assert_eq!(session.stack_top, Some(1));

        let top = pool.slot(1).pos();
        assert!(!try_drop(&mut session, DROP_POINT));
        assert!(!try_carry(&mut pool, &mut session, top + Vec2::new(CARRY_RADIUS, 0.0)));
        assert!(try_carry(&mut pool, &mut session, top));
        assert!(session.carrying);
        assert_eq!(session.stack_top, Some(0));
        // One at a time
        let bottom = pool.slot(0).pos();
        assert!(!try_carry(&mut pool, &mut session, bottom));

        assert!(try_drop(&mut session, DROP_POINT + Vec2::new(50.0, 50.0)));
        assert_eq!(session.delivered, 1);
        assert!(!delivery_complete(&session));

        assert!(try_carry(&mut pool, &mut session, bottom));
        assert_eq!(session.stack_top, None);
        assert!(!delivery_complete(&session));
        assert!(try_drop(&mut session, DROP_POINT));
        assert!(delivery_complete(&session));
    }
}
