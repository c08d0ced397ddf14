//! Per-scene handlers
//!
//! Every scene has exactly one enter, update, render and event handler.
//! [`Scene::handlers`] is an exhaustive match, so adding a scene without
//! handlers does not compile. Update and event handlers return the next scene
//! when their exit condition holds; the driver performs the transition.

use super::entities::{
    advance_spawn_countdown, collect_pickups, delivery_complete, fall_presents, stage_presents,
    try_carry, try_drop,
};
use super::sprite::Sprite;
use super::state::{EndingStage, GameEvent, LapConfig, Scene};
use super::tick::{InputEvent, Key, TickContext};
use super::world::World;
use crate::assets::{MusicId, SoundId};
use crate::consts::*;
use crate::renderer::Renderer;

/// The four behaviours of one scene
#[derive(Clone, Copy)]
pub struct SceneHandlers {
    /// Runs once on the transition edge into the scene
    pub enter: fn(&mut World),
    /// Runs every tick while current
    pub update: fn(&mut World, &TickContext) -> Option<Scene>,
    /// Runs every frame while current
    pub render: fn(&World, &mut dyn Renderer),
    /// Discrete input events while current
    pub on_event: fn(&mut World, &InputEvent) -> Option<Scene>,
}

impl Scene {
    pub fn handlers(self) -> SceneHandlers {
        match self {
            Scene::Home => SceneHandlers {
                enter: home::enter,
                update: stay,
                render: home::render,
                on_event: home::on_event,
            },
            Scene::Narrative => SceneHandlers {
                enter: narrative::enter,
                update: narrative::update,
                render: narrative::render,
                on_event: ignore_event,
            },
            Scene::Chase => SceneHandlers {
                enter: chase::enter,
                update: chase::update,
                render: chase::render,
                on_event: ignore_event,
            },
            Scene::TransitionToDelivery => SceneHandlers {
                enter: banner::enter,
                update: banner::update,
                render: banner::render,
                on_event: ignore_event,
            },
            Scene::Delivery => SceneHandlers {
                enter: delivery::enter,
                update: delivery::update,
                render: delivery::render,
                on_event: ignore_event,
            },
            Scene::Ending => SceneHandlers {
                enter: ending::enter,
                update: ending::update,
                render: ending::render,
                on_event: ending::on_event,
            },
        }
    }
}

fn stay(_world: &mut World, _ctx: &TickContext) -> Option<Scene> {
    None
}

fn ignore_event(_world: &mut World, _event: &InputEvent) -> Option<Scene> {
    None
}

/// Count a banner down once per ticker fire; true when it runs out
fn count_down_banner(world: &mut World, ctx: &TickContext) -> bool {
    if !ctx.ready {
        return false;
    }
    world.session.score -= 1;
    if world.session.score <= 0 {
        world.session.score = 0;
        return true;
    }
    false
}

/// Player movement shared by Chase and Delivery
fn move_player(world: &mut World, ctx: &TickContext) {
    world.player.move_lateral(&ctx.input, ctx.dt);
    let jump = world.jump;
    jump.step(
        &mut world.player.sprite.transform,
        &mut world.session,
        ctx.input.jump,
        ctx.dt,
    );
}

mod home {
    use super::*;

    pub fn enter(world: &mut World) {
        world.presents.reset(PRESENT_SCALE);
        world.santa_visible = false;
    }

    pub fn render(world: &World, renderer: &mut dyn Renderer) {
        world.backgrounds.home.render(renderer);
        world.labels.welcome.render(renderer);
    }

    pub fn on_event(_world: &mut World, event: &InputEvent) -> Option<Scene> {
        match event {
            InputEvent::KeyDown(Key::Confirm) => Some(Scene::Narrative),
            _ => None,
        }
    }
}

mod narrative {
    use super::*;

    pub fn enter(world: &mut World) {
        world.session.reset_run();
        world.session.score = NARRATIVE_TICKS;
        world.play_sound(SoundId::Start);
    }

    pub fn update(world: &mut World, ctx: &TickContext) -> Option<Scene> {
        count_down_banner(world, ctx).then_some(Scene::Chase)
    }

    pub fn render(world: &World, renderer: &mut dyn Renderer) {
        world.labels.narrative.render(renderer);
    }
}

mod chase {
    use super::*;

    pub fn enter(world: &mut World) {
        world.session.score = 0;
        world.session.lap_config = LapConfig::for_lap(world.session.lap);
        world.ground_player();
        world.reset_penguins();
        world.presents.reset(PRESENT_SCALE);
        log::info!(
            "Lap {}: catch {} presents",
            world.session.lap + 1,
            world.session.lap_config.required_pickups
        );
    }

    pub fn update(world: &mut World, ctx: &TickContext) -> Option<Scene> {
        move_player(world, ctx);

        for penguin in &mut world.penguins {
            penguin.patrol(ctx.dt);
        }

        if ctx.ready && advance_spawn_countdown(&mut world.session) {
            world.spawn_present();
        }

        fall_presents(&mut world.presents, ctx.dt);

        let caught = collect_pickups(&mut world.presents, world.player.center());
        for _ in 0..caught {
            world.session.score += 1;
            world.session.total_pickups += 1;
            world.play_sound(SoundId::Pickup);
        }
        if caught > 0 {
            log::debug!("Caught {} present(s), score {}", caught, world.session.score);
        }

        (world.session.score >= world.session.lap_config.required_pickups)
            .then_some(Scene::TransitionToDelivery)
    }

    pub fn render(world: &World, renderer: &mut dyn Renderer) {
        world.player.sprite.render(renderer);
        for penguin in &world.penguins {
            penguin.sprite.render(renderer);
        }
        world.presents.render(renderer);
        world.labels.score.render(renderer);
        let score = &world.labels.score.transform;
        renderer.draw_text(
            &format!(
                "{}/{}",
                world.session.score, world.session.lap_config.required_pickups
            ),
            score.x + score.w + 8.0,
            score.y,
        );
    }
}

mod banner {
    use super::*;

    pub fn enter(world: &mut World) {
        world.session.score = BANNER_TICKS;
        world.play_sound(SoundId::Fanfare);
    }

    pub fn update(world: &mut World, ctx: &TickContext) -> Option<Scene> {
        count_down_banner(world, ctx).then_some(Scene::Delivery)
    }

    pub fn render(world: &World, renderer: &mut dyn Renderer) {
        world.backgrounds.night.render(renderer);
        world.sleigh.render(renderer);
        world.labels.delivery.render(renderer);
    }
}

mod delivery {
    use super::*;

    pub fn enter(world: &mut World) {
        world.session.score = 0;
        world.ground_player();
        world.park_sleigh();
        let count = world.session.lap_config.staged_presents;
        stage_presents(&mut world.presents, &mut world.session, count);
        log::info!("Lap {}: deliver {} presents", world.session.lap + 1, count);
    }

    pub fn update(world: &mut World, ctx: &TickContext) -> Option<Scene> {
        move_player(world, ctx);

        let center = world.player.center();
        try_carry(&mut world.presents, &mut world.session, center);
        if try_drop(&mut world.session, center) {
            world.play_sound(SoundId::Delivered);
            let frame = world.session.delivered.min(world.sleigh.total_frames() - 1);
            world.sleigh.set_frame(frame);
        }

        if !delivery_complete(&world.session) {
            return None;
        }

        let final_lap = world.session.is_final_lap();
        world.session.lap += 1;
        if final_lap {
            log::info!("All {} laps delivered", world.session.lap);
            Some(Scene::Ending)
        } else {
            Some(Scene::Chase)
        }
    }

    pub fn render(world: &World, renderer: &mut dyn Renderer) {
        world.backgrounds.night.render(renderer);
        world.sleigh.render(renderer);
        world.player.sprite.render(renderer);
        world.presents.render(renderer);
        if world.session.carrying {
            let player = &world.player.sprite.transform;
            let mut carried = Sprite::new(world.present_texture);
            carried.set_scale(STAGED_PRESENT_SCALE);
            carried.transform.x = player.x + (player.w - carried.transform.w) / 2.0;
            carried.transform.y = player.y - carried.transform.h;
            carried.render(renderer);
        }
        renderer.draw_text(
            &format!(
                "{}/{}",
                world.session.delivered, world.session.lap_config.staged_presents
            ),
            10.0,
            150.0,
        );
    }
}

mod ending {
    use super::*;

    pub fn enter(world: &mut World) {
        world.session.ending_ticks = 0;
        world.presents.reset(PRESENT_SCALE);
        world.park_sleigh();
        let santa = &mut world.santa.transform;
        santa.x = -santa.w;
        santa.y = HEIGHT - santa.h - FLOOR_MARGIN;
        world.santa_visible = false;
        world.play_sound(SoundId::SleighBells);
    }

    /// One-shot effects on the edge into a stage
    fn begin_stage(world: &mut World, stage: EndingStage) {
        log::debug!("Ending stage {:?}", stage);
        match stage {
            EndingStage::NightFall => {}
            EndingStage::SantaWalks => world.santa_visible = true,
            EndingStage::Boarding => {
                world.santa_visible = false;
                world.play_music(MusicId::Jingle);
            }
            EndingStage::Liftoff => {}
            EndingStage::HoHoHo => {
                world.emit(GameEvent::PauseMusic);
                world.play_sound(SoundId::HoHoHo);
            }
            EndingStage::Flyaway => world.emit(GameEvent::ResumeMusic),
            EndingStage::TheEnd => {
                log::info!("The End ({} presents caught)", world.session.total_pickups)
            }
        }
    }

    pub fn update(world: &mut World, ctx: &TickContext) -> Option<Scene> {
        if ctx.ready {
            world.session.ending_ticks += 1;
            if let Some(stage) = EndingStage::starting_at(world.session.ending_ticks) {
                begin_stage(world, stage);
            }
        }

        match EndingStage::at(world.session.ending_ticks) {
            EndingStage::SantaWalks => {
                let stop = world.sleigh.transform.x;
                let santa = &mut world.santa.transform;
                santa.x = (santa.x + SANTA_WALK_SPEED * ctx.dt).min(stop);
                if ctx.ready {
                    world.santa.advance_frame();
                }
            }
            EndingStage::Liftoff | EndingStage::HoHoHo | EndingStage::Flyaway => {
                let pos = world.sleigh.transform.pos() + SLEIGH_FLY_VELOCITY * ctx.dt;
                world.sleigh.transform.set_pos(pos);
            }
            EndingStage::NightFall | EndingStage::Boarding | EndingStage::TheEnd => {}
        }
        None
    }

    pub fn render(world: &World, renderer: &mut dyn Renderer) {
        let stage = EndingStage::at(world.session.ending_ticks);
        if stage < EndingStage::Liftoff {
            world.backgrounds.night.render(renderer);
        } else {
            world.backgrounds.sky.render(renderer);
        }
        world.sleigh.render(renderer);
        if world.santa_visible {
            world.santa.render(renderer);
        }
        if stage == EndingStage::TheEnd {
            world.labels.the_end.render(renderer);
            let label = &world.labels.the_end.transform;
            renderer.draw_text(
                &format!("{} presents saved", world.session.total_pickups),
                label.x,
                label.y + label.h + 20.0,
            );
        }
    }

    pub fn on_event(world: &mut World, event: &InputEvent) -> Option<Scene> {
        let finished = EndingStage::at(world.session.ending_ticks) == EndingStage::TheEnd;
        match event {
            InputEvent::KeyDown(Key::Confirm) if finished => {
                world.emit(GameEvent::PauseMusic);
                Some(Scene::Home)
            }
            _ => None,
        }
    }
}
