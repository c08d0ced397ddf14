//! Disaster Before Christmas entry point
//!
//! Headless native host: loads settings and assets, then drives the game with
//! a simple autopilot, recording draw calls and logging audio cues.
//!
//! Usage: `disaster-before-christmas [settings.json] [--assets manifest.json] [--realtime]`

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use disaster_before_christmas::audio::{AudioManager, LogAudio};
use disaster_before_christmas::consts::*;
use disaster_before_christmas::renderer::DrawList;
use disaster_before_christmas::sim::{
    Clock, EndingStage, Game, InputEvent, Key, ManualClock, Scene, SystemClock, TickInput,
};
use disaster_before_christmas::{AssetManifest, Assets, Settings, StartupError};

/// Host frame rate
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after ten minutes of game time
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "disaster-before-christmas")]
#[command(about = "Play Disaster Before Christmas headless with an autopilot")]
struct Args {
    /// Settings JSON (defaults are used when absent)
    settings: Option<PathBuf>,

    /// Asset manifest JSON (the bundled manifest when omitted)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Pace frames against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,
}

/// Pick inputs for this frame from what is on screen
fn autopilot(game: &Game) -> (TickInput, Option<InputEvent>) {
    let world = game.world();
    let center = world.player.center();
    let steer = |target_x: f32| TickInput {
        left: center.x > target_x + 8.0,
        right: center.x < target_x - 8.0,
        ..Default::default()
    };

    match game.scene() {
        Scene::Home => (TickInput::default(), Some(InputEvent::KeyDown(Key::Confirm))),
        Scene::Narrative | Scene::TransitionToDelivery => (TickInput::default(), None),
        Scene::Chase => {
            // Chase whichever present will land first
            let lowest = world
                .presents
                .slots()
                .iter()
                .filter(|slot| slot.is_active())
                .map(|slot| slot.pos())
                .max_by(|a, b| a.y.total_cmp(&b.y));
            match lowest {
                Some(pos) => (steer(pos.x), None),
                None => (TickInput::default(), None),
            }
        }
        Scene::Delivery => {
            let session = &world.session;
            if session.carrying {
                return (steer(DROP_POINT.x), None);
            }
            let Some(top) = session.stack_top else {
                return (TickInput::default(), None);
            };
            let pos = world.presents.slot(top).pos();
            let mut input = steer(pos.x);
            let aligned = !input.left && !input.right;
            input.jump = aligned && center.y - pos.y > CARRY_RADIUS;
            (input, None)
        }
        Scene::Ending => {
            let done = EndingStage::at(world.session.ending_ticks) == EndingStage::TheEnd;
            let event = done.then_some(InputEvent::KeyDown(Key::Confirm));
            (TickInput::default(), event)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), StartupError> {
    env_logger::init();
    log::info!("Disaster Before Christmas (headless) starting...");

    let args = Args::parse();
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seed = *settings.seed.get_or_insert_with(rand::random);

    let manifest = match &args.assets {
        Some(path) => AssetManifest::load(path)?,
        None => AssetManifest::bundled()?,
    };
    let assets = Assets::from_manifest(&manifest)?;

    let manual = ManualClock::new();
    let clock: Box<dyn Clock> = if args.realtime {
        Box::new(SystemClock::new())
    } else {
        Box::new(manual.clone())
    };

    let mut game = Game::new(&assets, &settings, clock);
    let mut audio = AudioManager::new(LogAudio, &settings);
    let mut draw_list = DrawList::new();
    let mut reached_ending = false;

    for frame in 1..=MAX_FRAMES {
        if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
        } else {
            manual.set(frame * 1000 / 60);
        }

        let (input, event) = autopilot(&game);
        if let Some(event) = event {
            game.handle_event(&event);
        }
        game.tick(&input, FRAME_DT);

        draw_list.clear();
        game.render(&mut draw_list);

        for event in game.drain_events() {
            audio.handle(&event);
        }

        match game.scene() {
            Scene::Ending => reached_ending = true,
            Scene::Home if reached_ending => {
                log::info!("Run finished after {} ticks", game.time_ticks());
                break;
            }
            _ => {}
        }
    }

    if !reached_ending {
        log::warn!("Autopilot gave up after {} frames in {}", MAX_FRAMES, game.scene().as_str());
    }

    log::info!("Last frame issued {} draw commands", draw_list.len());
    log::info!(
        "Final session (seed {}): {}",
        seed,
        serde_json::to_string(&game.world().session)?
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is usable from one
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["disaster-before-christmas"]).unwrap();
        assert!(args.settings.is_none());
        assert!(args.assets.is_none());
        assert!(!args.realtime);
    }

    #[test]
    fn test_args_all_given() {
        let args = Args::try_parse_from([
            "disaster-before-christmas",
            "prefs.json",
            "--assets",
            "manifest.json",
            "--realtime",
        ])
        .unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("prefs.json")));
        assert_eq!(args.assets, Some(PathBuf::from("manifest.json")));
        assert!(args.realtime);
    }

    #[test]
    fn test_args_reject_unknown_flag() {
        assert!(Args::try_parse_from(["disaster-before-christmas", "--relatime"]).is_err());
    }

    #[test]
    fn test_args_assets_needs_value() {
        assert!(Args::try_parse_from(["disaster-before-christmas", "--assets"]).is_err());
    }
}
