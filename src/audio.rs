//! Audio mixing
//!
//! The simulation only emits [`GameEvent`]s. The host drains them each frame and
//! hands them to an [`AudioManager`], which applies the volume settings and
//! forwards to whatever backend the platform provides.

use crate::assets::{MusicId, SoundId};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Platform audio output
pub trait AudioBackend {
    /// Fire a one-shot sound effect
    fn play_sound(&mut self, sound: SoundId, volume: f32);
    /// Start a looping music track, replacing any current one
    fn play_music(&mut self, track: MusicId, volume: f32);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    settings: Settings,
    current_track: Option<MusicId>,
    music_paused: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            settings: settings.clone(),
            current_track: None,
            music_paused: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.settings.set_master_volume(vol);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.settings.set_sfx_volume(vol);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.settings.set_music_volume(vol);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    /// Play a sound effect
    pub fn play(&mut self, sound: SoundId) {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play_sound(sound, vol);
    }

    /// Start a music track; a muted start is still tracked so pause/resume stay paired
    pub fn play_music(&mut self, track: MusicId) {
        self.current_track = Some(track);
        self.music_paused = false;
        self.backend.play_music(track, self.settings.effective_music_volume());
    }

    pub fn pause_music(&mut self) {
        if self.current_track.is_some() && !self.music_paused {
            self.music_paused = true;
            self.backend.pause_music();
        }
    }

    pub fn resume_music(&mut self) {
        if self.current_track.is_some() && self.music_paused {
            self.music_paused = false;
            self.backend.resume_music();
        }
    }

    /// React to one simulation event; non-audio events are ignored
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PlaySound(sound) => self.play(sound),
            GameEvent::PlayMusic(track) => self.play_music(track),
            GameEvent::PauseMusic => self.pause_music(),
            GameEvent::ResumeMusic => self.resume_music(),
            GameEvent::SceneChanged { .. } => {}
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.current_track.is_some() && !self.music_paused
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play_sound(&mut self, sound: SoundId, volume: f32) {
        log::info!("sfx {} @ {:.2}", sound.as_str(), volume);
    }

    fn play_music(&mut self, track: MusicId, volume: f32) {
        log::info!("music {} @ {:.2}", track.as_str(), volume);
    }

    fn pause_music(&mut self) {
        log::info!("music paused");
    }

    fn resume_music(&mut self) {
        log::info!("music resumed");
    }
}
