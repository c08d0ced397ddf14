//! Asset handles and the asset manifest
//!
//! Pixel data and audio clips belong to the host. The simulation only sees
//! opaque handles carrying the native size it needs for layout.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StartupError;

/// Opaque texture identifier assigned by the asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// A texture handle with its native pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    /// Confirm pressed on the title screen
    Start,
    /// Present caught during the chase
    Pickup,
    /// Enough presents collected, delivery banner shown
    Fanfare,
    /// Present dropped into the sleigh
    Delivered,
    /// Ending: night falls
    SleighBells,
    /// Ending: Santa laughs mid-flight
    HoHoHo,
}

impl SoundId {
    pub const ALL: [SoundId; 6] = [
        SoundId::Start,
        SoundId::Pickup,
        SoundId::Fanfare,
        SoundId::Delivered,
        SoundId::SleighBells,
        SoundId::HoHoHo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::Start => "start",
            SoundId::Pickup => "pickup",
            SoundId::Fanfare => "fanfare",
            SoundId::Delivered => "delivered",
            SoundId::SleighBells => "sleigh_bells",
            SoundId::HoHoHo => "ho_ho_ho",
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicId {
    Jingle,
}

impl MusicId {
    pub const ALL: [MusicId; 1] = [MusicId::Jingle];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicId::Jingle => "jingle",
        }
    }
}

/// Declared native size of one texture
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextureEntry {
    pub width: u32,
    pub height: u32,
}

/// Everything the host promises to have loaded before the first tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    pub textures: BTreeMap<String, TextureEntry>,
    #[serde(default)]
    pub sounds: Vec<String>,
    #[serde(default)]
    pub music: Vec<String>,
}

/// Manifest matching the sprite sheets shipped with the game
pub const DEFAULT_MANIFEST: &str = r#"{
    "textures": {
        "player": { "width": 48, "height": 32 },
        "penguin": { "width": 32, "height": 24 },
        "present": { "width": 16, "height": 16 },
        "sleigh": { "width": 256, "height": 40 },
        "santa": { "width": 32, "height": 32 },
        "home_background": { "width": 512, "height": 320 },
        "night_background": { "width": 512, "height": 320 },
        "sky_background": { "width": 512, "height": 320 },
        "welcome_label": { "width": 300, "height": 40 },
        "narrative_label": { "width": 400, "height": 160 },
        "score_label": { "width": 70, "height": 16 },
        "delivery_label": { "width": 300, "height": 40 },
        "the_end_label": { "width": 120, "height": 20 }
    },
    "sounds": ["start", "pickup", "fanfare", "delivered", "sleigh_bells", "ho_ho_ho"],
    "music": ["jingle"]
}"#;

impl AssetManifest {
    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self, StartupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Manifest for the bundled assets
    pub fn bundled() -> Result<Self, StartupError> {
        Self::from_json(DEFAULT_MANIFEST)
    }
}

/// Resolved handles for every texture the scenes draw
#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Texture,
    pub penguin: Texture,
    pub present: Texture,
    pub sleigh: Texture,
    pub santa: Texture,
    pub home_background: Texture,
    pub night_background: Texture,
    pub sky_background: Texture,
    pub welcome_label: Texture,
    pub narrative_label: Texture,
    pub score_label: Texture,
    pub delivery_label: Texture,
    pub the_end_label: Texture,
}

impl Assets {
    /// Resolve handles from a manifest, failing on anything missing
    ///
    /// Texture ids follow the manifest's (sorted) key order.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, StartupError> {
        for sound in SoundId::ALL {
            if !manifest.sounds.iter().any(|s| s == sound.as_str()) {
                return Err(StartupError::MissingSound(sound.as_str().to_string()));
            }
        }
        for track in MusicId::ALL {
            if !manifest.music.iter().any(|m| m == track.as_str()) {
                return Err(StartupError::MissingMusic(track.as_str().to_string()));
            }
        }

        let texture = |name: &str, frames: u32| -> Result<Texture, StartupError> {
            let (index, entry) = manifest
                .textures
                .iter()
                .enumerate()
                .find(|(_, (key, _))| key.as_str() == name)
                .map(|(i, (_, entry))| (i, *entry))
                .ok_or_else(|| StartupError::MissingTexture(name.to_string()))?;
            if entry.width == 0 || entry.height == 0 {
                return Err(StartupError::ZeroSizedTexture(name.to_string()));
            }
            if entry.width < frames {
                return Err(StartupError::TooFewFrames {
                    name: name.to_string(),
                    width: entry.width,
                    frames,
                });
            }
            Ok(Texture {
                id: TextureId(index as u32),
                width: entry.width,
                height: entry.height,
            })
        };

        let assets = Self {
            player: texture("player", PLAYER_FRAMES)?,
            penguin: texture("penguin", PENGUIN_FRAMES)?,
            present: texture("present", 1)?,
            sleigh: texture("sleigh", SLEIGH_FRAMES)?,
            santa: texture("santa", SANTA_FRAMES)?,
            home_background: texture("home_background", 1)?,
            night_background: texture("night_background", 1)?,
            sky_background: texture("sky_background", 1)?,
            welcome_label: texture("welcome_label", 1)?,
            narrative_label: texture("narrative_label", 1)?,
            score_label: texture("score_label", 1)?,
            delivery_label: texture("delivery_label", 1)?,
            the_end_label: texture("the_end_label", 1)?,
        };
        log::info!("Resolved {} textures", manifest.textures.len());
        Ok(assets)
    }

    /// Handles for the bundled assets
    pub fn bundled() -> Result<Self, StartupError> {
        Self::from_manifest(&AssetManifest::bundled()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_manifest_resolves() {
        let assets = Assets::bundled().unwrap();
        assert_eq!(assets.player.width, 48);
        assert_eq!(assets.present.height, 16);
        assert_ne!(assets.player.id, assets.penguin.id);
    }

    #[test]
    fn test_missing_texture_aborts() {
        let mut manifest = AssetManifest::bundled().unwrap();
        manifest.textures.remove("penguin");
        match Assets::from_manifest(&manifest) {
            Err(StartupError::MissingTexture(name)) => assert_eq!(name, "penguin"),
            other => panic!("expected MissingTexture, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sized_texture_aborts() {
        let mut manifest = AssetManifest::bundled().unwrap();
        manifest
            .textures
            .insert("present".to_string(), TextureEntry { width: 0, height: 16 });
        assert!(matches!(
            Assets::from_manifest(&manifest),
            Err(StartupError::ZeroSizedTexture(_))
        ));
    }

    #[test]
    fn test_missing_sound_aborts() {
        let mut manifest = AssetManifest::bundled().unwrap();
        manifest.sounds.retain(|s| s != "pickup");
        assert!(matches!(
            Assets::from_manifest(&manifest),
            Err(StartupError::MissingSound(_))
        ));
    }

    #[test]
    fn test_malformed_manifest() {
        assert!(matches!(
            AssetManifest::from_json("{ not json"),
            Err(StartupError::Json(_))
        ));
    }
}
