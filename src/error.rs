//! Startup errors
//!
//! The simulation itself never fails; everything here aborts the game before
//! the first tick.

use thiserror::Error;

/// Errors raised while loading settings or the asset manifest
#[derive(Debug, Error)]
pub enum StartupError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A texture the game needs is not in the manifest
    #[error("Texture not found in manifest: {0}")]
    MissingTexture(String),
    /// A texture was declared with a zero dimension
    #[error("Texture has zero size: {0}")]
    ZeroSizedTexture(String),
    /// A texture is too narrow to split into its animation frames
    #[error("Texture {name} is {width}px wide, cannot hold {frames} frames")]
    TooFewFrames { name: String, width: u32, frames: u32 },
    /// A sound effect is not in the manifest
    #[error("Sound not found in manifest: {0}")]
    MissingSound(String),
    /// A music track is not in the manifest
    #[error("Music not found in manifest: {0}")]
    MissingMusic(String),
}
