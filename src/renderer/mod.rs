//! Render contract
//!
//! The simulation never touches a GPU or window. Scenes describe each frame as
//! a sequence of "draw this texture region here" calls against [`Renderer`],
//! in scene-defined order (backgrounds, actors, presents, overlays).

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use serde::{Deserialize, Serialize};

use crate::assets::TextureId;

/// Axis-aligned rectangle in pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Backend that draws texture regions
pub trait Renderer {
    /// Draw the `src` region of `texture` scaled into `dst`
    fn draw(&mut self, texture: TextureId, src: Rect, dst: Rect);

    /// Draw a dynamic text overlay (score counters and the like)
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
}
