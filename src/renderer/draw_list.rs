//! Recording renderer
//!
//! Collects draw calls instead of rasterizing them. The headless binary and
//! the tests use it to inspect what a scene would put on screen.

use super::{Rect, Renderer};
use crate::assets::TextureId;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        texture: TextureId,
        src: Rect,
        dst: Rect,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
    },
}

/// Frame-sized list of draw commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame's commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of draws using a given texture
    pub fn count_texture(&self, texture: TextureId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { texture: t, .. } if *t == texture))
            .count()
    }

    /// Source rectangles drawn from a given texture, in draw order
    pub fn sources_for(&self, texture: TextureId) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { texture: t, src, .. } if *t == texture => Some(*src),
                _ => None,
            })
            .collect()
    }

    /// All text overlays, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for DrawList {
    fn draw(&mut self, texture: TextureId, src: Rect, dst: Rect) {
        self.commands.push(DrawCommand::Sprite { texture, src, dst });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}
