//! Positioned, scaled sprites
//!
//! A [`Transform`] is the destination rectangle of a texture. Its size is
//! always native size × scale; position is the top-left corner and is left
//! untouched by rescaling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Texture;
use crate::renderer::{Rect, Renderer};

/// Position and derived size of a renderable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub scale: f32,
}

impl Transform {
    fn from_native(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: width,
            h: height,
            scale: 1.0,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Texture + transform, no animation (presents, backgrounds, labels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: Texture,
    pub transform: Transform,
}

impl Sprite {
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            transform: Transform::from_native(texture.width as f32, texture.height as f32),
        }
    }

    /// Sprite already scaled and placed
    pub fn placed(texture: Texture, scale: f32, pos: Vec2) -> Self {
        let mut sprite = Self::new(texture);
        sprite.set_scale(scale);
        sprite.transform.set_pos(pos);
        sprite
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
        self.transform.w = self.texture.width as f32 * scale;
        self.transform.h = self.texture.height as f32 * scale;
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        let src = Rect::new(0.0, 0.0, self.texture.width as f32, self.texture.height as f32);
        renderer.draw(self.texture.id, src, self.transform.as_rect());
    }
}

/// Sprite whose texture is a horizontal strip of equal frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedSprite {
    pub texture: Texture,
    pub transform: Transform,
    frame: u32,
    total_frames: u32,
}

impl AnimatedSprite {
    pub fn new(texture: Texture, total_frames: u32) -> Self {
        debug_assert!(total_frames > 0, "animated sprite needs at least one frame");
        let frame_width = (texture.width / total_frames) as f32;
        Self {
            texture,
            transform: Transform::from_native(frame_width, texture.height as f32),
            frame: 0,
            total_frames,
        }
    }

    /// Native width of one frame
    fn frame_width(&self) -> u32 {
        self.texture.width / self.total_frames
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
        self.transform.w = self.frame_width() as f32 * scale;
        self.transform.h = self.texture.height as f32 * scale;
    }

    /// Select the frame for the next render; the caller wraps
    pub fn set_frame(&mut self, frame: u32) {
        debug_assert!(
            frame < self.total_frames,
            "frame {} out of range (total {})",
            frame,
            self.total_frames
        );
        self.frame = frame;
    }

    /// Step to the next frame, wrapping to the first
    pub fn advance_frame(&mut self) {
        self.set_frame((self.frame + 1) % self.total_frames);
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Source region of the current frame
    pub fn frame_rect(&self) -> Rect {
        let w = self.frame_width() as f32;
        Rect::new(self.frame as f32 * w, 0.0, w, self.texture.height as f32)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(self.texture.id, self.frame_rect(), self.transform.as_rect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use crate::renderer::DrawList;
    use proptest::prelude::*;

    fn strip(width: u32, height: u32) -> Texture {
        Texture {
            id: TextureId(7),
            width,
            height,
        }
    }

    #[test]
    fn test_scale_recomputes_size_keeps_position() {
        let mut sprite = AnimatedSprite::new(strip(48, 32), 3);
        assert_eq!(sprite.transform.w, 16.0);
        sprite.transform.x = 100.0;
        sprite.transform.y = 200.0;

        sprite.set_scale(4.0);
        assert_eq!(sprite.transform.w, 64.0);
        assert_eq!(sprite.transform.h, 128.0);
        assert_eq!(sprite.transform.pos(), Vec2::new(100.0, 200.0));

        sprite.set_scale(2.0);
        assert_eq!(sprite.transform.w, 32.0);
        assert_eq!(sprite.transform.h, 64.0);
    }

    #[test]
    fn test_static_sprite_renders_whole_texture() {
        let sprite = Sprite::placed(strip(16, 16), 3.0, Vec2::new(5.0, 6.0));
        let mut list = DrawList::new();
        sprite.render(&mut list);
        assert_eq!(list.sources_for(TextureId(7)), vec![Rect::new(0.0, 0.0, 16.0, 16.0)]);
        assert_eq!(sprite.transform.center(), Vec2::new(29.0, 30.0));
    }

    #[test]
    fn test_advance_frame_wraps() {
        let mut sprite = AnimatedSprite::new(strip(32, 24), 2);
        sprite.advance_frame();
        assert_eq!(sprite.frame(), 1);
        sprite.advance_frame();
        assert_eq!(sprite.frame(), 0);
    }

    proptest! {
        #[test]
        fn prop_renders_selected_frame(frames in 1u32..8, index in 0u32..1000, renders in 1usize..4) {
            let mut sprite = AnimatedSprite::new(strip(frames * 10, 20), frames);
            sprite.set_frame(index % frames);

            let mut list = DrawList::new();
            for _ in 0..renders {
                sprite.render(&mut list);
            }
            let expected = Rect::new((index % frames) as f32 * 10.0, 0.0, 10.0, 20.0);
            let sources = list.sources_for(TextureId(7));
            prop_assert_eq!(sources.len(), renders);
            prop_assert!(sources.iter().all(|src| *src == expected));
        }
    }
}
