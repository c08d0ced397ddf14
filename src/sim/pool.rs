//! Fixed-capacity pool of presents
//!
//! Slots are reused through activate/deactivate instead of allocation. A
//! slot's position only means something while it is active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use crate::assets::Texture;
use crate::consts::POOL_CAPACITY;
use crate::renderer::Renderer;

/// Whether a slot is in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Inactive,
    Active,
}

/// One pooled present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentSlot {
    pub sprite: Sprite,
    pub status: SlotStatus,
}

impl PresentSlot {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SlotStatus::Active
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.sprite.transform.pos()
    }
}

/// The presents pool (slot order doubles as stacking order when staged)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentPool {
    slots: [PresentSlot; POOL_CAPACITY],
}

impl PresentPool {
    pub fn new(texture: Texture, scale: f32) -> Self {
        let mut sprite = Sprite::new(texture);
        sprite.set_scale(scale);
        Self {
            slots: [PresentSlot {
                sprite,
                status: SlotStatus::Inactive,
            }; POOL_CAPACITY],
        }
    }

    pub fn capacity(&self) -> usize {
        POOL_CAPACITY
    }

    pub fn slots(&self) -> &[PresentSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> &PresentSlot {
        &self.slots[index]
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// Indices of active slots, in slot order
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i)
    }

    /// Activate the first inactive slot at `pos`, returning its index
    pub fn activate_first(&mut self, pos: Vec2) -> Option<usize> {
        let index = self.slots.iter().position(|s| !s.is_active())?;
        self.activate(index, pos);
        Some(index)
    }

    pub fn activate(&mut self, index: usize, pos: Vec2) {
        let slot = &mut self.slots[index];
        slot.sprite.transform.set_pos(pos);
        slot.status = SlotStatus::Active;
    }

    pub fn deactivate(&mut self, index: usize) {
        self.slots[index].status = SlotStatus::Inactive;
    }

    /// Deactivate every slot and apply a new scale
    pub fn reset(&mut self, scale: f32) {
        for slot in &mut self.slots {
            slot.status = SlotStatus::Inactive;
            slot.sprite.set_scale(scale);
        }
    }

    /// Move an active slot by `delta`
    pub fn translate(&mut self, index: usize, delta: Vec2) {
        let slot = &mut self.slots[index];
        debug_assert!(slot.is_active(), "moving an inactive present");
        let pos = slot.sprite.transform.pos() + delta;
        slot.sprite.transform.set_pos(pos);
    }

    /// Size of one present at the current scale
    pub fn present_size(&self) -> Vec2 {
        let t = &self.slots[0].sprite.transform;
        Vec2::new(t.w, t.h)
    }

    /// Draw active slots in slot order
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for slot in self.slots.iter().filter(|s| s.is_active()) {
            slot.sprite.render(renderer);
        }
    }
}
