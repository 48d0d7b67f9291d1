//! Positioned animated entity shared by the player and world objects.
//!
//! A `Sprite` is composed into each entity rather than inherited: it owns the
//! world rectangle and the currently displayed frame. The frame carries its
//! own mask, so the collision footprint always matches what is drawn and
//! follows the rectangle with no separate refresh step.

use std::sync::Arc;

use plat_core::animation::Frame;
use plat_core::geometry::{Mask, Rect};

#[derive(Debug, Clone)]
pub struct Sprite {
    pub rect: Rect,
    frame: Arc<Frame>,
}

impl Sprite {
    /// Place `frame` at `(x, y)`; the rect takes the frame's size.
    pub fn new(x: i32, y: i32, frame: Arc<Frame>) -> Self {
        let rect = Rect::new(x, y, frame.width() as i32, frame.height() as i32);
        Self { rect, frame }
    }

    /// Swap the displayed frame, keeping the top-left anchor and resizing the
    /// rect to the new frame.
    pub fn set_frame(&mut self, frame: Arc<Frame>) {
        self.rect.width = frame.width() as i32;
        self.rect.height = frame.height() as i32;
        self.frame = frame;
    }

    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    pub fn mask(&self) -> &Mask {
        &self.frame.mask
    }

    /// Pixel-accurate overlap test, with a rect pre-filter.
    pub fn collides(&self, other: &Sprite) -> bool {
        if !self.rect.intersects(&other.rect) {
            return false;
        }
        let offset = other.rect.top_left() - self.rect.top_left();
        self.mask().overlaps(other.mask(), offset)
    }
}
