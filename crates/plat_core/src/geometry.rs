//! Integer rectangles and pixel-occupancy masks.
//!
//! Collision truth is the mask, not the box: two entities touch only when an
//! opaque pixel of one lands on an opaque pixel of the other. The rectangle is
//! the mask's placement in world space and doubles as a cheap broad-phase
//! filter, since rect overlap is a superset of mask overlap.

use glam::IVec2;
use image::RgbaImage;

/// Alpha values strictly above this count as opaque.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Top-left anchored, axis-aligned box in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Move the box so its top edge sits at `top`, keeping its height.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move the box so its bottom edge sits at `bottom`, keeping its height.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Half-open overlap test; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Binary occupancy grid for one visual frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// A fully opaque mask, used for placeholder frames and solid tiles.
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Derive the mask from an RGBA frame's alpha channel.
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let bits = image
            .pixels()
            .map(|pixel| pixel.0[3] > ALPHA_THRESHOLD)
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = value;
        }
    }

    /// Out-of-range coordinates read as empty.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if any set pixel of `self` coincides with a set pixel of `other`
    /// placed at `offset` relative to `self`'s top-left corner.
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        // Only the intersection of the two placements can contain a hit.
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.is_set(x, y) && other.is_set(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}
