use plat_core::geometry::Rect;

/// Horizontal scroll offset shared by every world-space draw.
///
/// The offset only follows the player when they are inside a scroll margin
/// and still moving toward that edge. It is never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollCamera {
    pub offset_x: i32,
}

impl ScrollCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the offset moved this step.
    pub fn update(&mut self, player: &Rect, x_vel: i32, viewport_width: i32, margin: i32) -> bool {
        let near_right = player.right() - self.offset_x >= viewport_width - margin && x_vel > 0;
        let near_left = player.left() - self.offset_x <= margin && x_vel < 0;
        if near_right || near_left {
            self.offset_x += x_vel;
            log::trace!("Camera offset -> {}", self.offset_x);
            true
        } else {
            false
        }
    }

    pub fn to_screen_x(&self, world_x: i32) -> i32 {
        world_x - self.offset_x
    }

    pub fn reset(&mut self) {
        self.offset_x = 0;
    }
}
