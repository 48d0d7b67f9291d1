/// Fixed simulation constants, built once and handed to the world driver.
///
/// Units are pixels and simulation steps. Physics values are not loaded from
/// data files; only the viewport can be overridden by a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Gravity unit; also scales the jump impulse and the "falling fast" threshold.
    pub gravity: f32,
    /// Horizontal speed in pixels per step.
    pub player_vel: i32,
    /// Steps each animation frame stays on screen.
    pub animation_delay: u32,
    /// Target steps per second; drives the gravity ramp and hit timer.
    pub fps: u32,
    /// Viewport-edge distance at which the camera starts tracking.
    pub scroll_margin: i32,
    /// Upward jump impulse as a multiple of `gravity`.
    pub jump_impulse: f32,
    pub viewport_width: i32,
    pub viewport_height: i32,
    pub block_size: i32,
    /// Length of the hit reaction window in seconds.
    pub hit_duration_secs: u32,
    pub hazard_name: &'static str,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.fps == 0 {
            return Err("Config validation failed: fps must be > 0".to_string());
        }
        if self.animation_delay == 0 {
            return Err("Config validation failed: animation_delay must be > 0".to_string());
        }
        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err("Config validation failed: viewport must be > 0 in both axes".to_string());
        }
        if self.block_size <= 0 {
            return Err("Config validation failed: block_size must be > 0".to_string());
        }
        if self.scroll_margin < 0 || self.scroll_margin * 2 > self.viewport_width {
            return Err(format!(
                "Config validation failed: scroll_margin {} does not fit viewport width {}",
                self.scroll_margin, self.viewport_width
            ));
        }
        Ok(())
    }

    /// Hit state clears once the hit counter exceeds this many steps at `fps`.
    pub fn hit_duration_steps(&self, fps: u32) -> u32 {
        self.hit_duration_secs * fps
    }

    /// Horizontal look-ahead distance for wall probes.
    pub fn probe_distance(&self) -> i32 {
        self.player_vel * 2
    }

    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            player_vel: 5,
            animation_delay: 3,
            fps: 60,
            scroll_margin: 200,
            jump_impulse: 8.0,
            viewport_width: 1000,
            viewport_height: 800,
            block_size: 96,
            hit_duration_secs: 2,
            hazard_name: "fire",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.hit_duration_steps(config.fps), 120);
        assert_eq!(config.hit_duration_steps(30), 60);
        assert_eq!(config.probe_distance(), 10);
    }

    #[test]
    fn zero_fps_is_rejected() {
        let config = SimConfig {
            fps: 0,
            ..SimConfig::default()
        };
        let err = config.validate().expect_err("zero fps should fail");
        assert!(err.contains("fps"));
    }

    #[test]
    fn margin_wider_than_half_viewport_is_rejected() {
        let config = SimConfig::default().with_viewport(300, 300);
        let err = config.validate().expect_err("margin should not fit");
        assert!(err.contains("scroll_margin"));
    }
}
