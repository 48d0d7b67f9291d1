//! The player: velocity, gravity ramp, jump budget, hit reaction, and the
//! state machine that picks which frame set is shown.
//!
//! Every operation here is unguarded geometry or bookkeeping. Collision safety
//! and the double-jump limit are enforced by the caller (see `controller`).

use std::sync::Arc;

use plat_core::animation::{AnimationCursor, FrameSets};
use plat_core::config::SimConfig;
use plat_core::geometry::Rect;
use serde::Serialize;

use crate::sprite::Sprite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Frame-set families the player can display, before the direction suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAnim {
    Hit,
    Jump,
    DoubleJump,
    Fall,
    Run,
    Idle,
}

impl PlayerAnim {
    pub const ALL: [PlayerAnim; 6] = [
        PlayerAnim::Hit,
        PlayerAnim::Jump,
        PlayerAnim::DoubleJump,
        PlayerAnim::Fall,
        PlayerAnim::Run,
        PlayerAnim::Idle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Jump => "jump",
            Self::DoubleJump => "double_jump",
            Self::Fall => "fall",
            Self::Run => "run",
            Self::Idle => "idle",
        }
    }

    pub fn set_name(self, direction: Direction) -> String {
        format!("{}_{}", self.name(), direction.suffix())
    }
}

/// Per-step gravity increment: ramps with time spent airborne, capped at 1.
pub fn gravity_increment(fall_count: u32, fps: u32, gravity: f32) -> f32 {
    (fall_count as f32 / fps as f32 * gravity).min(1.0)
}

#[derive(Debug, Clone)]
pub struct Player {
    pub sprite: Sprite,
    pub x_vel: i32,
    pub y_vel: f32,
    pub direction: Direction,
    /// 0 = grounded, 1 = single jump, 2 = double jump.
    pub jump_count: u8,
    /// Steps since last grounded contact.
    pub fall_count: u32,
    pub hit: bool,
    pub hit_count: u32,
    pub animation: AnimationCursor,
    anim: PlayerAnim,
    sheets: Arc<FrameSets>,
    config: SimConfig,
}

impl Player {
    /// Fails if any `<state>_<direction>` frame set is missing, so no lookup
    /// can miss once the simulation is running.
    pub fn new(
        rect: Rect,
        sheets: Arc<FrameSets>,
        config: SimConfig,
    ) -> Result<Self, String> {
        let names: Vec<String> = PlayerAnim::ALL
            .iter()
            .flat_map(|anim| Direction::ALL.iter().map(|dir| anim.set_name(*dir)))
            .collect();
        sheets.require(names.iter().map(String::as_str))?;

        let direction = Direction::Left;
        let first = sheets
            .get(&PlayerAnim::Idle.set_name(direction))
            .and_then(|frames| frames.first())
            .cloned()
            .ok_or_else(|| "Player frame sets have no idle frame".to_string())?;

        // The authored rect stands until the first step re-anchors it to the frame.
        let mut sprite = Sprite::new(rect.x, rect.y, first);
        sprite.rect = rect;

        Ok(Self {
            sprite,
            x_vel: 0,
            y_vel: 0.0,
            direction,
            jump_count: 0,
            fall_count: 0,
            hit: false,
            hit_count: 0,
            animation: AnimationCursor::new(config.animation_delay),
            anim: PlayerAnim::Idle,
            sheets,
            config,
        })
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }

    pub fn current_anim(&self) -> PlayerAnim {
        self.anim
    }

    /// Unguarded: callers must check `jump_count < 2` first.
    pub fn jump(&mut self) {
        self.y_vel = -self.config.gravity * self.config.jump_impulse;
        self.animation.reset();
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_count = 0;
        }
    }

    /// Plain translation with no collision awareness.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.sprite.rect.translate(dx, dy);
    }

    pub fn move_left(&mut self, vel: i32) {
        self.x_vel = -vel;
        self.face(Direction::Left);
    }

    pub fn move_right(&mut self, vel: i32) {
        self.x_vel = vel;
        self.face(Direction::Right);
    }

    fn face(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.animation.reset();
        }
    }

    /// One simulation step of gravity, motion, hit timer, and animation.
    pub fn integrate(&mut self, fps: u32) {
        self.y_vel += gravity_increment(self.fall_count, fps, self.config.gravity);
        // The integer rect truncates the new position, not the velocity.
        let y = self.sprite.rect.y;
        let new_y = (y as f32 + self.y_vel) as i32;
        self.move_by(self.x_vel, new_y - y);

        if self.hit {
            self.hit_count += 1;
        }
        if self.hit_count > self.config.hit_duration_steps(fps) {
            self.hit = false;
            self.hit_count = 0;
            log::debug!("Player hit state cleared");
        }

        self.fall_count += 1;
        self.update_sprite();
    }

    pub fn landed(&mut self) {
        self.fall_count = 0;
        self.y_vel = 0.0;
        self.jump_count = 0;
    }

    pub fn hit_head(&mut self) {
        self.y_vel = -self.y_vel;
    }

    /// Re-arms the hit window even if already hit.
    pub fn make_hit(&mut self) {
        self.hit = true;
        self.hit_count = 0;
    }

    /// First match wins.
    pub fn select_anim(&self) -> PlayerAnim {
        let gravity = self.config.gravity;
        if self.hit {
            PlayerAnim::Hit
        } else if self.y_vel < 0.0 && self.jump_count == 1 {
            PlayerAnim::Jump
        } else if self.y_vel < 0.0 && self.jump_count == 2 {
            PlayerAnim::DoubleJump
        } else if self.y_vel > gravity * 2.0 {
            PlayerAnim::Fall
        } else if self.x_vel != 0 {
            PlayerAnim::Run
        } else {
            PlayerAnim::Idle
        }
    }

    fn update_sprite(&mut self) {
        self.anim = self.select_anim();
        let set_name = self.anim.set_name(self.direction);
        let Some(frames) = self.sheets.get(&set_name) else {
            log::error!("Player frame set '{}' vanished after validation", set_name);
            return;
        };
        let frame = frames[self.animation.index_for(frames.len())].clone();
        self.animation.advance();
        self.sprite.set_frame(frame);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use plat_core::animation::Frame;

    /// Every player frame set, two solid frames each, with distinct sizes per
    /// family so tests can see which set is showing.
    pub(crate) fn player_sheets(size: u32) -> Arc<FrameSets> {
        let mut sets = FrameSets::new();
        for anim in PlayerAnim::ALL {
            for dir in Direction::ALL {
                let name = anim.set_name(dir);
                let frames = (0..2)
                    .map(|i| Frame::solid(format!("{name}#{i}"), size, size))
                    .collect();
                sets.insert(name, frames);
            }
        }
        Arc::new(sets)
    }

    pub(crate) fn test_player(x: i32, y: i32) -> Player {
        Player::new(
            Rect::new(x, y, 50, 50),
            player_sheets(50),
            SimConfig::default(),
        )
        .expect("test sheets are complete")
    }

    #[test]
    fn new_rejects_incomplete_sheets() {
        let mut sets = FrameSets::new();
        sets.insert("idle_left", vec![Frame::solid("idle", 4, 4)]);
        let err = Player::new(Rect::new(0, 0, 4, 4), Arc::new(sets), SimConfig::default())
            .expect_err("missing sets should fail");
        assert!(err.contains("missing frame set"));
    }

    #[test]
    fn jump_from_ground_sets_impulse_and_counters() {
        let mut player = test_player(100, 100);
        player.fall_count = 17;
        player.animation.tick = 9;
        player.jump();
        assert_eq!(player.y_vel, -8.0);
        assert_eq!(player.jump_count, 1);
        assert_eq!(player.fall_count, 0);
        assert_eq!(player.animation.tick, 0);
    }

    #[test]
    fn second_jump_keeps_fall_count() {
        let mut player = test_player(0, 0);
        player.jump();
        player.fall_count = 12;
        player.jump();
        assert_eq!(player.jump_count, 2);
        assert_eq!(player.fall_count, 12);
    }

    #[test]
    fn gravity_ramp_is_monotonic_and_capped() {
        let mut previous = -1.0;
        for fall_count in 0..200 {
            let inc = gravity_increment(fall_count, 60, 1.0);
            assert!(inc >= previous);
            assert!(inc <= 1.0);
            previous = inc;
        }
        assert_eq!(gravity_increment(0, 60, 1.0), 0.0);
        assert_eq!(gravity_increment(30, 60, 1.0), 0.5);
        assert_eq!(gravity_increment(60, 60, 1.0), 1.0);
        assert_eq!(gravity_increment(600, 60, 1.0), 1.0);
    }

    #[test]
    fn landed_resets_from_any_state() {
        for (y_vel, fall, jumps) in [(7.5, 40, 2), (-8.0, 0, 1), (0.0, 0, 0)] {
            let mut player = test_player(0, 0);
            player.y_vel = y_vel;
            player.fall_count = fall;
            player.jump_count = jumps;
            player.landed();
            assert_eq!(player.y_vel, 0.0);
            assert_eq!(player.fall_count, 0);
            assert_eq!(player.jump_count, 0);
        }
    }

    #[test]
    fn hit_head_reverses_vertical_velocity() {
        let mut player = test_player(0, 0);
        player.y_vel = -6.0;
        player.hit_head();
        assert_eq!(player.y_vel, 6.0);
    }

    #[test]
    fn direction_change_resets_animation_only_on_change() {
        let mut player = test_player(0, 0);
        player.animation.tick = 5;
        player.move_left(5);
        assert_eq!(player.x_vel, -5);
        assert_eq!(player.animation.tick, 5);

        player.move_right(5);
        assert_eq!(player.x_vel, 5);
        assert_eq!(player.direction, Direction::Right);
        assert_eq!(player.animation.tick, 0);
    }

    #[test]
    fn integrate_applies_velocity_with_truncation() {
        let mut player = test_player(100, 100);
        player.x_vel = 5;
        player.y_vel = 2.0;
        player.fall_count = 30; // +0.5 this step
        player.integrate(60);
        assert_eq!(player.y_vel, 2.5);
        assert_eq!(player.rect().x, 105);
        assert_eq!(player.rect().y, 102);
        assert_eq!(player.fall_count, 31);
    }

    #[test]
    fn rising_position_truncates_after_adding_velocity() {
        let mut player = test_player(100, 100);
        player.y_vel = -2.0;
        player.fall_count = 30; // +0.5 this step
        player.integrate(60);
        assert_eq!(player.y_vel, -1.5);
        // 100 - 1.5 = 98.5 lands on 98, not 100 - 1.
        assert_eq!(player.rect().y, 98);
    }

    #[test]
    fn jump_arc_follows_integer_position_model() {
        let mut player = test_player(100, 300);
        player.jump();

        let mut expected_y = 300;
        let mut expected_vel = player.y_vel;
        let mut fall_count = player.fall_count;
        for step in 0..30 {
            expected_vel += gravity_increment(fall_count, 60, 1.0);
            expected_y = (expected_y as f32 + expected_vel) as i32;
            fall_count += 1;

            player.integrate(60);
            assert_eq!(player.rect().y, expected_y, "step {step}");
        }
        // Apex well above the truncated-velocity arc.
        assert!(player.rect().y < 160);
    }

    #[test]
    fn hit_clears_on_step_121_at_60_fps() {
        let mut player = test_player(0, 0);
        player.make_hit();
        for _ in 0..120 {
            player.integrate(60);
            assert!(player.hit);
        }
        player.integrate(60);
        assert!(!player.hit);
        assert_eq!(player.hit_count, 0);
    }

    #[test]
    fn make_hit_rearms_window() {
        let mut player = test_player(0, 0);
        player.make_hit();
        for _ in 0..100 {
            player.integrate(60);
        }
        player.make_hit();
        assert!(player.hit);
        assert_eq!(player.hit_count, 0);
    }

    #[test]
    fn anim_priority_order() {
        let mut player = test_player(0, 0);
        assert_eq!(player.select_anim(), PlayerAnim::Idle);

        player.x_vel = 5;
        assert_eq!(player.select_anim(), PlayerAnim::Run);

        player.y_vel = 3.0;
        assert_eq!(player.select_anim(), PlayerAnim::Fall);

        player.y_vel = 2.0; // not faster than 2x gravity
        assert_eq!(player.select_anim(), PlayerAnim::Run);

        player.y_vel = -4.0;
        player.jump_count = 1;
        assert_eq!(player.select_anim(), PlayerAnim::Jump);

        player.jump_count = 2;
        assert_eq!(player.select_anim(), PlayerAnim::DoubleJump);

        player.hit = true;
        assert_eq!(player.select_anim(), PlayerAnim::Hit);
    }

    #[test]
    fn integrate_shows_directional_frame_set() {
        let mut player = test_player(0, 0);
        player.move_right(5);
        player.integrate(60);
        assert_eq!(player.current_anim(), PlayerAnim::Run);
        assert_eq!(player.sprite.frame().id, "run_right#0");
        assert_eq!(player.animation.tick, 1);

        // Frame advances every `animation_delay` steps.
        player.integrate(60);
        player.integrate(60);
        assert_eq!(player.sprite.frame().id, "run_right#0");
        player.integrate(60);
        assert_eq!(player.sprite.frame().id, "run_right#1");
    }
}
