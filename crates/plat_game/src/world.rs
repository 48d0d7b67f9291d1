//! Simulation driver: owns the player, the object collection, and the camera,
//! and advances them one atomic step at a time.
//!
//! Step order is fixed and observable only as a whole:
//!
//!   1. jump request (guarded to a double jump)
//!   2. player gravity + motion + animation
//!   3. object animation (fire)
//!   4. horizontal probe / commit, vertical resolution, hazards
//!   5. camera scroll

use plat_core::config::SimConfig;
use plat_core::geometry::Rect;
use plat_core::input::StepInput;
use serde::Serialize;

use crate::assets::Assets;
use crate::camera::ScrollCamera;
use crate::controller::{handle_move, try_jump, ContactState};
use crate::level::LevelFile;
use crate::objects::{Block, Fire, Object};
use crate::player::{Direction, Player, PlayerAnim};

pub struct World {
    pub config: SimConfig,
    pub player: Player,
    pub objects: Vec<Object>,
    pub camera: ScrollCamera,
    pub step_count: u64,
    level: LevelFile,
    assets: Assets,
}

/// Serializable view of the simulation for logs and determinism checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub step: u64,
    pub player_x: i32,
    pub player_y: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub x_vel: i32,
    pub y_vel: f32,
    pub direction: Direction,
    pub animation: PlayerAnim,
    pub jump_count: u8,
    pub fall_count: u32,
    pub hit: bool,
    pub hit_count: u32,
    pub camera_offset: i32,
}

impl World {
    pub fn new(level: LevelFile, assets: Assets, config: SimConfig) -> Result<Self, String> {
        let config = match level.viewport {
            Some(viewport) => config.with_viewport(viewport.width, viewport.height),
            None => config,
        };
        config.validate()?;

        let (player, objects) = build_entities(&level, &assets, &config)?;
        log::info!(
            "Level '{}' ready: {} objects, player at ({}, {})",
            level.level_id,
            objects.len(),
            player.rect().x,
            player.rect().y
        );

        Ok(Self {
            config,
            player,
            objects,
            camera: ScrollCamera::new(),
            step_count: 0,
            level,
            assets,
        })
    }

    /// Restart the level: fresh player and objects, camera back at zero.
    pub fn reset(&mut self) -> Result<(), String> {
        let (player, objects) = build_entities(&self.level, &self.assets, &self.config)?;
        self.player = player;
        self.objects = objects;
        self.camera.reset();
        self.step_count = 0;
        log::info!("Level '{}' restarted", self.level.level_id);
        Ok(())
    }

    pub fn level(&self) -> &LevelFile {
        &self.level
    }

    pub fn fire_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object, Object::Fire(_)))
            .count()
    }

    pub fn lit_fire_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object, Object::Fire(fire) if fire.is_on()))
            .count()
    }

    /// Switch the `index`-th fire (in level order) on or off.
    pub fn set_fire(&mut self, index: usize, lit: bool) -> Result<(), String> {
        let fire = self
            .objects
            .iter_mut()
            .filter_map(|object| match object {
                Object::Fire(fire) => Some(fire),
                Object::Block(_) => None,
            })
            .nth(index)
            .ok_or_else(|| format!("No fire at index {}", index))?;
        if lit {
            fire.on();
        } else {
            fire.off();
        }
        Ok(())
    }

    pub fn set_all_fires(&mut self, lit: bool) {
        for object in &mut self.objects {
            if let Object::Fire(fire) = object {
                if lit {
                    fire.on();
                } else {
                    fire.off();
                }
            }
        }
    }

    pub fn step(&mut self, input: StepInput) -> ContactState {
        try_jump(&mut self.player, input.jump_requested);
        self.player.integrate(self.config.fps);
        for object in &mut self.objects {
            object.step();
        }
        let contacts = handle_move(&mut self.player, &self.objects, input, &self.config);
        self.camera.update(
            self.player.rect(),
            self.player.x_vel,
            self.config.viewport_width,
            self.config.scroll_margin,
        );
        self.step_count += 1;
        contacts
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let rect = self.player.rect();
        WorldSnapshot {
            step: self.step_count,
            player_x: rect.x,
            player_y: rect.y,
            player_width: rect.width,
            player_height: rect.height,
            x_vel: self.player.x_vel,
            y_vel: self.player.y_vel,
            direction: self.player.direction,
            animation: self.player.current_anim(),
            jump_count: self.player.jump_count,
            fall_count: self.player.fall_count,
            hit: self.player.hit,
            hit_count: self.player.hit_count,
            camera_offset: self.camera.offset_x,
        }
    }
}

fn build_entities(
    level: &LevelFile,
    assets: &Assets,
    config: &SimConfig,
) -> Result<(Player, Vec<Object>), String> {
    let start = level.player;
    let player = Player::new(
        Rect::new(start.x, start.y, start.width, start.height),
        assets.player.clone(),
        *config,
    )?;

    let mut objects = Vec::new();
    for (x, y) in level.block_positions(config.block_size, config.viewport_height) {
        objects.push(Object::Block(Block::new(x, y, assets.block.clone())));
    }
    for placement in &level.fires {
        let sheets = assets.fire_sheets(placement.width as u32, placement.height as u32);
        let mut fire = Fire::new(
            placement.x,
            placement.y,
            config.hazard_name,
            sheets,
            config.animation_delay,
        )?;
        if placement.lit {
            fire.on();
        }
        objects.push(Object::Fire(fire));
    }
    Ok((player, objects))
}
