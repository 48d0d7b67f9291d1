//! Per-step translation of input into player motion.
//!
//! Order within a step is fixed: probe both sides, commit whichever lateral
//! velocity is allowed, resolve vertical contacts, then apply hazards from
//! every contact found along the way.

use plat_core::config::SimConfig;
use plat_core::input::StepInput;

use crate::collision::{probe, resolve_vertical};
use crate::objects::Object;
use crate::player::Player;

/// Maximum jumps before the player must touch ground again.
pub const MAX_JUMPS: u8 = 2;

/// What the player touched this step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactState {
    pub left: bool,
    pub right: bool,
    /// Objects overlapping after the vertical move.
    pub vertical: usize,
    pub hazard: bool,
}

/// Edge-triggered jump with the double-jump guard. Returns whether it fired.
pub fn try_jump(player: &mut Player, requested: bool) -> bool {
    if !requested || player.jump_count >= MAX_JUMPS {
        return false;
    }
    player.jump();
    log::debug!("Player jump #{}", player.jump_count);
    true
}

pub fn handle_move(
    player: &mut Player,
    objects: &[Object],
    input: StepInput,
    config: &SimConfig,
) -> ContactState {
    // Lateral motion only lasts while a key is held.
    player.x_vel = 0;

    let look_ahead = config.probe_distance();
    let collide_left = probe(player, objects, -look_ahead);
    let collide_right = probe(player, objects, look_ahead);

    if input.move_left && collide_left.is_none() {
        player.move_left(config.player_vel);
    }
    if input.move_right && collide_right.is_none() {
        player.move_right(config.player_vel);
    }

    let dy = player.y_vel;
    let vertical = resolve_vertical(player, objects, dy);

    let hazard = collide_left
        .into_iter()
        .chain(collide_right)
        .chain(vertical.iter().copied())
        .any(|object| object.name() == Some(config.hazard_name));
    if hazard {
        if !player.hit {
            log::debug!("Player touched a hazard");
        }
        player.make_hit();
    }

    ContactState {
        left: collide_left.is_some(),
        right: collide_right.is_some(),
        vertical: vertical.len(),
        hazard,
    }
}
