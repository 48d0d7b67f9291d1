//! Recorded input sequences for headless, deterministic runs.
//!
//! Frames describe which keys are *held*; expansion feeds them through
//! `InputState` so jump requests are edge-triggered exactly as live input
//! would be. Holding jump across several frames yields one jump. A frame may
//! also carry world events (level restart, fire switches) that apply before
//! its first step.

use plat_core::input::{InputState, Key, StepInput};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::ContactState;
use crate::world::World;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Switch every fire on or off before this frame's first step.
    #[serde(default)]
    pub fires_lit: Option<bool>,
    /// Switch a single fire, by level order.
    #[serde(default)]
    pub fire: Option<FireSwitch>,
    /// Restart the level before this frame's first step.
    #[serde(default)]
    pub restart: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FireSwitch {
    pub index: usize,
    pub lit: bool,
}

/// One step of expanded replay input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStep {
    pub input: StepInput,
    pub fires_lit: Option<bool>,
    pub fire: Option<FireSwitch>,
    pub restart: bool,
}

impl ReplayStep {
    /// Apply this step's world events, then advance the world one step.
    pub fn apply(&self, world: &mut World) -> Result<ContactState, String> {
        if self.restart {
            world.reset()?;
        }
        if let Some(lit) = self.fires_lit {
            world.set_all_fires(lit);
        }
        if let Some(switch) = self.fire {
            world.set_fire(switch.index, switch.lit)?;
        }
        Ok(world.step(self.input))
    }
}

impl ReplaySequence {
    pub fn expanded_steps(&self) -> Vec<ReplayStep> {
        let mut input = InputState::new();
        let mut out = Vec::new();
        for frame in &self.frames {
            if frame.repeat == 0 {
                log::warn!("Replay frame with repeat 0 treated as 1");
            }
            for i in 0..frame.repeat.max(1) {
                input.set_key(Key::Left, frame.left);
                input.set_key(Key::Right, frame.right);
                input.set_key(Key::Space, frame.jump);
                let first = i == 0;
                out.push(ReplayStep {
                    input: input.snapshot(),
                    fires_lit: if first { frame.fires_lit } else { None },
                    fire: if first { frame.fire } else { None },
                    restart: first && frame.restart,
                });
                input.end_frame();
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}
