//! Level description: where the player starts and which objects exist.
//!
//! Levels are JSON. Blocks are square and take their size from the simulation
//! config; a `floor` run is shorthand for a row of blocks along the bottom of
//! the viewport, indexed in block units so it can extend off-screen on both
//! sides.

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    #[serde(default)]
    pub viewport: Option<LevelViewport>,
    pub player: PlayerStart,
    #[serde(default)]
    pub blocks: Vec<BlockPlacement>,
    #[serde(default)]
    pub floor: Option<FloorRun>,
    #[serde(default)]
    pub fires: Vec<FirePlacement>,
    #[serde(default)]
    pub background: BackgroundTile,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LevelViewport {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PlayerStart {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_player_size")]
    pub width: i32,
    #[serde(default = "default_player_size")]
    pub height: i32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BlockPlacement {
    pub x: i32,
    pub y: i32,
}

/// Blocks at `i * block_size` for `i` in `from..to`.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FloorRun {
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FirePlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_fire_width")]
    pub width: i32,
    #[serde(default = "default_fire_height")]
    pub height: i32,
    #[serde(default)]
    pub lit: bool,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BackgroundTile {
    pub width: i32,
    pub height: i32,
}

impl Default for BackgroundTile {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
        }
    }
}

impl LevelFile {
    /// Top-left corners of every block, explicit ones first, then the floor.
    pub fn block_positions(&self, block_size: i32, viewport_height: i32) -> Vec<(i32, i32)> {
        let mut positions: Vec<(i32, i32)> = self.blocks.iter().map(|b| (b.x, b.y)).collect();
        if let Some(floor) = self.floor {
            let y = viewport_height - block_size;
            positions.extend((floor.from..floor.to).map(|i| (i * block_size, y)));
        }
        positions
    }
}

pub fn load_level_from_path(path: &Path) -> Result<LevelFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read level file {}: {e}", path.display()))?;
    let level: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    validate_level(&level)?;
    Ok(level)
}

fn validate_level(level: &LevelFile) -> Result<(), String> {
    if level.version != "0.1" {
        return Err(format!(
            "Level validation failed: unsupported version '{}'",
            level.version
        ));
    }
    if level.level_id.is_empty() {
        return Err("Level validation failed: level_id is empty".to_string());
    }
    if let Some(viewport) = level.viewport {
        if viewport.width <= 0 || viewport.height <= 0 {
            return Err("Level validation failed: viewport must be > 0 in both axes".to_string());
        }
    }
    if level.player.width <= 0 || level.player.height <= 0 {
        return Err("Level validation failed: player size must be > 0".to_string());
    }
    if let Some(floor) = level.floor {
        if floor.from >= floor.to {
            return Err(format!(
                "Level validation failed: floor run {}..{} is empty",
                floor.from, floor.to
            ));
        }
    }
    for (i, fire) in level.fires.iter().enumerate() {
        if fire.width <= 0 || fire.height <= 0 {
            return Err(format!(
                "Level validation failed: fire {} size must be > 0",
                i
            ));
        }
    }
    if level.background.width <= 0 || level.background.height <= 0 {
        return Err("Level validation failed: background tile size must be > 0".to_string());
    }
    if level.blocks.is_empty() && level.floor.is_none() && level.fires.is_empty() {
        log::warn!(
            "Level '{}' has no objects. This is allowed but the player will fall forever.",
            level.level_id
        );
    }
    Ok(())
}

const fn default_player_size() -> i32 {
    50
}

const fn default_fire_width() -> i32 {
    16
}

const fn default_fire_height() -> i32 {
    32
}
