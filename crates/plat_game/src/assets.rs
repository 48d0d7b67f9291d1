//! Frame sets the world is built from.
//!
//! Either loaded from an asset directory laid out as
//! `MainCharacters/MaskDude/*.png`, `Traps/Fire/*.png` and
//! `Terrain/Terrain.png`, or generated as solid placeholder frames so the
//! simulation can run headless with box-shaped masks.

use std::path::Path;
use std::sync::Arc;

use plat_core::animation::{Frame, FrameSets};
use plat_core::sheet::{load_image, load_sprite_sheets, terrain_block};

use crate::objects::{FIRE_OFF, FIRE_ON};
use crate::player::{Direction, PlayerAnim};

const PLAYER_CELL: u32 = 32;
const FIRE_CELL_W: u32 = 16;
const FIRE_CELL_H: u32 = 32;

#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Arc<FrameSets>,
    /// `None` means each fire gets placeholder frames of its placed size.
    pub fire: Option<Arc<FrameSets>>,
    pub block: Arc<Frame>,
}

impl Assets {
    pub fn placeholder(player_width: u32, player_height: u32, block_size: u32) -> Self {
        let mut player = FrameSets::new();
        for anim in PlayerAnim::ALL {
            for dir in Direction::ALL {
                let name = anim.set_name(dir);
                let frame = Frame::solid(format!("{name}#0"), player_width, player_height);
                player.insert(name, vec![frame]);
            }
        }
        Self {
            player: Arc::new(player),
            fire: None,
            block: Arc::new(Frame::solid("block", block_size, block_size)),
        }
    }

    pub fn load(root: &Path, block_size: u32) -> Result<Self, String> {
        let player = load_sprite_sheets(
            &root.join("MainCharacters").join("MaskDude"),
            PLAYER_CELL,
            PLAYER_CELL,
            true,
        )?;
        let fire = load_sprite_sheets(&root.join("Traps").join("Fire"), FIRE_CELL_W, FIRE_CELL_H, false)?;
        let terrain = load_image(&root.join("Terrain").join("Terrain.png"))?;
        let block = terrain_block(&terrain, block_size);

        log::info!(
            "Loaded assets from {}: player sets [{}], fire sets [{}]",
            root.display(),
            player.names().join(", "),
            fire.names().join(", ")
        );
        Ok(Self {
            player: Arc::new(player),
            fire: Some(Arc::new(fire)),
            block: Arc::new(block),
        })
    }

    pub fn fire_sheets(&self, width: u32, height: u32) -> Arc<FrameSets> {
        if let Some(fire) = &self.fire {
            return fire.clone();
        }
        let mut sets = FrameSets::new();
        for name in [FIRE_ON, FIRE_OFF] {
            sets.insert(name, vec![Frame::solid(format!("{name}#0"), width, height)]);
        }
        Arc::new(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_covers_every_player_set() {
        let assets = Assets::placeholder(50, 50, 96);
        for anim in PlayerAnim::ALL {
            for dir in Direction::ALL {
                let frames = assets
                    .player
                    .get(&anim.set_name(dir))
                    .expect("placeholder set exists");
                assert_eq!(frames[0].width(), 50);
            }
        }
        assert_eq!(assets.block.width(), 96);
    }

    #[test]
    fn placeholder_fire_matches_requested_size() {
        let assets = Assets::placeholder(50, 50, 96);
        let fire = assets.fire_sheets(16, 32);
        fire.require([FIRE_ON, FIRE_OFF]).expect("both fire sets");
        assert_eq!(fire.get(FIRE_ON).expect("on")[0].height(), 32);
    }

    #[test]
    fn load_from_missing_root_fails() {
        let root = std::env::temp_dir().join(format!("plat_assets_missing_{}", std::process::id()));
        let err = Assets::load(&root, 96).expect_err("missing assets should fail");
        assert!(err.contains("MaskDude"));
    }
}
