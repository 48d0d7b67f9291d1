//! Sprite-sheet slicing into frame sets.
//!
//! Sheets are horizontal strips of equally sized cells. Each cell is scaled 2x
//! with nearest-neighbour sampling so pixel art stays crisp and the derived
//! masks stay exact. Directional sheets produce a `_right` set as authored and
//! a mirrored `_left` set.

use std::fs;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::animation::{Frame, FrameSets};
use crate::geometry::Mask;

/// Source x of the terrain tile used for plain blocks.
const TERRAIN_BLOCK_X: u32 = 96;

pub fn load_image(path: &Path) -> Result<RgbaImage, String> {
    let image = image::open(path)
        .map_err(|e| format!("Failed to load image {}: {e}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Cut a strip into `width` x `height` cells, left to right. Trailing partial
/// cells are ignored.
pub fn slice_sheet(sheet: &RgbaImage, width: u32, height: u32) -> Vec<RgbaImage> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    (0..sheet.width() / width)
        .map(|i| imageops::crop_imm(sheet, i * width, 0, width, height).to_image())
        .collect()
}

pub fn scale2x(image: &RgbaImage) -> RgbaImage {
    imageops::resize(
        image,
        image.width() * 2,
        image.height() * 2,
        FilterType::Nearest,
    )
}

pub fn frames_from_images(set_name: &str, images: &[RgbaImage]) -> Vec<Frame> {
    images
        .iter()
        .enumerate()
        .map(|(i, image)| Frame::new(format!("{set_name}#{i}"), Mask::from_rgba(image)))
        .collect()
}

/// Add one sheet's frames to `sets` under `name`, or under `name_right` and
/// `name_left` when `directional`.
pub fn insert_sheet(
    sets: &mut FrameSets,
    name: &str,
    sheet: &RgbaImage,
    width: u32,
    height: u32,
    directional: bool,
) {
    let cells: Vec<RgbaImage> = slice_sheet(sheet, width, height)
        .iter()
        .map(scale2x)
        .collect();

    if directional {
        let right_name = format!("{name}_right");
        let left_name = format!("{name}_left");
        let mirrored: Vec<RgbaImage> = cells.iter().map(imageops::flip_horizontal).collect();
        sets.insert(right_name.clone(), frames_from_images(&right_name, &cells));
        sets.insert(left_name.clone(), frames_from_images(&left_name, &mirrored));
    } else {
        sets.insert(name, frames_from_images(name, &cells));
    }
}

/// Load every PNG in `dir` as a sheet named after its file stem.
pub fn load_sprite_sheets(
    dir: &Path,
    width: u32,
    height: u32,
    directional: bool,
) -> Result<FrameSets, String> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read sprite directory {}: {e}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| format!("Failed to read sprite directory {}: {e}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "png") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sets = FrameSets::new();
    for path in &paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let sheet = load_image(path)?;
        insert_sheet(&mut sets, name, &sheet, width, height, directional);
        log::debug!("Loaded sprite sheet '{}' from {}", name, path.display());
    }

    if sets.is_empty() {
        return Err(format!("No sprite sheets found in {}", dir.display()));
    }
    Ok(sets)
}

/// Build a `size` x `size` block frame from the terrain sheet: the tile is
/// cut at its native size, doubled, and the top-left `size` square is kept.
pub fn terrain_block(terrain: &RgbaImage, size: u32) -> Frame {
    let tile = imageops::crop_imm(terrain, TERRAIN_BLOCK_X, 0, size, size).to_image();
    let scaled = scale2x(&tile);
    let visible = imageops::crop_imm(&scaled, 0, 0, size, size).to_image();
    Frame::new("block", Mask::from_rgba(&visible))
}
