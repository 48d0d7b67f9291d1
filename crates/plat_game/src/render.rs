//! Rendering contract: what to draw, where, and in which order.
//!
//! The simulation never touches pixels. It hands the presentation layer an
//! ordered list of frame handles at screen positions: background tiles first,
//! then objects, then the player. World positions are shifted by the camera
//! offset; background tiles are screen-fixed.

use glam::IVec2;

use crate::level::BackgroundTile;
use crate::world::World;

pub const BACKGROUND_FRAME: &str = "background";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrawLayer {
    Background,
    Object,
    Player,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand<'a> {
    pub layer: DrawLayer,
    pub frame_id: &'a str,
    pub position: IVec2,
}

/// Tile origins covering the viewport, with one extra row and column so a
/// partial tile fills the edge.
pub fn background_tiles(tile: BackgroundTile, viewport_width: i32, viewport_height: i32) -> Vec<IVec2> {
    let columns = viewport_width / tile.width + 1;
    let rows = viewport_height / tile.height + 1;
    let mut tiles = Vec::with_capacity((columns * rows) as usize);
    for i in 0..columns {
        for j in 0..rows {
            tiles.push(IVec2::new(i * tile.width, j * tile.height));
        }
    }
    tiles
}

pub fn build_draw_list<'a>(world: &'a World, tiles: &[IVec2]) -> Vec<DrawCommand<'a>> {
    let camera = &world.camera;
    let mut commands = Vec::with_capacity(tiles.len() + world.objects.len() + 1);

    commands.extend(tiles.iter().map(|&position| DrawCommand {
        layer: DrawLayer::Background,
        frame_id: BACKGROUND_FRAME,
        position,
    }));

    for object in &world.objects {
        let sprite = object.sprite();
        commands.push(DrawCommand {
            layer: DrawLayer::Object,
            frame_id: &sprite.frame().id,
            position: IVec2::new(camera.to_screen_x(sprite.rect.x), sprite.rect.y),
        });
    }

    commands.push(DrawCommand {
        layer: DrawLayer::Player,
        frame_id: &world.player.sprite.frame().id,
        position: IVec2::new(
            camera.to_screen_x(world.player.rect().x),
            world.player.rect().y,
        ),
    });
    commands
}
