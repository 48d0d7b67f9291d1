//! Player-vs-world collision queries against pixel masks.
//!
//! Two shapes of query, deliberately asymmetric:
//!
//!  - **Horizontal probe** is a trial move. The player is shifted by `dx`,
//!    tested, and shifted back, so the committed position is never changed.
//!    The controller uses it to decide whether lateral motion is allowed at all.
//!  - **Vertical resolution** runs after gravity has already moved the player.
//!    It corrects the committed position in place: falling snaps the player's
//!    feet onto the object's top, rising snaps the head under its bottom.
//!
//! Objects are scanned in collection order; there is no spatial index.

use crate::objects::Object;
use crate::player::Player;

/// First object hit if the player were shifted by `dx`, or `None`.
/// Player state is identical before and after the call.
pub fn probe<'a>(player: &mut Player, objects: &'a [Object], dx: i32) -> Option<&'a Object> {
    player.move_by(dx, 0);
    let hit = objects
        .iter()
        .find(|object| player.sprite.collides(object.sprite()));
    player.move_by(-dx, 0);
    hit
}

/// Snap the player out of every object it overlaps, using the sign of `dy`
/// to choose landing (`dy > 0`) or head hit (`dy < 0`). Returns every
/// overlapping object so hazards can be checked against all contacts.
pub fn resolve_vertical<'a>(player: &mut Player, objects: &'a [Object], dy: f32) -> Vec<&'a Object> {
    let mut touched = Vec::new();
    for object in objects {
        if !player.sprite.collides(object.sprite()) {
            continue;
        }
        let other = object.sprite().rect;
        if dy > 0.0 {
            player.sprite.rect.set_bottom(other.top());
            player.landed();
            log::trace!("Player landed at y={}", other.top());
        } else if dy < 0.0 {
            player.sprite.rect.set_top(other.bottom());
            player.hit_head();
            log::debug!("Player hit head at y={}", other.bottom());
        }
        touched.push(object);
    }
    touched
}
