//! Static and hazard world objects.
//!
//! Objects never move on their own. Blocks show one fixed frame; fire cycles
//! through its active frame set every step and can be switched between "on"
//! and "off" from outside. Each object carries an optional semantic name, only
//! used to classify hazards.

use std::sync::Arc;

use plat_core::animation::{AnimationCursor, Frame, FrameSets};

use crate::sprite::Sprite;

pub const FIRE_ON: &str = "on";
pub const FIRE_OFF: &str = "off";

#[derive(Debug, Clone)]
pub struct Block {
    pub sprite: Sprite,
    pub name: Option<String>,
}

impl Block {
    pub fn new(x: i32, y: i32, frame: Arc<Frame>) -> Self {
        Self {
            sprite: Sprite::new(x, y, frame),
            name: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fire {
    pub sprite: Sprite,
    pub name: Option<String>,
    pub animation: AnimationCursor,
    active: &'static str,
    sheets: Arc<FrameSets>,
}

impl Fire {
    /// Starts in the "off" set. Fails if either set is missing.
    pub fn new(
        x: i32,
        y: i32,
        name: impl Into<String>,
        sheets: Arc<FrameSets>,
        delay: u32,
    ) -> Result<Self, String> {
        sheets.require([FIRE_ON, FIRE_OFF])?;
        let first = sheets
            .get(FIRE_OFF)
            .and_then(|frames| frames.first())
            .cloned()
            .ok_or_else(|| "Fire frame set 'off' has no frames".to_string())?;
        Ok(Self {
            sprite: Sprite::new(x, y, first),
            name: Some(name.into()),
            animation: AnimationCursor::new(delay),
            active: FIRE_OFF,
            sheets,
        })
    }

    /// Switching sets does not reset the animation cursor.
    pub fn on(&mut self) {
        self.active = FIRE_ON;
    }

    pub fn off(&mut self) {
        self.active = FIRE_OFF;
    }

    pub fn is_on(&self) -> bool {
        self.active == FIRE_ON
    }

    /// Advance one animation step and show the matching frame.
    pub fn step(&mut self) {
        let Some(frames) = self.sheets.get(self.active) else {
            log::error!("Fire frame set '{}' vanished after validation", self.active);
            return;
        };
        let frame = frames[self.animation.index_for(frames.len())].clone();
        self.animation.advance();
        self.sprite.set_frame(frame);

        if self.animation.cycles_past(frames.len()) {
            self.animation.reset();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Block(Block),
    Fire(Fire),
}

impl Object {
    pub fn sprite(&self) -> &Sprite {
        match self {
            Self::Block(block) => &block.sprite,
            Self::Fire(fire) => &fire.sprite,
        }
    }

    /// Semantic name for hazard classification.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Block(block) => block.name.as_deref(),
            Self::Fire(fire) => fire.name.as_deref(),
        }
    }

    pub fn step(&mut self) {
        if let Self::Fire(fire) = self {
            fire.step();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::collision::probe;
    use crate::player::tests::test_player;
    use plat_core::geometry::Mask;

    pub(crate) fn fire_sheets(width: u32, height: u32) -> Arc<FrameSets> {
        let mut sets = FrameSets::new();
        for name in [FIRE_ON, FIRE_OFF] {
            let frames = (0..4)
                .map(|i| Frame::solid(format!("{name}#{i}"), width, height))
                .collect();
            sets.insert(name, frames);
        }
        Arc::new(sets)
    }

    #[test]
    fn fire_requires_both_sets() {
        let mut sets = FrameSets::new();
        sets.insert(FIRE_ON, vec![Frame::solid("on", 16, 32)]);
        let err = Fire::new(0, 0, "fire", Arc::new(sets), 3).expect_err("missing off set");
        assert!(err.contains("'off'"));
    }

    #[test]
    fn fire_starts_off_and_toggles_without_cursor_reset() {
        let mut fire = Fire::new(0, 0, "fire", fire_sheets(16, 32), 3).expect("valid fire");
        assert!(!fire.is_on());
        fire.step();
        fire.step();
        assert_eq!(fire.animation.tick, 2);
        fire.on();
        assert!(fire.is_on());
        assert_eq!(fire.animation.tick, 2);
        fire.step();
        assert_eq!(fire.sprite.frame().id, "on#0");
        fire.off();
        assert!(!fire.is_on());
    }

    #[test]
    fn fire_cursor_resets_one_frame_past_the_cycle() {
        let mut fire = Fire::new(0, 0, "fire", fire_sheets(16, 32), 3).expect("valid fire");
        fire.on();
        let mut ids = Vec::new();
        for _ in 0..16 {
            fire.step();
            ids.push(fire.sprite.frame().id.clone());
        }
        // Ticks 0..=14 are shown (index wraps at 12), then the reset fires once
        // the cursor reaches 15 (15 / 3 = 5 > 4).
        assert_eq!(ids[11], "on#3");
        assert_eq!(ids[12], "on#0");
        assert_eq!(ids[14], "on#0");
        assert_eq!(ids[15], "on#0");
        assert_eq!(fire.animation.tick, 1);
    }

    #[test]
    fn fire_keeps_position_while_animating() {
        let mut fire = Fire::new(40, 60, "fire", fire_sheets(16, 32), 3).expect("valid fire");
        for _ in 0..10 {
            fire.step();
        }
        assert_eq!(fire.sprite.rect.x, 40);
        assert_eq!(fire.sprite.rect.y, 60);
        assert_eq!(fire.sprite.rect.width, 16);
    }

    #[test]
    fn names_come_from_construction() {
        let block = Object::Block(Block::new(0, 0, Arc::new(Frame::solid("block", 96, 96))));
        let fire = Object::Fire(Fire::new(0, 0, "fire", fire_sheets(16, 32), 3).expect("valid fire"));
        let lava = Object::Fire(Fire::new(0, 0, "lava", fire_sheets(16, 32), 3).expect("valid fire"));
        assert_eq!(block.name(), None);
        assert_eq!(fire.name(), Some("fire"));
        assert_eq!(lava.name(), Some("lava"));
    }

    #[test]
    fn fire_footprint_follows_the_shown_frame() {
        // Frame 0 is fully opaque; frame 1 only in its right half.
        let mut right_half = Mask::empty(16, 32);
        for y in 0..32 {
            for x in 8..16 {
                right_half.set(x, y, true);
            }
        }
        let mut sets = FrameSets::new();
        sets.insert(
            FIRE_ON,
            vec![Frame::solid("on#0", 16, 32), Frame::new("on#1", right_half)],
        );
        sets.insert(FIRE_OFF, vec![Frame::solid("off#0", 16, 32)]);

        let mut fire = Fire::new(100, 100, "fire", Arc::new(sets), 1).expect("valid fire");
        fire.on();
        let mut objects = vec![Object::Fire(fire)];
        // Right edge at 90; a 15px look-ahead reaches fire pixels 100..105.
        let mut player = test_player(40, 90);

        objects[0].step();
        assert_eq!(objects[0].sprite().frame().id, "on#0");
        assert!(probe(&mut player, &objects, 15).is_some());

        objects[0].step();
        assert_eq!(objects[0].sprite().frame().id, "on#1");
        assert!(probe(&mut player, &objects, 15).is_none());
        // Reaching into the opaque half still hits.
        assert!(probe(&mut player, &objects, 20).is_some());
    }
}
