//! Frame-set animation types and the tick-based animation cursor.
//!
//! A frame set is a named, ordered list of frames (e.g. `"run_left"`). The
//! cursor is a plain step counter: the visible frame is
//! `(tick / delay) % len`, so it wraps forever and never indexes out of range
//! no matter which set it is applied to. All timing is in simulation steps,
//! never wall-clock time, so advancement is deterministic.

use std::collections::HashMap;
use std::sync::Arc;

use crate::geometry::Mask;

/// One visual frame: an opaque handle for the renderer plus its occupancy mask.
/// The frame's size is the mask's size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: String,
    pub mask: Mask,
}

impl Frame {
    pub fn new(id: impl Into<String>, mask: Mask) -> Self {
        Self {
            id: id.into(),
            mask,
        }
    }

    /// Fully opaque placeholder frame.
    pub fn solid(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(id, Mask::solid(width, height))
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }
}

pub type FrameSet = Vec<Arc<Frame>>;

/// Named frame sets handed over by the asset collaborator.
#[derive(Debug, Clone, Default)]
pub struct FrameSets {
    sets: HashMap<String, FrameSet>,
}

impl FrameSets {
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, frames: Vec<Frame>) {
        self.sets
            .insert(name.into(), frames.into_iter().map(Arc::new).collect());
    }

    pub fn get(&self, name: &str) -> Option<&FrameSet> {
        self.sets.get(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Sorted for stable log output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Startup check that every listed set exists and is non-empty.
    pub fn require<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), String> {
        for name in names {
            match self.sets.get(name) {
                None => {
                    return Err(format!(
                        "Frame set validation failed: missing frame set '{}'",
                        name
                    ));
                }
                Some(frames) if frames.is_empty() => {
                    return Err(format!(
                        "Frame set validation failed: frame set '{}' has no frames",
                        name
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Step counter driving frame selection within the active frame set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCursor {
    pub tick: u32,
    pub delay: u32,
}

impl AnimationCursor {
    pub fn new(delay: u32) -> Self {
        Self {
            tick: 0,
            delay: delay.max(1),
        }
    }

    /// Frame index for a set of `len` frames. `len` must be non-zero.
    pub fn index_for(&self, len: usize) -> usize {
        (self.tick / self.delay) as usize % len
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }

    /// True once the cursor has run strictly past `len` frames' worth of
    /// steps. The comparison is `>` rather than `>=`; index wrap already
    /// handles the cycle boundary on its own.
    pub fn cycles_past(&self, len: usize) -> bool {
        (self.tick / self.delay) as usize > len
    }
}
