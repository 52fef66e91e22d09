//! Sprite-sheet animation playback state.
//!
//! An [`Animation`] owns the sheets it may play (copied from the
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore)), the
//! name of the active one, the current cell cursor and the time spent on that
//! cell. The [`animation_system`](crate::systems::animation::animation_system)
//! advances it and emits the draw request.

use bevy_ecs::prelude::Component;
use log::warn;
use rustc_hash::FxHashMap;

use crate::error::{SimError, SimResult};
use crate::resources::animationstore::{AnimationStore, SheetCell, SpriteSheet};

#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub clips: FxHashMap<String, SpriteSheet>,
    pub animation_key: String,
    pub cell: SheetCell,
    /// Seconds since the cursor last moved.
    pub elapsed_time: f32,
    /// Set when a non-looping sheet reached its last cell.
    pub finished: bool,
    pub active: bool,
}

impl Animation {
    /// Create an animation playing `sheet` under `key`.
    pub fn new(key: impl Into<String>, sheet: SpriteSheet) -> Self {
        let key = key.into();
        let mut clips = FxHashMap::default();
        clips.insert(key.clone(), sheet);
        Self {
            clips,
            animation_key: key,
            cell: SheetCell::ORIGIN,
            elapsed_time: 0.0,
            finished: false,
            active: true,
        }
    }

    /// Build an animation from named sheets of the store. The first name is
    /// played initially.
    pub fn from_store<S: AsRef<str>>(store: &AnimationStore, names: &[S]) -> SimResult<Self> {
        let Some((first, rest)) = names.split_first() else {
            return Err(SimError::UnknownAnimationAsset(String::new()));
        };
        let mut animation = Self::new(first.as_ref(), store.require(first.as_ref())?.clone());
        for name in rest {
            let name = name.as_ref();
            animation = animation.with_clip(name, store.require(name)?.clone());
        }
        Ok(animation)
    }

    /// Register another playable sheet without switching to it.
    pub fn with_clip(mut self, key: impl Into<String>, sheet: SpriteSheet) -> Self {
        self.clips.insert(key.into(), sheet);
        self
    }

    pub fn current_sheet(&self) -> Option<&SpriteSheet> {
        self.clips.get(&self.animation_key)
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.animation_key == key
    }

    /// Switch to another registered sheet, restarting from the first cell.
    ///
    /// An unknown key leaves the whole state untouched and returns
    /// [`SimError::UnknownAnimation`].
    pub fn play(&mut self, key: &str) -> SimResult<()> {
        if !self.clips.contains_key(key) {
            warn!("Animation '{}' is not registered, still playing '{}'", key, self.animation_key);
            return Err(SimError::UnknownAnimation(key.to_string()));
        }
        self.animation_key = key.to_string();
        self.cell = SheetCell::ORIGIN;
        self.elapsed_time = 0.0;
        self.finished = false;
        Ok(())
    }

    /// Accumulate `delta` and move the cursor once the frame duration is
    /// exceeded. Returns true if the cursor moved.
    pub fn advance(&mut self, delta: f32) -> bool {
        let Some(sheet) = self.clips.get(&self.animation_key) else {
            return false;
        };
        self.elapsed_time += delta;
        if self.elapsed_time <= sheet.frame_duration {
            return false;
        }
        self.elapsed_time = 0.0;
        match sheet.next_cell(self.cell) {
            Some(next) => {
                self.cell = next;
                true
            }
            None => {
                self.finished = true;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(columns: u32, rows: u32, duration: f32) -> SpriteSheet {
        SpriteSheet::new(7, columns, rows, duration)
    }

    #[test]
    fn test_new_starts_at_origin() {
        let anim = Animation::new("idle", sheet(2, 2, 0.5));
        assert!(anim.is_playing("idle"));
        assert_eq!(anim.cell, SheetCell::ORIGIN);
        assert_eq!(anim.elapsed_time, 0.0);
        assert!(anim.current_sheet().is_some());
    }

    #[test]
    fn test_advance_waits_for_frame_duration() {
        let mut anim = Animation::new("idle", sheet(2, 2, 0.5));
        assert!(!anim.advance(0.25));
        assert!(!anim.advance(0.25)); // exactly the duration is not enough
        assert!(anim.advance(0.01));
        assert_eq!(anim.cell, SheetCell::new(1, 0));
        assert_eq!(anim.elapsed_time, 0.0);
    }

    #[test]
    fn test_play_resets_cursor_and_timer() {
        let mut anim = Animation::new("idle", sheet(2, 2, 0.1)).with_clip("walk", sheet(3, 1, 0.1));
        anim.advance(0.2);
        anim.elapsed_time = 0.05;
        assert!(anim.play("walk").is_ok());
        assert!(anim.is_playing("walk"));
        assert_eq!(anim.cell, SheetCell::ORIGIN);
        assert_eq!(anim.elapsed_time, 0.0);
    }

    #[test]
    fn test_play_unknown_keeps_state() {
        let mut anim = Animation::new("idle", sheet(2, 2, 0.1));
        anim.advance(0.2);
        anim.elapsed_time = 0.05;
        let before = (anim.animation_key.clone(), anim.cell, anim.elapsed_time);

        let result = anim.play("fly");
        assert!(matches!(result, Err(SimError::UnknownAnimation(ref name)) if name == "fly"));
        assert_eq!((anim.animation_key.clone(), anim.cell, anim.elapsed_time), before);
    }

    #[test]
    fn test_non_looping_finishes_on_last_cell() {
        let mut anim = Animation::new("die", sheet(2, 1, 0.1).once());
        assert!(anim.advance(0.2));
        assert!(!anim.advance(0.2));
        assert_eq!(anim.cell, SheetCell::new(1, 0));
        assert!(anim.finished);
    }

    #[test]
    fn test_from_store() {
        let mut store = AnimationStore::new();
        store.insert("idle", sheet(2, 1, 0.1));
        store.insert("run", sheet(4, 1, 0.05));
        let anim = Animation::from_store(&store, &["idle", "run"]).unwrap();
        assert!(anim.is_playing("idle"));
        assert_eq!(anim.clips.len(), 2);

        let missing = Animation::from_store(&store, &["idle", "swim"]);
        assert!(matches!(missing, Err(SimError::UnknownAnimationAsset(ref name)) if name == "swim"));
    }
}
