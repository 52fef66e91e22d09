//! Per-frame logical input resource.
//!
//! The simulation never talks to a keyboard. A host polls its devices through
//! an [`InputSource`] (or builds an [`InputSnapshot`] directly) and the
//! registry folds the snapshot into the [`InputState`] resource before the
//! systems run.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// The four logical directions the movement system understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction name, case-insensitively.
    pub fn parse(name: &str) -> Option<Direction> {
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Pressed state of every direction for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    pub fn pressed(directions: &[Direction]) -> Self {
        let mut snapshot = Self::default();
        for &direction in directions {
            snapshot.set(direction, true);
        }
        snapshot
    }

    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_down(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Anything that can report whether a logical direction is held.
pub trait InputSource {
    fn is_down(&self, direction: Direction) -> bool;

    fn snapshot(&self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();
        for direction in Direction::ALL {
            snapshot.set(direction, self.is_down(direction));
        }
        snapshot
    }
}

impl InputSource for InputSnapshot {
    fn is_down(&self, direction: Direction) -> bool {
        InputSnapshot::is_down(self, direction)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state with edge detection.
pub struct BoolState {
    /// Whether the direction is held this frame.
    pub active: bool,
    /// Whether the direction went down this frame.
    pub just_pressed: bool,
    /// Whether the direction went up this frame.
    pub just_released: bool,
}

impl BoolState {
    fn update(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.active;
        self.just_released = !pressed && self.active;
        self.active = pressed;
    }
}

/// Resource capturing the per-frame state of the logical directions.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
}

impl InputState {
    /// Fold a new snapshot in, updating the pressed/released edges.
    pub fn apply(&mut self, snapshot: InputSnapshot) {
        self.up.update(snapshot.up);
        self.down.update(snapshot.down);
        self.left.update(snapshot.left);
        self.right.update(snapshot.right);
    }

    pub fn get(&self, direction: Direction) -> &BoolState {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        for direction in Direction::ALL {
            let state = input.get(direction);
            assert!(!state.active);
            assert!(!state.just_pressed);
            assert!(!state.just_released);
        }
    }

    #[test]
    fn test_apply_tracks_edges() {
        let mut input = InputState::default();
        input.apply(InputSnapshot::pressed(&[Direction::Left]));
        assert!(input.left.active);
        assert!(input.left.just_pressed);

        input.apply(InputSnapshot::pressed(&[Direction::Left]));
        assert!(input.left.active);
        assert!(!input.left.just_pressed);

        input.apply(InputSnapshot::default());
        assert!(!input.left.active);
        assert!(input.left.just_released);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("UP"), Some(Direction::Up));
        assert_eq!(Direction::parse("right"), Some(Direction::Right));
        assert_eq!(Direction::parse("jump"), None);
    }

    struct HeldRight;

    impl InputSource for HeldRight {
        fn is_down(&self, direction: Direction) -> bool {
            direction == Direction::Right
        }
    }

    #[test]
    fn test_source_snapshot() {
        let snapshot = HeldRight.snapshot();
        assert!(snapshot.right);
        assert!(!snapshot.left && !snapshot.up && !snapshot.down);
    }
}
