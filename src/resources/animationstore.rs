//! Animation resource registry.
//!
//! The host's asset loader decodes textures and hands the simulation only an
//! opaque `asset_id` plus the grid metadata of each sprite sheet. Those
//! definitions live in the [`AnimationStore`], keyed by name, and are copied
//! into [`Animation`](crate::components::animation::Animation) components when
//! entities are built.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// One cell of a sprite-sheet grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCell {
    pub column: u32,
    pub row: u32,
}

impl SheetCell {
    pub const ORIGIN: SheetCell = SheetCell { column: 0, row: 0 };

    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Immutable description of a sprite-sheet animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    /// Texture handle from the host's asset loader.
    pub asset_id: u32,
    pub columns: u32,
    pub rows: u32,
    /// Frames actually used in each row. Rows missing from the list (or an
    /// empty list) use every column.
    #[serde(default)]
    pub frame_counts: Vec<u32>,
    /// Seconds each cell stays on screen.
    pub frame_duration: f32,
    /// Size of the drawn quad in world units.
    pub width: f32,
    pub height: f32,
    /// Non-looping sheets hold their last cell once reached.
    #[serde(default = "default_looped")]
    pub looped: bool,
}

fn default_looped() -> bool {
    true
}

impl SpriteSheet {
    pub fn new(asset_id: u32, columns: u32, rows: u32, frame_duration: f32) -> Self {
        Self {
            asset_id,
            columns: columns.max(1),
            rows: rows.max(1),
            frame_counts: Vec::new(),
            frame_duration,
            width: 1.0,
            height: 1.0,
            looped: true,
        }
    }

    pub fn with_frame_counts(mut self, counts: Vec<u32>) -> Self {
        self.frame_counts = counts;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn once(mut self) -> Self {
        self.looped = false;
        self
    }

    /// Number of frames in `row`, never more than `columns` and never zero.
    pub fn frames_in_row(&self, row: u32) -> u32 {
        let columns = self.columns.max(1);
        match self.frame_counts.get(row as usize) {
            Some(&count) if count > 0 => count.min(columns),
            _ => columns,
        }
    }

    pub fn total_frames(&self) -> u32 {
        (0..self.rows.max(1)).map(|row| self.frames_in_row(row)).sum()
    }

    /// Cell following `cell`: next column, then next row, then back to the
    /// origin. Returns `None` when a non-looping sheet is already on its last
    /// cell.
    pub fn next_cell(&self, cell: SheetCell) -> Option<SheetCell> {
        if cell.column + 1 < self.frames_in_row(cell.row) {
            return Some(SheetCell::new(cell.column + 1, cell.row));
        }
        if cell.row + 1 < self.rows.max(1) {
            return Some(SheetCell::new(0, cell.row + 1));
        }
        if self.looped {
            Some(SheetCell::ORIGIN)
        } else {
            None
        }
    }
}

/// Central registry of reusable sprite sheets keyed by name.
#[derive(Resource, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, SpriteSheet>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, sheet: SpriteSheet) {
        self.animations.insert(name.into(), sheet);
    }

    pub fn get(&self, name: &str) -> Option<&SpriteSheet> {
        self.animations.get(name)
    }

    /// Look up a sheet, failing with [`SimError::UnknownAnimationAsset`].
    pub fn require(&self, name: &str) -> SimResult<&SpriteSheet> {
        self.get(name)
            .ok_or_else(|| SimError::UnknownAnimationAsset(name.to_string()))
    }

    /// Load sheet definitions from a JSON object of `name -> sheet`.
    pub fn load_from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let animations: FxHashMap<String, SpriteSheet> = serde_json::from_str(&content)?;
        info!(
            "Loaded {} animation definitions from {}",
            animations.len(),
            path.as_ref().display()
        );
        Ok(Self { animations })
    }
}
