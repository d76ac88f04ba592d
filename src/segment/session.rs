use serde::{Deserialize, Serialize};

use crate::model::{LabelVolume, Seed};

use super::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Clicks are ignored.
    #[default]
    Idle,
    /// Clicks append seeds for the region being defined.
    CollectingSeeds,
}

/// A committed region. `mask` holds `label` on member voxels and `0` elsewhere.
#[derive(Debug, Clone)]
pub struct Region {
    pub label: u16,
    pub seeds: Vec<Seed>,
    pub mask: LabelVolume,
    pub voxel_count: usize,
}

/// Mutable state of one viewing session.
///
/// `regions`, `colors` and `next_label - 1` always have the same length, and
/// `cursor` always addresses an existing slice.
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: Mode,
    pub cursor: usize,
    pub seeds: Vec<Seed>,
    pub regions: Vec<Region>,
    pub colors: Vec<Rgb>,
    pub next_label: u16,
}

impl Session {
    pub fn new(depth: usize) -> Self {
        Self {
            mode: Mode::Idle,
            cursor: depth / 2,
            seeds: Vec::new(),
            regions: Vec::new(),
            colors: Vec::new(),
            next_label: 1,
        }
    }

    pub fn drawing_enabled(&self) -> bool {
        self.mode == Mode::CollectingSeeds
    }

    /// Pending seeds lying on slice `z`.
    pub fn seeds_on_slice(&self, z: usize) -> Vec<Seed> {
        self.seeds.iter().copied().filter(|seed| seed.z == z).collect()
    }
}
