// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timing point definitions.

use serde::{Deserialize, Serialize};

/// A resolved tempo change on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingPoint {
    /// Position on the timeline in milliseconds
    pub time: i64,
    /// Anchor tempo in force when this point was resolved
    pub base_bpm: f64,
    /// Effective tempo of this point
    pub bpm: f64,
    /// Sample set identifier
    pub sample_set: i32,
    /// Custom sample index
    pub sample_index: i32,
    /// Sample volume
    pub sample_volume: f64,
    /// Kiai section flag, passed through untouched
    pub kiai: bool,
    /// Declared relative to the anchor tempo rather than absolutely
    pub inherited: bool,
}

impl TimingPoint {
    /// Effective tempo relative to the anchor tempo
    pub fn ratio(&self) -> f64 {
        self.bpm / self.base_bpm
    }
}

/// Raw tempo declaration as it comes out of a beatmap.
///
/// A positive `bpm` is absolute. Zero or negative declares a tempo relative
/// to the last absolute one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    /// Position on the timeline in milliseconds
    pub time: i64,
    /// Signed tempo declaration
    pub bpm: f64,
    /// Sample set identifier
    #[serde(default)]
    pub sample_set: i32,
    /// Custom sample index
    #[serde(default)]
    pub sample_index: i32,
    /// Sample volume
    #[serde(default = "default_volume")]
    pub sample_volume: f64,
    /// Kiai section flag
    #[serde(default)]
    pub kiai: bool,
}

fn default_volume() -> f64 {
    100.0
}

impl TimingRecord {
    /// Create an absolute record with default samples
    pub fn absolute(time: i64, bpm: f64) -> Self {
        Self {
            time,
            bpm,
            sample_set: 0,
            sample_index: 0,
            sample_volume: default_volume(),
            kiai: false,
        }
    }

    /// Whether this record declares a relative tempo
    pub fn is_relative(&self) -> bool {
        self.bpm <= 0.0
    }
}
