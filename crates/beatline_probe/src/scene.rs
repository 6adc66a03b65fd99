// SPDX-License-Identifier: MIT OR Apache-2.0
//! Probe scene description.
//!
//! A scene bundles what a beatmap loader would hand to the playback core:
//! timeline settings, raw timing records, and the transformations of each
//! sprite. Scenes are written in RON.

use beatline_animation::Transformation;
use beatline_timing::{ConfigError, TimingConfig, TimingRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default frame step, roughly 60 frames per second
const DEFAULT_FRAME_STEP_MS: i64 = 16;

/// Scene loading errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// File could not be read
    #[error("Failed to read scene {path:?}: {source}")]
    Io {
        /// Scene path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// RON parse failure
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Timeline settings rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Frame step would never advance playback
    #[error("Frame step must be positive, got {0}")]
    InvalidFrameStep(i64),
}

/// A named sprite and the transformations applied to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteTrack {
    /// Sprite name, used in logs
    pub name: String,
    /// Transformations, in any order
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

/// A slider whose duration is reported when playback reaches it
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SliderProbe {
    /// Slider start time in milliseconds
    pub time: i64,
    /// Slider length in osu!pixels
    pub pixel_length: f64,
}

/// Everything the probe plays back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Timeline settings
    #[serde(default)]
    pub timing: TimingConfig,
    /// Raw tempo declarations, in time order
    #[serde(default)]
    pub timing_points: Vec<TimingRecord>,
    /// Animated sprites
    #[serde(default)]
    pub sprites: Vec<SpriteTrack>,
    /// Sliders to measure
    #[serde(default)]
    pub sliders: Vec<SliderProbe>,
    /// Playback time advanced per frame
    #[serde(default = "default_frame_step")]
    pub frame_step_ms: i64,
    /// Playback stops once this time is reached
    pub end_time_ms: i64,
}

fn default_frame_step() -> i64 {
    DEFAULT_FRAME_STEP_MS
}

impl Scene {
    /// Parse and validate a scene from RON text
    pub fn from_ron(text: &str) -> Result<Self, SceneError> {
        let scene: Scene = ron::from_str(text)?;
        scene.timing.validate()?;
        if scene.frame_step_ms <= 0 {
            return Err(SceneError::InvalidFrameStep(scene.frame_step_ms));
        }
        Ok(scene)
    }

    /// Load a scene file
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Total number of transformations across all sprites
    pub fn transformation_count(&self) -> usize {
        self.sprites.iter().map(|s| s.transformations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"(
        timing: (slider_multiplier: 1.4),
        timing_points: [
            (time: 0, bpm: 500.0),
            (time: 4000, bpm: -50.0, kiai: true),
        ],
        sprites: [
            (
                name: "bg",
                transformations: [
                    (values: Single(property: Fade, start: 0.0, end: 1.0), easing: Some(3), start_time: 0.0, end_time: 1000.0),
                ],
            ),
        ],
        sliders: [(time: 4500, pixel_length: 140.0)],
        end_time_ms: 5000,
    )"#;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_ron(SCENE).unwrap();
        assert_eq!(scene.timing.slider_multiplier, 1.4);
        assert_eq!(scene.timing_points.len(), 2);
        assert!(scene.timing_points[1].kiai);
        assert!(scene.timing_points[1].is_relative());
        assert_eq!(scene.timing_points[0].sample_volume, 100.0);
        assert_eq!(scene.frame_step_ms, 16);
        assert_eq!(scene.transformation_count(), 1);
    }

    #[test]
    fn test_demo_scene_parses() {
        let scene = Scene::from_ron(include_str!("../scenes/demo.ron")).unwrap();
        assert_eq!(scene.timing_points.len(), 3);
        assert_eq!(scene.transformation_count(), 4);
    }

    #[test]
    fn test_rejects_zero_frame_step() {
        let text = "(frame_step_ms: 0, end_time_ms: 10)";
        assert!(matches!(Scene::from_ron(text), Err(SceneError::InvalidFrameStep(0))));
    }

    #[test]
    fn test_rejects_invalid_transformation() {
        let text = r#"(
            sprites: [(name: "x", transformations: [
                (values: Flag(property: Additive), easing: None, start_time: 5.0, end_time: 1.0),
            ])],
            end_time_ms: 10,
        )"#;
        assert!(matches!(Scene::from_ron(text), Err(SceneError::Parse(_))));
    }
}
