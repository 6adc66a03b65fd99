// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless playback loop.
//!
//! Steps playback time by a fixed frame delta, advances the tempo cursor
//! once per frame, and samples every sprite transformation the way a
//! renderer would.

use crate::scene::Scene;
use beatline_animation::{AnimatedValue, TransformationStatus, TransformationType};
use beatline_timing::Timings;

/// One transformation sampled at one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSample {
    /// Sprite name
    pub sprite: String,
    /// Animated attribute
    pub transformation_type: TransformationType,
    /// Where the frame time falls relative to the transformation
    pub status: TransformationStatus,
    /// Value at the frame time
    pub value: AnimatedValue,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbeReport {
    /// Frames stepped
    pub frames: u64,
    /// Timing points consumed by the cursor
    pub tempo_changes: usize,
    /// Sliders measured
    pub sliders_measured: usize,
    /// Tempo under the cursor at the end
    pub final_bpm: f64,
}

/// Playback driver over a scene
pub struct Playback<'a> {
    scene: &'a Scene,
    timings: Timings,
    /// Current playback time in milliseconds
    time_ms: i64,
    frame_count: u64,
    tempo_changes: usize,
    next_slider: usize,
}

impl<'a> Playback<'a> {
    /// Build the timeline for a scene and rewind to the start
    pub fn new(scene: &'a Scene) -> Self {
        let mut timings = Timings::from_records(&scene.timing, &scene.timing_points);
        timings.log_summary();
        timings.reset();
        Self {
            scene,
            timings,
            time_ms: 0,
            frame_count: 0,
            tempo_changes: 0,
            next_slider: 0,
        }
    }

    /// Current playback time
    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }

    /// The timeline being driven
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Process the frame at the current time, then advance.
    ///
    /// Returns false once the end time has been reached.
    pub fn step(&mut self) -> bool {
        if self.time_ms >= self.scene.end_time_ms {
            return false;
        }

        if self.timings.update(self.time_ms) {
            self.tempo_changes += 1;
            if let Some(point) = self.timings.current() {
                tracing::info!(
                    "{}ms: tempo {} (base {}, kiai {})",
                    self.time_ms,
                    point.bpm,
                    point.base_bpm,
                    point.kiai
                );
            }
        }

        self.measure_sliders();

        for sample in self.sample(self.time_ms as f64) {
            tracing::debug!(
                "{}ms: {} {:?} {:?} = {:?}",
                self.time_ms,
                sample.sprite,
                sample.transformation_type,
                sample.status,
                sample.value
            );
        }

        self.frame_count += 1;
        self.time_ms += self.scene.frame_step_ms;
        true
    }

    /// Sample every transformation that has started by `time`
    pub fn sample(&self, time: f64) -> Vec<SpriteSample> {
        let mut samples = Vec::new();
        for sprite in &self.scene.sprites {
            for transformation in &sprite.transformations {
                let status = transformation.status(time);
                if status == TransformationStatus::NotStarted {
                    continue;
                }
                samples.push(SpriteSample {
                    sprite: sprite.name.clone(),
                    transformation_type: transformation.transformation_type(),
                    status,
                    value: transformation.value_at(time),
                });
            }
        }
        samples
    }

    /// Report sliders the playback time has reached
    fn measure_sliders(&mut self) {
        while let Some(slider) = self.scene.sliders.get(self.next_slider) {
            if slider.time > self.time_ms {
                break;
            }
            self.next_slider += 1;

            let streamed = self.timings.slider_time(slider.pixel_length);
            let exact = self.timings.slider_time_at(slider.time, slider.pixel_length);
            tracing::info!(
                "{}ms: slider at {} lasts {}ms",
                self.time_ms,
                slider.time,
                streamed
            );
            if exact != Some(streamed) {
                tracing::warn!(
                    "Slider at {}: streamed duration {}ms differs from lookup {:?}ms, tempo cursor is behind",
                    slider.time,
                    streamed,
                    exact
                );
            }
        }
    }

    /// Step until the end time and summarize
    pub fn run(mut self) -> ProbeReport {
        while self.step() {}
        ProbeReport {
            frames: self.frame_count,
            tempo_changes: self.tempo_changes,
            sliders_measured: self.next_slider,
            final_bpm: self.timings.current_bpm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatline_animation::{Easing, ScalarProperty, Transformation};
    use beatline_timing::{TimingConfig, TimingRecord};
    use crate::scene::{SliderProbe, SpriteTrack};

    fn scene() -> Scene {
        Scene {
            timing: TimingConfig::default(),
            timing_points: vec![
                TimingRecord::absolute(0, 500.0),
                TimingRecord { bpm: -50.0, ..TimingRecord::absolute(100, 0.0) },
            ],
            sprites: vec![SpriteTrack {
                name: "bg".to_string(),
                transformations: vec![Transformation::single(
                    ScalarProperty::Fade,
                    Easing::Linear,
                    0.0,
                    100.0,
                    0.0,
                    1.0,
                )
                .unwrap()],
            }],
            sliders: vec![SliderProbe { time: 150, pixel_length: 100.0 }],
            frame_step_ms: 10,
            end_time_ms: 200,
        }
    }

    #[test]
    fn test_run_consumes_points_and_sliders() {
        let scene = scene();
        let report = Playback::new(&scene).run();
        assert_eq!(report.frames, 20);
        assert_eq!(report.tempo_changes, 2);
        assert_eq!(report.sliders_measured, 1);
        assert_eq!(report.final_bpm, 250.0);
    }

    #[test]
    fn test_sample_skips_unstarted() {
        let scene = scene();
        let playback = Playback::new(&scene);
        assert!(playback.sample(-1.0).is_empty());

        let samples = playback.sample(50.0);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].value, AnimatedValue::Single(0.5));
        assert_eq!(samples[0].status, TransformationStatus::Going);

        let ended = playback.sample(150.0);
        assert_eq!(ended[0].status, TransformationStatus::Ended);
        assert_eq!(ended[0].value, AnimatedValue::Single(1.0));
    }

    #[test]
    fn test_step_stops_at_end() {
        let scene = scene();
        let mut playback = Playback::new(&scene);
        for _ in 0..20 {
            assert!(playback.step());
        }
        assert_eq!(playback.time_ms(), 200);
        assert!(!playback.step());
        assert!(playback.timings().remaining().is_empty());
    }
}
