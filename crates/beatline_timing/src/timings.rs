// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tempo timeline with a streaming playback cursor.
//!
//! Points are appended once while a beatmap is loaded, then queried every
//! frame. Two access paths exist:
//! - [`Timings::get_point`] is random access and never changes state
//! - [`Timings::update`] consumes points in order as playback time advances
//!
//! Points must be added in non-decreasing time order. This is not checked.

use crate::config::TimingConfig;
use crate::point::{TimingPoint, TimingRecord};
use serde::{Deserialize, Serialize};

/// Smallest divisor allowed when resolving a relative tempo
const MIN_RELATIVE_DIVISOR: f64 = 0.1;

/// Tempo timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timings {
    /// Resolved points, in insertion (= time) order
    points: Vec<TimingPoint>,
    /// Index of the next point the cursor will consume
    #[serde(skip)]
    cursor: usize,
    /// Index of the point most recently consumed
    #[serde(skip)]
    current: Option<usize>,
    /// Global distance-to-time scale factor
    pub slider_mult: f64,
    /// Slider ticks per beat
    pub tick_rate: f64,
    /// Default sample set
    pub base_set: i32,
    /// Last sample set used
    pub last_set: i32,
    /// Most recent absolute tempo, the anchor for relative points
    full_bpm: f64,
    /// Tempo of the point under the cursor
    #[serde(skip)]
    part_bpm: f64,
}

impl Timings {
    /// Create an empty timeline with default settings
    pub fn new() -> Self {
        Self::with_config(&TimingConfig::default())
    }

    /// Create an empty timeline from a config
    pub fn with_config(config: &TimingConfig) -> Self {
        Self {
            points: Vec::new(),
            cursor: 0,
            current: None,
            slider_mult: config.slider_multiplier,
            tick_rate: config.tick_rate,
            base_set: config.base_sample_set,
            last_set: config.base_sample_set,
            full_bpm: 0.0,
            part_bpm: 0.0,
        }
    }

    /// Build a timeline from raw records, in order
    pub fn from_records<'a>(
        config: &TimingConfig,
        records: impl IntoIterator<Item = &'a TimingRecord>,
    ) -> Self {
        let mut timings = Self::with_config(config);
        for record in records {
            timings.add_record(record);
        }
        timings
    }

    /// Append a raw record
    pub fn add_record(&mut self, record: &TimingRecord) -> &TimingPoint {
        self.add_point(
            record.time,
            record.bpm,
            record.sample_set,
            record.sample_index,
            record.sample_volume,
            record.kiai,
        )
    }

    /// Append a tempo declaration and return the resolved point.
    ///
    /// A positive `bpm` becomes the new anchor tempo. Zero or negative is a
    /// percentage of the anchor: the effective tempo is
    /// `anchor / max(0.1, -100 / bpm)`.
    pub fn add_point(
        &mut self,
        time: i64,
        bpm: f64,
        sample_set: i32,
        sample_index: i32,
        sample_volume: f64,
        kiai: bool,
    ) -> &TimingPoint {
        let inherited = bpm <= 0.0;
        let effective = if inherited {
            if self.full_bpm <= 0.0 {
                tracing::warn!("Relative timing point at {time} has no absolute tempo to inherit from");
            }
            self.full_bpm / (-100.0 / bpm).max(MIN_RELATIVE_DIVISOR)
        } else {
            self.full_bpm = bpm;
            bpm
        };

        self.points.push(TimingPoint {
            time,
            base_bpm: self.full_bpm,
            bpm: effective,
            sample_set,
            sample_index,
            sample_volume,
            kiai,
            inherited,
        });
        &self.points[self.points.len() - 1]
    }

    /// Advance the streaming cursor by at most one point.
    ///
    /// Consumes the next point if its time has been reached and makes it
    /// current. Only one point is consumed per call, so a caller jumping
    /// across several points must call this once per point. Returns whether
    /// the cursor moved.
    pub fn update(&mut self, time: i64) -> bool {
        let Some(point) = self.points.get(self.cursor) else {
            return false;
        };
        if point.time > time {
            return false;
        }

        self.part_bpm = point.bpm;
        self.current = Some(self.cursor);
        self.cursor += 1;
        tracing::trace!(
            "Timing cursor at {} (point {} of {}, bpm {})",
            time,
            self.cursor,
            self.points.len(),
            self.part_bpm
        );
        true
    }

    /// Rewind the streaming cursor to the start of the timeline.
    ///
    /// The first point becomes current again. Resolved points are kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.current = if self.points.is_empty() { None } else { Some(0) };
        if let Some(first) = self.points.first() {
            self.part_bpm = first.bpm;
        }
    }

    /// Point in effect at `time`: the last point whose time is not after it.
    ///
    /// Times before the first point resolve to the first point. `None` only
    /// for an empty timeline.
    pub fn get_point(&self, time: i64) -> Option<&TimingPoint> {
        match self.points.iter().position(|p| time < p.time) {
            Some(next) => self.points.get(next.saturating_sub(1)),
            None => self.points.last(),
        }
    }

    /// Slider duration using the point in effect at `time`
    pub fn slider_time_at(&self, time: i64, pixel_length: f64) -> Option<i64> {
        self.get_point(time)
            .map(|point| self.slider_duration(point.bpm, pixel_length))
    }

    /// Slider duration using the tempo under the streaming cursor
    pub fn slider_time(&self, pixel_length: f64) -> i64 {
        self.slider_duration(self.part_bpm, pixel_length)
    }

    /// Slider duration using an explicit point
    pub fn slider_time_for(&self, point: &TimingPoint, pixel_length: f64) -> i64 {
        self.slider_duration(point.bpm, pixel_length)
    }

    /// `tempo * pixel_length / (100 * slider_mult)`, truncated toward zero.
    ///
    /// A negative result means malformed input; it is logged and returned
    /// as is.
    fn slider_duration(&self, bpm: f64, pixel_length: f64) -> i64 {
        let duration = (bpm * pixel_length / (100.0 * self.slider_mult)) as i64;
        if duration < 0 {
            tracing::warn!(
                "Negative slider duration {}: bpm={}, pixel_length={}, slider_mult={}",
                duration,
                bpm,
                pixel_length,
                self.slider_mult
            );
        }
        duration
    }

    /// All resolved points
    pub fn points(&self) -> &[TimingPoint] {
        &self.points
    }

    /// Points the cursor has not consumed yet
    pub fn remaining(&self) -> &[TimingPoint] {
        self.points.get(self.cursor..).unwrap_or_default()
    }

    /// Point most recently made current by the cursor
    pub fn current(&self) -> Option<&TimingPoint> {
        self.current.and_then(|index| self.points.get(index))
    }

    /// Tempo under the streaming cursor
    pub fn current_bpm(&self) -> f64 {
        self.part_bpm
    }

    /// Most recent absolute tempo
    pub fn anchor_bpm(&self) -> f64 {
        self.full_bpm
    }

    /// Number of resolved points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points have been added
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Log a one-line summary of the timeline
    pub fn log_summary(&self) {
        tracing::debug!(
            "Timeline: {} points, {} remaining, slider_mult={}, tick_rate={}",
            self.points.len(),
            self.remaining().len(),
            self.slider_mult,
            self.tick_rate
        );
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new()
    }
}
