// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tempo timeline for Beatline.
//!
//! Tracks tempo changes over a track and answers the questions a slider or
//! duration calculator needs: which tempo is in effect at a time, and how
//! long a given slider distance takes to play.

pub mod config;
pub mod point;
pub mod timings;

pub use config::{ConfigError, TimingConfig};
pub use point::{TimingPoint, TimingRecord};
pub use timings::Timings;
