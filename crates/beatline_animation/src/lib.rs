// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation substrate for Beatline playback.
//!
//! This crate provides the time-driven pieces a storyboard renderer samples
//! every frame:
//! - A fixed catalog of easing curves, addressable by integer index
//! - Typed, time-bounded attribute transformations
//!
//! ## Architecture
//!
//! Transformations are immutable values. Each is built for one attribute
//! shape (scalar, vector, color, flag span) and queried with the current
//! playback time; nothing here owns a clock or does I/O.

pub mod easing;
pub mod transformation;
pub mod value;

pub use easing::{select_curve, CurveFn, Easing};
pub use transformation::{
    ColorProperty, FlagProperty, ScalarProperty, Transformation, TransformationError,
    TransformationStatus, TransformationType, TransformationValues, VectorProperty,
};
pub use value::{AnimatedValue, Color, Interpolation, Vector2};
