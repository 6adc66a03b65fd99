// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value types produced by transformations.

use serde::{Deserialize, Serialize};

/// 2D point or scale pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vector2 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2> for (f64, f64) {
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}

/// RGBA color with unclamped float channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha channel
    pub a: f64,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from all four channels
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Value of a transformation at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnimatedValue {
    /// Scalar (fade, rotation, uniform scale, single-axis move)
    Single(f64),
    /// Pair (vector scale, move)
    Vector(Vector2),
    /// Color
    Color(Color),
    /// Whether a flag span is active
    Flag(bool),
}

impl AnimatedValue {
    /// Get as scalar if possible
    pub fn as_single(&self) -> Option<f64> {
        match self {
            AnimatedValue::Single(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as vector if possible
    pub fn as_vector(&self) -> Option<Vector2> {
        match self {
            AnimatedValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as color if possible
    pub fn as_color(&self) -> Option<Color> {
        match self {
            AnimatedValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Get as flag if possible
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnimatedValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

/// Interpolation utilities.
///
/// Progress is not clamped: overshooting curves push values past either end.
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    /// Interpolate a vector per component
    pub fn lerp_vector(a: Vector2, b: Vector2, t: f64) -> Vector2 {
        Vector2::new(Self::lerp(a.x, b.x, t), Self::lerp(a.y, b.y, t))
    }

    /// Interpolate a color per channel
    pub fn lerp_color(a: Color, b: Color, t: f64) -> Color {
        Color::rgba(
            Self::lerp(a.r, b.r, t),
            Self::lerp(a.g, b.g, t),
            Self::lerp(a.b, b.b, t),
            Self::lerp(a.a, b.a, t),
        )
    }
}
