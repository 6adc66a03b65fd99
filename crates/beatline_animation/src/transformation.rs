// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time-bounded attribute transformations.
//!
//! A [`Transformation`] animates one attribute of a drawable between a start
//! and an end value over `[start_time, end_time)`. The attribute shape is
//! fixed by the constructor used: scalar, vector, color, or a boolean flag
//! span. Every query is a pure function of the query time.

use crate::easing::Easing;
use crate::value::{AnimatedValue, Color, Interpolation, Vector2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transformation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformationError {
    /// Type tag does not belong to the requested shape
    #[error("{found:?} is not a {expected} transformation type")]
    WrongType {
        /// The tag that was supplied
        found: TransformationType,
        /// Shape that was requested
        expected: &'static str,
    },

    /// Start/end times do not form a usable interval
    #[error("invalid transformation interval [{start}, {end})")]
    InvalidInterval {
        /// Start time
        start: f64,
        /// End time
        end: f64,
    },
}

/// Result type for transformation construction
pub type Result<T> = std::result::Result<T, TransformationError>;

/// Attribute animated by a transformation, with its storyboard bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum TransformationType {
    /// Opacity
    Fade = 1 << 0,
    /// Rotation in radians
    Rotate = 1 << 1,
    /// Uniform scale
    Scale = 1 << 2,
    /// Per-axis scale
    ScaleVector = 1 << 3,
    /// Position
    Move = 1 << 4,
    /// Horizontal position only
    MoveX = 1 << 5,
    /// Vertical position only
    MoveY = 1 << 6,
    /// RGB tint
    Color3 = 1 << 7,
    /// RGBA tint
    Color4 = 1 << 8,
    /// Mirror horizontally while active
    HorizontalFlip = 1 << 9,
    /// Mirror vertically while active
    VerticalFlip = 1 << 10,
    /// Additive blending while active
    Additive = 1 << 11,
}

impl TransformationType {
    /// Bit value of this type
    pub fn bits(self) -> u16 {
        self as u16
    }
}

macro_rules! property_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $shape:literal { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl From<$name> for TransformationType {
            fn from(property: $name) -> Self {
                match property {
                    $($name::$variant => TransformationType::$variant),+
                }
            }
        }

        impl TryFrom<TransformationType> for $name {
            type Error = TransformationError;

            fn try_from(ty: TransformationType) -> Result<Self> {
                match ty {
                    $(TransformationType::$variant => Ok($name::$variant),)+
                    found => Err(TransformationError::WrongType { found, expected: $shape }),
                }
            }
        }
    };
}

property_tag! {
    /// Attributes animated as a single scalar
    ScalarProperty, "scalar" {
        /// Opacity
        Fade,
        /// Rotation
        Rotate,
        /// Uniform scale
        Scale,
        /// Horizontal position
        MoveX,
        /// Vertical position
        MoveY,
    }
}

property_tag! {
    /// Attributes animated as a pair
    VectorProperty, "vector" {
        /// Per-axis scale
        ScaleVector,
        /// Position
        Move,
    }
}

property_tag! {
    /// Attributes animated as a color
    ColorProperty, "color" {
        /// RGB tint, alpha carried along
        Color3,
        /// RGBA tint
        Color4,
    }
}

property_tag! {
    /// Attributes that are simply on for a time span
    FlagProperty, "flag" {
        /// Horizontal mirror
        HorizontalFlip,
        /// Vertical mirror
        VerticalFlip,
        /// Additive blending
        Additive,
    }
}

/// Where a query time falls relative to a transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationStatus {
    /// Before `start_time`
    NotStarted,
    /// Within `[start_time, end_time)`
    Going,
    /// At or after `end_time`
    Ended,
}

/// Start/end values, tagged by attribute shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformationValues {
    /// Scalar attribute
    Single {
        /// Animated attribute
        property: ScalarProperty,
        /// Value at `start_time`
        start: f64,
        /// Value at `end_time`
        end: f64,
    },
    /// Pair attribute
    Vector {
        /// Animated attribute
        property: VectorProperty,
        /// Value at `start_time`
        start: Vector2,
        /// Value at `end_time`
        end: Vector2,
    },
    /// Color attribute
    Color {
        /// Animated attribute
        property: ColorProperty,
        /// Value at `start_time`
        start: Color,
        /// Value at `end_time`
        end: Color,
    },
    /// Flag span, no values
    Flag {
        /// Flagged attribute
        property: FlagProperty,
    },
}

impl TransformationValues {
    /// Type tag of the animated attribute
    pub fn transformation_type(&self) -> TransformationType {
        match *self {
            Self::Single { property, .. } => property.into(),
            Self::Vector { property, .. } => property.into(),
            Self::Color { property, .. } => property.into(),
            Self::Flag { property } => property.into(),
        }
    }

    fn is_flag(&self) -> bool {
        matches!(self, Self::Flag { .. })
    }
}

/// A time-bounded, eased interpolation of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransformationRecord")]
pub struct Transformation {
    values: TransformationValues,
    /// Absent for flag spans
    easing: Option<Easing>,
    start_time: f64,
    end_time: f64,
}

/// Unvalidated serialized form, checked on the way in
#[derive(Deserialize)]
struct TransformationRecord {
    values: TransformationValues,
    easing: Option<Easing>,
    start_time: f64,
    end_time: f64,
}

impl TryFrom<TransformationRecord> for Transformation {
    type Error = TransformationError;

    fn try_from(record: TransformationRecord) -> Result<Self> {
        let is_flag = record.values.is_flag();
        check_interval(record.start_time, record.end_time, is_flag)?;
        let easing = if is_flag {
            None
        } else {
            Some(record.easing.unwrap_or_default())
        };
        Ok(Self {
            values: record.values,
            easing,
            start_time: record.start_time,
            end_time: record.end_time,
        })
    }
}

/// Valued transformations need `start < end`; flag spans may be empty.
fn check_interval(start: f64, end: f64, allow_empty: bool) -> Result<()> {
    let ordered = if allow_empty { start <= end } else { start < end };
    if start.is_finite() && end.is_finite() && ordered {
        Ok(())
    } else {
        Err(TransformationError::InvalidInterval { start, end })
    }
}

impl Transformation {
    /// Create a flag span that is active on `[start_time, end_time)`
    pub fn boolean(property: FlagProperty, start_time: f64, end_time: f64) -> Result<Self> {
        check_interval(start_time, end_time, true)?;
        Ok(Self {
            values: TransformationValues::Flag { property },
            easing: None,
            start_time,
            end_time,
        })
    }

    /// Create a scalar transformation
    pub fn single(
        property: ScalarProperty,
        easing: Easing,
        start_time: f64,
        end_time: f64,
        start: f64,
        end: f64,
    ) -> Result<Self> {
        Self::valued(
            TransformationValues::Single { property, start, end },
            easing,
            start_time,
            end_time,
        )
    }

    /// Create a pair transformation from two points
    pub fn vector(
        property: VectorProperty,
        easing: Easing,
        start_time: f64,
        end_time: f64,
        start: Vector2,
        end: Vector2,
    ) -> Result<Self> {
        Self::valued(
            TransformationValues::Vector { property, start, end },
            easing,
            start_time,
            end_time,
        )
    }

    /// Create a pair transformation from raw components
    pub fn vector_xy(
        property: VectorProperty,
        easing: Easing,
        start_time: f64,
        end_time: f64,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<Self> {
        Self::vector(
            property,
            easing,
            start_time,
            end_time,
            Vector2::new(start_x, start_y),
            Vector2::new(end_x, end_y),
        )
    }

    /// Create a color transformation
    pub fn color(
        property: ColorProperty,
        easing: Easing,
        start_time: f64,
        end_time: f64,
        start: Color,
        end: Color,
    ) -> Result<Self> {
        Self::valued(
            TransformationValues::Color { property, start, end },
            easing,
            start_time,
            end_time,
        )
    }

    fn valued(
        values: TransformationValues,
        easing: Easing,
        start_time: f64,
        end_time: f64,
    ) -> Result<Self> {
        check_interval(start_time, end_time, false)?;
        Ok(Self {
            values,
            easing: Some(easing),
            start_time,
            end_time,
        })
    }

    /// Where `time` falls relative to `[start_time, end_time)`
    pub fn status(&self, time: f64) -> TransformationStatus {
        if time < self.start_time {
            TransformationStatus::NotStarted
        } else if time >= self.end_time {
            TransformationStatus::Ended
        } else {
            TransformationStatus::Going
        }
    }

    /// Eased progress at `time`.
    ///
    /// Time is clamped into the interval before easing, so the result only
    /// leaves `[0, 1]` when the curve itself overshoots.
    pub fn progress(&self, time: f64) -> f64 {
        let duration = self.end_time - self.start_time;
        if duration <= 0.0 {
            // Only empty flag spans get here; they have no values to ease.
            return if time >= self.end_time { 1.0 } else { 0.0 };
        }
        let linear = ((time - self.start_time) / duration).clamp(0.0, 1.0);
        self.easing.unwrap_or_default().apply(linear)
    }

    /// Scalar value at `time`, `None` unless this is a scalar transformation
    pub fn get_single(&self, time: f64) -> Option<f64> {
        match self.values {
            TransformationValues::Single { start, end, .. } => {
                Some(Interpolation::lerp(start, end, self.progress(time)))
            }
            _ => None,
        }
    }

    /// Pair value at `time` as a tuple
    pub fn get_double(&self, time: f64) -> Option<(f64, f64)> {
        self.get_vector(time).map(Into::into)
    }

    /// Pair value at `time`, `None` unless this is a vector transformation
    pub fn get_vector(&self, time: f64) -> Option<Vector2> {
        match self.values {
            TransformationValues::Vector { start, end, .. } => {
                Some(Interpolation::lerp_vector(start, end, self.progress(time)))
            }
            _ => None,
        }
    }

    /// Color at `time`, `None` unless this is a color transformation
    pub fn get_color(&self, time: f64) -> Option<Color> {
        match self.values {
            TransformationValues::Color { start, end, .. } => {
                Some(Interpolation::lerp_color(start, end, self.progress(time)))
            }
            _ => None,
        }
    }

    /// Whether `time` lies in `[start_time, end_time)`. Easing is ignored.
    pub fn get_boolean(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }

    /// Value at `time` in whatever shape this transformation has
    pub fn value_at(&self, time: f64) -> AnimatedValue {
        let progress = self.progress(time);
        match self.values {
            TransformationValues::Single { start, end, .. } => {
                AnimatedValue::Single(Interpolation::lerp(start, end, progress))
            }
            TransformationValues::Vector { start, end, .. } => {
                AnimatedValue::Vector(Interpolation::lerp_vector(start, end, progress))
            }
            TransformationValues::Color { start, end, .. } => {
                AnimatedValue::Color(Interpolation::lerp_color(start, end, progress))
            }
            TransformationValues::Flag { .. } => AnimatedValue::Flag(self.get_boolean(time)),
        }
    }

    /// Type tag of the animated attribute
    pub fn transformation_type(&self) -> TransformationType {
        self.values.transformation_type()
    }

    /// Start/end values
    pub fn values(&self) -> &TransformationValues {
        &self.values
    }

    /// Easing curve, `None` for flag spans
    pub fn easing(&self) -> Option<Easing> {
        self.easing
    }

    /// Start of the active interval
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End of the active interval (exclusive)
    pub fn end_time(&self) -> f64 {
        self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> Transformation {
        Transformation::single(ScalarProperty::Fade, Easing::Linear, 0.0, 10.0, 0.0, 100.0).unwrap()
    }

    #[test]
    fn test_linear_single_clamps() {
        let t = fade();
        assert_eq!(t.get_single(0.0), Some(0.0));
        assert_eq!(t.get_single(5.0), Some(50.0));
        assert_eq!(t.get_single(10.0), Some(100.0));
        assert_eq!(t.get_single(20.0), Some(100.0));
        assert_eq!(t.get_single(-5.0), Some(0.0));
    }

    #[test]
    fn test_status_is_monotonic() {
        let t = fade();
        let mut last = TransformationStatus::NotStarted;
        let rank = |s: TransformationStatus| match s {
            TransformationStatus::NotStarted => 0,
            TransformationStatus::Going => 1,
            TransformationStatus::Ended => 2,
        };
        for step in -20..=40 {
            let status = t.status(step as f64 * 0.5);
            assert!(rank(status) >= rank(last));
            last = status;
        }
        assert_eq!(t.status(-0.1), TransformationStatus::NotStarted);
        assert_eq!(t.status(0.0), TransformationStatus::Going);
        assert_eq!(t.status(9.99), TransformationStatus::Going);
        assert_eq!(t.status(10.0), TransformationStatus::Ended);
    }

    #[test]
    fn test_boolean_span_is_half_open() {
        let t = Transformation::boolean(FlagProperty::Additive, 2.0, 4.0).unwrap();
        assert!(!t.get_boolean(1.99));
        assert!(t.get_boolean(2.0));
        assert!(t.get_boolean(3.5));
        assert!(!t.get_boolean(4.0));
        assert_eq!(t.easing(), None);
        assert_eq!(t.value_at(3.0), AnimatedValue::Flag(true));
        assert_eq!(t.get_single(3.0), None);
    }

    #[test]
    fn test_boolean_ignores_easing() {
        let eased = Transformation::single(ScalarProperty::Scale, Easing::InBounce, 2.0, 4.0, 1.0, 2.0)
            .unwrap();
        let flag = Transformation::boolean(FlagProperty::HorizontalFlip, 2.0, 4.0).unwrap();
        for time in [1.0, 2.0, 2.5, 3.999, 4.0, 5.0] {
            assert_eq!(eased.get_boolean(time), flag.get_boolean(time));
        }
    }

    #[test]
    fn test_empty_flag_span_is_never_active() {
        let t = Transformation::boolean(FlagProperty::VerticalFlip, 3.0, 3.0).unwrap();
        assert!(!t.get_boolean(3.0));
        assert_eq!(t.status(3.0), TransformationStatus::Ended);
    }

    #[test]
    fn test_vector_and_pair_agree() {
        let t = Transformation::vector_xy(VectorProperty::Move, Easing::Linear, 0.0, 4.0, 0.0, 10.0, 8.0, 30.0)
            .unwrap();
        assert_eq!(t.get_vector(1.0), Some(Vector2::new(2.0, 15.0)));
        assert_eq!(t.get_double(1.0), Some((2.0, 15.0)));
        assert_eq!(t.transformation_type(), TransformationType::Move);
        assert_eq!(t.get_color(1.0), None);
    }

    #[test]
    fn test_color_interpolates_all_channels() {
        let t = Transformation::color(
            ColorProperty::Color4,
            Easing::Linear,
            0.0,
            2.0,
            Color::rgba(0.0, 0.0, 0.0, 0.0),
            Color::rgba(1.0, 0.5, 0.25, 1.0),
        )
        .unwrap();
        assert_eq!(t.get_color(1.0), Some(Color::rgba(0.5, 0.25, 0.125, 0.5)));
        assert_eq!(t.transformation_type(), TransformationType::Color4);
    }

    #[test]
    fn test_overshoot_passes_through() {
        let t = Transformation::single(ScalarProperty::Rotate, Easing::OutBack, 0.0, 1.0, 0.0, 1.0).unwrap();
        let peak = t.get_single(0.8).unwrap();
        assert!(peak > 1.0);
    }

    #[test]
    fn test_rejects_bad_intervals() {
        let empty = Transformation::single(ScalarProperty::Fade, Easing::Linear, 5.0, 5.0, 0.0, 1.0);
        assert!(matches!(empty, Err(TransformationError::InvalidInterval { .. })));
        let reversed = Transformation::boolean(FlagProperty::Additive, 5.0, 4.0);
        assert!(reversed.is_err());
        let nan = Transformation::single(ScalarProperty::Fade, Easing::Linear, f64::NAN, 1.0, 0.0, 1.0);
        assert!(nan.is_err());
    }

    #[test]
    fn test_raw_type_tags_are_checked() {
        assert_eq!(ScalarProperty::try_from(TransformationType::MoveY), Ok(ScalarProperty::MoveY));
        assert_eq!(
            VectorProperty::try_from(TransformationType::Fade),
            Err(TransformationError::WrongType {
                found: TransformationType::Fade,
                expected: "vector",
            })
        );
        assert!(ColorProperty::try_from(TransformationType::Move).is_err());
        assert!(FlagProperty::try_from(TransformationType::Additive).is_ok());
    }

    #[test]
    fn test_type_bits() {
        assert_eq!(TransformationType::Fade.bits(), 1);
        assert_eq!(TransformationType::Move.bits(), 16);
        assert_eq!(TransformationType::Additive.bits(), 1 << 11);
    }

    #[test]
    fn test_ron_round_trip_keeps_easing_index() {
        let t = Transformation::single(ScalarProperty::Fade, Easing::OutQuint, 0.0, 1.0, 0.0, 1.0).unwrap();
        let text = ron::to_string(&t).unwrap();
        assert!(text.contains("Some(13)"));
        let loaded: Transformation = ron::from_str(&text).unwrap();
        assert_eq!(loaded, t);
    }

    #[test]
    fn test_deserialize_validates_interval() {
        let text = "(values:Single(property:Fade,start:0.0,end:1.0),easing:Some(0),start_time:2.0,end_time:1.0)";
        assert!(ron::from_str::<Transformation>(text).is_err());
    }
}
