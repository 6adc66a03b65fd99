// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves for transformations.
//!
//! Curves map normalized progress `t` in `[0, 1]` to eased progress. The
//! back, elastic and bounce families overshoot below 0 or above 1 between
//! the endpoints; that is expected output, not a bug.
//!
//! Beatmap and storyboard data reference curves by integer index, so the
//! order of [`Easing::ALL`] is fixed. Never reorder or insert variants.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Plain curve function, `t -> eased t`
pub type CurveFn = fn(f64) -> f64;

/// Overshoot constant for the back family
const BACK_OVERSHOOT: f64 = 1.70158;

/// Scale applied to the back overshoot in each half of `InOutBack`
const BACK_IN_OUT_SCALE: f64 = 1.525;

/// Oscillation period shared by the elastic presets
const ELASTIC_PERIOD: f64 = 0.5;

/// Easing curve selected by catalog index
#[allow(missing_docs)] // variant names are the curve names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Easing {
    /// Identity
    #[default]
    Linear,
    /// Generic ease-out, same curve as `OutQuad`
    Out,
    /// Generic ease-in, same curve as `InQuad`
    In,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    /// Elastic out at half amplitude
    OutHalfElastic,
    /// Elastic out at quarter amplitude
    OutQuartElastic,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Easing {
    /// Number of entries in the catalog
    pub const COUNT: usize = 35;

    /// The catalog, in index order
    pub const ALL: [Easing; Self::COUNT] = [
        Easing::Linear,
        Easing::Out,
        Easing::In,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::InElastic,
        Easing::OutElastic,
        Easing::OutHalfElastic,
        Easing::OutQuartElastic,
        Easing::InOutElastic,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBack,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InOutBounce,
    ];

    /// Look up a curve by catalog index.
    ///
    /// Negative or out-of-range ids fall back to [`Easing::Linear`].
    pub fn from_id(id: i64) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or_default()
    }

    /// Catalog index of this curve
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Out => "Out",
            Self::In => "In",
            Self::InQuad => "InQuad",
            Self::OutQuad => "OutQuad",
            Self::InOutQuad => "InOutQuad",
            Self::InCubic => "InCubic",
            Self::OutCubic => "OutCubic",
            Self::InOutCubic => "InOutCubic",
            Self::InQuart => "InQuart",
            Self::OutQuart => "OutQuart",
            Self::InOutQuart => "InOutQuart",
            Self::InQuint => "InQuint",
            Self::OutQuint => "OutQuint",
            Self::InOutQuint => "InOutQuint",
            Self::InSine => "InSine",
            Self::OutSine => "OutSine",
            Self::InOutSine => "InOutSine",
            Self::InExpo => "InExpo",
            Self::OutExpo => "OutExpo",
            Self::InOutExpo => "InOutExpo",
            Self::InCirc => "InCirc",
            Self::OutCirc => "OutCirc",
            Self::InOutCirc => "InOutCirc",
            Self::InElastic => "InElastic",
            Self::OutElastic => "OutElastic",
            Self::OutHalfElastic => "OutHalfElastic",
            Self::OutQuartElastic => "OutQuartElastic",
            Self::InOutElastic => "InOutElastic",
            Self::InBack => "InBack",
            Self::OutBack => "OutBack",
            Self::InOutBack => "InOutBack",
            Self::InBounce => "InBounce",
            Self::OutBounce => "OutBounce",
            Self::InOutBounce => "InOutBounce",
        }
    }

    /// The curve as a plain function pointer
    pub fn curve(self) -> CurveFn {
        match self {
            Self::Linear => linear,
            Self::Out | Self::OutQuad => out_quad,
            Self::In | Self::InQuad => in_quad,
            Self::InOutQuad => in_out_quad,
            Self::InCubic => in_cubic,
            Self::OutCubic => out_cubic,
            Self::InOutCubic => in_out_cubic,
            Self::InQuart => in_quart,
            Self::OutQuart => out_quart,
            Self::InOutQuart => in_out_quart,
            Self::InQuint => in_quint,
            Self::OutQuint => out_quint,
            Self::InOutQuint => in_out_quint,
            Self::InSine => in_sine,
            Self::OutSine => out_sine,
            Self::InOutSine => in_out_sine,
            Self::InExpo => in_expo,
            Self::OutExpo => out_expo,
            Self::InOutExpo => in_out_expo,
            Self::InCirc => in_circ,
            Self::OutCirc => out_circ,
            Self::InOutCirc => in_out_circ,
            Self::InElastic => in_elastic_preset,
            Self::OutElastic => out_elastic_preset,
            Self::OutHalfElastic => out_half_elastic_preset,
            Self::OutQuartElastic => out_quart_elastic_preset,
            Self::InOutElastic => in_out_elastic_preset,
            Self::InBack => in_back,
            Self::OutBack => out_back,
            Self::InOutBack => in_out_back,
            Self::InBounce => in_bounce,
            Self::OutBounce => out_bounce,
            Self::InOutBounce => in_out_bounce,
        }
    }

    /// Evaluate the curve at progress `t`
    pub fn apply(self, t: f64) -> f64 {
        (self.curve())(t)
    }
}

impl From<i64> for Easing {
    fn from(id: i64) -> Self {
        Self::from_id(id)
    }
}

impl From<Easing> for i64 {
    fn from(easing: Easing) -> Self {
        easing.id()
    }
}

/// Select a curve function by catalog index, clamping bad ids to linear
pub fn select_curve(id: i64) -> CurveFn {
    Easing::from_id(id).curve()
}

fn linear(t: f64) -> f64 {
    t
}

fn in_quad(t: f64) -> f64 {
    t * t
}

fn out_quad(t: f64) -> f64 {
    -t * (t - 2.0)
}

fn in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let t = 2.0 * t - 1.0;
        -0.5 * (t * (t - 2.0) - 1.0)
    }
}

fn in_cubic(t: f64) -> f64 {
    t * t * t
}

fn out_cubic(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}

fn in_out_cubic(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t + 2.0)
    }
}

fn in_quart(t: f64) -> f64 {
    t * t * t * t
}

fn out_quart(t: f64) -> f64 {
    let t = t - 1.0;
    -(t * t * t * t - 1.0)
}

fn in_out_quart(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t * t
    } else {
        let t = t - 2.0;
        -0.5 * (t * t * t * t - 2.0)
    }
}

fn in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

fn out_quint(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

fn in_out_quint(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t * t * t + 2.0)
    }
}

fn in_sine(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

fn out_sine(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

fn in_out_sine(t: f64) -> f64 {
    -0.5 * ((PI * t).cos() - 1.0)
}

// The exponential family is pinned at the ends: 2^(-10) is not zero.
fn in_expo(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * (t - 1.0))
    }
}

fn out_expo(t: f64) -> f64 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

fn in_out_expo(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        0.5 * 2f64.powf(20.0 * t - 10.0)
    } else {
        1.0 - 0.5 * 2f64.powf(-20.0 * t + 10.0)
    }
}

fn in_circ(t: f64) -> f64 {
    -((1.0 - t * t).sqrt() - 1.0)
}

fn out_circ(t: f64) -> f64 {
    let t = t - 1.0;
    (1.0 - t * t).sqrt()
}

fn in_out_circ(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        -0.5 * ((1.0 - t * t).sqrt() - 1.0)
    } else {
        let t = t - 2.0;
        0.5 * ((1.0 - t * t).sqrt() + 1.0)
    }
}

/// Elastic ease-in with the given oscillation period
pub fn elastic_in(period: f64) -> impl Fn(f64) -> f64 {
    move |t| {
        let t = t - 1.0;
        -(2f64.powf(10.0 * t) * ((t - period / 4.0) * (2.0 * PI) / period).sin())
    }
}

/// Elastic ease-out with the given oscillation period and amplitude modifier.
///
/// An amplitude of 1 is the standard curve; 0.5 and 0.25 give the half and
/// quarter presets.
pub fn elastic_out(period: f64, amplitude: f64) -> impl Fn(f64) -> f64 {
    move |t| 2f64.powf(-10.0 * t) * ((amplitude * t - period / 4.0) * (2.0 * PI / period)).sin() + 1.0
}

/// Elastic ease-in-out with the given oscillation period
pub fn elastic_in_out(period: f64) -> impl Fn(f64) -> f64 {
    move |t| {
        let t = t * 2.0 - 1.0;
        let wave = ((t - period / 4.0) * 2.0 * PI / period).sin();
        if t < 0.0 {
            -0.5 * (2f64.powf(10.0 * t) * wave)
        } else {
            2f64.powf(-10.0 * t) * wave * 0.5 + 1.0
        }
    }
}

fn in_elastic_preset(t: f64) -> f64 {
    elastic_in(ELASTIC_PERIOD)(t)
}

fn out_elastic_preset(t: f64) -> f64 {
    elastic_out(ELASTIC_PERIOD, 1.0)(t)
}

fn out_half_elastic_preset(t: f64) -> f64 {
    elastic_out(ELASTIC_PERIOD, 0.5)(t)
}

fn out_quart_elastic_preset(t: f64) -> f64 {
    elastic_out(ELASTIC_PERIOD, 0.25)(t)
}

fn in_out_elastic_preset(t: f64) -> f64 {
    elastic_in_out(ELASTIC_PERIOD)(t)
}

fn in_back(t: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    t * t * ((s + 1.0) * t - s)
}

fn out_back(t: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    let t = t - 1.0;
    t * t * ((s + 1.0) * t + s) + 1.0
}

fn in_out_back(t: f64) -> f64 {
    let s = BACK_OVERSHOOT * BACK_IN_OUT_SCALE;
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * (t * t * ((s + 1.0) * t - s))
    } else {
        let t = t - 2.0;
        0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
    }
}

fn in_bounce(t: f64) -> f64 {
    1.0 - out_bounce(1.0 - t)
}

/// Four parabolic pieces meeting at 4/11, 8/11 and 9/10, each touching 1
/// at the breakpoints.
fn out_bounce(t: f64) -> f64 {
    if t < 4.0 / 11.0 {
        (121.0 * t * t) / 16.0
    } else if t < 8.0 / 11.0 {
        (363.0 / 40.0 * t * t) - (99.0 / 10.0 * t) + 17.0 / 5.0
    } else if t < 9.0 / 10.0 {
        (4356.0 / 361.0 * t * t) - (35442.0 / 1805.0 * t) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * t * t) - (513.0 / 25.0 * t) + 268.0 / 25.0
    }
}

fn in_out_bounce(t: f64) -> f64 {
    if t < 0.5 {
        in_bounce(2.0 * t) * 0.5
    } else {
        out_bounce(2.0 * t - 1.0) * 0.5 + 0.5
    }
}

/// Step to 1 only once `t` reaches 1
pub fn in_square(t: f64) -> f64 {
    if t < 1.0 {
        0.0
    } else {
        1.0
    }
}

/// Step to 1 as soon as `t` leaves 0
pub fn out_square(t: f64) -> f64 {
    if t > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Step to 1 at the midpoint
pub fn in_out_square(t: f64) -> f64 {
    if t < 0.5 {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint_tolerance(easing: Easing) -> f64 {
        match easing {
            // 2^-10 residue from the exponential envelope
            Easing::InElastic
            | Easing::OutElastic
            | Easing::OutHalfElastic
            | Easing::OutQuartElastic
            | Easing::InOutElastic => 1.0e-3,
            _ => 1.0e-9,
        }
    }

    #[test]
    fn test_catalog_order_matches_ids() {
        assert_eq!(Easing::ALL.len(), 35);
        for (index, easing) in Easing::ALL.iter().enumerate() {
            assert_eq!(easing.id(), index as i64, "{} out of place", easing.name());
            assert_eq!(Easing::from_id(index as i64), *easing);
        }
        assert_eq!(Easing::from_id(1), Easing::Out);
        assert_eq!(Easing::from_id(18), Easing::InExpo);
        assert_eq!(Easing::from_id(26), Easing::OutHalfElastic);
        assert_eq!(Easing::from_id(34), Easing::InOutBounce);
    }

    #[test]
    fn test_invalid_id_falls_back_to_linear() {
        assert_eq!(Easing::from_id(-1), Easing::Linear);
        assert_eq!(Easing::from_id(Easing::COUNT as i64), Easing::Linear);
        assert_eq!(Easing::from_id(i64::MIN), Easing::Linear);
        assert_eq!(select_curve(-1)(0.3), select_curve(0)(0.3));
        assert_eq!(select_curve(35)(0.7), 0.7);
    }

    #[test]
    fn test_endpoints() {
        for easing in Easing::ALL {
            let tolerance = endpoint_tolerance(easing);
            let start = easing.apply(0.0);
            let end = easing.apply(1.0);
            assert!(start.abs() <= tolerance, "{}(0) = {start}", easing.name());
            assert!((end - 1.0).abs() <= tolerance, "{}(1) = {end}", easing.name());
        }
    }

    #[test]
    fn test_generic_in_out_alias_quad() {
        for t in [0.1, 0.25, 0.5, 0.9] {
            assert_eq!(Easing::Out.apply(t), Easing::OutQuad.apply(t));
            assert_eq!(Easing::In.apply(t), Easing::InQuad.apply(t));
        }
    }

    #[test]
    fn test_overshoot_is_preserved() {
        assert!(Easing::InBack.apply(0.2) < 0.0);
        assert!(Easing::OutBack.apply(0.8) > 1.0);
        assert!(Easing::OutElastic.apply(0.25) > 1.0);
    }

    #[test]
    fn test_expo_exact_endpoints() {
        assert_eq!(in_expo(0.0), 0.0);
        assert_eq!(out_expo(1.0), 1.0);
        assert_eq!(in_out_expo(0.0), 0.0);
        assert_eq!(in_out_expo(1.0), 1.0);
    }

    #[test]
    fn test_out_bounce_continuity() {
        for breakpoint in [4.0 / 11.0, 8.0 / 11.0, 9.0 / 10.0] {
            let left = out_bounce(breakpoint - 1.0e-12);
            let right = out_bounce(breakpoint);
            assert!((left - right).abs() < 1.0e-9, "jump at {breakpoint}");
            assert!((right - 1.0).abs() < 1.0e-9);
        }
    }

    #[test]
    fn test_in_out_midpoints() {
        for easing in [
            Easing::InOutQuad,
            Easing::InOutCubic,
            Easing::InOutQuart,
            Easing::InOutQuint,
            Easing::InOutSine,
            Easing::InOutCirc,
            Easing::InOutBounce,
        ] {
            assert!((easing.apply(0.5) - 0.5).abs() < 1.0e-9, "{}", easing.name());
        }
    }

    #[test]
    fn test_elastic_amplitude_presets() {
        let half = elastic_out(0.5, 0.5);
        assert_eq!(half(0.3), Easing::OutHalfElastic.apply(0.3));
        let quarter = elastic_out(0.5, 0.25);
        assert_eq!(quarter(0.3), Easing::OutQuartElastic.apply(0.3));
    }

    #[test]
    fn test_square_steps() {
        assert_eq!(in_square(0.99), 0.0);
        assert_eq!(in_square(1.0), 1.0);
        assert_eq!(out_square(0.0), 0.0);
        assert_eq!(out_square(0.01), 1.0);
        assert_eq!(in_out_square(0.49), 0.0);
        assert_eq!(in_out_square(0.5), 1.0);
    }

    #[test]
    fn test_serializes_as_index() {
        let json = serde_json::to_string(&Easing::OutBounce).unwrap();
        assert_eq!(json, "33");
        let parsed: Easing = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Easing::OutCubic);
        let fallback: Easing = serde_json::from_str("99").unwrap();
        assert_eq!(fallback, Easing::Linear);
    }
}
