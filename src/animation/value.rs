//! Two-channel animated value.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// A pair of floats animated together.
///
/// Scalar properties such as opacity use both channels with the same value
/// ([`FPx2::splat`]); two-axis properties such as translation animate the
/// channels independently. An invalid value stands for "not set".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "FPx2Repr", into = "FPx2Repr")]
pub struct FPx2 {
    v: Vec2,
    valid: bool,
}

impl FPx2 {
    /// Both channels set to `value`.
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self {
            v: Vec2::splat(value),
            valid: true,
        }
    }

    /// Independent channels.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            v: Vec2::new(x, y),
            valid: true,
        }
    }

    /// The unset value.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            v: Vec2::ZERO,
            valid: false,
        }
    }

    /// Whether this value has been set.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// First channel.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.v.x
    }

    /// Second channel.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.v.y
    }

    /// Channels as a vector.
    #[must_use]
    pub const fn as_vec2(&self) -> Vec2 {
        self.v
    }

    /// Whether both channels are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.v.is_finite()
    }

    /// Interpolate from `from` to `to` at raw progress `t` through `curve`.
    ///
    /// At `t >= 1` the result is exactly `to`; when the endpoints are equal
    /// the result is constant.
    #[must_use]
    pub fn interpolate(
        from: Self,
        to: Self,
        t: f32,
        curve: &EasingFunction,
    ) -> Self {
        if t >= 1.0 {
            return to;
        }
        if from == to {
            return from;
        }
        let eased = curve.evaluate(t);
        Self::new_valid(from.v + (to.v - from.v) * eased)
    }

    const fn new_valid(v: Vec2) -> Self {
        Self { v, valid: true }
    }
}

impl Default for FPx2 {
    fn default() -> Self {
        Self::invalid()
    }
}

impl From<f32> for FPx2 {
    fn from(value: f32) -> Self {
        Self::splat(value)
    }
}

impl From<Vec2> for FPx2 {
    fn from(v: Vec2) -> Self {
        Self::new_valid(v)
    }
}

impl Add for FPx2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            v: self.v + rhs.v,
            valid: self.valid && rhs.valid,
        }
    }
}

impl Sub for FPx2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            v: self.v - rhs.v,
            valid: self.valid && rhs.valid,
        }
    }
}

impl Mul<f32> for FPx2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            v: self.v * rhs,
            valid: self.valid,
        }
    }
}

impl fmt::Display for FPx2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "FPx2({}, {})", self.v.x, self.v.y)
        } else {
            f.write_str("FPx2(invalid)")
        }
    }
}

impl JsonSchema for FPx2 {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "FPx2".into()
    }

    fn json_schema(
        generator: &mut schemars::SchemaGenerator,
    ) -> schemars::Schema {
        FPx2Repr::json_schema(generator)
    }
}

/// Serialized form: a bare number, an `[x, y]` pair, or null.
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum FPx2Repr {
    Scalar(f32),
    Pair([f32; 2]),
    Unset(Option<()>),
}

impl From<FPx2Repr> for FPx2 {
    fn from(repr: FPx2Repr) -> Self {
        match repr {
            FPx2Repr::Scalar(v) => Self::splat(v),
            FPx2Repr::Pair([x, y]) => Self::new(x, y),
            FPx2Repr::Unset(_) => Self::invalid(),
        }
    }
}

impl From<FPx2> for FPx2Repr {
    fn from(value: FPx2) -> Self {
        if !value.valid {
            Self::Unset(None)
        } else if value.v.x == value.v.y {
            Self::Scalar(value.v.x)
        } else {
            Self::Pair([value.v.x, value.v.y])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(FPx2::new(0.5, 2.0).to_string(), "FPx2(0.5, 2)");
        assert_eq!(FPx2::invalid().to_string(), "FPx2(invalid)");
    }

    #[test]
    fn interpolate_endpoints_are_exact() {
        let from = FPx2::new(0.1, -3.0);
        let to = FPx2::new(0.7, 9.0);
        let curve = EasingFunction::DEFAULT;
        assert_eq!(FPx2::interpolate(from, to, 0.0, &curve), from);
        assert_eq!(FPx2::interpolate(from, to, 1.0, &curve), to);
        assert_eq!(FPx2::interpolate(from, to, 3.0, &curve), to);
    }

    #[test]
    fn interpolate_channels_independently() {
        let v = FPx2::interpolate(
            FPx2::new(0.0, 10.0),
            FPx2::new(10.0, 0.0),
            0.25,
            &EasingFunction::Linear,
        );
        assert!((v.x() - 2.5).abs() < 1e-6);
        assert!((v.y() - 7.5).abs() < 1e-6);
    }

    #[test]
    fn angles_take_the_numeric_path() {
        let halfway = FPx2::interpolate(
            FPx2::splat(350.0),
            FPx2::splat(10.0),
            0.5,
            &EasingFunction::Linear,
        );
        assert!((halfway.x() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn equal_endpoints_are_constant() {
        let p = FPx2::splat(0.4);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_eq!(
                FPx2::interpolate(p, p, t, &EasingFunction::QuadraticIn),
                p
            );
        }
    }

    #[test]
    fn arithmetic_propagates_validity() {
        let sum = FPx2::splat(1.0) + FPx2::invalid();
        assert!(!sum.is_valid());
        let scaled = FPx2::new(1.0, 2.0) * 2.0;
        assert_eq!(scaled, FPx2::new(2.0, 4.0));
    }

    #[test]
    fn serde_accepts_scalar_and_pair() {
        let scalar: FPx2 = serde_json::from_str("0.5").unwrap();
        assert_eq!(scalar, FPx2::splat(0.5));
        let pair: FPx2 = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_eq!(pair, FPx2::new(1.0, 2.0));
        assert_eq!(serde_json::to_string(&FPx2::splat(1.0)).unwrap(), "1.0");
    }
}
