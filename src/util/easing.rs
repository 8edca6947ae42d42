//! Easing functions for animation interpolation.
//!
//! Curves map normalized progress in `[0, 1]` to eased progress in `[0, 1]`.
//! They are stateless and `Copy`, so one value can be shared by any number of
//! animation records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnimError;

/// Newton iterations before falling back to bisection for Bezier curves.
const BEZIER_NEWTON_STEPS: usize = 8;
/// Bisection iterations for Bezier curves with flat slopes.
const BEZIER_BISECT_STEPS: usize = 32;
const BEZIER_EPSILON: f32 = 1e-6;

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in-out (slow start and end).
    QuadraticInOut,
    /// Cubic ease-in.
    CubicIn,
    /// Cubic ease-out.
    CubicOut,
    /// Cubic ease-in-out.
    CubicInOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
    /// CSS-style cubic Bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier {
        /// First control point, time axis. Must lie in `[0, 1]`.
        x1: f32,
        /// First control point, progress axis.
        y1: f32,
        /// Second control point, time axis. Must lie in `[0, 1]`.
        x2: f32,
        /// Second control point, progress axis.
        y2: f32,
    },
}

impl EasingFunction {
    /// Default easing function: CubicHermite with c1=0.33, c2=1.0 for natural
    /// ease-out feel.
    pub const DEFAULT: Self = Self::CubicHermite { c1: 0.33, c2: 1.0 };

    /// The CSS `ease-in-out` curve.
    pub const EASE_IN_OUT: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. The endpoints map exactly to 0.0 and
    /// 1.0 for every curve.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                omt.mul_add(-omt, 1.0)
            }
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = t.mul_add(-2.0, 2.0);
                    (u * u).mul_add(-0.5, 1.0)
                }
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let omt = 1.0 - t;
                (omt * omt).mul_add(-omt, 1.0)
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = t.mul_add(-2.0, 2.0);
                    (u * u * u).mul_add(-0.5, 1.0)
                }
            }
            Self::SqrtOut => t.sqrt(),
            Self::CubicHermite { c1, c2 } => bezier_component(c1, c2, t),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let s = solve_bezier_param(x1, x2, t);
                bezier_component(y1, y2, s)
            }
        }
    }

    /// Reject curves whose parameters cannot produce a usable mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] for non-finite parameters or
    /// Bezier x control points outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), AnimError> {
        match *self {
            Self::CubicHermite { c1, c2 } => {
                if !(c1.is_finite() && c2.is_finite()) {
                    return Err(AnimError::InvalidArgument(format!(
                        "cubic hermite control values must be finite, got \
                         ({c1}, {c2})"
                    )));
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    return Err(AnimError::InvalidArgument(format!(
                        "bezier control points must be finite, got \
                         ({x1}, {y1}, {x2}, {y2})"
                    )));
                }
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(AnimError::InvalidArgument(format!(
                        "bezier x control points must lie in [0, 1], got \
                         x1={x1}, x2={x2}"
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::QuadraticIn => "quadratic_in",
            Self::QuadraticOut => "quadratic_out",
            Self::QuadraticInOut => "quadratic_in_out",
            Self::CubicIn => "cubic_in",
            Self::CubicOut => "cubic_out",
            Self::CubicInOut => "cubic_in_out",
            Self::SqrtOut => "sqrt_out",
            Self::CubicHermite { .. } => "cubic_hermite",
            Self::CubicBezier { .. } => "cubic_bezier",
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One axis of a unit cubic Bezier with endpoints 0 and 1. With the control
/// values as `a1`/`a2` this is also the cubic Hermite ease.
#[inline]
fn bezier_component(a1: f32, a2: f32, s: f32) -> f32 {
    let oms = 1.0 - s;
    (3.0 * a1 * oms * oms).mul_add(s, (3.0 * a2 * oms * s).mul_add(s, s * s * s))
}

#[inline]
fn bezier_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let oms = 1.0 - s;
    (3.0 * a1 * oms).mul_add(
        oms,
        (6.0 * (a2 - a1) * oms).mul_add(s, 3.0 * (1.0 - a2) * s * s),
    )
}

/// Find the curve parameter whose x coordinate equals `x`.
fn solve_bezier_param(x1: f32, x2: f32, x: f32) -> f32 {
    let mut s = x;
    for _ in 0..BEZIER_NEWTON_STEPS {
        let err = bezier_component(x1, x2, s) - x;
        if err.abs() < BEZIER_EPSILON {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < BEZIER_EPSILON {
            break;
        }
        s -= err / slope;
    }

    // x(s) is monotonic for x control points in [0, 1]
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..BEZIER_BISECT_STEPS {
        let value = bezier_component(x1, x2, s);
        if (value - x).abs() < BEZIER_EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 10] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::QuadraticInOut,
        EasingFunction::CubicIn,
        EasingFunction::CubicOut,
        EasingFunction::CubicInOut,
        EasingFunction::SqrtOut,
        EasingFunction::DEFAULT,
        EasingFunction::EASE_IN_OUT,
    ];

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_every_curve_hits_exact_endpoints() {
        for curve in ALL {
            assert_eq!(curve.evaluate(0.0), 0.0, "{}", curve.name());
            assert_eq!(curve.evaluate(1.0), 1.0, "{}", curve.name());
        }
    }

    #[test]
    fn test_cubic_hermite_ease_out_shape() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        let result_at_quarter = hermite.evaluate(0.25);
        assert!(
            result_at_quarter > 0.25,
            "Ease-out should have value > 0.25 at t=0.25, got {result_at_quarter}"
        );
    }

    #[test]
    fn test_cubic_hermite_midpoint() {
        // 3·c1·t(1-t)² + 3·c2·(1-t)t² + t³ at t=0.5
        let value = EasingFunction::DEFAULT.evaluate(0.5);
        assert!((value - 0.623_75).abs() < 1e-6, "got {value}");
        assert!((EasingFunction::CubicOut.evaluate(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        for curve in ALL {
            assert_eq!(curve.evaluate(-0.5), 0.0);
            assert_eq!(curve.evaluate(1.5), 1.0);
        }
        assert_eq!(EasingFunction::Linear.evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_quadratic_curves() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
        assert!((EasingFunction::QuadraticInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!(EasingFunction::QuadraticInOut.evaluate(0.25) < 0.25);
    }

    #[test]
    fn test_cubic_in_out_symmetry() {
        let curve = EasingFunction::CubicInOut;
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!(curve.evaluate(0.25) < 0.25);
        assert!(curve.evaluate(0.75) > 0.75);
    }

    #[test]
    fn test_sqrt_out() {
        assert!((EasingFunction::SqrtOut.evaluate(0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bezier_linear_control_points_match_linear() {
        let curve = EasingFunction::CubicBezier {
            x1: 0.25,
            y1: 0.25,
            x2: 0.75,
            y2: 0.75,
        };
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((curve.evaluate(t) - t).abs() < 1e-4, "t={t}");
        }
    }

    #[test]
    fn test_bezier_ease_in_out_is_monotonic() {
        let curve = EasingFunction::EASE_IN_OUT;
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = curve.evaluate(i as f32 / 100.0);
            assert!(v >= prev - 1e-5, "not monotonic at step {i}");
            prev = v;
        }
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_validate_rejects_malformed_curves() {
        let out_of_range = EasingFunction::CubicBezier {
            x1: 1.5,
            y1: 0.0,
            x2: 0.5,
            y2: 1.0,
        };
        assert!(matches!(
            out_of_range.validate(),
            Err(AnimError::InvalidArgument(_))
        ));

        let nan = EasingFunction::CubicHermite {
            c1: f32::NAN,
            c2: 1.0,
        };
        assert!(nan.validate().is_err());

        for curve in ALL {
            assert!(curve.validate().is_ok(), "{}", curve.name());
        }
    }

    #[test]
    fn test_default_is_cubic_hermite() {
        assert_eq!(
            EasingFunction::default(),
            EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 }
        );
    }

    #[test]
    fn test_serde_tagged_representation() {
        let json = serde_json::to_string(&EasingFunction::Linear).unwrap();
        assert_eq!(json, r#"{"kind":"linear"}"#);
        let parsed: EasingFunction = serde_json::from_str(
            r#"{"kind":"cubic_bezier","x1":0.42,"y1":0.0,"x2":0.58,"y2":1.0}"#,
        )
        .unwrap();
        assert_eq!(parsed, EasingFunction::EASE_IN_OUT);
    }
}
