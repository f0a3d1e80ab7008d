//! Per-type interpolation strategies.
//!
//! An [`Interpolator`] must be meaningful for any real `t`, not only `[0, 1]`:
//! continue-looping tweens sample the virtual range beyond the literal
//! endpoints (`t = 2` is one full span past `b`).

pub mod functions;

use crate::ease::Easing;
use crate::error::TweenError;
use crate::value::{Color, Value};

use functions::{lerp_f32, lerp_f64, lerp_vec, round_lerp, slerp_quat};

/// Strategy that computes (and extrapolates) values of type `V`.
pub trait Interpolator<V> {
    /// Value at `t` on the line through `a` (t = 0) and `b` (t = 1). Unclamped.
    fn evaluate(&self, a: &V, b: &V, t: f64) -> V;

    /// Clamp `t`, ease it, evaluate, and hand the result to `sink` exactly once.
    #[inline]
    fn apply(&self, a: &V, b: &V, t: f64, sink: &mut dyn FnMut(V), ease: &dyn Easing) {
        let eased = ease.remap(t.clamp(0.0, 1.0));
        sink(self.evaluate(a, b, eased));
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct FloatInterp;

impl Interpolator<f32> for FloatInterp {
    #[inline]
    fn evaluate(&self, a: &f32, b: &f32, t: f64) -> f32 {
        lerp_f32(*a, *b, t)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DoubleInterp;

impl Interpolator<f64> for DoubleInterp {
    #[inline]
    fn evaluate(&self, a: &f64, b: &f64, t: f64) -> f64 {
        lerp_f64(*a, *b, t)
    }
}

/// Rounds to the nearest integer; saturates at the i32 range.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntInterp;

impl Interpolator<i32> for IntInterp {
    #[inline]
    fn evaluate(&self, a: &i32, b: &i32, t: f64) -> i32 {
        round_lerp(*a as i64, *b as i64, t) as i32
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LongInterp;

impl Interpolator<i64> for LongInterp {
    #[inline]
    fn evaluate(&self, a: &i64, b: &i64, t: f64) -> i64 {
        round_lerp(*a, *b, t) as i64
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Vec2Interp;

impl Interpolator<[f32; 2]> for Vec2Interp {
    #[inline]
    fn evaluate(&self, a: &[f32; 2], b: &[f32; 2], t: f64) -> [f32; 2] {
        lerp_vec(*a, *b, t)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Vec3Interp;

impl Interpolator<[f32; 3]> for Vec3Interp {
    #[inline]
    fn evaluate(&self, a: &[f32; 3], b: &[f32; 3], t: f64) -> [f32; 3] {
        lerp_vec(*a, *b, t)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Vec4Interp;

impl Interpolator<[f32; 4]> for Vec4Interp {
    #[inline]
    fn evaluate(&self, a: &[f32; 4], b: &[f32; 4], t: f64) -> [f32; 4] {
        lerp_vec(*a, *b, t)
    }
}

/// Channel-wise RGBA lerp; channels are left unclamped.
#[derive(Copy, Clone, Debug, Default)]
pub struct ColorInterp;

impl Interpolator<Color> for ColorInterp {
    #[inline]
    fn evaluate(&self, a: &Color, b: &Color, t: f64) -> Color {
        Color::from_array(lerp_vec(a.to_array(), b.to_array(), t))
    }
}

/// Unclamped shortest-arc slerp on (x, y, z, w) quaternions.
#[derive(Copy, Clone, Debug, Default)]
pub struct QuatInterp;

impl Interpolator<[f32; 4]> for QuatInterp {
    #[inline]
    fn evaluate(&self, a: &[f32; 4], b: &[f32; 4], t: f64) -> [f32; 4] {
        slerp_quat(*a, *b, t)
    }
}

/// Dynamic interpolation across [`Value`] kinds.
///
/// Step-only kinds (Bool, Text) switch to `b` at `t >= 0.5`. Mismatched kinds
/// fall back to the left value; use [`ValueInterp::try_evaluate`] to surface
/// the mismatch instead.
#[derive(Copy, Clone, Debug, Default)]
pub struct ValueInterp;

impl ValueInterp {
    pub fn try_evaluate(&self, a: &Value, b: &Value, t: f64) -> Result<Value, TweenError> {
        let step = |a: &Value, b: &Value| if t >= 0.5 { b.clone() } else { a.clone() };
        let out = match (a, b) {
            (Value::Scalar(va), Value::Scalar(vb)) => Value::Scalar(lerp_f32(*va, *vb, t)),
            (Value::Vec2(va), Value::Vec2(vb)) => Value::Vec2(lerp_vec(*va, *vb, t)),
            (Value::Vec3(va), Value::Vec3(vb)) => Value::Vec3(lerp_vec(*va, *vb, t)),
            (Value::Vec4(va), Value::Vec4(vb)) => Value::Vec4(lerp_vec(*va, *vb, t)),
            (Value::Quat(qa), Value::Quat(qb)) => Value::Quat(slerp_quat(*qa, *qb, t)),
            (Value::Color(ca), Value::Color(cb)) => Value::Color(lerp_vec(*ca, *cb, t)),
            (
                Value::Transform {
                    translation: ta,
                    rotation: ra,
                    scale: sa,
                },
                Value::Transform {
                    translation: tb,
                    rotation: rb,
                    scale: sb,
                },
            ) => Value::Transform {
                translation: lerp_vec(*ta, *tb, t),
                rotation: slerp_quat(*ra, *rb, t),
                scale: lerp_vec(*sa, *sb, t),
            },
            (Value::Bool(_), Value::Bool(_)) | (Value::Text(_), Value::Text(_)) => step(a, b),
            _ => {
                return Err(TweenError::ValueKindMismatch {
                    expected: a.kind(),
                    actual: b.kind(),
                })
            }
        };
        Ok(out)
    }
}

impl Interpolator<Value> for ValueInterp {
    fn evaluate(&self, a: &Value, b: &Value, t: f64) -> Value {
        // Fail-soft: prefer the left value on kind mismatch.
        self.try_evaluate(a, b, t).unwrap_or_else(|_| a.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::{Ease, EasePhase, Linear};

    #[test]
    fn apply_clamps_before_easing() {
        let mut got = Vec::new();
        FloatInterp.apply(&0.0, &10.0, 1.7, &mut |v| got.push(v), &Linear);
        FloatInterp.apply(&0.0, &10.0, -3.0, &mut |v| got.push(v), &Linear);
        assert_eq!(got, vec![10.0, 0.0]);
    }

    #[test]
    fn apply_uses_ease() {
        let mut got = 0.0;
        let ease = Ease::Quadratic(EasePhase::In);
        DoubleInterp.apply(&0.0, &8.0, 0.5, &mut |v| got = v, &ease);
        assert_eq!(got, 2.0);
    }

    #[test]
    fn value_kind_mismatch() {
        let err = ValueInterp
            .try_evaluate(&Value::Scalar(1.0), &Value::Bool(true), 0.5)
            .unwrap_err();
        assert!(matches!(err, TweenError::ValueKindMismatch { .. }));
        assert_eq!(
            ValueInterp.evaluate(&Value::Scalar(1.0), &Value::Bool(true), 0.5),
            Value::Scalar(1.0)
        );
    }
}
