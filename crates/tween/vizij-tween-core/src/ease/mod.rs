//! Easing: remap linear progress `u` in `[0, 1]` to shaped progress.
//!
//! Callers clamp `u` into `[0, 1]` before remapping. Formulas keep
//! `remap(0) == 0` and `remap(1) == 1` but may overshoot in between.
//!
//! Backward playback uses [`InvertedEase`], a borrowed wrapper built at the
//! point of use. It holds no state, so any number of nodes can invert
//! different eases in the same tick.

pub mod curve;
pub mod functions;

use serde::{Deserialize, Serialize};

pub use curve::EaseCurve;

/// A remap function over the unit interval.
pub trait Easing {
    fn remap(&self, u: f64) -> f64;

    /// Reflect this ease through (0.5, 0.5).
    #[inline]
    fn inverted(&self) -> InvertedEase<'_, Self>
    where
        Self: Sized,
    {
        InvertedEase::new(self)
    }
}

/// Which end of the curve carries the acceleration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EasePhase {
    In,
    Out,
    InOut,
}

/// Built-in ease formulas keyed by family and phase.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    Quadratic(EasePhase),
    Cubic(EasePhase),
    Quartic(EasePhase),
    Quintic(EasePhase),
    Sine(EasePhase),
    Circular(EasePhase),
    Exponential(EasePhase),
    Elastic(EasePhase),
    Back(EasePhase),
    Bounce(EasePhase),
    /// `n` discrete steps.
    Steps(u32),
    /// Host-supplied piecewise curve.
    Curve(EaseCurve),
}

impl Ease {
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Ease::Linear)
    }
}

macro_rules! phased {
    ($phase:expr, $t:expr, $in_fn:path, $out_fn:path, $in_out_fn:path) => {
        match $phase {
            EasePhase::In => $in_fn($t),
            EasePhase::Out => $out_fn($t),
            EasePhase::InOut => $in_out_fn($t),
        }
    };
}

impl Easing for Ease {
    fn remap(&self, t: f64) -> f64 {
        use self::functions as f;
        match self {
            Ease::Linear => t,
            Ease::Quadratic(p) => phased!(p, t, f::quadratic_in, f::quadratic_out, f::quadratic_in_out),
            Ease::Cubic(p) => phased!(p, t, f::cubic_in, f::cubic_out, f::cubic_in_out),
            Ease::Quartic(p) => phased!(p, t, f::quartic_in, f::quartic_out, f::quartic_in_out),
            Ease::Quintic(p) => phased!(p, t, f::quintic_in, f::quintic_out, f::quintic_in_out),
            Ease::Sine(p) => phased!(p, t, f::sine_in, f::sine_out, f::sine_in_out),
            Ease::Circular(p) => phased!(p, t, f::circular_in, f::circular_out, f::circular_in_out),
            Ease::Exponential(p) => phased!(
                p,
                t,
                f::exponential_in,
                f::exponential_out,
                f::exponential_in_out
            ),
            Ease::Elastic(p) => phased!(p, t, f::elastic_in, f::elastic_out, f::elastic_in_out),
            Ease::Back(p) => phased!(p, t, f::back_in, f::back_out, f::back_in_out),
            Ease::Bounce(p) => phased!(p, t, f::bounce_in, f::bounce_out, f::bounce_in_out),
            Ease::Steps(n) => f::steps(*n, t),
            Ease::Curve(c) => c.sample(t),
        }
    }
}

/// Absent ease means linear.
impl Easing for Option<Ease> {
    #[inline]
    fn remap(&self, u: f64) -> f64 {
        match self {
            Some(e) => e.remap(u),
            None => u,
        }
    }
}

impl<E: Easing + ?Sized> Easing for &E {
    #[inline]
    fn remap(&self, u: f64) -> f64 {
        (**self).remap(u)
    }
}

/// Identity remap.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Easing for Linear {
    #[inline]
    fn remap(&self, u: f64) -> f64 {
        u
    }
}

/// Adapter for plain functions and closures.
#[derive(Copy, Clone)]
pub struct FnEase<F>(pub F);

impl<F: Fn(f64) -> f64> Easing for FnEase<F> {
    #[inline]
    fn remap(&self, u: f64) -> f64 {
        (self.0)(u)
    }
}

/// `remap(u) = 1 - target.remap(1 - u)`.
#[derive(Copy, Clone, Debug)]
pub struct InvertedEase<'a, E: Easing + ?Sized> {
    target: &'a E,
}

impl<'a, E: Easing + ?Sized> InvertedEase<'a, E> {
    #[inline]
    pub fn new(target: &'a E) -> Self {
        Self { target }
    }
}

impl<E: Easing + ?Sized> Easing for InvertedEase<'_, E> {
    #[inline]
    fn remap(&self, u: f64) -> f64 {
        1.0 - self.target.remap(1.0 - u)
    }
}
