//! Piecewise-linear ease curves supplied by the host (e.g. authored in an editor).

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// Sorted `(t, value)` keys sampled with linear segments.
///
/// Outside the key range the nearest key's value is held. The curve is not
/// forced through (0,0) and (1,1); an authored curve that misses those points
/// will shift the tween endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct EaseCurve {
    keys: Vec<[f64; 2]>,
}

impl EaseCurve {
    /// Build a curve from keys. Keys must be non-empty, finite and sorted by `t`.
    pub fn new(keys: Vec<[f64; 2]>) -> Result<Self, TweenError> {
        if keys.is_empty() {
            return Err(TweenError::InvalidCurve {
                reason: "curve has no keys".into(),
            });
        }
        if keys.iter().flatten().any(|v| !v.is_finite()) {
            return Err(TweenError::InvalidCurve {
                reason: "curve keys must be finite".into(),
            });
        }
        if keys.windows(2).any(|w| w[1][0] < w[0][0]) {
            return Err(TweenError::InvalidCurve {
                reason: "curve keys must be sorted by time".into(),
            });
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[[f64; 2]] {
        &self.keys
    }

    pub fn sample(&self, t: f64) -> f64 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first[0] {
            return first[1];
        }
        if t >= last[0] {
            return last[1];
        }
        // First key strictly after t; guaranteed in 1..len by the checks above.
        let hi = self.keys.partition_point(|k| k[0] <= t);
        let [t0, v0] = self.keys[hi - 1];
        let [t1, v1] = self.keys[hi];
        let span = t1 - t0;
        if span <= 0.0 {
            return v1;
        }
        v0 + (v1 - v0) * ((t - t0) / span)
    }
}

impl TryFrom<Vec<[f64; 2]>> for EaseCurve {
    type Error = TweenError;

    fn try_from(keys: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<EaseCurve> for Vec<[f64; 2]> {
    fn from(curve: EaseCurve) -> Self {
        curve.keys
    }
}
