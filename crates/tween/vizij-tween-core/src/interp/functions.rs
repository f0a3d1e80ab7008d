//! Interpolation helpers shared by the built-in interpolators:
//! - lerp_* (component-wise, unclamped)
//! - slerp_quat (unclamped spherical interpolation with shortest-arc correction)
//! - round_lerp (integral domains)
//!
//! None of these clamp `t`; values outside `[0, 1]` extrapolate.

/// Linear interpolation of scalars, computed in f64.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f64) -> f32 {
    (a as f64 + (b as f64 - a as f64) * t) as f32
}

#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec<const N: usize>(a: [f32; N], b: [f32; N], t: f64) -> [f32; N] {
    std::array::from_fn(|i| lerp_f32(a[i], b[i], t))
}

/// Lerp in the real domain, then round half away from zero.
#[inline]
pub fn round_lerp(a: i64, b: i64, t: f64) -> f64 {
    lerp_f64(a as f64, b as f64, t).round()
}

#[inline]
fn dot4(a: [f64; 4], b: [f64; 4]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn normalize4(mut q: [f64; 4]) -> [f64; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        for c in &mut q {
            *c *= inv_len;
        }
    }
    q
}

#[inline]
fn widen(q: [f32; 4]) -> [f64; 4] {
    [q[0] as f64, q[1] as f64, q[2] as f64, q[3] as f64]
}

#[inline]
fn narrow(q: [f64; 4]) -> [f32; 4] {
    [q[0] as f32, q[1] as f32, q[2] as f32, q[3] as f32]
}

/// Quaternion SLERP (x,y,z,w) with shortest-arc correction.
///
/// `t` is not clamped: `t = 2` continues rotating past `b` by the same arc.
/// Nearly parallel inputs fall back to normalized lerp.
pub fn slerp_quat(a: [f32; 4], b: [f32; 4], t: f64) -> [f32; 4] {
    let a = normalize4(widen(a));
    let mut b = normalize4(widen(b));
    let mut d = dot4(a, b);
    if d < 0.0 {
        for c in &mut b {
            *c = -*c;
        }
        d = -d;
    }
    let d = d.min(1.0);
    let theta = d.acos();
    let sin_theta = theta.sin();
    if sin_theta.abs() < 1e-6 {
        let q = [
            lerp_f64(a[0], b[0], t),
            lerp_f64(a[1], b[1], t),
            lerp_f64(a[2], b[2], t),
            lerp_f64(a[3], b[3], t),
        ];
        return narrow(normalize4(q));
    }
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;
    narrow([
        a[0] * wa + b[0] * wb,
        a[1] * wa + b[1] * wb,
        a[2] * wa + b[2] * wb,
        a[3] * wa + b[3] * wb,
    ])
}
