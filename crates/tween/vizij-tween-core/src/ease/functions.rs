//! Closed-form easing formulas over the unit interval.
//!
//! Every formula maps 0 to 0 and 1 to 1. Elastic and back curves overshoot in
//! between. Exponential and elastic curves are pinned at the ends because
//! their closed forms only approach the boundary asymptotically.

use std::f64::consts::{FRAC_PI_2, PI};

#[inline]
pub fn quadratic_in(t: f64) -> f64 {
    t * t
}
#[inline]
pub fn quadratic_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}
#[inline]
pub fn quadratic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[inline]
pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}
#[inline]
pub fn cubic_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
#[inline]
pub fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn quartic_in(t: f64) -> f64 {
    t.powi(4)
}
#[inline]
pub fn quartic_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}
#[inline]
pub fn quartic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

#[inline]
pub fn quintic_in(t: f64) -> f64 {
    t.powi(5)
}
#[inline]
pub fn quintic_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}
#[inline]
pub fn quintic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

#[inline]
pub fn sine_in(t: f64) -> f64 {
    1.0 - (t * FRAC_PI_2).cos()
}
#[inline]
pub fn sine_out(t: f64) -> f64 {
    (t * FRAC_PI_2).sin()
}
#[inline]
pub fn sine_in_out(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

#[inline]
pub fn circular_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}
#[inline]
pub fn circular_out(t: f64) -> f64 {
    (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt()
}
#[inline]
pub fn circular_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
    }
}

#[inline]
pub fn exponential_in(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * t - 10.0)
    }
}
#[inline]
pub fn exponential_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}
#[inline]
pub fn exponential_in_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;

#[inline]
pub fn elastic_in(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}
#[inline]
pub fn elastic_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}
#[inline]
pub fn elastic_in_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin() / 2.0 + 1.0
    }
}

const BACK_C1: f64 = 1.70158;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;

#[inline]
pub fn back_in(t: f64) -> f64 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}
#[inline]
pub fn back_out(t: f64) -> f64 {
    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}
#[inline]
pub fn back_in_out(t: f64) -> f64 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

#[inline]
pub fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}
#[inline]
pub fn bounce_in(t: f64) -> f64 {
    1.0 - bounce_out(1.0 - t)
}
#[inline]
pub fn bounce_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}

/// `n` equal steps from 0 to 1. Zero steps behaves like a single step.
#[inline]
pub fn steps(n: u32, t: f64) -> f64 {
    let n = n.max(1) as f64;
    (t * n).floor().min(n) / n
}
