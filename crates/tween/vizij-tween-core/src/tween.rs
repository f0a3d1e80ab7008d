//! Leaf timeline node that drives one value from `from()` to `to()`.
//!
//! Endpoints are producers, re-sampled on every tick, so a tween can chase a
//! moving target. Each tick selects a sub-range of the *extended* value line
//! through `from` (0) and `to` (1) according to the loop type, direction and
//! the parent's loop position:
//!
//! | loop type | forward `(lo, hi)`  | backward `(lo, hi)`            |
//! |-----------|---------------------|--------------------------------|
//! | Reset     | `(P, P+1)`          | `(M-P, M-P-1)`                 |
//! | Continue  | `(P·N+L, P·N+L+1)`  | `(M·N-P·N-L, M·N-P·N-L-1)`     |
//! | Mirror    | `(P, P+1)`          | `(M-P-1, M-P)`                 |
//!
//! `L` own loop, `P` parent loop, `N` own loop count, `M` parent loop count.

use std::fmt;

use crate::config::{LoopCount, TimelineConfig};
use crate::ease::Easing;
use crate::error::TweenError;
use crate::interp::Interpolator;
use crate::timeline::{Direction, LoopTick, LoopType, Playable, Timeline};

pub type Producer<V> = Box<dyn Fn() -> V>;
pub type Sink<V> = Box<dyn FnMut(V)>;

/// Sub-range `(lo, hi)` of the extended value line for one tick.
///
/// Arguments are the own loop index `l`, parent loop index `p`, own loop count
/// `n` and parent loop count `m`.
pub fn sub_range(
    loop_type: LoopType,
    direction: Direction,
    l: f64,
    p: f64,
    n: f64,
    m: f64,
) -> (f64, f64) {
    match (loop_type, direction) {
        (LoopType::Reset, Direction::Forward) => (p, p + 1.0),
        (LoopType::Reset, Direction::Backward) => (m - p, m - p - 1.0),
        (LoopType::Continue, Direction::Forward) => {
            let lo = p * n + l;
            (lo, lo + 1.0)
        }
        (LoopType::Continue, Direction::Backward) => {
            let lo = m * n - p * n - l;
            (lo, lo - 1.0)
        }
        (LoopType::Mirror, Direction::Forward) => (p, p + 1.0),
        (LoopType::Mirror, Direction::Backward) => (m - p - 1.0, m - p),
    }
}

/// There-and-back fold of loop-local progress: 0 → 1 → 0.
#[inline]
pub fn fold_mirror(local: f64) -> f64 {
    let u = local * 2.0;
    if u > 1.0 {
        2.0 - u
    } else {
        u
    }
}

/// Loop count used by the sub-range algebra. An infinite node counts only
/// the loops reached so far.
#[inline]
pub(crate) fn algebra_loops(loops: LoopCount, loop_index: u64) -> f64 {
    match loops {
        LoopCount::Finite(n) => n as f64,
        LoopCount::Infinite => loop_index.saturating_add(1) as f64,
    }
}

/// Concrete tween over value type `V` with interpolation strategy `I`.
pub struct Tween<V, I> {
    timeline: Timeline,
    interp: I,
    from: Producer<V>,
    to: Producer<V>,
    sink: Sink<V>,
}

impl<V, I> Tween<V, I>
where
    I: Interpolator<V>,
{
    pub fn new(
        config: TimelineConfig,
        interp: I,
        from: impl Fn() -> V + 'static,
        to: impl Fn() -> V + 'static,
        sink: impl FnMut(V) + 'static,
    ) -> Result<Self, TweenError> {
        Ok(Self {
            timeline: Timeline::new(config)?,
            interp,
            from: Box::new(from),
            to: Box::new(to),
            sink: Box::new(sink),
        })
    }

    /// Tween between two fixed values.
    pub fn between(
        config: TimelineConfig,
        interp: I,
        from: V,
        to: V,
        sink: impl FnMut(V) + 'static,
    ) -> Result<Self, TweenError>
    where
        V: Clone + 'static,
    {
        Self::new(config, interp, move || from.clone(), move || to.clone(), sink)
    }

    #[inline]
    pub fn interpolator(&self) -> &I {
        &self.interp
    }

    /// Sub-range `(lo, hi)` selected for `tick`.
    pub fn range_for(&self, tick: &LoopTick) -> (f64, f64) {
        let cfg = self.timeline.config();
        sub_range(
            cfg.loop_type,
            tick.direction,
            tick.loop_index as f64,
            tick.parent.index as f64,
            algebra_loops(cfg.loops, tick.loop_index),
            tick.parent.count as f64,
        )
    }
}

impl<V, I> Playable for Tween<V, I>
where
    I: Interpolator<V>,
{
    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    fn on_loop_tick(&mut self, tick: &LoopTick) {
        let a = (self.from)();
        let b = (self.to)();
        let (lo, hi) = self.range_for(tick);
        let sub_from = self.interp.evaluate(&a, &b, lo);
        let sub_to = self.interp.evaluate(&a, &b, hi);

        let cfg = self.timeline.config();
        let ease = &cfg.ease;
        let sink = &mut *self.sink;
        if cfg.loop_type == LoopType::Mirror {
            // Direction picks the endpoints; the fold is direction-agnostic.
            self.interp
                .apply(&sub_from, &sub_to, fold_mirror(tick.local), sink, ease);
        } else if tick.direction.is_backward() && !tick.zero_duration {
            self.interp
                .apply(&sub_from, &sub_to, tick.local, sink, &ease.inverted());
        } else {
            self.interp.apply(&sub_from, &sub_to, tick.local, sink, ease);
        }
    }
}

impl<V, I: fmt::Debug> fmt::Debug for Tween<V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("timeline", &self.timeline)
            .field("interp", &self.interp)
            .finish_non_exhaustive()
    }
}
