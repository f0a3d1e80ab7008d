//! Composite timeline: children placed at start offsets inside one loop,
//! with the composite itself looping under the same loop-type algebra as a
//! tween.
//!
//! Children see the composite's loop position as their [`ParentLoop`]:
//! - `Reset` / `Mirror`: the composite's own parent context passes through
//!   unchanged, so every composite loop replays the same child segments.
//! - `Continue`: `index = P·N + L`, `count = M·N`, so continue-looping
//!   children keep progressing across composite loops at any nesting depth.
//!
//! A backward composite plays the exact time-reverse of the forward one.

use std::fmt;

use crate::config::{LoopCount, TimelineConfig};
use crate::ease::Easing;
use crate::error::TweenError;
use crate::timeline::{LoopTick, LoopType, ParentLoop, Playable, PlaybackState, Timeline};
use crate::tween::fold_mirror;

struct Entry {
    start: f64,
    node: Box<dyn Playable>,
}

impl Entry {
    /// Seconds this child occupies inside the composite loop.
    fn span(&self) -> f64 {
        self.node.total_duration().unwrap_or(0.0)
    }

    fn end(&self) -> f64 {
        self.start + self.span()
    }
}

pub struct Sequence {
    timeline: Timeline,
    entries: Vec<Entry>,
    /// Start of the most recently appended child, for `join`.
    last_start: f64,
}

impl Sequence {
    /// Empty sequence. `config.duration` is ignored: the loop length is the
    /// end of the latest child.
    pub fn new(config: TimelineConfig) -> Result<Self, TweenError> {
        let mut timeline = Timeline::new(config)?;
        timeline.set_duration(0.0);
        Ok(Self {
            timeline,
            entries: Vec::new(),
            last_start: 0.0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seconds per composite loop.
    #[inline]
    pub fn loop_duration(&self) -> f64 {
        self.timeline.config().duration
    }

    /// Place `node` after everything added so far (plus the node's own delay).
    pub fn append(&mut self, node: Box<dyn Playable>) -> Result<&mut Self, TweenError> {
        let at = self.loop_duration();
        self.place(at, node)
    }

    /// Place `node` at the same start as the previously added child.
    pub fn join(&mut self, node: Box<dyn Playable>) -> Result<&mut Self, TweenError> {
        let at = self.last_start;
        self.place(at, node)
    }

    /// Place `node` at an absolute offset (plus the node's own delay).
    pub fn insert(&mut self, at: f64, node: Box<dyn Playable>) -> Result<&mut Self, TweenError> {
        if !at.is_finite() || at < 0.0 {
            return Err(TweenError::InvalidTime { time: at });
        }
        self.place(at, node)
    }

    fn place(&mut self, at: f64, node: Box<dyn Playable>) -> Result<&mut Self, TweenError> {
        if node.total_duration().is_none() {
            return Err(TweenError::UnboundedChild {
                index: self.entries.len(),
            });
        }
        let entry = Entry {
            start: at + node.timeline().config().delay,
            node,
        };
        log::debug!(
            "sequence child {} placed at {} (span {})",
            self.entries.len(),
            entry.start,
            entry.span()
        );
        let end = entry.end();
        self.last_start = at;
        self.entries.push(entry);
        if end > self.loop_duration() {
            self.timeline.set_duration(end);
        }
        Ok(self)
    }

    /// Child at insertion position `index`.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&dyn Playable> {
        self.entries.get(index).map(|entry| entry.node.as_ref())
    }

    /// Parent context handed to children for `tick`.
    pub fn child_context(&self, tick: &LoopTick) -> ParentLoop {
        let cfg = self.timeline.config();
        match cfg.loop_type {
            LoopType::Reset | LoopType::Mirror => tick.parent,
            LoopType::Continue => {
                let (own, count) = match cfg.loops {
                    LoopCount::Finite(n) => {
                        let n = n as u64;
                        let own = if tick.direction.is_backward() {
                            (n - 1).saturating_sub(tick.loop_index)
                        } else {
                            tick.loop_index
                        };
                        (own, n)
                    }
                    LoopCount::Infinite => (tick.loop_index, tick.loop_index.saturating_add(1)),
                };
                // Deep nesting of huge counts saturates instead of wrapping.
                ParentLoop {
                    index: tick.parent.index.saturating_mul(count).saturating_add(own),
                    count: tick.parent.count.saturating_mul(count),
                }
            }
        }
    }

    /// Time inside the composite loop for `tick`.
    pub fn local_time(&self, tick: &LoopTick) -> f64 {
        let cfg = self.timeline.config();
        let mut u = if tick.direction.is_backward() {
            1.0 - tick.local
        } else {
            tick.local
        };
        if cfg.loop_type == LoopType::Mirror {
            u = fold_mirror(u);
        }
        cfg.ease.remap(u) * self.loop_duration()
    }
}

impl Playable for Sequence {
    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    fn on_loop_tick(&mut self, tick: &LoopTick) {
        let ctx = self.child_context(tick);
        let tau = self.local_time(tick);

        // Rewind children that played but lie ahead of `tau`, latest first,
        // so the children reached below win on shared targets.
        for entry in self.entries.iter_mut().rev() {
            if entry.start > tau
                && entry.node.state() != PlaybackState::Idle
                && entry.node.timeline().elapsed() > 0.0
            {
                entry.node.seek_nested(0.0, ctx, false);
                entry.node.drain_events();
            }
        }

        for entry in self.entries.iter_mut() {
            if entry.start > tau {
                continue;
            }
            let child = entry.node.timeline();
            let elapsed = if child.is_zero_duration() {
                child.completion_elapsed().unwrap_or(0.0)
            } else {
                (tau - entry.start).clamp(0.0, entry.span())
            };
            entry.node.seek_nested(elapsed, ctx, tick.notify);
            // Children replay every composite loop; only the sequence's own
            // lifecycle surfaces.
            entry.node.drain_events();
        }
    }

    fn stop(&mut self) {
        self.timeline.stop();
        for entry in &mut self.entries {
            entry.node.stop();
            entry.node.drain_events();
        }
    }

    fn restart(&mut self) {
        self.timeline.restart();
        for entry in &mut self.entries {
            entry.node.restart();
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("timeline", &self.timeline)
            .field("children", &self.entries.len())
            .finish()
    }
}
