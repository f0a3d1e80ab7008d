//! Timeline nodes: map an elapsed playback time to (loop index, loop-local
//! progress) and hand that to a type-specific hook.
//!
//! A node may be nested under a composite that loops on its own. The
//! composite passes its loop position down as a [`ParentLoop`] on every tick;
//! children never touch parent state.
//!
//! Time math (finite, non-zero loop duration `d`, `n` loops):
//! - `loop = floor(elapsed / d)`, clamped to `[0, n - 1]`
//! - `local = (elapsed - loop * d) / d`, clamped to `[0, 1]`
//!
//! A zero-duration node reads `elapsed` as a loop counter instead and never
//! divides: `loop = floor(elapsed)`, `local = elapsed - loop`. A whole counter
//! `k > 0` lands on the end of loop `k - 1`, so every step of the counter
//! delivers a completed loop.
//!
//! Loop indices saturate at [`MAX_LOOP_INDEX`].

use serde::{Deserialize, Serialize};

use crate::config::{LoopCount, TimelineConfig};
use crate::error::TweenError;

/// Highest loop index a timeline reports. Every index up to here is exact as
/// an `f64`, and index arithmetic stays clear of `u64` overflow.
pub const MAX_LOOP_INDEX: u64 = 1 << 53;

/// How successive loops relate to each other.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopType {
    /// Every loop replays the same range.
    #[default]
    Reset,
    /// Loops chain into one long progression over the extended range.
    Continue,
    /// Each loop goes there and back.
    Mirror,
}

/// Which way a node plays its loops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Backward)
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Lifecycle of a node's playback cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Not ticked since construction or the last restart.
    Idle,
    Running,
    /// At or past the end of the last loop. Seeking back resumes running.
    Completed,
    /// Ignores seeks until restarted.
    Stopped,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        }
    }
}

/// Loop position of the enclosing composite, as seen by a child.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentLoop {
    /// Loops the parent has completed.
    pub index: u64,
    /// The parent's total loop count.
    pub count: u64,
}

impl ParentLoop {
    /// Context of a node with no parent.
    pub const ROOT: ParentLoop = ParentLoop { index: 0, count: 1 };
}

impl Default for ParentLoop {
    fn default() -> Self {
        Self::ROOT
    }
}

/// One resolved tick, as delivered to [`Playable::on_loop_tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LoopTick {
    pub loop_index: u64,
    /// Loop-local normalized position in `[0, 1]`.
    pub local: f64,
    pub direction: Direction,
    /// Whether change notifications should fire for this tick.
    pub notify: bool,
    pub parent: ParentLoop,
    /// Tick came from loop-counter mode (zero loop duration).
    pub zero_duration: bool,
}

/// Semantic signals recorded by a node while `notify` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// First tick after `Idle`.
    Started,
    /// The latest loop finished by this tick.
    LoopCompleted { loop_index: u64 },
    Completed,
    /// Recorded on `stop` even when not notifying.
    Stopped,
}

/// Scheduling core shared by every node: immutable config plus the
/// node-owned playback cursor.
#[derive(Debug, Clone)]
pub struct Timeline {
    config: TimelineConfig,
    elapsed: f64,
    state: PlaybackState,
    current_loop: u64,
    local: f64,
    /// Whole loops behind the cursor, for loop-completion events.
    completed_loops: u64,
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Result<Self, TweenError> {
        config.validate()?;
        Ok(Self {
            config,
            elapsed: 0.0,
            state: PlaybackState::Idle,
            current_loop: 0,
            local: 0.0,
            completed_loops: 0,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn current_loop(&self) -> u64 {
        self.current_loop
    }

    /// Loop-local progress from the last tick.
    #[inline]
    pub fn local_progress(&self) -> f64 {
        self.local
    }

    #[inline]
    pub fn is_zero_duration(&self) -> bool {
        self.config.duration == 0.0
    }

    /// Seconds across all loops, `None` when infinite.
    #[inline]
    pub fn total_duration(&self) -> Option<f64> {
        self.config.total_duration()
    }

    /// Elapsed value at which the node completes, in the node's own time
    /// domain (loop counts for zero-duration nodes).
    #[inline]
    pub fn completion_elapsed(&self) -> Option<f64> {
        let loops = self.config.loops.finite()? as f64;
        if self.is_zero_duration() {
            Some(loops)
        } else {
            Some(self.config.duration * loops)
        }
    }

    /// Composites recompute their loop length as children are added.
    pub(crate) fn set_duration(&mut self, duration: f64) {
        self.config.duration = duration.max(0.0);
    }

    /// Map `elapsed` to `(loop index, local progress)`.
    ///
    /// Returns `None` when the node has zero loops and therefore never runs.
    pub fn resolve(&self, elapsed: f64) -> Option<(u64, f64)> {
        let elapsed = elapsed.max(0.0);
        let limit = match self.config.loops {
            LoopCount::Finite(0) => return None,
            LoopCount::Finite(n) => Some(n as u64),
            LoopCount::Infinite => None,
        };

        let (index, local) = if self.is_zero_duration() {
            let index = elapsed.floor();
            if index > 0.0 && elapsed == index {
                (index - 1.0, 1.0)
            } else {
                (index, elapsed - index)
            }
        } else {
            let d = self.config.duration;
            let index = (elapsed / d).floor();
            (index, (elapsed - index * d) / d)
        };

        let index = (index as u64).min(MAX_LOOP_INDEX);
        match limit {
            Some(n) if index >= n => Some((n - 1, 1.0)),
            _ => Some((index, local.clamp(0.0, 1.0))),
        }
    }

    /// Whole loops finished at `elapsed`, capped at the loop count.
    pub fn loops_completed_at(&self, elapsed: f64) -> u64 {
        if self.is_complete_at(elapsed) {
            return self.config.loops.finite().map_or(0, u64::from);
        }
        let elapsed = elapsed.max(0.0);
        let whole = if self.is_zero_duration() {
            elapsed.floor()
        } else {
            (elapsed / self.config.duration).floor()
        };
        (whole as u64).min(MAX_LOOP_INDEX)
    }

    /// Whether `elapsed` is at or past the end of the last loop.
    #[inline]
    pub fn is_complete_at(&self, elapsed: f64) -> bool {
        self.completion_elapsed().is_some_and(|end| elapsed >= end)
    }

    /// Target elapsed time for an `advance(dt)` call.
    ///
    /// Zero-duration nodes complete one loop per call regardless of `dt`.
    pub fn advance_target(&self, dt: f64) -> f64 {
        if self.is_zero_duration() {
            self.elapsed.floor() + 1.0
        } else {
            (self.elapsed + dt).max(0.0)
        }
    }

    /// Move the cursor to `elapsed` and produce the tick to deliver.
    ///
    /// Returns `None` when nothing should be delivered: the node is stopped,
    /// the time is not finite, or the node has zero loops.
    pub fn begin_tick(
        &mut self,
        elapsed: f64,
        parent: ParentLoop,
        notify: bool,
    ) -> Option<LoopTick> {
        if self.state == PlaybackState::Stopped {
            log::trace!("seek({elapsed}) ignored on stopped timeline");
            return None;
        }
        if !elapsed.is_finite() {
            log::warn!("ignoring non-finite timeline time {elapsed}");
            return None;
        }
        let elapsed = elapsed.max(0.0);
        let prev_state = self.state;
        let prev_completed = self.completed_loops;
        self.elapsed = elapsed;

        let Some((loop_index, local)) = self.resolve(elapsed) else {
            if prev_state != PlaybackState::Completed {
                self.transition(PlaybackState::Completed);
                if notify {
                    self.events.push(TimelineEvent::Completed);
                }
            }
            return None;
        };

        if prev_state == PlaybackState::Idle {
            self.transition(PlaybackState::Running);
            if notify {
                self.events.push(TimelineEvent::Started);
            }
        }

        let complete = self.is_complete_at(elapsed);
        let completed = self.loops_completed_at(elapsed);
        self.completed_loops = completed;
        if notify && completed > prev_completed {
            // One event per tick, reporting the latest loop left behind.
            self.events.push(TimelineEvent::LoopCompleted {
                loop_index: completed - 1,
            });
        }

        if complete {
            if self.state != PlaybackState::Completed {
                if notify {
                    self.events.push(TimelineEvent::Completed);
                }
                self.transition(PlaybackState::Completed);
            }
        } else if self.state == PlaybackState::Completed {
            // Scrubbed back from the end.
            self.transition(PlaybackState::Running);
        }

        self.current_loop = loop_index;
        self.local = local;
        log::trace!("timeline tick elapsed={elapsed} loop={loop_index} local={local}");

        Some(LoopTick {
            loop_index,
            local,
            direction: self.config.direction,
            notify,
            parent,
            zero_duration: self.is_zero_duration(),
        })
    }

    pub fn stop(&mut self) {
        if self.state != PlaybackState::Stopped {
            self.transition(PlaybackState::Stopped);
            self.events.push(TimelineEvent::Stopped);
        }
    }

    /// Rewind the cursor to the start and return to `Idle`.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.current_loop = 0;
        self.local = 0.0;
        self.completed_loops = 0;
        self.transition(PlaybackState::Idle);
    }

    /// Events recorded since the last drain.
    #[inline]
    pub fn pending_events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            log::debug!(
                "timeline {} -> {} at elapsed={}",
                self.state.name(),
                next.name(),
                self.elapsed
            );
            self.state = next;
        }
    }
}

/// A schedulable node. Implementors own a [`Timeline`] and react to ticks;
/// the provided methods drive the cursor.
pub trait Playable {
    fn timeline(&self) -> &Timeline;

    fn timeline_mut(&mut self) -> &mut Timeline;

    /// Type-specific reaction to a resolved tick.
    fn on_loop_tick(&mut self, tick: &LoopTick);

    /// Jump to `elapsed` seconds as a root node. Idempotent for equal inputs;
    /// calls need not be monotonic.
    fn seek(&mut self, elapsed: f64) {
        self.seek_nested(elapsed, ParentLoop::ROOT, true);
    }

    /// Jump to `elapsed` under an enclosing composite.
    fn seek_nested(&mut self, elapsed: f64, parent: ParentLoop, notify: bool) {
        if let Some(tick) = self.timeline_mut().begin_tick(elapsed, parent, notify) {
            self.on_loop_tick(&tick);
        }
    }

    /// Advance the cursor by `dt` seconds.
    fn advance(&mut self, dt: f64) {
        if !dt.is_finite() {
            log::warn!("ignoring non-finite advance dt {dt}");
            return;
        }
        let target = self.timeline().advance_target(dt);
        self.seek(target);
    }

    fn stop(&mut self) {
        self.timeline_mut().stop();
    }

    fn restart(&mut self) {
        self.timeline_mut().restart();
    }

    fn state(&self) -> PlaybackState {
        self.timeline().state()
    }

    fn is_finished(&self) -> bool {
        self.state() == PlaybackState::Completed
    }

    fn total_duration(&self) -> Option<f64> {
        self.timeline().total_duration()
    }

    fn drain_events(&mut self) -> Vec<TimelineEvent> {
        self.timeline_mut().drain_events()
    }
}
