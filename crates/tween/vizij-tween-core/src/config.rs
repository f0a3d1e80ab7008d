//! Construction-time configuration for timeline nodes and the engine.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ease::Ease;
use crate::error::TweenError;
use crate::timeline::{Direction, LoopType};

/// How many loops a node plays.
///
/// JSON shape: a non-negative number, `-1`, or the string `"infinite"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoopCount {
    Finite(u32),
    Infinite,
}

impl LoopCount {
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, LoopCount::Infinite)
    }

    /// Finite count, if any.
    #[inline]
    pub fn finite(&self) -> Option<u32> {
        match self {
            LoopCount::Finite(n) => Some(*n),
            LoopCount::Infinite => None,
        }
    }
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

impl From<u32> for LoopCount {
    fn from(n: u32) -> Self {
        LoopCount::Finite(n)
    }
}

impl Serialize for LoopCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LoopCount::Finite(n) => serializer.serialize_u32(*n),
            LoopCount::Infinite => serializer.serialize_str("infinite"),
        }
    }
}

impl<'de> Deserialize<'de> for LoopCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(i64),
            Word(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(-1) => Ok(LoopCount::Infinite),
            Repr::Count(n) => u32::try_from(n)
                .map(LoopCount::Finite)
                .map_err(|_| D::Error::custom(format!("invalid loop count {n}"))),
            Repr::Word(w) if w.eq_ignore_ascii_case("infinite") => Ok(LoopCount::Infinite),
            Repr::Word(w) => Err(D::Error::custom(format!("invalid loop count '{w}'"))),
        }
    }
}

/// Everything a timeline node needs at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Seconds per loop. Zero selects loop-counter ticking.
    pub duration: f64,
    pub loops: LoopCount,
    pub loop_type: LoopType,
    pub direction: Direction,
    /// `None` plays linearly.
    pub ease: Option<Ease>,
    /// Start offset when appended to a sequence.
    pub delay: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            loops: LoopCount::Finite(1),
            loop_type: LoopType::Reset,
            direction: Direction::Forward,
            ease: None,
            delay: 0.0,
        }
    }
}

impl TimelineConfig {
    /// Config with the given loop duration and defaults elsewhere.
    #[inline]
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_loops(mut self, loops: impl Into<LoopCount>) -> Self {
        self.loops = loops.into();
        self
    }

    #[inline]
    pub fn with_loop_type(mut self, loop_type: LoopType) -> Self {
        self.loop_type = loop_type;
        self
    }

    #[inline]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[inline]
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    #[inline]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Reject negative or non-finite durations and delays.
    pub fn validate(&self) -> Result<(), TweenError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TweenError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(TweenError::InvalidTime { time: self.delay });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TweenError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Play time for all loops, `None` when infinite.
    #[inline]
    pub fn total_duration(&self) -> Option<f64> {
        self.loops.finite().map(|n| self.duration * n as f64)
    }
}

/// Sizing hints for the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial capacity for the player table.
    pub players_hint: usize,
    /// Maximum events to retain per tick; extra events are dropped.
    pub max_events_per_tick: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            players_hint: 64,
            max_events_per_tick: 1024,
        }
    }
}
