//! Vizij Tween Core (engine-agnostic)
//!
//! Procedural value tweening: a value of some type moves from a start to an
//! end over time, shaped by an ease, optionally looped (reset, continue or
//! mirror) and played forward or backward, possibly under an enclosing
//! looping composite.
//!
//! Layers, leaves first:
//! - [`ease`]: unit-interval remap functions and the borrowed [`InvertedEase`]
//! - [`interp`]: per-type strategies that interpolate *and extrapolate*
//! - [`timeline`]: elapsed time → (loop index, local progress), the [`Playable`] trait
//! - [`tween`]: leaf node with dynamic endpoints and the loop/direction algebra
//! - [`sequence`]: composite node that threads its loop position to children
//! - [`engine`]: optional driver that advances many root nodes per tick
//!
//! Everything runs synchronously on the calling thread; sinks are invoked
//! before `seek`/`advance` return.

pub mod config;
pub mod ease;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod sequence;
pub mod timeline;
pub mod tween;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::{EngineConfig, LoopCount, TimelineConfig};
pub use ease::{Ease, EaseCurve, EasePhase, Easing, FnEase, InvertedEase, Linear};
pub use engine::{Engine, Player};
pub use error::TweenError;
pub use ids::PlayerId;
pub use inputs::{Inputs, PlayerCommand};
pub use interp::{
    ColorInterp, DoubleInterp, FloatInterp, IntInterp, Interpolator, LongInterp, QuatInterp,
    ValueInterp, Vec2Interp, Vec3Interp, Vec4Interp,
};
pub use outputs::{CoreEvent, Outputs};
pub use sequence::Sequence;
pub use timeline::{
    Direction, LoopTick, LoopType, ParentLoop, Playable, PlaybackState, Timeline, TimelineEvent,
    MAX_LOOP_INDEX,
};
pub use tween::{fold_mirror, sub_range, Tween};
pub use value::{Color, Value, ValueKind};

/// Tween core result type
pub type Result<T> = core::result::Result<T, TweenError>;
