//! Error types for tween construction and playback control.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::value::ValueKind;

/// Errors surfaced by the tween core.
///
/// Per-tick evaluation never fails; everything here is raised either while
/// building a node or while routing a command to the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenError {
    /// Loop duration is negative, NaN or infinite.
    #[error("Invalid loop duration: {duration}")]
    InvalidDuration { duration: f64 },

    /// A non-finite time was handed to a checked API.
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// Piecewise ease curve keys are unusable.
    #[error("Invalid ease curve: {reason}")]
    InvalidCurve { reason: String },

    /// A sequence child loops forever, so the sequence has no loop length.
    #[error("Sequence child {index} loops infinitely and cannot be sequenced")]
    UnboundedChild { index: usize },

    /// Dynamic interpolation between two different value kinds.
    #[error("Value kind mismatch: expected {expected:?}, got {actual:?}")]
    ValueKindMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Engine command addressed a player that does not exist.
    #[error("Player not found: {player:?}")]
    PlayerNotFound { player: PlayerId },

    /// Config decoding failed.
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl TweenError {
    /// Coarse category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. }
            | Self::InvalidTime { .. }
            | Self::InvalidCurve { .. }
            | Self::ValueKindMismatch { .. } => "validation",
            Self::UnboundedChild { .. } => "composition",
            Self::PlayerNotFound { .. } => "player",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            TweenError::InvalidDuration { duration: -1.0 }.category(),
            "validation"
        );
        assert_eq!(
            TweenError::UnboundedChild { index: 2 }.category(),
            "composition"
        );
        assert_eq!(
            TweenError::PlayerNotFound {
                player: PlayerId(7)
            }
            .category(),
            "player"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: TweenError = serde_json::from_str::<f64>("nope").unwrap_err().into();
        assert!(matches!(err, TweenError::Serialization { .. }));
    }

    #[test]
    fn test_display() {
        let err = TweenError::InvalidDuration { duration: -0.5 };
        assert_eq!(err.to_string(), "Invalid loop duration: -0.5");
    }
}
