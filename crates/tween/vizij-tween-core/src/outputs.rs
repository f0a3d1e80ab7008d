//! Output contracts from the engine.
//!
//! Values are delivered through each tween's sink as it ticks; outputs only
//! carry the semantic events of the tick.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::timeline::TimelineEvent;

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// Lifecycle event raised by a player's root node.
    Timeline {
        player: PlayerId,
        event: TimelineEvent,
    },
    /// The player's root node completed. Raised once per run.
    PlayerFinished { player: PlayerId },
    Error { message: String },
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events raised for one player.
    pub fn events_for(&self, player: PlayerId) -> impl Iterator<Item = &CoreEvent> {
        self.events.iter().filter(move |e| match e {
            CoreEvent::Timeline { player: p, .. } | CoreEvent::PlayerFinished { player: p } => {
                *p == player
            }
            _ => false,
        })
    }
}
