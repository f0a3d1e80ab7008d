//! Input contracts for the engine.
//!
//! Hosts build these and pass them into Engine::update() each tick. Commands
//! are applied in order before any player advances.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Player-level commands applied before stepping.
    #[serde(default)]
    pub player_cmds: Vec<PlayerCommand>,
}

impl Inputs {
    pub fn with(cmds: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            player_cmds: cmds.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum PlayerCommand {
    /// Resume advancing on update.
    Play { player: PlayerId },
    /// Hold the cursor; seeks still apply.
    Pause { player: PlayerId },
    /// Stop for good; only Restart revives the player.
    Stop { player: PlayerId },
    /// Rewind to the start and resume.
    Restart { player: PlayerId },
    /// Jump to an absolute time in seconds.
    Seek { player: PlayerId, time: f64 },
    /// Multiplier applied to dt; negative plays in reverse.
    SetSpeed { player: PlayerId, speed: f64 },
}

impl PlayerCommand {
    #[inline]
    pub fn player(&self) -> PlayerId {
        match self {
            PlayerCommand::Play { player }
            | PlayerCommand::Pause { player }
            | PlayerCommand::Stop { player }
            | PlayerCommand::Restart { player }
            | PlayerCommand::Seek { player, .. }
            | PlayerCommand::SetSpeed { player, .. } => *player,
        }
    }
}
