//! Engine: owns root timeline nodes ("players") and steps them each tick.
//!
//! Methods:
//! - new, add_player, remove_player, clear, apply_command, update (commands → advance → events)
//!
//! The engine is single-threaded. Sinks run synchronously inside `update`.

use hashbrown::HashMap;

use crate::config::EngineConfig;
use crate::error::TweenError;
use crate::ids::{IdAllocator, PlayerId};
use crate::inputs::{Inputs, PlayerCommand};
use crate::outputs::{CoreEvent, Outputs};
use crate::timeline::{Playable, PlaybackState};

/// A root node plus its playback controls.
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub speed: f64,
    pub paused: bool,
    node: Box<dyn Playable>,
    finished_reported: bool,
}

impl Player {
    fn new(id: PlayerId, name: String, node: Box<dyn Playable>) -> Self {
        Self {
            id,
            name,
            speed: 1.0,
            paused: false,
            node,
            finished_reported: false,
        }
    }

    #[inline]
    pub fn node(&self) -> &dyn Playable {
        self.node.as_ref()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.node.state()
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.node.timeline().elapsed()
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("speed", &self.speed)
            .field("paused", &self.paused)
            .field("state", &self.state())
            .finish()
    }
}

#[derive(Debug)]
pub struct Engine {
    cfg: EngineConfig,
    ids: IdAllocator,
    players: HashMap<PlayerId, Player>,
    /// Insertion order; players are stepped in this order every tick.
    order: Vec<PlayerId>,
    outputs: Outputs,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            players: HashMap::with_capacity(cfg.players_hint),
            order: Vec::with_capacity(cfg.players_hint),
            cfg,
            ids: IdAllocator::new(),
            outputs: Outputs::default(),
        }
    }

    /// Register a root node, returning its PlayerId.
    pub fn add_player(&mut self, name: &str, node: Box<dyn Playable>) -> PlayerId {
        let id = self.ids.alloc_player();
        self.players
            .insert(id, Player::new(id, name.to_string(), node));
        self.order.push(id);
        log::debug!("player {:?} '{}' added", id, name);
        id
    }

    /// Remove a player and hand its node back.
    pub fn remove_player(&mut self, player: PlayerId) -> Result<Box<dyn Playable>, TweenError> {
        let removed = self
            .players
            .remove(&player)
            .ok_or(TweenError::PlayerNotFound { player })?;
        self.order.retain(|p| *p != player);
        Ok(removed.node)
    }

    /// Drop every player and start id allocation over.
    pub fn clear(&mut self) {
        self.players.clear();
        self.order.clear();
        self.ids.reset();
        self.outputs.clear();
    }

    #[inline]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(&player)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Apply one command immediately.
    pub fn apply_command(&mut self, cmd: &PlayerCommand) -> Result<(), TweenError> {
        let id = cmd.player();
        let p = self
            .players
            .get_mut(&id)
            .ok_or(TweenError::PlayerNotFound { player: id })?;
        match *cmd {
            PlayerCommand::Play { .. } => p.paused = false,
            PlayerCommand::Pause { .. } => p.paused = true,
            PlayerCommand::Stop { .. } => p.node.stop(),
            PlayerCommand::Restart { .. } => {
                p.node.restart();
                p.paused = false;
                p.finished_reported = false;
            }
            PlayerCommand::Seek { time, .. } => {
                if !time.is_finite() {
                    return Err(TweenError::InvalidTime { time });
                }
                p.node.seek(time);
            }
            PlayerCommand::SetSpeed { speed, .. } => {
                if !speed.is_finite() {
                    return Err(TweenError::InvalidTime { time: speed });
                }
                p.speed = speed;
            }
        }
        Ok(())
    }

    /// Step every player by dt with given inputs, producing this tick's events.
    pub fn update(&mut self, dt: f64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();

        // 1) Apply player commands
        for cmd in &inputs.player_cmds {
            if let Err(err) = self.apply_command(cmd) {
                log::warn!("player command {:?} rejected: {}", cmd, err);
                self.outputs.push_event(CoreEvent::Error {
                    message: err.to_string(),
                });
            }
        }

        // 2) Advance unpaused players and collect their events
        let mut dropped = 0usize;
        for id in &self.order {
            let Some(p) = self.players.get_mut(id) else {
                continue;
            };
            let step = dt * p.speed;
            // A finished player only moves again when played in reverse.
            let parked = p.node.is_finished() && step >= 0.0;
            if !p.paused && p.state() != PlaybackState::Stopped && !parked {
                p.node.advance(step);
            }

            let mut events: Vec<CoreEvent> = p
                .node
                .drain_events()
                .into_iter()
                .map(|event| CoreEvent::Timeline { player: p.id, event })
                .collect();
            if p.node.is_finished() && !p.finished_reported {
                p.finished_reported = true;
                events.push(CoreEvent::PlayerFinished { player: p.id });
            } else if !p.node.is_finished() {
                p.finished_reported = false;
            }

            for event in events {
                if self.outputs.events.len() < self.cfg.max_events_per_tick {
                    self.outputs.push_event(event);
                } else {
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            log::warn!(
                "dropped {} events over the per-tick cap of {}",
                dropped,
                self.cfg.max_events_per_tick
            );
        }

        &self.outputs
    }
}
