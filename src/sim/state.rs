//! Match state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, Team};
use super::geometry::Rect;
use super::marker::{Marker, WaypointSampler};
use crate::tuning::{Tuning, TuningError};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active gameplay
    Playing,
    /// Terminal: the marker came to rest on the loser's side
    Decided { winner: Team },
}

/// Something that happened during the last tick, for presentation and audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    DashStarted { actor: ActorId },
    DashEnded { actor: ActorId },
    Eliminated { actor: ActorId, by: ActorId },
    Revived { actor: ActorId },
    WaypointPromoted { target: Vec2 },
    WaypointResampled { candidate: Vec2 },
    Decided { winner: Team },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Seed the RNG was built from
    pub seed: u64,
    pub tuning: Tuning,
    /// Indexed by `Team::index()`, then slot
    pub teams: [[Actor; 2]; 2],
    pub marker: Marker,
    pub phase: MatchPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<MatchEvent>,
    pub(crate) sampler: WaypointSampler,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// Create a new match, validating the tuning first
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("New match with seed {seed}");
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let teams = Team::ALL
            .map(|team| [0, 1].map(|slot| Actor::new(ActorId::new(team, slot), &tuning)));
        Self {
            seed,
            teams,
            marker: Marker::new(&tuning),
            phase: MatchPhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
            sampler: WaypointSampler::from_tuning(&tuning),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Start over with the same tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::build(tuning, seed);
        log::info!("Match restarted with seed {seed}");
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.teams[id.team.index()][id.slot]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.teams[id.team.index()][id.slot]
    }

    /// All actors in tick order
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.teams.iter().flatten()
    }

    pub fn winner(&self) -> Option<Team> {
        match self.phase {
            MatchPhase::Playing => None,
            MatchPhase::Decided { winner } => Some(winner),
        }
    }

    #[inline]
    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    /// Rectangles of the actors that can currently guard the marker's target
    pub fn guard_rects(&self) -> Vec<Rect> {
        self.actors()
            .filter(|a| a.is_collidable())
            .map(Actor::rect)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_layout() {
        let state = MatchState::new(Tuning::default(), 1).unwrap();
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.winner(), None);
        assert_eq!(state.actors().count(), 4);
        assert_eq!(state.marker.pos, Vec2::new(451.0, 310.0));
        assert_eq!(state.marker.target, Vec2::new(100.0, 300.0));
        assert_eq!(state.marker.speed, 3.0);

        for id in ActorId::ALL {
            assert_eq!(state.actor(id).id, id);
        }
        assert_eq!(state.actor(ActorId::new(Team::Two, 1)).pos, Vec2::new(760.0, 400.0));
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            arena_width: -1.0,
            ..Default::default()
        };
        assert!(MatchState::new(tuning, 1).is_err());
    }

    #[test]
    fn test_guard_rects_skip_eliminated() {
        let mut state = MatchState::new(Tuning::default(), 1).unwrap();
        assert_eq!(state.guard_rects().len(), 4);
        state.actor_mut(ActorId::new(Team::One, 0)).eliminate(5.0);
        assert_eq!(state.guard_rects().len(), 3);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = MatchState::new(Tuning::default(), 1).unwrap();
        state.phase = MatchPhase::Decided { winner: Team::One };
        state.time_ticks = 99;
        state.actor_mut(ActorId::new(Team::Two, 0)).pos = Vec2::new(500.0, 10.0);

        state.restart(2);
        assert_eq!(state.seed, 2);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.actor(ActorId::new(Team::Two, 0)).pos, Vec2::new(760.0, 500.0));
    }
}
