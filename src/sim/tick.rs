//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match by one frame: actors, then
//! actor collisions, then the marker and the win condition.

use super::actor::{ActorId, ActorInput, ActorTransition};
use super::collision::resolve_collisions;
use super::marker::MarkerOutcome;
use super::state::{MatchEvent, MatchPhase, MatchState};

/// Input for a single tick, one entry per actor (indexed by team, then slot)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchInput {
    pub actors: [[ActorInput; 2]; 2],
}

impl MatchInput {
    pub fn for_actor(&self, id: ActorId) -> &ActorInput {
        &self.actors[id.team.index()][id.slot]
    }

    pub fn set(&mut self, id: ActorId, input: ActorInput) {
        self.actors[id.team.index()][id.slot] = input;
    }

    /// Builder-style variant of [`MatchInput::set`]
    pub fn with(mut self, id: ActorId, input: ActorInput) -> Self {
        self.set(id, input);
        self
    }
}

/// Advance the match by one fixed timestep. Does nothing once decided.
pub fn tick(state: &mut MatchState, input: &MatchInput, dt: f32) {
    if state.is_decided() {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    // 1. Actors
    for id in ActorId::ALL {
        let actor = &mut state.teams[id.team.index()][id.slot];
        let event = match actor.tick(input.for_actor(id), &state.tuning, dt) {
            Some(ActorTransition::DashStarted) => MatchEvent::DashStarted { actor: id },
            Some(ActorTransition::DashEnded) => MatchEvent::DashEnded { actor: id },
            Some(ActorTransition::Revived) => MatchEvent::Revived { actor: id },
            None => continue,
        };
        log::debug!("tick {}: {:?}", state.time_ticks, event);
        state.events.push(event);
    }

    // 2. Actor collisions, judged on post-move positions
    let eliminations = resolve_collisions(&mut state.teams, state.tuning.elimination_duration);
    for (actor, by) in eliminations {
        log::debug!("tick {}: {actor} eliminated by {by}", state.time_ticks);
        state.events.push(MatchEvent::Eliminated { actor, by });
    }

    // 3. Marker and win condition
    let guards = state.guard_rects();
    let outcome = state
        .marker
        .tick(&state.tuning, &state.sampler, &guards, &mut state.rng);

    match outcome {
        MarkerOutcome::Advanced | MarkerOutcome::Stalled => {}
        MarkerOutcome::Promoted(target) => {
            log::debug!("Marker heading to ({}, {})", target.x, target.y);
            state.events.push(MatchEvent::WaypointPromoted { target });
        }
        MarkerOutcome::Resampled(candidate) => {
            log::debug!("Target guarded, next waypoint ({}, {})", candidate.x, candidate.y);
            state.events.push(MatchEvent::WaypointResampled { candidate });
        }
        MarkerOutcome::Resolved(winner) => {
            state.phase = MatchPhase::Decided { winner };
            state.events.push(MatchEvent::Decided { winner });
            log::info!("{winner} wins after {} ticks", state.time_ticks);
        }
    }
}
