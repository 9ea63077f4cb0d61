//! Actor vs actor collisions
//!
//! Only opposing actors are ever tested. Teams are fixed-size arrays, so the
//! cross product of the two arrays is exactly the set of pairs to check.

use super::actor::{Actor, ActorId};
use super::geometry::rect_rect_collide;

/// Slot pairs `(team one slot, team two slot)` for every cross-team pairing
pub fn cross_team_pairs() -> impl Iterator<Item = (usize, usize)> {
    (0..2).flat_map(|a| (0..2).map(move |b| (a, b)))
}

/// Whether `striker` takes `target` out when they touch
#[inline]
fn strikes(striker: &Actor, target: &Actor) -> bool {
    striker.is_dashing() && target.cooldown <= 0.0
}

/// Find every `(victim, striker)` pair for this tick.
///
/// All pairs are judged against the same positions and modes, so two
/// dashing actors that meet take each other out.
pub fn find_eliminations(teams: &[[Actor; 2]; 2]) -> Vec<(ActorId, ActorId)> {
    let [left, right] = teams;
    let mut hits = Vec::new();

    for (a, b) in cross_team_pairs() {
        let (first, second) = (&left[a], &right[b]);
        if !first.is_collidable() || !second.is_collidable() {
            continue;
        }
        if !rect_rect_collide(&first.rect(), &second.rect()) {
            continue;
        }
        if strikes(first, second) {
            hits.push((second.id, first.id));
        }
        if strikes(second, first) {
            hits.push((first.id, second.id));
        }
    }
    hits
}

/// Apply this tick's eliminations and return the ones that took effect.
/// An actor struck by both opponents is only reported once.
pub fn resolve_collisions(teams: &mut [[Actor; 2]; 2], duration: f32) -> Vec<(ActorId, ActorId)> {
    let mut applied = Vec::new();
    for (victim, striker) in find_eliminations(teams) {
        let actor = &mut teams[victim.team.index()][victim.slot];
        if actor.eliminated {
            continue;
        }
        actor.eliminate(duration);
        applied.push((victim, striker));
    }
    applied
}
