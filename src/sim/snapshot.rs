//! Read-only view of a match for the presentation layer
//!
//! Nothing here feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::actor::{ActorId, Team};
use super::state::{MatchPhase, MatchState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaView {
    pub width: f32,
    pub height: f32,
    pub midline_x: f32,
    pub border_width: f32,
    pub midline_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub id: ActorId,
    pub team: Team,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [u8; 4],
    pub eliminated: bool,
    pub dashing: bool,
}

impl ActorView {
    /// Eliminated actors are not drawn
    pub fn visible(&self) -> bool {
        !self.eliminated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub pos: Vec2,
    pub target: Vec2,
    /// Cosmetic radius, larger near the arena center
    pub radius: f32,
    /// Radius of the target circle
    pub target_radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub arena: ArenaView,
    pub actors: Vec<ActorView>,
    pub marker: MarkerView,
    pub phase: MatchPhase,
    pub winner: Option<Team>,
}

impl MatchState {
    pub fn snapshot(&self) -> MatchSnapshot {
        let tuning = &self.tuning;
        MatchSnapshot {
            tick: self.time_ticks,
            arena: ArenaView {
                width: tuning.arena_width,
                height: tuning.arena_height,
                midline_x: tuning.midline_x(),
                border_width: tuning.border_width,
                midline_width: tuning.midline_width,
            },
            actors: self
                .actors()
                .map(|a| ActorView {
                    id: a.id,
                    team: a.id.team,
                    pos: a.pos,
                    size: a.size,
                    color: a.color,
                    eliminated: a.eliminated,
                    dashing: a.is_dashing(),
                })
                .collect(),
            marker: MarkerView {
                pos: self.marker.pos,
                target: self.marker.target,
                radius: self.marker.visual_radius(tuning),
                target_radius: tuning.arrival_radius,
            },
            phase: self.phase,
            winner: self.winner(),
        }
    }
}
