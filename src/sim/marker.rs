//! The roaming objective marker
//!
//! The marker walks toward its current waypoint, speeding up every tick.
//! Once it arrives it either switches to a ripe next waypoint, draws a fresh
//! candidate when an actor stands on the target, or ends the match.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Team;
use super::geometry::{Rect, circle_rect_collide};
use crate::lerp;
use crate::tuning::Tuning;

/// What the marker did during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerOutcome {
    /// Moved toward the current target
    Advanced,
    /// The next candidate became the target
    Promoted(Vec2),
    /// An actor guards the target; a new candidate was drawn
    Resampled(Vec2),
    /// Nobody guards the target; the side of the midline decides the match
    Resolved(Team),
    /// Arrived but nothing could change (marker exactly on the midline)
    Stalled,
}

/// Draws next-candidate waypoints.
///
/// Candidates live on the integer grid inside the waypoint margin. A candidate
/// is rejected when its x lies strictly inside the rejection band or when it
/// is horizontally closer than the separation to the current target. Instead
/// of drawing and retrying, the sampler enumerates the admissible x intervals
/// and picks uniformly among them, which yields the same distribution as
/// retrying and cannot loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointSampler {
    /// Inclusive
    x_range: (i32, i32),
    /// Inclusive
    y_range: (i32, i32),
    band: (f32, f32),
    separation: f32,
}

impl WaypointSampler {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let margin = tuning.waypoint_margin;
        Self {
            x_range: (
                margin.ceil() as i32,
                (tuning.arena_width - margin).floor() as i32,
            ),
            y_range: (
                margin.ceil() as i32,
                (tuning.arena_height - margin).floor() as i32,
            ),
            band: (tuning.waypoint_band_min, tuning.waypoint_band_max),
            separation: tuning.waypoint_separation,
        }
    }

    /// Candidate x intervals allowed by the margin and the band alone
    fn band_ranges(&self) -> [(i32, i32); 2] {
        let (lo, hi) = self.x_range;
        [
            (lo, hi.min(self.band.0.floor() as i32)),
            (lo.max(self.band.1.ceil() as i32), hi),
        ]
    }

    /// Non-empty x intervals a candidate can take, whatever the current target
    pub fn candidate_ranges(&self) -> Vec<(i32, i32)> {
        self.band_ranges()
            .into_iter()
            .filter(|(a, b)| a <= b)
            .collect()
    }

    /// Whether the margin leaves no integer point to draw from
    pub fn is_empty(&self) -> bool {
        self.x_range.0 > self.x_range.1 || self.y_range.0 > self.y_range.1
    }

    /// Inclusive x intervals a successor of `target_x` may be drawn from
    pub fn admissible_x(&self, target_x: f32) -> Vec<(i32, i32)> {
        let left_limit = (target_x - self.separation).floor() as i32;
        let right_limit = (target_x + self.separation).ceil() as i32;

        let mut ranges = Vec::with_capacity(4);
        for (a, b) in self.band_ranges() {
            for (c, d) in [(a, b.min(left_limit)), (a.max(right_limit), b)] {
                if c <= d {
                    ranges.push((c, d));
                }
            }
        }
        ranges
    }

    pub fn admissible_count(&self, target_x: f32) -> u64 {
        self.admissible_x(target_x)
            .iter()
            .map(|&(a, b)| (b - a + 1) as u64)
            .sum()
    }

    /// Draw a successor for a target at `target_x`. `None` only when the
    /// admissible set is empty, which a validated tuning rules out.
    pub fn sample<R: Rng + ?Sized>(&self, target_x: f32, rng: &mut R) -> Option<Vec2> {
        let ranges = self.admissible_x(target_x);
        let total: u64 = ranges.iter().map(|&(a, b)| (b - a + 1) as u64).sum();
        if total == 0 || self.y_range.0 > self.y_range.1 {
            return None;
        }

        let mut pick = rng.random_range(0..total);
        let mut x = ranges[0].0;
        for (a, b) in ranges {
            let len = (b - a + 1) as u64;
            if pick < len {
                x = a + pick as i32;
                break;
            }
            pick -= len;
        }
        let y = rng.random_range(self.y_range.0..=self.y_range.1);
        Some(Vec2::new(x as f32, y as f32))
    }
}

/// The objective both teams fight over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub pos: Vec2,
    pub target: Vec2,
    /// Provisional successor of `target`
    pub next_target: Vec2,
    pub speed: f32,
}

impl Marker {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.marker_start,
            target: tuning.marker_first_target,
            next_target: tuning.marker_first_target,
            speed: tuning.marker_start_speed,
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        self.pos.distance(self.target)
    }

    /// Cosmetic draw radius: largest at the arena center, smallest in the corners
    pub fn visual_radius(&self, tuning: &Tuning) -> f32 {
        let center = tuning.arena_center();
        let max_dist = center.length();
        let t = 1.0 - self.pos.distance(center) / max_dist;
        lerp(tuning.marker_min_radius, tuning.marker_max_radius, t)
    }

    /// Whether the next candidate is far enough from the target to be used
    fn candidate_is_ripe(&self, tuning: &Tuning) -> bool {
        (self.target.x - self.next_target.x).abs() >= tuning.waypoint_separation
    }

    /// Advance one tick. `guards` are the rectangles of the actors that can
    /// currently protect the target.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        sampler: &WaypointSampler,
        guards: &[Rect],
        rng: &mut R,
    ) -> MarkerOutcome {
        self.speed += tuning.marker_speed_ramp;

        let delta = self.target - self.pos;
        let dist = delta.length();
        if dist > tuning.arrival_radius {
            // Capped at the remaining distance
            let step = self.speed.min(dist);
            self.pos += delta / dist * step;
            return MarkerOutcome::Advanced;
        }

        if self.candidate_is_ripe(tuning) {
            self.target = self.next_target;
            return MarkerOutcome::Promoted(self.target);
        }

        let guarded = guards
            .iter()
            .any(|r| circle_rect_collide(self.target, tuning.arrival_radius, r));
        if guarded {
            return match sampler.sample(self.target.x, rng) {
                Some(candidate) => {
                    self.next_target = candidate;
                    MarkerOutcome::Resampled(candidate)
                }
                None => {
                    log::error!("No admissible waypoint from x = {}", self.target.x);
                    MarkerOutcome::Stalled
                }
            };
        }

        let midline = tuning.midline_x();
        if self.pos.x < midline {
            MarkerOutcome::Resolved(Team::Two)
        } else if self.pos.x > midline {
            MarkerOutcome::Resolved(Team::One)
        } else {
            MarkerOutcome::Stalled
        }
    }
}
