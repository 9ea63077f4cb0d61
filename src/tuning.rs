//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. A tuning can be loaded from
//! JSON (missing fields fall back to the defaults) and is validated once,
//! when a match is built. The simulation itself never fails, so all the
//! configuration invariants it relies on are checked here.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Team, WaypointSampler};

/// Vertical offsets of the two home rows, measured up from the bottom edge
const HOME_ROW_OFFSETS: [f32; 2] = [100.0, 200.0];

/// Largest arena side; waypoints are drawn on an `i32` grid
pub const MAX_ARENA_EXTENT: f32 = 1_000_000.0;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("Dash speed {dash} must exceed normal speed {normal}")]
    DashNotFaster { normal: f32, dash: f32 },

    #[error("{team} movement bound [{min}, {max}] is empty")]
    EmptyTeamBound { team: Team, min: f32, max: f32 },

    #[error("{team} home position ({x}, {y}) lies outside the team bound")]
    HomeOutOfBounds { team: Team, x: f32, y: f32 },

    #[error("Point ({x}, {y}) lies outside the {width}x{height} arena")]
    OutsideArena { x: f32, y: f32, width: f32, height: f32 },

    #[error("Waypoint margin {margin} leaves no room in a {width}x{height} arena")]
    WaypointMarginTooLarge { margin: f32, width: f32, height: f32 },

    #[error("Arena {width}x{height} exceeds the maximum extent of {max}")]
    ArenaTooLarge { width: f32, height: f32, max: f32 },

    #[error("Waypoint margin {margin} leaves no integer point in a {width}x{height} arena")]
    EmptyWaypointGrid { margin: f32, width: f32, height: f32 },

    #[error("Waypoint rejection band ({min}, {max}) is empty")]
    InvalidRejectionBand { min: f32, max: f32 },

    #[error("No waypoint can be drawn at least {separation} away from x = {x}")]
    UnreachableWaypoint { x: f32, separation: f32 },

    #[error("Marker radius range [{min}, {max}] is inverted")]
    InvertedRadiusRange { min: f32, max: f32 },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Width of the side walls actors cannot enter
    pub border_width: f32,
    /// Width of the center line separating the two halves
    pub midline_width: f32,

    // === Actors ===
    pub actor_width: f32,
    pub actor_height: f32,
    /// Units per tick in normal mode
    pub actor_speed: f32,
    /// Units per tick while dashing
    pub dash_speed: f32,
    /// Displacement on either axis that ends a dash
    pub dash_distance: f32,
    /// Seconds
    pub dash_cooldown: f32,
    /// Seconds
    pub elimination_duration: f32,
    /// Distance from the side wall to the home column
    pub home_inset: f32,

    // === Marker ===
    pub marker_start: Vec2,
    pub marker_first_target: Vec2,
    pub marker_start_speed: f32,
    /// Speed added every tick
    pub marker_speed_ramp: f32,
    pub arrival_radius: f32,
    pub waypoint_separation: f32,
    pub waypoint_margin: f32,
    pub waypoint_band_min: f32,
    pub waypoint_band_max: f32,

    // === Presentation ===
    pub marker_min_radius: f32,
    pub marker_max_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            border_width: BORDER_WIDTH,
            midline_width: MIDLINE_WIDTH,

            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            actor_speed: ACTOR_SPEED,
            dash_speed: DASH_SPEED,
            dash_distance: DASH_DISTANCE,
            dash_cooldown: DASH_COOLDOWN,
            elimination_duration: ELIMINATION_DURATION,
            home_inset: 100.0,

            marker_start: Vec2::new(451.0, 310.0),
            marker_first_target: Vec2::new(100.0, 300.0),
            marker_start_speed: MARKER_START_SPEED,
            marker_speed_ramp: MARKER_SPEED_RAMP,
            arrival_radius: ARRIVAL_RADIUS,
            waypoint_separation: WAYPOINT_SEPARATION,
            waypoint_margin: WAYPOINT_MARGIN,
            waypoint_band_min: WAYPOINT_BAND_MIN,
            waypoint_band_max: WAYPOINT_BAND_MAX,

            marker_min_radius: MARKER_MIN_RADIUS,
            marker_max_radius: MARKER_MAX_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse a tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// X coordinate of the center line (win side and bound partition)
    #[inline]
    pub fn midline_x(&self) -> f32 {
        self.arena_width / 2.0
    }

    #[inline]
    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height) * 0.5
    }

    #[inline]
    pub fn actor_size(&self) -> Vec2 {
        Vec2::new(self.actor_width, self.actor_height)
    }

    /// Horizontal movement bound `(min_x, max_x)` of an actor's left edge
    pub fn team_bounds(&self, team: Team) -> (f32, f32) {
        let half_line = self.midline_width / 2.0;
        match team {
            Team::One => (self.border_width, self.midline_x() - half_line),
            // x is the left edge, so the right edge must also stay on screen
            Team::Two => (
                self.midline_x() + half_line,
                (self.arena_width - self.border_width).min(self.arena_width - self.actor_width),
            ),
        }
    }

    /// Starting position of an actor (slot 0 is the lower row)
    pub fn home_position(&self, team: Team, slot: usize) -> Vec2 {
        let x = match team {
            Team::One => self.home_inset,
            Team::Two => self.arena_width - self.home_inset - self.actor_width,
        };
        let row = HOME_ROW_OFFSETS[slot.min(HOME_ROW_OFFSETS.len() - 1)];
        Vec2::new(x, self.arena_height - row)
    }

    /// Check every invariant the simulation depends on
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("actor_speed", self.actor_speed),
            ("dash_speed", self.dash_speed),
            ("dash_distance", self.dash_distance),
            ("dash_cooldown", self.dash_cooldown),
            ("elimination_duration", self.elimination_duration),
            ("marker_start_speed", self.marker_start_speed),
            ("arrival_radius", self.arrival_radius),
            ("waypoint_separation", self.waypoint_separation),
        ] {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("border_width", self.border_width),
            ("midline_width", self.midline_width),
            ("home_inset", self.home_inset),
            ("marker_speed_ramp", self.marker_speed_ramp),
            ("waypoint_margin", self.waypoint_margin),
            ("marker_min_radius", self.marker_min_radius),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.arena_width > MAX_ARENA_EXTENT || self.arena_height > MAX_ARENA_EXTENT {
            return Err(TuningError::ArenaTooLarge {
                width: self.arena_width,
                height: self.arena_height,
                max: MAX_ARENA_EXTENT,
            });
        }

        if self.dash_speed <= self.actor_speed {
            return Err(TuningError::DashNotFaster {
                normal: self.actor_speed,
                dash: self.dash_speed,
            });
        }

        if self.marker_max_radius < self.marker_min_radius {
            return Err(TuningError::InvertedRadiusRange {
                min: self.marker_min_radius,
                max: self.marker_max_radius,
            });
        }

        if self.actor_height > self.arena_height {
            return Err(TuningError::OutsideArena {
                x: self.actor_width,
                y: self.actor_height,
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        for team in Team::ALL {
            let (min, max) = self.team_bounds(team);
            if min > max {
                return Err(TuningError::EmptyTeamBound { team, min, max });
            }
            for slot in 0..2 {
                let home = self.home_position(team, slot);
                let fits_y = home.y >= 0.0 && home.y <= self.arena_height - self.actor_height;
                if home.x < min || home.x > max || !fits_y {
                    return Err(TuningError::HomeOutOfBounds {
                        team,
                        x: home.x,
                        y: home.y,
                    });
                }
            }
        }

        for point in [self.marker_start, self.marker_first_target] {
            if !self.contains(point) {
                return Err(TuningError::OutsideArena {
                    x: point.x,
                    y: point.y,
                    width: self.arena_width,
                    height: self.arena_height,
                });
            }
        }

        if self.waypoint_margin * 2.0 > self.arena_width
            || self.waypoint_margin * 2.0 > self.arena_height
        {
            return Err(TuningError::WaypointMarginTooLarge {
                margin: self.waypoint_margin,
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        let sampler = WaypointSampler::from_tuning(self);
        if sampler.is_empty() {
            return Err(TuningError::EmptyWaypointGrid {
                margin: self.waypoint_margin,
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        if !(self.waypoint_band_min < self.waypoint_band_max) {
            return Err(TuningError::InvalidRejectionBand {
                min: self.waypoint_band_min,
                max: self.waypoint_band_max,
            });
        }

        self.validate_waypoints(&sampler)
    }

    /// Every target the marker can ever hold must leave at least one
    /// admissible successor, otherwise the waypoint draw has nothing to pick.
    ///
    /// A target at `x` is stranded exactly when `x` lies strictly between
    /// `last - separation` and `first + separation`, where `first` and `last`
    /// are the outermost candidate columns. Checking that window against each
    /// candidate interval avoids walking every column.
    fn validate_waypoints(&self, sampler: &WaypointSampler) -> Result<(), TuningError> {
        let unreachable = |x: f32| TuningError::UnreachableWaypoint {
            x,
            separation: self.waypoint_separation,
        };

        if sampler.admissible_count(self.marker_first_target.x) == 0 {
            return Err(unreachable(self.marker_first_target.x));
        }

        let ranges = sampler.candidate_ranges();
        let (Some(&(first, _)), Some(&(_, last))) = (ranges.first(), ranges.last()) else {
            return Err(unreachable(self.marker_first_target.x));
        };
        let window_lo = last as f32 - self.waypoint_separation;
        let window_hi = first as f32 + self.waypoint_separation;

        for (a, b) in ranges {
            // Smallest column of the interval strictly above the window start
            let x = (a as f32).max(window_lo.floor() + 1.0);
            if x <= b as f32 && x < window_hi {
                return Err(unreachable(x));
            }
        }
        Ok(())
    }

    fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.arena_width).contains(&point.x) && (0.0..=self.arena_height).contains(&point.y)
    }
}
