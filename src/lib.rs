//! Volley Brawl - A 2v2 arena brawler decided by a roaming marker
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (actors, collisions, marker, win condition)
//! - `tuning`: Data-driven game balance, validated at startup

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions (logical coordinate space)
    pub const ARENA_WIDTH: f32 = 900.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const BORDER_WIDTH: f32 = 24.0;
    pub const MIDLINE_WIDTH: f32 = 12.0;

    /// Actor defaults
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 60.0;
    /// Movement per tick in normal mode
    pub const ACTOR_SPEED: f32 = 4.0;
    /// Movement per tick while dashing
    pub const DASH_SPEED: f32 = 16.0;
    /// Displacement from the dash origin that ends a dash
    pub const DASH_DISTANCE: f32 = 100.0;
    /// Seconds before a new dash is allowed
    pub const DASH_COOLDOWN: f32 = 3.0;
    /// Seconds an eliminated actor stays out
    pub const ELIMINATION_DURATION: f32 = 5.0;

    /// Marker defaults
    pub const MARKER_START_SPEED: f32 = 3.0;
    /// Speed gained every tick
    pub const MARKER_SPEED_RAMP: f32 = 0.0032;
    /// Distance at which the marker counts as arrived (also the target circle radius)
    pub const ARRIVAL_RADIUS: f32 = 30.0;
    /// Minimum horizontal separation between a target and its successor
    pub const WAYPOINT_SEPARATION: f32 = 500.0;
    /// Waypoints keep this distance from every arena edge
    pub const WAYPOINT_MARGIN: f32 = 100.0;
    /// Waypoint x strictly inside this band is rejected
    pub const WAYPOINT_BAND_MIN: f32 = 300.0;
    pub const WAYPOINT_BAND_MAX: f32 = 600.0;

    /// Marker draw radius range (cosmetic)
    pub const MARKER_MIN_RADIUS: f32 = 35.0;
    pub const MARKER_MAX_RADIUS: f32 = 77.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
