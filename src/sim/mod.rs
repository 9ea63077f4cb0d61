//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (team, then slot)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collision;
pub mod geometry;
pub mod marker;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, ActorInput, ActorTransition, DashMode, Team};
pub use collision::{cross_team_pairs, find_eliminations, resolve_collisions};
pub use geometry::{Rect, circle_rect_collide, rect_rect_collide};
pub use marker::{Marker, MarkerOutcome, WaypointSampler};
pub use snapshot::{ActorView, ArenaView, MarkerView, MatchSnapshot};
pub use state::{MatchEvent, MatchPhase, MatchState};
pub use tick::{MatchInput, tick};
