//! Player-controlled actors and their dash state machine

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// Presentation colors, indexed by team then slot
const ACTOR_COLORS: [[[u8; 4]; 2]; 2] = [
    [[255, 200, 0, 255], [255, 220, 80, 255]],
    [[0, 200, 255, 255], [80, 220, 255, 255]],
];

/// The two sides of the arena. Team one defends the left half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::One, Team::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::One => write!(f, "Team 1"),
            Team::Two => write!(f, "Team 2"),
        }
    }
}

/// Stable address of an actor: its team and its slot (0 or 1) within the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId {
    pub team: Team,
    pub slot: usize,
}

impl ActorId {
    /// All four actors in tick order
    pub const ALL: [ActorId; 4] = [
        ActorId::new(Team::One, 0),
        ActorId::new(Team::One, 1),
        ActorId::new(Team::Two, 0),
        ActorId::new(Team::Two, 1),
    ];

    pub const fn new(team: Team, slot: usize) -> Self {
        Self { team, slot }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = if self.slot == 0 { 'a' } else { 'b' };
        write!(f, "{}{}", self.team, slot)
    }
}

/// Logical buttons held for one actor during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub dash: bool,
}

/// Movement mode. Speed is derived from this, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DashMode {
    #[default]
    Normal,
    /// Dashing since leaving `origin`
    Dashing { origin: Vec2 },
}

/// State changes an actor reports from its own tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorTransition {
    DashStarted,
    DashEnded,
    Revived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [u8; 4],
    pub min_x: f32,
    pub max_x: f32,
    pub mode: DashMode,
    /// Seconds until the next dash is allowed
    pub cooldown: f32,
    pub eliminated: bool,
    /// Seconds until an eliminated actor comes back
    pub elimination_timer: f32,
}

impl Actor {
    /// Spawn an actor at its home position
    pub fn new(id: ActorId, tuning: &Tuning) -> Self {
        let (min_x, max_x) = tuning.team_bounds(id.team);
        Self {
            id,
            pos: tuning.home_position(id.team, id.slot),
            size: tuning.actor_size(),
            color: ACTOR_COLORS[id.team.index()][id.slot.min(1)],
            min_x,
            max_x,
            mode: DashMode::Normal,
            cooldown: 0.0,
            eliminated: false,
            elimination_timer: 0.0,
        }
    }

    /// Movement per tick for the current mode
    pub fn speed(&self, tuning: &Tuning) -> f32 {
        match self.mode {
            DashMode::Normal => tuning.actor_speed,
            DashMode::Dashing { .. } => tuning.dash_speed,
        }
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        matches!(self.mode, DashMode::Dashing { .. })
    }

    pub fn dash_origin(&self) -> Option<Vec2> {
        match self.mode {
            DashMode::Dashing { origin } => Some(origin),
            DashMode::Normal => None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Eliminated actors are neither drawn nor collidable
    #[inline]
    pub fn is_collidable(&self) -> bool {
        !self.eliminated
    }

    /// Take the actor out for `duration` seconds. A dash in progress is
    /// dropped without starting a cooldown.
    pub fn eliminate(&mut self, duration: f32) {
        self.eliminated = true;
        self.elimination_timer = duration;
        self.mode = DashMode::Normal;
    }

    /// Advance one tick
    pub fn tick(&mut self, input: &ActorInput, tuning: &Tuning, dt: f32) -> Option<ActorTransition> {
        if self.eliminated {
            self.elimination_timer -= dt;
            if self.elimination_timer <= 0.0 {
                self.eliminated = false;
                self.elimination_timer = 0.0;
                return Some(ActorTransition::Revived);
            }
            return None;
        }

        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
        // No boost while cooling down
        if self.cooldown > 0.0 {
            self.mode = DashMode::Normal;
        }

        let speed = self.speed(tuning);
        let mut step = Vec2::ZERO;
        if input.left {
            step.x -= speed;
        }
        if input.right {
            step.x += speed;
        }
        if input.up {
            step.y -= speed;
        }
        if input.down {
            step.y += speed;
        }
        self.pos += step;

        let mut transition = None;

        // A dash only ends by distance, never by time
        if let DashMode::Dashing { origin } = self.mode {
            let moved = (self.pos - origin).abs();
            if moved.x >= tuning.dash_distance || moved.y >= tuning.dash_distance {
                self.mode = DashMode::Normal;
                self.cooldown = tuning.dash_cooldown;
                transition = Some(ActorTransition::DashEnded);
            }
        }

        if input.dash && self.cooldown == 0.0 && self.mode == DashMode::Normal {
            self.mode = DashMode::Dashing { origin: self.pos };
            transition = Some(ActorTransition::DashStarted);
        }

        self.pos.x = self.pos.x.clamp(self.min_x, self.max_x);
        self.pos.y = self.pos.y.clamp(0.0, tuning.arena_height - self.size.y);

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn actor(team: Team) -> (Actor, Tuning) {
        let tuning = Tuning::default();
        (Actor::new(ActorId::new(team, 0), &tuning), tuning)
    }

    const RIGHT: ActorInput = ActorInput {
        left: false,
        right: true,
        up: false,
        down: false,
        dash: false,
    };

    const DASH: ActorInput = ActorInput {
        left: false,
        right: false,
        up: false,
        down: false,
        dash: true,
    };

    #[test]
    fn test_moves_at_normal_speed() {
        let (mut a, tuning) = actor(Team::One);
        let start = a.pos;
        a.tick(&RIGHT, &tuning, SIM_DT);
        assert_eq!(a.pos, start + Vec2::new(4.0, 0.0));

        let up_left = ActorInput {
            left: true,
            up: true,
            ..Default::default()
        };
        a.tick(&up_left, &tuning, SIM_DT);
        assert_eq!(a.pos, start + Vec2::new(0.0, -4.0));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let (mut a, tuning) = actor(Team::One);
        let start = a.pos;
        let both = ActorInput {
            left: true,
            right: true,
            ..Default::default()
        };
        a.tick(&both, &tuning, SIM_DT);
        assert_eq!(a.pos, start);
    }

    #[test]
    fn test_clamped_to_team_half() {
        let (mut a, tuning) = actor(Team::One);
        for _ in 0..200 {
            a.tick(&RIGHT, &tuning, SIM_DT);
        }
        assert_eq!(a.pos.x, 444.0);

        let (mut b, tuning) = actor(Team::Two);
        let left = ActorInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            b.tick(&left, &tuning, SIM_DT);
        }
        assert_eq!(b.pos.x, 456.0);
    }

    #[test]
    fn test_team_two_stays_inside_right_wall() {
        let (mut a, tuning) = actor(Team::Two);
        for _ in 0..200 {
            a.tick(&RIGHT, &tuning, SIM_DT);
        }
        assert_eq!(a.pos.x, 860.0);
        assert!(a.rect().max().x <= tuning.arena_width);
    }

    #[test]
    fn test_clamped_vertically() {
        let (mut a, tuning) = actor(Team::One);
        let down = ActorInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            a.tick(&down, &tuning, SIM_DT);
        }
        assert_eq!(a.pos.y, 540.0);

        let up = ActorInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..300 {
            a.tick(&up, &tuning, SIM_DT);
        }
        assert_eq!(a.pos.y, 0.0);
    }

    #[test]
    fn test_dash_starts_from_current_position() {
        let (mut a, tuning) = actor(Team::One);
        let before = a.pos;
        assert_eq!(a.tick(&DASH, &tuning, SIM_DT), Some(ActorTransition::DashStarted));
        assert!(a.is_dashing());
        assert_eq!(a.speed(&tuning), 16.0);
        assert_eq!(a.dash_origin(), Some(before));
    }

    #[test]
    fn test_dash_ends_after_distance_and_starts_cooldown() {
        let (mut a, tuning) = actor(Team::One);
        a.tick(&DASH, &tuning, SIM_DT);
        let origin = a.pos;

        let mut ticks = 0;
        let mut ended = false;
        while !ended {
            ended = a.tick(&RIGHT, &tuning, SIM_DT) == Some(ActorTransition::DashEnded);
            ticks += 1;
            assert!(ticks < 20, "dash never ended");
        }

        // 7 ticks of 16 units: first time the displacement reaches 100
        assert_eq!(ticks, 7);
        assert!(a.pos.x - origin.x >= 100.0);
        assert_eq!(a.cooldown, 3.0);
        assert_eq!(a.mode, DashMode::Normal);
        assert_eq!(a.dash_origin(), None);
        assert_eq!(a.speed(&tuning), 4.0);
    }

    #[test]
    fn test_dash_ends_on_vertical_displacement() {
        let (mut a, tuning) = actor(Team::One);
        a.tick(&DASH, &tuning, SIM_DT);
        let up = ActorInput {
            up: true,
            ..Default::default()
        };
        let transitions: Vec<_> = (0..7).map(|_| a.tick(&up, &tuning, SIM_DT)).collect();
        assert_eq!(transitions[6], Some(ActorTransition::DashEnded));
        assert!(transitions[..6].iter().all(Option::is_none));
    }

    #[test]
    fn test_dash_never_expires_by_time() {
        let (mut a, tuning) = actor(Team::One);
        a.tick(&DASH, &tuning, SIM_DT);
        for _ in 0..10_000 {
            a.tick(&ActorInput::default(), &tuning, SIM_DT);
        }
        assert!(a.is_dashing());
        assert_eq!(a.cooldown, 0.0);
    }

    #[test]
    fn test_no_dash_during_cooldown() {
        let (mut a, tuning) = actor(Team::One);
        a.cooldown = 1.0;
        assert_eq!(a.tick(&DASH, &tuning, SIM_DT), None);
        assert!(!a.is_dashing());
    }

    #[test]
    fn test_cooldown_decreases_by_frame_and_floors() {
        let (mut a, tuning) = actor(Team::One);
        a.cooldown = 0.5;
        a.tick(&ActorInput::default(), &tuning, SIM_DT);
        assert!((a.cooldown - (0.5 - SIM_DT)).abs() < 1e-6);

        a.cooldown = SIM_DT / 2.0;
        a.tick(&ActorInput::default(), &tuning, SIM_DT);
        assert_eq!(a.cooldown, 0.0);
    }

    #[test]
    fn test_dash_available_again_after_cooldown() {
        let (mut a, tuning) = actor(Team::One);
        a.cooldown = 3.0;
        let ticks_to_clear = (3.0 / SIM_DT).ceil() as usize + 1;
        for _ in 0..ticks_to_clear {
            a.tick(&ActorInput::default(), &tuning, SIM_DT);
        }
        assert_eq!(a.cooldown, 0.0);
        assert_eq!(a.tick(&DASH, &tuning, SIM_DT), Some(ActorTransition::DashStarted));
    }

    #[test]
    fn test_eliminated_actor_is_frozen_then_revives() {
        let (mut a, tuning) = actor(Team::One);
        a.tick(&DASH, &tuning, SIM_DT);
        a.eliminate(5.0);
        assert!(!a.is_dashing());
        assert!(!a.is_collidable());

        let frozen = a.pos;
        let mut revived_after = None;
        for i in 1..=400 {
            if a.tick(&RIGHT, &tuning, SIM_DT) == Some(ActorTransition::Revived) {
                revived_after = Some(i);
                break;
            }
            assert_eq!(a.pos, frozen);
        }

        let ticks = revived_after.expect("actor never revived");
        assert!((299..=301).contains(&ticks), "revived after {ticks} ticks");
        assert!(!a.eliminated);
        assert_eq!(a.elimination_timer, 0.0);
        assert!(a.is_collidable());
    }

    #[test]
    fn test_colors_per_slot() {
        let tuning = Tuning::default();
        let a = Actor::new(ActorId::new(Team::Two, 1), &tuning);
        assert_eq!(a.color, [80, 220, 255, 255]);
        assert_eq!(ActorId::new(Team::Two, 1).to_string(), "Team 2b");
    }

    fn input_strategy() -> impl Strategy<Value = ActorInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down, dash)| ActorInput {
                left,
                right,
                up,
                down,
                dash,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_actor_invariants_hold(
            team in prop_oneof![Just(Team::One), Just(Team::Two)],
            inputs in prop::collection::vec(input_strategy(), 1..400),
        ) {
            let tuning = Tuning::default();
            let mut a = Actor::new(ActorId::new(team, 0), &tuning);

            for input in &inputs {
                let before = a.cooldown;
                let transition = a.tick(input, &tuning, SIM_DT);

                prop_assert!(a.pos.x >= a.min_x && a.pos.x <= a.max_x);
                prop_assert!(a.rect().max().x <= tuning.arena_width);
                prop_assert!(a.pos.y >= 0.0 && a.pos.y <= tuning.arena_height - a.size.y);
                prop_assert!(a.cooldown >= 0.0);

                if transition != Some(ActorTransition::DashEnded) && before > 0.0 {
                    let expected = (before - SIM_DT).max(0.0);
                    prop_assert!((a.cooldown - expected).abs() < 1e-6);
                }

                let speed = a.speed(&tuning);
                if a.is_dashing() {
                    prop_assert_eq!(speed, tuning.dash_speed);
                    prop_assert_eq!(a.cooldown, 0.0);
                } else {
                    prop_assert_eq!(speed, tuning.actor_speed);
                }
            }
        }
    }
}
