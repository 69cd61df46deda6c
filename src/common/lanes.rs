//! Lane geometry.
//!
//! Everything here is pure: lane index -> world X, plus the membership band
//! used by the spawner, targeting and movement. Keeping this stateless means
//! all three consumers agree on what "in lane" means by construction.

use bevy::prelude::*;

/// One of the three lateral tracks: -1 (left), 0 (center), 1 (right).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lane(i8);

impl Lane {
    pub const LEFT: Self = Self(-1);
    pub const CENTER: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const ALL: [Self; 3] = [Self::LEFT, Self::CENTER, Self::RIGHT];

    /// Build a lane from a raw index, clamping into the valid range.
    pub fn clamped(index: i8) -> Self {
        Self(index.clamp(-1, 1))
    }

    pub fn index(self) -> i8 {
        self.0
    }

    /// Step left/right; stepping off the outer lanes stays put.
    pub fn shifted(self, delta: i8) -> Self {
        Self::clamped(self.0.saturating_add(delta))
    }
}

/// Shared lane parameters. Constructed from `Tunables`, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct LaneLayout {
    pub lane_distance: f32,
    pub tolerance: f32,
    /// Obstacles this far behind the reference point still count as in-lane.
    pub behind_margin: f32,
}

impl LaneLayout {
    pub fn lane_x(&self, lane: Lane) -> f32 {
        lane.index() as f32 * self.lane_distance
    }

    /// Lateral band membership, excluding positions already behind the
    /// reference point (past the margin).
    pub fn is_in_lane(&self, pos: Vec3, lane: Lane, reference_z: f32) -> bool {
        (pos.x - self.lane_x(lane)).abs() <= self.tolerance
            && pos.z > reference_z - self.behind_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LaneLayout {
        LaneLayout {
            lane_distance: 2.0,
            tolerance: 0.8,
            behind_margin: 0.5,
        }
    }

    #[test]
    fn lane_x_scales_with_index() {
        let l = layout();
        assert_eq!(l.lane_x(Lane::LEFT), -2.0);
        assert_eq!(l.lane_x(Lane::CENTER), 0.0);
        assert_eq!(l.lane_x(Lane::RIGHT), 2.0);
    }

    #[test]
    fn shifting_clamps_at_outer_lanes() {
        assert_eq!(Lane::LEFT.shifted(-1), Lane::LEFT);
        assert_eq!(Lane::LEFT.shifted(1), Lane::CENTER);
        assert_eq!(Lane::RIGHT.shifted(1), Lane::RIGHT);
        assert_eq!(Lane::clamped(7), Lane::RIGHT);
    }

    #[test]
    fn membership_is_exact_at_the_tolerance_boundary() {
        let l = layout();
        let eps = 1e-3;

        let just_inside = Vec3::new(l.lane_x(Lane::RIGHT) + l.tolerance - eps, 0.0, 5.0);
        let just_outside = Vec3::new(l.lane_x(Lane::RIGHT) + l.tolerance + eps, 0.0, 5.0);

        assert!(l.is_in_lane(just_inside, Lane::RIGHT, 0.0));
        assert!(!l.is_in_lane(just_outside, Lane::RIGHT, 0.0));
    }

    #[test]
    fn positions_past_the_behind_margin_drop_out() {
        let l = layout();

        // Slightly behind the reference point: still a member.
        assert!(l.is_in_lane(Vec3::new(0.0, 0.0, -0.4), Lane::CENTER, 0.0));
        // Past the margin: gone.
        assert!(!l.is_in_lane(Vec3::new(0.0, 0.0, -0.6), Lane::CENTER, 0.0));
    }
}
