//! Tunable gameplay constants.
//!
//! One flat resource for every number the simulation reads. Values are
//! validated once at startup via [`Tunables::validated`]; geometry parameters
//! are rejected outright rather than clamped, so a bad configuration fails
//! loudly instead of producing a subtly wrong game.

use std::fmt;

use bevy::prelude::*;

use crate::common::lanes::LaneLayout;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    // Lanes
    pub lane_distance: f32,
    pub lane_tolerance: f32,
    pub lane_behind_margin: f32,

    // Runner
    pub base_run_speed: f32,
    pub run_speed_ramp: f32,
    pub max_run_speed: f32,
    pub lane_change_speed: f32,
    pub jump_speed: f32,
    pub double_jump_speed: f32,
    pub max_jumps: u8,
    pub slide_duration: f32,
    pub gravity: f32,

    // Ball
    pub ball_speed: f32,
    pub ball_return_speed: f32,
    pub ball_lifetime: f32,
    pub ball_radius: f32,
    pub normal_max_distance: f32,
    pub charged_max_distance: f32,
    pub detection_radius: f32,
    pub explosion_radius: f32,
    pub arrival_radius: f32,
    pub return_height: f32,
    /// Muzzle position relative to the runner.
    pub muzzle_offset: Vec3,

    // Steering: turn rates are angular fractions per second; the seek rate
    // rises as the ball closes in on its target.
    pub seek_rate_far: f32,
    pub seek_rate_mid: f32,
    pub seek_rate_near: f32,
    pub seek_band_near: f32,
    pub seek_band_far: f32,
    pub recenter_rate: f32,
    pub recenter_done_deg: f32,
    pub lane_correct_rate: f32,
    pub lane_lookahead: f32,
    pub max_aim_angle_deg: f32,

    // Shooting
    pub normal_cooldown: f32,
    pub charged_cooldown: f32,
    /// Whether a sub-lethal normal hit consumes the ball. Off by default:
    /// the ball flies on unless it actually destroyed something.
    pub consume_on_hit: bool,

    // Spawning
    pub spawn_ahead: f32,
    pub despawn_behind: f32,
    pub max_spawn_interval: f32,
    pub min_spawn_interval: f32,
    pub spawn_interval_ramp: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            lane_distance: 2.0,
            lane_tolerance: 0.8,
            lane_behind_margin: 0.5,

            base_run_speed: 5.0,
            run_speed_ramp: 0.1,
            max_run_speed: 15.0,
            lane_change_speed: 10.0,
            jump_speed: 8.0,
            double_jump_speed: 6.0,
            max_jumps: 2,
            slide_duration: 1.0,
            gravity: 20.0,

            ball_speed: 15.0,
            ball_return_speed: 20.0,
            ball_lifetime: 3.0,
            ball_radius: 0.25,
            normal_max_distance: 10.0,
            charged_max_distance: 15.0,
            detection_radius: 10.0,
            explosion_radius: 2.0,
            arrival_radius: 1.2,
            return_height: 1.0,
            muzzle_offset: Vec3::new(0.0, 1.0, 0.5),

            seek_rate_far: 4.0,
            seek_rate_mid: 8.0,
            seek_rate_near: 14.0,
            seek_band_near: 2.0,
            seek_band_far: 5.0,
            recenter_rate: 3.0,
            recenter_done_deg: 5.0,
            lane_correct_rate: 2.5,
            lane_lookahead: 4.0,
            max_aim_angle_deg: 45.0,

            normal_cooldown: 0.25,
            charged_cooldown: 0.8,
            consume_on_hit: false,

            spawn_ahead: 20.0,
            despawn_behind: 10.0,
            max_spawn_interval: 3.0,
            min_spawn_interval: 0.5,
            spawn_interval_ramp: 0.05,
        }
    }
}

impl Tunables {
    /// Validate and return the configuration, or say exactly which field is
    /// out of range.
    pub fn validated(self) -> Result<Self, TunablesError> {
        let positive = [
            ("lane_distance", self.lane_distance),
            ("lane_tolerance", self.lane_tolerance),
            ("base_run_speed", self.base_run_speed),
            ("max_run_speed", self.max_run_speed),
            ("lane_change_speed", self.lane_change_speed),
            ("jump_speed", self.jump_speed),
            ("slide_duration", self.slide_duration),
            ("gravity", self.gravity),
            ("ball_speed", self.ball_speed),
            ("ball_return_speed", self.ball_return_speed),
            ("ball_lifetime", self.ball_lifetime),
            ("ball_radius", self.ball_radius),
            ("normal_max_distance", self.normal_max_distance),
            ("charged_max_distance", self.charged_max_distance),
            ("arrival_radius", self.arrival_radius),
            ("max_aim_angle_deg", self.max_aim_angle_deg),
            ("min_spawn_interval", self.min_spawn_interval),
            ("max_spawn_interval", self.max_spawn_interval),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TunablesError::NotPositive(name));
            }
        }

        let non_negative = [
            ("lane_behind_margin", self.lane_behind_margin),
            ("run_speed_ramp", self.run_speed_ramp),
            ("detection_radius", self.detection_radius),
            ("explosion_radius", self.explosion_radius),
            ("spawn_ahead", self.spawn_ahead),
            ("despawn_behind", self.despawn_behind),
            ("spawn_interval_ramp", self.spawn_interval_ramp),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TunablesError::Negative(name));
            }
        }

        if self.max_jumps == 0 {
            return Err(TunablesError::NotPositive("max_jumps"));
        }
        if self.seek_band_near >= self.seek_band_far {
            return Err(TunablesError::SteeringBandsUnordered);
        }
        if self.min_spawn_interval > self.max_spawn_interval {
            return Err(TunablesError::SpawnIntervalsUnordered);
        }

        Ok(self)
    }

    pub fn lane_layout(&self) -> LaneLayout {
        LaneLayout {
            lane_distance: self.lane_distance,
            tolerance: self.lane_tolerance,
            behind_margin: self.lane_behind_margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunablesError {
    /// A field that must be strictly positive (NaN counts as invalid).
    NotPositive(&'static str),
    /// A field that must not be negative (NaN counts as invalid).
    Negative(&'static str),
    SteeringBandsUnordered,
    SpawnIntervalsUnordered,
}

impl fmt::Display for TunablesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive(field) => write!(f, "tunable `{field}` must be positive"),
            Self::Negative(field) => write!(f, "tunable `{field}` must not be negative"),
            Self::SteeringBandsUnordered => {
                write!(f, "seek_band_near must be smaller than seek_band_far")
            }
            Self::SpawnIntervalsUnordered => {
                write!(f, "min_spawn_interval must not exceed max_spawn_interval")
            }
        }
    }
}

impl std::error::Error for TunablesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Tunables::default().validated().is_ok());
    }

    #[test]
    fn rejects_degenerate_lane_distance() {
        let t = Tunables {
            lane_distance: 0.0,
            ..Default::default()
        };
        assert_eq!(
            t.validated().unwrap_err(),
            TunablesError::NotPositive("lane_distance")
        );
    }

    #[test]
    fn rejects_nan_radius() {
        let t = Tunables {
            detection_radius: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            t.validated().unwrap_err(),
            TunablesError::Negative("detection_radius")
        );
    }

    #[test]
    fn rejects_inverted_steering_bands() {
        let t = Tunables {
            seek_band_near: 6.0,
            seek_band_far: 5.0,
            ..Default::default()
        };
        assert_eq!(t.validated().unwrap_err(), TunablesError::SteeringBandsUnordered);
    }
}
