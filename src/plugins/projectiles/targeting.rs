//! Target selection for auto-aimed balls.
//!
//! The selector is a pure function over a snapshot of obstacle positions, so
//! the ranking rules are unit-testable without a `World`. It is re-run every
//! invocation, so there is no cached target to go stale; an obstacle that left
//! the lane or fell behind simply stops appearing in the next candidate list.

use bevy::prelude::*;

use crate::common::lanes::{Lane, LaneLayout};
use crate::plugins::obstacles::CollisionBehavior;

/// A ranked candidate. `depth` is the forward distance along Z from the
/// query origin; candidates come back nearest-ahead first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub depth: f32,
}

/// Rank the obstacles a ball fired down `lane` may steer toward.
///
/// Filters, in order: detection radius (exact), lane membership, avoidable
/// obstacles (they dodge instead of being aimed at), the lateral capture cone
/// (`max_angle_deg` against `forward`, measured in the XZ plane; vertical
/// aim is unrestricted), and positive forward depth. Ties in depth keep input
/// order.
pub fn select_candidates(
    origin: Vec3,
    forward: Vec3,
    lane: Lane,
    layout: &LaneLayout,
    detection_radius: f32,
    max_angle_deg: f32,
    obstacles: impl IntoIterator<Item = (Entity, Vec3, CollisionBehavior)>,
) -> Vec<Candidate> {
    let r2 = detection_radius * detection_radius;
    let max_angle = max_angle_deg.to_radians();
    let forward_xz = Vec2::new(forward.x, forward.z).normalize_or_zero();

    let mut candidates: Vec<Candidate> = obstacles
        .into_iter()
        .filter_map(|(entity, pos, behavior)| {
            if behavior == CollisionBehavior::Avoidable {
                return None;
            }
            if pos.distance_squared(origin) > r2 {
                return None;
            }
            if !layout.is_in_lane(pos, lane, origin.z) {
                return None;
            }
            let depth = pos.z - origin.z;
            if depth <= 0.0 {
                return None;
            }
            let to_xz = Vec2::new(pos.x - origin.x, pos.z - origin.z);
            // Straight above or below the origin the lateral angle is
            // undefined; height never disqualifies a target, so that counts
            // as in-cone.
            if to_xz.length_squared() > 1e-6 && forward_xz != Vec2::ZERO {
                let angle = forward_xz.angle_to(to_xz.normalize());
                if angle.abs() > max_angle {
                    return None;
                }
            }
            Some(Candidate { entity, depth })
        })
        .collect();

    candidates.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    candidates
}
