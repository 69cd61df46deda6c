//! Obstacle archetypes.
//!
//! The street furniture the spawner picks from. Each entry pins down the
//! collision contract (durability class, behavior, score, chain reaction)
//! plus spawn weighting and which lanes it may occupy.

use bevy::prelude::*;

use crate::common::lanes::Lane;

use super::components::{ChainReaction, CollisionBehavior, ObstacleKind};

#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub kind: ObstacleKind,
    pub behavior: CollisionBehavior,
    pub score_value: u32,
    pub chain: Option<ChainReaction>,
    pub weight: f32,
    /// Full collider extents.
    pub size: Vec3,
    pub lanes: &'static [Lane],
}

const SIDE_LANES: &[Lane] = &[Lane::LEFT, Lane::RIGHT];
const ALL_LANES: &[Lane] = &[Lane::LEFT, Lane::CENTER, Lane::RIGHT];

pub const CATALOG: &[Archetype] = &[
    Archetype {
        name: "TrashBin",
        kind: ObstacleKind::Weak,
        behavior: CollisionBehavior::Destroyable,
        score_value: 5,
        chain: None,
        weight: 3.0,
        size: Vec3::new(0.8, 1.0, 0.8),
        lanes: ALL_LANES,
    },
    Archetype {
        name: "StreetSign",
        kind: ObstacleKind::Strong,
        behavior: CollisionBehavior::Destroyable,
        score_value: 15,
        chain: None,
        weight: 2.0,
        size: Vec3::new(0.5, 2.0, 0.5),
        lanes: ALL_LANES,
    },
    // Knocking over a vendor cart scatters its wares into the neighbours.
    Archetype {
        name: "VendorCart",
        kind: ObstacleKind::Weak,
        behavior: CollisionBehavior::Destroyable,
        score_value: 20,
        chain: Some(ChainReaction {
            radius: 3.0,
            delay: 0.1,
        }),
        weight: 1.5,
        size: Vec3::new(1.2, 1.2, 1.6),
        lanes: ALL_LANES,
    },
    Archetype {
        name: "FireHydrant",
        kind: ObstacleKind::Strong,
        behavior: CollisionBehavior::Destroyable,
        score_value: 25,
        chain: None,
        weight: 1.5,
        size: Vec3::new(0.6, 1.0, 0.6),
        lanes: SIDE_LANES,
    },
    Archetype {
        name: "ConstructionBarrier",
        kind: ObstacleKind::Reinforced,
        behavior: CollisionBehavior::Destroyable,
        score_value: 30,
        chain: None,
        weight: 1.0,
        size: Vec3::new(1.6, 1.0, 0.4),
        lanes: ALL_LANES,
    },
    Archetype {
        name: "ParkedCar",
        kind: ObstacleKind::Reinforced,
        behavior: CollisionBehavior::Indestructible,
        score_value: 0,
        chain: None,
        weight: 1.0,
        size: Vec3::new(1.5, 1.0, 2.0),
        lanes: SIDE_LANES,
    },
    Archetype {
        name: "DeliveryScooter",
        kind: ObstacleKind::Strong,
        behavior: CollisionBehavior::Avoidable,
        score_value: 10,
        chain: None,
        weight: 1.0,
        size: Vec3::new(0.8, 1.2, 1.5),
        lanes: ALL_LANES,
    },
    Archetype {
        name: "StrayCat",
        kind: ObstacleKind::Weak,
        behavior: CollisionBehavior::Avoidable,
        score_value: 5,
        chain: None,
        weight: 1.0,
        size: Vec3::new(0.5, 0.5, 0.5),
        lanes: ALL_LANES,
    },
    Archetype {
        name: "ShoppingCart",
        kind: ObstacleKind::Strong,
        behavior: CollisionBehavior::Bouncy,
        score_value: 15,
        chain: None,
        weight: 1.0,
        size: Vec3::new(0.8, 1.0, 1.2),
        lanes: ALL_LANES,
    },
];

/// Look up an archetype by name (tests and scripted setups).
pub fn by_name(name: &str) -> Option<&'static Archetype> {
    CATALOG.iter().find(|a| a.name == name)
}
