//! Buffered shot requests and flight notifications.
//!
//! `ShotRequest` is intent from the input side; the launcher is its single
//! consumer and the only writer of the ownership slot. The outbound messages
//! are presentation hooks; the simulation never depends on anyone reading
//! them.

use bevy::prelude::*;

use crate::common::lanes::Lane;

#[derive(Message, Clone, Copy, Debug)]
pub struct ShotRequest {
    pub charged: bool,
    pub lane: Lane,
    pub origin: Vec3,
    pub forward: Vec3,
}

/// The slot refused the request (ball already live, or cooling down).
#[derive(Message, Clone, Copy, Debug)]
pub struct ShotRefused {
    pub charged: bool,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct BallLaunched {
    pub ball: Entity,
    pub charged: bool,
}

/// The ball hit something with a damage outcome.
#[derive(Message, Clone, Copy, Debug)]
pub struct BallImpact {
    pub position: Vec3,
    pub charged: bool,
}

/// Ricochet: contact without damage.
#[derive(Message, Clone, Copy, Debug)]
pub struct BallBounced {
    pub position: Vec3,
}
