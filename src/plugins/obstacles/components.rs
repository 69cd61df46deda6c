use bevy::prelude::*;

/// Obstacle durability class. Health and default score scale with toughness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Weak,
    Strong,
    Reinforced,
}

impl ObstacleKind {
    pub fn max_health(self) -> u32 {
        match self {
            Self::Weak => 1,
            Self::Strong => 2,
            Self::Reinforced => 3,
        }
    }

    pub fn score_value(self) -> u32 {
        match self {
            Self::Weak => 5,
            Self::Strong => 15,
            Self::Reinforced => 30,
        }
    }

    /// Only weak obstacles care about uncharged shots at all.
    pub fn damaged_by_normal_shot(self) -> bool {
        matches!(self, Self::Weak)
    }
}

/// What happens when something hits this obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CollisionBehavior {
    /// Takes damage normally.
    #[default]
    Destroyable,
    /// Never takes damage; hits ricochet off.
    Indestructible,
    /// Reflects the ball's heading on a sub-lethal hit.
    Bouncy,
    /// Excluded from auto-aim; side-steps instead of taking damage when hit.
    Avoidable,
}

impl CollisionBehavior {
    /// Eligible for area damage (charged blasts and chain pulses still can't
    /// touch indestructible or avoidable obstacles).
    pub fn takes_area_damage(self) -> bool {
        matches!(self, Self::Destroyable | Self::Bouncy)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub behavior: CollisionBehavior,
    pub score_value: u32,
    /// Full collider extents; the render layer reuses these for the mesh.
    pub size: Vec3,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage; returns true when this drops the health to zero.
    pub fn take(&mut self, amount: u32) -> bool {
        self.current = self.current.saturating_sub(amount);
        self.current == 0
    }
}

/// Destroyed-guard. Set exactly once, before score is awarded; anything that
/// resolves damage must skip entities carrying this marker. The entity itself
/// is despawned later, outside the fixed step.
#[derive(Component, Debug, Clone, Copy)]
pub struct Destroyed;

/// Destroying this obstacle kicks off a delayed damage pulse around it.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChainReaction {
    pub radius: f32,
    pub delay: f32,
}

/// Transient side-step of an avoidable obstacle that got hit anyway.
#[derive(Component, Debug)]
pub struct Dodging {
    pub timer: Timer,
    pub origin_x: f32,
    pub direction: f32,
    pub distance: f32,
}

impl Dodging {
    pub fn sidestep(origin_x: f32, direction: f32) -> Self {
        Self {
            timer: Timer::from_seconds(0.6, TimerMode::Once),
            origin_x,
            direction,
            distance: 1.0,
        }
    }
}
