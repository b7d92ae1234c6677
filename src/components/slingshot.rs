//! Slingshot components.
//!
//! A slingshot is authored as a root entity carrying:
//! - [`Slingshot`] – velocity multiplier, rubber-band anchors, projectile template
//! - a [`CircleCollider`](super::circlecollider::CircleCollider) – the grab
//!   volume; its radius is the maximum draw distance
//! - a child entity with [`LaunchPoint`] – where projectiles spawn
//!
//! [`init_slingshots`](crate::systems::slingshot::init_slingshots) resolves
//! those pieces once and inserts a [`SlingshotState`]. Hover and aim systems
//! only ever look at slingshots that have one, so a badly authored slingshot
//! stays inert.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use super::projectile::ProjectileTemplate;

pub const DEFAULT_VELOCITY_MULT: f32 = 10.0;

/// Authored slingshot configuration.
#[derive(Component, Clone, Debug)]
pub struct Slingshot {
    /// Launch speed per unit of draw distance.
    pub velocity_mult: f32,
    /// Entity the left rubber band is pinned to.
    pub left_anchor: Option<Entity>,
    /// Entity the right rubber band is pinned to.
    pub right_anchor: Option<Entity>,
    pub projectile: ProjectileTemplate,
}

impl Default for Slingshot {
    fn default() -> Self {
        Self {
            velocity_mult: DEFAULT_VELOCITY_MULT,
            left_anchor: None,
            right_anchor: None,
            projectile: ProjectileTemplate::default(),
        }
    }
}

/// Marks the child entity whose position is the projectile spawn point. It
/// doubles as the hover indicator and is only visible while hovered.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct LaunchPoint;

/// Aim state machine.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum AimState {
    #[default]
    Idle,
    Aiming {
        projectile: Entity,
        /// Clamped offset from the launch position.
        offset: Vector2,
    },
}

impl AimState {
    pub fn is_aiming(&self) -> bool {
        matches!(self, AimState::Aiming { .. })
    }

    pub fn projectile(&self) -> Option<Entity> {
        match *self {
            AimState::Aiming { projectile, .. } => Some(projectile),
            AimState::Idle => None,
        }
    }

    /// Idle -> Aiming. Returns false (and changes nothing) when already aiming.
    pub fn begin(&mut self, projectile: Entity) -> bool {
        match self {
            AimState::Idle => {
                *self = AimState::Aiming {
                    projectile,
                    offset: Vector2::zero(),
                };
                true
            }
            AimState::Aiming { .. } => false,
        }
    }

    /// Record the latest clamped offset. No-op while idle.
    pub fn set_offset(&mut self, new_offset: Vector2) {
        if let AimState::Aiming { offset, .. } = self {
            *offset = new_offset;
        }
    }

    /// Aiming -> Idle, yielding the projectile and its final offset.
    pub fn release(&mut self) -> Option<(Entity, Vector2)> {
        match *self {
            AimState::Aiming { projectile, offset } => {
                *self = AimState::Idle;
                Some((projectile, offset))
            }
            AimState::Idle => None,
        }
    }
}

/// Runtime state of a successfully initialized slingshot.
#[derive(Component, Clone, Debug)]
pub struct SlingshotState {
    pub launch_point: Entity,
    /// World position projectiles spawn at.
    pub launch_pos: Vector2,
    pub draw_radius: f32,
    pub left_band: Entity,
    pub right_band: Entity,
    pub hovered: bool,
    pub aim: AimState,
}

/// Which anchor a rubber band hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandSide {
    Left,
    Right,
}

/// A line from an anchor to the projectile being aimed, drawn as a quad
/// tapering from `start_width` to `end_width`.
#[derive(Component, Clone, Copy, Debug)]
pub struct RubberBand {
    pub side: BandSide,
    pub start: Vector2,
    pub end: Vector2,
    pub start_width: f32,
    pub end_width: f32,
}

impl RubberBand {
    pub fn new(side: BandSide) -> Self {
        Self {
            side,
            start: Vector2::zero(),
            end: Vector2::zero(),
            start_width: 4.0,
            end_width: 5.0,
        }
    }

    pub fn set_endpoints(&mut self, start: Vector2, end: Vector2) {
        self.start = start;
        self.end = end;
    }
}
