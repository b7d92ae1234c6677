//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider for static solids
//! - [`circlecollider`] – circular collider for slingshot volumes and projectiles
//! - [`globaltransform2d`] – computed world position for hierarchy members
//! - [`hidden`] – marker that keeps an entity out of the render pass
//! - [`mapposition`] – world-space (or parent-local) position of an entity
//! - [`projectile`] – projectile marker and spawn template
//! - [`rigidbody`] – kinematic/dynamic body with named forces
//! - [`shape`] – primitive shapes for rendering
//! - [`slingshot`] – slingshot config, runtime state, aim state machine, rubber bands
//! - [`tint`] – fill color
//! - [`ttl`] – time-to-live countdown
//! - [`zindex`] – draw and pick order

pub mod boxcollider;
pub mod circlecollider;
pub mod globaltransform2d;
pub mod hidden;
pub mod mapposition;
pub mod projectile;
pub mod rigidbody;
pub mod shape;
pub mod slingshot;
pub mod tint;
pub mod ttl;
pub mod zindex;
