//! Physics step for dynamic rigid bodies.
//!
//! [`movement`] integrates every [`RigidBody`] of kind `Dynamic`: enabled
//! forces feed the velocity, air friction damps it, `max_speed` clamps it and
//! the position advances by `velocity * delta`. Bodies with a
//! [`CircleCollider`] are then pushed out of static [`BoxCollider`]s
//! (box entities without a `RigidBody`).
//!
//! Continuous bodies split the frame into sub-steps no longer than half their
//! radius, so a fast projectile meets a thin wall instead of jumping it.
//! Kinematic bodies are left alone.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::circlecollider::CircleCollider;
use crate::components::globaltransform2d::{GlobalTransform2D, world_position};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{CollisionDetection, RigidBody};
use crate::resources::worldtime::WorldTime;

/// Upper bound on continuous sub-steps per frame.
pub const MAX_SUBSTEPS: usize = 64;
/// Normal speed (px/s) below which a contact stops the body instead of
/// bouncing it.
pub const BOUNCE_THRESHOLD: f32 = 30.0;
/// Tangential velocity kept per contact.
pub const CONTACT_FRICTION: f32 = 0.9;

/// Number of sub-steps for a body moving `displacement` this frame.
pub fn substeps(
    displacement: Vector2,
    mode: CollisionDetection,
    collider: Option<&CircleCollider>,
) -> usize {
    match (mode, collider) {
        (CollisionDetection::Continuous, Some(circle)) if circle.radius > 0.0 => {
            let step = circle.radius * 0.5;
            ((displacement.length() / step).ceil() as usize).clamp(1, MAX_SUBSTEPS)
        }
        _ => 1,
    }
}

/// Push a circle out of every overlapping box and adjust its velocity.
///
/// `solids` holds `(min, max)` corners. Returns true if any contact happened.
pub fn resolve_circle_vs_boxes(
    position: &mut Vector2,
    velocity: &mut Vector2,
    circle: &CircleCollider,
    restitution: f32,
    solids: &[(Vector2, Vector2)],
) -> bool {
    let mut touched = false;
    for &(min, max) in solids {
        let center = circle.center(*position);
        let closest = Vector2 {
            x: center.x.clamp(min.x, max.x),
            y: center.y.clamp(min.y, max.y),
        };
        let delta = center - closest;
        let dist_sq = delta.x * delta.x + delta.y * delta.y;
        if dist_sq > circle.radius * circle.radius {
            continue;
        }

        let (normal, depth) = if dist_sq > 1e-8 {
            let dist = dist_sq.sqrt();
            (delta * (1.0 / dist), circle.radius - dist)
        } else {
            // Center inside the box: leave through the nearest face.
            let faces = [
                (Vector2 { x: -1.0, y: 0.0 }, center.x - min.x),
                (Vector2 { x: 1.0, y: 0.0 }, max.x - center.x),
                (Vector2 { x: 0.0, y: -1.0 }, center.y - min.y),
                (Vector2 { x: 0.0, y: 1.0 }, max.y - center.y),
            ];
            let (normal, gap) = faces
                .into_iter()
                .fold(faces[0], |best, face| if face.1 < best.1 { face } else { best });
            (normal, gap + circle.radius)
        };

        *position += normal * depth;
        touched = true;

        let normal_speed = velocity.x * normal.x + velocity.y * normal.y;
        if normal_speed < 0.0 {
            let normal_part = normal * normal_speed;
            let tangent = *velocity - normal_part;
            let bounce = if -normal_speed > BOUNCE_THRESHOLD {
                normal * (-normal_speed * restitution)
            } else {
                Vector2 { x: 0.0, y: 0.0 }
            };
            *velocity = tangent * CONTACT_FRICTION + bounce;
        }
    }
    touched
}

/// Integrate dynamic bodies and resolve them against static boxes.
pub fn movement(
    time: Res<WorldTime>,
    mut bodies: Query<(&mut MapPosition, &mut RigidBody, Option<&CircleCollider>)>,
    solids: Query<(&MapPosition, Option<&GlobalTransform2D>, &BoxCollider), Without<RigidBody>>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }

    let solids: Vec<(Vector2, Vector2)> = solids
        .iter()
        .map(|(pos, global, collider)| collider.aabb(world_position(pos, global)))
        .collect();

    for (mut position, mut body, circle) in bodies.iter_mut() {
        if body.is_kinematic() {
            continue;
        }

        let acceleration = body.total_acceleration();
        body.velocity += acceleration * dt;
        if body.friction > 0.0 {
            let damping = (1.0 - body.friction * dt).max(0.0);
            body.velocity = body.velocity * damping;
        }
        body.clamp_speed();

        let steps = substeps(body.velocity * dt, body.collision_detection, circle);
        let step_dt = dt / steps as f32;
        let restitution = body.restitution;
        let body = &mut *body;

        for _ in 0..steps {
            position.pos += body.velocity * step_dt;
            if let Some(circle) = circle {
                resolve_circle_vs_boxes(
                    &mut position.pos,
                    &mut body.velocity,
                    circle,
                    restitution,
                    &solids,
                );
            }
        }
    }
}
