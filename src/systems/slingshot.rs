//! Slingshot systems.
//!
//! Three systems drive a slingshot through idle, hovering, aiming and launch:
//!
//! - [`init_slingshots`] resolves a newly added [`Slingshot`] once: finds the
//!   [`LaunchPoint`] child, reads the draw radius from the slingshot's
//!   [`CircleCollider`], spawns the two rubber bands and inserts
//!   [`SlingshotState`]. Slingshots that fail this step never get a state and
//!   are ignored by everything below.
//! - [`slingshot_hover`] picks the topmost collider under the pointer and
//!   shows the launch point marker while that collider is the slingshot.
//! - [`slingshot_aim`] runs the [`AimState`] machine: spawn a kinematic
//!   projectile on press, drag it (clamped to the draw radius) while held,
//!   and launch it on release, handing it to the [`FollowCamera`].
//!
//! All pointer data comes from [`InputState`]; these systems never touch
//! raylib directly.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};
use raylib::prelude::{Color, Vector2};

use crate::components::boxcollider::BoxCollider;
use crate::components::circlecollider::CircleCollider;
use crate::components::globaltransform2d::{GlobalTransform2D, world_position};
use crate::components::hidden::Hidden;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::{Projectile, ProjectileTemplate};
use crate::components::rigidbody::{CollisionDetection, RigidBody};
use crate::components::shape::Shape;
use crate::components::slingshot::{
    AimState, BandSide, LaunchPoint, RubberBand, Slingshot, SlingshotState,
};
use crate::components::tint::Tint;
use crate::components::ttl::Ttl;
use crate::components::zindex::ZIndex;
use crate::resources::followcamera::FollowCamera;
use crate::resources::input::InputState;

/// Draw order of the band behind the projectile.
pub const BACK_BAND_Z: i32 = 5;
/// Draw order of spawned projectiles.
pub const PROJECTILE_Z: i32 = 10;
/// Draw order of the band in front of the projectile.
pub const FRONT_BAND_Z: i32 = 15;

const BAND_COLOR: Color = Color::new(60, 30, 20, 255);

/// Limit `offset` to a length of `radius`, keeping its direction.
pub fn clamp_offset(offset: Vector2, radius: f32) -> Vector2 {
    let radius = radius.max(0.0);
    if offset.length() > radius {
        offset.normalized() * radius
    } else {
        offset
    }
}

/// Launch velocity for a release at `offset` from the launch position.
pub fn launch_velocity(offset: Vector2, velocity_mult: f32) -> Vector2 {
    offset * -velocity_mult
}

/// Spawn a projectile from `template` at `at`, kinematic until launched.
pub fn spawn_projectile(
    commands: &mut Commands,
    template: &ProjectileTemplate,
    at: Vector2,
) -> Entity {
    commands
        .spawn((
            Projectile,
            MapPosition::from_vec(at),
            template.body(),
            CircleCollider::new(template.radius),
            Shape::circle(template.radius),
            Tint {
                color: template.color,
            },
            ZIndex(PROJECTILE_Z),
        ))
        .id()
}

fn spawn_band(commands: &mut Commands, side: BandSide) -> Entity {
    let z = match side {
        BandSide::Left => BACK_BAND_Z,
        BandSide::Right => FRONT_BAND_Z,
    };
    commands
        .spawn((
            RubberBand::new(side),
            Tint { color: BAND_COLOR },
            ZIndex(z),
            Hidden,
        ))
        .id()
}

/// Resolve newly added slingshots.
///
/// The launch position is fixed here: slingshots are static props. Slingshots
/// that already carry a [`SlingshotState`] are left alone, so re-inserting
/// [`Slingshot`] never resets a shot in progress.
pub fn init_slingshots(
    added: Query<
        (
            Entity,
            &MapPosition,
            Option<&GlobalTransform2D>,
            Option<&CircleCollider>,
            Option<&Children>,
        ),
        (Added<Slingshot>, Without<SlingshotState>),
    >,
    launch_points: Query<&MapPosition, With<LaunchPoint>>,
    mut commands: Commands,
) {
    for (entity, pos, global, collider, children) in added.iter() {
        let launch_point = children.and_then(|children| {
            children
                .iter()
                .find_map(|child| launch_points.get(child).ok().map(|p| (child, p.pos)))
        });
        let Some((launch_point, local)) = launch_point else {
            error!(
                "Slingshot {:?} has no child with a LaunchPoint; it will not respond to input",
                entity
            );
            continue;
        };
        let Some(collider) = collider else {
            error!(
                "Slingshot {:?} has no CircleCollider to take its draw radius from; it will not respond to input",
                entity
            );
            continue;
        };

        commands.entity(launch_point).insert(Hidden);
        let left_band = spawn_band(&mut commands, BandSide::Left);
        let right_band = spawn_band(&mut commands, BandSide::Right);

        let launch_pos = world_position(pos, global) + local;
        debug!(
            "Slingshot {:?} ready: launch at ({:.1}, {:.1}), draw radius {:.1}",
            entity, launch_pos.x, launch_pos.y, collider.radius
        );
        commands.entity(entity).insert(SlingshotState {
            launch_point,
            launch_pos,
            draw_radius: collider.radius,
            left_band,
            right_band,
            hovered: false,
            aim: AimState::Idle,
        });
    }
}

type PickQuery<'w, 's, C> = Query<
    'w,
    's,
    (
        Entity,
        &'static C,
        &'static MapPosition,
        Option<&'static GlobalTransform2D>,
        Option<&'static ZIndex>,
    ),
    Without<Projectile>,
>;

/// Topmost pickable collider containing `point`.
///
/// Highest [`ZIndex`] wins, a missing one counts as 0. On equal z the first
/// hit is kept, circles before boxes.
pub fn pick_topmost(
    point: Vector2,
    circles: &PickQuery<CircleCollider>,
    boxes: &PickQuery<BoxCollider>,
) -> Option<Entity> {
    let mut best: Option<(i32, Entity)> = None;
    let mut consider = |entity: Entity, z: Option<&ZIndex>| {
        let z = z.map(|z| z.0).unwrap_or(0);
        if best.is_none_or(|(best_z, _)| z > best_z) {
            best = Some((z, entity));
        }
    };
    for (entity, collider, pos, global, z) in circles.iter() {
        if collider.contains_point(world_position(pos, global), point) {
            consider(entity, z);
        }
    }
    for (entity, collider, pos, global, z) in boxes.iter() {
        if collider.contains_point(world_position(pos, global), point) {
            consider(entity, z);
        }
    }
    best.map(|(_, entity)| entity)
}

/// Update `hovered` and the launch point marker of every slingshot.
pub fn slingshot_hover(
    input: Option<Res<InputState>>,
    mut slingshots: Query<(Entity, &mut SlingshotState)>,
    circles: PickQuery<CircleCollider>,
    boxes: PickQuery<BoxCollider>,
    mut commands: Commands,
) {
    let Some(input) = input else {
        return;
    };
    let topmost = pick_topmost(input.pointer.world, &circles, &boxes);

    for (entity, mut state) in slingshots.iter_mut() {
        let hovered = topmost == Some(entity);
        if hovered == state.hovered {
            continue;
        }
        state.hovered = hovered;
        if hovered {
            commands.entity(state.launch_point).remove::<Hidden>();
        } else {
            commands.entity(state.launch_point).insert(Hidden);
        }
        debug!("Slingshot {:?} hovered: {}", entity, hovered);
    }
}

type AnchorQuery<'w, 's> = Query<
    'w,
    's,
    (&'static MapPosition, Option<&'static GlobalTransform2D>),
    Without<Projectile>,
>;

fn update_bands(
    slingshot: &Slingshot,
    state: &SlingshotState,
    end: Vector2,
    anchors: &AnchorQuery,
    bands: &mut Query<&mut RubberBand>,
) {
    let (Some(left), Some(right)) = (slingshot.left_anchor, slingshot.right_anchor) else {
        return;
    };
    let (Ok(left), Ok(right)) = (anchors.get(left), anchors.get(right)) else {
        return;
    };
    let left = world_position(left.0, left.1);
    let right = world_position(right.0, right.1);

    if let Ok(mut band) = bands.get_mut(state.left_band) {
        band.set_endpoints(left, end);
    }
    if let Ok(mut band) = bands.get_mut(state.right_band) {
        band.set_endpoints(right, end);
    }
}

fn set_bands_hidden(commands: &mut Commands, state: &SlingshotState, hidden: bool) {
    for band in [state.left_band, state.right_band] {
        if hidden {
            commands.entity(band).insert(Hidden);
        } else {
            commands.entity(band).remove::<Hidden>();
        }
    }
}

/// Run the aim state machine of every initialized slingshot.
pub fn slingshot_aim(
    input: Option<Res<InputState>>,
    mut follow: Option<ResMut<FollowCamera>>,
    mut slingshots: Query<(Entity, &Slingshot, &mut SlingshotState)>,
    anchors: AnchorQuery,
    mut projectiles: Query<(&mut MapPosition, &mut RigidBody), With<Projectile>>,
    mut bands: Query<&mut RubberBand>,
    mut commands: Commands,
) {
    let Some(input) = input else {
        return;
    };
    let pointer = input.pointer.world;

    for (entity, slingshot, mut state) in slingshots.iter_mut() {
        let Some(projectile) = state.aim.projectile() else {
            if state.hovered && input.primary.just_pressed {
                let projectile =
                    spawn_projectile(&mut commands, &slingshot.projectile, state.launch_pos);
                state.aim.begin(projectile);
                update_bands(slingshot, &state, state.launch_pos, &anchors, &mut bands);
                set_bands_hidden(&mut commands, &state, false);
                info!("Slingshot {:?}: aiming projectile {:?}", entity, projectile);
            }
            continue;
        };

        let offset = clamp_offset(pointer - state.launch_pos, state.draw_radius);
        state.aim.set_offset(offset);
        let aim_pos = state.launch_pos + offset;
        if let Ok((mut pos, _)) = projectiles.get_mut(projectile) {
            pos.pos = aim_pos;
        }
        update_bands(slingshot, &state, aim_pos, &anchors, &mut bands);

        if !(input.primary.just_released || !input.primary.active) {
            continue;
        }

        set_bands_hidden(&mut commands, &state, true);
        let Some((projectile, offset)) = state.aim.release() else {
            continue;
        };
        let Ok((_, mut body)) = projectiles.get_mut(projectile) else {
            warn!(
                "Slingshot {:?}: projectile {:?} is gone, nothing to launch",
                entity, projectile
            );
            continue;
        };

        let velocity = launch_velocity(offset, slingshot.velocity_mult);
        body.set_dynamic(CollisionDetection::Continuous);
        body.set_velocity(velocity);
        if slingshot.projectile.lifetime > 0.0 {
            commands
                .entity(projectile)
                .insert(Ttl::new(slingshot.projectile.lifetime));
        }
        if let Some(follow) = follow.as_deref_mut() {
            follow.follow(projectile);
        }
        info!(
            "Slingshot {:?}: launched {:?} with velocity ({:.1}, {:.1})",
            entity, projectile, velocity.x, velocity.y
        );
    }
}
