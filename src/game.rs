//! Scene setup.
//!
//! Turns a [`SceneDef`] into entities: the ground, static blocks and the
//! slingshot with its children (launch point marker, band anchors and the
//! decorative frame). Also inserts the camera resources the scene asks for.
//! Slingshot runtime state is not created here; `init_slingshots` picks the
//! new slingshot up on the first frame.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::circlecollider::CircleCollider;
use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::hidden::Hidden;
use crate::components::mapposition::MapPosition;
use crate::components::shape::Shape;
use crate::components::slingshot::{LaunchPoint, Slingshot};
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::followcamera::FollowCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::scene::{SceneDef, SlingshotDef};

const SLINGSHOT_Z: i32 = 1;
const MARKER_Z: i32 = 20;
const MARKER_COLOR: [u8; 4] = [250, 210, 60, 220];

fn vec2(v: [f32; 2]) -> Vector2 {
    Vector2 { x: v[0], y: v[1] }
}

/// Spawn a positioned child of `parent`. Its world position is precomputed so
/// it is correct before the first transform propagation.
fn spawn_child(
    world: &mut World,
    parent: Entity,
    parent_pos: Vector2,
    local: Vector2,
    bundle: impl Bundle,
) -> Entity {
    world
        .spawn((
            ChildOf(parent),
            MapPosition::from_vec(local),
            GlobalTransform2D {
                position: parent_pos + local,
            },
        ))
        .insert(bundle)
        .id()
}

/// Spawn a slingshot and its children. Returns the slingshot entity.
pub fn spawn_slingshot(world: &mut World, def: &SlingshotDef) -> Entity {
    let pos = vec2(def.position);
    let frame = Tint::from_rgba(def.color);
    let launch_local = def.launch_point.map(vec2).unwrap_or(Vector2::zero());

    let slingshot = world
        .spawn((
            MapPosition::from_vec(pos),
            CircleCollider::new(def.draw_radius).with_offset(launch_local),
            ZIndex(SLINGSHOT_Z),
        ))
        .id();

    // Frame: the trunk and the back prong are drawn behind the projectile,
    // the front prong in front of it.
    let prong_y = launch_local.y * 0.75;
    let prong_h = launch_local.y.abs() * 0.5;
    spawn_child(
        world,
        slingshot,
        pos,
        Vector2::new(0.0, launch_local.y * 0.25),
        (Shape::rect(10.0, launch_local.y.abs() * 0.5), frame, ZIndex(3)),
    );
    if let Some(left) = def.left_anchor {
        spawn_child(
            world,
            slingshot,
            pos,
            Vector2::new(left[0], prong_y),
            (Shape::rect(8.0, prong_h), frame, ZIndex(3)),
        );
    }
    if let Some(right) = def.right_anchor {
        spawn_child(
            world,
            slingshot,
            pos,
            Vector2::new(right[0], prong_y),
            (Shape::rect(8.0, prong_h), frame, ZIndex(17)),
        );
    }

    let left_anchor = def.left_anchor.map(|left| {
        spawn_child(
            world,
            slingshot,
            pos,
            vec2(left),
            (Shape::circle(4.0), frame, ZIndex(4)),
        )
    });
    let right_anchor = def.right_anchor.map(|right| {
        spawn_child(
            world,
            slingshot,
            pos,
            vec2(right),
            (Shape::circle(4.0), frame, ZIndex(16)),
        )
    });

    if def.launch_point.is_some() {
        spawn_child(
            world,
            slingshot,
            pos,
            launch_local,
            (
                LaunchPoint,
                Shape::Ring {
                    radius: def.projectile.radius + 4.0,
                    thickness: 2.0,
                },
                Tint::from_rgba(MARKER_COLOR),
                ZIndex(MARKER_Z),
                Hidden,
            ),
        );
    }

    // Inserted last so init sees every child when it reacts to `Added`.
    world.entity_mut(slingshot).insert(Slingshot {
        velocity_mult: def.velocity_mult,
        left_anchor,
        right_anchor,
        projectile: def.projectile.template(),
    });
    slingshot
}

/// Spawn the static parts of a scene and the slingshot. Returns the slingshot.
pub fn spawn_scene(world: &mut World, scene: &SceneDef) -> Entity {
    let ground = &scene.ground;
    world.spawn((
        MapPosition::new(ground.x, ground.y + ground.height * 0.5),
        BoxCollider::centered(ground.width, ground.height),
        Shape::rect(ground.width, ground.height),
        Tint::from_rgba(ground.color),
        ZIndex(0),
    ));

    for block in &scene.blocks {
        let [w, h] = block.size;
        world.spawn((
            MapPosition::from_vec(vec2(block.position)),
            BoxCollider::centered(w, h),
            Shape::rect(w, h),
            Tint::from_rgba(block.color),
            ZIndex(0),
        ));
    }

    let slingshot = spawn_slingshot(world, &scene.slingshot);
    info!(
        "Scene spawned: slingshot {:?}, {} block(s)",
        slingshot,
        scene.blocks.len()
    );
    slingshot
}

/// Insert the shared camera and the follow-camera slot for `scene`.
pub fn insert_camera(world: &mut World, scene: &SceneDef, config: &GameConfig) {
    let home = vec2(scene.camera.home);
    world.insert_resource(Camera2DRes::centered_on(
        home,
        config.window_width as i32,
        config.window_height as i32,
        scene.camera.zoom,
    ));
    world.insert_resource(
        FollowCamera::new(home)
            .with_easing(config.camera_easing)
            .with_rest_speed(config.camera_rest_speed)
            .with_rest_delay(config.camera_rest_delay),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::hierarchy::Children;

    #[test]
    fn test_spawn_slingshot_children() {
        let mut world = World::new();
        let def = SlingshotDef::default();
        let slingshot = spawn_slingshot(&mut world, &def);

        let sling = world.get::<Slingshot>(slingshot).unwrap();
        let left = sling.left_anchor.unwrap();
        let right = sling.right_anchor.unwrap();
        assert_eq!(world.get::<ChildOf>(left).unwrap().parent(), slingshot);
        let left_global = world.get::<GlobalTransform2D>(left).unwrap().position;
        assert_eq!((left_global.x, left_global.y), (-14.0, -50.0));
        let right_global = world.get::<GlobalTransform2D>(right).unwrap().position;
        assert_eq!((right_global.x, right_global.y), (14.0, -50.0));

        let children = world.get::<Children>(slingshot).unwrap();
        let markers: Vec<Entity> = children
            .iter()
            .filter(|c| world.get::<LaunchPoint>(*c).is_some())
            .collect();
        assert_eq!(markers.len(), 1);
        assert!(world.get::<Hidden>(markers[0]).is_some());

        let collider = world.get::<CircleCollider>(slingshot).unwrap();
        assert_eq!(collider.radius, def.draw_radius);
        assert_eq!((collider.offset.x, collider.offset.y), (0.0, -70.0));
    }

    #[test]
    fn test_spawn_slingshot_without_launch_point() {
        let mut world = World::new();
        let def = SlingshotDef {
            launch_point: None,
            ..SlingshotDef::default()
        };
        let slingshot = spawn_slingshot(&mut world, &def);
        let children = world.get::<Children>(slingshot).unwrap();
        assert!(
            children
                .iter()
                .all(|c| world.get::<LaunchPoint>(c).is_none())
        );
    }

    #[test]
    fn test_spawn_scene_counts() {
        let mut world = World::new();
        let scene = SceneDef::builtin();
        spawn_scene(&mut world, &scene);
        let mut boxes = world.query::<&BoxCollider>();
        assert_eq!(boxes.iter(&world).count(), scene.blocks.len() + 1);
        let mut slingshots = world.query::<&Slingshot>();
        assert_eq!(slingshots.iter(&world).count(), 1);
    }

    #[test]
    fn test_insert_camera_uses_config() {
        let mut world = World::new();
        let mut config = GameConfig::new();
        config.camera_easing = 0.3;
        insert_camera(&mut world, &SceneDef::builtin(), &config);
        let follow = world.resource::<FollowCamera>();
        assert_eq!(follow.easing, 0.3);
        assert!(follow.poi.is_none());
        let cam = world.resource::<Camera2DRes>();
        assert_eq!(cam.0.offset.x, config.window_width as f32 * 0.5);
    }
}
