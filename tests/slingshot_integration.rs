//! Slingshot integration tests: hover, aim, drag, release and the hand-off to
//! the follow camera, driven through `InputState` without a window.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ScheduleLabel;
use bevy_ecs::system::RunSystemOnce;
use raylib::prelude::Vector2;

use slingshot::components::boxcollider::BoxCollider;
use slingshot::components::hidden::Hidden;
use slingshot::components::mapposition::MapPosition;
use slingshot::components::projectile::Projectile;
use slingshot::components::rigidbody::{BodyKind, CollisionDetection, RigidBody};
use slingshot::components::slingshot::{
    AimState, BandSide, LaunchPoint, RubberBand, Slingshot, SlingshotState,
};
use slingshot::components::ttl::Ttl;
use slingshot::components::zindex::ZIndex;
use slingshot::game::spawn_slingshot;
use slingshot::resources::camera2d::Camera2DRes;
use slingshot::resources::followcamera::FollowCamera;
use slingshot::resources::input::InputState;
use slingshot::resources::scene::SlingshotDef;
use slingshot::resources::worldtime::WorldTime;
use slingshot::systems::followcamera::follow_camera;
use slingshot::systems::movement::movement;
use slingshot::systems::propagate_transforms::propagate_transforms;
use slingshot::systems::slingshot::{init_slingshots, slingshot_aim, slingshot_hover};
use slingshot::systems::ttl::ttl_system;

const EPSILON: f32 = 1e-3;
const LAUNCH: Vector2 = Vector2 { x: 0.0, y: -50.0 };
const RADIUS: f32 = 40.0;
const MULT: f32 = 10.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vector2, b: Vector2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn at(dx: f32, dy: f32) -> Vector2 {
    Vector2 {
        x: LAUNCH.x + dx,
        y: LAUNCH.y + dy,
    }
}

fn slingshot_def() -> SlingshotDef {
    SlingshotDef {
        position: [0.0, 0.0],
        draw_radius: RADIUS,
        velocity_mult: MULT,
        launch_point: Some([0.0, -50.0]),
        left_anchor: Some([-10.0, -50.0]),
        right_anchor: Some([10.0, -50.0]),
        ..SlingshotDef::default()
    }
}

/// The slingshot systems only.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
struct SlingshotFrame;

/// The gameplay schedule, physics and camera included.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
struct GameplayFrame;

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta: 1.0 / 60.0,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(InputState::default().with_pointer_world(Vector2 {
        x: 500.0,
        y: 500.0,
    }));
    world.insert_resource(FollowCamera::new(Vector2 { x: 0.0, y: 0.0 }).with_easing(0.5));

    // Built once per world so change detection carries across frames.
    let mut slingshot_frame = Schedule::new(SlingshotFrame);
    slingshot_frame.add_systems(
        (
            init_slingshots,
            propagate_transforms,
            slingshot_hover,
            slingshot_aim,
        )
            .chain(),
    );
    world.add_schedule(slingshot_frame);

    let mut gameplay_frame = Schedule::new(GameplayFrame);
    gameplay_frame.add_systems(
        (
            init_slingshots,
            propagate_transforms,
            slingshot_hover,
            slingshot_aim,
            movement,
            ttl_system,
            follow_camera,
        )
            .chain(),
    );
    world.add_schedule(gameplay_frame);
    world
}

/// World with an initialized slingshot, pointer far away.
fn setup() -> (World, Entity) {
    let mut world = make_world();
    let slingshot = spawn_slingshot(&mut world, &slingshot_def());
    frame(&mut world);
    (world, slingshot)
}

fn frame(world: &mut World) {
    world.run_schedule(SlingshotFrame);
    world.clear_trackers();
}

fn full_frame(world: &mut World) {
    world.run_schedule(GameplayFrame);
    world.clear_trackers();
}

fn pointer(world: &mut World, pos: Vector2, down: bool, pressed: bool, released: bool) {
    let mut input = world.resource_mut::<InputState>();
    input.pointer.world = pos;
    input.primary.set(down, pressed, released);
}

fn state(world: &World, slingshot: Entity) -> SlingshotState {
    world.get::<SlingshotState>(slingshot).unwrap().clone()
}

fn projectiles(world: &mut World) -> Vec<Entity> {
    let mut q = world.query_filtered::<Entity, With<Projectile>>();
    q.iter(world).collect()
}

/// Hover the slingshot, press, and return the spawned projectile.
fn start_aiming(world: &mut World, slingshot: Entity) -> Entity {
    pointer(world, LAUNCH, false, false, false);
    frame(world);
    pointer(world, LAUNCH, true, true, false);
    frame(world);
    state(world, slingshot).aim.projectile().unwrap()
}

#[test]
fn init_resolves_launch_point_and_bands() {
    let (world, slingshot) = setup();
    let st = state(&world, slingshot);
    assert!(vec_approx_eq(st.launch_pos, LAUNCH));
    assert!(approx_eq(st.draw_radius, RADIUS));
    assert_eq!(st.aim, AimState::Idle);
    assert!(!st.hovered);
    assert!(world.get::<LaunchPoint>(st.launch_point).is_some());
    assert!(world.get::<Hidden>(st.launch_point).is_some());

    let left = world.get::<RubberBand>(st.left_band).unwrap();
    assert_eq!(left.side, BandSide::Left);
    assert!(approx_eq(left.start_width, 4.0));
    assert!(approx_eq(left.end_width, 5.0));
    assert_eq!(
        world.get::<RubberBand>(st.right_band).unwrap().side,
        BandSide::Right
    );
    assert!(world.get::<Hidden>(st.left_band).is_some());
    assert!(world.get::<Hidden>(st.right_band).is_some());
}

#[test]
fn init_runs_once_per_slingshot() {
    let (mut world, slingshot) = setup();
    let first = state(&world, slingshot);
    frame(&mut world);
    frame(&mut world);
    let mut bands = world.query::<&RubberBand>();
    assert_eq!(bands.iter(&world).count(), 2);
    assert_eq!(state(&world, slingshot).left_band, first.left_band);
}

#[test]
fn init_leaves_an_aiming_slingshot_alone() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);
    let before = state(&world, slingshot);

    // A fresh system sees every slingshot as newly added.
    world.run_system_once(init_slingshots).unwrap();
    world.flush();
    // Re-inserting the config marks it added again.
    let config = world.get::<Slingshot>(slingshot).unwrap().clone();
    world.entity_mut(slingshot).insert(config);
    frame(&mut world);

    let after = state(&world, slingshot);
    assert_eq!(after.aim.projectile(), Some(projectile));
    assert_eq!(after.left_band, before.left_band);
    assert_eq!(after.right_band, before.right_band);
    let mut bands = world.query::<&RubberBand>();
    assert_eq!(bands.iter(&world).count(), 2);
}

#[test]
fn hover_toggles_launch_marker() {
    let (mut world, slingshot) = setup();
    let marker = state(&world, slingshot).launch_point;

    pointer(&mut world, at(15.0, 10.0), false, false, false);
    frame(&mut world);
    assert!(state(&world, slingshot).hovered);
    assert!(world.get::<Hidden>(marker).is_none());

    pointer(&mut world, at(RADIUS + 5.0, 0.0), false, false, false);
    frame(&mut world);
    assert!(!state(&world, slingshot).hovered);
    assert!(world.get::<Hidden>(marker).is_some());
}

#[test]
fn higher_collider_blocks_hover() {
    let (mut world, slingshot) = setup();
    world.spawn((
        MapPosition::from_vec(LAUNCH),
        BoxCollider::centered(20.0, 20.0),
        ZIndex(5),
    ));
    // Lower than the slingshot: never blocks.
    world.spawn((
        MapPosition::from_vec(LAUNCH),
        BoxCollider::centered(200.0, 200.0),
        ZIndex(0),
    ));

    pointer(&mut world, LAUNCH, false, false, false);
    frame(&mut world);
    assert!(!state(&world, slingshot).hovered);

    pointer(&mut world, at(30.0, 0.0), false, false, false);
    frame(&mut world);
    assert!(state(&world, slingshot).hovered);
}

#[test]
fn press_while_hovered_spawns_kinematic_projectile_at_launch_point() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);

    assert!(world.get::<Projectile>(projectile).is_some());
    let pos = world.get::<MapPosition>(projectile).unwrap().pos;
    assert!(vec_approx_eq(pos, LAUNCH));
    let body = world.get::<RigidBody>(projectile).unwrap();
    assert_eq!(body.kind, BodyKind::Kinematic);
    assert!(body.is_force_enabled("gravity"));

    let st = state(&world, slingshot);
    assert!(st.aim.is_aiming());
    assert!(world.get::<Hidden>(st.left_band).is_none());
    assert!(world.get::<Hidden>(st.right_band).is_none());
}

#[test]
fn press_without_hover_does_nothing() {
    let (mut world, slingshot) = setup();
    pointer(&mut world, at(200.0, 0.0), true, true, false);
    frame(&mut world);
    assert_eq!(state(&world, slingshot).aim, AimState::Idle);
    assert!(projectiles(&mut world).is_empty());
}

#[test]
fn second_press_while_aiming_does_not_spawn_again() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);
    pointer(&mut world, LAUNCH, true, true, false);
    frame(&mut world);
    assert_eq!(projectiles(&mut world), vec![projectile]);
    assert_eq!(state(&world, slingshot).aim.projectile(), Some(projectile));
}

#[test]
fn drag_beyond_radius_is_clamped() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);

    // Twice the draw radius, straight down.
    pointer(&mut world, at(0.0, 2.0 * RADIUS), true, false, false);
    frame(&mut world);

    let pos = world.get::<MapPosition>(projectile).unwrap().pos;
    assert!(vec_approx_eq(pos, at(0.0, RADIUS)));
    match state(&world, slingshot).aim {
        AimState::Aiming { offset, .. } => {
            assert!(approx_eq(offset.length(), RADIUS));
            assert!(approx_eq(offset.x, 0.0));
            assert!(offset.y > 0.0);
        }
        AimState::Idle => panic!("expected to be aiming"),
    }
}

#[test]
fn drag_inside_radius_follows_pointer() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);
    pointer(&mut world, at(-12.0, 9.0), true, false, false);
    frame(&mut world);
    let pos = world.get::<MapPosition>(projectile).unwrap().pos;
    assert!(vec_approx_eq(pos, at(-12.0, 9.0)));
}

#[test]
fn bands_span_anchor_to_projectile_while_aiming() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);
    let st = state(&world, slingshot);

    for target in [at(-20.0, 10.0), at(25.0, 25.0), at(0.0, 3.0 * RADIUS)] {
        pointer(&mut world, target, true, false, false);
        frame(&mut world);
        let pos = world.get::<MapPosition>(projectile).unwrap().pos;

        let left = world.get::<RubberBand>(st.left_band).unwrap();
        assert!(vec_approx_eq(left.start, Vector2 { x: -10.0, y: -50.0 }));
        assert!(vec_approx_eq(left.end, pos));
        let right = world.get::<RubberBand>(st.right_band).unwrap();
        assert!(vec_approx_eq(right.start, Vector2 { x: 10.0, y: -50.0 }));
        assert!(vec_approx_eq(right.end, pos));
        assert!(world.get::<Hidden>(st.left_band).is_none());
    }

    pointer(&mut world, at(0.0, 10.0), false, false, true);
    frame(&mut world);
    assert!(world.get::<Hidden>(st.left_band).is_some());
    assert!(world.get::<Hidden>(st.right_band).is_some());
}

#[test]
fn bands_follow_a_moved_anchor() {
    let (mut world, slingshot) = setup();
    start_aiming(&mut world, slingshot);
    let left_anchor = world.get::<Slingshot>(slingshot).unwrap().left_anchor.unwrap();
    world.get_mut::<MapPosition>(left_anchor).unwrap().pos = Vector2 { x: -30.0, y: -60.0 };

    pointer(&mut world, at(0.0, 10.0), true, false, false);
    frame(&mut world);
    let band = state(&world, slingshot).left_band;
    let band = world.get::<RubberBand>(band).unwrap();
    assert!(vec_approx_eq(band.start, Vector2 { x: -30.0, y: -60.0 }));
}

#[test]
fn release_launches_with_negated_offset() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);

    let drag = at(-30.0, 20.0);
    pointer(&mut world, drag, true, false, false);
    frame(&mut world);
    pointer(&mut world, drag, false, false, true);
    frame(&mut world);

    let body = world.get::<RigidBody>(projectile).unwrap();
    assert_eq!(body.kind, BodyKind::Dynamic);
    assert_eq!(body.collision_detection, CollisionDetection::Continuous);
    assert!(vec_approx_eq(
        body.velocity,
        Vector2 {
            x: 30.0 * MULT,
            y: -20.0 * MULT
        }
    ));

    assert_eq!(state(&world, slingshot).aim, AimState::Idle);
    assert_eq!(world.resource::<FollowCamera>().poi, Some(projectile));
    let ttl = world.get::<Ttl>(projectile).unwrap();
    assert!(approx_eq(ttl.remaining, slingshot_def().projectile.lifetime));
}

#[test]
fn release_beyond_radius_uses_clamped_offset() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);

    // Release far away without an intermediate drag frame.
    pointer(&mut world, at(-3.0 * RADIUS, 0.0), false, false, true);
    frame(&mut world);

    let body = world.get::<RigidBody>(projectile).unwrap();
    assert!(approx_eq(body.velocity.length(), RADIUS * MULT));
    assert!(body.velocity.x > 0.0);
    assert!(approx_eq(body.velocity.y, 0.0));
    let pos = world.get::<MapPosition>(projectile).unwrap().pos;
    assert!(vec_approx_eq(pos, at(-RADIUS, 0.0)));
}

#[test]
fn button_up_without_release_edge_still_launches() {
    let (mut world, slingshot) = setup();
    let projectile = start_aiming(&mut world, slingshot);
    pointer(&mut world, at(10.0, 0.0), false, false, false);
    frame(&mut world);
    assert_eq!(state(&world, slingshot).aim, AimState::Idle);
    let body = world.get::<RigidBody>(projectile).unwrap();
    assert_eq!(body.kind, BodyKind::Dynamic);
    assert!(vec_approx_eq(body.velocity, Vector2 { x: -100.0, y: 0.0 }));
}

#[test]
fn press_and_release_in_one_frame_launches_at_rest() {
    let (mut world, slingshot) = setup();
    pointer(&mut world, LAUNCH, false, false, false);
    frame(&mut world);
    assert!(state(&world, slingshot).hovered);

    pointer(&mut world, LAUNCH, false, true, true);
    frame(&mut world);
    frame(&mut world);

    let shots = projectiles(&mut world);
    assert_eq!(shots.len(), 1);
    let projectile = shots[0];
    let body = world.get::<RigidBody>(projectile).unwrap();
    assert_eq!(body.kind, BodyKind::Dynamic);
    assert_eq!(body.collision_detection, CollisionDetection::Continuous);
    assert!(vec_approx_eq(body.velocity, Vector2 { x: 0.0, y: 0.0 }));
    assert_eq!(world.resource::<FollowCamera>().poi, Some(projectile));
    assert_eq!(state(&world, slingshot).aim, AimState::Idle);
}

#[test]
fn release_while_idle_has_no_effect() {
    let (mut world, slingshot) = setup();
    pointer(&mut world, LAUNCH, false, false, true);
    frame(&mut world);
    assert_eq!(state(&world, slingshot).aim, AimState::Idle);
    assert!(projectiles(&mut world).is_empty());
    assert_eq!(world.resource::<FollowCamera>().poi, None);
}

#[test]
fn missing_launch_point_leaves_slingshot_inert() {
    let mut world = make_world();
    let def = SlingshotDef {
        launch_point: None,
        ..slingshot_def()
    };
    let slingshot = spawn_slingshot(&mut world, &def);
    frame(&mut world);
    assert!(world.get::<SlingshotState>(slingshot).is_none());

    pointer(&mut world, LAUNCH, true, true, false);
    frame(&mut world);
    pointer(&mut world, at(0.0, 20.0), false, false, true);
    frame(&mut world);
    assert!(projectiles(&mut world).is_empty());
    let mut bands = world.query::<&RubberBand>();
    assert_eq!(bands.iter(&world).count(), 0);
    assert_eq!(world.resource::<FollowCamera>().poi, None);
}

#[test]
fn missing_collider_leaves_slingshot_inert() {
    let mut world = make_world();
    let slingshot = world.spawn(MapPosition::new(0.0, 0.0)).id();
    let marker = world
        .spawn((ChildOf(slingshot), MapPosition::from_vec(LAUNCH), LaunchPoint))
        .id();
    world.entity_mut(slingshot).insert(Slingshot::default());
    frame(&mut world);
    assert!(world.get::<SlingshotState>(slingshot).is_none());
    assert!(world.get::<Hidden>(marker).is_none());
}

#[test]
fn systems_skip_frames_without_input() {
    let (mut world, slingshot) = setup();
    world.remove_resource::<InputState>();
    frame(&mut world);
    assert_eq!(state(&world, slingshot).aim, AimState::Idle);
}

#[test]
fn launched_projectile_flies_and_camera_follows() {
    let mut world = make_world();
    world.insert_resource(Camera2DRes::centered_on(
        Vector2 { x: 0.0, y: 0.0 },
        800,
        600,
        1.0,
    ));
    let slingshot = spawn_slingshot(&mut world, &slingshot_def());
    full_frame(&mut world);

    pointer(&mut world, LAUNCH, false, false, false);
    full_frame(&mut world);
    pointer(&mut world, LAUNCH, true, true, false);
    full_frame(&mut world);
    let projectile = state(&world, slingshot).aim.projectile().unwrap();

    // Kinematic while aiming: gravity does not pull it.
    pointer(&mut world, at(-RADIUS, 0.0), true, false, false);
    full_frame(&mut world);
    full_frame(&mut world);
    let pos = world.get::<MapPosition>(projectile).unwrap().pos;
    assert!(vec_approx_eq(pos, at(-RADIUS, 0.0)));

    pointer(&mut world, at(-RADIUS, 0.0), false, false, true);
    full_frame(&mut world);
    pointer(&mut world, at(-RADIUS, 0.0), false, false, false);
    for _ in 0..10 {
        full_frame(&mut world);
    }

    let pos = world.get::<MapPosition>(projectile).unwrap().pos;
    assert!(pos.x > LAUNCH.x + 10.0);
    assert_eq!(world.resource::<FollowCamera>().poi, Some(projectile));
    let cam = world.resource::<Camera2DRes>();
    assert!(cam.0.target.x > 0.0);
}
