//! Rendering system.
//!
//! [`render_system`] draws one frame through raylib: world shapes and rubber
//! bands sorted by [`ZIndex`] inside the 2D camera, then the debug overlay
//! when [`DebugMode`] is present.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::circlecollider::CircleCollider;
use crate::components::globaltransform2d::{GlobalTransform2D, world_position};
use crate::components::hidden::Hidden;
use crate::components::mapposition::MapPosition;
use crate::components::shape::Shape;
use crate::components::slingshot::{RubberBand, SlingshotState};
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;

const BACKGROUND: Color = Color::new(200, 225, 245, 255);

enum Drawable {
    Shape { pos: Vector2, shape: Shape },
    Band(RubberBand),
}

/// Draw a triangle regardless of winding. raylib culls the other one.
fn draw_triangle_any<D: RaylibDraw>(d: &mut D, a: Vector2, b: Vector2, c: Vector2, color: Color) {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > 0.0 {
        d.draw_triangle(a, c, b, color);
    } else {
        d.draw_triangle(a, b, c, color);
    }
}

/// Quad from `band.start` to `band.end` tapering between the two widths.
fn draw_band<D: RaylibDraw>(d: &mut D, band: &RubberBand, color: Color) {
    let dir = band.end - band.start;
    if dir.length() < 1e-3 {
        d.draw_circle_v(band.start, band.start_width * 0.5, color);
        return;
    }
    let dir = dir.normalized();
    let normal = Vector2 {
        x: -dir.y,
        y: dir.x,
    };
    let s0 = band.start + normal * (band.start_width * 0.5);
    let s1 = band.start - normal * (band.start_width * 0.5);
    let e0 = band.end + normal * (band.end_width * 0.5);
    let e1 = band.end - normal * (band.end_width * 0.5);
    draw_triangle_any(d, s0, s1, e0, color);
    draw_triangle_any(d, s1, e1, e0, color);
}

fn draw_shape<D: RaylibDraw>(d: &mut D, pos: Vector2, shape: &Shape, color: Color) {
    match *shape {
        Shape::Circle { radius } => d.draw_circle_v(pos, radius, color),
        Shape::Ring { radius, thickness } => {
            d.draw_ring(pos, radius, radius + thickness, 0.0, 360.0, 36, color)
        }
        Shape::Rect { width, height } => d.draw_rectangle_v(
            Vector2 {
                x: pos.x - width * 0.5,
                y: pos.y - height * 0.5,
            },
            Vector2 {
                x: width,
                y: height,
            },
            color,
        ),
    }
}

/// Draw the world inside raylib's 2D camera mode: shapes and rubber bands
/// sorted by [`ZIndex`], skipping [`Hidden`] entities. With [`DebugMode`]
/// the collider outlines and slingshot draw radii are drawn on top.
pub fn render_pass(world: &mut World, d2: &mut RaylibMode2D<RaylibDrawHandle>) {
    let mut to_draw: Vec<(ZIndex, Drawable, Color)> = {
        let mut shapes = world.query_filtered::<(
            &Shape,
            &MapPosition,
            Option<&GlobalTransform2D>,
            Option<&Tint>,
            Option<&ZIndex>,
        ), Without<Hidden>>();
        shapes
            .iter(world)
            .map(|(shape, pos, global, tint, z)| {
                (
                    z.copied().unwrap_or_default(),
                    Drawable::Shape {
                        pos: world_position(pos, global),
                        shape: *shape,
                    },
                    tint.copied().unwrap_or_default().color,
                )
            })
            .collect()
    };
    {
        let mut bands =
            world.query_filtered::<(&RubberBand, Option<&Tint>, Option<&ZIndex>), Without<Hidden>>();
        to_draw.extend(bands.iter(world).map(|(band, tint, z)| {
            (
                z.copied().unwrap_or_default(),
                Drawable::Band(*band),
                tint.copied().unwrap_or_default().color,
            )
        }));
    }

    to_draw.sort_by_key(|(z, _, _)| *z);

    for (_z, drawable, color) in to_draw.iter() {
        match drawable {
            Drawable::Shape { pos, shape } => draw_shape(d2, *pos, shape, *color),
            Drawable::Band(band) => draw_band(d2, band, *color),
        }
    }

    if world.contains_resource::<DebugMode>() {
        let mut boxes = world.query::<(&BoxCollider, &MapPosition, Option<&GlobalTransform2D>)>();
        for (collider, position, global) in boxes.iter(world) {
            let (x, y, w, h) = collider.get_aabb(world_position(position, global));
            d2.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }
        let mut circles =
            world.query::<(&CircleCollider, &MapPosition, Option<&GlobalTransform2D>)>();
        for (collider, position, global) in circles.iter(world) {
            let c = collider.center(world_position(position, global));
            d2.draw_circle_lines(c.x as i32, c.y as i32, collider.radius, Color::RED);
        }
        let mut slingshots = world.query::<&SlingshotState>();
        for state in slingshots.iter(world) {
            let color = if state.hovered {
                Color::ORANGE
            } else {
                Color::DARKGREEN
            };
            d2.draw_circle_lines(
                state.launch_pos.x as i32,
                state.launch_pos.y as i32,
                state.draw_radius,
                color,
            );
        }
    }
}

/// Screen-space debug text: FPS, camera, pointer and slingshot state.
pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let screen = world
        .get_resource::<ScreenSize>()
        .copied()
        .unwrap_or(ScreenSize { w: 0, h: 0 });

    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", d.get_fps());
    d.draw_text(&text, 10, 10, 10, Color::BLACK);

    let entity_count = world.entities().len();
    d.draw_text(&format!("Entities: {}", entity_count), 10, 30, 10, Color::BLACK);

    if let Some(input) = world.get_resource::<InputState>() {
        let p = input.pointer;
        let text = format!(
            "Mouse screen: ({:.1}, {:.1}) World: ({:.1}, {:.1})",
            p.screen.x, p.screen.y, p.world.x, p.world.y
        );
        d.draw_text(&text, 10, 50, 10, Color::BLACK);
    }

    let mut y = 70;
    let mut slingshots = world.query::<(Entity, &SlingshotState)>();
    for (entity, state) in slingshots.iter(world) {
        let text = format!(
            "Slingshot {:?}: hovered={} aim={:?}",
            entity, state.hovered, state.aim
        );
        d.draw_text(&text, 10, y, 10, Color::BLACK);
        y += 20;
    }

    if let Some(cam) = world.get_resource::<Camera2DRes>() {
        let cam = cam.0;
        let text = format!(
            "Camera pos: ({:.1}, {:.1}) Zoom: {:.2}",
            cam.target.x, cam.target.y, cam.zoom
        );
        d.draw_text(&text, 10, screen.h - 30, 10, Color::BLACK);
    }
}

/// Exclusive system drawing one frame.
///
/// Takes the raylib handle and thread out of the world for the duration of
/// the frame so the passes can query the world freely.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let camera = world
        .get_resource::<Camera2DRes>()
        .map(|c| c.0)
        .unwrap_or(Camera2D {
            offset: Vector2::zero(),
            target: Vector2::zero(),
            rotation: 0.0,
            zoom: 1.0,
        });

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(BACKGROUND);
        {
            let mut d2 = d.begin_mode2D(camera);
            render_pass(world, &mut d2);
        }
        render_debug_ui(world, &mut d);
    }

    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}
