//! Follow-camera system.
//!
//! [`follow_camera`] eases the shared [`Camera2DRes`] toward the
//! [`FollowCamera`] point of interest, or back home when there is none. A POI
//! that has been despawned, or that is a dynamic body that stayed slower than
//! `rest_speed` for `rest_delay` seconds, is released here.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::globaltransform2d::{GlobalTransform2D, world_position};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::followcamera::FollowCamera;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;

/// Move the camera target one frame closer to the follow destination.
///
/// Also keeps the camera offset at the center of the screen, so the target
/// is what appears in the middle of the window.
pub fn follow_camera(
    time: Res<WorldTime>,
    follow: Option<ResMut<FollowCamera>>,
    camera: Option<ResMut<Camera2DRes>>,
    screen: Option<Res<ScreenSize>>,
    targets: Query<(&MapPosition, Option<&GlobalTransform2D>, Option<&RigidBody>)>,
) {
    let (Some(mut follow), Some(mut camera)) = (follow, camera) else {
        return;
    };

    if let Some(screen) = screen {
        camera.0.offset = Vector2 {
            x: screen.w as f32 * 0.5,
            y: screen.h as f32 * 0.5,
        };
    }

    let mut destination = follow.home;
    if let Some(poi) = follow.poi {
        match targets.get(poi) {
            Ok((pos, global, body)) => {
                let resting = body.is_some_and(|body| {
                    !body.is_kinematic() && body.velocity.length() < follow.rest_speed
                });
                if follow.tick_rest(resting, time.delta) {
                    debug!("Follow camera: {:?} came to rest, returning home", poi);
                    follow.release();
                } else {
                    destination = world_position(pos, global);
                }
            }
            Err(_) => {
                debug!("Follow camera: {:?} is gone, returning home", poi);
                follow.release();
            }
        }
    }

    let destination = follow.limit(destination);
    let t = follow.blend(time.delta);
    let target = camera.0.target;
    camera.0.target = target + (destination - target) * t;
}
