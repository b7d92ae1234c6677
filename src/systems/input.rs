//! Input systems.
//!
//! [`update_input_state`] reads hardware input from raylib each frame and
//! writes the results into [`InputState`]. It also projects the pointer into
//! world space through the shared camera, so gameplay systems never need the
//! raylib handle. Toggling debug mode is emitted as a
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;
use raylib::RaylibHandle;
use raylib::prelude::Vector2;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::input::{BoolState, InputBinding, InputState};
use crate::resources::screensize::ScreenSize;

fn poll(rl: &RaylibHandle, state: &mut BoolState) {
    match state.binding {
        InputBinding::Key(key) => state.set(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        ),
        InputBinding::Mouse(button) => state.set(
            rl.is_mouse_button_down(button),
            rl.is_mouse_button_pressed(button),
            rl.is_mouse_button_released(button),
        ),
    }
}

/// Poll raylib for pointer and button input and update the `InputState`
/// resource.
///
/// Without a [`Camera2DRes`] the world pointer equals the screen pointer.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    camera: Option<Res<Camera2DRes>>,
    screen: Option<ResMut<ScreenSize>>,
    rl: NonSend<RaylibHandle>,
    mut commands: Commands,
) {
    if let Some(mut screen) = screen {
        screen.w = rl.get_screen_width();
        screen.h = rl.get_screen_height();
    }

    let screen_pos: Vector2 = rl.get_mouse_position();
    input.pointer.screen = screen_pos;
    input.pointer.world = match camera {
        Some(camera) => rl.get_screen_to_world2D(screen_pos, camera.0),
        None => screen_pos,
    };

    poll(&rl, &mut input.primary);
    poll(&rl, &mut input.action_back);
    poll(&rl, &mut input.mode_debug);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
