//! Per-frame input resource.
//!
//! Captures the pointer and the few buttons the game cares about and exposes
//! them to systems via the [`InputState`] resource. Gameplay systems read this
//! resource only; they never talk to raylib, so tests can drive them by
//! inserting an `InputState` with the pointer wherever they need it.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Physical control an action is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBinding {
    Key(KeyboardKey),
    Mouse(MouseButton),
}

#[derive(Debug, Clone, Copy)]
/// Boolean button state with an associated binding.
pub struct BoolState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button was pressed this frame.
    pub just_pressed: bool,
    /// Whether the button was released this frame.
    pub just_released: bool,

    /// The control bound to this action.
    pub binding: InputBinding,
}

impl BoolState {
    pub fn new(binding: InputBinding) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            binding,
        }
    }

    /// Overwrite all three flags with this frame's readings.
    pub fn set(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::new(InputBinding::Key(KeyboardKey::KEY_NULL))
    }
}

/// Pointer position in both spaces.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    /// Framebuffer coordinates in pixels.
    pub screen: Vector2,
    /// `screen` projected through the shared camera.
    pub world: Vector2,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            screen: Vector2 { x: 0.0, y: 0.0 },
            world: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub pointer: PointerState,
    /// Grab/launch button.
    pub primary: BoolState,
    /// Quit.
    pub action_back: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer: PointerState::default(),
            primary: BoolState::new(InputBinding::Mouse(MouseButton::MOUSE_BUTTON_LEFT)),
            action_back: BoolState::new(InputBinding::Key(KeyboardKey::KEY_ESCAPE)),
            mode_debug: BoolState::new(InputBinding::Key(KeyboardKey::KEY_F11)),
        }
    }
}

impl InputState {
    /// Place the pointer at a world position (screen position is left as is).
    pub fn with_pointer_world(mut self, world: Vector2) -> Self {
        self.pointer.world = world;
        self
    }
}
