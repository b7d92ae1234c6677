//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, the shared
//! camera and the follow-target slot. Configuration and scene loading live
//! here too since they produce what gets inserted at startup.
//!
//! Overview
//! - `camera2d` – shared 2D camera used for world/screen transforms
//! - `debugmode` – presence toggles the debug overlay
//! - `followcamera` – the scene-wide follow-target slot and its easing
//! - `gameconfig` – INI-backed engine settings
//! - `input` – per-frame pointer and button state
//! - `scene` – JSON scene authoring format
//! - `screensize` – current framebuffer dimensions in pixels
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod debugmode;
pub mod followcamera;
pub mod gameconfig;
pub mod input;
pub mod scene;
pub mod screensize;
pub mod worldtime;
