//! Game configuration resource.
//!
//! Engine settings loaded from an INI file. Every value has a safe default,
//! so a missing file or key never prevents startup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! vsync = true
//!
//! [camera]
//! easing = 0.05
//! rest_speed = 5.0
//!
//! [scene]
//! path = ./assets/scenes/slingshot.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use super::followcamera::{DEFAULT_EASING, DEFAULT_REST_DELAY, DEFAULT_REST_SPEED};
use super::scene::DEFAULT_SCENE_PATH;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Follow-camera easing per 1/60 s.
    pub camera_easing: f32,
    /// Speed under which a followed body counts as resting.
    pub camera_rest_speed: f32,
    /// Seconds a followed body must stay resting before the camera lets go.
    pub camera_rest_delay: f32,
    /// Scene file to load at startup.
    pub scene_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            camera_easing: DEFAULT_EASING,
            camera_rest_speed: DEFAULT_REST_SPEED,
            camera_rest_delay: DEFAULT_REST_DELAY,
            scene_path: PathBuf::from(DEFAULT_SCENE_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, easing={}, rest_speed={}, scene={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.camera_easing,
            self.camera_rest_speed,
            self.scene_path
        );

        Ok(())
    }

    /// Load configuration from INI text. Used by tests and tools.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [camera] section
        if let Some(easing) = config.getfloat("camera", "easing").ok().flatten() {
            self.camera_easing = (easing as f32).clamp(0.0, 1.0);
        }
        if let Some(rest) = config.getfloat("camera", "rest_speed").ok().flatten() {
            self.camera_rest_speed = (rest as f32).max(0.0);
        }
        if let Some(delay) = config.getfloat("camera", "rest_delay").ok().flatten() {
            self.camera_rest_delay = (delay as f32).max(0.0);
        }

        // [scene] section
        if let Some(path) = config.get("scene", "path") {
            if !path.trim().is_empty() {
                self.scene_path = PathBuf::from(path.trim());
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("camera", "easing", Some(self.camera_easing.to_string()));
        config.set(
            "camera",
            "rest_speed",
            Some(self.camera_rest_speed.to_string()),
        );
        config.set(
            "camera",
            "rest_delay",
            Some(self.camera_rest_delay.to_string()),
        );

        config.set(
            "scene",
            "path",
            Some(self.scene_path.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
