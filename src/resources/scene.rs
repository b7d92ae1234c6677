//! Scene authoring format.
//!
//! A scene is a JSON document describing the slingshot, the ground, some
//! static blocks and the camera. Every field has a default, so a scene file
//! only needs the values it changes.
//!
//! ```json
//! {
//!   "slingshot": {
//!     "position": [0.0, 20.0],
//!     "draw_radius": 60.0,
//!     "velocity_mult": 10.0,
//!     "launch_point": [0.0, -70.0],
//!     "left_anchor": [-14.0, -70.0],
//!     "right_anchor": [14.0, -70.0],
//!     "projectile": { "radius": 12.0, "gravity": 980.0, "lifetime": 10.0 }
//!   },
//!   "ground": { "x": 1500.0, "y": 20.0, "width": 6000.0, "height": 200.0 },
//!   "blocks": [ { "position": [700.0, -60.0], "size": [40.0, 160.0] } ],
//!   "camera": { "home": [300.0, -150.0], "zoom": 1.0 }
//! }
//! ```
//!
//! Positions are `[x, y]` pairs in world pixels, y grows downward. Anchor and
//! launch point positions are relative to the slingshot.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::components::projectile::ProjectileTemplate;
use crate::components::tint::Tint;

pub const DEFAULT_SCENE_PATH: &str = "./assets/scenes/slingshot.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectileDef {
    pub radius: f32,
    pub color: [u8; 4],
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,
    pub lifetime: f32,
}

impl Default for ProjectileDef {
    fn default() -> Self {
        Self {
            radius: 12.0,
            color: [200, 60, 40, 255],
            gravity: 980.0,
            friction: 0.1,
            restitution: 0.4,
            lifetime: 10.0,
        }
    }
}

impl ProjectileDef {
    pub fn template(&self) -> ProjectileTemplate {
        ProjectileTemplate {
            radius: self.radius,
            color: Tint::from_rgba(self.color).color,
            gravity: self.gravity,
            friction: self.friction,
            restitution: self.restitution,
            lifetime: self.lifetime,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SlingshotDef {
    pub position: [f32; 2],
    /// Radius of the grab volume, which is also the maximum draw distance.
    pub draw_radius: f32,
    pub velocity_mult: f32,
    /// Launch point, relative to `position`. `None` authors a slingshot
    /// without one.
    pub launch_point: Option<[f32; 2]>,
    pub left_anchor: Option<[f32; 2]>,
    pub right_anchor: Option<[f32; 2]>,
    pub color: [u8; 4],
    pub projectile: ProjectileDef,
}

impl Default for SlingshotDef {
    fn default() -> Self {
        Self {
            position: [0.0, 20.0],
            draw_radius: 60.0,
            velocity_mult: 10.0,
            launch_point: Some([0.0, -70.0]),
            left_anchor: Some([-14.0, -70.0]),
            right_anchor: Some([14.0, -70.0]),
            color: [110, 70, 40, 255],
            projectile: ProjectileDef::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GroundDef {
    /// World x of the ground's center.
    pub x: f32,
    /// World y of the ground surface.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [u8; 4],
}

impl Default for GroundDef {
    fn default() -> Self {
        Self {
            x: 1500.0,
            y: 20.0,
            width: 6000.0,
            height: 200.0,
            color: [90, 140, 60, 255],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BlockDef {
    /// Center of the block.
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [u8; 4],
}

impl Default for BlockDef {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            size: [40.0, 40.0],
            color: [150, 150, 160, 255],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraDef {
    pub home: [f32; 2],
    pub zoom: f32,
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            home: [300.0, -150.0],
            zoom: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SceneDef {
    pub slingshot: SlingshotDef,
    pub ground: GroundDef,
    pub blocks: Vec<BlockDef>,
    pub camera: CameraDef,
}

impl Default for SceneDef {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SceneDef {
    /// The scene used when no scene file is available: a slingshot on the
    /// left, a small tower of blocks to the right.
    pub fn builtin() -> Self {
        let block = |x: f32, y: f32, w: f32, h: f32| BlockDef {
            position: [x, y],
            size: [w, h],
            ..BlockDef::default()
        };
        Self {
            slingshot: SlingshotDef::default(),
            ground: GroundDef::default(),
            blocks: vec![
                block(700.0, -60.0, 30.0, 160.0),
                block(820.0, -60.0, 30.0, 160.0),
                block(760.0, -155.0, 180.0, 30.0),
                block(760.0, -230.0, 30.0, 120.0),
            ],
            camera: CameraDef::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse scene: {}", e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize scene: {}", e))
    }

    /// Load a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene file {}: {}", path.display(), e))?;
        let scene = Self::from_json(&json)?;
        info!(
            "Loaded scene {}: {} block(s), draw radius {}, velocity mult {}",
            path.display(),
            scene.blocks.len(),
            scene.slingshot.draw_radius,
            scene.slingshot.velocity_mult
        );
        Ok(scene)
    }

    /// Write the scene as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write scene file {}: {}", path.display(), e))
    }
}
