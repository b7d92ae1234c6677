//! Slingshot main entry point.
//!
//! A small 2D game built on:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for the entity-component-system architecture
//!
//! Grab the slingshot's pouch with the left mouse button, pull back and let
//! go. The camera follows the shot and drifts home once it comes to rest.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (positions, bodies, colliders, slingshot state)
//! - [`events`] – Event types and observers (debug toggle)
//! - [`game`] – Scene spawning and camera setup
//! - [`resources`] – ECS resources (input, time, camera, config, scene format)
//! - [`systems`] – ECS systems (input, slingshot, physics, camera, rendering)
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the scene file, falling back to defaults
//! 2. Initialize the raylib window and the ECS world
//! 3. Run the frame schedule until the window closes or Escape is pressed:
//!    input, slingshot init, transforms, hover, aim, physics, TTL, camera,
//!    render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --debug
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::events::switchdebug::switch_debug_observer;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::{DEFAULT_CONFIG_PATH, GameConfig};
use crate::resources::input::InputState;
use crate::resources::scene::SceneDef;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::followcamera::follow_camera;
use crate::systems::input::update_input_state;
use crate::systems::movement::movement;
use crate::systems::propagate_transforms::propagate_transforms;
use crate::systems::render::render_system;
use crate::systems::slingshot::{init_slingshots, slingshot_aim, slingshot_hover};
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

/// Slingshot
#[derive(Parser)]
#[command(version, about = "Pull back, let go, watch it fly.")]
struct Cli {
    /// Engine settings file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Scene file to load. Overrides `[scene] path` from the config file.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,

    /// Write the built-in scene as JSON and exit.
    /// Optionally provide a path (default: assets/scenes/slingshot.json).
    #[arg(long, value_name = "PATH")]
    dump_scene: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the built-in scene and quit (no window needed)
    if let Some(maybe_path) = cli.dump_scene {
        let path = maybe_path
            .unwrap_or_else(|| PathBuf::from(resources::scene::DEFAULT_SCENE_PATH));
        if let Err(e) = SceneDef::builtin().save(&path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Scene written to {}", path.display());
        return;
    }

    // --------------- Config & scene ---------------
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using default settings", e);
    }
    if let Some(scene_path) = cli.scene {
        config.scene_path = scene_path;
    }
    let scene = SceneDef::load(&config.scene_path).unwrap_or_else(|e| {
        warn!("{}; using the built-in scene", e);
        SceneDef::builtin()
    });

    // --------------- Raylib window ---------------
    let mut builder = raylib::init();
    builder
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Slingshot");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Escape is handled through InputState
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(InputState::default());
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    game::insert_camera(&mut world, &scene, &config);
    game::spawn_scene(&mut world, &scene);
    world.insert_resource(config);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    // Ensure the observer is registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            init_slingshots,
            propagate_transforms,
            slingshot_hover,
            slingshot_aim,
            movement,
            ttl_system,
            follow_camera,
            render_system,
        )
            .chain(),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {:?}", e);
        return;
    }
    info!("Slingshot ready");

    // --------------- Main loop ---------------
    loop {
        let (should_close, dt) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.window_should_close(), rl.get_frame_time())
        };
        if should_close || world.resource::<InputState>().action_back.just_pressed {
            break;
        }

        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers(); // Clear changed components for next frame
    }
    info!("Bye");
}
