//! Nexus demo application
//!
//! A field of cubes under gravity with random initial velocities and spins,
//! simulated on the nexus ECS. Two run modes mirror the two historical
//! build variants of the project:
//! - **headless** (default build): physics only, frame summaries on the log
//! - **windowed** (`windowed` feature): GLFW window, camera controls, and
//!   an OpenGL render path

#![warn(rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod scene;
pub mod systems;

mod error;

#[cfg(feature = "windowed")]
pub mod graphics;
#[cfg(feature = "windowed")]
pub mod window;

pub use app::{run_headless, HeadlessReport};
pub use error::AppError;
pub use scene::{spawn_scene, SceneConfig, ShaderConfig, WindowConfig};

#[cfg(feature = "windowed")]
pub use app::run_windowed;
