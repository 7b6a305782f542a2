//! Demo systems

mod physics;

pub use physics::PhysicsSystem;

#[cfg(feature = "windowed")]
mod camera_control;
#[cfg(feature = "windowed")]
mod render;

#[cfg(feature = "windowed")]
pub use camera_control::CameraControlSystem;
#[cfg(feature = "windowed")]
pub use render::RenderSystem;
