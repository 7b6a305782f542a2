//! Math types for the nexus engine
//!
//! The subset of a GL-style math library the engine actually uses:
//! - **Vec3**: 3-component vector with the usual component-wise operators
//! - **Quat**: unit quaternions for rotations
//! - **Mat4**: column-major 4x4 matrices, including `perspective` and
//!   `look_at` builders for camera work
//!
//! All angles are radians unless a name says otherwise.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod mat4;
mod quat;
mod vec3;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec3::Vec3;

/// Convert degrees to radians.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians.to_degrees()
}
