//! Demo components
//!
//! Plain `Copy` data over `nexus-math` types. Registration order in the
//! app fixes the signature bit layout for a run.

mod camera;
mod gravity;
mod renderable;
mod rigid_body;
mod thrust;
mod transform;

pub use camera::CameraLens;
pub use gravity::Gravity;
pub use renderable::Renderable;
pub use rigid_body::RigidBody;
pub use thrust::Thrust;
pub use transform::Transform;
