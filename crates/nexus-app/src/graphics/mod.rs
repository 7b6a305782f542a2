//! OpenGL resources for the windowed demo

mod cube;
mod shader;

pub use cube::CubeMesh;
pub use shader::ShaderProgram;
