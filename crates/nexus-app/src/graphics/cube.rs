//! Unit cube mesh

use gl::types::{GLsizei, GLsizeiptr, GLuint};

/// Per-face cube geometry: 36 vertices of `[position, normal]`, positions
/// on the unit cube (corners at +-0.5).
#[rustfmt::skip]
const CUBE_VERTICES: [[f32; 6]; 36] = [
    // back face (-Z)
    [-0.5, -0.5, -0.5,  0.0,  0.0, -1.0],
    [ 0.5,  0.5, -0.5,  0.0,  0.0, -1.0],
    [ 0.5, -0.5, -0.5,  0.0,  0.0, -1.0],
    [ 0.5,  0.5, -0.5,  0.0,  0.0, -1.0],
    [-0.5, -0.5, -0.5,  0.0,  0.0, -1.0],
    [-0.5,  0.5, -0.5,  0.0,  0.0, -1.0],
    // front face (+Z)
    [-0.5, -0.5,  0.5,  0.0,  0.0,  1.0],
    [ 0.5, -0.5,  0.5,  0.0,  0.0,  1.0],
    [ 0.5,  0.5,  0.5,  0.0,  0.0,  1.0],
    [ 0.5,  0.5,  0.5,  0.0,  0.0,  1.0],
    [-0.5,  0.5,  0.5,  0.0,  0.0,  1.0],
    [-0.5, -0.5,  0.5,  0.0,  0.0,  1.0],
    // left face (-X)
    [-0.5,  0.5,  0.5, -1.0,  0.0,  0.0],
    [-0.5,  0.5, -0.5, -1.0,  0.0,  0.0],
    [-0.5, -0.5, -0.5, -1.0,  0.0,  0.0],
    [-0.5, -0.5, -0.5, -1.0,  0.0,  0.0],
    [-0.5, -0.5,  0.5, -1.0,  0.0,  0.0],
    [-0.5,  0.5,  0.5, -1.0,  0.0,  0.0],
    // right face (+X)
    [ 0.5,  0.5,  0.5,  1.0,  0.0,  0.0],
    [ 0.5, -0.5, -0.5,  1.0,  0.0,  0.0],
    [ 0.5,  0.5, -0.5,  1.0,  0.0,  0.0],
    [ 0.5, -0.5, -0.5,  1.0,  0.0,  0.0],
    [ 0.5,  0.5,  0.5,  1.0,  0.0,  0.0],
    [ 0.5, -0.5,  0.5,  1.0,  0.0,  0.0],
    // bottom face (-Y)
    [-0.5, -0.5, -0.5,  0.0, -1.0,  0.0],
    [ 0.5, -0.5, -0.5,  0.0, -1.0,  0.0],
    [ 0.5, -0.5,  0.5,  0.0, -1.0,  0.0],
    [ 0.5, -0.5,  0.5,  0.0, -1.0,  0.0],
    [-0.5, -0.5,  0.5,  0.0, -1.0,  0.0],
    [-0.5, -0.5, -0.5,  0.0, -1.0,  0.0],
    // top face (+Y)
    [-0.5,  0.5, -0.5,  0.0,  1.0,  0.0],
    [ 0.5,  0.5,  0.5,  0.0,  1.0,  0.0],
    [ 0.5,  0.5, -0.5,  0.0,  1.0,  0.0],
    [ 0.5,  0.5,  0.5,  0.0,  1.0,  0.0],
    [-0.5,  0.5, -0.5,  0.0,  1.0,  0.0],
    [-0.5,  0.5,  0.5,  0.0,  1.0,  0.0],
];

/// A cube VAO/VBO with interleaved position and normal attributes.
///
/// Requires a current GL context; must be dropped before the context is
/// torn down.
pub struct CubeMesh {
    vao: GLuint,
    vbo: GLuint,
}

impl CubeMesh {
    /// Upload a cube of the given side length.
    pub fn new(side_length: f32) -> Self {
        let mut data = Vec::with_capacity(CUBE_VERTICES.len() * 6);
        for [px, py, pz, nx, ny, nz] in CUBE_VERTICES {
            data.extend_from_slice(&[
                px * side_length,
                py * side_length,
                pz * side_length,
                nx,
                ny,
                nz,
            ]);
        }

        let (mut vao, mut vbo) = (0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(data.as_slice()) as GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            let stride = (6 * std::mem::size_of::<f32>()) as GLsizei;
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (3 * std::mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        Self { vao, vbo }
    }

    /// Draw the cube. A shader program must be bound.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, CUBE_VERTICES.len() as GLsizei);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for CubeMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}
