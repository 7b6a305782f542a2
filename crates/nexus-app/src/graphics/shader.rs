//! Shader program wrapper

use crate::error::AppError;
use crate::scene::ShaderConfig;
use gl::types::{GLchar, GLint, GLuint};
use nexus_math::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use std::ffi::CString;
use std::fs;
use std::path::Path;

const DEFAULT_VERTEX: &str = include_str!("shaders/cube.vert");
const DEFAULT_FRAGMENT: &str = include_str!("shaders/cube.frag");

/// A linked GL shader program with a uniform-location cache.
///
/// Locations are looked up once per name; a missing uniform logs a single
/// warning and later sets against it are silently ignored (location -1).
pub struct ShaderProgram {
    id: GLuint,
    uniform_locations: FxHashMap<String, GLint>,
}

impl ShaderProgram {
    /// Program from vertex and fragment sources, plus an optional
    /// geometry stage.
    pub fn from_sources(
        vertex: &str,
        fragment: &str,
        geometry: Option<&str>,
    ) -> Result<Self, AppError> {
        let vs = compile_stage(vertex, Stage::Vertex)?;
        let fs = compile_stage(fragment, Stage::Fragment)?;
        let gs = geometry
            .map(|source| compile_stage(source, Stage::Geometry))
            .transpose()?;

        let id = unsafe {
            let id = gl::CreateProgram();
            gl::AttachShader(id, vs);
            gl::AttachShader(id, fs);
            if let Some(gs) = gs {
                gl::AttachShader(id, gs);
            }
            gl::LinkProgram(id);

            // stage objects are owned by the program from here on
            gl::DeleteShader(vs);
            gl::DeleteShader(fs);
            if let Some(gs) = gs {
                gl::DeleteShader(gs);
            }

            let mut status = 0;
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);
            if status == 0 {
                let log = program_info_log(id);
                gl::DeleteProgram(id);
                return Err(AppError::ShaderLink { log });
            }

            id
        };

        Ok(Self {
            id,
            uniform_locations: FxHashMap::default(),
        })
    }

    /// Program from shader files.
    pub fn from_files(vertex: &Path, fragment: &Path) -> Result<Self, AppError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| AppError::Io {
                path: path.to_owned(),
                source,
            })
        };

        Self::from_sources(&read(vertex)?, &read(fragment)?, None)
    }

    /// Program from a [`ShaderConfig`], falling back to the embedded
    /// sources for unset paths.
    pub fn from_config(config: &ShaderConfig) -> Result<Self, AppError> {
        match (&config.vertex, &config.fragment) {
            (None, None) => Self::from_sources(DEFAULT_VERTEX, DEFAULT_FRAGMENT, None),
            (vertex, fragment) => {
                let read = |path: &Path| {
                    fs::read_to_string(path).map_err(|source| AppError::Io {
                        path: path.to_owned(),
                        source,
                    })
                };
                let vertex = match vertex {
                    Some(path) => read(path)?,
                    None => DEFAULT_VERTEX.to_owned(),
                };
                let fragment = match fragment {
                    Some(path) => read(path)?,
                    None => DEFAULT_FRAGMENT.to_owned(),
                };
                Self::from_sources(&vertex, &fragment, None)
            }
        }
    }

    /// Make this program current.
    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    /// Clear the current program.
    pub fn unbind(&self) {
        unsafe { gl::UseProgram(0) };
    }

    /// Set a float uniform.
    pub fn set_f32(&mut self, name: &str, value: f32) {
        let location = self.location(name);
        unsafe { gl::Uniform1f(location, value) };
    }

    /// Set an integer uniform.
    pub fn set_i32(&mut self, name: &str, value: i32) {
        let location = self.location(name);
        unsafe { gl::Uniform1i(location, value) };
    }

    /// Set a bool uniform.
    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.set_i32(name, value as i32);
    }

    /// Set a vec3 uniform.
    pub fn set_vec3(&mut self, name: &str, value: Vec3) {
        let location = self.location(name);
        let raw: [f32; 3] = value.into();
        unsafe { gl::Uniform3fv(location, 1, raw.as_ptr()) };
    }

    /// Set a mat4 uniform.
    pub fn set_mat4(&mut self, name: &str, value: &Mat4) {
        let location = self.location(name);
        let raw = value.to_cols_array();
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, raw.as_ptr()) };
    }

    fn location(&mut self, name: &str) -> GLint {
        if let Some(location) = self.uniform_locations.get(name) {
            return *location;
        }

        let location = CString::new(name)
            .map(|c_name| unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) })
            .unwrap_or(-1);
        if location == -1 {
            tracing::warn!(program = self.id, uniform = name, "uniform not found");
        }

        self.uniform_locations.insert(name.to_owned(), location);
        location
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

#[derive(Copy, Clone)]
enum Stage {
    Vertex,
    Fragment,
    Geometry,
}

impl Stage {
    fn gl_kind(self) -> gl::types::GLenum {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
            Stage::Geometry => gl::GEOMETRY_SHADER,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
            Stage::Geometry => "geometry",
        }
    }
}

fn compile_stage(source: &str, stage: Stage) -> Result<GLuint, AppError> {
    let c_source = CString::new(source)?;

    unsafe {
        let id = gl::CreateShader(stage.gl_kind());
        gl::ShaderSource(id, 1, &c_source.as_ptr(), std::ptr::null());
        gl::CompileShader(id);

        let mut status = 0;
        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
        if status == 0 {
            let log = shader_info_log(id);
            gl::DeleteShader(id);
            return Err(AppError::ShaderCompile {
                stage: stage.label(),
                log,
            });
        }

        Ok(id)
    }
}

unsafe fn shader_info_log(id: GLuint) -> String {
    let mut capacity = 0;
    gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut capacity);

    let mut buffer = vec![0u8; capacity.max(1) as usize];
    let mut written = 0;
    gl::GetShaderInfoLog(id, capacity, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buffer).into_owned()
}

unsafe fn program_info_log(id: GLuint) -> String {
    let mut capacity = 0;
    gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut capacity);

    let mut buffer = vec![0u8; capacity.max(1) as usize];
    let mut written = 0;
    gl::GetProgramInfoLog(id, capacity, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buffer).into_owned()
}
