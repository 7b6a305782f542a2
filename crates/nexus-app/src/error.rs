use std::path::PathBuf;

/// Demo application errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Reading a config or shader file failed
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying io error
        #[source]
        source: std::io::Error,
    },

    /// The config file did not parse
    #[error("invalid config `{path}`: {source}")]
    InvalidConfig {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying toml error
        #[source]
        source: Box<toml::de::Error>,
    },

    /// An ECS operation failed
    #[error(transparent)]
    Ecs(#[from] nexus_ecs::EcsError),

    /// GLFW could not be initialized
    #[cfg(feature = "windowed")]
    #[error("failed to initialize GLFW: {0}")]
    GlfwInit(#[from] glfw::InitError),

    /// Window or GL context creation failed
    #[cfg(feature = "windowed")]
    #[error("failed to create window `{title}` ({width}x{height})")]
    WindowCreation {
        /// Requested window title
        title: String,
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// A shader stage failed to compile
    #[cfg(feature = "windowed")]
    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile {
        /// Which stage failed
        stage: &'static str,
        /// GL info log
        log: String,
    },

    /// The shader program failed to link
    #[cfg(feature = "windowed")]
    #[error("shader program failed to link:\n{log}")]
    ShaderLink {
        /// GL info log
        log: String,
    },

    /// A shader source contained an interior NUL byte
    #[cfg(feature = "windowed")]
    #[error("shader source is not a valid C string: {0}")]
    ShaderSource(#[from] std::ffi::NulError),
}
