//! GLFW window and GL context glue

use crate::error::AppError;
use crate::scene::WindowConfig;
use glfw::{Action, Context, Key, WindowEvent, WindowHint, WindowMode};
use tracing::warn;

/// Owns the GLFW instance, the window, and its event stream.
///
/// Construction creates a 3.3 core-profile context, makes it current, and
/// loads the GL symbols, so GL calls are valid for the lifetime of this
/// value on the constructing thread.
pub struct WindowContext {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    captured: bool,
}

impl WindowContext {
    /// Open a window and set up its GL context.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        let mut glfw = glfw::init(|error, description| {
            warn!(?error, "glfw: {description}");
        })?;

        glfw.window_hint(WindowHint::ContextVersion(3, 3));
        glfw.window_hint(WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                WindowMode::Windowed,
            )
            .ok_or_else(|| AppError::WindowCreation {
                title: config.title.clone(),
                width: config.width,
                height: config.height,
            })?;

        window.make_current();
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);

        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::ClearColor(0.1, 0.1, 0.11, 1.0);
        }

        Ok(Self {
            glfw,
            window,
            events,
            captured: false,
        })
    }

    /// Whether the user asked to close the window.
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Pump the event queue: Escape closes, Tab toggles cursor capture.
    pub fn poll(&mut self) {
        self.glfw.poll_events();

        let mut toggle_capture = false;
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window.set_should_close(true);
                }
                WindowEvent::Key(Key::Tab, _, Action::Press, _) => {
                    toggle_capture = true;
                }
                _ => {}
            }
        }

        if toggle_capture {
            self.set_capture(!self.captured);
        }
    }

    /// Present the back buffer.
    pub fn swap(&mut self) {
        self.window.swap_buffers();
    }

    /// Current framebuffer size in pixels.
    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    /// Whether `key` is currently held down.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.window.get_key(key) == Action::Press
    }

    /// Current cursor position in screen coordinates.
    pub fn cursor_pos(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    /// Whether the cursor is captured for mouse look.
    pub fn cursor_captured(&self) -> bool {
        self.captured
    }

    fn set_capture(&mut self, captured: bool) {
        self.captured = captured;
        self.window.set_cursor_mode(if captured {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        });
    }
}
