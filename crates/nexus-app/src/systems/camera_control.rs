use crate::components::{CameraLens, Transform};
use crate::window::WindowContext;
use nexus_ecs::{Entity, System, SystemResult, World};
use nexus_math::{Quat, Vec3};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

/// Pitch stops just short of straight up/down so the view cannot flip.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 * 0.99;

/// First-person camera controls.
///
/// WASD strafes and advances, Space/LeftShift moves up and down, all
/// relative to the camera's orientation. While the cursor is captured,
/// cursor movement drives yaw and pitch.
pub struct CameraControlSystem {
    window: Rc<RefCell<WindowContext>>,
    last_cursor: Option<(f64, f64)>,
    yaw: f32,
    pitch: f32,
}

impl CameraControlSystem {
    /// Control system reading input from `window`.
    pub fn new(window: Rc<RefCell<WindowContext>>) -> Self {
        Self {
            window,
            last_cursor: None,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl System for CameraControlSystem {
    fn name(&self) -> &str {
        "camera-control"
    }

    fn run(
        &mut self,
        world: &mut World,
        entities: &BTreeSet<Entity>,
        dt: Duration,
    ) -> SystemResult {
        let window = self.window.borrow();

        let cursor = window.cursor_pos();
        let (last_x, last_y) = self.last_cursor.unwrap_or(cursor);
        self.last_cursor = Some(cursor);

        // scale the rate of change to the window's width
        let (width, _) = window.framebuffer_size();
        let cursor_dx = (-(cursor.0 - last_x) / f64::from(width.max(1))) as f32;
        let cursor_dy = (-(cursor.1 - last_y) / f64::from(width.max(1))) as f32;

        let dt = dt.as_secs_f32();

        for entity in entities {
            let lens = *world.component::<CameraLens>(*entity)?;

            if window.cursor_captured() {
                self.yaw = (self.yaw + cursor_dx * lens.sensitivity)
                    % std::f32::consts::TAU;
                self.pitch = (self.pitch + cursor_dy * lens.sensitivity)
                    .clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }

            let mut displacement = Vec3::ZERO;
            let step = lens.speed * dt;

            if window.key_pressed(glfw::Key::W) {
                displacement.z -= step;
            } else if window.key_pressed(glfw::Key::S) {
                displacement.z += step;
            }

            if window.key_pressed(glfw::Key::A) {
                displacement.x -= step;
            } else if window.key_pressed(glfw::Key::D) {
                displacement.x += step;
            }

            if window.key_pressed(glfw::Key::Space) {
                displacement.y += step;
            } else if window.key_pressed(glfw::Key::LeftShift) {
                displacement.y -= step;
            }

            let transform = world.component_mut::<Transform>(*entity)?;
            if window.cursor_captured() {
                transform.rotation = Quat::from_euler(self.pitch, self.yaw, 0.0);
            }
            transform.position += transform.rotation * displacement;
        }

        Ok(())
    }
}
