use crate::components::{CameraLens, Renderable, Transform};
use crate::graphics::{CubeMesh, ShaderProgram};
use crate::window::WindowContext;
use nexus_ecs::{EcsResult, Entity, System, SystemResult, World};
use nexus_math::Vec3;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

/// Draws every `(Renderable, Transform)` entity as a cube.
///
/// Owns the camera entity: it is spawned at construction with a default
/// lens, and the camera-control system steers it through its `Transform`.
pub struct RenderSystem {
    window: Rc<RefCell<WindowContext>>,
    camera: Entity,
    cube: CubeMesh,
    shader: ShaderProgram,
}

impl RenderSystem {
    /// Camera start position: pulled back and below the cube field.
    const CAMERA_START: Vec3 = Vec3::new(0.0, -50.0, 200.0);

    /// Spawn the camera and upload the cube mesh.
    pub fn new(
        world: &mut World,
        window: Rc<RefCell<WindowContext>>,
        shader: ShaderProgram,
    ) -> EcsResult<Self> {
        let camera = world.spawn()?;
        world.add_component(camera, Transform::at(Self::CAMERA_START))?;
        world.add_component(camera, CameraLens::default())?;

        Ok(Self {
            window,
            camera,
            cube: CubeMesh::new(1.0),
            shader,
        })
    }
}

impl System for RenderSystem {
    fn name(&self) -> &str {
        "render"
    }

    fn run(
        &mut self,
        world: &mut World,
        entities: &BTreeSet<Entity>,
        _dt: Duration,
    ) -> SystemResult {
        let (width, height) = self.window.borrow().framebuffer_size();

        unsafe {
            gl::Viewport(0, 0, width, height);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        self.shader.bind();

        let lens = *world.component::<CameraLens>(self.camera)?;
        let camera_transform = *world.component::<Transform>(self.camera)?;
        self.shader
            .set_mat4("u_view", &lens.view_matrix(&camera_transform));
        self.shader.set_mat4(
            "u_projection",
            &lens.projection_matrix(width as f32, height as f32),
        );

        for entity in entities {
            let renderable = *world.component::<Renderable>(*entity)?;
            let transform = world.component::<Transform>(*entity)?;

            self.shader.set_mat4("u_model", &transform.matrix());
            self.shader.set_vec3("u_color", renderable.color);
            self.cube.draw();
        }

        self.shader.unbind();
        self.window.borrow_mut().swap();

        Ok(())
    }
}
