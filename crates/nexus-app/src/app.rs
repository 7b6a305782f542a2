//! Demo run loops

use crate::components::{CameraLens, Gravity, Renderable, RigidBody, Thrust, Transform};
use crate::error::AppError;
use crate::scene::{spawn_scene, SceneConfig};
use crate::systems::PhysicsSystem;
use nexus_ecs::{EcsResult, Limits, World};
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

/// Fixed headless timestep, 60 Hz.
const HEADLESS_DT: Duration = Duration::from_nanos(16_666_667);

/// Summary of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    /// Frames simulated
    pub frames: u32,
    /// Total simulated time
    pub simulated: Duration,
    /// Entities in the scene
    pub entities: u32,
}

/// Build a world with the demo's component set registered.
///
/// Registration order fixes signature bits for the run, so both run modes
/// share this.
fn demo_world(capacity: u32) -> EcsResult<World> {
    let mut world = World::new(Limits::with_max_entities(capacity));
    world.register_component::<Transform>()?;
    world.register_component::<RigidBody>()?;
    world.register_component::<Gravity>()?;
    world.register_component::<Thrust>()?;
    world.register_component::<Renderable>()?;
    world.register_component::<CameraLens>()?;
    Ok(world)
}

/// Run the physics-only demo for a fixed number of frames.
///
/// Steps at a fixed 60 Hz timestep without sleeping, so wall time is
/// however fast the machine simulates.
pub fn run_headless(config: &SceneConfig, frames: u32) -> Result<HeadlessReport, AppError> {
    let mut world = demo_world(config.count.max(1))?;
    world.register_system_for::<(Gravity, RigidBody, Transform)>(PhysicsSystem)?;

    let mut rng = rand::rngs::StdRng::from_entropy();
    let entities = spawn_scene(&mut world, config, &mut rng)?;
    info!(entities = entities.len(), frames, "starting headless run");

    let probe = entities.first().copied();
    for frame in 0..frames {
        world.update(HEADLESS_DT)?;

        if frame % 10 == 0 {
            if let Some(position) = probe
                .and_then(|entity| world.try_component::<Transform>(entity))
                .map(|transform| transform.position)
            {
                debug!(frame, %position, "probe entity");
            }
        }
    }

    let report = HeadlessReport {
        frames,
        simulated: HEADLESS_DT * frames,
        entities: world.entity_count(),
    };
    info!(
        frames = report.frames,
        simulated_secs = report.simulated.as_secs_f32(),
        entities = report.entities,
        "headless run finished"
    );

    Ok(report)
}

/// Run the windowed demo until the window closes.
#[cfg(feature = "windowed")]
pub fn run_windowed(config: &SceneConfig) -> Result<(), AppError> {
    use crate::graphics::ShaderProgram;
    use crate::systems::{CameraControlSystem, RenderSystem};
    use crate::window::WindowContext;
    use nexus_ecs::FrameClock;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing::trace;

    let window = Rc::new(RefCell::new(WindowContext::new(&config.window)?));

    // one extra slot for the camera entity the render system owns
    let mut world = demo_world(config.count + 1)?;
    world.register_system_for::<(Gravity, RigidBody, Transform)>(PhysicsSystem)?;
    world.register_system_for::<(CameraLens, Transform)>(CameraControlSystem::new(
        Rc::clone(&window),
    ))?;

    let shader = ShaderProgram::from_config(&config.shaders)?;
    let render = RenderSystem::new(&mut world, Rc::clone(&window), shader)?;
    world.register_system_for::<(Renderable, Transform)>(render)?;

    let mut rng = rand::rngs::StdRng::from_entropy();
    let entities = spawn_scene(&mut world, config, &mut rng)?;
    info!(entities = entities.len(), "starting windowed run");

    let mut clock = FrameClock::new();
    while !window.borrow().should_close() {
        let dt = clock.tick();
        world.update(dt)?;
        window.borrow_mut().poll();

        trace!(frame_ms = dt.as_secs_f32() * 1000.0, "frame");
    }

    Ok(())
}
