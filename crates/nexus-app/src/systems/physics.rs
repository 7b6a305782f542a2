use crate::components::{Gravity, RigidBody, Thrust, Transform};
use nexus_ecs::{Entity, System, SystemResult, World};
use nexus_math::{Quat, Vec3};
use std::collections::BTreeSet;
use std::time::Duration;

/// Integrates linear and angular motion.
///
/// Interested in `(Gravity, RigidBody, Transform)`. Position advances with
/// the frame-start velocity, then velocity picks up gravity, the body's own
/// acceleration, and — when the entity carries one — its [`Thrust`].
pub struct PhysicsSystem;

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn run(
        &mut self,
        world: &mut World,
        entities: &BTreeSet<Entity>,
        dt: Duration,
    ) -> SystemResult {
        let dt = dt.as_secs_f32();

        for entity in entities {
            let gravity = *world.component::<Gravity>(*entity)?;
            let thrust = world
                .try_component::<Thrust>(*entity)
                .map(|thrust| thrust.force)
                .unwrap_or(Vec3::ZERO);
            let body = *world.component::<RigidBody>(*entity)?;

            let transform = world.component_mut::<Transform>(*entity)?;
            transform.position += body.velocity * dt;

            let spin = body.angular_velocity * dt;
            if spin != Vec3::ZERO {
                let step = Quat::from_euler(spin.x, spin.y, spin.z);
                transform.rotation = (step * transform.rotation).normalize();
            }

            let body = world.component_mut::<RigidBody>(*entity)?;
            body.velocity += (gravity.force + body.acceleration + thrust) * dt;
        }

        Ok(())
    }
}
