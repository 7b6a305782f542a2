//! Scene configuration and spawning

use crate::components::{Gravity, Renderable, RigidBody, Thrust, Transform};
use crate::error::AppError;
use nexus_ecs::{EcsResult, Entity, World};
use nexus_math::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Window settings for the windowed demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Sync buffer swaps to the display refresh
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "nexus".to_owned(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Optional shader file overrides; the embedded sources are used when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ShaderConfig {
    /// Vertex shader path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex: Option<PathBuf>,
    /// Fragment shader path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<PathBuf>,
}

/// Everything that shapes a demo scene.
///
/// The defaults reproduce the classic scene: just under five thousand
/// cubes scattered in a 250-unit box, spinning and falling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SceneConfig {
    /// Number of cubes to spawn
    pub count: u32,
    /// Base gravitational acceleration
    pub gravity: Vec3,
    /// Per-axis position sample range `[lo, hi]`
    pub position_range: [f32; 2],
    /// Uniform scale sample range `[lo, hi]`
    pub scale_range: [f32; 2],
    /// Rotation and spin sample range `[lo, hi]`, radians
    pub rotation_range: [f32; 2],
    /// Per-axis velocity sample range `[lo, hi]`
    pub velocity_range: [f32; 2],
    /// Give every n-th cube a thrust component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thrust_every: Option<u32>,
    /// Thrust applied to those cubes
    pub thrust_force: Vec3,
    /// Window settings (windowed demo)
    pub window: WindowConfig,
    /// Shader overrides (windowed demo)
    pub shaders: ShaderConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            count: 4999,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            position_range: [-125.0, 125.0],
            scale_range: [1.0, 4.0],
            rotation_range: [0.0, 3.14],
            velocity_range: [-100.0, 100.0],
            thrust_every: None,
            thrust_force: Vec3::ZERO,
            window: WindowConfig::default(),
            shaders: ShaderConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Load a scene from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| AppError::InvalidConfig {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }
}

fn sample(rng: &mut impl Rng, [lo, hi]: [f32; 2]) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Populate `world` with the configured cube field.
///
/// Velocities scale inversely with cube size and gravity scales with it,
/// so large cubes drift slowly but fall hard. Returns the spawned
/// entities in spawn order.
pub fn spawn_scene(
    world: &mut World,
    config: &SceneConfig,
    rng: &mut impl Rng,
) -> EcsResult<Vec<Entity>> {
    let scale_span = (config.scale_range[1] - config.scale_range[0]).max(f32::EPSILON);
    let velocity_span = config.velocity_range[1] - config.velocity_range[0];

    let mut entities = Vec::with_capacity(config.count as usize);

    for index in 0..config.count {
        let entity = world.spawn()?;

        let scale = sample(rng, config.scale_range);
        let position = Vec3::new(
            sample(rng, config.position_range),
            sample(rng, config.position_range),
            sample(rng, config.position_range),
        );
        let rotation = Quat::from_euler(
            sample(rng, config.rotation_range),
            sample(rng, config.rotation_range),
            sample(rng, config.rotation_range),
        );

        // upward bias on Y so the field blooms before it falls
        let velocity = Vec3::new(
            sample(rng, config.velocity_range) / scale,
            (sample(rng, config.velocity_range) + velocity_span / 2.0) / scale,
            sample(rng, config.velocity_range) / scale,
        );
        let angular_velocity = Vec3::new(
            sample(rng, config.rotation_range) / scale,
            sample(rng, config.rotation_range) / scale,
            sample(rng, config.rotation_range) / scale,
        );

        world.add_component(
            entity,
            Gravity {
                force: config.gravity * (scale / scale_span),
            },
        )?;
        world.add_component(
            entity,
            RigidBody {
                velocity,
                acceleration: Vec3::ZERO,
                angular_velocity,
            },
        )?;
        world.add_component(
            entity,
            Transform {
                position,
                scale: Vec3::splat(scale),
                rotation,
            },
        )?;
        world.add_component(
            entity,
            Renderable {
                color: Vec3::new(
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                ),
            },
        )?;

        if let Some(every) = config.thrust_every {
            if every > 0 && index % every == 0 {
                world.add_component(
                    entity,
                    Thrust {
                        force: config.thrust_force,
                    },
                )?;
            }
        }

        entities.push(entity);
    }

    Ok(entities)
}
