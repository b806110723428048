//! Scene bootstrap: component and system registration plus the initial
//! black hole and ray column.

use glam::{Vec2, Vec4};
use tracing::debug;

use lensing_foundation::{Entity, Result, Signature};
use lensing_storage::Coordinator;

use crate::components::{
    Color, GravityWell, Projectile, Spherical, Trail, Transform2D, Velocity2D,
};
use crate::config::{BlackHoleConfig, SimulationConfig};
use crate::lensing::LensingSystem;
use crate::render::{SphereRenderSystem, TrailRenderSystem};
use crate::trail::TrailSystem;

/// Handles of the entities created by [`bootstrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// The gravity well.
    pub black_hole: Entity,
    /// The rays, bottom to top.
    pub rays: Vec<Entity>,
}

/// Registers every simulation component kind.
///
/// # Panics
///
/// Panics if any kind is already registered.
pub fn register_components(coordinator: &mut Coordinator) {
    coordinator.register_component::<Transform2D>();
    coordinator.register_component::<Velocity2D>();
    coordinator.register_component::<Projectile>();
    coordinator.register_component::<GravityWell>();
    coordinator.register_component::<Trail>();
    coordinator.register_component::<Spherical>();
    coordinator.register_component::<Color>();
}

/// Registers every system and sets its required signature.
///
/// # Panics
///
/// Panics if a system is already registered or a component kind is missing.
pub fn register_systems(coordinator: &mut Coordinator, config: &SimulationConfig) {
    let transform = coordinator.component_type::<Transform2D>();
    let trail = coordinator.component_type::<Trail>();
    let spherical = coordinator.component_type::<Spherical>();

    coordinator.register_system_with(LensingSystem::new(config.lensing_config()));
    coordinator.set_system_signature::<LensingSystem>(Signature::from(transform));

    coordinator.register_system_with(TrailSystem::new(config.trail_length));
    coordinator.set_system_signature::<TrailSystem>(Signature::new().with(transform).with(trail));

    coordinator.register_system_with(SphereRenderSystem::new(config.circle_segments));
    coordinator
        .set_system_signature::<SphereRenderSystem>(Signature::new().with(transform).with(spherical));

    coordinator.register_system::<TrailRenderSystem>();
    coordinator
        .set_system_signature::<TrailRenderSystem>(Signature::new().with(transform).with(trail));
}

/// Creates the gravity well, drawn as a circle of radius `r_s`.
///
/// # Errors
///
/// Returns `CapacityExceeded` if no entity can be created.
pub fn spawn_black_hole(coordinator: &mut Coordinator, config: &BlackHoleConfig) -> Result<Entity> {
    let entity = coordinator.create_entity()?;
    coordinator.add_component(entity, Transform2D::new(config.position));
    coordinator.add_component(
        entity,
        GravityWell {
            mass: config.mass,
            schwarzschild_radius: config.schwarzschild_radius,
        },
    );
    coordinator.add_component(
        entity,
        Spherical {
            radius: config.schwarzschild_radius,
        },
    );
    coordinator.add_component(entity, Color::from(config.color));
    Ok(entity)
}

/// Creates one ray.
///
/// # Errors
///
/// Returns `CapacityExceeded` if no entity can be created.
pub fn spawn_ray(
    coordinator: &mut Coordinator,
    position: Vec2,
    velocity: Vec2,
    impact_parameter: f32,
    color: Vec4,
    trail_length: usize,
) -> Result<Entity> {
    let entity = coordinator.create_entity()?;
    coordinator.add_component(entity, Transform2D::new(position));
    coordinator.add_component(entity, Velocity2D::new(velocity));
    coordinator.add_component(entity, Projectile { impact_parameter });
    coordinator.add_component(entity, Trail::with_capacity(trail_length));
    coordinator.add_component(entity, Color::from(color));
    Ok(entity)
}

/// Registers everything and creates the initial scene.
///
/// # Errors
///
/// Returns `CapacityExceeded` if the scene does not fit in the coordinator.
///
/// # Panics
///
/// Panics if the coordinator already has any of the simulation's kinds
/// registered.
pub fn bootstrap(coordinator: &mut Coordinator, config: &SimulationConfig) -> Result<Scene> {
    register_components(coordinator);
    register_systems(coordinator, config);

    let black_hole = spawn_black_hole(coordinator, &config.black_hole)?;
    let velocity = Vec2::new(config.speed_of_light, 0.0);
    let rays = config
        .ray_heights()
        .map(|y| {
            spawn_ray(
                coordinator,
                Vec2::new(config.rays.start_x, y),
                velocity,
                y - config.black_hole.position.y,
                config.rays.color,
                config.trail_length,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(%black_hole, rays = rays.len(), "scene created");
    Ok(Scene { black_hole, rays })
}
