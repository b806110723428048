//! Light ray propagation around a Schwarzschild mass.
//!
//! Rays are integrated in polar coordinates centred on the gravity well. The
//! state vector is `(r, θ, ṙ, θ̇)` and each tick advances it by one fourth
//! order Runge-Kutta step of the null geodesic equations
//!
//! ```text
//! f  = 1 - r_s / r
//! f' = r_s / r²
//! r̈  = -c² f f' / 2 + 3 f' ṙ² / (2 f) + r f θ̇²
//! θ̈  = θ̇ ṙ (f' / f - 2 / r)
//! ```
//!
//! `r² θ̇ / f` is a constant of motion of these equations, which the tests
//! use to check the integrator.

use glam::{Vec2, Vec4};
use tracing::{debug, trace, warn};

use lensing_foundation::Entity;
use lensing_storage::{Coordinator, System};

use crate::components::{GravityWell, Projectile, Transform2D, Velocity2D};

/// Default speed of light, in geometric units.
pub const DEFAULT_SPEED_OF_LIGHT: f32 = 1.0;

/// Default capture radius as a multiple of `r_s` (the photon sphere).
pub const DEFAULT_CAPTURE_MARGIN: f32 = 1.5;

/// Parameters of the lensing integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensingConfig {
    /// Speed of light `c`.
    pub speed_of_light: f32,
    /// Rays closer than `capture_margin * r_s` are captured.
    pub capture_margin: f32,
}

impl Default for LensingConfig {
    fn default() -> Self {
        Self {
            speed_of_light: DEFAULT_SPEED_OF_LIGHT,
            capture_margin: DEFAULT_CAPTURE_MARGIN,
        }
    }
}

/// Bends rays around the first gravity well among its members.
///
/// Members are entities with a `Transform2D`. The well is the first member
/// owning a `GravityWell`; every other member owning both `Velocity2D` and
/// `Projectile` is a ray. A captured ray loses its `Velocity2D` and stops.
#[derive(Debug, Default)]
pub struct LensingSystem {
    config: LensingConfig,
    captured: Vec<Entity>,
}

impl System for LensingSystem {
    const NAME: &'static str = "LensingSystem";
}

impl LensingSystem {
    /// Creates the system with the given parameters.
    #[must_use]
    pub fn new(config: LensingConfig) -> Self {
        Self {
            config,
            captured: Vec::new(),
        }
    }

    /// Integrator parameters.
    #[must_use]
    pub fn config(&self) -> &LensingConfig {
        &self.config
    }

    /// Advances every ray by `dt`. Returns the number of rays captured
    /// during this step.
    ///
    /// # Panics
    ///
    /// Panics if the system or any of the lensing components is not
    /// registered.
    pub fn update(coordinator: &mut Coordinator, dt: f32) -> usize {
        let config = coordinator.system::<Self>().config;
        let mut captured = std::mem::take(&mut coordinator.system_mut::<Self>().captured);
        captured.clear();

        if Self::advance_rays(coordinator, config, dt, &mut captured) {
            for &entity in &captured {
                coordinator.remove_component::<Velocity2D>(entity);
                debug!(%entity, "ray captured");
            }
        }

        let count = captured.len();
        coordinator.system_mut::<Self>().captured = captured;
        count
    }

    /// Integrates all rays. Returns false if there is no gravity well.
    fn advance_rays(
        coordinator: &mut Coordinator,
        config: LensingConfig,
        dt: f32,
        captured: &mut Vec<Entity>,
    ) -> bool {
        let mut view = coordinator.view::<Self>();
        let members = view.members();

        let Some(well_entity) = members.iter().find(|&e| view.has::<GravityWell>(e)) else {
            warn!("no gravity well among lensing members; rays left untouched");
            return false;
        };
        let center = view.get::<Transform2D>(well_entity).position;
        let well = *view.get::<GravityWell>(well_entity);
        let c2 = config.speed_of_light * config.speed_of_light;
        let capture_radius = config.capture_margin * well.schwarzschild_radius;

        for entity in members {
            if view.has::<GravityWell>(entity)
                || !view.has::<Velocity2D>(entity)
                || !view.has::<Projectile>(entity)
            {
                continue;
            }

            let relative = view.get::<Transform2D>(entity).position - center;
            if relative.length() <= capture_radius {
                captured.push(entity);
                continue;
            }

            let velocity = view.get::<Velocity2D>(entity).velocity;
            let state = rk4_step(
                to_polar(relative, velocity),
                well.schwarzschild_radius,
                c2,
                dt,
            );
            let (offset, velocity) = to_cartesian(state);

            if !offset.is_finite() || !velocity.is_finite() {
                warn!(%entity, "ray integration diverged; capturing");
                captured.push(entity);
                continue;
            }

            view.get_mut::<Transform2D>(entity).position = center + offset;
            view.get_mut::<Velocity2D>(entity).velocity = velocity;
            trace!(%entity, r = state.x, theta = state.y, "ray advanced");

            if offset.length() <= capture_radius {
                captured.push(entity);
            }
        }

        true
    }
}

/// Converts a position and velocity relative to the well to `(r, θ, ṙ, θ̇)`.
#[must_use]
pub fn to_polar(relative: Vec2, velocity: Vec2) -> Vec4 {
    let r = relative.length();
    let theta = relative.y.atan2(relative.x);
    let r_dot = relative.dot(velocity) / r;
    let theta_dot = relative.perp_dot(velocity) / (r * r);
    Vec4::new(r, theta, r_dot, theta_dot)
}

/// Converts `(r, θ, ṙ, θ̇)` back to a relative position and velocity.
#[must_use]
pub fn to_cartesian(state: Vec4) -> (Vec2, Vec2) {
    let (r, theta, r_dot, theta_dot) = (state.x, state.y, state.z, state.w);
    let (sin, cos) = theta.sin_cos();
    let position = Vec2::new(r * cos, r * sin);
    let velocity = Vec2::new(
        r_dot * cos - r * theta_dot * sin,
        r_dot * sin + r * theta_dot * cos,
    );
    (position, velocity)
}

/// Time derivative of the polar state.
#[must_use]
pub fn geodesic_rhs(state: Vec4, schwarzschild_radius: f32, c2: f32) -> Vec4 {
    let (r, r_dot, theta_dot) = (state.x, state.z, state.w);
    let f = 1.0 - schwarzschild_radius / r;
    let df = schwarzschild_radius / (r * r);

    let r_ddot = -(c2 * f * df) / 2.0 + (3.0 * df * r_dot * r_dot) / (2.0 * f)
        + r * f * theta_dot * theta_dot;
    let theta_ddot = theta_dot * r_dot * (df / f - 2.0 / r);

    Vec4::new(r_dot, theta_dot, r_ddot, theta_ddot)
}

/// One classic Runge-Kutta step of the geodesic equations.
#[must_use]
pub fn rk4_step(state: Vec4, schwarzschild_radius: f32, c2: f32, dt: f32) -> Vec4 {
    let k1 = geodesic_rhs(state, schwarzschild_radius, c2);
    let k2 = geodesic_rhs(state + 0.5 * dt * k1, schwarzschild_radius, c2);
    let k3 = geodesic_rhs(state + 0.5 * dt * k2, schwarzschild_radius, c2);
    let k4 = geodesic_rhs(state + dt * k3, schwarzschild_radius, c2);
    state + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}

/// The conserved quantity `r² θ̇ / f`.
#[must_use]
pub fn angular_momentum(state: Vec4, schwarzschild_radius: f32) -> f32 {
    let f = 1.0 - schwarzschild_radius / state.x;
    state.x * state.x * state.w / f
}
