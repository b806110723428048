//! Simulation configuration.
//!
//! Configuration is plain data deserialized from TOML. Every field has a
//! default, so a file only needs to name what it changes:
//!
//! ```toml
//! dt = 0.002
//! trail_length = 250
//!
//! [black_hole]
//! schwarzschild_radius = 0.15
//!
//! [rays]
//! count = 41
//! spacing = 0.04
//! ```

use std::path::Path;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use lensing_foundation::{DEFAULT_MAX_ENTITIES, Error, Result};
use lensing_storage::EcsConfig;

use crate::components::Color;
use crate::lensing::{DEFAULT_CAPTURE_MARGIN, DEFAULT_SPEED_OF_LIGHT, LensingConfig};
use crate::render::DEFAULT_CIRCLE_SEGMENTS;
use crate::trail::DEFAULT_TRAIL_LENGTH;

/// The central mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackHoleConfig {
    /// World position.
    pub position: Vec2,
    /// Mass.
    pub mass: f32,
    /// Event horizon radius, also used as the drawn radius.
    pub schwarzschild_radius: f32,
    /// Draw color.
    pub color: Vec4,
}

impl Default for BlackHoleConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            mass: 1.0,
            schwarzschild_radius: 0.1,
            color: Color::WHITE.rgba,
        }
    }
}

/// A column of parallel rays launched toward `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayConfig {
    /// Number of rays.
    pub count: usize,
    /// Vertical distance between neighbouring rays.
    pub spacing: f32,
    /// Launch abscissa shared by every ray.
    pub start_x: f32,
    /// Height of the column centre above the black hole.
    pub offset: f32,
    /// Trail color.
    pub color: Vec4,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            count: 21,
            spacing: 0.08,
            start_x: -1.5,
            offset: 0.0,
            color: Color::YELLOW.rgba,
        }
    }
}

/// Everything needed to build and run a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Live entity limit of the coordinator.
    pub max_entities: usize,
    /// Time step per tick.
    pub dt: f32,
    /// Speed of light.
    pub speed_of_light: f32,
    /// Capture radius as a multiple of the Schwarzschild radius.
    pub capture_margin: f32,
    /// Points kept per trail.
    pub trail_length: usize,
    /// Ring segments per drawn circle.
    pub circle_segments: usize,
    /// The central mass.
    pub black_hole: BlackHoleConfig,
    /// The ray column.
    pub rays: RayConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
            dt: 0.005,
            speed_of_light: DEFAULT_SPEED_OF_LIGHT,
            capture_margin: DEFAULT_CAPTURE_MARGIN,
            trail_length: DEFAULT_TRAIL_LENGTH,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            black_hole: BlackHoleConfig::default(),
            rays: RayConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// A single ray grazing the photon sphere.
    #[must_use]
    pub fn grazing() -> Self {
        Self {
            rays: RayConfig {
                count: 1,
                spacing: 0.0,
                ..RayConfig::default()
            },
            ..Self::default()
        }
        .with_ray_offset(0.27)
    }

    /// Many closely spaced rays with long trails.
    #[must_use]
    pub fn dense() -> Self {
        Self {
            trail_length: 400,
            rays: RayConfig {
                count: 101,
                spacing: 0.015,
                ..RayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text does not parse or the result fails
    /// [`SimulationConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| Error::invalid_config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read, does not parse, or
    /// fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            Error::invalid_config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&text).map_err(|err| err.with_context(path.display().to_string()))
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| Error::invalid_config(err.to_string()))
    }

    /// Checks every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.ecs_config().validate()?;

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::invalid_config("dt must be positive"));
        }
        if !(self.speed_of_light.is_finite() && self.speed_of_light > 0.0) {
            return Err(Error::invalid_config("speed_of_light must be positive"));
        }
        if !(self.capture_margin.is_finite() && self.capture_margin >= 1.0) {
            return Err(Error::invalid_config("capture_margin must be at least 1"));
        }
        if self.circle_segments < 3 {
            return Err(Error::invalid_config("circle_segments must be at least 3"));
        }

        let hole = &self.black_hole;
        if !hole.position.is_finite() {
            return Err(Error::invalid_config("black_hole.position must be finite"));
        }
        if !(hole.mass.is_finite() && hole.mass >= 0.0) {
            return Err(Error::invalid_config("black_hole.mass must be non-negative"));
        }
        if !(hole.schwarzschild_radius.is_finite() && hole.schwarzschild_radius >= 0.0) {
            return Err(Error::invalid_config(
                "black_hole.schwarzschild_radius must be non-negative",
            ));
        }

        let rays = &self.rays;
        if !(rays.spacing.is_finite() && rays.start_x.is_finite() && rays.offset.is_finite()) {
            return Err(Error::invalid_config("rays geometry must be finite"));
        }
        if rays.count >= self.max_entities {
            return Err(Error::invalid_config(format!(
                "{} rays and the black hole exceed max_entities {}",
                rays.count, self.max_entities
            )));
        }

        Ok(())
    }

    /// Coordinator parameters.
    #[must_use]
    pub fn ecs_config(&self) -> EcsConfig {
        EcsConfig::new().with_max_entities(self.max_entities)
    }

    /// Integrator parameters.
    #[must_use]
    pub fn lensing_config(&self) -> LensingConfig {
        LensingConfig {
            speed_of_light: self.speed_of_light,
            capture_margin: self.capture_margin,
        }
    }

    /// Sets the time step.
    #[must_use]
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the live entity limit.
    #[must_use]
    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Sets the trail length.
    #[must_use]
    pub fn with_trail_length(mut self, trail_length: usize) -> Self {
        self.trail_length = trail_length;
        self
    }

    /// Sets the ray count and spacing.
    #[must_use]
    pub fn with_rays(mut self, count: usize, spacing: f32) -> Self {
        self.rays.count = count;
        self.rays.spacing = spacing;
        self
    }

    /// Sets the Schwarzschild radius of the black hole.
    #[must_use]
    pub fn with_schwarzschild_radius(mut self, radius: f32) -> Self {
        self.black_hole.schwarzschild_radius = radius;
        self
    }

    /// Centres the ray column `offset` above the black hole.
    #[must_use]
    pub fn with_ray_offset(mut self, offset: f32) -> Self {
        self.rays.offset = offset;
        self
    }

    /// Launch heights of the rays.
    #[allow(clippy::cast_precision_loss)]
    pub fn ray_heights(&self) -> impl Iterator<Item = f32> + '_ {
        let centre = self.black_hole.position.y + self.rays.offset;
        let middle = self.rays.count.saturating_sub(1) as f32 / 2.0;
        (0..self.rays.count).map(move |i| centre + (i as f32 - middle) * self.rays.spacing)
    }
}
