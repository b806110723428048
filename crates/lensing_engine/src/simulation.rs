//! The simulation driver.

use tracing::{debug, debug_span, warn};

use lensing_foundation::Result;
use lensing_storage::Coordinator;

use crate::components::Velocity2D;
use crate::config::SimulationConfig;
use crate::lensing::LensingSystem;
use crate::render::{SphereRenderSystem, TrailRenderSystem, VertexBatch};
use crate::scene::{self, Scene};
use crate::trail::TrailSystem;

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Tick number after the step, starting at 1.
    pub tick: u64,
    /// Rays captured during the step.
    pub captured: usize,
}

/// Owns a coordinator populated with a lensing scene and advances it.
#[derive(Debug)]
pub struct Simulation {
    coordinator: Coordinator,
    config: SimulationConfig,
    scene: Scene,
    tick: u64,
    batch: VertexBatch,
}

impl Simulation {
    /// Validates `config`, then builds the coordinator and the scene.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a bad configuration or `CapacityExceeded`
    /// if the scene does not fit.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut coordinator = Coordinator::with_config(config.ecs_config())?;
        let scene = scene::bootstrap(&mut coordinator, &config)?;

        Ok(Self {
            coordinator,
            config,
            scene,
            tick: 0,
            batch: VertexBatch::new(),
        })
    }

    /// Advances lensing, then records trails.
    pub fn step(&mut self) -> StepReport {
        let span = debug_span!("tick", tick = self.tick + 1);
        let _guard = span.enter();

        let captured = LensingSystem::update(&mut self.coordinator, self.config.dt);
        TrailSystem::update(&mut self.coordinator);
        self.tick += 1;

        if captured > 0 {
            warn!(captured, remaining = self.active_rays(), "rays captured");
        }
        StepReport {
            tick: self.tick,
            captured,
        }
    }

    /// Runs `ticks` steps. Returns the number of rays captured.
    pub fn run(&mut self, ticks: u64) -> usize {
        let captured: usize = (0..ticks).map(|_| self.step().captured).sum();
        debug!(ticks, captured, tick = self.tick, "run finished");
        captured
    }

    /// Rebuilds the vertex batch for the current state: circles first, then
    /// trails.
    pub fn render(&mut self) -> &VertexBatch {
        self.batch.clear();
        SphereRenderSystem::build(&self.coordinator, &mut self.batch);
        TrailRenderSystem::build(&self.coordinator, &mut self.batch);
        &self.batch
    }

    /// Number of rays still moving.
    #[must_use]
    pub fn active_rays(&self) -> usize {
        self.scene
            .rays
            .iter()
            .filter(|&&ray| self.coordinator.has_component::<Velocity2D>(ray))
            .count()
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The scene's entity handles.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The configuration the simulation was built from.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The underlying coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// The underlying coordinator, mutably.
    pub fn coordinator_mut(&mut self) -> &mut Coordinator {
        &mut self.coordinator
    }
}
