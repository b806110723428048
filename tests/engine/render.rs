//! Integration tests for vertex generation

use lensing_engine::{Primitive, Simulation, SimulationConfig, VERTEX_STRIDE};

#[test]
fn frame_layout_matches_the_scene() {
    let config = SimulationConfig::default()
        .with_rays(3, 0.5)
        .with_trail_length(10);
    let segments = config.circle_segments;
    let mut sim = Simulation::new(config).unwrap();
    sim.run(25);

    let batch = sim.render();
    let draws = batch.draws();

    assert_eq!(draws.len(), 4);
    assert_eq!(draws[0].primitive, Primitive::TriangleFan);
    assert_eq!(draws[0].count, segments + 2);
    for draw in &draws[1..] {
        assert_eq!(draw.primitive, Primitive::LineStrip);
        assert_eq!(draw.count, 1 + 10);
    }

    let total: usize = draws.iter().map(|d| d.count).sum();
    assert_eq!(batch.vertex_count(), total);
    assert_eq!(batch.vertices().len(), total * VERTEX_STRIDE);
}

#[test]
fn draws_are_contiguous() {
    let mut sim = Simulation::new(SimulationConfig::default().with_rays(5, 0.3)).unwrap();
    sim.run(3);

    let batch = sim.render();
    let mut next = 0;
    for draw in batch.draws() {
        assert_eq!(draw.first, next);
        next += draw.count;
    }
}

#[test]
fn rendering_before_any_step_draws_only_the_hole() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    let batch = sim.render();
    assert_eq!(batch.draws().len(), 1);
}

#[test]
fn captured_rays_keep_their_trail_drawn() {
    let config = SimulationConfig::default().with_rays(1, 0.0).with_trail_length(5);
    let mut sim = Simulation::new(config).unwrap();
    sim.run(600);

    assert_eq!(sim.active_rays(), 0);
    let batch = sim.render();
    assert_eq!(batch.draws().len(), 2);
    assert_eq!(batch.draws()[1].count, 1 + 5);
}
