//! CPU-side vertex generation.
//!
//! The render systems never touch a graphics API. They read components and
//! append interleaved `[x, y, z, r, g, b, a]` vertices to a [`VertexBatch`],
//! together with the draw commands a backend would issue for them.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3, Vec4};

use lensing_storage::{Coordinator, System};

use crate::components::{Color, Spherical, Trail, Transform2D};

/// Floats per vertex: position (3) then color (4).
pub const VERTEX_STRIDE: usize = 7;

/// Default number of ring segments for circles.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Primitive topology of a draw command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Center vertex followed by ring vertices.
    TriangleFan,
    /// Connected line segments.
    LineStrip,
}

/// A contiguous run of vertices drawn with one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    /// Topology.
    pub primitive: Primitive,
    /// Index of the first vertex.
    pub first: usize,
    /// Number of vertices.
    pub count: usize,
}

/// Reusable buffer of interleaved vertices and draw commands.
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    vertices: Vec<f32>,
    draws: Vec<DrawCommand>,
}

impl VertexBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the batch, keeping its allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
    }

    /// Interleaved vertex data.
    #[must_use]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Draw commands in submission order.
    #[must_use]
    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// Returns true if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Returns the vertex at `index` as `(position, color)`.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<(Vec3, Vec4)> {
        let start = index * VERTEX_STRIDE;
        let v = self.vertices.get(start..start + VERTEX_STRIDE)?;
        Some((
            Vec3::new(v[0], v[1], v[2]),
            Vec4::new(v[3], v[4], v[5], v[6]),
        ))
    }

    fn push_vertex(&mut self, position: Vec3, color: Vec4) {
        self.vertices.extend_from_slice(&position.to_array());
        self.vertices.extend_from_slice(&color.to_array());
    }

    /// Records a draw over the vertices pushed since `first`.
    fn finish_draw(&mut self, primitive: Primitive, first: usize) {
        let count = self.vertex_count() - first;
        self.draws.push(DrawCommand {
            primitive,
            first,
            count,
        });
    }
}

/// Emits a filled circle for every entity with `Transform2D` and `Spherical`.
#[derive(Debug)]
pub struct SphereRenderSystem {
    segments: usize,
}

impl Default for SphereRenderSystem {
    fn default() -> Self {
        Self::new(DEFAULT_CIRCLE_SEGMENTS)
    }
}

impl System for SphereRenderSystem {
    const NAME: &'static str = "SphereRenderSystem";
}

impl SphereRenderSystem {
    /// Creates the system with `segments` ring segments per circle.
    #[must_use]
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }

    /// Ring segments per circle.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Appends one triangle fan per member: the center, then `segments + 1`
    /// ring vertices with the first repeated to close the fan. Entities
    /// without a `Color` are drawn white.
    ///
    /// # Panics
    ///
    /// Panics if the system or its components are not registered.
    pub fn build(coordinator: &Coordinator, batch: &mut VertexBatch) {
        let segments = coordinator.system::<Self>().segments;

        for entity in coordinator.system_entities::<Self>() {
            let center = coordinator.component::<Transform2D>(entity).position;
            let radius = coordinator.component::<Spherical>(entity).radius;
            let color = coordinator
                .try_component::<Color>(entity)
                .copied()
                .unwrap_or(Color::WHITE)
                .rgba;

            push_circle(batch, center, radius, color, segments);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn push_circle(batch: &mut VertexBatch, center: Vec2, radius: f32, color: Vec4, segments: usize) {
    let first = batch.vertex_count();
    batch.push_vertex(center.extend(0.0), color);
    for i in 0..=segments {
        let angle = TAU * i as f32 / segments as f32;
        let offset = Vec2::from_angle(angle) * radius;
        batch.push_vertex((center + offset).extend(0.0), color);
    }
    batch.finish_draw(Primitive::TriangleFan, first);
}

/// Emits a fading line strip for every entity with `Transform2D` and `Trail`.
#[derive(Debug, Default)]
pub struct TrailRenderSystem;

impl System for TrailRenderSystem {
    const NAME: &'static str = "TrailRenderSystem";
}

impl TrailRenderSystem {
    /// Appends one line strip per member with a non-empty trail.
    ///
    /// The strip starts at the current position at full alpha and walks the
    /// trail from newest to oldest, scaling alpha by `i / len` where `i` is
    /// the point's index from the oldest. Entities without a `Color` are
    /// drawn yellow.
    ///
    /// # Panics
    ///
    /// Panics if the system or its components are not registered.
    pub fn build(coordinator: &Coordinator, batch: &mut VertexBatch) {
        for entity in coordinator.system_entities::<Self>() {
            let trail = coordinator.component::<Trail>(entity);
            if trail.is_empty() {
                continue;
            }
            let head = coordinator.component::<Transform2D>(entity).position;
            let color = coordinator
                .try_component::<Color>(entity)
                .copied()
                .unwrap_or(Color::YELLOW)
                .rgba;

            push_trail(batch, head, trail, color);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn push_trail(batch: &mut VertexBatch, head: Vec2, trail: &Trail, color: Vec4) {
    let first = batch.vertex_count();
    batch.push_vertex(head.extend(0.0), color);

    let len = trail.len() as f32;
    for (i, point) in trail.positions.iter().enumerate().rev() {
        let fade = i as f32 / len;
        batch.push_vertex(point.extend(0.0), color.truncate().extend(color.w * fade));
    }
    batch.finish_draw(Primitive::LineStrip, first);
}
