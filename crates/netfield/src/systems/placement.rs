//! Where nodes come from: initial layouts and pointer-driven spawning.

use glam::Vec2;

use crate::api::config::{FieldConfig, Placement, ScatterPlacement, TrailPlacement};
use crate::core::field::NodeField;
use crate::core::node::Node;
use crate::core::rng::Rng;

/// Random drift velocity, each axis uniform in ±`drift_speed`/2.
fn drift(rng: &mut Rng, drift_speed: f32) -> Vec2 {
    Vec2::new(rng.centered(drift_speed), rng.centered(drift_speed))
}

fn range(rng: &mut Rng, (min, max): (f32, f32)) -> f32 {
    rng.range(min, max)
}

/// Replace the field's nodes with the strategy's initial layout.
pub fn populate(field: &mut NodeField, config: &FieldConfig) {
    field.clear();
    let bounds = field.bounds();
    match &config.placement {
        Placement::Scatter(scatter) => {
            for _ in 0..scatter.initial_nodes {
                let pos = Vec2::new(
                    field.rng.next_f32() * bounds.width,
                    field.rng.next_f32() * bounds.height,
                );
                let vel = drift(&mut field.rng, config.drift_speed);
                let radius = range(&mut field.rng, scatter.initial_radius);
                field.push(Node::new(pos, vel, radius));
            }
        }
        Placement::Ring(ring) => {
            let center = bounds.center();
            let ring_radius = bounds.min_side() * ring.radius_fraction.clamp(0.0, 0.5);
            let count = ring.count.max(1);
            for i in 0..ring.count {
                let theta = i as f32 / count as f32 * std::f32::consts::TAU;
                let anchor = bounds.clamp(center + Vec2::from_angle(theta) * ring_radius);
                let vel = drift(&mut field.rng, config.drift_speed);
                let radius = range(&mut field.rng, ring.node_radius);
                field.push(Node::new(anchor, vel, radius).with_anchor(anchor));
            }
        }
        Placement::Trail(_) => {}
    }
    log::debug!("populated field with {} nodes", field.len());
}

/// Point at a random angle and distance from `origin`, clamped to the surface.
fn offset_from(field: &mut NodeField, origin: Vec2, distance: (f32, f32)) -> Vec2 {
    let angle = field.rng.angle();
    let dist = range(&mut field.rng, distance);
    field.bounds().clamp(origin + Vec2::from_angle(angle) * dist)
}

/// Top up a thinning scatter field near the pointer.
/// Spawns at most one node; returns whether it did.
pub fn top_up_near_pointer(
    field: &mut NodeField,
    scatter: &ScatterPlacement,
    drift_speed: f32,
    pointer: Vec2,
) -> bool {
    if field.len() >= scatter.max_nodes {
        return false;
    }
    if field.visible_count(scatter.visible_alpha) >= scatter.visible_floor {
        return false;
    }
    let pos = offset_from(field, pointer, scatter.spawn_distance);
    let vel = drift(&mut field.rng, drift_speed);
    let radius = range(&mut field.rng, scatter.spawn_radius);
    field.push(Node::new(pos, vel, radius));
    true
}

/// Maybe drop a trail node for one pointer move, then enforce the cap.
/// Returns whether a node was dropped.
pub fn drop_trail_node(
    field: &mut NodeField,
    trail: &TrailPlacement,
    drift_speed: f32,
    pointer: Vec2,
) -> bool {
    if !field.rng.chance(trail.spawn_chance) {
        return false;
    }
    let pos = offset_from(field, pointer, trail.spawn_distance);
    let vel = drift(&mut field.rng, drift_speed);
    let radius = range(&mut field.rng, trail.node_radius);
    field.push(
        Node::new(pos, vel, radius)
            .with_alpha(1.0)
            .with_lifetime(trail.lifetime_steps),
    );
    field.evict_oldest(trail.max_nodes);
    true
}
