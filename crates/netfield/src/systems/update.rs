//! One simulation step: opacity, motion, lifetime, spawning.

use crate::api::config::{FieldConfig, Placement};
use crate::core::field::NodeField;
use crate::core::node::Node;
use crate::core::pointer::PointerState;

use super::placement::top_up_near_pointer;

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Something is (or may become) visible.
    Active,
    /// Idle and every node is below the visibility epsilon.
    Faded,
}

/// Target alpha for a node at `distance` from the pointer.
/// Zero at or beyond `radius`, peaking at `gain` right under the pointer.
pub fn influence_alpha(distance: f32, radius: f32, gain: f32) -> f32 {
    if radius <= 0.0 || !(distance < radius) {
        return 0.0;
    }
    ((1.0 - distance / radius).max(0.0) * gain).clamp(0.0, 1.0)
}

fn apply_opacity(node: &mut Node, pointer: &PointerState, config: &FieldConfig, idle: bool) {
    if idle {
        node.fade(config.idle_decay);
        if let Some(life) = node.life_alpha() {
            let alpha = node.alpha().min(life);
            node.set_alpha(alpha);
        }
        return;
    }
    match node.life_alpha() {
        Some(life) => {
            node.set_target_alpha(life);
            node.set_alpha(life);
        }
        None => {
            let target = if pointer.seen {
                let d = node.distance_to(pointer.pos);
                influence_alpha(d, config.influence_radius, config.influence_gain)
            } else {
                0.0
            };
            node.set_target_alpha(target);
            node.ease_alpha(config.alpha_easing);
        }
    }
}

/// Advance every node by one step.
///
/// `idle` means the pointer has been still for the idle threshold: the
/// strategy's opacity rule is replaced by the idle fade, and spawning stops.
pub fn step_field(
    field: &mut NodeField,
    pointer: &PointerState,
    config: &FieldConfig,
    idle: bool,
) -> StepOutcome {
    let step = field.count_step();
    let bounds = field.bounds();
    let pull = match &config.placement {
        Placement::Ring(ring) => ring.pull,
        _ => 0.0,
    };

    field.retain(|node| {
        let alive = node.age();
        apply_opacity(node, pointer, config, idle);
        if config.attraction > 0.0 && pointer.seen {
            node.attract(pointer.pos, config.influence_radius, config.attraction);
        }
        node.damp(config.damping);
        node.pull_to_anchor(pull);
        node.integrate(bounds);
        alive
    });

    if let Placement::Scatter(scatter) = &config.placement {
        let interval = scatter.spawn_interval.max(1);
        if !idle && pointer.moving && step % interval == 0 {
            top_up_near_pointer(field, scatter, config.drift_speed, pointer.pos);
        }
    }

    if idle && field.all_faded(config.visibility_epsilon) {
        StepOutcome::Faded
    } else {
        StepOutcome::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ScatterPlacement;
    use crate::core::field::Bounds;
    use crate::systems::placement::populate;
    use glam::Vec2;

    fn pointer_at(x: f32, y: f32) -> PointerState {
        let mut p = PointerState::new();
        p.moved(Vec2::new(x, y), 0.0);
        p
    }

    #[test]
    fn influence_inside_radius() {
        let a = influence_alpha(75.0, 150.0, 0.9);
        assert!((a - 0.45).abs() < 1e-6);
        assert!((influence_alpha(0.0, 150.0, 0.9) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn influence_outside_radius_is_zero() {
        assert_eq!(influence_alpha(200.0, 150.0, 0.9), 0.0);
        assert_eq!(influence_alpha(150.0, 150.0, 0.9), 0.0);
        assert_eq!(influence_alpha(f32::NAN, 150.0, 0.9), 0.0);
    }

    #[test]
    fn node_beyond_influence_targets_zero() {
        let config = FieldConfig::pointer_follow();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        field.push(Node::new(Vec2::new(300.0, 100.0), Vec2::ZERO, 4.0).with_alpha(0.5));
        let pointer = pointer_at(100.0, 100.0); // 200px away
        step_field(&mut field, &pointer, &config, false);
        let n = &field.nodes()[0];
        assert_eq!(n.target_alpha(), 0.0);
        assert!(n.alpha() < 0.5, "alpha should ease down, was {}", n.alpha());
        assert!(n.alpha() > 0.0, "alpha eases, never jumps");
    }

    #[test]
    fn node_near_pointer_brightens() {
        let config = FieldConfig::pointer_follow();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        field.push(Node::new(Vec2::new(110.0, 100.0), Vec2::ZERO, 4.0));
        let pointer = pointer_at(100.0, 100.0);
        for _ in 0..60 {
            step_field(&mut field, &pointer, &config, false);
        }
        let n = &field.nodes()[0];
        assert!(n.alpha() > 0.8, "alpha was {}", n.alpha());
    }

    #[test]
    fn idle_fade_decays_by_constant() {
        let config = FieldConfig::pointer_follow();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        field.push(Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 4.0).with_alpha(0.8));
        let pointer = pointer_at(100.0, 100.0);
        step_field(&mut field, &pointer, &config, true);
        let n = &field.nodes()[0];
        assert_eq!(n.target_alpha(), 0.0);
        assert!((n.alpha() - 0.76).abs() < 1e-6);
    }

    #[test]
    fn idle_fade_eventually_reports_faded() {
        let config = FieldConfig::pointer_follow();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        field.push(Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 4.0).with_alpha(1.0));
        let pointer = pointer_at(100.0, 100.0);
        let mut steps = 0;
        while step_field(&mut field, &pointer, &config, true) == StepOutcome::Active {
            steps += 1;
            assert!(steps < 200, "fade never completed");
        }
        // 0.95^90 ≈ 0.0099
        assert!((85..=95).contains(&steps), "took {} steps", steps);
    }

    #[test]
    fn trail_nodes_expire() {
        let config = FieldConfig::hacker_trail();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        field.push(
            Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 3.0)
                .with_alpha(1.0)
                .with_lifetime(3),
        );
        let pointer = pointer_at(100.0, 100.0);
        step_field(&mut field, &pointer, &config, false);
        assert!((field.nodes()[0].alpha() - 2.0 / 3.0).abs() < 1e-6);
        step_field(&mut field, &pointer, &config, false);
        step_field(&mut field, &pointer, &config, false);
        assert!(field.is_empty());
    }

    #[test]
    fn trail_nodes_drift_toward_pointer() {
        let config = FieldConfig::hacker_trail();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        field.push(Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 3.0).with_lifetime(100));
        let pointer = pointer_at(200.0, 100.0);
        for _ in 0..10 {
            step_field(&mut field, &pointer, &config, false);
        }
        assert!(field.nodes()[0].pos.x > 100.0);
    }

    #[test]
    fn ring_nodes_stay_near_anchor() {
        let config = FieldConfig::ring();
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 5);
        populate(&mut field, &config);
        let pointer = pointer_at(400.0, 300.0);
        for _ in 0..2000 {
            step_field(&mut field, &pointer, &config, false);
        }
        for n in field.iter() {
            let anchor = n.anchor.unwrap();
            assert!(n.pos.distance(anchor) < 30.0, "wandered {}", n.pos.distance(anchor));
        }
    }

    #[test]
    fn scatter_spawns_on_cadence_only() {
        let mut config = FieldConfig::pointer_follow();
        config.placement = Placement::Scatter(ScatterPlacement {
            initial_nodes: 0,
            ..Default::default()
        });
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        let pointer = pointer_at(400.0, 300.0);
        for _ in 0..19 {
            step_field(&mut field, &pointer, &config, false);
        }
        assert!(field.is_empty());
        step_field(&mut field, &pointer, &config, false);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn no_spawn_while_idle_or_stopped() {
        let mut config = FieldConfig::pointer_follow();
        config.placement = Placement::Scatter(ScatterPlacement {
            initial_nodes: 0,
            ..Default::default()
        });
        let mut field = NodeField::new(Bounds::new(800.0, 600.0), 1);
        let mut pointer = pointer_at(400.0, 300.0);
        for _ in 0..40 {
            step_field(&mut field, &pointer, &config, true);
        }
        pointer.left();
        for _ in 0..40 {
            step_field(&mut field, &pointer, &config, false);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn invariants_hold_for_every_preset() {
        for config in [
            FieldConfig::pointer_follow(),
            FieldConfig::hacker_trail(),
            FieldConfig::ring(),
        ] {
            let mut field = NodeField::new(Bounds::new(640.0, 480.0), 9);
            populate(&mut field, &config);
            for i in 0..600 {
                // Sweep the pointer across and beyond the surface.
                let x = (i as f32 * 7.0) % 900.0 - 100.0;
                let y = (i as f32 * 3.0) % 700.0 - 100.0;
                let pointer = pointer_at(x, y);
                if let Placement::Trail(trail) = &config.placement {
                    crate::systems::placement::drop_trail_node(
                        &mut field,
                        trail,
                        config.drift_speed,
                        Vec2::new(x, y),
                    );
                }
                step_field(&mut field, &pointer, &config, i > 400);
                let b = field.bounds();
                for n in field.iter() {
                    assert!(b.contains(n.pos), "escaped: {:?}", n.pos);
                    assert!((0.0..=1.0).contains(&n.alpha()));
                    assert!(n.radius() > 0.0);
                }
            }
        }
    }
}
