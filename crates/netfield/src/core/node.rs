use glam::Vec2;

use super::field::Bounds;

/// Remaining and total lifetime of an expiring node, in simulation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    pub remaining: u32,
    pub total: u32,
}

impl Lifetime {
    pub fn new(steps: u32) -> Self {
        let steps = steps.max(1);
        Self { remaining: steps, total: steps }
    }

    /// Fraction of life left, 1.0 when fresh and 0.0 when expired.
    pub fn fraction(&self) -> f32 {
        self.remaining as f32 / self.total as f32
    }
}

/// A single point in the field.
///
/// Positions are surface pixels. `alpha` and `target_alpha` are kept in
/// [0, 1] by every mutator, and `radius` is always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    alpha: f32,
    target_alpha: f32,
    /// Set only for nodes that expire (trail placement).
    pub life: Option<Lifetime>,
    /// Set only for nodes that wander around a fixed point (ring placement).
    pub anchor: Option<Vec2>,
}

impl Node {
    pub const MIN_RADIUS: f32 = 0.1;

    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius: radius.max(Self::MIN_RADIUS),
            alpha: 0.0,
            target_alpha: 0.0,
            life: None,
            anchor: None,
        }
    }

    // -- Builder pattern --

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = clamp_unit(alpha);
        self
    }

    pub fn with_lifetime(mut self, steps: u32) -> Self {
        self.life = Some(Lifetime::new(steps));
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = Some(anchor);
        self
    }

    // -- Accessors --

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn target_alpha(&self) -> f32 {
        self.target_alpha
    }

    pub fn is_visible(&self, epsilon: f32) -> bool {
        self.alpha > epsilon
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }

    // -- Opacity --

    pub fn set_target_alpha(&mut self, target: f32) {
        self.target_alpha = clamp_unit(target);
    }

    /// Move `alpha` a fraction of the way toward `target_alpha`.
    pub fn ease_alpha(&mut self, easing: f32) {
        let easing = easing.clamp(0.0, 1.0);
        self.alpha = clamp_unit(self.alpha + (self.target_alpha - self.alpha) * easing);
    }

    /// Idle fade: target drops to zero and alpha decays geometrically.
    pub fn fade(&mut self, decay: f32) {
        self.target_alpha = 0.0;
        self.alpha = clamp_unit(self.alpha * decay.clamp(0.0, 1.0));
    }

    // -- Motion --

    /// Nudge velocity toward `point` when within `radius`.
    pub fn attract(&mut self, point: Vec2, radius: f32, strength: f32) {
        let delta = point - self.pos;
        let dist = delta.length();
        if dist < radius && dist > 0.0 {
            self.vel += delta / dist * strength;
        }
    }

    pub fn damp(&mut self, damping: f32) {
        self.vel *= damping;
    }

    /// Ease position back toward the anchor, if any.
    pub fn pull_to_anchor(&mut self, pull: f32) {
        if let Some(anchor) = self.anchor {
            self.pos += (anchor - self.pos) * pull.clamp(0.0, 1.0);
        }
    }

    /// Drift by velocity, reflecting off and clamping to the surface edges.
    pub fn integrate(&mut self, bounds: Bounds) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > bounds.width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.height {
            self.vel.y = -self.vel.y;
        }
        self.contain(bounds);
    }

    /// Clamp position into the surface. NaN positions collapse to the origin.
    pub fn contain(&mut self, bounds: Bounds) {
        self.pos = bounds.clamp(self.pos);
    }

    // -- Lifetime --

    /// Count one step off the lifetime. Returns false once expired.
    /// Nodes without a lifetime never expire.
    pub fn age(&mut self) -> bool {
        match &mut self.life {
            Some(life) => {
                life.remaining = life.remaining.saturating_sub(1);
                life.remaining > 0
            }
            None => true,
        }
    }

    /// Opacity derived from remaining life (trail nodes fade as they age).
    pub fn life_alpha(&self) -> Option<f32> {
        self.life.map(|l| l.fraction())
    }

    pub(crate) fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_unit(alpha);
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn new_node_is_invisible() {
        let n = Node::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 4.0);
        assert_eq!(n.alpha(), 0.0);
        assert_eq!(n.target_alpha(), 0.0);
        assert!(!n.is_visible(0.01));
    }

    #[test]
    fn radius_is_always_positive() {
        let n = Node::new(Vec2::ZERO, Vec2::ZERO, -3.0);
        assert!(n.radius() > 0.0);
    }

    #[test]
    fn ease_alpha_moves_geometrically() {
        let mut n = Node::new(Vec2::ZERO, Vec2::ZERO, 4.0);
        n.set_target_alpha(1.0);
        n.ease_alpha(0.15);
        assert!((n.alpha() - 0.15).abs() < 1e-6);
        n.ease_alpha(0.15);
        assert!((n.alpha() - (0.15 + 0.85 * 0.15)).abs() < 1e-6);
    }

    #[test]
    fn alpha_is_clamped() {
        let mut n = Node::new(Vec2::ZERO, Vec2::ZERO, 4.0).with_alpha(3.0);
        assert_eq!(n.alpha(), 1.0);
        n.set_target_alpha(-2.0);
        assert_eq!(n.target_alpha(), 0.0);
        n.set_alpha(f32::NAN);
        assert_eq!(n.alpha(), 0.0);
    }

    #[test]
    fn fade_zeroes_target_and_decays() {
        let mut n = Node::new(Vec2::ZERO, Vec2::ZERO, 4.0).with_alpha(0.8);
        n.set_target_alpha(0.9);
        n.fade(0.95);
        assert_eq!(n.target_alpha(), 0.0);
        assert!((n.alpha() - 0.76).abs() < 1e-6);
    }

    #[test]
    fn integrate_reflects_at_right_edge() {
        let mut n = Node::new(Vec2::new(799.9, 300.0), Vec2::new(0.5, 0.0), 4.0);
        n.integrate(bounds());
        assert_eq!(n.pos.x, 800.0);
        assert!(n.vel.x < 0.0, "velocity should reflect");
    }

    #[test]
    fn integrate_reflects_at_top_edge() {
        let mut n = Node::new(Vec2::new(100.0, 0.1), Vec2::new(0.0, -0.5), 4.0);
        n.integrate(bounds());
        assert_eq!(n.pos.y, 0.0);
        assert!(n.vel.y > 0.0);
    }

    #[test]
    fn attract_pulls_toward_point() {
        let mut n = Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 4.0);
        n.attract(Vec2::new(150.0, 100.0), 150.0, 0.02);
        assert!(n.vel.x > 0.0);
        assert_eq!(n.vel.y, 0.0);
    }

    #[test]
    fn attract_ignores_far_and_coincident_points() {
        let mut n = Node::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 4.0);
        n.attract(Vec2::new(400.0, 100.0), 150.0, 0.02);
        n.attract(Vec2::new(100.0, 100.0), 150.0, 0.02);
        assert_eq!(n.vel, Vec2::ZERO);
    }

    #[test]
    fn pull_to_anchor_closes_distance() {
        let mut n = Node::new(Vec2::new(110.0, 100.0), Vec2::ZERO, 4.0)
            .with_anchor(Vec2::new(100.0, 100.0));
        n.pull_to_anchor(0.1);
        assert!((n.pos.x - 109.0).abs() < 1e-4);
    }

    #[test]
    fn age_expires_after_lifetime() {
        let mut n = Node::new(Vec2::ZERO, Vec2::ZERO, 4.0).with_lifetime(3);
        assert!(n.age());
        assert!(n.age());
        assert!(!n.age());
        assert_eq!(n.life_alpha(), Some(0.0));
    }

    #[test]
    fn nodes_without_lifetime_never_expire() {
        let mut n = Node::new(Vec2::ZERO, Vec2::ZERO, 4.0);
        for _ in 0..10_000 {
            assert!(n.age());
        }
        assert_eq!(n.life_alpha(), None);
    }
}
