use glam::Vec2;

use super::node::Node;
use super::rng::Rng;

/// Drawing surface extent in pixels. Positions are valid in [0, width] × [0, height].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let x = if p.x.is_nan() { 0.0 } else { p.x.clamp(0.0, self.width) };
        let y = if p.y.is_nan() { 0.0 } else { p.y.clamp(0.0, self.height) };
        Vec2::new(x, y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// The working set of nodes plus everything needed to advance it.
/// Flat Vec storage in spawn order, so index 0 is always the oldest node.
pub struct NodeField {
    nodes: Vec<Node>,
    bounds: Bounds,
    pub rng: Rng,
    /// Simulation steps run since creation.
    steps: u64,
}

impl NodeField {
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        Self {
            nodes: Vec::with_capacity(32),
            bounds,
            rng: Rng::new(seed),
            steps: 0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn retain<F: FnMut(&mut Node) -> bool>(&mut self, f: F) {
        self.nodes.retain_mut(f);
    }

    /// Clamp every node into the current bounds.
    pub fn contain_all(&mut self) {
        let bounds = self.bounds;
        for node in &mut self.nodes {
            node.contain(bounds);
        }
    }

    /// Drop the oldest nodes until at most `max` remain.
    pub fn evict_oldest(&mut self, max: usize) -> usize {
        let excess = self.nodes.len().saturating_sub(max);
        self.nodes.drain(..excess);
        excess
    }

    /// Count nodes with alpha above `threshold`.
    pub fn visible_count(&self, threshold: f32) -> usize {
        self.nodes.iter().filter(|n| n.is_visible(threshold)).count()
    }

    /// True once no node is visible above `epsilon`.
    pub fn all_faded(&self, epsilon: f32) -> bool {
        self.nodes.iter().all(|n| !n.is_visible(epsilon))
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn count_step(&mut self) -> u64 {
        self.steps += 1;
        self.steps
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_at(x: f32) -> Node {
        Node::new(Vec2::new(x, 0.0), Vec2::ZERO, 2.0)
    }

    #[test]
    fn bounds_sanitize() {
        let b = Bounds::new(-5.0, f32::NAN);
        assert_eq!(b.width, 0.0);
        assert_eq!(b.height, 0.0);
    }

    #[test]
    fn bounds_clamp() {
        let b = Bounds::new(800.0, 600.0);
        assert_eq!(b.clamp(Vec2::new(-10.0, 700.0)), Vec2::new(0.0, 600.0));
        assert_eq!(b.clamp(Vec2::new(f32::NAN, 10.0)), Vec2::new(0.0, 10.0));
        assert!(b.contains(Vec2::new(800.0, 600.0)));
        assert!(!b.contains(Vec2::new(800.1, 0.0)));
    }

    #[test]
    fn evict_oldest_keeps_newest() {
        let mut field = NodeField::new(Bounds::new(100.0, 100.0), 1);
        for i in 0..5 {
            field.push(node_at(i as f32));
        }
        assert_eq!(field.evict_oldest(3), 2);
        let xs: Vec<f32> = field.iter().map(|n| n.pos.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(field.evict_oldest(10), 0);
    }

    #[test]
    fn empty_field_is_faded() {
        let field = NodeField::new(Bounds::new(100.0, 100.0), 1);
        assert!(field.all_faded(0.01));
        assert_eq!(field.visible_count(0.1), 0);
    }

    #[test]
    fn visible_count_uses_threshold() {
        let mut field = NodeField::new(Bounds::new(100.0, 100.0), 1);
        field.push(node_at(1.0).with_alpha(0.05));
        field.push(node_at(2.0).with_alpha(0.5));
        assert_eq!(field.visible_count(0.1), 1);
        assert!(!field.all_faded(0.01));
    }
}
