use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::palette::Rgba;

/// Draw operation kinds, stored as `DrawOp::kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpKind {
    /// Wipe the surface to transparent.
    Clear = 0,
    /// Fill the whole surface with a translucent color.
    Fade = 1,
    /// Filled circle at (x0, y0) with radius `size`.
    Circle = 2,
    /// Line from (x0, y0) to (x1, y1) with width `size`.
    Line = 3,
}

impl OpKind {
    pub fn from_f32(v: f32) -> Option<Self> {
        match v as u8 {
            0 => Some(Self::Clear),
            1 => Some(Self::Fade),
            2 => Some(Self::Circle),
            3 => Some(Self::Line),
            _ => None,
        }
    }
}

/// One flat draw record. Host-side renderers can read the whole list as a
/// single f32 buffer: 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawOp {
    pub kind: f32,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Circle radius or line width.
    pub size: f32,
    pub color: Rgba,
}

impl DrawOp {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn kind(&self) -> Option<OpKind> {
        OpKind::from_f32(self.kind)
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x0, self.y0)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }
}

/// Everything to draw for one frame, in paint order.
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            ops: Vec::with_capacity(256),
        }
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn clear_surface(&mut self) {
        self.ops.push(DrawOp {
            kind: OpKind::Clear as u8 as f32,
            ..Default::default()
        });
    }

    pub fn fade(&mut self, color: Rgba) {
        self.ops.push(DrawOp {
            kind: OpKind::Fade as u8 as f32,
            color,
            ..Default::default()
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp {
            kind: OpKind::Circle as u8 as f32,
            x0: center.x,
            y0: center.y,
            size: radius,
            color,
            ..Default::default()
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ops.push(DrawOp {
            kind: OpKind::Line as u8 as f32,
            x0: from.x,
            y0: from.y,
            x1: to.x,
            y1: to.y,
            size: width,
            color,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn count(&self, kind: OpKind) -> usize {
        self.ops.iter().filter(|op| op.kind() == Some(kind)).count()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The list as a flat f32 slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.ops)
    }

    /// Raw pointer to op data for shared-memory reads.
    pub fn ops_ptr(&self) -> *const f32 {
        self.ops.as_ptr() as *const f32
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_op_is_10_floats() {
        assert_eq!(std::mem::size_of::<DrawOp>(), DrawOp::STRIDE_BYTES);
    }

    #[test]
    fn ops_decode_kind() {
        let mut list = DrawList::new();
        list.clear_surface();
        list.circle(Vec2::new(1.0, 2.0), 3.0, Rgba::BLACK);
        list.line(Vec2::ZERO, Vec2::ONE, 1.5, Rgba::BLACK);
        let kinds: Vec<_> = list.iter().map(|op| op.kind()).collect();
        assert_eq!(kinds, vec![Some(OpKind::Clear), Some(OpKind::Circle), Some(OpKind::Line)]);
        assert_eq!(list.count(OpKind::Circle), 1);
    }

    #[test]
    fn flat_view_matches_layout() {
        let mut list = DrawList::new();
        list.circle(Vec2::new(5.0, 6.0), 2.0, Rgba::new(0.1, 0.2, 0.3, 0.4));
        let floats = list.as_floats();
        assert_eq!(floats.len(), DrawOp::FLOATS);
        assert_eq!(floats[0], OpKind::Circle as u8 as f32);
        assert_eq!(&floats[1..3], &[5.0, 6.0]);
        assert_eq!(floats[5], 2.0);
        assert_eq!(floats[9], 0.4);
    }

    #[test]
    fn unknown_kind_decodes_to_none() {
        let op = DrawOp { kind: 9.0, ..Default::default() };
        assert_eq!(op.kind(), None);
    }
}
