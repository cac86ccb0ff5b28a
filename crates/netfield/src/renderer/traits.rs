//! Drawing surface contract.
//!
//! The core never touches pixels. A `Surface` replays the frame's draw list;
//! the web crate implements it on a 2D canvas context, tests implement it
//! with call counters.

use glam::Vec2;

use super::draw::{DrawList, OpKind};
use crate::api::palette::Rgba;

pub trait Surface {
    /// Backend identifier (e.g., "canvas2d", "mock").
    fn backend(&self) -> &'static str;

    /// Resize the backing store. Implementations may lose pixels doing so.
    fn resize(&mut self, width: u32, height: u32);

    /// Wipe to transparent.
    fn clear(&mut self);

    /// Fill the whole surface with `color` (motion trails).
    fn fade(&mut self, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Paint a whole frame.
    fn replay(&mut self, list: &DrawList) {
        for op in list.iter() {
            match op.kind() {
                Some(OpKind::Clear) => self.clear(),
                Some(OpKind::Fade) => self.fade(op.color),
                Some(OpKind::Circle) => self.fill_circle(op.start(), op.size, op.color),
                Some(OpKind::Line) => self.stroke_line(op.start(), op.end(), op.size, op.color),
                None => log::warn!("skipping draw op with unknown kind {}", op.kind),
            }
        }
    }
}

/// Call-counting surface for tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct SurfaceCalls {
        pub resizes: Vec<(u32, u32)>,
        pub clears: usize,
        pub fades: usize,
        pub circles: usize,
        pub lines: usize,
    }

    impl SurfaceCalls {
        pub fn draws(&self) -> usize {
            self.clears + self.fades + self.circles + self.lines
        }
    }

    /// Shares its counters so tests can inspect them after the surface is gone.
    #[derive(Clone, Default)]
    pub struct MockSurface {
        pub calls: Rc<RefCell<SurfaceCalls>>,
    }

    impl Surface for MockSurface {
        fn backend(&self) -> &'static str {
            "mock"
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.calls.borrow_mut().resizes.push((width, height));
        }

        fn clear(&mut self) {
            self.calls.borrow_mut().clears += 1;
        }

        fn fade(&mut self, _color: Rgba) {
            self.calls.borrow_mut().fades += 1;
        }

        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgba) {
            self.calls.borrow_mut().circles += 1;
        }

        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgba) {
            self.calls.borrow_mut().lines += 1;
        }
    }
}
