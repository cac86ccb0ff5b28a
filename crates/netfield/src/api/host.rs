use crate::renderer::traits::Surface;

/// Host events the overlay subscribes to while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerLeave,
    Resize,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 3] = [Self::PointerMove, Self::PointerLeave, Self::Resize];
}

/// The environment an overlay runs in: input subscriptions, a display-synced
/// frame callback, and the drawing surface.
///
/// `listen`/`unlisten` and `request_frame`/`cancel_frame` must be idempotent:
/// removing a listener that was never added, or cancelling with no frame
/// outstanding, is a no-op.
pub trait Host {
    type Surface: Surface;

    /// Acquire the drawing surface. `None` when it is not available yet
    /// (element not mounted, context refused).
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    /// Current viewport size in surface pixels.
    fn viewport(&self) -> (f32, f32);

    fn listen(&mut self, kind: ListenerKind);

    fn unlisten(&mut self, kind: ListenerKind);

    /// Ask for one frame callback at the next display refresh.
    fn request_frame(&mut self);

    /// Cancel the outstanding frame callback, if any.
    fn cancel_frame(&mut self);
}
