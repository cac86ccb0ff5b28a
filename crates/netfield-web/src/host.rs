use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Weak;

use netfield::{Host, ListenerKind, Overlay};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::surface::CanvasSurface;

pub type SharedOverlay = RefCell<Overlay<WebHost>>;

/// Run `f` against the overlay if it is still alive and not already borrowed.
/// A browser callback that fires while the overlay is mid-call is dropped.
fn with_overlay(weak: &Weak<SharedOverlay>, f: impl FnOnce(&mut Overlay<WebHost>)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut overlay) = shared.try_borrow_mut() else {
        log::debug!("overlay busy, dropping browser callback");
        return;
    };
    f(&mut overlay);
}

/// The JS closures handed to the browser. They hold only a weak reference, so
/// the overlay is freed as soon as its owner lets go.
pub struct Callbacks {
    pointer_move: Closure<dyn FnMut(MouseEvent)>,
    pointer_leave: Closure<dyn FnMut(MouseEvent)>,
    resize: Closure<dyn FnMut()>,
    frame: Closure<dyn FnMut(f64)>,
}

impl Callbacks {
    pub fn new(overlay: Weak<SharedOverlay>) -> Self {
        let weak = overlay.clone();
        let pointer_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            with_overlay(&weak, |o| {
                o.pointer_moved(event.client_x() as f32, event.client_y() as f32, event.time_stamp())
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        // `mouseout` with no related target means the pointer left the window.
        let weak = overlay.clone();
        let pointer_leave = Closure::wrap(Box::new(move |event: MouseEvent| {
            if event.related_target().is_none() {
                with_overlay(&weak, |o| o.pointer_left());
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let weak = overlay.clone();
        let resize = Closure::wrap(Box::new(move || {
            with_overlay(&weak, |o| {
                let (width, height) = o.host().viewport();
                o.resized(width, height);
            });
        }) as Box<dyn FnMut()>);

        let weak = overlay;
        let frame = Closure::wrap(Box::new(move |now_ms: f64| {
            with_overlay(&weak, |o| {
                o.host_mut().frame_fired();
                o.frame(now_ms);
            });
        }) as Box<dyn FnMut(f64)>);

        Self {
            pointer_move,
            pointer_leave,
            resize,
            frame,
        }
    }

    fn listener(&self, kind: ListenerKind) -> (&'static str, &js_sys::Function) {
        match kind {
            ListenerKind::PointerMove => ("mousemove", self.pointer_move.as_ref().unchecked_ref()),
            ListenerKind::PointerLeave => ("mouseout", self.pointer_leave.as_ref().unchecked_ref()),
            ListenerKind::Resize => ("resize", self.resize.as_ref().unchecked_ref()),
        }
    }
}

/// Browser-side [`Host`]: window listeners, `requestAnimationFrame` and a
/// canvas element.
pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    callbacks: Option<Callbacks>,
    listening: HashSet<ListenerKind>,
    raf_id: Option<i32>,
}

impl WebHost {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        Self {
            window,
            canvas,
            callbacks: None,
            listening: HashSet::new(),
            raf_id: None,
        }
    }

    /// Callbacks need a handle to the overlay that owns this host, so they
    /// are installed after construction.
    pub fn install(&mut self, callbacks: Callbacks) {
        self.callbacks = Some(callbacks);
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn frame_fired(&mut self) {
        self.raf_id = None;
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn acquire_surface(&mut self) -> Option<CanvasSurface> {
        CanvasSurface::from_canvas(&self.canvas)
    }

    fn viewport(&self) -> (f32, f32) {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        (
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn listen(&mut self, kind: ListenerKind) {
        if self.listening.contains(&kind) {
            return;
        }
        let Some(callbacks) = &self.callbacks else {
            log::warn!("no callbacks installed, cannot listen for {:?}", kind);
            return;
        };
        let (event, handler) = callbacks.listener(kind);
        match self.window.add_event_listener_with_callback(event, handler) {
            Ok(()) => {
                self.listening.insert(kind);
            }
            Err(err) => log::warn!("addEventListener({}) failed: {:?}", event, err),
        }
    }

    fn unlisten(&mut self, kind: ListenerKind) {
        if !self.listening.remove(&kind) {
            return;
        }
        let Some(callbacks) = &self.callbacks else {
            return;
        };
        let (event, handler) = callbacks.listener(kind);
        if let Err(err) = self.window.remove_event_listener_with_callback(event, handler) {
            log::warn!("removeEventListener({}) failed: {:?}", event, err);
        }
    }

    fn request_frame(&mut self) {
        if self.raf_id.is_some() {
            return;
        }
        let Some(callbacks) = &self.callbacks else {
            return;
        };
        match self
            .window
            .request_animation_frame(callbacks.frame.as_ref().unchecked_ref())
        {
            Ok(id) => self.raf_id = Some(id),
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
    }
}
