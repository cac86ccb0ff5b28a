use crate::api::config::FieldConfig;
use crate::api::host::{Host, ListenerKind};
use crate::api::palette::{Palette, Theme};
use crate::api::renderer::{FieldRenderer, TickOutcome};
use crate::input::queue::InputEvent;
use crate::renderer::traits::Surface;

/// Binds a [`FieldRenderer`] to a [`Host`] for as long as it is active.
///
/// Activation acquires the surface, registers listeners and builds a fresh
/// renderer; deactivation (or drop) cancels the pending frame, removes every
/// listener and discards the renderer in one step.
pub struct Overlay<H: Host> {
    host: H,
    config: FieldConfig,
    palette: Palette,
    seed: u64,
    surface: Option<H::Surface>,
    renderer: Option<FieldRenderer>,
}

impl<H: Host> Overlay<H> {
    pub fn new(host: H, config: FieldConfig, palette: Palette, seed: u64) -> Self {
        Self {
            host,
            config,
            palette,
            seed,
            surface: None,
            renderer: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn renderer(&self) -> Option<&FieldRenderer> {
        self.renderer.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Turn the effect on or off. Repeated calls with the same value are no-ops,
    /// except that `true` retries setup if the surface was unavailable last time.
    pub fn set_active(&mut self, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }

    fn activate(&mut self) {
        if self.renderer.is_some() {
            return;
        }
        let Some(mut surface) = self.host.acquire_surface() else {
            log::warn!("drawing surface unavailable, overlay stays off until re-activated");
            return;
        };

        let (width, height) = self.host.viewport();
        surface.resize(width as u32, height as u32);
        for kind in ListenerKind::ALL {
            self.host.listen(kind);
        }

        let mut renderer = FieldRenderer::new(self.config.clone(), self.palette, width, height, self.seed);
        // Each activation gets a different layout.
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        if self.config.start_immediately && renderer.wake() {
            self.host.request_frame();
        }

        log::info!(
            "overlay active on {} surface {}x{} ({} nodes)",
            surface.backend(),
            width,
            height,
            renderer.field().len()
        );
        self.surface = Some(surface);
        self.renderer = Some(renderer);
    }

    fn deactivate(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            if renderer.stop() {
                self.host.cancel_frame();
            }
            log::info!("overlay torn down");
        }
        for kind in ListenerKind::ALL {
            self.host.unlisten(kind);
        }
        if let Some(mut surface) = self.surface.take() {
            surface.clear();
        }
    }

    /// Replace the palette. Running animations pick it up on the next frame.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        if let Some(renderer) = &mut self.renderer {
            renderer.set_palette(palette);
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.set_palette(Palette::for_theme(theme));
    }

    fn push(&mut self, event: InputEvent) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if renderer.push_input(event) {
            self.host.request_frame();
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, at_ms: f64) {
        self.push(InputEvent::PointerMove { x, y, at_ms });
    }

    pub fn pointer_left(&mut self) {
        self.push(InputEvent::PointerLeave);
    }

    /// The viewport changed. Resizes the surface now; nodes follow on the next tick.
    pub fn resized(&mut self, width: f32, height: f32) {
        if self.renderer.is_none() {
            return;
        }
        if let Some(surface) = &mut self.surface {
            surface.resize(width as u32, height as u32);
        }
        self.push(InputEvent::Resize { width, height });
    }

    /// Display-refresh callback.
    pub fn frame(&mut self, now_ms: f64) {
        let (Some(renderer), Some(surface)) = (&mut self.renderer, &mut self.surface) else {
            return;
        };
        match renderer.tick(now_ms) {
            TickOutcome::Drawn => {
                surface.replay(renderer.draw_list());
                self.host.request_frame();
            }
            TickOutcome::Paused | TickOutcome::Skipped => {}
        }
    }
}

impl<H: Host> Drop for Overlay<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
