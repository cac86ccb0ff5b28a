//! WASM bridge: runs a netfield overlay on a page canvas, driven by
//! `requestAnimationFrame` and window pointer/resize events.
//!
//! ```js
//! const overlay = new NetworkOverlay(canvas, "pointer-follow", 0);
//! overlay.set_theme(isDark, isHacker);
//! overlay.activate_if_supported();
//! // on unmount
//! overlay.free();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use netfield::{Capabilities, FieldConfig, Overlay, Palette, Preset, Theme, ThemeMode};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod capability;
pub mod host;
pub mod surface;

pub use host::{Callbacks, SharedOverlay, WebHost};
pub use surface::CanvasSurface;

/// Full-viewport, click-through, behind page content.
const CANVAS_STYLE: &str =
    "position:fixed;inset:0;width:100%;height:100%;pointer-events:none;background:transparent;z-index:0";

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Zero means "pick one".
fn resolve_seed(seed: f64) -> u64 {
    if seed > 0.0 && seed.is_finite() {
        seed as u64
    } else {
        (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
    }
}

/// Detected device capabilities, exported for the page.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceCapabilities {
    pub hover: bool,
    pub fine_pointer: bool,
    pub touch_user_agent: bool,
}

#[wasm_bindgen]
impl DeviceCapabilities {
    /// Hovering, precise pointer and not a phone or tablet.
    pub fn desktop_pointer(&self) -> bool {
        Capabilities::from(*self).is_desktop_pointer()
    }
}

impl From<DeviceCapabilities> for Capabilities {
    fn from(caps: DeviceCapabilities) -> Self {
        Capabilities {
            hover: caps.hover,
            fine_pointer: caps.fine_pointer,
            touch_user_agent: caps.touch_user_agent,
        }
    }
}

impl From<Capabilities> for DeviceCapabilities {
    fn from(caps: Capabilities) -> Self {
        DeviceCapabilities {
            hover: caps.hover,
            fine_pointer: caps.fine_pointer,
            touch_user_agent: caps.touch_user_agent,
        }
    }
}

#[wasm_bindgen]
pub fn detect_capabilities() -> DeviceCapabilities {
    web_sys::window()
        .map(|window| capability::detect(&window).into())
        .unwrap_or_default()
}

/// JS handle to one overlay. Dropping it (`free()`) tears the overlay down.
#[wasm_bindgen]
pub struct NetworkOverlay {
    inner: Rc<SharedOverlay>,
    preset: Preset,
    theme: Theme,
    /// Set by `activate_if_supported`: theme changes re-check the activation rule.
    auto: bool,
}

#[wasm_bindgen]
impl NetworkOverlay {
    /// Create an inactive overlay on `canvas` using a named preset
    /// (`pointer-follow`, `hacker-trail`, `ring`).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, preset: &str, seed: f64) -> Result<NetworkOverlay, JsValue> {
        let preset: Preset = preset.parse().map_err(js_error)?;
        Self::build(canvas, preset, preset.config(), seed)
    }

    /// Like `new`, but with a JSON `FieldConfig`. Fields left out keep their
    /// defaults; the preset still decides activation.
    pub fn with_config(
        canvas: HtmlCanvasElement,
        preset: &str,
        config_json: &str,
        seed: f64,
    ) -> Result<NetworkOverlay, JsValue> {
        let preset: Preset = preset.parse().map_err(js_error)?;
        let config = FieldConfig::from_json(config_json).map_err(js_error)?;
        Self::build(canvas, preset, config, seed)
    }

    /// Switch palettes. In auto mode this may also turn the overlay on or off.
    pub fn set_theme(&mut self, dark: bool, hacker: bool) {
        let mode = if hacker { ThemeMode::Hacker } else { ThemeMode::Default };
        self.theme = Theme { dark, mode };
        let theme = self.theme;
        self.with(|o| o.set_theme(theme));
        if self.auto {
            self.reevaluate();
        }
    }

    /// Override the palette with JSON: `{"primary": "#rrggbb", "line": ..., "glow": ...}`.
    pub fn set_palette_json(&self, json: &str) -> Result<(), JsValue> {
        let palette = Palette::from_json(json).map_err(js_error)?;
        self.with(|o| o.set_palette(palette));
        Ok(())
    }

    /// Force the overlay on or off. Leaves auto mode.
    pub fn set_active(&mut self, active: bool) {
        self.auto = false;
        self.with(|o| o.set_active(active));
    }

    /// Turn the overlay on when the preset's rule accepts this device and
    /// theme, off otherwise. Theme changes re-check the rule from here on.
    pub fn activate_if_supported(&mut self) -> bool {
        self.auto = true;
        self.reevaluate()
    }

    pub fn is_active(&self) -> bool {
        self.with(|o| o.is_active()).unwrap_or(false)
    }

    /// Live node count (0 while inactive).
    pub fn node_count(&self) -> u32 {
        self.with(|o| o.renderer().map(|r| r.field().len() as u32))
            .flatten()
            .unwrap_or(0)
    }

    /// Pointer to the last frame's draw ops, `DrawOp::FLOATS` floats each.
    pub fn draw_ops_ptr(&self) -> *const f32 {
        self.with(|o| o.renderer().map(|r| r.draw_list().ops_ptr()))
            .flatten()
            .unwrap_or(std::ptr::null())
    }

    pub fn draw_op_count(&self) -> u32 {
        self.with(|o| o.renderer().map(|r| r.draw_list().len() as u32))
            .flatten()
            .unwrap_or(0)
    }
}

impl NetworkOverlay {
    fn build(
        canvas: HtmlCanvasElement,
        preset: Preset,
        config: FieldConfig,
        seed: f64,
    ) -> Result<NetworkOverlay, JsValue> {
        init_logging();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        canvas.set_attribute("style", CANVAS_STYLE)?;

        let theme = Theme::default();
        let host = WebHost::new(window, canvas);
        let overlay = Overlay::new(host, config, Palette::for_theme(theme), resolve_seed(seed));
        let inner = Rc::new(RefCell::new(overlay));
        let callbacks = Callbacks::new(Rc::downgrade(&inner));
        inner.borrow_mut().host_mut().install(callbacks);

        log::info!("netfield: {} overlay created", preset.name());
        Ok(Self {
            inner,
            preset,
            theme,
            auto: false,
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut Overlay<WebHost>) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut overlay) => Some(f(&mut overlay)),
            Err(_) => {
                log::warn!("overlay busy, call ignored");
                None
            }
        }
    }

    fn reevaluate(&self) -> bool {
        let caps = self
            .with(|o| capability::detect(o.host().window()))
            .unwrap_or_default();
        let on = self.preset.activation().should_activate(&caps, &self.theme);
        self.with(|o| o.set_active(on));
        on
    }
}
