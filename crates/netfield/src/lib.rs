//! Headless engine for a decorative particle-network overlay.
//!
//! Nodes drift over the page, light up near the pointer and link up with
//! their neighbours. The crate owns the simulation and produces a flat draw
//! list; a [`Host`] supplies input, frame callbacks and a [`Surface`].

pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::activation::{Activation, Capabilities};
pub use api::config::{
    ClearMode, FieldConfig, ParsePresetError, Placement, Preset, RingPlacement,
    ScatterPlacement, TrailPlacement,
};
pub use api::host::{Host, ListenerKind};
pub use api::overlay::Overlay;
pub use api::palette::{Palette, Rgba, Theme, ThemeMode};
pub use api::renderer::{FieldRenderer, TickOutcome};
pub use crate::core::field::{Bounds, NodeField};
pub use crate::core::node::{Lifetime, Node};
pub use crate::core::pointer::PointerState;
pub use crate::core::rng::Rng;
pub use crate::core::scheduler::{FrameScheduler, LoopState};
pub use crate::core::time::StepClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::draw::{DrawList, DrawOp, OpKind};
pub use renderer::traits::Surface;
pub use systems::render::{build_draw_list, connection_opacity};
pub use systems::update::{influence_alpha, step_field, StepOutcome};
