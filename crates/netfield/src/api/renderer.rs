use glam::Vec2;

use crate::api::config::{FieldConfig, Placement};
use crate::api::palette::Palette;
use crate::core::field::{Bounds, NodeField};
use crate::core::pointer::PointerState;
use crate::core::scheduler::{FrameScheduler, LoopState};
use crate::core::time::StepClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::draw::DrawList;
use crate::systems::placement::{drop_trail_node, populate};
use crate::systems::render::build_draw_list;
use crate::systems::update::{step_field, StepOutcome};

/// What a call to [`FieldRenderer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new draw list is ready and another frame was requested.
    Drawn,
    /// Everything faded out; the loop went idle without drawing.
    Paused,
    /// The loop was not running; nothing changed.
    Skipped,
}

/// One particle field: node state, pointer tracking, frame loop and draw list.
///
/// Owns all of its state; create one per activation and drop it on teardown.
/// While the loop runs, input is queued by [`push_input`](Self::push_input)
/// and applied at the start of [`tick`](Self::tick). A paused loop applies
/// resize and leave events as they arrive, so the queue never backs up.
pub struct FieldRenderer {
    config: FieldConfig,
    palette: Palette,
    field: NodeField,
    pointer: PointerState,
    input: InputQueue,
    clock: StepClock,
    scheduler: FrameScheduler,
    draw_list: DrawList,
}

impl FieldRenderer {
    pub fn new(config: FieldConfig, palette: Palette, width: f32, height: f32, seed: u64) -> Self {
        let mut field = NodeField::new(Bounds::new(width, height), seed);
        populate(&mut field, &config);
        let clock = StepClock::new(config.step_ms, config.max_steps_per_frame);

        Self {
            config,
            palette,
            field,
            pointer: PointerState::new(),
            input: InputQueue::new(),
            clock,
            scheduler: FrameScheduler::new(),
            draw_list: DrawList::new(),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Swap colors. Takes effect on the next drawn frame; no restart.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn field(&self) -> &NodeField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn loop_state(&self) -> LoopState {
        self.scheduler.state()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.has_pending_frame()
    }

    /// The most recently built frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Queue an input event. Returns true when the caller must request a frame.
    ///
    /// While the loop is idle nothing drains the queue, so events that do
    /// not wake it are applied on the spot.
    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.input.push(event);
        match event {
            InputEvent::PointerMove { .. } => self.wake(),
            InputEvent::PointerLeave | InputEvent::Resize { .. } => {
                if !self.scheduler.is_running() {
                    self.apply_input();
                }
                false
            }
        }
    }

    /// Start the loop without pointer input. Returns true when the caller
    /// must request a frame.
    pub fn wake(&mut self) -> bool {
        let requested = self.scheduler.wake();
        if requested {
            log::debug!("frame loop resumed");
        }
        requested
    }

    /// Stop the loop. Returns true when an outstanding frame must be cancelled.
    pub fn stop(&mut self) -> bool {
        self.input.clear();
        self.clock.reset();
        self.scheduler.stop()
    }

    fn apply_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerMove { x, y, at_ms } => {
                    let pos = Vec2::new(x, y);
                    self.pointer.moved(pos, at_ms);
                    if let Placement::Trail(trail) = &self.config.placement {
                        drop_trail_node(&mut self.field, trail, self.config.drift_speed, pos);
                    }
                }
                InputEvent::PointerLeave => self.pointer.left(),
                InputEvent::Resize { width, height } => {
                    self.field.set_bounds(Bounds::new(width, height));
                    // Ring slots depend on the surface size; other layouts
                    // just get pulled back inside.
                    if matches!(self.config.placement, Placement::Ring(_)) {
                        populate(&mut self.field, &self.config);
                    } else {
                        self.field.contain_all();
                    }
                }
            }
        }
    }

    /// Run one display frame at `now_ms`: apply input, advance the
    /// simulation, and rebuild the draw list.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        self.scheduler.frame_fired();
        if !self.scheduler.is_running() {
            return TickOutcome::Skipped;
        }

        self.apply_input();
        if self.config.start_immediately {
            self.pointer.start_idle_clock(now_ms);
        }

        let idle = self.pointer.is_idle(now_ms, self.config.idle_threshold_ms);
        if idle {
            if self.pointer.moving {
                self.pointer.moving = false;
                log::debug!("pointer idle, fading out");
            }
            // Holds even when this frame runs no steps.
            for node in self.field.iter_mut() {
                node.set_target_alpha(0.0);
            }
        }

        let steps = self.clock.advance(now_ms);
        let mut outcome = StepOutcome::Active;
        for _ in 0..steps {
            outcome = step_field(&mut self.field, &self.pointer, &self.config, idle);
            if outcome == StepOutcome::Faded {
                break;
            }
        }

        if outcome == StepOutcome::Faded {
            self.scheduler.pause();
            self.clock.reset();
            log::debug!("frame loop paused after idle fade");
            return TickOutcome::Paused;
        }

        build_draw_list(&self.field, &self.palette, &self.config, &mut self.draw_list);
        self.scheduler.request();
        TickOutcome::Drawn
    }
}
