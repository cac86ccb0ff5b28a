use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::palette::{Rgba, ThemeMode};

/// How nodes are placed at (re)initialization and how new ones appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Placement {
    /// Nodes scattered over the surface, topped up near the pointer.
    Scatter(ScatterPlacement),
    /// Nodes anchored on a ring around the surface center.
    Ring(RingPlacement),
    /// Short-lived nodes dropped along the pointer's path.
    Trail(TrailPlacement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterPlacement {
    /// Nodes created at initialization.
    pub initial_nodes: usize,
    /// Min/max radius of initial nodes.
    pub initial_radius: (f32, f32),
    /// Steps between spawn checks.
    pub spawn_interval: u64,
    /// Spawn while fewer than this many nodes are visible.
    pub visible_floor: usize,
    /// Alpha above which a node counts as visible for the floor check.
    pub visible_alpha: f32,
    /// Never spawn beyond this many nodes.
    pub max_nodes: usize,
    /// Min/max spawn distance from the pointer.
    pub spawn_distance: (f32, f32),
    /// Min/max radius of spawned nodes.
    pub spawn_radius: (f32, f32),
}

impl Default for ScatterPlacement {
    fn default() -> Self {
        Self {
            initial_nodes: 12,
            initial_radius: (4.0, 6.0),
            spawn_interval: 20,
            visible_floor: 4,
            visible_alpha: 0.1,
            max_nodes: 20,
            spawn_distance: (80.0, 120.0),
            spawn_radius: (2.5, 4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingPlacement {
    /// Nodes on the ring.
    pub count: usize,
    /// Ring radius as a fraction of the smaller surface side.
    pub radius_fraction: f32,
    /// Fraction of the anchor offset closed each step.
    pub pull: f32,
    /// Min/max node radius.
    pub node_radius: (f32, f32),
}

impl Default for RingPlacement {
    fn default() -> Self {
        Self {
            count: 16,
            radius_fraction: 0.35,
            pull: 0.02,
            node_radius: (2.0, 4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailPlacement {
    /// Probability that a single pointer move drops a node.
    pub spawn_chance: f32,
    /// Min/max spawn distance from the pointer.
    pub spawn_distance: (f32, f32),
    /// Min/max node radius.
    pub node_radius: (f32, f32),
    /// Steps a node lives for.
    pub lifetime_steps: u32,
    /// Oldest nodes are evicted beyond this count.
    pub max_nodes: usize,
}

impl Default for TrailPlacement {
    fn default() -> Self {
        Self {
            spawn_chance: 0.8,
            spawn_distance: (15.0, 75.0),
            node_radius: (2.0, 5.0),
            lifetime_steps: 180,
            max_nodes: 100,
        }
    }
}

/// What happens to the previous frame's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClearMode {
    /// Wipe to transparent.
    Clear,
    /// Paint a translucent overlay, leaving motion trails.
    Fade { color: Rgba },
}

/// Tuning constants for one field. Per-step values assume 60 steps/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub placement: Placement,
    /// Pointer distance within which nodes light up (px).
    pub influence_radius: f32,
    /// Peak target alpha for a node right under the pointer.
    pub influence_gain: f32,
    /// Max distance between two nodes for a connecting line (px).
    pub connection_distance: f32,
    /// Line opacity scale.
    pub line_opacity: f32,
    pub line_width: f32,
    /// Initial per-axis velocity range (px/step), centered on zero.
    pub drift_speed: f32,
    /// Fraction of the alpha gap closed per step.
    pub alpha_easing: f32,
    /// Velocity nudge toward the pointer per step (0 disables).
    pub attraction: f32,
    /// Velocity multiplier per step.
    pub damping: f32,
    /// Glow halo radius as a multiple of node radius.
    pub glow_scale: f32,
    /// Glow halo opacity as a multiple of node alpha.
    pub glow_opacity: f32,
    /// Time without pointer movement before fading out (ms).
    pub idle_threshold_ms: f64,
    /// Alpha multiplier per step while idle.
    pub idle_decay: f32,
    /// Alpha below which a node is not drawn.
    pub visibility_epsilon: f32,
    pub clear: ClearMode,
    /// Simulation step length (ms).
    pub step_ms: f64,
    /// Cap on steps run for one frame after a long gap.
    pub max_steps_per_frame: u32,
    /// Start the loop on activation instead of waiting for the pointer.
    pub start_immediately: bool,
}

impl FieldConfig {
    /// Nodes scattered over the page, lit up by proximity to the cursor.
    pub fn pointer_follow() -> Self {
        Self {
            placement: Placement::Scatter(ScatterPlacement::default()),
            influence_radius: 150.0,
            influence_gain: 0.9,
            connection_distance: 120.0,
            line_opacity: 0.7,
            line_width: 1.5,
            drift_speed: 0.5,
            alpha_easing: 0.15,
            attraction: 0.0,
            damping: 1.0,
            glow_scale: 3.0,
            glow_opacity: 0.3,
            idle_threshold_ms: 2000.0,
            idle_decay: 0.95,
            visibility_epsilon: 0.01,
            clear: ClearMode::Clear,
            step_ms: 1000.0 / 60.0,
            max_steps_per_frame: 4,
            start_immediately: false,
        }
    }

    /// Red nodes dropped behind the cursor, drawn over a fading backdrop.
    pub fn hacker_trail() -> Self {
        Self {
            placement: Placement::Trail(TrailPlacement::default()),
            connection_distance: 150.0,
            line_opacity: 0.5,
            line_width: 1.0,
            drift_speed: 0.3,
            alpha_easing: 1.0,
            attraction: 0.02,
            damping: 0.99,
            glow_scale: 2.0,
            glow_opacity: 0.5,
            clear: ClearMode::Fade { color: Rgba::new(0.0, 0.0, 0.0, 0.05) },
            start_immediately: true,
            ..Self::pointer_follow()
        }
    }

    /// Nodes wandering around fixed slots on a ring.
    pub fn ring() -> Self {
        Self {
            placement: Placement::Ring(RingPlacement::default()),
            connection_distance: 130.0,
            line_opacity: 0.6,
            line_width: 1.0,
            drift_speed: 0.4,
            alpha_easing: 0.08,
            ..Self::pointer_follow()
        }
    }

    /// Parse a config from a JSON string. Missing fields take pointer-follow defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::pointer_follow()
    }
}

/// A named field config paired with the condition under which it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    PointerFollow,
    HackerTrail,
    Ring,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::PointerFollow, Self::HackerTrail, Self::Ring];

    pub fn name(self) -> &'static str {
        match self {
            Self::PointerFollow => "pointer-follow",
            Self::HackerTrail => "hacker-trail",
            Self::Ring => "ring",
        }
    }

    pub fn config(self) -> FieldConfig {
        match self {
            Self::PointerFollow => FieldConfig::pointer_follow(),
            Self::HackerTrail => FieldConfig::hacker_trail(),
            Self::Ring => FieldConfig::ring(),
        }
    }

    pub fn activation(self) -> Activation {
        match self {
            Self::PointerFollow | Self::Ring => Activation::DesktopPointer,
            Self::HackerTrail => Activation::Theme(ThemeMode::Hacker),
        }
    }
}

/// Returned when a preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePresetError(pub String);

impl fmt::Display for ParsePresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown preset {:?}", self.0)
    }
}

impl std::error::Error for ParsePresetError {}

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}
