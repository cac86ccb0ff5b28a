//! Colors the field is painted with, and the theme → palette mapping.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color, channels in [0, 1].
///
/// Deserializes from either `"#rrggbb"` / `"#rrggbbaa"` or `{ "r", "g", "b", "a" }`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "RgbaRepr")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 0-255 channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// 0-255 channels with a float alpha, the way CSS `rgba()` spells it.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb8(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba8(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Same color with alpha multiplied by `factor` (clamped to [0, 1]).
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string, e.g. `rgba(168, 85, 247, 0.3)`.
    pub fn to_css(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            c(self.r),
            c(self.g),
            c(self.b),
            (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbaRepr {
    Hex(String),
    Channels {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

impl TryFrom<RgbaRepr> for Rgba {
    type Error = String;

    fn try_from(repr: RgbaRepr) -> Result<Self, Self::Error> {
        match repr {
            RgbaRepr::Hex(s) => Rgba::from_hex(&s).ok_or_else(|| format!("invalid hex color {:?}", s)),
            RgbaRepr::Channels { r, g, b, a } => Ok(Rgba::new(
                r.clamp(0.0, 1.0),
                g.clamp(0.0, 1.0),
                b.clamp(0.0, 1.0),
                a.clamp(0.0, 1.0),
            )),
        }
    }
}

/// The three colors the field is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Node cores.
    pub primary: Rgba,
    /// Connection lines.
    pub line: Rgba,
    /// Soft halo behind each node.
    pub glow: Rgba,
}

impl Palette {
    /// Default theme on a dark background: violet.
    pub fn violet_dark() -> Self {
        let violet = Rgba::rgb8(168, 85, 247);
        Self { primary: violet, line: violet, glow: violet }
    }

    /// Default theme on a light background: a deeper violet that reads on white.
    pub fn violet_light() -> Self {
        let violet = Rgba::rgb8(124, 58, 237);
        Self { primary: violet, line: violet, glow: violet }
    }

    /// Hacker theme: red cores and lines with a strong red glow.
    pub fn hacker() -> Self {
        Self {
            primary: Rgba::rgb8(0xcc, 0x00, 0x00),
            line: Rgba::rgb8(0xff, 0x00, 0x00),
            glow: Rgba::rgba8(204, 0, 0, 0.8),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match (theme.mode, theme.dark) {
            (ThemeMode::Hacker, _) => Self::hacker(),
            (ThemeMode::Default, true) => Self::violet_dark(),
            (ThemeMode::Default, false) => Self::violet_light(),
        }
    }

    /// Parse a palette from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::violet_dark()
    }
}

/// Site-wide theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Default,
    Hacker,
}

/// The host's current theme selection, as the overlay sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub dark: bool,
    pub mode: ThemeMode,
}

impl Default for Theme {
    fn default() -> Self {
        Self { dark: true, mode: ThemeMode::Default }
    }
}
