use serde::{Deserialize, Serialize};

use super::palette::{Theme, ThemeMode};

/// What the host knows about the input device.
/// Gathered by the host (media queries, user agent); never detected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// `(hover: hover)` matches.
    pub hover: bool,
    /// `(pointer: fine)` matches.
    pub fine_pointer: bool,
    /// The user agent names a phone or tablet.
    pub touch_user_agent: bool,
}

impl Capabilities {
    /// User-agent fragments that mark a touch device.
    pub const TOUCH_AGENTS: [&'static str; 8] = [
        "Android",
        "webOS",
        "iPhone",
        "iPad",
        "iPod",
        "BlackBerry",
        "IEMobile",
        "Opera Mini",
    ];

    /// Case-insensitive match against [`Self::TOUCH_AGENTS`].
    pub fn is_touch_agent(user_agent: &str) -> bool {
        let ua = user_agent.to_ascii_lowercase();
        Self::TOUCH_AGENTS
            .iter()
            .any(|needle| ua.contains(&needle.to_ascii_lowercase()))
    }

    pub fn is_desktop_pointer(&self) -> bool {
        (self.hover || self.fine_pointer) && !self.touch_user_agent
    }
}

/// Condition under which an overlay should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    Always,
    /// Only with a hover-capable or fine pointer, and not on a touch device.
    DesktopPointer,
    /// Only while the given theme mode is selected.
    Theme(ThemeMode),
}

impl Activation {
    pub fn should_activate(&self, caps: &Capabilities, theme: &Theme) -> bool {
        match self {
            Self::Always => true,
            Self::DesktopPointer => caps.is_desktop_pointer(),
            Self::Theme(mode) => theme.mode == *mode,
        }
    }
}
