//! Glyph and color styling for text output.
//!
//! Maps each [`StyleClass`] to the fill character used for bars and to the cell
//! style used when colors are enabled.

use crate::view_state::metrics::StyleClass;
use ratatui::style::{Color, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== GlyphStyles =====

/// Character used to fill a bar of the given style.
pub fn bar_fill(style: StyleClass) -> char {
    match style {
        StyleClass::Sequence => '=',
        StyleClass::Complement => '-',
        StyleClass::Ruler => '|',
        StyleClass::Feature => '#',
        StyleClass::Placeholder => '?',
    }
}

/// Cell styles for each [`StyleClass`].
///
/// Distinct colors for:
/// - Forward strand (Green)
/// - Complement strand (Cyan)
/// - Ruler (DarkGray)
/// - Features (Yellow)
/// - Placeholders (Red)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyles {
    sequence_style: Style,
    complement_style: Style,
    ruler_style: Style,
    feature_style: Style,
    placeholder_style: Style,
}

impl GlyphStyles {
    /// Create styles for the given color configuration.
    ///
    /// If colors are disabled, all styles use default (no color) styling.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                sequence_style: Style::default().fg(Color::Green),
                complement_style: Style::default().fg(Color::Cyan),
                ruler_style: Style::default().fg(Color::DarkGray),
                feature_style: Style::default().fg(Color::Yellow),
                placeholder_style: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                sequence_style: Style::default(),
                complement_style: Style::default(),
                ruler_style: Style::default(),
                feature_style: Style::default(),
                placeholder_style: Style::default(),
            }
        }
    }

    /// Get the style for a style class.
    pub fn style_for(&self, class: StyleClass) -> Style {
        match class {
            StyleClass::Sequence => self.sequence_style,
            StyleClass::Complement => self.complement_style,
            StyleClass::Ruler => self.ruler_style,
            StyleClass::Feature => self.feature_style,
            StyleClass::Placeholder => self.placeholder_style,
        }
    }
}

// ===== Tests =====
