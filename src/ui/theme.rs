//! Colour palette and ANSI escape generation.
//!
//! Tables are plain text with optional 24-bit ANSI colour. The palette can be
//! replaced with a TOML file:
//!
//! ```toml
//! name = "high-contrast"
//!
//! [colors]
//! header_fg = "#ffffff"
//! text_normal = "#e0e0e0"
//! text_dim = "#808080"
//! border = "#5c5c5c"
//! primary = "#4fc3f7"
//! success = "#81c784"
//! info = "#64b5f6"
//! warning = "#ffb74d"
//! error = "#e57373"
//! ```
//!
//! # Example
//!
//! ```
//! use opsconsole::ui::format::Tone;
//! use opsconsole::ui::theme::Theme;
//!
//! let plain = Theme::plain();
//! assert_eq!(plain.paint("GET", Tone::Primary), "GET");
//!
//! let coloured = Theme::default();
//! assert!(coloured.paint("GET", Tone::Primary).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::error::{ConsoleError, Result};
use crate::ui::format::Tone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Colour scheme used when rendering tables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Palette, hex strings such as `"#cdd6f4"`.
    pub colors: ThemeColors,
    /// When `false` every styling call returns text unchanged.
    #[serde(skip, default = "color_on")]
    pub enabled: bool,
}

/// Palette entries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    pub text_normal: String,
    pub text_dim: String,
    pub border: String,
    pub primary: String,
    pub success: String,
    pub info: String,
    pub warning: String,
    pub error: String,
}

const fn color_on() -> bool {
    true
}

impl Theme {
    /// The default palette with colour switched off.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| ConsoleError::Config(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ConsoleError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Wraps `text` in the colour of `tone`.
    #[must_use]
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        let hex = match tone {
            Tone::Default => &self.colors.text_normal,
            Tone::Primary => &self.colors.primary,
            Tone::Success => &self.colors.success,
            Tone::Info => &self.colors.info,
            Tone::Warning => &self.colors.warning,
            Tone::Error => &self.colors.error,
        };
        self.wrap(text, &Self::fg(hex), "")
    }

    /// Bold header text.
    #[must_use]
    pub fn header(&self, text: &str) -> String {
        self.wrap(text, &Self::fg(&self.colors.header_fg), Self::bold())
    }

    /// Dimmed secondary text.
    #[must_use]
    pub fn dimmed(&self, text: &str) -> String {
        self.wrap(text, &Self::fg(&self.colors.text_dim), Self::dim())
    }

    /// Separator lines.
    #[must_use]
    pub fn border(&self, text: &str) -> String {
        self.wrap(text, &Self::fg(&self.colors.border), "")
    }

    fn wrap(&self, text: &str, color: &str, style: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        format!("{style}{color}{text}{}", Self::reset())
    }

    /// Parses `#rrggbb`; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self {
            name: "catppuccin-mocha".to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                text_normal: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                primary: "#89b4fa".to_string(),
                success: "#a6e3a1".to_string(),
                info: "#89dceb".to_string(),
                warning: "#f9e2af".to_string(),
                error: "#f38ba8".to_string(),
            },
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_hex_is_white() {
        assert_eq!(Theme::hex_to_rgb("#zz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#a6e3a1"), (0xa6, 0xe3, 0xa1));
    }

    #[test]
    fn loads_palette_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        let toml = r##"
name = "mono"
[colors]
header_fg = "#ffffff"
text_normal = "#eeeeee"
text_dim = "#888888"
border = "#444444"
primary = "#0000ff"
success = "#00ff00"
info = "#00ffff"
warning = "#ffff00"
error = "#ff0000"
"##;
        std::fs::write(&path, toml).unwrap();
        let theme = Theme::from_file(&path).unwrap();
        assert_eq!(theme.name, "mono");
        assert!(theme.enabled);
        assert!(theme.paint("x", Tone::Error).contains("38;2;255;0;0"));
    }
}
