pub mod colors;

pub use colors::Color;

use sparing_config::ThemeConfig;
use sparing_core::ConnectionStatus;
use std::collections::HashMap;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Calling [`Theme::from_config`] is infallible: invalid colour strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent:  Color,
    pub online:  Color,
    pub offline: Color,
    parameter_colors: HashMap<String, Color>,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let parameter_colors = cfg
            .parameter_colors
            .iter()
            .filter_map(|(name, hex)| Color::from_hex(hex).map(|c| (name.clone(), c)))
            .collect();

        Self {
            accent:  Color::from_hex(&cfg.accent).unwrap_or(Color::MAGENTA),
            online:  Color::from_hex(&cfg.online).unwrap_or(Color::GREEN),
            offline: Color::from_hex(&cfg.offline).unwrap_or(Color::RED),
            parameter_colors,
        }
    }

    /// Trend colour for `parameter`, or the accent colour if none is set.
    pub fn parameter_color(&self, parameter: &str) -> Color {
        self.parameter_colors
            .get(parameter)
            .copied()
            .unwrap_or(self.accent)
    }

    pub fn status_color(&self, status: ConnectionStatus) -> Color {
        match status {
            ConnectionStatus::Online  => self.online,
            ConnectionStatus::Offline => self.offline,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
