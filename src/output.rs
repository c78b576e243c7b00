//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance,
//! based on terminal capabilities and user preferences.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```
//! use catalog_sync::output::{OutputConfig, Marker};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! assert_eq!(config.marker(Marker::Missing), "-");
//! ```

use std::env;

use console::Style;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

/// The kinds of line a report prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// In the reference, not in the target.
    Missing,
    /// In the target, not in the reference.
    Extra,
    /// A placeholder value.
    Placeholder,
    /// A written or added item.
    Changed,
    /// A defect such as a duplicate key.
    Problem,
}

impl Marker {
    fn symbol(self) -> &'static str {
        match self {
            Marker::Missing => "-",
            Marker::Extra => "+",
            Marker::Placeholder => "?",
            Marker::Changed => "~",
            Marker::Problem => "!",
        }
    }

    fn style(self) -> Style {
        match self {
            Marker::Missing => Style::new().red(),
            Marker::Extra => Style::new().green(),
            Marker::Placeholder => Style::new().yellow(),
            Marker::Changed => Style::new().cyan(),
            Marker::Problem => Style::new().red().bold(),
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The marker symbol for a report line, colored when enabled.
    pub fn marker(&self, marker: Marker) -> String {
        self.paint(marker, marker.symbol())
    }

    /// `text` in the marker's color when enabled.
    pub fn paint(&self, marker: Marker, text: &str) -> String {
        if self.use_color {
            marker.style().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// `text` in bold when colors are enabled.
    pub fn heading(&self, text: &str) -> String {
        if self.use_color {
            Style::new().bold().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
