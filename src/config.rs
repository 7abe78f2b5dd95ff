//! Page chrome configuration.
//!
//! DESIGN
//! ======
//! Every literal the controllers depend on (element ids, the storage key, the
//! root attribute, the scroll threshold, icon markup) lives here with the
//! defaults the page templates expect. Pages may override any subset through
//! a JSON document; missing fields keep their defaults.

use serde::Deserialize;

use crate::error::ChromeError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-bs-theme";
pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle";
pub const DEFAULT_BACK_TO_TOP_ID: &str = "back-to-top-btn";
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 100.0;
pub const DEFAULT_SUN_ICON: &str = r#"<i class="fas fa-sun"></i>"#;
pub const DEFAULT_MOON_ICON: &str = r#"<i class="fas fa-moon"></i>"#;

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "page-chrome-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Local storage key holding the persisted theme.
    pub storage_key: String,
    /// Attribute set on the document root element.
    pub theme_attribute: String,
    pub toggle_id: String,
    pub back_to_top_id: String,
    /// The button shows when the scroll offset is strictly greater than this.
    pub scroll_threshold: f64,
    /// Toggle markup shown while the dark theme is active.
    pub sun_icon: String,
    /// Toggle markup shown while the light theme is active.
    pub moon_icon: String,
    pub visible_display: String,
    pub hidden_display: String,
    /// Use `prefers-color-scheme` when no theme has been stored.
    pub follow_system_preference: bool,
    pub log_level: String,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            theme_attribute: DEFAULT_THEME_ATTRIBUTE.to_owned(),
            toggle_id: DEFAULT_TOGGLE_ID.to_owned(),
            back_to_top_id: DEFAULT_BACK_TO_TOP_ID.to_owned(),
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            sun_icon: DEFAULT_SUN_ICON.to_owned(),
            moon_icon: DEFAULT_MOON_ICON.to_owned(),
            visible_display: "block".to_owned(),
            hidden_display: "none".to_owned(),
            follow_system_preference: false,
            log_level: "info".to_owned(),
        }
    }
}

impl ChromeConfig {
    /// Parse overrides from JSON and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Config`] for malformed JSON and
    /// [`ChromeError::InvalidConfig`] when a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ChromeError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty identifiers and unusable thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), ChromeError> {
        let required = [
            ("storage_key", &self.storage_key),
            ("theme_attribute", &self.theme_attribute),
            ("toggle_id", &self.toggle_id),
            ("back_to_top_id", &self.back_to_top_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ChromeError::InvalidConfig(format!("{field} must not be empty")));
            }
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            return Err(ChromeError::InvalidConfig(format!(
                "scroll_threshold must be a non-negative number, got {}",
                self.scroll_threshold
            )));
        }
        Ok(())
    }

    /// Configured log level, falling back to `Info` for unknown names.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        crate::logging::parse_level(&self.log_level)
    }
}
