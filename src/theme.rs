//! Light/dark theme: the persisted preference and the toggle controller.
//!
//! DESIGN
//! ======
//! [`ThemeState`] owns the persisted preference and nothing else; it is built
//! once at startup around an injected [`KeyValueStore`]. [`ThemeController`]
//! keeps the document root attribute, the stored value, and the toggle icon
//! in step on every change.
//!
//! TRADE-OFFS
//! ==========
//! The toggle reads the current theme back from the root attribute rather
//! than from storage, so a stylesheet or script that changed the attribute
//! directly is respected on the next click.

use std::fmt;

use crate::config::ChromeConfig;
use crate::error::ChromeError;
use crate::host::{Control, DocumentRoot, KeyValueStore};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Document-wide display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written to storage and to the root attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Strict parse of a stored value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Interpret a root attribute value. Only `"dark"` is dark.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        if value == Some("dark") { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted theme preference behind an injected store.
pub struct ThemeState<S> {
    store: S,
    key: String,
    system_prefers_dark: bool,
}

impl<S: KeyValueStore> ThemeState<S> {
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into(), system_prefers_dark: false }
    }

    /// Fall back to dark instead of light when nothing is stored.
    #[must_use]
    pub fn with_system_preference(mut self, prefers_dark: bool) -> Self {
        self.system_prefers_dark = prefers_dark;
        self
    }

    /// Read the stored theme, distinguishing "never set" (`Ok(None)`) from an
    /// unreadable store (`Err`). Unrecognized values count as never set.
    ///
    /// # Errors
    ///
    /// Propagates the store's read error.
    pub fn load(&self) -> Result<Option<Theme>, ChromeError> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };
        let theme = Theme::parse(&raw);
        if theme.is_none() {
            log::warn!("theme: ignoring unrecognized stored value {raw:?}");
        }
        Ok(theme)
    }

    /// Stored theme, or the default when absent or unreadable.
    #[must_use]
    pub fn get(&self) -> Theme {
        match self.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => self.fallback(),
            Err(err) => {
                log::warn!("theme: {err}; using default");
                self.fallback()
            }
        }
    }

    /// # Errors
    ///
    /// Propagates the store's write error.
    pub fn set(&self, theme: Theme) -> Result<(), ChromeError> {
        self.store.set_item(&self.key, theme.as_str())
    }

    fn fallback(&self) -> Theme {
        if self.system_prefers_dark { Theme::Dark } else { Theme::Light }
    }
}

/// Keeps root attribute, stored preference, and toggle icon in sync.
pub struct ThemeController<S, R, C> {
    state: ThemeState<S>,
    root: R,
    attribute: String,
    toggle: Option<C>,
    sun_icon: String,
    moon_icon: String,
}

impl<S: KeyValueStore, R: DocumentRoot, C: Control> ThemeController<S, R, C> {
    #[must_use]
    pub fn new(state: ThemeState<S>, root: R, config: &ChromeConfig) -> Self {
        Self {
            state,
            root,
            attribute: config.theme_attribute.clone(),
            toggle: None,
            sun_icon: config.sun_icon.clone(),
            moon_icon: config.moon_icon.clone(),
        }
    }

    /// Attach the toggle control whose icon mirrors the theme.
    #[must_use]
    pub fn with_toggle(mut self, toggle: C) -> Self {
        self.toggle = Some(toggle);
        self
    }

    #[must_use]
    pub fn preferred_theme(&self) -> Theme {
        self.state.get()
    }

    /// Theme currently applied to the document root.
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        Theme::from_attribute(self.root.attribute(&self.attribute).as_deref())
    }

    /// Markup the toggle shows for `theme`: a sun while dark, a moon while light.
    #[must_use]
    pub fn icon_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.sun_icon,
            Theme::Light => &self.moon_icon,
        }
    }

    /// Apply `theme` to the root, persist it, then update the toggle icon.
    ///
    /// # Errors
    ///
    /// Stops at the first step that fails and returns its error.
    pub fn set_theme(&self, theme: Theme) -> Result<(), ChromeError> {
        self.root.set_attribute(&self.attribute, theme.as_str())?;
        self.state.set(theme)?;
        if let Some(toggle) = &self.toggle {
            toggle.set_inner_html(self.icon_for(theme))?;
        }
        log::debug!("theme: applied {theme}");
        Ok(())
    }

    /// Apply the preferred theme. Runs once at startup.
    ///
    /// # Errors
    ///
    /// See [`Self::set_theme`].
    pub fn init(&self) -> Result<Theme, ChromeError> {
        let theme = self.preferred_theme();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Switch to the opposite of the theme on the root. Returns the new theme.
    ///
    /// # Errors
    ///
    /// See [`Self::set_theme`].
    pub fn toggle(&self) -> Result<Theme, ChromeError> {
        let next = self.current_theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
