//! Startup sequence: bind the theme toggle and the back-to-top button to a host.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the document is ready. Installs the single host scroll
//! listener feeding [`ScrollListeners`], applies the preferred theme, and
//! wires click handlers. The two features bind independently: a missing or
//! broken control for one never prevents the other from binding.

use std::rc::Rc;

use crate::config::ChromeConfig;
use crate::error::ChromeError;
use crate::host::{Activation, Host, Viewport};
use crate::scroll::{BackToTop, ScrollListeners, scroll_home};
use crate::theme::{Theme, ThemeController, ThemeState};

#[cfg(test)]
#[path = "chrome_test.rs"]
mod chrome_test;

/// Outcome of binding one feature to its page control.
#[derive(Debug)]
pub enum Binding {
    /// Control found and listeners attached.
    Bound,
    /// Control not on this page; the feature is a no-op here.
    Absent { id: String },
    /// Binding failed for a reason other than a missing control.
    Failed(ChromeError),
}

impl Binding {
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound)
    }
}

/// Live page chrome. Listeners stay attached for the lifetime of the page.
pub struct Chrome {
    pub theme: Binding,
    pub back_to_top: Binding,
    applied_theme: Option<Theme>,
    scroll: Rc<ScrollListeners>,
}

impl Chrome {
    /// Bind both features to `host`.
    ///
    /// # Errors
    ///
    /// Fails only if the page-level scroll listener cannot be installed.
    /// Per-feature problems are reported through [`Binding`].
    pub fn start<H: Host>(host: &H, config: &ChromeConfig) -> Result<Self, ChromeError> {
        let scroll = Rc::new(ScrollListeners::new());
        install_scroll_source(host, &scroll)?;

        let (theme, applied_theme) = match bind_theme(host, config) {
            Ok((binding, applied)) => (binding, Some(applied)),
            Err(err) => {
                log::error!("theme: {err}");
                (Binding::Failed(err), None)
            }
        };

        let back_to_top = settle("back-to-top", bind_back_to_top(host, config, &scroll));

        log::info!(
            "page chrome started: theme={:?} back_to_top={:?}",
            applied_theme.map(Theme::as_str),
            back_to_top.is_bound()
        );
        Ok(Self { theme, back_to_top, applied_theme, scroll })
    }

    /// Theme applied at startup, if the theme feature could run.
    #[must_use]
    pub fn applied_theme(&self) -> Option<Theme> {
        self.applied_theme
    }

    /// Registry other features can subscribe to for scroll offsets.
    #[must_use]
    pub fn scroll_listeners(&self) -> Rc<ScrollListeners> {
        Rc::clone(&self.scroll)
    }
}

/// Fold a feature's binding result into a [`Binding`], downgrading a missing
/// control to [`Binding::Absent`].
fn settle(feature: &str, result: Result<Binding, ChromeError>) -> Binding {
    match result {
        Ok(binding) => binding,
        Err(ChromeError::MissingElement { id }) => {
            log::warn!("{feature}: #{id} not found; skipping");
            Binding::Absent { id }
        }
        Err(err) => {
            log::error!("{feature}: {err}");
            Binding::Failed(err)
        }
    }
}

fn install_scroll_source<H: Host>(host: &H, scroll: &Rc<ScrollListeners>) -> Result<(), ChromeError> {
    let viewport = host.viewport();
    let listeners = Rc::clone(scroll);
    host.on_scroll(Box::new(move || {
        let offset = viewport.scroll_offset();
        listeners.dispatch(offset);
    }))
}

fn bind_theme<H: Host>(host: &H, config: &ChromeConfig) -> Result<(Binding, Theme), ChromeError> {
    let prefers_dark = config.follow_system_preference && host.viewport().prefers_dark();
    let state = ThemeState::new(host.local_store()?, config.storage_key.clone())
        .with_system_preference(prefers_dark);
    let mut controller = ThemeController::new(state, host.document_root()?, config);

    let toggle = host.element_by_id(&config.toggle_id);
    if let Some(toggle) = &toggle {
        controller = controller.with_toggle(toggle.clone());
    }
    let applied = controller.init()?;

    let Some(toggle) = toggle else {
        log::warn!("theme: #{} not found; applied {applied} without a toggle", config.toggle_id);
        return Ok((Binding::Absent { id: config.toggle_id.clone() }, applied));
    };

    host.on_click(
        &toggle,
        Box::new(move |_: &dyn Activation| {
            if let Err(err) = controller.toggle() {
                log::warn!("theme: toggle failed: {err}");
            }
        }),
    )?;
    Ok((Binding::Bound, applied))
}

fn bind_back_to_top<H: Host>(
    host: &H,
    config: &ChromeConfig,
    scroll: &Rc<ScrollListeners>,
) -> Result<Binding, ChromeError> {
    let button = host.require_element(&config.back_to_top_id)?;

    let viewport = host.viewport();
    host.on_click(
        &button,
        Box::new(move |event: &dyn Activation| {
            if let Err(err) = scroll_home(event, &viewport) {
                log::warn!("back-to-top: scroll failed: {err}");
            }
        }),
    )?;

    let mut back_to_top = BackToTop::new(button, config);
    scroll.subscribe(move |offset| {
        if let Err(err) = back_to_top.on_scroll(offset) {
            log::warn!("back-to-top: {err}");
        }
    });
    Ok(Binding::Bound)
}
