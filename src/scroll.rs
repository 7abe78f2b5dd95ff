//! Scroll listener registry and the back-to-top button.
//!
//! DESIGN
//! ======
//! The page gets exactly one host scroll listener; it reads the offset once
//! and fans it out through [`ScrollListeners`] in registration order. Features
//! subscribe to the registry instead of claiming the page's scroll handler,
//! so they never clobber one another. The registry owns its interior
//! mutability and never holds a borrow while a listener runs.
//!
//! [`BackToTop`] is a two-state machine (hidden/visible) driven purely by the
//! offset it is handed.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::config::ChromeConfig;
use crate::error::ChromeError;
use crate::host::{Activation, Control, Viewport};

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Handle returned by [`ScrollListeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
    // Ids taken out for the dispatch in progress and not yet unsubscribed.
    in_flight: HashSet<ListenerId>,
    dispatching: bool,
}

/// Ordered list of scroll observers, shared by every feature on the page.
///
/// Listeners run with no borrow held, so they may subscribe or unsubscribe
/// (themselves included) from inside their own callback. A listener added
/// during a dispatch first hears the next one; a listener removed during a
/// dispatch is skipped if it has not run yet.
#[derive(Default)]
pub struct ScrollListeners {
    registry: RefCell<Registry>,
}

impl ScrollListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(f64) + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|(existing, _)| *existing != id);
        registry.listeners.len() != before || registry.in_flight.remove(&id)
    }

    /// Deliver `offset` to every listener in subscription order.
    ///
    /// A dispatch triggered from inside a listener is dropped.
    pub fn dispatch(&self, offset: f64) {
        let mut active = {
            let mut registry = self.registry.borrow_mut();
            if registry.dispatching {
                log::debug!("scroll: ignoring nested dispatch at offset {offset}");
                return;
            }
            registry.dispatching = true;
            let active = std::mem::take(&mut registry.listeners);
            registry.in_flight = active.iter().map(|(id, _)| *id).collect();
            active
        };

        for (id, listener) in &mut active {
            if self.registry.borrow().in_flight.contains(id) {
                listener(offset);
            }
        }

        let mut registry = self.registry.borrow_mut();
        let in_flight = std::mem::take(&mut registry.in_flight);
        active.retain(|(id, _)| in_flight.contains(id));
        active.append(&mut registry.listeners);
        registry.listeners = active;
        registry.dispatching = false;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let registry = self.registry.borrow();
        if registry.dispatching {
            registry.listeners.len() + registry.in_flight.len()
        } else {
            registry.listeners.len()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Display state of the back-to-top button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonVisibility {
    Hidden,
    Visible,
}

impl ButtonVisibility {
    /// Visible strictly above `threshold`; an offset equal to it stays hidden.
    #[must_use]
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold { Self::Visible } else { Self::Hidden }
    }
}

/// Shows the button only while the page is scrolled past the threshold.
pub struct BackToTop<C> {
    button: C,
    threshold: f64,
    visible_display: String,
    hidden_display: String,
    // None until the first scroll event; the markup's own display applies until then.
    visibility: Option<ButtonVisibility>,
}

impl<C: Control> BackToTop<C> {
    #[must_use]
    pub fn new(button: C, config: &ChromeConfig) -> Self {
        Self {
            button,
            threshold: config.scroll_threshold,
            visible_display: config.visible_display.clone(),
            hidden_display: config.hidden_display.clone(),
            visibility: None,
        }
    }

    #[must_use]
    pub fn visibility(&self) -> Option<ButtonVisibility> {
        self.visibility
    }

    /// Re-derive visibility from `offset` and apply it to the button.
    ///
    /// # Errors
    ///
    /// Returns the host error if the display style cannot be set.
    pub fn on_scroll(&mut self, offset: f64) -> Result<ButtonVisibility, ChromeError> {
        let next = ButtonVisibility::for_offset(offset, self.threshold);
        let display = match next {
            ButtonVisibility::Visible => &self.visible_display,
            ButtonVisibility::Hidden => &self.hidden_display,
        };
        self.button.set_display(display)?;
        if self.visibility != Some(next) {
            log::debug!("back-to-top: {next:?} at offset {offset}");
        }
        self.visibility = Some(next);
        Ok(next)
    }
}

/// Back-to-top click: cancel the default navigation and smooth-scroll to the top.
///
/// # Errors
///
/// Returns the host error if the scroll request fails.
pub fn scroll_home(event: &dyn Activation, viewport: &impl Viewport) -> Result<(), ChromeError> {
    event.prevent_default();
    viewport.smooth_scroll_to(0.0)
}
