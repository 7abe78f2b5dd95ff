//! Host environment seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controllers never touch `window`, `document`, or `localStorage`
//! directly. They work against these traits, which the `web` bridge
//! implements over `web-sys` and [`memory`] implements in-process for native
//! runs and tests.
//!
//! Lookups that can miss return `Option`; everything that can throw in a
//! browser returns `Result<_, ChromeError>`.

pub mod memory;

use crate::error::ChromeError;

/// Origin-scoped string key/value storage (`localStorage` in the browser).
pub trait KeyValueStore {
    /// Read `key`. `Ok(None)` means the key was never written.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Storage`] when the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, ChromeError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Storage`] when the store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), ChromeError>;
}

/// The document root element (`<html>`).
pub trait DocumentRoot {
    fn attribute(&self, name: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the attribute cannot be set.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ChromeError>;
}

/// A page control the chrome decorates and listens to.
pub trait Control: Clone + 'static {
    /// Replace the control's inner markup.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the markup cannot be applied.
    fn set_inner_html(&self, markup: &str) -> Result<(), ChromeError>;

    /// Set the control's inline `display` style.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the style cannot be applied.
    fn set_display(&self, value: &str) -> Result<(), ChromeError>;
}

/// Scroll position readout and scrolling.
pub trait Viewport: 'static {
    /// Current vertical scroll offset in CSS pixels.
    fn scroll_offset(&self) -> f64;

    /// Request an animated scroll to vertical offset `top`.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the request cannot be issued.
    fn smooth_scroll_to(&self, top: f64) -> Result<(), ChromeError>;

    /// Whether the user agent reports `prefers-color-scheme: dark`.
    fn prefers_dark(&self) -> bool;
}

/// A user activation (click) delivered to a control.
pub trait Activation {
    /// Suppress the control's default action (e.g. following an `href`).
    fn prevent_default(&self);
}

pub type ClickHandler = Box<dyn FnMut(&dyn Activation)>;
pub type ScrollHandler = Box<dyn FnMut()>;

/// Everything the page chrome needs from its environment.
pub trait Host {
    type Store: KeyValueStore + 'static;
    type Root: DocumentRoot + 'static;
    type Control: Control;
    type Viewport: Viewport;

    /// # Errors
    ///
    /// Returns [`ChromeError::StorageUnavailable`] when no store is exposed
    /// (e.g. storage disabled by privacy settings).
    fn local_store(&self) -> Result<Self::Store, ChromeError>;

    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the document has no root element.
    fn document_root(&self) -> Result<Self::Root, ChromeError>;

    fn element_by_id(&self, id: &str) -> Option<Self::Control>;

    /// Like [`Self::element_by_id`], but a miss is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::MissingElement`] when no control has `id`.
    fn require_element(&self, id: &str) -> Result<Self::Control, ChromeError> {
        self.element_by_id(id)
            .ok_or_else(|| ChromeError::MissingElement { id: id.to_owned() })
    }

    fn viewport(&self) -> Self::Viewport;

    /// Subscribe `handler` to click activations on `control`.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the listener cannot be registered.
    fn on_click(&self, control: &Self::Control, handler: ClickHandler) -> Result<(), ChromeError>;

    /// Subscribe `handler` to page scroll notifications. Adds a listener;
    /// never replaces handlers registered by others.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] when the listener cannot be registered.
    fn on_scroll(&self, handler: ScrollHandler) -> Result<(), ChromeError>;
}
