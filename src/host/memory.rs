//! In-process [`Host`] for native runs and tests.
//!
//! Models just enough of a page: a string store, root attributes, controls
//! addressed by id with inner markup and a `display` style, a scroll offset,
//! and registered click/scroll listeners. [`MemoryHost::scroll_to`] and
//! [`MemoryHost::click`] play the role of the browser's event dispatch.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{Activation, ClickHandler, Control, DocumentRoot, Host, KeyValueStore, ScrollHandler, Viewport};
use crate::error::ChromeError;

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// How the simulated local storage behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageMode {
    #[default]
    Available,
    /// No store is exposed at all.
    Unavailable,
    /// The store exists but every read and write throws.
    Failing,
}

#[derive(Clone, Debug, Default)]
struct ElementState {
    inner_html: String,
    display: Option<String>,
}

#[derive(Default)]
struct Page {
    storage_mode: StorageMode,
    stored: HashMap<String, String>,
    root_attributes: HashMap<String, String>,
    elements: HashMap<String, ElementState>,
    scroll_offset: f64,
    scroll_requests: Vec<f64>,
    prefers_dark: bool,
    click_handlers: HashMap<String, Vec<ClickHandler>>,
    scroll_handlers: Vec<ScrollHandler>,
}

type SharedPage = Rc<RefCell<Page>>;

/// Simulated page. Clones share the same page.
#[derive(Clone, Default)]
pub struct MemoryHost {
    page: SharedPage,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty control with `id`.
    #[must_use]
    pub fn with_element(self, id: &str) -> Self {
        self.page.borrow_mut().elements.insert(id.to_owned(), ElementState::default());
        self
    }

    /// Pre-populate the store, as if a previous visit wrote `value`.
    #[must_use]
    pub fn with_stored(self, key: &str, value: &str) -> Self {
        self.page.borrow_mut().stored.insert(key.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_storage(self, mode: StorageMode) -> Self {
        self.page.borrow_mut().storage_mode = mode;
        self
    }

    #[must_use]
    pub fn with_prefers_dark(self, prefers_dark: bool) -> Self {
        self.page.borrow_mut().prefers_dark = prefers_dark;
        self
    }

    #[must_use]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.page.borrow().stored.get(key).cloned()
    }

    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.page.borrow().root_attributes.get(name).cloned()
    }

    #[must_use]
    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.page.borrow().elements.get(id).map(|el| el.inner_html.clone())
    }

    /// Inline `display` style of `id`; `None` until something sets it.
    #[must_use]
    pub fn display(&self, id: &str) -> Option<String> {
        self.page.borrow().elements.get(id).and_then(|el| el.display.clone())
    }

    /// Offsets passed to every smooth-scroll request so far.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.page.borrow().scroll_requests.clone()
    }

    #[must_use]
    pub fn scroll_listener_count(&self) -> usize {
        self.page.borrow().scroll_handlers.len()
    }

    #[must_use]
    pub fn click_listener_count(&self, id: &str) -> usize {
        self.page.borrow().click_handlers.get(id).map_or(0, Vec::len)
    }

    /// Move the page to `offset` and dispatch a scroll notification.
    pub fn scroll_to(&self, offset: f64) {
        self.page.borrow_mut().scroll_offset = offset;

        // Handlers call back into the page, so none may run under a borrow.
        let mut handlers = std::mem::take(&mut self.page.borrow_mut().scroll_handlers);
        for handler in &mut handlers {
            handler();
        }
        let mut page = self.page.borrow_mut();
        handlers.append(&mut page.scroll_handlers);
        page.scroll_handlers = handlers;
    }

    /// Dispatch a click on `id`. Returns whether a handler prevented the default action.
    pub fn click(&self, id: &str) -> bool {
        let activation = MemoryActivation::default();
        let mut handlers = self
            .page
            .borrow_mut()
            .click_handlers
            .remove(id)
            .unwrap_or_default();
        for handler in &mut handlers {
            handler(&activation);
        }
        let mut page = self.page.borrow_mut();
        let slot = page.click_handlers.entry(id.to_owned()).or_default();
        handlers.append(slot);
        *slot = handlers;
        activation.prevented.get()
    }
}

impl Host for MemoryHost {
    type Store = MemoryStore;
    type Root = MemoryRoot;
    type Control = MemoryControl;
    type Viewport = MemoryViewport;

    fn local_store(&self) -> Result<MemoryStore, ChromeError> {
        if self.page.borrow().storage_mode == StorageMode::Unavailable {
            return Err(ChromeError::StorageUnavailable);
        }
        Ok(MemoryStore { page: Rc::clone(&self.page) })
    }

    fn document_root(&self) -> Result<MemoryRoot, ChromeError> {
        Ok(MemoryRoot { page: Rc::clone(&self.page) })
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryControl> {
        if !self.page.borrow().elements.contains_key(id) {
            return None;
        }
        Some(MemoryControl { page: Rc::clone(&self.page), id: id.to_owned() })
    }

    fn viewport(&self) -> MemoryViewport {
        MemoryViewport { page: Rc::clone(&self.page) }
    }

    fn on_click(&self, control: &MemoryControl, handler: ClickHandler) -> Result<(), ChromeError> {
        self.page
            .borrow_mut()
            .click_handlers
            .entry(control.id.clone())
            .or_default()
            .push(handler);
        Ok(())
    }

    fn on_scroll(&self, handler: ScrollHandler) -> Result<(), ChromeError> {
        self.page.borrow_mut().scroll_handlers.push(handler);
        Ok(())
    }
}

pub struct MemoryStore {
    page: SharedPage,
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ChromeError> {
        let page = self.page.borrow();
        if page.storage_mode == StorageMode::Failing {
            return Err(ChromeError::Storage(format!("read of {key:?} denied")));
        }
        Ok(page.stored.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ChromeError> {
        let mut page = self.page.borrow_mut();
        if page.storage_mode == StorageMode::Failing {
            return Err(ChromeError::Storage(format!("write of {key:?} denied")));
        }
        page.stored.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct MemoryRoot {
    page: SharedPage,
}

impl DocumentRoot for MemoryRoot {
    fn attribute(&self, name: &str) -> Option<String> {
        self.page.borrow().root_attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ChromeError> {
        self.page
            .borrow_mut()
            .root_attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MemoryControl {
    page: SharedPage,
    id: String,
}

impl MemoryControl {
    fn with_state(&self, apply: impl FnOnce(&mut ElementState)) -> Result<(), ChromeError> {
        let mut page = self.page.borrow_mut();
        let state = page
            .elements
            .get_mut(&self.id)
            .ok_or_else(|| ChromeError::Dom(format!("#{} was removed from the page", self.id)))?;
        apply(state);
        Ok(())
    }
}

impl Control for MemoryControl {
    fn set_inner_html(&self, markup: &str) -> Result<(), ChromeError> {
        self.with_state(|el| el.inner_html = markup.to_owned())
    }

    fn set_display(&self, value: &str) -> Result<(), ChromeError> {
        self.with_state(|el| el.display = Some(value.to_owned()))
    }
}

pub struct MemoryViewport {
    page: SharedPage,
}

impl Viewport for MemoryViewport {
    fn scroll_offset(&self) -> f64 {
        self.page.borrow().scroll_offset
    }

    fn smooth_scroll_to(&self, top: f64) -> Result<(), ChromeError> {
        self.page.borrow_mut().scroll_requests.push(top);
        Ok(())
    }

    fn prefers_dark(&self) -> bool {
        self.page.borrow().prefers_dark
    }
}

#[derive(Default)]
struct MemoryActivation {
    prevented: Cell<bool>,
}

impl Activation for MemoryActivation {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}
