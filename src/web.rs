//! Browser bridge: [`Host`] over `web-sys`, and the wasm entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `hydrate` feature. Every listener registered here
//! lives for the lifetime of the page, so closures are handed to the browser
//! with `Closure::forget`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Storage, Window};

use crate::chrome::Chrome;
use crate::config::{CONFIG_ELEMENT_ID, ChromeConfig};
use crate::error::ChromeError;
use crate::host::{Activation, ClickHandler, Control, DocumentRoot, Host, KeyValueStore, ScrollHandler, Viewport};
use crate::logging::init_logging;
use crate::scroll::ListenerId;

thread_local! {
    static CHROME: RefCell<Option<Chrome>> = const { RefCell::new(None) };
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn add_listener(target: &EventTarget, event: &str, callback: Closure<dyn FnMut(Event)>) -> Result<(), ChromeError> {
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|err| dom_error(&err))?;
    callback.forget();
    Ok(())
}

fn dom_error(err: &JsValue) -> ChromeError {
    ChromeError::Dom(describe(err))
}

fn storage_error(err: &JsValue) -> ChromeError {
    ChromeError::Storage(describe(err))
}

/// The live page.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// # Errors
    ///
    /// Returns [`ChromeError::Dom`] outside a window with a document.
    pub fn new() -> Result<Self, ChromeError> {
        let window = web_sys::window().ok_or_else(|| ChromeError::Dom("no window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| ChromeError::Dom("window has no document".to_owned()))?;
        Ok(Self { window, document })
    }

    /// Overrides from `<script type="application/json" id="page-chrome-config">`,
    /// or defaults when the element is absent or unusable.
    #[must_use]
    pub fn config(&self) -> ChromeConfig {
        let Some(raw) = self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return ChromeConfig::default();
        };
        match ChromeConfig::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("config: #{CONFIG_ELEMENT_ID}: {err}; using defaults");
                ChromeConfig::default()
            }
        }
    }
}

impl Host for WebHost {
    type Store = WebStore;
    type Root = WebRoot;
    type Control = WebControl;
    type Viewport = WebViewport;

    fn local_store(&self) -> Result<WebStore, ChromeError> {
        self.window
            .local_storage()
            .map_err(|err| storage_error(&err))?
            .map(WebStore)
            .ok_or(ChromeError::StorageUnavailable)
    }

    fn document_root(&self) -> Result<WebRoot, ChromeError> {
        self.document
            .document_element()
            .map(WebRoot)
            .ok_or_else(|| ChromeError::Dom("document has no root element".to_owned()))
    }

    fn element_by_id(&self, id: &str) -> Option<WebControl> {
        let element = self.document.get_element_by_id(id)?;
        match element.dyn_into::<HtmlElement>() {
            Ok(element) => Some(WebControl(element)),
            Err(_) => {
                log::warn!("dom: #{id} is not an HTML element");
                None
            }
        }
    }

    fn viewport(&self) -> WebViewport {
        WebViewport { window: self.window.clone(), document: self.document.clone() }
    }

    fn on_click(&self, control: &WebControl, mut handler: ClickHandler) -> Result<(), ChromeError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler(&WebActivation(event));
        });
        add_listener(&control.0, "click", callback)
    }

    fn on_scroll(&self, mut handler: ScrollHandler) -> Result<(), ChromeError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| handler());
        add_listener(&self.window, "scroll", callback)
    }
}

pub struct WebStore(Storage);

impl KeyValueStore for WebStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ChromeError> {
        self.0.get_item(key).map_err(|err| storage_error(&err))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ChromeError> {
        self.0.set_item(key, value).map_err(|err| storage_error(&err))
    }
}

pub struct WebRoot(Element);

impl DocumentRoot for WebRoot {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ChromeError> {
        self.0.set_attribute(name, value).map_err(|err| dom_error(&err))
    }
}

#[derive(Clone)]
pub struct WebControl(HtmlElement);

impl Control for WebControl {
    fn set_inner_html(&self, markup: &str) -> Result<(), ChromeError> {
        self.0.set_inner_html(markup);
        Ok(())
    }

    fn set_display(&self, value: &str) -> Result<(), ChromeError> {
        self.0
            .style()
            .set_property("display", value)
            .map_err(|err| dom_error(&err))
    }
}

pub struct WebViewport {
    window: Window,
    document: Document,
}

impl Viewport for WebViewport {
    fn scroll_offset(&self) -> f64 {
        // Quirks-mode pages report scrolling on <body> instead of <html>.
        let root = self.document.document_element().map_or(0, |el| el.scroll_top());
        let body = self.document.body().map_or(0, |el| el.scroll_top());
        f64::from(root.max(body))
    }

    fn smooth_scroll_to(&self, top: f64) -> Result<(), ChromeError> {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn prefers_dark(&self) -> bool {
        match self.window.match_media("(prefers-color-scheme: dark)") {
            Ok(Some(query)) => query.matches(),
            Ok(None) | Err(_) => false,
        }
    }
}

struct WebActivation(Event);

impl Activation for WebActivation {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Module entry point: start now if the document is parsed, else on `DOMContentLoaded`.
#[wasm_bindgen(start)]
pub fn hydrate() {
    let host = match WebHost::new() {
        Ok(host) => host,
        Err(err) => {
            init_logging(log::Level::Info);
            log::error!("page chrome: {err}");
            return;
        }
    };

    if host.document.ready_state() != "loading" {
        boot(&host);
        return;
    }

    let ready_host = host.clone();
    let callback = Closure::once(move |_: Event| boot(&ready_host));
    if let Err(err) = add_listener(&host.document, "DOMContentLoaded", callback) {
        init_logging(log::Level::Info);
        log::error!("page chrome: {err}");
    }
}

fn boot(host: &WebHost) {
    let config = host.config();
    init_logging(config.log_level());
    match Chrome::start(host, &config) {
        Ok(chrome) => CHROME.with(|slot| *slot.borrow_mut() = Some(chrome)),
        Err(err) => log::error!("page chrome: {err}"),
    }
}

/// Observe page scroll offsets from other wasm code on the page.
///
/// Returns `None` if the page chrome has not started.
pub fn subscribe_scroll(listener: impl FnMut(f64) + 'static) -> Option<ListenerId> {
    CHROME.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|chrome| chrome.scroll_listeners().subscribe(listener))
    })
}

/// Stop a listener registered with [`subscribe_scroll`].
pub fn unsubscribe_scroll(id: ListenerId) -> bool {
    CHROME.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|chrome| chrome.scroll_listeners().unsubscribe(id))
    })
}
