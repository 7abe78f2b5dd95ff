//! # page-chrome
//!
//! Page chrome behaviors for server-rendered pages, compiled to WebAssembly:
//! a persisted light/dark theme toggle and a back-to-top button that appears
//! once the page is scrolled past a threshold.
//!
//! All behavior lives in browser-independent cores driven through the
//! [`host`] traits, so it runs and is tested natively. The `hydrate` feature
//! adds the [`web`] bridge that binds those cores to `web-sys`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`chrome`] | Startup sequence wiring both controllers to a host |
//! | [`theme`] | Theme model, persisted theme state, and the toggle controller |
//! | [`scroll`] | Scroll listener registry and the back-to-top controller |
//! | [`host`] | Traits for storage, DOM, and viewport access, plus an in-memory host |
//! | [`config`] | Element ids, storage key, threshold, and icon markup |
//! | [`error`] | Crate error type |
//! | [`logging`] | `log` backend installation |
//! | `web` | `web-sys` bridge and wasm entry point (`hydrate` only) |

pub mod chrome;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod scroll;
pub mod theme;
#[cfg(feature = "hydrate")]
pub mod web;

pub use chrome::{Binding, Chrome};
pub use config::ChromeConfig;
pub use error::ChromeError;
pub use theme::Theme;
