//! Logging backend installation.
//!
//! Library code logs through the `log` facade only. In the browser the
//! backend is `console_log`, installed together with the panic hook; off the
//! browser no backend is installed and records are dropped.

use std::str::FromStr;

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`), defaulting to `Info`.
#[must_use]
pub fn parse_level(name: &str) -> log::Level {
    log::Level::from_str(name.trim()).unwrap_or(log::Level::Info)
}

/// Install the console logger and panic hook. Safe to call more than once.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn init_logging(level: log::Level) {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("logging: logger already installed");
        }
    }
}
