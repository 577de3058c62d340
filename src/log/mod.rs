//! Logging for the simulation engines. This is not to be confused with _reporting_
//! (see [`crate::report`]), which records model outputs.
//!
//! The module re-exports the five `log` macros (`error!`, `warn!`, `info!`, `debug!`,
//! `trace!`). Logging is _disabled_ by default and is switched on programmatically:
//!
//! ```rust
//! use episim::log::{set_log_level, set_module_filter, LevelFilter};
//!
//! pub fn setup_logging() {
//!     // Enable `info` messages globally.
//!     set_log_level(LevelFilter::Info);
//!     // Show every transition made by the progression engine.
//!     set_module_filter("episim::progression", LevelFilter::Trace);
//! }
//! ```
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

pub use log::{debug, error, info, trace, warn, LevelFilter};

use std::collections::BTreeMap;
use std::sync::{LazyLock, Mutex, MutexGuard};

#[cfg(feature = "logging")]
use log4rs::Handle;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// Global level plus per-module level filters, and the handle of the installed logger.
/// Only one instance exists; the public API is the set of free functions below.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    pub(in crate::log) global_log_level: LevelFilter,
    /// Module path (e.g. `"episim::policy"`) to its level filter. Ordered so that the
    /// generated logger configuration is stable.
    pub(in crate::log) module_filters: BTreeMap<String, LevelFilter>,

    #[cfg(feature = "logging")]
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self {
            global_log_level: DEFAULT_LOG_LEVEL,
            module_filters: BTreeMap::new(),

            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    fn set_log_level(&mut self, level: LevelFilter) {
        self.global_log_level = level;
        self.set_config();
    }

    fn set_module_filter(&mut self, module: &str, level: LevelFilter) {
        if self.module_filters.get(module) == Some(&level) {
            return;
        }
        self.module_filters.insert(module.to_string(), level);
        self.set_config();
    }

    fn remove_module_filter(&mut self, module: &str) {
        if self.module_filters.remove(module).is_some() {
            self.set_config();
        }
    }
}

/// Enables all log messages. Equivalent to `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables logging completely. Equivalent to `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the global log level. `LevelFilter::Off` disables logging.
pub fn set_log_level(level: LevelFilter) {
    get_log_configuration().set_log_level(level);
}

/// Sets a level filter for the given module path.
pub fn set_module_filter(module_path: &str, level_filter: LevelFilter) {
    get_log_configuration().set_module_filter(module_path, level_filter);
}

/// Removes the level filter for the given module path; the global level applies again.
pub fn remove_module_filter(module_path: &str) {
    get_log_configuration().remove_module_filter(module_path);
}

fn get_log_configuration() -> MutexGuard<'static, LogConfiguration> {
    LOG_CONFIGURATION.lock().expect("Mutex poisoned")
}
