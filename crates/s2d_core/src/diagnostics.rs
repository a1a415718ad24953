//! Process-wide diagnostics toggle.
//!
//! The crate logs through the `log` facade. Which logger is installed is up to the
//! embedding binary; this module only moves `log::max_level` so informational output
//! can be silenced without losing warnings and errors.

use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn informational output on (`Info`) or off (`Warn`).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
    log::set_max_level(level_for(enabled));
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

fn level_for(enabled: bool) -> LevelFilter {
    if enabled {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Log a failed operation, naming the caller. Each call formats its own message.
pub fn report(caller: &str, message: impl std::fmt::Display) {
    log::error!("({caller}) {message}");
}
