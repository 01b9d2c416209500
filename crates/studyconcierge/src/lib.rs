//! Public SDK surface for StudyConcierge.
//!
//! This crate re-exports the study agents and their building blocks and
//! provides a small initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use studyconcierge_config as config;
/// Re-export for convenience.
pub use studyconcierge_core as core;
/// Re-export for convenience.
pub use studyconcierge_memory as memory;
/// Re-export for convenience.
pub use studyconcierge_tools as tools;

pub use studyconcierge_core::{PlanRequest, StudyConcierge, StudyError};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
