//! Infrastructure layer: adapters for config, local storage, and logging.

pub mod config;
pub mod contracts;
pub mod error;
pub mod local_store;
pub mod logging;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
