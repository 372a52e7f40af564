//! Use case layer: the chat view orchestrator and application wiring.

pub mod bootstrap;
pub mod chat_view;
pub mod context;
pub mod contracts;
pub mod display_name;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
