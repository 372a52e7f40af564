//! Domain layer: chat entities, transport events, and view state.

pub mod chat_state;
pub mod events;
pub mod message;
pub mod message_input_state;
pub mod typing_indicator;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
