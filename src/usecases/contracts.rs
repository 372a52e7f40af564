use std::time::Instant;

use anyhow::Result;

use crate::domain::{chat_state::ChatViewState, events::AppEvent};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ChatOrchestrator {
    fn state(&self) -> &ChatViewState;

    /// Applies one input event.
    fn handle_event(&mut self, event: AppEvent, now: Instant) -> Result<()>;

    /// Drains queued transport events and fires due timers.
    fn pump(&mut self, now: Instant) -> Result<()>;
}
