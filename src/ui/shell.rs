use std::time::Instant;

use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, ChatOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ChatOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        server_url = %context.config.server.url,
        transport = ?context.config.server.transport,
        "starting chat shell"
    );

    let mut terminal = TerminalSession::enter()?;

    loop {
        orchestrator.pump(Instant::now())?;
        if !orchestrator.state().is_running() {
            break;
        }

        terminal.draw(|frame| view::render(frame, orchestrator.state()))?;
        step(event_source, orchestrator)?;
    }

    tracing::info!("chat shell stopped");
    Ok(())
}

/// Reads at most one input event and applies it.
fn step(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ChatOrchestrator,
) -> Result<()> {
    if let Some(event) = event_source.next_event()? {
        orchestrator.handle_event(event, Instant::now())?;
    }
    Ok(())
}
