//! The chat view orchestrator: wires transport events and key input into
//! [`ChatViewState`].

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;

use crate::{
    domain::{
        chat_state::ChatViewState,
        events::{AppEvent, InboundEvent, InboundEventKind, KeyInput, OutboundEvent},
        message::{time_label, ChatMessage},
        message_input_state::MessageInputState,
        typing_indicator::TypingExpiryPolicy,
    },
    infra::{config::ChatConfig, contracts::LocalStore},
    transport::{Subscription, Transport, TransportError},
};

use super::{
    contracts::ChatOrchestrator,
    display_name::{normalize_display_name, resolve_display_name},
};

const CHAT_VIEW_MOUNTED: &str = "CHAT_VIEW_MOUNTED";
const CHAT_VIEW_UNMOUNTED: &str = "CHAT_VIEW_UNMOUNTED";
const CHAT_EMIT_FAILED: &str = "CHAT_EMIT_FAILED";
const CHAT_RENAMED: &str = "CHAT_RENAMED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSettings {
    pub typing_window: Duration,
    pub typing_expiry: TypingExpiryPolicy,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            typing_window: Duration::from_secs(2),
            typing_expiry: TypingExpiryPolicy::Independent,
        }
    }
}

impl From<&ChatConfig> for ChatSettings {
    fn from(config: &ChatConfig) -> Self {
        Self {
            typing_window: config.typing_timeout(),
            typing_expiry: config.typing_expiry,
        }
    }
}

pub struct ChatView<T: Transport> {
    state: ChatViewState,
    transport: T,
    subscription: Option<Subscription>,
    settings: ChatSettings,
    mounted: bool,
}

impl<T: Transport> ChatView<T> {
    /// Resolves the display name, announces it, and subscribes to inbound events.
    pub fn mount(transport: T, store: &dyn LocalStore, settings: ChatSettings) -> Self {
        let mut view = Self {
            state: ChatViewState::default(),
            transport,
            subscription: None,
            settings,
            mounted: true,
        };

        let name = resolve_display_name(store);
        view.state.set_display_name(name);
        view.announce_display_name();
        view.resubscribe();

        tracing::info!(
            code = CHAT_VIEW_MOUNTED,
            display_name = view.state.display_name(),
            "chat view mounted"
        );
        view
    }

    /// Starts the transport. Events it produces are picked up by [`ChatOrchestrator::pump`].
    pub fn connect_transport(&mut self) -> Result<(), TransportError> {
        self.transport.connect()
    }

    /// Releases the subscription and pending timers. Later events are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.subscription = None;
        self.state.typing_mut().cancel_all();
        tracing::info!(code = CHAT_VIEW_UNMOUNTED, "chat view unmounted");
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Switches to `name`, renewing the subscription under the new identity.
    ///
    /// Events queued on the old subscription are applied first, under the old name.
    fn change_display_name(&mut self, name: &str, now: Instant) {
        if name == self.state.display_name() {
            return;
        }

        if let Some(subscription) = self.subscription.take() {
            let (renewed, pending) = subscription.renew();
            tracing::debug!(
                subscription_id = renewed.id(),
                replayed = pending.len(),
                "chat view subscription renewed"
            );
            self.subscription = Some(renewed);
            for event in pending {
                self.apply_inbound(event, now);
            }
        } else {
            self.resubscribe();
        }

        let previous = self.state.display_name().to_owned();
        self.state.set_display_name(name.to_owned());
        self.announce_display_name();

        tracing::info!(
            code = CHAT_RENAMED,
            from = %previous,
            to = %name,
            "display name changed"
        );
    }

    fn apply_inbound(&mut self, event: InboundEvent, now: Instant) {
        match event {
            InboundEvent::Connected => {
                self.state.set_connected(true);
                self.announce_display_name();
            }
            InboundEvent::Disconnected => self.state.set_connected(false),
            InboundEvent::ChatMessage(message) => {
                self.state.push_message(message);
                self.state.typing_mut().clear();
            }
            InboundEvent::UserList(roster) => self.state.replace_roster(roster),
            InboundEvent::Typing(user) => {
                if user != self.state.display_name() {
                    let ChatSettings {
                        typing_window,
                        typing_expiry,
                    } = self.settings;
                    self.state
                        .typing_mut()
                        .notify(now, typing_window, typing_expiry);
                }
            }
        }
    }

    /// Sends the draft as a message. Blank drafts are ignored.
    fn submit_draft(&mut self) {
        if self.state.draft().is_blank() {
            return;
        }

        let text = self.state.draft_mut().take_text();
        let message = ChatMessage::own(
            text,
            self.state.display_name(),
            time_label(Local::now()),
        );

        self.emit(&OutboundEvent::ChatMessage(message.clone()));
        self.state.push_message(message);
        self.state.set_composing(false);
    }

    /// Emits a single `typing` notification per burst of edits.
    fn on_draft_edited(&mut self) {
        if self.state.draft().is_empty() {
            self.state.set_composing(false);
            return;
        }

        if !self.state.is_composing() {
            let name = self.state.display_name().to_owned();
            self.emit(&OutboundEvent::Typing(name));
            self.state.set_composing(true);
        }
    }

    fn handle_key(&mut self, key: KeyInput, now: Instant) {
        match (key.ctrl, key.key.as_str()) {
            (true, "u") | (false, "tab") => {
                self.state.toggle_roster();
                return;
            }
            (true, "n") => {
                self.toggle_rename_prompt();
                return;
            }
            (false, "enter") => {
                if self.state.rename_prompt().is_some() {
                    self.commit_rename(now);
                } else {
                    self.submit_draft();
                }
                return;
            }
            (true, _) => return,
            _ => {}
        }

        if let Some(prompt) = self.state.rename_prompt_mut() {
            apply_edit_key(prompt, &key.key);
            return;
        }

        if apply_edit_key(self.state.draft_mut(), &key.key) {
            self.on_draft_edited();
        }
    }

    fn toggle_rename_prompt(&mut self) {
        if self.state.close_rename_prompt().is_none() {
            self.state.open_rename_prompt();
        }
    }

    fn commit_rename(&mut self, now: Instant) {
        let entered = self.state.close_rename_prompt().unwrap_or_default();
        if let Some(name) = normalize_display_name(&entered) {
            self.change_display_name(name, now);
        }
    }

    fn announce_display_name(&self) {
        let name = self.state.display_name().to_owned();
        self.emit(&OutboundEvent::SetUsername(name));
    }

    fn resubscribe(&mut self) {
        let subscription = self.transport.subscribe(&InboundEventKind::ALL);
        tracing::debug!(
            subscription_id = subscription.id(),
            display_name = self.state.display_name(),
            "chat view subscribed"
        );
        self.subscription = Some(subscription);
    }

    fn emit(&self, event: &OutboundEvent) {
        if let Err(error) = self.transport.emit(event) {
            tracing::warn!(
                code = CHAT_EMIT_FAILED,
                event = event.name(),
                error = %error,
                "outbound event dropped"
            );
        }
    }

    fn next_inbound(&self) -> Option<InboundEvent> {
        self.subscription.as_ref().and_then(Subscription::try_next)
    }
}

impl<T: Transport> ChatOrchestrator for ChatView<T> {
    fn state(&self) -> &ChatViewState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent, now: Instant) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }

        match event {
            AppEvent::Tick => {
                self.state.typing_mut().expire(now);
            }
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key, now),
        }

        Ok(())
    }

    fn pump(&mut self, now: Instant) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }

        while let Some(event) = self.next_inbound() {
            self.apply_inbound(event, now);
        }
        self.state.typing_mut().expire(now);

        Ok(())
    }
}

/// Applies an editing key to `input`. Returns true when the text changed.
fn apply_edit_key(input: &mut MessageInputState, key: &str) -> bool {
    match key {
        "backspace" => input.delete_char_before(),
        "delete" => input.delete_char_at(),
        "left" => {
            input.move_cursor_left();
            false
        }
        "right" => {
            input.move_cursor_right();
            false
        }
        "home" => {
            input.move_cursor_home();
            false
        }
        "end" => {
            input.move_cursor_end();
            false
        }
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => input.insert_char(ch),
                _ => false,
            }
        }
    }
}

impl<T: Transport> Drop for ChatView<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}
