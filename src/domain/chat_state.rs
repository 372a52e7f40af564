use super::{
    message::ChatMessage, message_input_state::MessageInputState,
    typing_indicator::TypingIndicator,
};

/// Everything the chat view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatViewState {
    running: bool,
    connected: bool,
    display_name: String,
    messages: Vec<ChatMessage>,
    draft: MessageInputState,
    composing: bool,
    typing: TypingIndicator,
    roster: Vec<String>,
    roster_visible: bool,
    rename_prompt: Option<MessageInputState>,
}

impl Default for ChatViewState {
    fn default() -> Self {
        Self {
            running: true,
            connected: false,
            display_name: String::new(),
            messages: Vec::new(),
            draft: MessageInputState::default(),
            composing: false,
            typing: TypingIndicator::default(),
            roster: Vec::new(),
            roster_visible: false,
            rename_prompt: None,
        }
    }
}

impl ChatViewState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, name: String) {
        self.display_name = name;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The log is append-only.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn draft(&self) -> &MessageInputState {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MessageInputState {
        &mut self.draft
    }

    /// Whether a `typing` event was already sent for the current draft.
    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn set_composing(&mut self, composing: bool) {
        self.composing = composing;
    }

    pub fn typing(&self) -> &TypingIndicator {
        &self.typing
    }

    pub fn typing_mut(&mut self) -> &mut TypingIndicator {
        &mut self.typing
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn replace_roster(&mut self, roster: Vec<String>) {
        self.roster = roster;
    }

    pub fn is_roster_visible(&self) -> bool {
        self.roster_visible
    }

    pub fn toggle_roster(&mut self) {
        self.roster_visible = !self.roster_visible;
    }

    /// The display-name entry, present while a rename is in progress.
    pub fn rename_prompt(&self) -> Option<&MessageInputState> {
        self.rename_prompt.as_ref()
    }

    pub fn rename_prompt_mut(&mut self) -> Option<&mut MessageInputState> {
        self.rename_prompt.as_mut()
    }

    pub fn open_rename_prompt(&mut self) {
        self.rename_prompt = Some(MessageInputState::default());
    }

    /// Closes the prompt and returns what was typed into it.
    pub fn close_rename_prompt(&mut self) -> Option<String> {
        self.rename_prompt.take().map(|mut prompt| prompt.take_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_disconnected_and_empty() {
        let state = ChatViewState::default();

        assert!(state.is_running());
        assert!(!state.is_connected());
        assert!(state.messages().is_empty());
        assert!(state.roster().is_empty());
        assert!(!state.is_roster_visible());
        assert!(!state.typing().is_active());
    }

    #[test]
    fn replace_roster_drops_previous_entries() {
        let mut state = ChatViewState::default();
        state.replace_roster(vec!["old".to_owned()]);
        state.replace_roster(vec!["a".to_owned(), "b".to_owned()]);

        assert_eq!(state.roster(), ["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn toggle_roster_flips_visibility() {
        let mut state = ChatViewState::default();
        state.toggle_roster();
        assert!(state.is_roster_visible());

        state.toggle_roster();
        assert!(!state.is_roster_visible());
    }

    #[test]
    fn rename_prompt_is_separate_from_draft() {
        let mut state = ChatViewState::default();
        state.draft_mut().insert_char('x');
        state.open_rename_prompt();

        if let Some(prompt) = state.rename_prompt_mut() {
            prompt.insert_char('b');
        }

        assert_eq!(state.close_rename_prompt(), Some("b".to_owned()));
        assert!(state.rename_prompt().is_none());
        assert_eq!(state.draft().text(), "x");
        assert_eq!(state.close_rename_prompt(), None);
    }

    #[test]
    fn messages_keep_insertion_order() {
        let mut state = ChatViewState::default();
        for text in ["one", "two", "three"] {
            state.push_message(ChatMessage {
                text: text.to_owned(),
                ..ChatMessage::default()
            });
        }

        let texts: Vec<&str> = state.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }
}
