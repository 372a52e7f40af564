//! Message input field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::message_input_state::MessageInputState;

use super::styles;

const PLACEHOLDER_TEXT: &str = "Type a message...";
const NAME_PLACEHOLDER_TEXT: &str = "New display name...";
const PROMPT_SYMBOL: &str = "> ";
const SEND_HINT: &str = " Enter ⏎ ";
const RENAME_HINT: &str = " Enter: rename | Ctrl+N: cancel ";

/// What the input line is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Message,
    DisplayName,
}

impl InputMode {
    fn placeholder(self) -> &'static str {
        match self {
            Self::Message => PLACEHOLDER_TEXT,
            Self::DisplayName => NAME_PLACEHOLDER_TEXT,
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Message => SEND_HINT,
            Self::DisplayName => RENAME_HINT,
        }
    }
}

pub fn render_message_input(
    frame: &mut Frame<'_>,
    area: Rect,
    input_state: &MessageInputState,
    mode: InputMode,
) {
    let can_submit = !input_state.is_blank();

    let hint = Line::from(Span::styled(mode.hint(), styles::send_hint_style(can_submit)));
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::panel_border_style())
        .title_bottom(hint.right_aligned());
    if mode == InputMode::DisplayName {
        block = block.title("Display name");
    }

    let paragraph = Paragraph::new(build_input_line(input_state, mode)).block(block);
    frame.render_widget(paragraph, area);

    let before_cursor: String = input_state
        .text()
        .chars()
        .take(input_state.cursor_position())
        .collect();
    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(PROMPT_SYMBOL.len() as u16)
        .saturating_add(before_cursor.width().min(u16::MAX as usize) as u16);
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn build_input_line(input_state: &MessageInputState, mode: InputMode) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if input_state.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(
                mode.placeholder().to_owned(),
                styles::input_placeholder_style(),
            ),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(input_state.text().to_owned(), styles::input_text_style()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn empty_draft_shows_placeholder() {
        let state = MessageInputState::default();
        let text = line_text(&build_input_line(&state, InputMode::Message));

        assert!(text.starts_with(PROMPT_SYMBOL));
        assert!(text.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn draft_text_replaces_placeholder() {
        let mut state = MessageInputState::default();
        state.insert_char('H');
        state.insert_char('i');

        let text = line_text(&build_input_line(&state, InputMode::Message));

        assert!(text.contains("Hi"));
        assert!(!text.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn name_prompt_has_its_own_placeholder() {
        let state = MessageInputState::default();
        let text = line_text(&build_input_line(&state, InputMode::DisplayName));

        assert!(text.contains(NAME_PLACEHOLDER_TEXT));
        assert!(!text.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn whitespace_draft_is_shown_verbatim() {
        let mut state = MessageInputState::default();
        state.insert_char(' ');

        let text = line_text(&build_input_line(&state, InputMode::Message));

        assert_eq!(text, ">  ");
    }
}
