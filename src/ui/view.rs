use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::chat_state::ChatViewState;

use super::message_input::{render_message_input, InputMode};
use super::message_rendering::{build_message_list_elements, element_to_list_item};
use super::styles;

const TITLE: &str = "Chat";
const STATUS_HINTS: &str = "Enter: send | Tab: users | Ctrl+N: rename | Esc: quit";

pub fn render(frame: &mut Frame<'_>, state: &ChatViewState) {
    let [header_area, content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let chat_area = if state.is_roster_visible() {
        let [chat_area, roster_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .areas(content_area);
        render_roster_panel(frame, roster_area, state);
        chat_area
    } else {
        content_area
    };

    // 3 lines for input: border + text + border
    let [messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(chat_area);

    frame.render_widget(Paragraph::new(header_line(state)), header_area);
    render_messages_panel(frame, messages_area, state);
    match state.rename_prompt() {
        Some(prompt) => render_message_input(frame, input_area, prompt, InputMode::DisplayName),
        None => render_message_input(frame, input_area, state.draft(), InputMode::Message),
    }
    frame.render_widget(Paragraph::new(STATUS_HINTS), status_area);
}

fn header_line(state: &ChatViewState) -> Line<'static> {
    Line::from(vec![
        Span::styled(TITLE, styles::header_title_style()),
        Span::raw(" "),
        Span::styled("●", styles::connection_dot_style(state.is_connected())),
        Span::styled(
            format!(" {} online", state.roster().len()),
            styles::header_hint_style(),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("you: {}", state.display_name()),
            styles::header_hint_style(),
        ),
    ])
}

fn render_messages_panel(frame: &mut Frame<'_>, area: Rect, state: &ChatViewState) {
    // Inner width = area width - 2 (borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let elements = build_message_list_elements(state.messages(), state.typing().is_active());
    let items: Vec<ListItem<'static>> = elements
        .iter()
        .map(|element| element_to_list_item(element, inner_width))
        .collect();
    let last = items.len().checked_sub(1);

    let list = List::new(items).block(
        Block::default()
            .title("Messages")
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );

    // Selecting the newest entry keeps it scrolled into view.
    let mut list_state = ListState::default();
    list_state.select(last);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_roster_panel(frame: &mut Frame<'_>, area: Rect, state: &ChatViewState) {
    let items: Vec<ListItem<'static>> = state
        .roster()
        .iter()
        .map(|name| {
            ListItem::new(Line::from(vec![
                Span::styled("● ", styles::roster_dot_style()),
                Span::styled(name.clone(), styles::roster_name_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Online Users")
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::domain::{message::ChatMessage, typing_indicator::TypingExpiryPolicy};

    fn draw(state: &ChatViewState) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).expect("test terminal should build");
        terminal
            .draw(|frame| render(frame, state))
            .expect("render should succeed");

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn message(text: &str, user: &str, is_own: bool) -> ChatMessage {
        ChatMessage {
            text: text.to_owned(),
            user: user.to_owned(),
            timestamp: "10:15:00".to_owned(),
            is_own,
        }
    }

    #[test]
    fn empty_view_shows_placeholder_texts() {
        let screen = draw(&ChatViewState::default());

        assert!(screen.contains("No messages yet. Start the conversation!"));
        assert!(screen.contains("Type a message..."));
        assert!(screen.contains("Esc: quit"));
    }

    #[test]
    fn header_shows_roster_count_and_name() {
        let mut state = ChatViewState::default();
        state.set_display_name("User42".to_owned());
        state.replace_roster(vec!["User42".to_owned(), "bob".to_owned()]);

        let line = header_line(&state);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.contains("2 online"));
        assert!(text.contains("you: User42"));
    }

    #[test]
    fn header_dot_tracks_connection() {
        let mut state = ChatViewState::default();
        assert_eq!(header_line(&state).spans[2].style, styles::connection_dot_style(false));

        state.set_connected(true);
        assert_eq!(header_line(&state).spans[2].style, styles::connection_dot_style(true));
    }

    #[test]
    fn messages_render_sender_and_read_mark() {
        let mut state = ChatViewState::default();
        state.push_message(message("hello there", "bob", false));
        state.push_message(message("hi bob", "me", true));

        let screen = draw(&state);

        assert!(screen.contains("bob"));
        assert!(screen.contains("hello there"));
        assert!(screen.contains("hi bob"));
        assert!(screen.contains("✓✓"));
        assert!(!screen.contains("No messages yet"));
    }

    #[test]
    fn typing_bubble_renders_while_active() {
        let mut state = ChatViewState::default();
        state.typing_mut().notify(
            Instant::now(),
            Duration::from_secs(2),
            TypingExpiryPolicy::Independent,
        );

        assert!(draw(&state).contains("typing…"));
    }

    #[test]
    fn roster_panel_is_toggled() {
        let mut state = ChatViewState::default();
        state.replace_roster(vec!["alice".to_owned()]);
        assert!(!draw(&state).contains("Online Users"));

        state.toggle_roster();
        let screen = draw(&state);

        assert!(screen.contains("Online Users"));
        assert!(screen.contains("● alice"));
    }

    #[test]
    fn rename_prompt_replaces_draft_line() {
        let mut state = ChatViewState::default();
        state.draft_mut().insert_char('x');
        state.open_rename_prompt();

        let screen = draw(&state);

        assert!(screen.contains("Display name"));
        assert!(screen.contains("New display name..."));
        assert!(screen.contains("Ctrl+N: cancel"));
    }

    #[test]
    fn long_messages_wrap_inside_the_panel() {
        let mut state = ChatViewState::default();
        let long_text = "word ".repeat(30);
        state.push_message(message(long_text.trim_end(), "bob", false));
        state.push_message(message(long_text.trim_end(), "me", true));

        let screen = draw(&state);

        let wrapped_rows = screen
            .lines()
            .filter(|row| row.contains("word word"))
            .count();
        assert!(wrapped_rows >= 4);
        assert!(screen.contains("10:15:00 ✓✓"));
    }

    #[test]
    fn newest_message_stays_visible() {
        let mut state = ChatViewState::default();
        for index in 0..30 {
            state.push_message(message(&format!("msg-{index}"), "bob", false));
        }

        let screen = draw(&state);

        assert!(screen.contains("msg-29"));
        assert!(!screen.contains("msg-0"));
    }
}
