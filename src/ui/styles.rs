//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Header and panels
// =============================================================================

/// Style for the window title in the header.
pub fn header_title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Connection dot: green when connected, red otherwise.
pub fn connection_dot_style(connected: bool) -> Style {
    if connected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Style for secondary header text like the roster count.
pub fn header_hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn roster_dot_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn roster_name_style() -> Style {
    Style::default().fg(Color::White)
}

// =============================================================================
// Message list styles
// =============================================================================

/// Style for the sender label on messages from others (white, bold).
pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the timestamp under a message from others.
pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for text of messages from others.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for text and timestamp of own messages.
pub fn own_message_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Style for the "typing…" bubble and empty-state hint.
pub fn muted_text_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

// =============================================================================
// Input styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Send hint: highlighted when the draft can be sent, dimmed otherwise.
pub fn send_hint_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_dot_is_green_or_red() {
        assert_eq!(connection_dot_style(true).fg, Some(Color::Green));
        assert_eq!(connection_dot_style(false).fg, Some(Color::Red));
    }

    #[test]
    fn message_sender_style_is_bold_white() {
        let style = message_sender_style();
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn own_messages_are_blue() {
        assert_eq!(own_message_style().fg, Some(Color::Blue));
    }

    #[test]
    fn send_hint_is_dimmed_when_disabled() {
        assert_eq!(send_hint_style(false).fg, Some(Color::DarkGray));
        assert!(send_hint_style(true)
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
