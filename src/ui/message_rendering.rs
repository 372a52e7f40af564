//! Message list rendering logic.
//!
//! Own messages are right-aligned with a read mark after the timestamp.
//! Messages from others carry a bold sender label. A typing bubble is
//! appended while the remote indicator is raised.

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::message::ChatMessage;

use super::styles;

pub const EMPTY_STATE_TEXT: &str = "No messages yet. Start the conversation!";
pub const TYPING_TEXT: &str = "typing…";
const READ_MARK: &str = "✓✓";

/// Represents a visual element in the messages list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    EmptyState,
    Bubble {
        sender: Option<String>,
        text: String,
        timestamp: String,
        is_own: bool,
    },
    TypingBubble,
}

/// Builds the visual elements for the message log.
pub fn build_message_list_elements(
    messages: &[ChatMessage],
    remote_typing: bool,
) -> Vec<MessageListElement> {
    let mut elements: Vec<_> = messages
        .iter()
        .map(|message| MessageListElement::Bubble {
            sender: (!message.is_own).then(|| message.user.clone()),
            text: message.text.clone(),
            timestamp: message.timestamp.clone(),
            is_own: message.is_own,
        })
        .collect();

    if elements.is_empty() {
        elements.push(MessageListElement::EmptyState);
    }
    if remote_typing {
        elements.push(MessageListElement::TypingBubble);
    }

    elements
}

/// Converts a list element to a ListItem laid out for `width` columns.
pub fn element_to_list_item(element: &MessageListElement, width: usize) -> ListItem<'static> {
    match element {
        MessageListElement::EmptyState => ListItem::new(Line::from(Span::styled(
            EMPTY_STATE_TEXT,
            styles::muted_text_style(),
        ))),
        MessageListElement::TypingBubble => ListItem::new(vec![
            Line::default(),
            Line::from(Span::styled(TYPING_TEXT, styles::muted_text_style())),
        ]),
        MessageListElement::Bubble {
            text,
            timestamp,
            is_own: true,
            ..
        } => own_bubble(text, timestamp, width),
        MessageListElement::Bubble {
            sender,
            text,
            timestamp,
            is_own: false,
        } => other_bubble(
            sender.as_deref().unwrap_or_default(),
            text,
            timestamp,
            width,
        ),
    }
}

fn own_bubble(text: &str, timestamp: &str, width: usize) -> ListItem<'static> {
    let style = styles::own_message_style();
    let mut lines = vec![Line::default()];

    for text_line in content_lines(text, width) {
        lines.push(right_aligned(&text_line, width, style));
    }
    lines.push(right_aligned(
        &format!("{timestamp} {READ_MARK}"),
        width,
        style,
    ));

    ListItem::new(lines)
}

fn other_bubble(sender: &str, text: &str, timestamp: &str, width: usize) -> ListItem<'static> {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            sender.to_owned(),
            styles::message_sender_style(),
        )),
    ];

    for text_line in content_lines(text, width) {
        lines.push(Line::from(Span::styled(
            text_line,
            styles::message_text_style(),
        )));
    }
    lines.push(Line::from(Span::styled(
        timestamp.to_owned(),
        styles::message_time_style(),
    )));

    ListItem::new(lines)
}

/// Splits `text` into display rows no wider than `width` columns.
fn content_lines(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let width = width.max(1);
    text.lines()
        .flat_map(|line| {
            if line.is_empty() {
                return vec![String::new()];
            }
            textwrap::wrap(line, width)
                .into_iter()
                .map(|row| row.into_owned())
                .collect()
        })
        .collect()
}

/// Pads `text` on the left so it ends at column `width`.
fn right_aligned(text: &str, width: usize, style: ratatui::style::Style) -> Line<'static> {
    let padding = width.saturating_sub(text.width());
    Line::from(vec![
        Span::raw(" ".repeat(padding)),
        Span::styled(text.to_owned(), style),
    ])
}
