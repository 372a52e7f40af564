use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single entry of the chat log.
///
/// Field names follow the wire payload (`isOwn` is camel-cased there). Missing
/// fields in an inbound payload fall back to empty values instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub timestamp: String,
    /// Set only on messages authored by this client.
    #[serde(rename = "isOwn", default)]
    pub is_own: bool,
}

impl ChatMessage {
    /// Builds a locally authored message for optimistic echo.
    pub fn own(text: impl Into<String>, user: impl Into<String>, timestamp: String) -> Self {
        Self {
            text: text.into(),
            user: user.into(),
            timestamp,
            is_own: true,
        }
    }
}

/// Formats a wall-clock instant the way message timestamps are shown.
pub fn time_label(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn own_message_is_flagged_as_own() {
        let message = ChatMessage::own("hi", "User7", "10:00:00".to_owned());

        assert!(message.is_own);
        assert_eq!(message.user, "User7");
        assert_eq!(message.text, "hi");
    }

    #[test]
    fn serializes_is_own_with_wire_name() {
        let message = ChatMessage::own("hi", "User7", "10:00:00".to_owned());
        let json = serde_json::to_value(&message).expect("message should serialize");

        assert_eq!(json["isOwn"], serde_json::Value::Bool(true));
        assert!(json.get("is_own").is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_empty_values() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"text":"hello"}"#).expect("partial payload should parse");

        assert_eq!(message.text, "hello");
        assert_eq!(message.user, "");
        assert_eq!(message.timestamp, "");
        assert!(!message.is_own);
    }

    #[test]
    fn time_label_is_hh_mm_ss() {
        let at = Local
            .with_ymd_and_hms(2026, 2, 14, 9, 5, 7)
            .single()
            .expect("fixture time should be unambiguous");

        assert_eq!(time_label(at), "09:05:07");
    }
}
