//! JSON text frames: `{"event": "<name>", "data": <payload>}`.
//!
//! Only the named chat events travel on the wire; connect and disconnect are
//! produced locally by the transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    events::{InboundEvent, OutboundEvent},
    message::ChatMessage,
};

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid payload for `{event}`: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode `{event}`: {source}")]
    Encode {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

pub fn encode(event: &OutboundEvent) -> Result<String, FrameError> {
    let name = event.name();
    let data = match event {
        OutboundEvent::SetUsername(user) | OutboundEvent::Typing(user) => {
            Value::String(user.clone())
        }
        OutboundEvent::ChatMessage(message) => serde_json::to_value(message)
            .map_err(|source| FrameError::Encode { event: name, source })?,
    };

    serde_json::to_string(&WireFrame {
        event: name.to_owned(),
        data,
    })
    .map_err(|source| FrameError::Encode { event: name, source })
}

/// Decodes an inbound frame. Unknown event names yield `Ok(None)`.
pub fn decode(raw: &str) -> Result<Option<InboundEvent>, FrameError> {
    let frame: WireFrame = serde_json::from_str(raw).map_err(FrameError::Malformed)?;

    let event = match frame.event.as_str() {
        "chat-message" => InboundEvent::ChatMessage(payload::<ChatMessage>(&frame)?),
        "user-list" => InboundEvent::UserList(payload::<Vec<String>>(&frame)?),
        "typing" => InboundEvent::Typing(payload::<String>(&frame)?),
        _ => return Ok(None),
    };

    Ok(Some(event))
}

fn payload<T: serde::de::DeserializeOwned>(frame: &WireFrame) -> Result<T, FrameError> {
    T::deserialize(&frame.data).map_err(|source| FrameError::Payload {
        event: frame.event.clone(),
        source,
    })
}
