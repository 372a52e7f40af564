use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::typing_indicator::TypingExpiryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    WebSocket,
    Loopback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub url: String,
    pub reconnect_delay_ms: u64,
    pub transport: TransportKind,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:3000/chat".to_owned(),
            reconnect_delay_ms: 2_000,
            transport: TransportKind::WebSocket,
        }
    }
}

impl ServerConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    pub typing_timeout_ms: u64,
    pub typing_expiry: TypingExpiryPolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_timeout_ms: 2_000,
            typing_expiry: TypingExpiryPolicy::Independent,
        }
    }
}

impl ChatConfig {
    pub fn typing_timeout(&self) -> Duration {
        Duration::from_millis(self.typing_timeout_ms)
    }
}
