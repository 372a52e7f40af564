use serde::Deserialize;

use crate::{
    domain::typing_indicator::TypingExpiryPolicy,
    infra::config::{AppConfig, ChatConfig, LogConfig, ServerConfig, TransportKind},
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub server: Option<FileServerConfig>,
    pub chat: Option<FileChatConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(server) = self.server {
            server.merge_into(&mut config.server);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServerConfig {
    pub url: Option<String>,
    pub reconnect_delay_ms: Option<u64>,
    pub transport: Option<TransportKind>,
}

impl FileServerConfig {
    fn merge_into(self, config: &mut ServerConfig) {
        if let Some(url) = self.url {
            config.url = url;
        }

        if let Some(delay_ms) = self.reconnect_delay_ms {
            config.reconnect_delay_ms = delay_ms;
        }

        if let Some(transport) = self.transport {
            config.transport = transport;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub typing_timeout_ms: Option<u64>,
    pub typing_expiry: Option<TypingExpiryPolicy>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(timeout_ms) = self.typing_timeout_ms {
            config.typing_timeout_ms = timeout_ms;
        }

        if let Some(policy) = self.typing_expiry {
            config.typing_expiry = policy;
        }
    }
}
