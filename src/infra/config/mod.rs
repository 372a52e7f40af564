mod app_config;
mod file_config;
mod loader;

pub use app_config::{AppConfig, ChatConfig, LogConfig, ServerConfig, TransportKind};
pub use loader::load;
