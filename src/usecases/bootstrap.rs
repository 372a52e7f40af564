use std::path::Path;

use crate::{
    infra::{
        self,
        config::{ServerConfig, TransportKind},
        error::AppError,
        local_store::TomlLocalStore,
        storage_layout::StorageLayout,
    },
    transport::{loopback::LoopbackTransport, websocket::WebSocketTransport, Transport},
    ui::CrosstermEventSource,
    usecases::{
        chat_view::{ChatSettings, ChatView},
        context::AppContext,
        contracts::AppEventSource,
    },
};

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub view: ChatView<Box<dyn Transport>>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let context = build_context(config_path)?;
    context.layout.ensure_dirs()?;
    let guard = infra::logging::init(&context.config.logging, &context.layout.log_dir)?;

    Ok(context.with_log_guard(guard))
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;
    let layout = StorageLayout::resolve()?;

    Ok(AppContext::new(config, layout))
}

pub fn compose_transport(server: &ServerConfig) -> Box<dyn Transport> {
    match server.transport {
        TransportKind::WebSocket => Box::new(WebSocketTransport::new(
            server.url.clone(),
            server.reconnect_delay(),
        )),
        TransportKind::Loopback => Box::new(LoopbackTransport::default()),
    }
}

/// Mounts the chat view on a freshly composed transport and starts it.
pub fn compose_shell(context: &AppContext) -> Result<ShellComposition, AppError> {
    let store = TomlLocalStore::new(context.layout.local_store_file());
    let transport = compose_transport(&context.config.server);
    let mut view = ChatView::mount(
        transport,
        &store,
        ChatSettings::from(&context.config.chat),
    );
    view.connect_transport()?;

    Ok(ShellComposition {
        event_source: Box::new(CrosstermEventSource),
        view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infra::config::AppConfig, usecases::contracts::ChatOrchestrator};

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, AppConfig::default());
    }

    #[test]
    fn loopback_shell_connects_immediately() {
        let root = tempfile::tempdir().expect("temp dir should be creatable");
        let mut config = AppConfig::default();
        config.server.transport = TransportKind::Loopback;
        let layout = StorageLayout {
            config_dir: root.path().to_path_buf(),
            log_dir: root.path().join("logs"),
        };
        let context = AppContext::new(config, layout);

        let mut shell = compose_shell(&context).expect("loopback shell should compose");
        shell
            .view
            .pump(std::time::Instant::now())
            .expect("pump should succeed");

        assert!(shell.view.state().is_connected());
        assert_eq!(shell.view.state().roster().len(), 1);
    }
}
