use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::{
    cli::{Cli, Command},
    domain,
    infra::{
        self,
        config::{ServerConfig, TransportKind},
        contracts::LocalStore,
        local_store::TomlLocalStore,
        storage_layout::StorageLayout,
    },
    transport, ui,
    usecases::{
        self, bootstrap,
        display_name::{normalize_display_name, DISPLAY_NAME_KEY},
    },
};

pub fn run(cli: Cli) -> Result<()> {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        transport = transport::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Run { server, offline } => {
            let mut context = bootstrap::bootstrap(cli.config.as_deref())?;
            apply_run_overrides(&mut context.config.server, server, offline);

            let mut shell = bootstrap::compose_shell(&context)?;
            ui::shell::start(&context, shell.event_source.as_mut(), &mut shell.view)?;
        }
        Command::SetName { name } => {
            let layout = StorageLayout::resolve()?;
            let path = store_display_name(&layout, &name)?;
            println!(
                "Display name set to {}. Stored in {}.",
                name.trim(),
                path.display()
            );
        }
    }

    Ok(())
}

fn apply_run_overrides(server: &mut ServerConfig, url: Option<String>, offline: bool) {
    if let Some(url) = url {
        server.url = url;
        server.transport = TransportKind::WebSocket;
    }
    if offline {
        server.transport = TransportKind::Loopback;
    }
}

fn store_display_name(layout: &StorageLayout, name: &str) -> Result<PathBuf> {
    let name =
        normalize_display_name(name).ok_or_else(|| anyhow!("display name must not be empty"))?;

    layout.ensure_dirs()?;
    let mut store = TomlLocalStore::new(layout.local_store_file());
    store.set(DISPLAY_NAME_KEY, name)?;
    tracing::info!(path = %store.path().display(), "display name stored");

    Ok(store.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::display_name::resolve_display_name;

    fn temp_layout(root: &std::path::Path) -> StorageLayout {
        StorageLayout {
            config_dir: root.join("chatterm"),
            log_dir: root.join("chatterm").join("logs"),
        }
    }

    #[test]
    fn server_override_forces_websocket() {
        let mut server = ServerConfig {
            transport: TransportKind::Loopback,
            ..ServerConfig::default()
        };

        apply_run_overrides(&mut server, Some("ws://chat.local/ws".to_owned()), false);

        assert_eq!(server.url, "ws://chat.local/ws");
        assert_eq!(server.transport, TransportKind::WebSocket);
    }

    #[test]
    fn offline_forces_loopback() {
        let mut server = ServerConfig::default();

        apply_run_overrides(&mut server, None, true);

        assert_eq!(server.transport, TransportKind::Loopback);
        assert_eq!(server.url, ServerConfig::default().url);
    }

    #[test]
    fn stored_name_is_used_on_next_start() {
        let root = tempfile::tempdir().expect("temp dir should be creatable");
        let layout = temp_layout(root.path());

        let path = store_display_name(&layout, "  alice ").expect("name should be stored");

        let store = TomlLocalStore::new(path);
        assert_eq!(resolve_display_name(&store), "alice");
    }

    #[test]
    fn blank_name_is_rejected() {
        let root = tempfile::tempdir().expect("temp dir should be creatable");
        let layout = temp_layout(root.path());

        assert!(store_display_name(&layout, "   ").is_err());
        assert!(!layout.local_store_file().exists());
    }
}
