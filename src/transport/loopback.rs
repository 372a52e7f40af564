use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::events::{InboundEvent, InboundEventKind, OutboundEvent};

use super::{registry::SubscriberRegistry, Subscription, Transport, TransportError};

const LOOPBACK_CONNECTED: &str = "LOOPBACK_CONNECTED";

/// In-process stand-in for a chat server.
///
/// Announcing a name broadcasts a one-entry roster back. Chat messages and
/// typing notifications are never echoed to the sender. Test builds record
/// every emitted event.
#[derive(Debug, Clone, Default)]
pub struct LoopbackTransport {
    registry: SubscriberRegistry,
    shared: Arc<Mutex<LoopbackShared>>,
}

#[derive(Debug, Default)]
struct LoopbackShared {
    connected: bool,
    #[cfg(test)]
    emitted: Vec<OutboundEvent>,
}

impl LoopbackTransport {
    /// Delivers `event` as if the server had sent it.
    #[cfg(test)]
    pub fn inject(&self, event: InboundEvent) -> usize {
        self.registry.dispatch(&event)
    }

    /// Simulates the server dropping the connection.
    #[cfg(test)]
    pub fn disconnect(&self) {
        self.lock().connected = false;
        self.registry.dispatch(&InboundEvent::Disconnected);
    }

    #[cfg(test)]
    pub fn emitted(&self) -> Vec<OutboundEvent> {
        self.lock().emitted.clone()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.registry.subscriber_count()
    }

    fn lock(&self) -> MutexGuard<'_, LoopbackShared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for LoopbackTransport {
    fn emit(&self, event: &OutboundEvent) -> Result<(), TransportError> {
        #[cfg(test)]
        self.lock().emitted.push(event.clone());

        if let OutboundEvent::SetUsername(name) = event {
            self.registry
                .dispatch(&InboundEvent::UserList(vec![name.clone()]));
        }

        Ok(())
    }

    fn subscribe(&self, kinds: &[InboundEventKind]) -> Subscription {
        self.registry.register(kinds)
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        {
            let mut shared = self.lock();
            if shared.connected {
                return Ok(());
            }
            shared.connected = true;
        }

        tracing::info!(code = LOOPBACK_CONNECTED, "loopback transport connected");
        self.registry.dispatch(&InboundEvent::Connected);
        Ok(())
    }
}
