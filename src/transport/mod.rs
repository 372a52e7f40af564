//! Transport layer: the injected event channel ChatView talks through.

pub mod frame;
pub mod loopback;
pub mod registry;
pub mod websocket;

use thiserror::Error;

use crate::domain::events::{InboundEventKind, OutboundEvent};

pub use registry::Subscription;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("outbound channel is closed")]
    ChannelClosed,
    #[error("failed to build transport runtime: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("failed to spawn transport worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// Bidirectional named-event channel.
pub trait Transport {
    /// Sends an event to the other side. Delivery is not confirmed.
    fn emit(&self, event: &OutboundEvent) -> Result<(), TransportError>;

    /// Registers interest in `kinds`. Dropping the subscription deregisters it.
    fn subscribe(&self, kinds: &[InboundEventKind]) -> Subscription;

    /// Starts delivering inbound events. Calling it again is a no-op.
    fn connect(&mut self) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn emit(&self, event: &OutboundEvent) -> Result<(), TransportError> {
        (**self).emit(event)
    }

    fn subscribe(&self, kinds: &[InboundEventKind]) -> Subscription {
        (**self).subscribe(kinds)
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        (**self).connect()
    }
}

/// Returns the transport module name for smoke checks.
pub fn module_name() -> &'static str {
    "transport"
}
