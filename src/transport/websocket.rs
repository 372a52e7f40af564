use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::TcpStream,
    sync::{mpsc, watch},
};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::domain::events::{InboundEvent, InboundEventKind, OutboundEvent};

use super::{frame, registry::SubscriberRegistry, Subscription, Transport, TransportError};

const WS_WORKER_STARTED: &str = "WS_WORKER_STARTED";
const WS_WORKER_STOPPED: &str = "WS_WORKER_STOPPED";
const WS_WORKER_SHUTDOWN_FAILED: &str = "WS_WORKER_SHUTDOWN_FAILED";
const WS_CONNECTED: &str = "WS_CONNECTED";
const WS_CONNECT_FAILED: &str = "WS_CONNECT_FAILED";
const WS_CONNECTION_LOST: &str = "WS_CONNECTION_LOST";
const WS_FRAME_DECODE_FAILED: &str = "WS_FRAME_DECODE_FAILED";
const WS_FRAME_ENCODE_FAILED: &str = "WS_FRAME_ENCODE_FAILED";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket-backed transport with automatic reconnect.
///
/// Events emitted while disconnected are queued and flushed once a
/// connection is up again.
#[derive(Debug)]
pub struct WebSocketTransport {
    url: String,
    reconnect_delay: Duration,
    registry: SubscriberRegistry,
    outbound_tx: mpsc::UnboundedSender<OutboundEvent>,
    outbound_rx: Option<mpsc::UnboundedReceiver<OutboundEvent>>,
    stop_tx: Option<watch::Sender<bool>>,
    worker: Option<JoinHandle<()>>,
}

impl WebSocketTransport {
    pub fn new(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        Self {
            url: url.into(),
            reconnect_delay,
            registry: SubscriberRegistry::default(),
            outbound_tx,
            outbound_rx: Some(outbound_rx),
            stop_tx: None,
            worker: None,
        }
    }
}

impl Transport for WebSocketTransport {
    fn emit(&self, event: &OutboundEvent) -> Result<(), TransportError> {
        self.outbound_tx
            .send(event.clone())
            .map_err(|_| TransportError::ChannelClosed)
    }

    fn subscribe(&self, kinds: &[InboundEventKind]) -> Subscription {
        self.registry.register(kinds)
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        let Some(outbound_rx) = self.outbound_rx.take() else {
            return Ok(());
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::RuntimeInit)?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let link = Link {
            url: self.url.clone(),
            reconnect_delay: self.reconnect_delay,
            registry: self.registry.clone(),
        };

        let worker = thread::Builder::new()
            .name("chatterm-ws".to_owned())
            .spawn(move || runtime.block_on(link.run(outbound_rx, stop_rx)))
            .map_err(TransportError::WorkerSpawn)?;

        tracing::info!(code = WS_WORKER_STARTED, url = %self.url, "websocket worker started");

        self.stop_tx = Some(stop_tx);
        self.worker = Some(worker);
        Ok(())
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }

        if let Some(worker) = self.worker.take() {
            if let Err(error) = worker.join() {
                tracing::warn!(
                    code = WS_WORKER_SHUTDOWN_FAILED,
                    error = ?error,
                    "websocket worker panicked on shutdown"
                );
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Stopped,
    Lost,
}

struct Link {
    url: String,
    reconnect_delay: Duration,
    registry: SubscriberRegistry,
}

impl Link {
    async fn run(
        self,
        mut outbound_rx: mpsc::UnboundedReceiver<OutboundEvent>,
        mut stop_rx: watch::Receiver<bool>,
    ) {
        loop {
            let connected = tokio::select! {
                _ = stop_rx.changed() => break,
                result = connect_async(self.url.as_str()) => result,
            };

            match connected {
                Ok((stream, _)) => {
                    tracing::info!(code = WS_CONNECTED, url = %self.url, "websocket connected");
                    self.registry.dispatch(&InboundEvent::Connected);

                    let end = self
                        .session(stream, &mut outbound_rx, &mut stop_rx)
                        .await;
                    self.registry.dispatch(&InboundEvent::Disconnected);

                    if end == SessionEnd::Stopped {
                        break;
                    }
                    tracing::warn!(code = WS_CONNECTION_LOST, "websocket connection lost");
                }
                Err(error) => {
                    tracing::warn!(
                        code = WS_CONNECT_FAILED,
                        url = %self.url,
                        error = %error,
                        "websocket connect failed"
                    );
                }
            }

            tokio::select! {
                _ = stop_rx.changed() => break,
                () = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        tracing::info!(code = WS_WORKER_STOPPED, "websocket worker stopped");
    }

    async fn session(
        &self,
        stream: WsStream,
        outbound_rx: &mut mpsc::UnboundedReceiver<OutboundEvent>,
        stop_rx: &mut watch::Receiver<bool>,
    ) -> SessionEnd {
        let (mut sink, mut source) = stream.split();

        loop {
            tokio::select! {
                _ = stop_rx.changed() => {
                    let _ = sink.close().await;
                    return SessionEnd::Stopped;
                }
                outbound = outbound_rx.recv() => {
                    let Some(event) = outbound else {
                        let _ = sink.close().await;
                        return SessionEnd::Stopped;
                    };
                    let raw = match frame::encode(&event) {
                        Ok(raw) => raw,
                        Err(error) => {
                            tracing::warn!(code = WS_FRAME_ENCODE_FAILED, error = %error, "dropping outbound event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(raw.into())).await.is_err() {
                        return SessionEnd::Lost;
                    }
                }
                inbound = source.next() => {
                    match inbound {
                        Some(Ok(Message::Text(text))) => self.deliver(text.as_str()),
                        Some(Ok(Message::Binary(bytes))) => {
                            if let Ok(text) = std::str::from_utf8(&bytes) {
                                self.deliver(text);
                            }
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                            return SessionEnd::Lost;
                        }
                        Some(Ok(_)) => {}
                    }
                }
            }
        }
    }

    fn deliver(&self, raw: &str) {
        match frame::decode(raw) {
            Ok(Some(event)) => {
                self.registry.dispatch(&event);
            }
            Ok(None) => {
                tracing::debug!("ignoring unknown inbound event");
            }
            Err(error) => {
                tracing::debug!(code = WS_FRAME_DECODE_FAILED, error = %error, "dropping inbound frame");
            }
        }
    }
}
