//! Desktop WebSocket transport using tokio-tungstenite

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::ports::outbound::{CloseKind, Transport, TransportError, TransportEvent, TransportLink};

/// Opens tokio-tungstenite connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketTransport;

impl WebSocketTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn connect(&self, url: &Url) -> Result<Box<dyn TransportLink>, TransportError> {
        match connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                tracing::info!(url = %url, "Connected to quiz server");
                Ok(Box::new(WebSocketLink {
                    stream,
                    close_received: false,
                }))
            }
            Err(e) => Err(TransportError::Connect {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// One tokio-tungstenite connection.
pub struct WebSocketLink {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// Set once the server's close frame has been read
    close_received: bool,
}

#[async_trait]
impl TransportLink for WebSocketLink {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.stream
            .send(Message::Text(frame))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn next_event(&mut self) -> TransportEvent {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return TransportEvent::Frame(text),
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(frame = ?frame, "Server closed connection");
                    self.close_received = true;
                    return TransportEvent::Closed(CloseKind::Clean);
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::warn!(len = data.len(), "Ignoring binary frame");
                }
                // Ping/pong are answered by tungstenite itself
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "WebSocket error");
                    return TransportEvent::Closed(CloseKind::Unclean);
                }
                None => {
                    let kind = if self.close_received {
                        CloseKind::Clean
                    } else {
                        CloseKind::Unclean
                    };
                    return TransportEvent::Closed(kind);
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!(error = %e, "Closing link failed");
        }
    }
}
