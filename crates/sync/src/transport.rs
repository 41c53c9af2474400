// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Transport abstraction for submitting sync batches.
//!
//! Provides a trait-based transport layer that enables:
//! - Real WebSocket submission for production
//! - Mock transports for unit testing
//!
//! Submission is whole-batch: a transport either returns the server's
//! response or an error meaning nothing in the batch was confirmed.

use std::future::Future;
use std::pin::Pin;

use grind_core::protocol::{SyncRequest, SyncResponse};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed before a response arrived.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// The server replied with an unexpected or malformed body.
    ///
    /// Retried like any other transport failure, but kept distinguishable
    /// for diagnostics.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Transport trait for batch submission.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations.
pub trait Transport: Send + Sync {
    /// Submit a batch and await the server's confirmed set.
    fn submit(
        &mut self,
        request: SyncRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<SyncResponse>> + Send + '_>>;
}

/// WebSocket transport using tokio-tungstenite.
///
/// Each submission opens a fresh connection, sends the request as one text
/// frame, awaits the response frame, and closes. A timeout imposed by the
/// underlying socket surfaces as an ordinary transport failure.
pub struct WebSocketTransport {
    /// URL of the remote sync endpoint.
    url: String,
}

impl WebSocketTransport {
    /// Create a transport for the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        WebSocketTransport { url: url.into() }
    }
}

impl Transport for WebSocketTransport {
    fn submit(
        &mut self,
        request: SyncRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<SyncResponse>> + Send + '_>> {
        Box::pin(async move {
            use futures_util::{SinkExt, StreamExt};
            use tokio_tungstenite::tungstenite::Message;

            let (ws_stream, _) = tokio_tungstenite::connect_async(&self.url)
                .await
                .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

            let (mut sink, mut stream) = ws_stream.split();

            let json = request
                .to_json()
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;

            sink.send(Message::Text(json.into()))
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;
            sink.flush()
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string()))?;

            let response = loop {
                match stream.next().await {
                    Some(Ok(Message::Text(text))) => {
                        break SyncResponse::from_json(&text)
                            .map_err(|e| TransportError::Protocol(e.to_string()))?;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        return Err(TransportError::ConnectionClosed);
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        return Err(TransportError::ReceiveFailed(e.to_string()));
                    }
                }
            };

            let _ = sink.close().await;
            Ok(response)
        })
    }
}
