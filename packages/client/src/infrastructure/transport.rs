//! Outbound message transport.
//!
//! ## Responsibility
//!
//! - Serialize `ClientMessage` values and write them to the room socket
//! - Close the socket on teardown
//!
//! The session only sees the `MessageSender` trait, not the socket type.

use async_trait::async_trait;
use futures_util::{Sink, SinkExt};
use tokio_tungstenite::tungstenite::{self, protocol::Message};

use crate::{error::ClientError, infrastructure::dto::websocket::ClientMessage};

/// Where outbound room messages go
#[async_trait]
pub trait MessageSender: Send {
    /// Send one message to the room server
    async fn send(&mut self, message: &ClientMessage) -> Result<(), ClientError>;

    /// Close the underlying connection
    async fn close(&mut self) -> Result<(), ClientError>;
}

/// `MessageSender` over the write half of a WebSocket connection
pub struct WebSocketSender<S> {
    sink: S,
}

impl<S> WebSocketSender<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl<S> MessageSender for WebSocketSender<S>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin + Send,
{
    async fn send(&mut self, message: &ClientMessage) -> Result<(), ClientError> {
        let json = serde_json::to_string(message)?;
        tracing::debug!("Sending: {}", json);
        self.sink
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        // Closing the sink sends the Close frame.
        self.sink
            .close()
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))
    }
}
