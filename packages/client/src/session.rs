//! WebSocket room session.
//!
//! One task owns the socket, the controller and the drift timer, and
//! multiplexes socket frames, player events, drift ticks and user commands.

use std::sync::Arc;

use futures_util::{StreamExt, stream::SplitStream};
use tokio::{
    net::TcpStream,
    sync::mpsc,
    time::{Interval, MissedTickBehavior},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};
use videosync_shared::time::Clock;

use crate::{
    command::{HELP, UserCommand},
    config::SyncPolicy,
    controller::RoomController,
    domain::{PlayerState, RoomLocation, Username},
    error::ClientError,
    infrastructure::{
        dto::websocket::{ClientMessage, decode_server_message},
        transport::{MessageSender, WebSocketSender},
    },
    player::{Player, SimulatedPlayer},
    reconciler::Reconciler,
    view::RoomView,
};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Why `run` returned without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    /// The user asked to pick a new display name
    Rename,
}

pub struct RoomSession<V> {
    controller: RoomController<SimulatedPlayer, V>,
    sender: Box<dyn MessageSender>,
    frames: SplitStream<Socket>,
    player_events: mpsc::UnboundedReceiver<PlayerState>,
    drift_ticker: Interval,
}

impl<V: RoomView> RoomSession<V> {
    /// Open the room socket and introduce ourselves
    pub async fn connect(
        location: &RoomLocation,
        username: &Username,
        view: V,
        clock: Arc<dyn Clock>,
        policy: SyncPolicy,
    ) -> Result<Self, ClientError> {
        let url = location.socket_url();
        tracing::info!("Connecting to {}", url);

        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        tracing::info!("Connected to room '{}'", location.room_id());

        let (write, frames) = ws_stream.split();
        let mut sender: Box<dyn MessageSender> = Box::new(WebSocketSender::new(write));
        sender
            .send(&ClientMessage::introduce(username.as_str()))
            .await?;

        let (events_tx, player_events) = mpsc::unbounded_channel();
        let player = SimulatedPlayer::new(clock.clone(), events_tx);
        let reconciler = Reconciler::new(player, clock, policy);
        let controller = RoomController::new(reconciler, view);

        let mut drift_ticker = tokio::time::interval(policy.drift_check_interval);
        drift_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ok(Self {
            controller,
            sender,
            frames,
            player_events,
            drift_ticker,
        })
    }

    /// Process events until the user leaves or the connection drops
    pub async fn run(
        &mut self,
        commands: &mut mpsc::UnboundedReceiver<UserCommand>,
    ) -> Result<SessionEnd, ClientError> {
        loop {
            tokio::select! {
                frame = self.frames.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.handle_frame(&text),
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ConnectionError(
                            "Connection closed by server".to_string(),
                        ));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                },
                Some(event) = self.player_events.recv() => {
                    tracing::trace!("Player event {:?}", event);
                    if let Some(message) = self.controller.on_player_event(event) {
                        self.sender.send(&message).await?;
                    }
                }
                _ = self.drift_ticker.tick() => {
                    if let Some(message) = self.controller.drift_check() {
                        self.sender.send(&message).await?;
                    }
                }
                command = commands.recv() => match command {
                    Some(command) => {
                        if let Some(end) = self.handle_command(command).await? {
                            return Ok(end);
                        }
                    }
                    // Input thread gone
                    None => return Ok(SessionEnd::Quit),
                },
            }
        }
    }

    fn handle_frame(&mut self, text: &str) {
        match decode_server_message(text) {
            Ok(Some(message)) => self.controller.on_server_message(message),
            Ok(None) => tracing::debug!("Ignoring unknown message: {}", text),
            Err(e) => tracing::warn!("Dropping frame: {}", e),
        }
    }

    async fn handle_command(
        &mut self,
        command: UserCommand,
    ) -> Result<Option<SessionEnd>, ClientError> {
        // Play/pause/seek only touch the player; the reconciler reports them.
        match command {
            UserCommand::Play => self.player_mut().play(),
            UserCommand::Pause => self.player_mut().pause(),
            UserCommand::Seek(seconds) => self.player_mut().seek(seconds),
            UserCommand::Queue(url) => self.sender.send(&ClientMessage::queue_url(url)).await?,
            UserCommand::Load(url) => self.sender.send(&ClientMessage::load_url(url)).await?,
            UserCommand::Skip => self.sender.send(&ClientMessage::skip()).await?,
            UserCommand::QueueControl { control, index } => {
                if let Some(message) = self.controller.queue_request(control, index) {
                    self.sender.send(&message).await?;
                }
            }
            UserCommand::Users => self.controller.show_users(),
            UserCommand::List => self.controller.show_queue(),
            UserCommand::Now => self.controller.show_current_video(),
            UserCommand::Help => self.controller.view_mut().notice(HELP),
            UserCommand::Rename => return Ok(Some(SessionEnd::Rename)),
            UserCommand::Quit => return Ok(Some(SessionEnd::Quit)),
        }
        Ok(None)
    }

    fn player_mut(&mut self) -> &mut SimulatedPlayer {
        self.controller.reconciler_mut().player_mut()
    }

    /// Stop the timer and close the socket
    pub async fn shutdown(mut self) -> Result<(), ClientError> {
        tracing::info!("Closing room connection");
        self.sender.close().await
    }
}
