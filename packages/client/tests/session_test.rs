//! Session tests against a scripted in-process room server.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde_json::{Value, json};
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::timeout,
};
use videosync_client::{
    command::UserCommand,
    config::SyncPolicy,
    domain::{QueueControl, RoomLocation, Username, Video},
    error::ClientError,
    session::{RoomSession, SessionEnd},
    view::RoomView,
};
use videosync_shared::time::MonotonicClock;

const WAIT: Duration = Duration::from_secs(5);

enum Push {
    Text(String),
    Close,
}

/// Server side of the single connection a test makes
struct Connection {
    room_ids: mpsc::UnboundedSender<String>,
    received: mpsc::UnboundedSender<Value>,
    pushes: mpsc::UnboundedReceiver<Push>,
}

type RoomState = Arc<Mutex<Option<Connection>>>;

/// Scripted room server: records what the client sends and pushes what the test asks
struct MockRoom {
    addr: SocketAddr,
    room_ids: mpsc::UnboundedReceiver<String>,
    received: mpsc::UnboundedReceiver<Value>,
    pushes: mpsc::UnboundedSender<Push>,
}

impl MockRoom {
    async fn start() -> Self {
        let (room_ids_tx, room_ids) = mpsc::unbounded_channel();
        let (received_tx, received) = mpsc::unbounded_channel();
        let (pushes, pushes_rx) = mpsc::unbounded_channel();
        let state: RoomState = Arc::new(Mutex::new(Some(Connection {
            room_ids: room_ids_tx,
            received: received_tx,
            pushes: pushes_rx,
        })));

        let app = Router::new()
            .route("/socket/{room_id}", get(socket_handler))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            room_ids,
            received,
            pushes,
        }
    }

    fn location(&self) -> RoomLocation {
        RoomLocation::parse(&format!("http://{}/room/movie-night", self.addr)).unwrap()
    }

    fn push(&self, message: Value) {
        self.pushes.send(Push::Text(message.to_string())).unwrap();
    }

    fn push_raw(&self, text: &str) {
        self.pushes.send(Push::Text(text.to_string())).unwrap();
    }

    fn close(&self) {
        self.pushes.send(Push::Close).unwrap();
    }

    /// Next frame sent by the client
    async fn next_frame(&mut self) -> Value {
        timeout(WAIT, self.received.recv())
            .await
            .expect("timed out waiting for a client frame")
            .expect("connection ended")
    }

    /// Skip the `introduce` frame
    async fn introduced(&mut self) {
        let frame = self.next_frame().await;
        assert_eq!(frame["type"], "introduce");
    }
}

async fn socket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<RoomState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, room_id, state))
}

async fn handle_socket(socket: WebSocket, room_id: String, state: RoomState) {
    let Some(mut connection) = state.lock().await.take() else {
        return;
    };
    connection.room_ids.send(room_id).ok();

    let (mut write, mut read) = socket.split();
    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let value: Value = serde_json::from_str(text.as_str()).unwrap();
                    connection.received.send(value).ok();
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            push = connection.pushes.recv() => match push {
                Some(Push::Text(text)) => {
                    if write.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Some(Push::Close) | None => {
                    write.send(Message::Close(None)).await.ok();
                    break;
                }
            },
        }
    }
}

/// View that reports renders as short strings
struct ChannelView {
    rendered: mpsc::UnboundedSender<String>,
}

impl RoomView for ChannelView {
    fn render_users(&mut self, users: &[String]) {
        self.rendered.send(format!("users:{}", users.join(","))).ok();
    }

    fn user_joined(&mut self, user_name: &str) {
        self.rendered.send(format!("joined:{}", user_name)).ok();
    }

    fn user_left(&mut self, user_name: &str) {
        self.rendered.send(format!("left:{}", user_name)).ok();
    }

    fn render_queue(&mut self, queue: &[Video]) {
        self.rendered.send(format!("queue:{}", queue.len())).ok();
    }

    fn show_current_video(&mut self, video: Option<&Video>) {
        let id = video.map_or("none", |video| video.id.as_str());
        self.rendered.send(format!("video:{}", id)).ok();
    }

    fn notice(&mut self, text: &str) {
        self.rendered.send(format!("notice:{}", text)).ok();
    }
}

struct RunningSession {
    commands: mpsc::UnboundedSender<UserCommand>,
    rendered: mpsc::UnboundedReceiver<String>,
    task: JoinHandle<Result<SessionEnd, ClientError>>,
}

impl RunningSession {
    async fn start(room: &MockRoom, username: &str) -> Self {
        let policy = SyncPolicy {
            drift_check_interval: Duration::from_millis(50),
            suppression_window: Duration::from_millis(100),
        };
        Self::start_with_policy(room, username, policy).await
    }

    async fn start_with_policy(room: &MockRoom, username: &str, policy: SyncPolicy) -> Self {
        let (rendered_tx, rendered) = mpsc::unbounded_channel();
        let view = ChannelView {
            rendered: rendered_tx,
        };
        let mut session = RoomSession::connect(
            &room.location(),
            &Username::new(username).unwrap(),
            view,
            Arc::new(MonotonicClock::new()),
            policy,
        )
        .await
        .unwrap();

        let (commands, mut commands_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let result = session.run(&mut commands_rx).await;
            session.shutdown().await.ok();
            result
        });

        Self {
            commands,
            rendered,
            task,
        }
    }

    fn command(&self, command: UserCommand) {
        self.commands.send(command).unwrap();
    }

    /// Wait until the view renders `expected`, skipping other renders
    async fn wait_for_render(&mut self, expected: &str) {
        timeout(WAIT, async {
            while let Some(rendered) = self.rendered.recv().await {
                if rendered == expected {
                    return;
                }
            }
            panic!("view closed before rendering {}", expected);
        })
        .await
        .expect("timed out waiting for render");
    }

    async fn finish(self) -> Result<SessionEnd, ClientError> {
        timeout(WAIT, self.task)
            .await
            .expect("session did not end")
            .unwrap()
    }
}

fn paused_init(video_id: &str, position: f64) -> Value {
    json!({
        "type": "init",
        "payload": {
            "videoId": video_id,
            "videoPos": position,
            "playbackState": "PAUSED",
            "queue": [],
            "users": ["alice"],
        }
    })
}

#[tokio::test]
async fn test_introduce_is_sent_first_with_trimmed_name() {
    // テスト項目: 接続直後に前後の空白を除いた表示名で introduce が送信される
    // given (前提条件):
    let mut room = MockRoom::start().await;

    // when (操作):
    let session = RunningSession::start(&room, "  bob  ").await;

    // then (期待する結果):
    let room_id = timeout(WAIT, room.room_ids.recv()).await.unwrap();
    assert_eq!(room_id.as_deref(), Some("movie-night"));
    assert_eq!(
        room.next_frame().await,
        json!({"type": "introduce", "payload": {"username": "bob"}})
    );

    session.command(UserCommand::Quit);
    assert!(matches!(session.finish().await, Ok(SessionEnd::Quit)));
}

#[tokio::test]
async fn test_local_play_after_init_sends_current_position() {
    // テスト項目: init 後にローカルで再生すると現在位置付きの play が送信される
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let mut session = RunningSession::start(&room, "bob").await;
    room.introduced().await;
    room.push(paused_init("abc", 42.0));
    session.wait_for_render("users:alice").await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    // when (操作):
    session.command(UserCommand::Play);

    // then (期待する結果):
    let frame = room.next_frame().await;
    assert_eq!(frame["type"], "play");
    let position = frame["payload"]["position"].as_f64().unwrap();
    assert!((position - 42.0).abs() < 0.5, "position {}", position);

    session.command(UserCommand::Quit);
    session.finish().await.unwrap();
}

#[tokio::test]
async fn test_server_play_is_not_echoed() {
    // テスト項目: サーバーからの play に対してクライアントは play を送り返さない
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let mut session = RunningSession::start(&room, "bob").await;
    room.introduced().await;
    room.push(paused_init("abc", 42.0));
    session.wait_for_render("users:alice").await;

    // when (操作):
    room.push(json!({"type": "play", "payload": {"position": 42.0}}));
    tokio::time::sleep(Duration::from_millis(300)).await;
    session.command(UserCommand::Queue("https://youtu.be/next".to_string()));

    // then (期待する結果):
    assert_eq!(
        room.next_frame().await,
        json!({"type": "queueurl", "payload": {"url": "https://youtu.be/next"}})
    );

    session.command(UserCommand::Quit);
    session.finish().await.unwrap();
}

#[tokio::test]
async fn test_seek_while_paused_is_reported() {
    // テスト項目: 一時停止中のシークがドリフトチェックで pause として送信される
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let mut session = RunningSession::start(&room, "bob").await;
    room.introduced().await;
    room.push(paused_init("abc", 42.0));
    session.wait_for_render("users:alice").await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    // when (操作):
    session.command(UserCommand::Seek(120.0));

    // then (期待する結果):
    assert_eq!(
        room.next_frame().await,
        json!({"type": "pause", "payload": {"position": 120.0}})
    );

    session.command(UserCommand::Quit);
    session.finish().await.unwrap();
}

#[tokio::test]
async fn test_unknown_and_malformed_messages_are_skipped() {
    // テスト項目: 未知の type や不正な payload は無視され、セッションは続く
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let mut session = RunningSession::start(&room, "bob").await;
    room.introduced().await;

    // when (操作):
    room.push(json!({"type": "chat", "payload": {"text": "hi"}}));
    room.push(json!({"type": "play", "payload": {}}));
    room.push_raw("not json");
    room.push(json!({"type": "join", "payload": {"userName": "carol"}}));

    // then (期待する結果):
    session.wait_for_render("joined:carol").await;
    assert!(!session.task.is_finished());

    session.command(UserCommand::Quit);
    session.finish().await.unwrap();
}

#[tokio::test]
async fn test_queue_control_sends_reorder() {
    // テスト項目: 3 番目の項目を先頭へ移動すると reorderqueue {from:2, to:0} が送信される
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let mut session = RunningSession::start(&room, "bob").await;
    room.introduced().await;
    room.push(json!({
        "type": "syncqueue",
        "payload": {"queue": [{"id": "a"}, {"id": "b"}, {"id": "c"}]}
    }));
    session.wait_for_render("queue:3").await;

    // when (操作):
    session.command(UserCommand::QueueControl {
        control: QueueControl::MoveToTop,
        index: 2,
    });

    // then (期待する結果):
    assert_eq!(
        room.next_frame().await,
        json!({"type": "reorderqueue", "payload": {"from": 2, "to": 0}})
    );

    session.command(UserCommand::Quit);
    session.finish().await.unwrap();
}

#[tokio::test]
async fn test_server_close_is_a_connection_error() {
    // テスト項目: サーバーが接続を閉じるとセッションは ConnectionError で終了する
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let session = RunningSession::start(&room, "bob").await;
    room.introduced().await;

    // when (操作):
    room.close();

    // then (期待する結果):
    let result = session.finish().await;
    assert!(matches!(result, Err(ClientError::ConnectionError(_))));
}

#[tokio::test]
async fn test_quit_closes_the_socket() {
    // テスト項目: /quit でセッションが終了し、ソケットが閉じられる
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let session = RunningSession::start(&room, "bob").await;
    room.introduced().await;

    // when (操作):
    session.command(UserCommand::Quit);
    let result = session.finish().await;

    // then (期待する結果):
    assert!(matches!(result, Ok(SessionEnd::Quit)));
    let after = timeout(WAIT, room.received.recv()).await.unwrap();
    assert!(after.is_none());
}

#[tokio::test]
async fn test_rename_ends_session() {
    // テスト項目: /rename でセッションが Rename として終了する
    // given (前提条件):
    let mut room = MockRoom::start().await;
    let session = RunningSession::start(&room, "bob").await;
    room.introduced().await;

    // when (操作):
    session.command(UserCommand::Rename);

    // then (期待する結果):
    assert!(matches!(session.finish().await, Ok(SessionEnd::Rename)));
}
