//! WebSocket session handler tests.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, dev::Server, dev::ServerHandle, web};
use awc::BoxedSocket;
use awc::ws::{Codec, Frame, Message};
use futures_util::{SinkExt, StreamExt};
use rstest::{fixture, rstest};
use serde_json::Value;

use super::*;
use crate::domain::ports::LeaderboardNotifier;
use crate::inbound::ws;
use crate::inbound::ws::state::WsState;
use crate::outbound::notify::UpdateHub;

type WsFramed = actix_codec::Framed<BoxedSocket, Codec>;

#[fixture]
async fn start_ws_server() -> (String, Arc<UpdateHub>, Server) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let hub = Arc::new(UpdateHub::new());
    let ws_state = WsState::new(Arc::clone(&hub));
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(ws_state.clone()))
            .service(ws::ws_entry)
    })
    .listen(listener)
    .expect("bind test server")
    .disable_signals()
    .run();
    let url = format!("http://{addr}");
    (url, hub, server)
}

#[fixture]
async fn ws_client(
    #[future] start_ws_server: (String, Arc<UpdateHub>, Server),
) -> (WsFramed, Arc<UpdateHub>, ServerHandle) {
    let (url, hub, server) = start_ws_server.await;
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let (_resp, socket) = awc::Client::default()
        .ws(format!("{url}/ws"))
        .connect()
        .await
        .expect("websocket connect");

    (socket, hub, handle)
}

/// Read frames until a text frame arrives, answering pings so the session's
/// idle timer keeps resetting.
async fn next_text_frame(socket: &mut WsFramed) -> Vec<u8> {
    loop {
        let frame = socket.next().await.expect("response frame").expect("frame");
        match frame {
            Frame::Text(bytes) => return bytes.to_vec(),
            Frame::Ping(payload) => {
                socket.send(Message::Pong(payload)).await.expect("send pong");
            }
            Frame::Pong(_) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

async fn wait_for_subscribers(hub: &UpdateHub, expected: usize) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while hub.subscriber_count() != expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| {
        panic!(
            "expected {expected} subscribers, found {}",
            hub.subscriber_count()
        )
    });
}

#[rstest]
#[actix_rt::test]
async fn each_trigger_delivers_one_leaderboard_changed_frame(
    #[future] ws_client: (WsFramed, Arc<UpdateHub>, ServerHandle),
) {
    let (mut socket, hub, _server) = ws_client.await;
    wait_for_subscribers(&hub, 1).await;

    hub.leaderboard_changed();
    let value: Value =
        serde_json::from_slice(&next_text_frame(&mut socket).await).expect("json frame");
    assert_eq!(
        value.get("event").and_then(Value::as_str),
        Some("leaderboard_changed")
    );

    hub.leaderboard_changed();
    let value: Value =
        serde_json::from_slice(&next_text_frame(&mut socket).await).expect("json frame");
    assert_eq!(
        value.get("event").and_then(Value::as_str),
        Some("leaderboard_changed")
    );
}

#[rstest]
#[actix_rt::test]
async fn a_closing_client_is_deregistered(
    #[future] ws_client: (WsFramed, Arc<UpdateHub>, ServerHandle),
) {
    let (mut socket, hub, _server) = ws_client.await;
    wait_for_subscribers(&hub, 1).await;

    socket
        .send(Message::Close(None))
        .await
        .expect("send close");
    drop(socket);

    wait_for_subscribers(&hub, 0).await;
}

#[rstest]
#[actix_rt::test]
async fn an_idle_client_is_closed_and_deregistered(
    #[future] ws_client: (WsFramed, Arc<UpdateHub>, ServerHandle),
) {
    let (mut socket, hub, _server) = ws_client.await;
    wait_for_subscribers(&hub, 1).await;
    tokio::time::sleep(CLIENT_TIMEOUT + HEARTBEAT_INTERVAL * 3).await;

    let observed_close = tokio::time::timeout(Duration::from_secs(2), async {
        let mut observed = None;
        while let Some(frame) = socket.next().await {
            match frame.expect("frame") {
                Frame::Ping(_) | Frame::Pong(_) => continue,
                Frame::Close(reason) => {
                    observed = reason;
                    break;
                }
                other => panic!("unexpected frame before close: {other:?}"),
            }
        }
        observed
    })
    .await
    .expect("close frame before timeout");

    let reason = observed_close.expect("close carries a reason");
    assert_eq!(reason.description.as_deref(), Some("heartbeat timeout"));

    wait_for_subscribers(&hub, 0).await;
}

mod close_actions {
    use super::*;

    fn description_of(action: &CloseAction) -> Option<&str> {
        match action {
            CloseAction::Close(Some(reason)) => reason.description.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn heartbeat_timeouts_close_with_a_normal_code() {
        let action = WsSession::close_action_for(&SessionError::HeartbeatTimeout);
        assert_eq!(description_of(&action), Some("heartbeat timeout"));
    }

    #[test]
    fn hub_shutdown_closes_with_an_away_code() {
        let action = WsSession::close_action_for(&SessionError::HubClosed);
        assert_eq!(description_of(&action), Some("server shutting down"));
    }

    #[test]
    fn client_initiated_closes_echo_the_reason_back() {
        let reason = CloseReason {
            code: CloseCode::Normal,
            description: Some("done".to_owned()),
        };
        let action = WsSession::close_action_for(&SessionError::ClientClosed(Some(reason)));
        assert_eq!(description_of(&action), Some("done"));
    }

    #[test]
    fn dropped_streams_need_no_close_frame() {
        assert!(matches!(
            WsSession::close_action_for(&SessionError::StreamClosed),
            CloseAction::None
        ));
    }
}
