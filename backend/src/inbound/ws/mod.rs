//! WebSocket inbound adapter for the leaderboard change fan-out.
//!
//! Responsibilities:
//! - upgrade `/ws` requests into sessions
//! - subscribe each session to the update hub
//! - keep WebSocket framing concerns at the edge of the system

use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get, rt};
use tracing::error;

mod session;

pub mod messages;
pub mod state;

/// Handle WebSocket upgrade for the `/ws` endpoint.
#[get("/ws")]
pub async fn ws_entry(
    state: web::Data<state::WsState>,
    req: HttpRequest,
    body: Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, session, stream) = actix_ws::handle(&req, body).inspect_err(|err| {
        error!(error = %err, "WebSocket upgrade failed");
    })?;

    let hub = state.hub.clone();
    rt::spawn(session::handle_ws_session(hub, session, stream));

    Ok(response)
}
