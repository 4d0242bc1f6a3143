//! Shared WebSocket adapter state.

use std::sync::Arc;

use crate::outbound::notify::UpdateHub;

/// Dependency bundle for the WebSocket entry point.
#[derive(Clone)]
pub struct WsState {
    /// Hub each accepted session subscribes to.
    pub hub: Arc<UpdateHub>,
}

impl WsState {
    /// Bundle the update hub for injection into the `/ws` handler.
    #[must_use]
    pub fn new(hub: Arc<UpdateHub>) -> Self {
        Self { hub }
    }
}
