//! Inbound adapters: REST endpoints and the WebSocket fan-out.

pub mod http;
pub mod ws;
