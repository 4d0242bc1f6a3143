//! Pizza economy backend library.
//!
//! Users hold a coin balance, buy pizza slices, log each slice they eat, and
//! compete on a leaderboard ranked by total slices eaten. REST endpoints are
//! backed by a remote record store; leaderboard-affecting mutations push a
//! change signal to connected WebSocket clients.
//!
//! Layout follows a hexagonal shape: [`domain`] holds entities, ports, and
//! the workflow services; [`inbound`] holds the HTTP and WebSocket adapters;
//! [`outbound`] holds the record store adapters and the subscriber registry.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by tooling and the debug docs route.
pub use doc::ApiDoc;
