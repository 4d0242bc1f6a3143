//! Outbound adapters for the driven ports.

pub mod notify;
pub mod store;
