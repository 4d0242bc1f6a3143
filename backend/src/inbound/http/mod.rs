//! HTTP inbound adapter exposing REST endpoints.

pub mod consumption;
pub mod error;
pub mod health;
pub mod leaderboard;
pub mod purchases;
pub mod slices;
pub mod state;
#[cfg(test)]
pub mod test_support;
pub mod users;

pub use error::ApiResult;
