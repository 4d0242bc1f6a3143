//! Domain user model.
//!
//! Field names mirror the `users` table columns so rows decode directly.
//! `coins` is debited only by the purchase workflow and
//! `number_of_pizza_eaten` is incremented only by the consumption workflow;
//! no other writer exists for either field.

use serde::{Deserialize, Serialize};

use crate::domain::purchase::HistorySummary;

/// Coin balance granted to every newly registered user.
pub const STARTING_COINS: i64 = 100;

/// A registered user with their coin balance and running eaten-count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name, also the leaderboard tie-breaker.
    pub name: String,
    /// Age in years.
    pub age: u16,
    /// Self-reported gender.
    pub gender: String,
    /// Coin balance, never negative.
    pub coins: i64,
    /// Total slices eaten, never negative.
    #[serde(rename = "number_of_pizza_eaten", default)]
    pub pizzas_eaten: i64,
}

/// A user joined with their purchase history, as returned by `GET /users`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserWithHistory {
    /// The user row.
    #[serde(flatten)]
    pub user: User,
    /// One entry per purchased unit, eaten or not.
    pub history: Vec<HistorySummary>,
}
