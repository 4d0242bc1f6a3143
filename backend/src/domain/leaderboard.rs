//! Leaderboard projection.
//!
//! A pure read: users with a positive eaten-count, sorted by eaten-count
//! descending with ties broken by name ascending, ranked 1..N by position.
//! Recomputed on every request; nothing is cached or stored.

use serde::Serialize;

use crate::domain::user::User;

/// One ranked row of the leaderboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    /// User display name.
    pub name: String,
    /// Total slices eaten.
    pub number_of_pizza_eaten: i64,
    /// Position in the ranking, starting at 1 with no gaps.
    pub rank: usize,
}

/// Project users into the ranked leaderboard view.
///
/// Users with a zero eaten-count are excluded. The output rank sequence is
/// contiguous from 1 for any non-empty input.
#[must_use]
pub fn rank_users(users: Vec<User>) -> Vec<LeaderboardEntry> {
    let mut eaters: Vec<User> = users.into_iter().filter(|u| u.pizzas_eaten > 0).collect();
    eaters.sort_by(|a, b| {
        b.pizzas_eaten
            .cmp(&a.pizzas_eaten)
            .then_with(|| a.name.cmp(&b.name))
    });
    eaters
        .into_iter()
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            name: user.name,
            number_of_pizza_eaten: user.pizzas_eaten,
            rank: index + 1,
        })
        .collect()
}
