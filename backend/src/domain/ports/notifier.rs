//! Port for the leaderboard change fan-out.
//!
//! Triggered after any mutation that can affect the ranking. Fire and
//! forget: the call never blocks the workflow and never fails it; delivery
//! to each subscriber is at most once per trigger with no replay for late
//! joiners.

/// Driven port the workflows notify after a ranking-affecting mutation.
#[cfg_attr(test, mockall::automock)]
pub trait LeaderboardNotifier: Send + Sync {
    /// Signal that the leaderboard view may have changed. Subscribers are
    /// expected to re-fetch the view; the signal carries no payload.
    fn leaderboard_changed(&self);
}

/// No-op implementation for tests that do not observe the fan-out.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[cfg(test)]
impl LeaderboardNotifier for NoopNotifier {
    fn leaderboard_changed(&self) {}
}
