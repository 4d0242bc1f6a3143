//! Wire-level message definitions for the WebSocket adapter.

use serde::Serialize;

/// Outbound payload pushed to every subscriber when the leaderboard may
/// have changed. Carries no data; clients re-fetch `/leaderboard`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LeaderboardChanged {
    event: &'static str,
}

impl Default for LeaderboardChanged {
    fn default() -> Self {
        Self {
            event: "leaderboard_changed",
        }
    }
}

impl LeaderboardChanged {
    /// The JSON text frame sent over the wire.
    #[must_use]
    pub fn frame() -> String {
        // A struct of one static field cannot fail to serialise.
        serde_json::to_string(&Self::default()).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_frame_is_a_bare_event_object() {
        assert_eq!(
            LeaderboardChanged::frame(),
            r#"{"event":"leaderboard_changed"}"#
        );
    }
}
