//! Council game configuration.
//!
//! Simulators configure the engine at startup: player count, the victory
//! threshold (which doubles as the hard point ceiling), the secret-objective
//! hand limit, and the per-status-phase scoring caps. Everything else -
//! decks, initiative, the galaxy - arrives through other seams.

use serde::{Deserialize, Serialize};

/// Default victory threshold and point ceiling.
pub const STANDARD_VICTORY_THRESHOLD: u8 = 10;

/// Extended-game variant threshold.
pub const EXTENDED_VICTORY_THRESHOLD: u8 = 14;

/// Complete configuration for one council game.
///
/// ## Example
///
/// ```
/// use star_council::core::CouncilConfig;
///
/// let config = CouncilConfig::new(4);
/// assert_eq!(config.victory_threshold, 10);
///
/// let long_game = CouncilConfig::extended(6);
/// assert_eq!(long_game.victory_threshold, 14);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilConfig {
    /// Number of players (2-8).
    pub player_count: usize,

    /// Points required to win; also the ceiling points can never exceed.
    pub victory_threshold: u8,

    /// Maximum secret objectives a player may hold at once.
    pub secret_hand_limit: usize,

    /// Public objectives scorable per player per status phase.
    pub status_phase_public_cap: u8,

    /// Secret objectives scorable per player per status phase.
    pub status_phase_secret_cap: u8,
}

impl CouncilConfig {
    /// Standard configuration: 10-point game, 3-card secret hand,
    /// one public + one secret objective per status phase.
    ///
    /// ## Panics
    ///
    /// Panics unless `player_count` is 2-8.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(
            (2..=8).contains(&player_count),
            "Player count must be 2-8"
        );

        Self {
            player_count,
            victory_threshold: STANDARD_VICTORY_THRESHOLD,
            secret_hand_limit: 3,
            status_phase_public_cap: 1,
            status_phase_secret_cap: 1,
        }
    }

    /// Extended variant: identical rules with a 14-point threshold.
    #[must_use]
    pub fn extended(player_count: usize) -> Self {
        Self::new(player_count).with_victory_threshold(EXTENDED_VICTORY_THRESHOLD)
    }

    /// Override the victory threshold / point ceiling.
    #[must_use]
    pub fn with_victory_threshold(mut self, threshold: u8) -> Self {
        assert!(threshold > 0, "Victory threshold must be positive");
        self.victory_threshold = threshold;
        self
    }

    /// Override the secret-objective hand limit.
    #[must_use]
    pub fn with_secret_hand_limit(mut self, limit: usize) -> Self {
        self.secret_hand_limit = limit;
        self
    }
}
