//! Deterministic random number generation for deck shuffling.
//!
//! Same seed, same shuffle order - replays and tests depend on it. Uses
//! ChaCha8 for speed while keeping high-quality randomness.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by the card decks.
///
/// ```
/// use star_council::core::GameRng;
///
/// let mut a = GameRng::new(42);
/// let mut b = GameRng::new(42);
///
/// let mut deck_a = vec![1, 2, 3, 4, 5];
/// let mut deck_b = deck_a.clone();
/// a.shuffle(&mut deck_a);
/// b.shuffle(&mut deck_b);
/// assert_eq!(deck_a, deck_b);
/// ```
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
