//! Draw/discard decks for card names and ids.
//!
//! `CardDeck` is a draw pile plus a discard pile. Drawing from an empty
//! draw pile reshuffles the discard pile back in; drawing when both piles
//! are empty is a deck-exhaustion error, never a panic.

use crate::core::error::{CouncilError, Result};
use crate::core::rng::GameRng;

/// A shuffled draw pile with a discard pile.
///
/// Generic over the item: the council uses decks of proposal names, but
/// decks of objective ids work the same way.
#[derive(Clone, Debug)]
pub struct CardDeck<T> {
    name: String,
    draw_pile: Vec<T>,
    discard_pile: Vec<T>,
}

impl<T> CardDeck<T> {
    /// Create a deck with the given cards in draw order (last card on top).
    #[must_use]
    pub fn new(name: impl Into<String>, cards: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: name.into(),
            draw_pile: cards.into_iter().collect(),
            discard_pile: Vec::new(),
        }
    }

    /// Create a deck and shuffle it immediately.
    #[must_use]
    pub fn shuffled(
        name: impl Into<String>,
        cards: impl IntoIterator<Item = T>,
        rng: &mut GameRng,
    ) -> Self {
        let mut deck = Self::new(name, cards);
        rng.shuffle(&mut deck.draw_pile);
        deck
    }

    /// Draw the top card.
    ///
    /// Reshuffles the discard pile into the draw pile when the draw pile is
    /// empty; fails with [`CouncilError::DeckExhausted`] only when both
    /// piles are empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<T> {
        if self.draw_pile.is_empty() && !self.discard_pile.is_empty() {
            self.draw_pile.append(&mut self.discard_pile);
            rng.shuffle(&mut self.draw_pile);
            tracing::debug!(
                deck = %self.name,
                count = self.draw_pile.len(),
                "reshuffled discard pile into draw pile"
            );
        }

        self.draw_pile.pop().ok_or_else(|| CouncilError::DeckExhausted {
            deck: self.name.clone(),
        })
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: T) {
        self.discard_pile.push(card);
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_size(&self) -> usize {
        self.discard_pile.len()
    }

    /// Whether both piles are empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.draw_pile.is_empty() && self.discard_pile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> GameRng {
        GameRng::new(42)
    }

    #[test]
    fn test_draw_order() {
        let mut rng = rng();
        let mut deck = CardDeck::new("Test", ["bottom", "middle", "top"]);

        assert_eq!(deck.draw(&mut rng).unwrap(), "top");
        assert_eq!(deck.draw(&mut rng).unwrap(), "middle");
        assert_eq!(deck.draw(&mut rng).unwrap(), "bottom");
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_reshuffle_from_discard() {
        let mut rng = rng();
        let mut deck = CardDeck::new("Test", ["a", "b"]);

        let first = deck.draw(&mut rng).unwrap();
        let second = deck.draw(&mut rng).unwrap();
        deck.discard(first);
        deck.discard(second);
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.discard_size(), 2);

        // Drawing pulls the discard pile back in.
        let redrawn = deck.draw(&mut rng).unwrap();
        assert!(redrawn == "a" || redrawn == "b");
        assert_eq!(deck.discard_size(), 0);
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn test_exhaustion_error() {
        let mut rng = rng();
        let mut deck: CardDeck<&str> = CardDeck::new("Proposal", []);

        assert!(deck.is_exhausted());
        let err = deck.draw(&mut rng).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the Proposal deck is exhausted with no discard pile to reshuffle"
        );
    }

    #[test]
    fn test_shuffled_is_deterministic() {
        let cards = || (0..20).collect::<Vec<u32>>();

        let mut deck_a = CardDeck::shuffled("A", cards(), &mut GameRng::new(7));
        let mut deck_b = CardDeck::shuffled("B", cards(), &mut GameRng::new(7));

        let mut rng_a = GameRng::new(0);
        let mut rng_b = GameRng::new(0);
        for _ in 0..20 {
            assert_eq!(
                deck_a.draw(&mut rng_a).unwrap(),
                deck_b.draw(&mut rng_b).unwrap()
            );
        }
    }
}
