//! # Deck
//!
//! A deck is a named pool of cards that only ever shrinks. Individual card
//! identity is never consumed by callers, so the pool is a counter.
use crate::error::DeckError;
use std::convert::TryFrom;

/// Deck fields as they appear on the wire, validated into a `Deck`
#[derive(Debug, Clone, Deserialize)]
struct DeckState {
  name: String,
  total_cards: usize,
  remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeckState")]
pub struct Deck {
  name: String,
  total_cards: usize,
  remaining: usize,
}

impl Deck {
  /// Returns a full deck named `name` holding `total_cards` cards
  ///
  /// Fails with `InvalidCapacity` when `total_cards` is zero and with
  /// `EmptyDeckName` when the trimmed name is empty.
  pub fn new(name: &str, total_cards: usize) -> Result<Self, DeckError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(DeckError::EmptyDeckName);
    }
    if total_cards == 0 {
      return Err(DeckError::InvalidCapacity {
        name: name.to_string(),
        total_cards,
      });
    }
    Ok(Self {
      name: name.to_string(),
      total_cards,
      remaining: total_cards,
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn total_cards(&self) -> usize {
    self.total_cards
  }

  pub fn remaining(&self) -> usize {
    self.remaining
  }

  /// Number of cards removed since the deck was created
  pub fn drawn(&self) -> usize {
    self.total_cards - self.remaining
  }

  pub fn is_empty(&self) -> bool {
    self.remaining == 0
  }

  /// Removes up to `count` cards and returns how many were actually removed
  ///
  /// Asking for more cards than remain empties the deck and returns the
  /// smaller number. Removing 0 cards is a no-op that returns 0.
  pub fn remove_cards(&mut self, count: usize) -> usize {
    let removed = std::cmp::min(count, self.remaining);
    self.remaining -= removed;
    removed
  }
}

impl TryFrom<DeckState> for Deck {
  type Error = DeckError;

  fn try_from(state: DeckState) -> Result<Self, Self::Error> {
    let mut deck = Deck::new(&state.name, state.total_cards)?;
    if state.remaining > deck.total_cards {
      return Err(DeckError::InvalidRemaining {
        name: deck.name,
        total_cards: state.total_cards,
        remaining: state.remaining,
      });
    }
    deck.remaining = state.remaining;
    Ok(deck)
  }
}
