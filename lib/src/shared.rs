//! # Thread-safe deck set handle
//!
//! A weighted draw reads every deck's remaining count and then mutates one
//! of them, so concurrent draws against the same set must be serialized.
use crate::deck::Deck;
use crate::deck_set::DeckSet;
use crate::history::DrawRecord;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle that serializes all access to a `DeckSet`
#[derive(Debug, Clone)]
pub struct SharedDeckSet {
  inner: Arc<Mutex<DeckSet>>,
}

impl SharedDeckSet {
  pub fn new(set: DeckSet) -> Self {
    Self {
      inner: Arc::new(Mutex::new(set)),
    }
  }

  // Deck counts stay within bounds even if a subscriber panicked mid-draw.
  fn lock(&self) -> MutexGuard<'_, DeckSet> {
    self
      .inner
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Draws `count` cards while holding the lock for the whole request
  pub fn draw_cards(&self, count: usize) -> DrawRecord {
    self.lock().draw_cards(count)
  }

  /// Runs `f` with exclusive access to the set
  pub fn with<F, T>(&self, f: F) -> T
  where
    F: FnOnce(&mut DeckSet) -> T,
  {
    f(&mut self.lock())
  }

  pub fn total_remaining(&self) -> usize {
    self.lock().total_remaining()
  }

  /// Snapshot of the decks at the time of the call
  pub fn decks(&self) -> Vec<Deck> {
    self.lock().decks().to_vec()
  }
}
