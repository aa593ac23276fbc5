//! # Deck construction errors
//!
use std::error::Error;
use std::fmt;

/// Errors raised while building a `Deck` or a `DeckSet`
///
/// Only construction can fail. Drawing never returns an error: an empty deck
/// or an over-sized request degrades to a smaller tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckError {
  /// A deck was declared with zero cards
  InvalidCapacity { name: String, total_cards: usize },
  /// A deck claims more remaining cards than it was created with
  InvalidRemaining {
    name: String,
    total_cards: usize,
    remaining: usize,
  },
  /// A deck handed to a new set has already had cards drawn from it
  AlreadyDrawn(String),
  /// A deck name is empty or whitespace only
  EmptyDeckName,
  /// Two decks in the same set share a name
  DuplicateDeckName(String),
  /// A deck list line could not be parsed
  BadDeckListLine(String),
}

impl fmt::Display for DeckError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidCapacity { name, total_cards } => write!(
        f,
        "deck \"{}\" must hold at least one card, got {}",
        name, total_cards
      ),
      Self::InvalidRemaining {
        name,
        total_cards,
        remaining,
      } => write!(
        f,
        "deck \"{}\" cannot have {} of {} cards remaining",
        name, remaining, total_cards
      ),
      Self::AlreadyDrawn(name) => write!(f, "deck \"{}\" has already been drawn from", name),
      Self::EmptyDeckName => write!(f, "deck name cannot be empty"),
      Self::DuplicateDeckName(name) => write!(f, "deck \"{}\" appears more than once", name),
      Self::BadDeckListLine(line) => write!(f, "cannot parse deck list line: {}", line),
    }
  }
}

impl Error for DeckError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    None
  }
}
