//! # JavaScript interface
//!
//! Runs a whole draw session from a JSON description so a web front end can
//! drive the library without holding Rust state.
use crate::deck::Deck;
use crate::deck_set::DeckSet;
use crate::error::DeckError;
use crate::history::DrawRecord;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum Error {
  BadDecks(DeckError),
  NoDecks,
}

impl From<DeckError> for Error {
  fn from(error: DeckError) -> Self {
    Self::BadDecks(error)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckInput {
  pub name: String,
  pub cards: usize,
}

/// Input format for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
  /// Decks shuffled together, in display order
  pub decks: Vec<DeckInput>,
  /// Draw requests performed in order
  pub draws: Vec<usize>,
  /// Seed for a reproducible session
  #[serde(default)]
  pub seed: Option<u64>,
}

/// Output format for a session
#[derive(Debug, Serialize, Deserialize)]
pub struct Output {
  /// Draw records, most recent first
  pub history: Vec<DrawRecord>,
  pub decks: Vec<Deck>,
  pub total_remaining: usize,
}

/// Runs a draw session described by `input`
/// Assumes that input deserializes into a valid `Input`, and returns a serialized `Output`
/// or an error string
#[wasm_bindgen]
pub fn wingding_run(input: &JsValue) -> JsValue {
  let input: Input = match input.into_serde() {
    Err(e) => {
      return JsValue::from_str(&format!("Error deserializing session inputs: {:#?}", e));
    }
    Ok(v) => v,
  };
  let result = match run_impl(&input) {
    Err(e) => {
      return JsValue::from_str(&format!("Error running session for input: {:#?}", e));
    }
    Ok(v) => v,
  };
  JsValue::from_serde(&result).expect("this can't fail")
}

pub fn run_impl(input: &Input) -> Result<Output, Error> {
  if input.decks.is_empty() {
    return Err(Error::NoDecks);
  }
  let mut set = DeckSet::from_sizes(input.decks.iter().map(|d| (d.name.as_str(), d.cards)))?;
  if let Some(seed) = input.seed {
    set = set.with_seed(seed);
  }
  for &count in &input.draws {
    set.draw_cards(count);
  }
  Ok(Output {
    history: set.history().iter().cloned().collect(),
    total_remaining: set.total_remaining(),
    decks: set.decks().to_vec(),
  })
}
