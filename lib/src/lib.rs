//! # Weighted Multi-Deck Draw Library
//!
//! wingding simulates drawing cards from several decks shuffled together, as in
//! board games that mix a base set with expansions. Every draw picks a deck with
//! probability proportional to the cards it still holds, and each draw request is
//! logged to a most-recent-first history.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
extern crate regex;
extern crate serde_json;
extern crate wasm_bindgen;

pub mod deck;
pub mod deck_set;
pub mod error;
pub mod history;
pub mod records;
pub mod shared;
pub mod simulation;
pub mod wingding;

pub use crate::deck::Deck;
pub use crate::deck_set::DeckSet;
pub use crate::error::DeckError;
pub use crate::history::{DeckDraw, DrawHistory, DrawRecord};
pub use crate::wingding::wingding_run;
