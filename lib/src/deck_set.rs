//! # Deck sets and the weighted draw
//!
//! A `DeckSet` shuffles several decks together without ever building the
//! combined pile. Each single card draw picks a deck with probability
//! proportional to its remaining card count, which is the same as picking a
//! card uniformly among every remaining card of every deck.
use crate::deck::Deck;
use crate::error::DeckError;
use crate::history::{DrawHistory, DrawRecord};
use crate::records::{category_counts, Record};
use rand::prelude::*;
use rand::rngs::SmallRng;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

type Subscriber = Box<dyn FnMut(&Deck) + Send>;

/// DeckSet owns the decks of a session, performs weighted draws across them
/// and keeps the draw history
pub struct DeckSet {
  decks: Vec<Deck>,
  history: DrawHistory,
  rng: SmallRng,
  subscribers: Vec<Subscriber>,
}

impl DeckSet {
  /// Returns a new set from `decks`, seeded from entropy
  ///
  /// Deck names must be unique and every deck must still be full, since the
  /// new set starts with an empty history.
  pub fn new(decks: Vec<Deck>) -> Result<Self, DeckError> {
    let mut seen = HashSet::with_capacity(decks.len());
    for deck in &decks {
      if deck.drawn() > 0 {
        return Err(DeckError::AlreadyDrawn(deck.name().to_string()));
      }
      if !seen.insert(deck.name()) {
        return Err(DeckError::DuplicateDeckName(deck.name().to_string()));
      }
    }
    Ok(Self {
      decks,
      history: DrawHistory::new(),
      rng: SmallRng::from_entropy(),
      subscribers: Vec::new(),
    })
  }

  /// Returns a new set from `(name, total_cards)` pairs
  pub fn from_sizes<I, S>(sizes: I) -> Result<Self, DeckError>
  where
    I: IntoIterator<Item = (S, usize)>,
    S: AsRef<str>,
  {
    let decks = sizes
      .into_iter()
      .map(|(name, total_cards)| Deck::new(name.as_ref(), total_cards))
      .collect::<Result<Vec<_>, _>>()?;
    Self::new(decks)
  }

  /// Returns a new set from a plain text deck list
  ///
  /// One deck per line as `<count> <name>`. Blank lines and `#` comments
  /// are ignored.
  ///
  /// ```
  /// use wingding::deck_set::DeckSet;
  /// let set = DeckSet::from_list("
  ///   ## base game
  ///   171 North American Birds
  ///   81 European Expansion
  /// ").unwrap();
  /// assert_eq!(set.total_remaining(), 252);
  /// ```
  pub fn from_list(list: &str) -> Result<Self, DeckError> {
    lazy_static! {
      static ref DECK_LINE_REGEX: Regex = Regex::new(r"^\s*(?P<amount>\d+)\s+(?P<name>\S.*?)\s*$")
        .expect("Failed to compile DECK_LINE_REGEX regex");
    }
    let mut sizes = Vec::new();
    for line in list.lines() {
      let trimmed = line.trim();
      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }
      let caps = DECK_LINE_REGEX
        .captures(trimmed)
        .ok_or_else(|| DeckError::BadDeckListLine(line.to_string()))?;
      let amount = caps["amount"]
        .parse::<usize>()
        .map_err(|_| DeckError::BadDeckListLine(line.to_string()))?;
      sizes.push((caps["name"].to_string(), amount));
    }
    Self::from_sizes(sizes)
  }

  /// Returns a set with one deck per distinct `field` value in `records`,
  /// sized by the number of records in that category
  pub fn from_records(records: &[Record], field: &str) -> Result<Self, DeckError> {
    Self::from_sizes(category_counts(records, field))
  }

  /// Reseeds the random number generator, for reproducible sessions
  pub fn with_seed(mut self, seed: u64) -> Self {
    self.rng = SmallRng::seed_from_u64(seed);
    self
  }

  /// Replaces the (empty) history, e.g. with `DrawHistory::bounded`
  pub fn with_history(mut self, history: DrawHistory) -> Self {
    self.history = history;
    self
  }

  /// Registers `callback` to be called with a deck's new state after every
  /// card removed from it
  pub fn subscribe<F>(&mut self, callback: F)
  where
    F: FnMut(&Deck) + Send + 'static,
  {
    self.subscribers.push(Box::new(callback));
  }

  pub fn decks(&self) -> &[Deck] {
    &self.decks
  }

  pub fn deck(&self, name: &str) -> Option<&Deck> {
    self.decks.iter().find(|d| d.name() == name)
  }

  pub fn history(&self) -> &DrawHistory {
    &self.history
  }

  pub fn total_cards(&self) -> usize {
    self.decks.iter().map(Deck::total_cards).sum()
  }

  pub fn total_remaining(&self) -> usize {
    self.decks.iter().map(Deck::remaining).sum()
  }

  pub fn is_exhausted(&self) -> bool {
    self.total_remaining() == 0
  }

  /// Draws `count` cards using the set's own random number generator
  ///
  /// See `draw_cards_with_rng`.
  pub fn draw_cards(&mut self, count: usize) -> DrawRecord {
    let mut rng = self.rng.clone();
    let record = self.draw_cards_with_rng(count, &mut rng);
    self.rng = rng;
    record
  }

  /// Draws `count` cards one at a time, each from a deck chosen with
  /// probability proportional to its remaining cards at that moment
  ///
  /// Returns the per-deck tally and prepends it to the history. Stops early
  /// once every deck is empty, so the tally may hold fewer than `count`
  /// cards. A request for 0 cards returns an all-zero tally and is not
  /// recorded.
  pub fn draw_cards_with_rng(&mut self, count: usize, rng: &mut impl Rng) -> DrawRecord {
    let mut record = DrawRecord::zeroed(self.decks.iter().map(Deck::name));
    if count == 0 {
      return record;
    }
    for _ in 0..count {
      let index = match pick_weighted(&self.decks, rng) {
        Some(index) => index,
        None => break,
      };
      let removed = self.decks[index].remove_cards(1);
      debug_assert_eq!(removed, 1);
      trace!(
        "drew from {} ({} left)",
        self.decks[index].name(),
        self.decks[index].remaining()
      );
      record.increment(index);
      self.notify(index);
    }
    debug!(
      "drew {} of {} requested cards, {} remaining across {} decks",
      record.total(),
      count,
      self.total_remaining(),
      self.decks.len()
    );
    self.history.push(record.clone());
    record
  }

  fn notify(&mut self, index: usize) {
    let deck = &self.decks[index];
    for subscriber in self.subscribers.iter_mut() {
      subscriber(deck);
    }
  }
}

impl fmt::Debug for DeckSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DeckSet")
      .field("decks", &self.decks)
      .field("history", &self.history)
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}

/// Returns the index of a deck chosen with probability proportional to its
/// remaining cards, or None if every deck is empty
pub fn pick_weighted(decks: &[Deck], rng: &mut impl Rng) -> Option<usize> {
  let total_remaining: usize = decks.iter().map(Deck::remaining).sum();
  if total_remaining == 0 {
    return None;
  }
  let pick = rng.gen_range(0, total_remaining);
  deck_for_pick(decks, pick)
}

/// Maps `pick` in `[0, total_remaining)` to a deck index
///
/// The range is laid out as one contiguous sub-range per non-empty deck,
/// sized by its remaining cards, in deck order.
pub fn deck_for_pick(decks: &[Deck], pick: usize) -> Option<usize> {
  let mut upper = 0;
  for (index, deck) in decks.iter().enumerate() {
    if deck.is_empty() {
      continue;
    }
    upper += deck.remaining();
    if pick < upper {
      return Some(index);
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use crate::deck::Deck;
  use crate::deck_set::*;
  use crate::error::DeckError;
  use crate::history::DrawHistory;
  use rand::rngs::SmallRng;
  use rand::SeedableRng;
  use std::sync::{Arc, Mutex};

  fn wingspan() -> DeckSet {
    DeckSet::from_sizes(vec![
      ("North American Birds", 22),
      ("European Expansion", 21),
      ("Oceania Expansion", 20),
    ])
    .unwrap()
    .with_seed(7)
  }

  fn assert_invariants(set: &DeckSet) {
    for deck in set.decks() {
      assert!(deck.remaining() <= deck.total_cards());
      assert_eq!(
        deck.drawn(),
        set.history().total_for(deck.name()),
        "{} drawn count disagrees with history",
        deck.name()
      );
    }
    assert_eq!(
      set.total_cards() - set.total_remaining(),
      set.history().total_drawn()
    );
  }

  #[test]
  fn duplicate_names_are_rejected() {
    let err = DeckSet::from_sizes(vec![("Core", 3), ("Core", 4)]).unwrap_err();
    assert_eq!(err, DeckError::DuplicateDeckName("Core".to_string()));
  }

  #[test]
  fn partly_drawn_decks_are_rejected() {
    let mut set = DeckSet::from_sizes(vec![("A", 10)]).unwrap();
    set.draw_cards(4);
    let err = DeckSet::new(set.decks().to_vec()).unwrap_err();
    assert_eq!(err, DeckError::AlreadyDrawn("A".to_string()));
    let fresh = DeckSet::new(vec![Deck::new("A", 10).unwrap()]).unwrap();
    assert_eq!(fresh.total_cards() - fresh.total_remaining(), fresh.history().total_drawn());
  }

  #[test]
  fn zero_sized_deck_is_rejected() {
    let err = DeckSet::from_sizes(vec![("Core", 3), ("Empty", 0)]).unwrap_err();
    match err {
      DeckError::InvalidCapacity { name, .. } => assert_eq!(name, "Empty"),
      e => panic!("unexpected error {:?}", e),
    }
  }

  #[test]
  fn five_draws_of_five() {
    let mut set = wingspan();
    let mut drawn = 0;
    for _ in 0..5 {
      let record = set.draw_cards(5);
      assert_eq!(record.total(), 5);
      drawn += record.total();
      assert_invariants(&set);
    }
    assert_eq!(drawn, 25);
    assert_eq!(set.total_remaining(), 38);
    assert_eq!(set.history().len(), 5);
    for deck in set.decks() {
      assert_eq!(
        deck.remaining(),
        deck.total_cards() - set.history().total_for(deck.name())
      );
    }
  }

  #[test]
  fn single_card_deck_exhausts() {
    let mut set = DeckSet::from_sizes(vec![("Solo", 1)]).unwrap();
    let record = set.draw_cards(3);
    assert_eq!(record.count_for("Solo"), 1);
    assert_eq!(record.total(), 1);
    assert_eq!(set.deck("Solo").unwrap().remaining(), 0);
    let record = set.draw_cards(1);
    assert_eq!(record.total(), 0);
    assert_eq!(record.count_for("Solo"), 0);
    assert!(set.is_exhausted());
    assert_eq!(set.history().len(), 2);
  }

  #[test]
  fn over_request_returns_what_remains() {
    let mut set = wingspan();
    set.draw_cards(10);
    let before = set.total_remaining();
    let record = set.draw_cards(1000);
    assert_eq!(record.total(), before);
    assert!(set.decks().iter().all(Deck::is_empty));
    assert_invariants(&set);
  }

  #[test]
  fn zero_draw_changes_nothing() {
    let mut set = wingspan();
    let record = set.draw_cards(0);
    assert_eq!(record.total(), 0);
    assert_eq!(record.iter().count(), 3);
    assert_eq!(set.total_remaining(), 63);
    assert!(set.history().is_empty());
  }

  #[test]
  fn history_is_most_recent_first() {
    let mut set = wingspan();
    let first = set.draw_cards(1);
    let second = set.draw_cards(2);
    let third = set.draw_cards(3);
    let history = set.history();
    assert_eq!(history.get(0), Some(&third));
    assert_eq!(history.get(1), Some(&second));
    assert_eq!(history.get(2), Some(&first));
    assert_eq!(history.up_to(2).count(), 2);
  }

  #[test]
  fn empty_decks_are_never_picked() {
    let mut set = DeckSet::from_sizes(vec![("Small", 2), ("Large", 50)])
      .unwrap()
      .with_seed(1);
    // Empty the small deck through draws until it is gone
    while set.deck("Small").unwrap().remaining() > 0 {
      set.draw_cards(1);
    }
    let large_before = set.deck("Large").unwrap().remaining();
    let record = set.draw_cards(large_before);
    assert_eq!(record.count_for("Small"), 0);
    assert_eq!(record.count_for("Large"), large_before);
  }

  #[test]
  fn set_without_decks_draws_nothing() {
    let mut set = DeckSet::new(Vec::new()).unwrap();
    let record = set.draw_cards(4);
    assert_eq!(record.total(), 0);
    assert_eq!(set.history().len(), 1);
  }

  #[test]
  fn same_seed_same_draws() {
    let mut a = wingspan();
    let mut b = wingspan();
    for _ in 0..6 {
      assert_eq!(a.draw_cards(4), b.draw_cards(4));
    }
  }

  #[test]
  fn deck_for_pick_skips_empty_decks() {
    let mut decks = vec![
      Deck::new("A", 3).unwrap(),
      Deck::new("B", 2).unwrap(),
      Deck::new("C", 4).unwrap(),
    ];
    decks[1].remove_cards(2);
    assert_eq!(deck_for_pick(&decks, 0), Some(0));
    assert_eq!(deck_for_pick(&decks, 2), Some(0));
    assert_eq!(deck_for_pick(&decks, 3), Some(2));
    assert_eq!(deck_for_pick(&decks, 6), Some(2));
    assert_eq!(deck_for_pick(&decks, 7), None);
  }

  #[test]
  fn pick_weighted_on_empty_decks_is_none() {
    let mut decks = vec![Deck::new("A", 1).unwrap()];
    decks[0].remove_cards(1);
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(pick_weighted(&decks, &mut rng), None);
  }

  #[test]
  fn weighting_follows_remaining_cards() {
    // 30 vs 10 cards: a single draw should come from the large deck 3/4 of the time
    let mut rng = SmallRng::seed_from_u64(42);
    let trials = 20_000;
    let mut large = 0;
    for _ in 0..trials {
      let mut set = DeckSet::from_sizes(vec![("Large", 30), ("Small", 10)]).unwrap();
      let record = set.draw_cards_with_rng(1, &mut rng);
      large += record.count_for("Large");
    }
    let p = large as f64 / trials as f64;
    assert!((p - 0.75).abs() < 0.02, "p = {}", p);
  }

  #[test]
  fn subscribers_see_every_removal() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut set = wingspan();
    let sink = Arc::clone(&seen);
    set.subscribe(move |deck| {
      sink
        .lock()
        .unwrap()
        .push((deck.name().to_string(), deck.remaining()))
    });
    set.draw_cards(4);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    for (name, remaining) in seen.iter() {
      assert!(*remaining < set.deck(name).unwrap().total_cards());
    }
  }

  #[test]
  fn bounded_history_keeps_latest() {
    let mut set = wingspan().with_history(DrawHistory::bounded(2));
    set.draw_cards(1);
    set.draw_cards(2);
    let last = set.draw_cards(3);
    assert_eq!(set.history().len(), 2);
    assert_eq!(set.history().latest(), Some(&last));
  }

  #[test]
  fn from_list_parses_counts_and_names() {
    let set = DeckSet::from_list(
      "
      # Wingspan
      171 North American Birds
      81   European Expansion

      95 Oceania Expansion
      ",
    )
    .unwrap();
    let names: Vec<_> = set.decks().iter().map(Deck::name).collect();
    assert_eq!(
      names,
      vec![
        "North American Birds",
        "European Expansion",
        "Oceania Expansion"
      ]
    );
    assert_eq!(set.total_cards(), 347);
  }

  #[test]
  fn from_list_rejects_bad_lines() {
    let err = DeckSet::from_list("12 Core\nCore without count").unwrap_err();
    assert_eq!(
      err,
      DeckError::BadDeckListLine("Core without count".to_string())
    );
    let err = DeckSet::from_list("0 Core").unwrap_err();
    match err {
      DeckError::InvalidCapacity { .. } => {}
      e => panic!("unexpected error {:?}", e),
    }
  }
}
