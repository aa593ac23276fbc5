//! # Draw records and history
//!
use std::collections::VecDeque;

/// Number of cards a single deck contributed to one draw request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDraw {
  pub deck: String,
  pub count: usize,
}

/// DrawRecord is the per-call breakdown of a `DeckSet::draw_cards` request
///
/// Every deck of the set appears once, in deck order, including decks that
/// contributed nothing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
  draws: Vec<DeckDraw>,
}

impl DrawRecord {
  /// Returns an all-zero record for the named decks
  pub fn zeroed<'a, I>(names: I) -> Self
  where
    I: IntoIterator<Item = &'a str>,
  {
    Self {
      draws: names
        .into_iter()
        .map(|name| DeckDraw {
          deck: name.to_string(),
          count: 0,
        })
        .collect(),
    }
  }

  pub(crate) fn increment(&mut self, index: usize) {
    self.draws[index].count += 1;
  }

  /// Returns the number of cards drawn from `deck`, 0 if the deck is unknown
  pub fn count_for(&self, deck: &str) -> usize {
    self
      .draws
      .iter()
      .find(|d| d.deck == deck)
      .map_or(0, |d| d.count)
  }

  pub fn total(&self) -> usize {
    self.draws.iter().map(|d| d.count).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.total() == 0
  }

  pub fn iter(&self) -> impl Iterator<Item = &DeckDraw> {
    self.draws.iter()
  }

  /// Only the decks that contributed at least one card
  pub fn nonzero(&self) -> impl Iterator<Item = &DeckDraw> {
    self.draws.iter().filter(|d| d.count > 0)
  }
}

/// DrawHistory is the most-recent-first log of draw records
///
/// Records are never modified once inserted. The log is unbounded unless
/// built with `DrawHistory::bounded`, in which case the oldest records are
/// dropped first.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DrawHistory {
  records: VecDeque<DrawRecord>,
  limit: Option<usize>,
}

impl DrawHistory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns a history that keeps at most `limit` records
  pub fn bounded(limit: usize) -> Self {
    Self {
      records: VecDeque::with_capacity(limit),
      limit: Some(limit),
    }
  }

  pub fn limit(&self) -> Option<usize> {
    self.limit
  }

  pub(crate) fn push(&mut self, record: DrawRecord) {
    if self.limit == Some(0) {
      return;
    }
    self.records.push_front(record);
    if let Some(limit) = self.limit {
      self.records.truncate(limit);
    }
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// The most recent record
  pub fn latest(&self) -> Option<&DrawRecord> {
    self.records.front()
  }

  /// Record at `index`, where 0 is the most recent
  pub fn get(&self, index: usize) -> Option<&DrawRecord> {
    self.records.get(index)
  }

  pub fn iter(&self) -> impl Iterator<Item = &DrawRecord> {
    self.records.iter()
  }

  /// The `n` most recent records, most recent first
  pub fn up_to(&self, n: usize) -> impl Iterator<Item = &DrawRecord> {
    self.records.iter().take(n)
  }

  /// Cards drawn across every retained record
  pub fn total_drawn(&self) -> usize {
    self.records.iter().map(DrawRecord::total).sum()
  }

  /// Cards drawn from `deck` across every retained record
  pub fn total_for(&self, deck: &str) -> usize {
    self.records.iter().map(|r| r.count_for(deck)).sum()
  }
}
