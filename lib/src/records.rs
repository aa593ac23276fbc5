//! # Game piece records
//!
//! Card metadata (birds, bonus cards, goals) is an external dataset. The
//! library only needs to count records per category to size the decks, so a
//! record stays an untyped map of optional fields.
use std::collections::BTreeMap;

/// A single field value, either text or an integer
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Int(i64),
  Text(String),
}

impl FieldValue {
  /// Category key for grouping; integers use their decimal form
  pub fn to_category(&self) -> Option<String> {
    match self {
      Self::Int(i) => Some(i.to_string()),
      Self::Text(s) => {
        let s = s.trim();
        if s.is_empty() {
          None
        } else {
          Some(s.to_string())
        }
      }
    }
  }
}

pub type Record = BTreeMap<String, Option<FieldValue>>;

/// Anything that can produce the records of a dataset
pub trait RecordSource {
  type Error;

  fn load_records(&self) -> Result<Vec<Record>, Self::Error>;
}

/// Records stored as a JSON array of objects
#[derive(Debug, Clone, Copy)]
pub struct JsonRecords<'a>(pub &'a str);

impl<'a> RecordSource for JsonRecords<'a> {
  type Error = serde_json::Error;

  fn load_records(&self) -> Result<Vec<Record>, Self::Error> {
    serde_json::from_str(self.0)
  }
}

/// Returns the number of records per distinct value of `field`, sorted by
/// category
///
/// Records where `field` is missing, null or blank are skipped.
pub fn category_counts(records: &[Record], field: &str) -> Vec<(String, usize)> {
  let mut m: BTreeMap<String, usize> = BTreeMap::new();
  for record in records {
    let category = match record.get(field) {
      Some(Some(value)) => value.to_category(),
      _ => None,
    };
    if let Some(category) = category {
      *m.entry(category).or_insert(0) += 1;
    }
  }
  m.into_iter().collect()
}

/// Renders `counts` as a deck list readable by `DeckSet::from_list`
///
/// Categories spanning several lines cannot be written as one deck line and
/// are returned separately instead of being written.
pub fn deck_list(counts: &[(String, usize)]) -> (String, Vec<String>) {
  let mut list = String::new();
  let mut skipped = Vec::new();
  for (category, count) in counts {
    if category.contains(|c: char| c == '\n' || c == '\r') {
      skipped.push(category.clone());
      continue;
    }
    list.push_str(&format!("{} {}\n", count, category));
  }
  (list, skipped)
}
