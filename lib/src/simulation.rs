//! # Simulation engine and deck observations
use crate::deck_set::DeckSet;
use crate::error::DeckError;
use rand::prelude::*;
use rand::rngs::SmallRng;

pub struct SimulationConfig<'a> {
  /// Number of independent sessions to play
  pub run_count: usize,
  /// Draw requests performed in order during every session
  pub draws: &'a [usize],
  /// `(name, total_cards)` of every deck, in deck order
  pub decks: &'a [(String, usize)],
  /// Seed for reproducible runs, entropy when None
  pub seed: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Simulation {
  pub observations: Vec<(String, Observations)>,
  pub total_runs: usize,
  /// Cards drawn from all decks over every run
  pub total_drawn: usize,
}

/// Observations accumulated for one deck over every run
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Observations {
  /// Cards drawn from this deck
  pub drawn: usize,
  /// Runs that ended with this deck empty
  pub emptied: usize,
}

impl Observations {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Simulation {
  pub fn from_config(config: &SimulationConfig) -> Result<Self, DeckError> {
    assert!(config.run_count > 0);
    let mut rng = match config.seed {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_entropy(),
    };
    // Validate once up front so a bad config fails before any run
    let template = DeckSet::from_sizes(config.decks.iter().map(|(n, c)| (n.as_str(), *c)))?;
    let mut observations: Vec<(String, Observations)> = template
      .decks()
      .iter()
      .map(|d| (d.name().to_string(), Observations::new()))
      .collect();
    let mut total_drawn = 0;
    for _ in 0..config.run_count {
      let mut set = DeckSet::from_sizes(config.decks.iter().map(|(n, c)| (n.as_str(), *c)))?;
      for &count in config.draws {
        total_drawn += set.draw_cards_with_rng(count, &mut rng).total();
      }
      for (deck, (_, obs)) in set.decks().iter().zip(observations.iter_mut()) {
        obs.drawn += deck.drawn();
        if deck.is_empty() {
          obs.emptied += 1;
        }
      }
    }
    debug!(
      "simulated {} runs over {} decks, {} cards drawn",
      config.run_count,
      observations.len(),
      total_drawn
    );
    Ok(Simulation {
      observations,
      total_runs: config.run_count,
      total_drawn,
    })
  }

  pub fn observations_for_deck(&self, name: &str) -> Option<&Observations> {
    self
      .observations
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, o)| o)
  }

  /// Share of all drawn cards that came from `obs`'s deck
  pub fn p_drawn(&self, obs: &Observations) -> f64 {
    obs.drawn as f64 / self.total_drawn as f64
  }

  /// Share of runs that ended with `obs`'s deck empty
  pub fn p_emptied(&self, obs: &Observations) -> f64 {
    obs.emptied as f64 / self.total_runs as f64
  }

  /// Average cards drawn from `obs`'s deck per run
  pub fn mean_drawn(&self, obs: &Observations) -> f64 {
    obs.drawn as f64 / self.total_runs as f64
  }
}
