extern crate env_logger;
#[macro_use]
extern crate log;
extern crate wingding;

use std::env;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use wingding::deck_set::DeckSet;
use wingding::error::DeckError;

#[derive(Debug)]
enum Error {
    Io(std::io::Error),
    Deck(DeckError),
    BadArgument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{}", e),
            Self::Deck(e) => write!(f, "{}", e),
            Self::BadArgument(arg) => write!(f, "bad argument: {}", arg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<DeckError> for Error {
    fn from(error: DeckError) -> Self {
        Self::Deck(error)
    }
}

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, default: T) -> Result<T, Error> {
    match arg {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| Error::BadArgument(s.clone())),
    }
}

fn main() -> Result<(), Error> {
    let _ = env_logger::try_init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(Error::BadArgument(
            "usage: wingding_draw <deck list> [draw count] [rounds] [seed]".to_string(),
        ));
    }
    let list_path = Path::new(&args[1]);
    let draw_count: usize = parse_arg(args.get(2), 1)?;
    let rounds: usize = parse_arg(args.get(3), 1)?;
    let seed: Option<u64> = match args.get(4) {
        None => None,
        some => Some(parse_arg(some, 0)?),
    };

    info!("Loading deck list @ {}", args[1]);
    let mut list = String::new();
    File::open(list_path)?.read_to_string(&mut list)?;
    let mut set = DeckSet::from_list(&list)?;
    if let Some(seed) = seed {
        set = set.with_seed(seed);
    }
    info!(
        "Drawing {} cards {} times from {} decks ({} cards)",
        draw_count,
        rounds,
        set.decks().len(),
        set.total_cards()
    );

    for round in 0..rounds {
        let record = set.draw_cards(draw_count);
        println!("Draw {}:", round + 1);
        for draw in record.nonzero() {
            println!("  From {:<25} draw {} cards.", draw.deck, draw.count);
        }
        if record.is_empty() {
            println!("  No cards left to draw.");
        }
    }
    println!("-----------------------------------------");
    for deck in set.decks() {
        println!(
            "{:<25} cards remaining: {} of {}",
            deck.name(),
            deck.remaining(),
            deck.total_cards()
        );
    }
    Ok(())
}
