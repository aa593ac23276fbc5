extern crate env_logger;
extern crate serde_json;
#[macro_use]
extern crate log;
extern crate wingding;

use std::env;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::prelude::*;
use std::path::Path;
use wingding::records::{category_counts, deck_list, JsonRecords, RecordSource};

#[derive(Debug)]
enum Error {
    Json(serde_json::Error),
    Io(std::io::Error),
    NoCategories(String),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

fn main() -> Result<(), Error> {
    let _ = env_logger::try_init();
    let args: Vec<String> = env::args().collect();
    assert!(
        args.len() > 3,
        "Expected 3 arguments, records JSON path, category field and output path"
    );
    let records_path = Path::new(&args[1]);
    let field = &args[2];
    let out_path_string = &args[3];

    info!("Loading JSON file @ {}", args[1]);
    let mut json_file_contents = String::new();
    File::open(records_path)?.read_to_string(&mut json_file_contents)?;
    let records = JsonRecords(&json_file_contents).load_records()?;
    info!("Counting {} records by \"{}\"", records.len(), field);
    let counts = category_counts(&records, field);
    if counts.is_empty() {
        return Err(Error::NoCategories(field.clone()));
    }
    let skipped = records.len() - counts.iter().map(|(_, c)| c).sum::<usize>();
    if skipped > 0 {
        warn!("{} records have no \"{}\" value", skipped, field);
    }

    let (decks, multi_line) = deck_list(&counts);
    for category in &multi_line {
        warn!("Skipping category {:?}, it spans several lines", category);
    }
    let header = field.replace(&['\n', '\r'][..], " ");
    let mut list = format!("# {} records grouped by {}\n", records.len(), header);
    list.push_str(&decks);
    info!(
        "Writing {} decks to {}",
        counts.len() - multi_line.len(),
        out_path_string
    );
    let mut file: File = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(out_path_string)?;
    file.write_all(list.as_bytes())?;
    Ok(())
}
