use crate::deck::DeckError;
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use std::fs::File;
use std::io::Read;
use std::path::Path;

static DECKS_DIR: Dir = include_dir!("src/decks");

/// Decks shipped inside the binary, one CSV file each.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum BuiltinDeck {
    Starter,
    Animals,
    Food,
}

impl BuiltinDeck {
    pub fn all() -> [BuiltinDeck; 3] {
        [BuiltinDeck::Starter, BuiltinDeck::Animals, BuiltinDeck::Food]
    }

    pub fn name(&self) -> String {
        self.to_string().to_lowercase()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|d| d.name() == name)
    }

    fn file_name(&self) -> String {
        format!("{}.csv", self.name())
    }
}

/// Parsed flashcard source: valid pairs plus per-record skip warnings.
#[derive(Debug)]
pub struct LoadedDeck {
    pub pairs: Vec<(String, String)>,
    pub warnings: Vec<String>,
}

pub fn load_file(path: &Path) -> Result<LoadedDeck, DeckError> {
    let file = File::open(path).map_err(|source| DeckError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    read_pairs(file)
}

pub fn load_builtin(deck: BuiltinDeck) -> Result<LoadedDeck, DeckError> {
    let file = DECKS_DIR
        .get_file(deck.file_name())
        .expect("built-in deck file not found");

    read_pairs(file.contents())
}

/// Reads `english,turkish` records, trimming whitespace. Records that do
/// not yield exactly two non-empty fields are skipped with a warning.
fn read_pairs<R: Read>(reader: R) -> Result<LoadedDeck, DeckError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    let mut warnings = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let line = index + 1;
        match record {
            Ok(record) => {
                let fields: Vec<&str> = record.iter().collect();
                match fields.as_slice() {
                    [english, turkish] if !english.is_empty() && !turkish.is_empty() => {
                        pairs.push((english.to_string(), turkish.to_string()));
                    }
                    _ => warnings.push(format!(
                        "skipping invalid flashcard on line {}: {:?}",
                        line,
                        fields.join(",")
                    )),
                }
            }
            Err(err) => warnings.push(format!("skipping unreadable line {}: {}", line, err)),
        }
    }

    Ok(LoadedDeck { pairs, warnings })
}
