use crate::debug_log;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_BANK: &str = include_str!("resources/questions.csv");

/// Failure to produce a playable set of questions.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read question bank: {0}")]
    Io(#[from] io::Error),
    #[error("malformed question bank: {0}")]
    Malformed(#[from] csv::Error),
    #[error("question bank has no playable questions")]
    Empty,
}

/// How the clue relates to its letter. Only changes the wording of the clue,
/// never how answers are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    StartsWith,
    Contains,
}

impl MatchRule {
    pub fn from_field(field: &str) -> Self {
        match field.trim().to_lowercase().as_str() {
            "empieza" | "starts" | "starts-with" | "starts_with" => Self::StartsWith,
            _ => Self::Contains,
        }
    }

    pub fn phrase(self, letter: char) -> String {
        match self {
            Self::StartsWith => format!("With the letter {letter}"),
            Self::Contains => format!("Contains the letter {letter}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub letter: char,
    pub clue: String,
    pub answer: String,
    pub match_rule: MatchRule,
}

impl Question {
    pub fn phrasing(&self) -> String {
        self.match_rule.phrase(self.letter)
    }
}

// One row of the source table. Column names follow the original data file.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(rename = "letra", alias = "letter")]
    letter: String,
    #[serde(rename = "definicion", alias = "clue")]
    clue: String,
    #[serde(rename = "concepto", alias = "answer")]
    answer: String,
    #[serde(rename = "tipo_letra", alias = "match_rule", default)]
    match_rule: String,
}

impl QuestionRecord {
    fn into_question(self) -> Option<Question> {
        let mut chars = self.letter.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => uppercase(c),
            _ => return None,
        };
        if self.clue.is_empty() || self.answer.is_empty() {
            return None;
        }
        Some(Question {
            letter,
            clue: self.clue,
            answer: self.answer,
            match_rule: MatchRule::from_field(&self.match_rule),
        })
    }
}

fn uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Every candidate question parsed from a source, kept so that a new game
/// can redraw its selection without reading the source again.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    candidates: Vec<Question>,
}

impl QuestionPool {
    /// Parse a CSV source. Rows with an invalid letter or an empty clue or
    /// answer are skipped; a source with no usable row is a [`DataError::Empty`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut candidates = Vec::new();
        for (row, record) in csv_reader.deserialize::<QuestionRecord>().enumerate() {
            match record?.into_question() {
                Some(question) => candidates.push(question),
                None => {
                    debug_log!("Skipping unusable question bank row {}", row + 1);
                }
            }
        }

        if candidates.is_empty() {
            return Err(DataError::Empty);
        }
        log::info!("Loaded {} candidate questions", candidates.len());
        Ok(Self { candidates })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Distinct letters present in the pool, ascending.
    pub fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self.candidates.iter().map(|q| q.letter).collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    /// Pick one question per letter, uniformly among that letter's
    /// candidates. The result is sorted by letter.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Question>, DataError> {
        let mut by_letter: BTreeMap<char, Vec<&Question>> = BTreeMap::new();
        for question in &self.candidates {
            by_letter.entry(question.letter).or_default().push(question);
        }

        let selected: Vec<Question> = by_letter
            .values()
            .filter_map(|candidates| candidates.choose(rng))
            .map(|question| (*question).clone())
            .collect();

        if selected.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(selected)
    }
}

pub fn load_pool_from_str(data: &str) -> Result<QuestionPool, DataError> {
    QuestionPool::from_reader(data.as_bytes())
}

pub fn load_pool_from_file<P: AsRef<Path>>(path: P) -> Result<QuestionPool, DataError> {
    let file = File::open(path)?;
    QuestionPool::from_reader(file)
}

/// Parse a source and select one question per letter in a single step.
pub fn load<S: Read, R: Rng + ?Sized>(source: S, rng: &mut R) -> Result<Vec<Question>, DataError> {
    QuestionPool::from_reader(source)?.draw(rng)
}

/// Location of a user-provided bank, used when no path is given explicitly.
#[must_use]
pub fn default_bank_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("rosco").join("questions.csv"))
}

/// Load the bank at `path`, or the user bank in the data directory, or the
/// bank embedded in the binary, in that order.
pub fn load_pool(path: Option<&Path>) -> Result<QuestionPool, DataError> {
    if let Some(path) = path {
        return load_pool_from_file(path);
    }
    if let Some(path) = default_bank_path()
        && path.is_file()
    {
        log::info!("Using question bank at {}", path.display());
        return load_pool_from_file(path);
    }
    load_pool_from_str(EMBEDDED_BANK)
}
