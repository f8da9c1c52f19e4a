//! Bulk import of scraped puzzle files.
//!
//! Each file holds one puzzle as published: its print date, letters, and the
//! clues with their answers. Files are imported oldest first so that a clue
//! reused across puzzles ends up carrying its most recent date.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{IndexError, Indexer, Transport, clue_url};

/// A scraped puzzle file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapedPuzzle {
    /// `YYYY-MM-DD`.
    pub print_date: String,
    /// Required letter.
    pub center_letter: String,
    /// The six other letters.
    #[serde(deserialize_with = "letters")]
    pub outer_letters: String,
    /// Clues with their answers.
    #[serde(default)]
    pub clues: Vec<ScrapedClue>,
}

/// One clue of a scraped puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapedClue {
    /// The answer.
    pub word: String,
    /// The clue text.
    pub text: String,
}

impl ScrapedPuzzle {
    /// Parses a scraped puzzle from JSON.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        serde_json::from_str(json).map_err(|e| IndexError::decode(&e))
    }

    /// Reads and parses a scraped puzzle file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let json = fs::read_to_string(path).map_err(|source| IndexError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Accepts outer letters either as `"tefoux"` or as `["t", "e", ...]`.
fn letters<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    /// Both published shapes.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Letters {
        /// One string.
        Joined(String),
        /// One string per letter.
        Split(Vec<String>),
    }

    Ok(match Letters::deserialize(deserializer)? {
        Letters::Joined(s) => s,
        Letters::Split(parts) => parts.concat(),
    })
}

/// Counts from one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Files read and parsed.
    pub files: usize,
    /// Files that could not be read or parsed.
    pub skipped_files: usize,
    /// Puzzle documents written.
    pub puzzles: usize,
    /// Clue documents written.
    pub clues: usize,
    /// Documents that failed after retries.
    pub failed: usize,
}

/// Imports scraped puzzle files through an [`Indexer`].
#[derive(Debug)]
pub struct Importer<'a, T> {
    /// Write path.
    indexer: Indexer<'a, T>,
}

impl<'a, T: Transport> Importer<'a, T> {
    /// Creates an importer.
    pub fn new(indexer: Indexer<'a, T>) -> Self {
        Self { indexer }
    }

    /// Imports `paths` in print-date order.
    ///
    /// Unreadable files and failed documents are logged and counted, and the
    /// import moves on. Credential and host errors stop the import.
    pub fn import_files(&self, paths: &[PathBuf]) -> Result<ImportStats, IndexError> {
        let mut stats = ImportStats::default();
        let mut puzzles = Vec::with_capacity(paths.len());

        for path in paths {
            match ScrapedPuzzle::load(path) {
                Ok(puzzle) => puzzles.push((path, puzzle)),
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipping puzzle file");
                    stats.skipped_files += 1;
                }
            }
        }

        puzzles.sort_by(|a, b| a.1.print_date.cmp(&b.1.print_date));

        for (path, puzzle) in &puzzles {
            self.import_puzzle(puzzle, &mut stats)?;
            stats.files += 1;
            info!(
                file = %path.display(),
                date = %puzzle.print_date,
                clues = puzzle.clues.len(),
                "imported puzzle"
            );
        }

        Ok(stats)
    }

    /// Upserts one puzzle and its clues, updating `stats`.
    pub fn import_puzzle(
        &self,
        puzzle: &ScrapedPuzzle,
        stats: &mut ImportStats,
    ) -> Result<(), IndexError> {
        let date = puzzle.print_date.as_str();
        match self
            .indexer
            .upsert_puzzle(date, &puzzle.center_letter, &puzzle.outer_letters)
        {
            Ok(_) => stats.puzzles += 1,
            Err(err) => {
                check_fatal(err)?;
                stats.failed += 1;
            }
        }

        let mut clues: Vec<(String, &ScrapedClue)> = puzzle
            .clues
            .iter()
            .map(|clue| (clue_url(&clue.text), clue))
            .collect();
        clues.sort_by(|a, b| a.0.cmp(&b.0));

        for (url, clue) in clues {
            match self.indexer.upsert_clue(&url, &clue.word, &clue.text, date) {
                Ok(_) => stats.clues += 1,
                Err(err) => {
                    warn!(date, word = %clue.word, error = %err, "skipping clue");
                    check_fatal(err)?;
                    stats.failed += 1;
                }
            }
        }
        Ok(())
    }
}

/// Passes through errors that would fail every later write too.
fn check_fatal(err: IndexError) -> Result<(), IndexError> {
    match err {
        IndexError::Auth { .. } | IndexError::InvalidHost { .. } => Err(err),
        other => {
            warn!(error = %other, "document not imported");
            Ok(())
        }
    }
}
