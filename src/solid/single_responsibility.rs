//! Single responsibility: a type should have one reason to change.
//!
//! `Journal` only manages entries. Saving and loading live in `Persistence`,
//! which works with anything that can be displayed or parsed.
//!
//! The text format is one entry per line, so entries are single, non-empty
//! lines.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;

use crate::console;
use crate::error::Result;

// =============================================================================
// Journal: entry management only
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JournalError {
    #[error("journal entries cannot be empty")]
    EmptyEntry,
    #[error("journal entries are a single line, got {0:?}")]
    MultiLineEntry(String),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Journal {
    entries: Vec<String>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns the new entry count.
    pub fn add_entry(&mut self, text: impl Into<String>) -> std::result::Result<usize, JournalError> {
        let text = text.into();
        if text.is_empty() {
            return Err(JournalError::EmptyEntry);
        }
        if text.contains(['\n', '\r']) {
            return Err(JournalError::MultiLineEntry(text));
        }
        self.entries.push(text);
        Ok(self.entries.len())
    }

    /// Out-of-range indices are ignored.
    pub fn remove_entry(&mut self, index: usize) -> Option<String> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries.iter().join("\n"))
    }
}

/// Something that can rebuild its state from text.
pub trait Parse {
    fn parse(&mut self, text: &str);
}

impl Parse for Journal {
    fn parse(&mut self, text: &str) {
        self.entries = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
    }
}

// =============================================================================
// Persistence: the separate concern
// =============================================================================

#[derive(Debug, Clone)]
pub struct Persistence {
    path: PathBuf,
}

impl Persistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates or truncates the file.
    pub fn save(&self, item: &impl fmt::Display) -> Result<()> {
        fs::write(&self.path, item.to_string())?;
        Ok(())
    }

    pub fn load(&self, target: &mut impl Parse) -> Result<()> {
        let text = fs::read_to_string(&self.path)?;
        target.parse(&text);
        Ok(())
    }
}

// =============================================================================
// Demo
// =============================================================================

pub fn run(path: &Path) -> Result<()> {
    console::demo("Single Responsibility");

    let mut journal = Journal::new();
    journal.add_entry("I cried today.")?;
    journal.add_entry("I ate a bug.")?;
    journal.add_entry("I learned about traits.")?;
    journal.remove_entry(1);
    journal.remove_entry(10);

    let persistence = Persistence::new(path);
    if let Err(err) = persistence.save(&journal) {
        log::warn!("could not save journal to {}: {err}", path.display());
    }

    let mut loaded = Journal::new();
    if let Err(err) = persistence.load(&mut loaded) {
        log::warn!("could not load journal from {}: {err}", path.display());
    }

    println!("Entries: {:?}, Count: {}", loaded.entries(), loaded.count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use tempfile::tempdir;

    #[test]
    fn test_add_and_remove_entries() {
        let mut journal = Journal::new();
        assert_eq!(journal.add_entry("one"), Ok(1));
        assert_eq!(journal.add_entry("two"), Ok(2));
        assert_eq!(journal.add_entry("three"), Ok(3));

        assert_eq!(journal.remove_entry(1), Some("two".to_string()));
        assert_eq!(journal.entries(), ["one", "three"]);
        assert_eq!(journal.count(), 2);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut journal = Journal::new();
        journal.add_entry("only").unwrap();
        assert_eq!(journal.remove_entry(5), None);
        assert_eq!(journal.count(), 1);
    }

    #[test]
    fn test_display_joins_with_newlines() {
        let mut journal = Journal::new();
        journal.add_entry("a").unwrap();
        journal.add_entry("b").unwrap();
        assert_eq!(journal.to_string(), "a\nb");
    }

    #[test]
    fn test_parse_replaces_entries() {
        let mut journal = Journal::new();
        journal.add_entry("stale").unwrap();
        journal.parse("first\nsecond\n");
        assert_eq!(journal.entries(), ["first", "second"]);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(dir.path().join("journal.txt"));

        let mut journal = Journal::new();
        journal.add_entry("Entry one").unwrap();
        journal.add_entry("Entry two").unwrap();
        persistence.save(&journal).unwrap();

        let mut loaded = Journal::new();
        persistence.load(&mut loaded).unwrap();
        assert_eq!(loaded, journal);
    }

    #[test]
    fn test_entries_that_would_not_survive_reload_are_rejected() {
        let mut journal = Journal::new();
        assert_eq!(
            journal.add_entry("line one\nline two"),
            Err(JournalError::MultiLineEntry("line one\nline two".to_string()))
        );
        assert!(matches!(
            journal.add_entry("windows\r\nending"),
            Err(JournalError::MultiLineEntry(_))
        ));
        assert_eq!(journal.add_entry(""), Err(JournalError::EmptyEntry));
        assert_eq!(journal.add_entry("third"), Ok(1));
        assert_eq!(journal.entries(), ["third"]);
    }

    #[test]
    fn test_round_trip_keeps_every_accepted_entry() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(dir.path().join("journal.txt"));

        let mut journal = Journal::new();
        for entry in ["  leading spaces", "tabs\tinside", "third"] {
            journal.add_entry(entry).unwrap();
        }
        persistence.save(&journal).unwrap();

        let mut loaded = Journal::new();
        persistence.load(&mut loaded).unwrap();
        assert_eq!(loaded.entries(), journal.entries());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(dir.path().join("missing.txt"));
        let mut journal = Journal::new();
        assert!(matches!(
            persistence.load(&mut journal),
            Err(CatalogError::Io(_))
        ));
        assert_eq!(journal.count(), 0);
    }
}
