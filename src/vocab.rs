//! Word lists: loading, normalization and the indexed vocabulary.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use log::info;

use crate::error::{Result, WordleError};
use crate::MAX_WORD_LENGTH;

/// Checks size and letters.
pub fn is_valid_word(word: &str, word_length: usize) -> bool {
    word.len() == word_length && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Read one word per line, trimming and lowercasing each and skipping blank lines.
///
/// When `expected` is given the source must yield exactly that many words.
pub fn parse_words<R: BufRead>(
    reader: R,
    word_length: usize,
    expected: Option<usize>,
) -> Result<Vec<String>> {
    read_words(reader, word_length, expected, Path::new("<input>"))
}

/// Load a word list from a file. See [`parse_words`].
pub fn load_words(path: &Path, word_length: usize, expected: Option<usize>) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| WordleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = read_words(BufReader::new(file), word_length, expected, path)?;
    info!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

fn read_words<R: BufRead>(
    reader: R,
    word_length: usize,
    expected: Option<usize>,
    origin: &Path,
) -> Result<Vec<String>> {
    let mut words = Vec::with_capacity(expected.unwrap_or(0));
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| WordleError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        let word = line.trim().to_lowercase();
        if word.is_empty() {
            continue;
        }
        if !is_valid_word(&word, word_length) {
            return Err(WordleError::InvalidFormat(format!(
                "{} line {}: '{}' is not a {}-letter alphabetic word",
                origin.display(),
                line_number + 1,
                word,
                word_length
            )));
        }
        words.push(word);
    }

    if let Some(expected) = expected {
        if words.len() != expected {
            return Err(WordleError::InvalidFormat(format!(
                "{}: expected {} words, found {}",
                origin.display(),
                expected,
                words.len()
            )));
        }
    }
    Ok(words)
}

/// Ordered word list: targets (possible solutions) first, then fillers (guess-only).
///
/// Each partition is sorted alphabetically so a word can be located by binary
/// search over any ascending subset of indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
    target_count: usize,
    word_length: usize,
}

impl Vocabulary {
    pub fn new(
        mut targets: Vec<String>,
        mut fillers: Vec<String>,
        word_length: usize,
    ) -> Result<Self> {
        if word_length == 0 || word_length > MAX_WORD_LENGTH {
            return Err(WordleError::InvalidFormat(format!(
                "word length must be between 1 and {}, got {}",
                MAX_WORD_LENGTH, word_length
            )));
        }
        if let Some(bad) = targets
            .iter()
            .chain(fillers.iter())
            .find(|w| !is_valid_word(w, word_length))
        {
            return Err(WordleError::InvalidFormat(format!(
                "'{}' is not a {}-letter lowercase word",
                bad, word_length
            )));
        }

        targets.sort_unstable();
        targets.dedup();
        fillers.sort_unstable();
        fillers.dedup();
        fillers.retain(|w| targets.binary_search(w).is_err());

        if targets.is_empty() {
            return Err(WordleError::InvalidFormat(
                "vocabulary has no target words".to_string(),
            ));
        }
        if targets.len() + fillers.len() > u32::MAX as usize {
            return Err(WordleError::InvalidFormat(
                "vocabulary is too large".to_string(),
            ));
        }

        let target_count = targets.len();
        let mut words = targets;
        words.append(&mut fillers);
        Ok(Self {
            words,
            target_count,
            word_length,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn filler_count(&self) -> usize {
        self.words.len() - self.target_count
    }

    pub fn target_range(&self) -> Range<usize> {
        0..self.target_count
    }

    pub fn filler_range(&self) -> Range<usize> {
        self.target_count..self.words.len()
    }

    pub fn is_target(&self, index: usize) -> bool {
        index < self.target_count
    }

    pub fn get(&self, index: usize) -> &str {
        &self.words[index]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Global lookup: binary search the targets, then the fillers.
    pub fn find(&self, word: &str) -> Option<usize> {
        let (targets, fillers) = self.words.split_at(self.target_count);
        targets
            .binary_search_by(|w| w.as_str().cmp(word))
            .ok()
            .or_else(|| {
                fillers
                    .binary_search_by(|w| w.as_str().cmp(word))
                    .ok()
                    .map(|i| i + self.target_count)
            })
    }

    /// Binary search `word` among `indices`, which must be ascending and lie
    /// within a single partition.
    pub fn find_in(&self, indices: &[u32], word: &str) -> Option<usize> {
        indices
            .binary_search_by(|&i| self.words[i as usize].as_str().cmp(word))
            .ok()
            .map(|pos| indices[pos] as usize)
    }
}
