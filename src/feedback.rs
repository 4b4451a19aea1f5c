//! Feedback calculation for Wordle guesses.
//!
//! A guess scored against a solution yields one of three states per position.
//! The states are packed base 3 into a single byte, position `i` contributing
//! `state * 3^i`, so a whole feedback fits in a [`FeedbackPattern`].

use crate::error::{Result, WordleError};
use crate::{ALPHABET_SIZE, MAX_WORD_LENGTH};

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter not in word, or all its occurrences already matched (gray)
    Absent,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Correct letter in correct position (green)
    Correct,
}

impl Feedback {
    /// Base-3 digit used in a packed pattern.
    pub fn value(self) -> u8 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }

    /// Token symbol (g=green, y=yellow, b=black/gray)
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => 'g',
            Feedback::Present => 'y',
            Feedback::Absent => 'b',
        }
    }

    pub fn to_emoji(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse a token symbol, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Feedback::Correct),
            'y' => Some(Feedback::Present),
            'b' => Some(Feedback::Absent),
            _ => None,
        }
    }
}

/// A complete feedback pattern for a guess of up to [`MAX_WORD_LENGTH`] letters.
/// Pattern = p0 + 3*p1 + 9*p2 + 27*p3 + 81*p4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct FeedbackPattern(pub u8);

impl FeedbackPattern {
    /// Number of distinct patterns at the maximum word length (3^5).
    pub const NUM_PATTERNS: usize = 243;

    /// Total number of possible patterns for words of `word_length` letters.
    pub fn num_patterns(word_length: usize) -> usize {
        3usize.pow(word_length as u32)
    }

    /// The pattern indicating all correct (winning)
    pub fn all_correct(word_length: usize) -> Self {
        Self((Self::num_patterns(word_length) - 1) as u8)
    }

    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: &[Feedback]) -> Self {
        debug_assert!(feedbacks.len() <= MAX_WORD_LENGTH);
        let mut pattern: u8 = 0;
        let mut multiplier: u8 = 1;
        for fb in feedbacks {
            pattern += fb.value() * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        Self(pattern)
    }

    /// Calculate the feedback pattern for a guess against a solution word.
    pub fn calculate(guess: &str, solution: &str) -> Self {
        Encoder::new().encode(guess.as_bytes(), solution.as_bytes())
    }

    /// Convert pattern to per-position feedbacks
    pub fn to_feedbacks(self, word_length: usize) -> Vec<Feedback> {
        let mut pattern = self.0;
        let mut feedbacks = Vec::with_capacity(word_length);
        for _ in 0..word_length {
            feedbacks.push(match pattern % 3 {
                0 => Feedback::Absent,
                1 => Feedback::Present,
                _ => Feedback::Correct,
            });
            pattern /= 3;
        }
        feedbacks
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self, word_length: usize) -> bool {
        self == Self::all_correct(word_length)
    }

    /// Checks length and symbols of a feedback token like "gybbb".
    pub fn is_valid_token(token: &str, word_length: usize) -> bool {
        token.chars().count() == word_length
            && token.chars().all(|c| Feedback::from_char(c).is_some())
    }

    /// Parse a pattern from a token like "gybbb"
    pub fn parse(token: &str, word_length: usize) -> Result<Self> {
        let len = token.chars().count();
        if len != word_length {
            return Err(WordleError::InvalidFormat(format!(
                "feedback '{}' has {} symbols, expected {}",
                token, len, word_length
            )));
        }
        let feedbacks = token
            .chars()
            .map(|c| {
                Feedback::from_char(c).ok_or_else(|| {
                    WordleError::InvalidFormat(format!(
                        "invalid feedback symbol '{}' (use g, y or b)",
                        c
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(&feedbacks))
    }

    /// Inverse of [`FeedbackPattern::parse`].
    pub fn to_token(self, word_length: usize) -> String {
        self.to_feedbacks(word_length).iter().map(|f| f.to_char()).collect()
    }

    /// Display as emoji string
    pub fn to_emoji_string(self, word_length: usize) -> String {
        self.to_feedbacks(word_length).iter().map(|f| f.to_emoji()).collect()
    }
}

/// Reusable scorer. Each worker owns one so the letter counts are never shared.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    unmatched: [u8; ALPHABET_SIZE],
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `guess` against `solution`. Both must be lowercase ASCII of equal length.
    ///
    /// Exact matches are resolved first so a repeated guess letter is only
    /// marked present while unmatched copies remain in the solution.
    pub fn encode(&mut self, guess: &[u8], solution: &[u8]) -> FeedbackPattern {
        debug_assert_eq!(guess.len(), solution.len());
        debug_assert!(guess.len() <= MAX_WORD_LENGTH);

        self.unmatched = [0; ALPHABET_SIZE];
        let mut states = [Feedback::Absent; MAX_WORD_LENGTH];
        let states = &mut states[..guess.len()];

        for (i, (&g, &s)) in guess.iter().zip(solution).enumerate() {
            if g == s {
                states[i] = Feedback::Correct;
            } else {
                self.unmatched[(s - b'a') as usize] += 1;
            }
        }

        for (i, &g) in guess.iter().enumerate() {
            if states[i] == Feedback::Correct {
                continue;
            }
            let count = &mut self.unmatched[(g - b'a') as usize];
            if *count > 0 {
                states[i] = Feedback::Present;
                *count -= 1;
            }
        }

        FeedbackPattern::new(states)
    }
}
