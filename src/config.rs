//! Runtime configuration for a solver instance.

use crate::error::{Result, WordleError};
use crate::MAX_WORD_LENGTH;

/// Which guesses are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Any vocabulary word may be guessed.
    #[default]
    Easy,
    /// Guesses must be consistent with every feedback seen so far.
    Hard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub word_length: usize,
    /// Threads spawned per parallel stage.
    pub workers: usize,
    /// Number of first-ply guesses that get a second-ply lookahead.
    pub beam_width: usize,
    pub mode: Mode,
    /// Upper bound on rounds played by a simulated game.
    pub max_rounds: usize,
    /// When set, beam candidates with `entropy * cutoff` below the best
    /// first-ply entropy are dropped before the lookahead.
    pub relative_cutoff: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(8);
        Self {
            word_length: MAX_WORD_LENGTH,
            workers,
            beam_width: workers,
            mode: Mode::Easy,
            max_rounds: 100,
            relative_cutoff: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_length(mut self, word_length: usize) -> Self {
        self.word_length = word_length;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_relative_cutoff(mut self, cutoff: Option<f64>) -> Self {
        self.relative_cutoff = cutoff;
        self
    }

    pub fn is_hard_mode(&self) -> bool {
        self.mode == Mode::Hard
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 || self.word_length > MAX_WORD_LENGTH {
            return Err(WordleError::Configuration(format!(
                "word length must be between 1 and {}, got {}",
                MAX_WORD_LENGTH, self.word_length
            )));
        }
        if self.workers == 0 {
            return Err(WordleError::Configuration(
                "at least one worker is required".to_string(),
            ));
        }
        // Hard-mode guess validation searches the alive targets and fillers concurrently.
        if self.mode == Mode::Hard && self.workers < 2 {
            return Err(WordleError::Configuration(format!(
                "hard mode needs at least 2 workers, got {}",
                self.workers
            )));
        }
        if self.beam_width == 0 {
            return Err(WordleError::Configuration(
                "beam width must be positive".to_string(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(WordleError::Configuration(
                "round cap must be positive".to_string(),
            ));
        }
        if let Some(cutoff) = self.relative_cutoff {
            if !(cutoff >= 1.0 && cutoff.is_finite()) {
                return Err(WordleError::Configuration(format!(
                    "relative cutoff must be a finite number of at least 1, got {}",
                    cutoff
                )));
            }
        }
        Ok(())
    }
}
