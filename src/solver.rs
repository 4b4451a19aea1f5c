//! Game-level facade over the vocabulary, feedback matrix, alive set and engine.
//!
//! A solver owns one game's alive set. The vocabulary and matrix are shared
//! behind `Arc`, so [`WordleSolver::fresh`] starts another game without
//! rebuilding the matrix.

use std::sync::Arc;

use log::{info, warn};

use crate::alive::{AliveSet, GameState};
use crate::config::Config;
use crate::engine::{EntropyEngine, GuessAnalysis, Suggestion};
use crate::error::{Result, WordleError};
use crate::feedback::FeedbackPattern;
use crate::matrix::FeedbackMatrix;
use crate::vocab::{is_valid_word, Vocabulary};

/// The main Wordle solver
#[derive(Debug, Clone)]
pub struct WordleSolver {
    vocab: Arc<Vocabulary>,
    matrix: Arc<FeedbackMatrix>,
    alive: AliveSet,
    config: Config,
    /// Guesses applied this game, with their feedback.
    history: Vec<(usize, FeedbackPattern)>,
}

impl WordleSolver {
    /// Validate `config` and build the feedback matrix for `vocab`.
    pub fn new(vocab: Vocabulary, config: Config) -> Result<Self> {
        config.validate()?;
        if vocab.word_length() != config.word_length {
            return Err(WordleError::Configuration(format!(
                "vocabulary has {}-letter words but the configuration expects {}",
                vocab.word_length(),
                config.word_length
            )));
        }
        info!(
            "{} targets, {} fillers, {:?} mode, {} workers, beam width {}",
            vocab.target_count(),
            vocab.filler_count(),
            config.mode,
            config.workers,
            config.beam_width
        );
        let matrix = FeedbackMatrix::build(&vocab, config.workers);
        Ok(Self::with_matrix(Arc::new(vocab), Arc::new(matrix), config))
    }

    fn with_matrix(vocab: Arc<Vocabulary>, matrix: Arc<FeedbackMatrix>, config: Config) -> Self {
        let alive = AliveSet::new(&vocab, config.mode);
        Self {
            vocab,
            matrix,
            alive,
            config,
            history: Vec::new(),
        }
    }

    /// A new game sharing this solver's vocabulary and matrix.
    pub fn fresh(&self) -> Self {
        Self::with_matrix(self.vocab.clone(), self.matrix.clone(), self.config.clone())
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn matrix(&self) -> &FeedbackMatrix {
        &self.matrix
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alive(&self) -> &AliveSet {
        &self.alive
    }

    pub fn state(&self) -> GameState {
        self.alive.state()
    }

    pub fn is_hard_mode(&self) -> bool {
        self.config.is_hard_mode()
    }

    pub fn word(&self, index: usize) -> &str {
        self.vocab.get(index)
    }

    pub fn remaining_count(&self) -> usize {
        self.alive.target_count()
    }

    pub fn possible_answers(&self) -> Vec<&str> {
        self.alive.targets().iter().map(|&i| self.vocab.get(i as usize)).collect()
    }

    /// Every `(guess, feedback)` applied since the game started.
    pub fn history(&self) -> &[(usize, FeedbackPattern)] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.alive.reset();
        self.history.clear();
    }

    fn engine(&self) -> EntropyEngine<'_> {
        EntropyEngine::new(&self.vocab, &self.matrix, &self.alive, &self.config)
    }

    pub fn suggest(&self) -> Option<Suggestion> {
        self.engine().suggest()
    }

    pub fn top_guesses(&self, n: usize) -> Vec<GuessAnalysis> {
        self.engine().top_guesses(n)
    }

    /// Feedback the game would show for `guess` when the answer is `solution`.
    pub fn feedback_for(&self, guess: usize, solution: usize) -> FeedbackPattern {
        self.matrix.get(guess, solution)
    }

    pub fn filter(&mut self, guess: usize, pattern: FeedbackPattern) -> GameState {
        if !self.alive.state().is_over() {
            self.history.push((guess, pattern));
        }
        self.alive.filter(&self.matrix, guess, pattern, self.config.word_length)
    }

    /// Apply feedback typed by a player: `word` must be a legal guess right
    /// now and `token` a well-formed feedback token.
    pub fn try_filter(&mut self, word: &str, token: &str) -> Result<GameState> {
        let word = word.trim().to_lowercase();
        if !is_valid_word(&word, self.config.word_length) {
            return Err(WordleError::InvalidFormat(format!(
                "'{}' is not a {}-letter word",
                word, self.config.word_length
            )));
        }
        let guess = self.alive.validate_guess(&self.vocab, &word).ok_or_else(|| {
            WordleError::InvalidFormat(format!("'{}' is not a legal guess right now", word))
        })?;
        let pattern = FeedbackPattern::parse(token.trim(), self.config.word_length)?;
        Ok(self.filter(guess, pattern))
    }

    /// Play against a known target from the current state, returning every
    /// guess made with its feedback.
    pub fn solve_for_target(&mut self, target: usize) -> Result<Vec<(usize, FeedbackPattern)>> {
        self.solve_from(target, None)
    }

    /// As [`WordleSolver::solve_for_target`], but spend the first round on
    /// `opening` instead of asking the engine.
    ///
    /// On failure the guesses played remain available through
    /// [`WordleSolver::history`].
    pub fn solve_from(
        &mut self,
        target: usize,
        opening: Option<usize>,
    ) -> Result<Vec<(usize, FeedbackPattern)>> {
        let mut guesses = Vec::new();
        let mut next = opening;

        for _ in 0..self.config.max_rounds {
            let guess = match next.take() {
                Some(guess) => guess,
                None => match self.suggest() {
                    Some(suggestion) => suggestion.index,
                    None => break,
                },
            };

            let pattern = self.feedback_for(guess, target);
            guesses.push((guess, pattern));

            match self.filter(guess, pattern) {
                GameState::Won => return Ok(guesses),
                GameState::Exhausted => break,
                GameState::InProgress => {}
            }
        }

        warn!(
            "failed to find '{}' after {} guesses",
            self.vocab.get(target),
            guesses.len()
        );
        Err(WordleError::ExhaustedSearch(format!(
            "'{}' not found after {} guesses",
            self.vocab.get(target),
            guesses.len()
        )))
    }
}
