//! # Wordle Bot
//!
//! A multithreaded Wordle solver using entropy-based information theory.
//!
//! The solver picks the guess that maximizes expected information gain over
//! two guesses: the entropy of the feedback it produces now, plus the best
//! entropy available on the following turn, averaged over the feedback
//! outcomes. Easy mode may guess any word; hard mode only words consistent
//! with every feedback so far.

pub mod alive;
pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod matrix;
pub mod queue;
pub mod solver;
pub mod stats;
pub mod vocab;

pub use alive::{AliveSet, GameState};
pub use config::{Config, Mode};
pub use engine::{EntropyEngine, GuessAnalysis, Suggestion};
pub use error::{Result, WordleError};
pub use feedback::{Encoder, Feedback, FeedbackPattern};
pub use matrix::FeedbackMatrix;
pub use queue::TaskQueue;
pub use solver::WordleSolver;
pub use vocab::Vocabulary;

/// Longest supported word; keeps every feedback pattern within a byte.
pub const MAX_WORD_LENGTH: usize = 5;

pub const ALPHABET_SIZE: usize = 26;
