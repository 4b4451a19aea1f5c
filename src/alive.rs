//! Tracks which words are still consistent with the feedback seen so far.

use crate::config::Mode;
use crate::feedback::FeedbackPattern;
use crate::matrix::FeedbackMatrix;
use crate::queue::fork_join;
use crate::vocab::{is_valid_word, Vocabulary};

/// Progress of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    InProgress,
    /// The last guess received all-correct feedback.
    Won,
    /// No target is consistent with the feedback.
    Exhausted,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }
}

/// Surviving candidates, split into targets and (hard mode only) fillers.
///
/// In hard mode both lists stay in ascending index order, which is also
/// alphabetical order within each partition, so a guess can be checked for
/// legality by binary search.
#[derive(Debug, Clone)]
pub struct AliveSet {
    mode: Mode,
    targets: Vec<u32>,
    fillers: Vec<u32>,
    target_total: usize,
    word_total: usize,
    state: GameState,
}

impl AliveSet {
    pub fn new(vocab: &Vocabulary, mode: Mode) -> Self {
        let mut alive = Self {
            mode,
            targets: Vec::with_capacity(vocab.target_count()),
            fillers: Vec::new(),
            target_total: vocab.target_count(),
            word_total: vocab.len(),
            state: GameState::InProgress,
        };
        alive.reset();
        alive
    }

    /// Restore the full candidate range.
    pub fn reset(&mut self) {
        self.targets.clear();
        self.targets.extend(0..self.target_total as u32);
        self.fillers.clear();
        if self.mode == Mode::Hard {
            self.fillers.extend(self.target_total as u32..self.word_total as u32);
        }
        self.state = GameState::InProgress;
    }

    /// Keep exactly the candidates `i` with `matrix.get(guess, i) == pattern`.
    ///
    /// All-correct feedback collapses the set to the guess itself. Once the
    /// game is over, further calls change nothing until [`AliveSet::reset`].
    pub fn filter(
        &mut self,
        matrix: &FeedbackMatrix,
        guess: usize,
        pattern: FeedbackPattern,
        word_length: usize,
    ) -> GameState {
        if self.state.is_over() {
            return self.state;
        }

        if pattern.is_win(word_length) {
            self.targets.clear();
            self.targets.push(guess as u32);
            self.fillers.clear();
            self.state = GameState::Won;
            return self.state;
        }

        let row = matrix.row(guess);
        let keep = |&i: &u32| row[i as usize] == pattern;
        shift_filter(&mut self.targets, keep);
        shift_filter(&mut self.fillers, keep);
        if self.mode == Mode::Hard {
            self.targets.sort_unstable();
            self.fillers.sort_unstable();
        }

        debug_assert!(self.targets.iter().chain(&self.fillers).all(keep));

        if self.targets.is_empty() {
            self.state = GameState::Exhausted;
        }
        self.state
    }

    /// Look up `word` as a legal next guess.
    ///
    /// Easy mode accepts any vocabulary word. Hard mode only accepts words
    /// still alive, searching the targets and fillers on two threads.
    pub fn validate_guess(&self, vocab: &Vocabulary, word: &str) -> Option<usize> {
        if !is_valid_word(word, vocab.word_length()) {
            return None;
        }
        match self.mode {
            Mode::Easy => vocab.find(word),
            Mode::Hard => {
                let mut in_targets = None;
                let mut in_fillers = None;
                let (targets, fillers) = (self.targets.as_slice(), self.fillers.as_slice());
                let (target_slot, filler_slot) = (&mut in_targets, &mut in_fillers);
                fork_join(2, move |queue| {
                    queue.push(move || *target_slot = vocab.find_in(targets, word));
                    queue.push(move || *filler_slot = vocab.find_in(fillers, word));
                });
                in_targets.or(in_fillers)
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Alive target indices.
    pub fn targets(&self) -> &[u32] {
        &self.targets
    }

    /// Alive filler indices. Always empty in easy mode.
    pub fn fillers(&self) -> &[u32] {
        &self.fillers
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn len(&self) -> usize {
        self.targets.len() + self.fillers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-place O(n) filter: elements failing `keep` are swapped to the back and
/// truncated. Relative order is not preserved.
pub fn shift_filter<T, F>(items: &mut Vec<T>, keep: F)
where
    F: Fn(&T) -> bool,
{
    let mut left = 0;
    let mut right = items.len();
    while left < right {
        if keep(&items[left]) {
            left += 1;
        } else {
            right -= 1;
            items.swap(left, right);
        }
    }
    items.truncate(right);
}
