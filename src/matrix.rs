//! The dense guess × solution feedback table.

use std::fmt;
use std::time::Instant;

use log::info;

use crate::feedback::{Encoder, FeedbackPattern};
use crate::queue::{balanced_ranges, fork_join};
use crate::vocab::Vocabulary;

/// Rows are padded to a multiple of this many bytes so workers filling
/// neighbouring rows never write to the same cache line.
pub const CACHE_LINE_SIZE: usize = 128;

/// `matrix.get(g, s)` is the feedback shown when guessing word `g` against
/// solution `s`. Not symmetric; the diagonal is all-correct.
#[derive(Clone)]
pub struct FeedbackMatrix {
    cells: Vec<FeedbackPattern>,
    size: usize,
    stride: usize,
}

impl FeedbackMatrix {
    fn zeroed(size: usize) -> Self {
        let per_line = CACHE_LINE_SIZE / std::mem::size_of::<FeedbackPattern>();
        let stride = size.div_ceil(per_line) * per_line;
        Self {
            cells: vec![FeedbackPattern::default(); size * stride],
            size,
            stride,
        }
    }

    /// Build every row in parallel, one task per contiguous block of guesses.
    pub fn build(vocab: &Vocabulary, workers: usize) -> Self {
        let start = Instant::now();
        let mut matrix = Self::zeroed(vocab.len());
        let size = matrix.size;
        let stride = matrix.stride;

        let cells: &mut [FeedbackPattern] = &mut matrix.cells;
        fork_join(workers, move |queue| {
            let mut rest = cells;
            for rows in balanced_ranges(size, workers) {
                let (block, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * stride);
                rest = tail;
                queue.push(move || {
                    let mut encoder = Encoder::new();
                    for (guess, row) in rows.zip(block.chunks_exact_mut(stride)) {
                        fill_row(&mut encoder, vocab, guess, &mut row[..size]);
                    }
                });
            }
        });

        info!(
            "built {}x{} feedback matrix with {} workers in {:.2?}",
            size,
            size,
            workers,
            start.elapsed()
        );
        matrix
    }

    /// Single-threaded reference construction.
    pub fn build_serial(vocab: &Vocabulary) -> Self {
        let mut matrix = Self::zeroed(vocab.len());
        let size = matrix.size;
        let mut encoder = Encoder::new();
        for (guess, row) in matrix.cells.chunks_exact_mut(matrix.stride).enumerate() {
            fill_row(&mut encoder, vocab, guess, &mut row[..size]);
        }
        matrix
    }

    /// Number of words on each axis.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, guess: usize, solution: usize) -> FeedbackPattern {
        self.row(guess)[solution]
    }

    /// Feedback of `guess` against every solution, padding excluded.
    #[inline]
    pub fn row(&self, guess: usize) -> &[FeedbackPattern] {
        let start = guess * self.stride;
        &self.cells[start..start + self.size]
    }
}

fn fill_row(encoder: &mut Encoder, vocab: &Vocabulary, guess: usize, row: &mut [FeedbackPattern]) {
    let guess = vocab.get(guess).as_bytes();
    for (solution, cell) in vocab.words().iter().zip(row.iter_mut()) {
        *cell = encoder.encode(guess, solution.as_bytes());
    }
}

impl PartialEq for FeedbackMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && (0..self.size).all(|g| self.row(g) == other.row(g))
    }
}

impl Eq for FeedbackMatrix {}

impl fmt::Debug for FeedbackMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackMatrix")
            .field("size", &self.size)
            .field("stride", &self.stride)
            .finish()
    }
}
