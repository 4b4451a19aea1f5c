//! Two-ply entropy search.
//!
//! Every legal guess is scored by the Shannon entropy of the feedback it
//! induces over the alive targets. The best `beam_width` of those then get a
//! lookahead: for each feedback bucket the guess could produce, the best
//! entropy reachable by the following guess, weighted by the bucket's share of
//! targets. The guess with the highest sum wins.
//!
//! Both plies run on `workers` scoped threads. A barrier separates them; the
//! thread the barrier elects as leader selects the beam, then workers pull beam
//! entries from a shared cursor.

use std::cmp::Ordering as CmpOrdering;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Barrier, OnceLock};

use crossbeam_utils::atomic::AtomicCell;
use log::debug;
use rayon::prelude::*;

use crate::alive::AliveSet;
use crate::config::{Config, Mode};
use crate::feedback::FeedbackPattern;
use crate::matrix::FeedbackMatrix;
use crate::queue::{balanced_ranges, fork_join};
use crate::vocab::Vocabulary;

/// The engine's proposed next guess and its two-ply entropy in bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion {
    pub index: usize,
    pub entropy: f64,
}

/// First-ply analysis of a single guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub index: usize,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_possible_answer: bool,
}

/// Shannon entropy, in bits, of the feedback `row` induces over `targets`.
///
/// `counts` is scratch space with one slot per feedback pattern.
pub fn entropy(row: &[FeedbackPattern], targets: &[u32], counts: &mut [u32]) -> f64 {
    if targets.len() <= 1 {
        return 0.0;
    }
    counts.fill(0);
    for &target in targets {
        counts[row[target as usize].0 as usize] += 1;
    }

    let n = targets.len() as f64;
    let mut entropy = 0.0;
    for &count in counts.iter() {
        if count > 0 {
            let p = count as f64 / n;
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Best entropy achievable by one more guess once play is confined to
/// `targets`, choosing among `targets` and `fillers`.
///
/// With at most two targets, guessing one of them always finishes within
/// `count` further turns, so the value is `count - 1` without searching.
pub fn best_follow_up(
    matrix: &FeedbackMatrix,
    targets: &[u32],
    fillers: &[u32],
    counts: &mut [u32],
) -> f64 {
    if targets.len() <= 2 {
        return targets.len().saturating_sub(1) as f64;
    }
    targets
        .iter()
        .chain(fillers)
        .map(|&guess| entropy(matrix.row(guess as usize), targets, counts))
        .fold(0.0, f64::max)
}

/// A scored guess. Higher entropy wins; equal entropy goes to the lower index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    entropy_bits: u64,
    index: u64,
}

impl Move {
    fn new(index: u32, entropy: f64) -> Self {
        Self {
            entropy_bits: entropy.to_bits(),
            index: index as u64,
        }
    }

    fn entropy(self) -> f64 {
        f64::from_bits(self.entropy_bits)
    }

    fn beats(self, other: Option<Move>) -> bool {
        match other {
            None => true,
            Some(other) => match self.entropy().total_cmp(&other.entropy()) {
                CmpOrdering::Greater => true,
                CmpOrdering::Equal => self.index < other.index,
                CmpOrdering::Less => false,
            },
        }
    }
}

/// Shared best-move slot, raised only through compare-and-swap.
struct BestMove(AtomicCell<Option<Move>>);

impl BestMove {
    fn new() -> Self {
        Self(AtomicCell::new(None))
    }

    fn offer(&self, candidate: Move) {
        let mut current = self.0.load();
        while candidate.beats(current) {
            match self.0.compare_exchange(current, Some(candidate)) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    fn get(&self) -> Option<Move> {
        self.0.load()
    }
}

/// Per-worker buffers, reused across every guess the worker scores.
struct Scratch {
    counts: Vec<u32>,
    target_buckets: Vec<Vec<u32>>,
    filler_buckets: Vec<Vec<u32>>,
}

impl Scratch {
    fn new(num_patterns: usize) -> Self {
        Self {
            counts: vec![0; num_patterns],
            target_buckets: vec![Vec::new(); num_patterns],
            filler_buckets: vec![Vec::new(); num_patterns],
        }
    }
}

fn bucket(row: &[FeedbackPattern], indices: &[u32], buckets: &mut [Vec<u32>]) {
    for bucket in buckets.iter_mut() {
        bucket.clear();
    }
    for &index in indices {
        buckets[row[index as usize].0 as usize].push(index);
    }
}

/// State shared by the workers of one `suggest` call.
struct Search<'a> {
    vocab: &'a Vocabulary,
    matrix: &'a FeedbackMatrix,
    targets: &'a [u32],
    fillers: &'a [u32],
    guesses: &'a [u32],
    beam_width: usize,
    relative_cutoff: Option<f64>,
    num_patterns: usize,
    entropies: Vec<AtomicU64>,
    barrier: Barrier,
    beam: OnceLock<Vec<usize>>,
    cursor: AtomicUsize,
    best: BestMove,
}

impl Search<'_> {
    fn work(&self, positions: Range<usize>) {
        let mut scratch = Scratch::new(self.num_patterns);

        let mut local_best = None;
        for pos in positions {
            let guess = self.guesses[pos];
            let h = entropy(self.matrix.row(guess as usize), self.targets, &mut scratch.counts);
            self.entropies[pos].store(h.to_bits(), Ordering::Relaxed);
            let candidate = Move::new(guess, h);
            if candidate.beats(local_best) {
                local_best = Some(candidate);
            }
        }
        if let Some(candidate) = local_best {
            self.best.offer(candidate);
        }

        if self.barrier.wait().is_leader() {
            let _ = self.beam.set(self.select_beam());
        }
        self.barrier.wait();

        let beam = self.beam.get().map(Vec::as_slice).unwrap_or_default();
        loop {
            let slot = self.cursor.fetch_add(1, Ordering::Relaxed);
            let Some(&pos) = beam.get(slot) else {
                break;
            };
            let guess = self.guesses[pos];
            let first = f64::from_bits(self.entropies[pos].load(Ordering::Relaxed));
            let total = first + self.lookahead(guess, &mut scratch);
            self.entropies[pos].store(total.to_bits(), Ordering::Relaxed);
            self.best.offer(Move::new(guess, total));
        }
    }

    /// Positions into `guesses` of the top first-ply scores, best first.
    /// Guesses that reveal nothing are never expanded.
    fn select_beam(&self) -> Vec<usize> {
        let first_best = self.best.get().map_or(0.0, Move::entropy);
        let floor = self.relative_cutoff.map_or(0.0, |cutoff| first_best / cutoff);

        let mut ranked: Vec<(f64, u32, usize)> = self
            .entropies
            .iter()
            .enumerate()
            .map(|(pos, h)| (f64::from_bits(h.load(Ordering::Relaxed)), self.guesses[pos], pos))
            .filter(|&(h, _, _)| h > 0.0 && h >= floor)
            .collect();

        let rank = |a: &(f64, u32, usize), b: &(f64, u32, usize)| {
            b.0.total_cmp(&a.0).then(a.1.cmp(&b.1))
        };
        let width = self.beam_width.min(self.targets.len()).min(ranked.len());
        if width == 0 {
            return Vec::new();
        }
        if width < ranked.len() {
            ranked.select_nth_unstable_by(width - 1, rank);
            ranked.truncate(width);
        }
        ranked.sort_unstable_by(rank);

        debug!(
            "first-ply best {:.4} bits; beam {:?}",
            first_best,
            ranked
                .iter()
                .map(|&(h, guess, _)| format!("{}={:.4}", self.vocab.get(guess as usize), h))
                .collect::<Vec<_>>()
        );
        ranked.into_iter().map(|(_, _, pos)| pos).collect()
    }

    /// Weighted best next-turn entropy over the buckets `candidate` splits the targets into.
    fn lookahead(&self, candidate: u32, scratch: &mut Scratch) -> f64 {
        let row = self.matrix.row(candidate as usize);
        bucket(row, self.targets, &mut scratch.target_buckets);
        bucket(row, self.fillers, &mut scratch.filler_buckets);

        let n = self.targets.len() as f64;
        let mut weighted = 0.0;
        for (targets, fillers) in scratch.target_buckets.iter().zip(&scratch.filler_buckets) {
            if targets.is_empty() {
                continue;
            }
            let best = best_follow_up(self.matrix, targets, fillers, &mut scratch.counts);
            weighted += targets.len() as f64 / n * best;
        }
        weighted
    }
}

/// Suggests guesses for the current alive set.
pub struct EntropyEngine<'a> {
    vocab: &'a Vocabulary,
    matrix: &'a FeedbackMatrix,
    alive: &'a AliveSet,
    config: &'a Config,
}

impl<'a> EntropyEngine<'a> {
    pub fn new(
        vocab: &'a Vocabulary,
        matrix: &'a FeedbackMatrix,
        alive: &'a AliveSet,
        config: &'a Config,
    ) -> Self {
        Self {
            vocab,
            matrix,
            alive,
            config,
        }
    }

    /// Every word that may be guessed this turn: the whole vocabulary in easy
    /// mode, only alive words in hard mode.
    pub fn guess_universe(&self) -> Vec<u32> {
        match self.alive.mode() {
            Mode::Easy => (0..self.vocab.len() as u32).collect(),
            Mode::Hard => self
                .alive
                .targets()
                .iter()
                .chain(self.alive.fillers())
                .copied()
                .collect(),
        }
    }

    /// The guess with the highest two-ply entropy, or `None` if no target is alive.
    pub fn suggest(&self) -> Option<Suggestion> {
        let targets = self.alive.targets();
        match targets.len() {
            0 => return None,
            n @ (1 | 2) => {
                return Some(Suggestion {
                    index: targets[0] as usize,
                    entropy: (n - 1) as f64,
                })
            }
            _ => {}
        }

        let guesses = self.guess_universe();
        let workers = self.config.workers.min(guesses.len()).max(1);
        let search = Search {
            vocab: self.vocab,
            matrix: self.matrix,
            targets,
            fillers: self.alive.fillers(),
            guesses: &guesses,
            beam_width: self.config.beam_width,
            relative_cutoff: self.config.relative_cutoff,
            num_patterns: FeedbackPattern::num_patterns(self.vocab.word_length()),
            entropies: guesses.iter().map(|_| AtomicU64::new(0)).collect(),
            barrier: Barrier::new(workers),
            beam: OnceLock::new(),
            cursor: AtomicUsize::new(0),
            best: BestMove::new(),
        };

        let shared = &search;
        let count = guesses.len();
        fork_join(workers, move |queue| {
            for positions in balanced_ranges(count, workers) {
                queue.push(move || shared.work(positions));
            }
        });

        let best = search.best.get()?;
        Some(Suggestion {
            index: best.index as usize,
            entropy: best.entropy(),
        })
    }

    /// The top `n` guesses by first-ply entropy, ties in vocabulary order.
    pub fn top_guesses(&self, n: usize) -> Vec<GuessAnalysis> {
        let targets = self.alive.targets();
        if targets.is_empty() {
            return Vec::new();
        }

        let mut alive = vec![false; self.vocab.len()];
        for &target in targets {
            alive[target as usize] = true;
        }

        let num_patterns = FeedbackPattern::num_patterns(self.vocab.word_length());
        let remaining = targets.len() as f64;
        let mut analyses: Vec<GuessAnalysis> = self
            .guess_universe()
            .par_iter()
            .map_init(
                || vec![0u32; num_patterns],
                |counts, &guess| {
                    let entropy = entropy(self.matrix.row(guess as usize), targets, counts);
                    GuessAnalysis {
                        index: guess as usize,
                        entropy,
                        expected_remaining: remaining / entropy.exp2(),
                        is_possible_answer: alive[guess as usize],
                    }
                },
            )
            .collect();

        analyses.sort_by(|a, b| b.entropy.total_cmp(&a.entropy).then(a.index.cmp(&b.index)));
        analyses.truncate(n);
        analyses
    }
}
