//! Batch simulation over every target word.

use std::time::{Duration, Instant};

use log::info;
use rayon::prelude::*;

use crate::error::{Result, WordleError};
use crate::solver::WordleSolver;

/// Games lasting more rounds than this count as lost.
pub const WINNING_ROUNDS: usize = 6;

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub opening: usize,
    pub opening_entropy: f64,
    /// `(guesses, games)` pairs in ascending order of guesses.
    pub distribution: Vec<(usize, usize)>,
    /// Targets the solver never found.
    pub failures: Vec<usize>,
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn games(&self) -> usize {
        self.distribution.iter().map(|(_, count)| count).sum::<usize>() + self.failures.len()
    }

    /// Mean guesses over solved games.
    pub fn mean_guesses(&self) -> f64 {
        let solved: usize = self.distribution.iter().map(|(_, count)| count).sum();
        if solved == 0 {
            return 0.0;
        }
        let total: usize = self.distribution.iter().map(|(g, count)| g * count).sum();
        total as f64 / solved as f64
    }

    pub fn wins(&self) -> usize {
        self.distribution
            .iter()
            .filter(|(g, _)| *g <= WINNING_ROUNDS)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn losses(&self) -> usize {
        self.games() - self.wins()
    }
}

/// Play every target from a fresh game. The opening guess is computed once
/// and reused, since it does not depend on the answer.
pub fn simulate(solver: &WordleSolver) -> Result<SimulationReport> {
    let start = Instant::now();
    let base = solver.fresh();
    let opening = base
        .suggest()
        .ok_or_else(|| WordleError::ExhaustedSearch("no opening guess available".to_string()))?;
    info!(
        "opening guess '{}' with two-ply entropy {:.4}",
        base.word(opening.index),
        opening.entropy
    );

    let outcomes: Vec<(usize, Option<usize>)> = base
        .vocab()
        .target_range()
        .into_par_iter()
        .map(|target| {
            let mut game = base.fresh();
            let rounds = game
                .solve_from(target, Some(opening.index))
                .ok()
                .map(|guesses| guesses.len());
            (target, rounds)
        })
        .collect();

    let max_rounds = outcomes.iter().filter_map(|(_, r)| *r).max().unwrap_or(0);
    let mut counts = vec![0usize; max_rounds + 1];
    let mut failures = Vec::new();
    for (target, rounds) in outcomes {
        match rounds {
            Some(rounds) => counts[rounds] += 1,
            None => failures.push(target),
        }
    }

    let report = SimulationReport {
        opening: opening.index,
        opening_entropy: opening.entropy,
        distribution: counts
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect(),
        failures,
        elapsed: start.elapsed(),
    };
    info!(
        "simulated {} games in {:.2?}: mean {:.4} guesses, {} lost",
        report.games(),
        report.elapsed,
        report.mean_guesses(),
        report.losses()
    );
    Ok(report)
}
