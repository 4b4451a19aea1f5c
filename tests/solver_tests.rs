mod common;

use wordle_bot::engine::entropy;
use wordle_bot::stats::{self, WINNING_ROUNDS};
use wordle_bot::{
    Config, FeedbackPattern, GameState, Mode, Vocabulary, WordleError, WordleSolver,
};

#[test]
fn test_solver_creation() {
    let solver = common::solver(Mode::Easy);
    assert_eq!(solver.remaining_count(), common::TARGETS.len());
    assert_eq!(solver.state(), GameState::InProgress);
    assert!(!solver.is_hard_mode());
}

#[test]
fn test_config_validation() {
    let vocab = common::vocab();
    let err = WordleSolver::new(vocab.clone(), Config::new().with_mode(Mode::Hard).with_workers(1));
    assert!(matches!(err, Err(WordleError::Configuration(_))));

    let err = WordleSolver::new(vocab.clone(), Config::new().with_workers(0));
    assert!(matches!(err, Err(WordleError::Configuration(_))));

    let err = WordleSolver::new(vocab.clone(), Config::new().with_beam_width(0));
    assert!(matches!(err, Err(WordleError::Configuration(_))));

    let err = WordleSolver::new(vocab.clone(), Config::new().with_relative_cutoff(Some(0.5)));
    assert!(matches!(err, Err(WordleError::Configuration(_))));

    let err = WordleSolver::new(vocab.clone(), Config::new().with_word_length(4));
    assert!(matches!(err, Err(WordleError::Configuration(_))));

    let err = WordleSolver::new(vocab, Config::new().with_word_length(6));
    assert!(matches!(err, Err(WordleError::Configuration(_))));
}

#[test]
fn test_apply_feedback() {
    let mut solver = common::solver(Mode::Easy);
    let crane = common::index_of(&solver, "crane");
    let crate_ = common::index_of(&solver, "crate");

    let pattern = solver.feedback_for(crane, crate_);
    assert_eq!(pattern, FeedbackPattern::calculate("crane", "crate"));
    assert_eq!(solver.filter(crane, pattern), GameState::InProgress);

    assert!(solver.remaining_count() < common::TARGETS.len());
    assert!(solver.possible_answers().contains(&"crate"));
    assert!(!solver.possible_answers().contains(&"crane"));
}

#[test]
fn test_try_filter() {
    let mut solver = common::solver(Mode::Easy);
    assert!(matches!(solver.try_filter("crane", "gggg"), Err(WordleError::InvalidFormat(_))));
    assert!(matches!(solver.try_filter("crane", "ggxgg"), Err(WordleError::InvalidFormat(_))));
    assert!(matches!(solver.try_filter("zzzzz", "bbbbb"), Err(WordleError::InvalidFormat(_))));
    assert!(matches!(solver.try_filter("cranes", "bbbbb"), Err(WordleError::InvalidFormat(_))));
    assert_eq!(solver.remaining_count(), common::TARGETS.len());

    assert_eq!(solver.try_filter(" CRANE ", "GGGBG").unwrap(), GameState::InProgress);
    assert_eq!(solver.possible_answers(), vec!["crate"]);
    assert_eq!(solver.try_filter("crate", "ggggg").unwrap(), GameState::Won);
}

#[test]
fn test_try_filter_hard_mode_rejects_dead_guess() {
    let mut solver = common::solver(Mode::Hard);
    solver.try_filter("crane", "gggbg").unwrap();
    assert!(matches!(solver.try_filter("slate", "bbbbg"), Err(WordleError::InvalidFormat(_))));
    assert_eq!(solver.try_filter("crate", "ggggg").unwrap(), GameState::Won);
}

#[test]
fn test_single_answer() {
    let mut solver = common::solver_with_targets(&["crane"], Mode::Easy);
    let best = solver.suggest().unwrap();
    assert_eq!(solver.word(best.index), "crane");
    assert_eq!(best.entropy, 0.0);

    let state = solver.filter(best.index, FeedbackPattern::all_correct(5));
    assert_eq!(state, GameState::Won);
    assert_eq!(solver.remaining_count(), 1);
}

#[test]
fn test_two_remaining_words() {
    let solver = common::solver_with_targets(&["abcde", "fghij"], Mode::Easy);
    let best = solver.suggest().unwrap();
    assert_eq!(solver.word(best.index), "abcde");
    assert_eq!(best.entropy, 1.0);
}

#[test]
fn test_no_suggestion_once_exhausted() {
    let mut solver = common::solver(Mode::Easy);
    let crane = common::index_of(&solver, "crane");
    solver.filter(crane, FeedbackPattern::parse("ggggb", 5).unwrap());
    assert_eq!(solver.state(), GameState::Exhausted);
    assert!(solver.suggest().is_none());
    assert!(solver.top_guesses(5).is_empty());
}

#[test]
fn test_suggestion_bounds() {
    for mode in [Mode::Easy, Mode::Hard] {
        let solver = common::solver(mode);
        let best = solver.suggest().unwrap();
        let n = solver.remaining_count() as f64;
        // One ply can reveal at most log2(n) bits, and two plies at most that twice.
        assert!(best.entropy > 0.0);
        assert!(best.entropy <= 2.0 * n.log2() + 1e-9);

        let mut counts = vec![0u32; FeedbackPattern::num_patterns(5)];
        let first = entropy(solver.matrix().row(best.index), solver.alive().targets(), &mut counts);
        assert!(first <= n.log2() + 1e-9);
        assert!(best.entropy >= first);
    }
}

#[test]
fn test_two_ply_beats_every_first_ply_score() {
    let solver = common::solver(Mode::Easy);
    let best = solver.suggest().unwrap();
    let top = solver.top_guesses(1);
    assert!(best.entropy >= top[0].entropy);
}

#[test]
fn test_suggestion_is_deterministic() {
    let vocab = common::vocab();
    let baseline = common::solver(Mode::Easy).suggest().unwrap();
    for workers in [1, 2, 3, 8] {
        let config = Config::new().with_workers(workers).with_beam_width(4);
        let solver = WordleSolver::new(vocab.clone(), config).unwrap();
        let best = solver.suggest().unwrap();
        assert_eq!(best.index, baseline.index, "{} workers", workers);
        assert_eq!(best.entropy, baseline.entropy, "{} workers", workers);
    }
}

#[test]
fn test_relative_cutoff_keeps_first_ply_best() {
    let solver = WordleSolver::new(
        common::vocab(),
        common::config(Mode::Easy).with_relative_cutoff(Some(1.0)),
    )
    .unwrap();
    let best = solver.suggest().unwrap();
    let top = solver.top_guesses(1);

    // Only guesses tied with the first-ply best are expanded.
    let mut counts = vec![0u32; FeedbackPattern::num_patterns(5)];
    let first = entropy(solver.matrix().row(best.index), solver.alive().targets(), &mut counts);
    assert_eq!(first, top[0].entropy);
    assert!(best.entropy >= top[0].entropy);
}

#[test]
fn test_solve_every_target() {
    for mode in [Mode::Easy, Mode::Hard] {
        let solver = common::solver(mode);
        for target in solver.vocab().target_range() {
            let mut game = solver.fresh();
            let guesses = game.solve_for_target(target).unwrap();
            assert_eq!(guesses.last().map(|&(g, _)| g), Some(target));
            assert!(guesses.last().unwrap().1.is_win(5));
            assert!(guesses.len() <= 8, "{:?} took {} guesses", mode, guesses.len());
            assert_eq!(game.state(), GameState::Won);
            assert_eq!(game.history(), guesses.as_slice());
        }
    }
}

#[test]
fn test_hard_mode_guesses_stay_alive() {
    let solver = common::solver(Mode::Hard);
    for target in solver.vocab().target_range() {
        let mut game = solver.fresh();
        loop {
            let best = game.suggest().unwrap();
            let alive = game.alive();
            let index = best.index as u32;
            assert!(alive.targets().contains(&index) || alive.fillers().contains(&index));
            let pattern = game.feedback_for(best.index, target);
            if game.filter(best.index, pattern) == GameState::Won {
                break;
            }
        }
    }
}

#[test]
fn test_round_cap() {
    let config = common::config(Mode::Easy).with_max_rounds(1);
    let mut solver = WordleSolver::new(common::vocab(), config).unwrap();
    let opening = solver.suggest().unwrap().index;
    let target = solver.vocab().target_range().find(|&t| t != opening).unwrap();
    assert!(matches!(
        solver.solve_for_target(target),
        Err(WordleError::ExhaustedSearch(_))
    ));

    // The failed game still records what was played.
    assert_eq!(
        solver.history(),
        &[(opening, solver.feedback_for(opening, target))]
    );
}

#[test]
fn test_reset() {
    let mut solver = common::solver(Mode::Hard);
    let crane = common::index_of(&solver, "crane");
    let toast = common::index_of(&solver, "toast");
    solver.filter(crane, solver.feedback_for(crane, toast));
    assert!(solver.remaining_count() < common::TARGETS.len());
    assert_eq!(solver.history().len(), 1);

    solver.reset();
    assert!(solver.history().is_empty());
    assert_eq!(solver.remaining_count(), common::TARGETS.len());
    assert_eq!(solver.alive().fillers().len(), common::FILLERS.len());
}

#[test]
fn test_fresh_shares_matrix() {
    let mut solver = common::solver(Mode::Easy);
    let crane = common::index_of(&solver, "crane");
    solver.filter(crane, FeedbackPattern::all_correct(5));

    let fresh = solver.fresh();
    assert_eq!(fresh.state(), GameState::InProgress);
    assert_eq!(fresh.remaining_count(), common::TARGETS.len());
    assert!(std::ptr::eq(fresh.matrix(), solver.matrix()));
}

#[test]
fn test_top_guesses() {
    let solver = common::solver(Mode::Easy);
    let top = solver.top_guesses(5);
    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(pair[0].entropy >= pair[1].entropy);
    }
    for analysis in &top {
        assert_eq!(analysis.is_possible_answer, solver.vocab().is_target(analysis.index));
        assert!(analysis.expected_remaining <= solver.remaining_count() as f64);
    }

    let all = solver.top_guesses(usize::MAX);
    assert_eq!(all.len(), solver.vocab().len());
}

#[test]
fn test_hard_mode_top_guesses_only_alive() {
    let mut solver = common::solver(Mode::Hard);
    solver.try_filter("crane", "bbbbb").unwrap();
    let top = solver.top_guesses(usize::MAX);
    assert_eq!(top.len(), solver.alive().len());
}

#[test]
fn test_shorter_words() {
    let vocab = Vocabulary::new(
        common::strings(&["cat", "bat", "rat", "tab", "act", "arc"]),
        common::strings(&["sat"]),
        3,
    )
    .unwrap();
    let config = common::config(Mode::Easy).with_word_length(3);
    let mut solver = WordleSolver::new(vocab, config).unwrap();
    for target in solver.vocab().target_range() {
        let guesses = solver.fresh().solve_for_target(target).unwrap();
        assert_eq!(guesses.last().map(|&(g, _)| g), Some(target));
    }
    solver.reset();
    assert_eq!(solver.remaining_count(), 6);
}

#[test]
fn test_simulation_report() {
    let solver = common::solver(Mode::Easy);
    let report = stats::simulate(&solver).unwrap();
    assert_eq!(report.games(), common::TARGETS.len());
    assert!(report.failures.is_empty());
    assert_eq!(report.opening, solver.suggest().unwrap().index);
    assert!(report.mean_guesses() >= 1.0);
    assert_eq!(report.wins() + report.losses(), report.games());
    assert!(report.distribution.iter().all(|&(guesses, _)| guesses <= WINNING_ROUNDS));
}

/// Serial two-ply scoring of the current position, expanding the same beam as
/// the engine: the top `min(beam_width, targets)` first-ply guesses with
/// positive entropy. Returns the winning index and score.
fn reference_suggestion(solver: &WordleSolver) -> (usize, f64) {
    let matrix = solver.matrix();
    let targets = solver.alive().targets();
    let fillers = solver.alive().fillers();
    let num_patterns = FeedbackPattern::num_patterns(solver.config().word_length);
    let mut counts = vec![0u32; num_patterns];

    let guesses: Vec<usize> = match solver.config().mode {
        Mode::Easy => (0..solver.vocab().len()).collect(),
        Mode::Hard => targets.iter().chain(fillers).map(|&i| i as usize).collect(),
    };
    let first: Vec<f64> = guesses
        .iter()
        .map(|&g| entropy(matrix.row(g), targets, &mut counts))
        .collect();

    let mut ranked: Vec<usize> = (0..guesses.len()).filter(|&p| first[p] > 0.0).collect();
    ranked.sort_by(|&a, &b| first[b].total_cmp(&first[a]).then(guesses[a].cmp(&guesses[b])));
    ranked.truncate(solver.config().beam_width.min(targets.len()));

    let mut scores = first;
    let n = targets.len() as f64;
    for &pos in &ranked {
        let row = matrix.row(guesses[pos]);
        let mut lookahead = 0.0;
        for pattern in 0..num_patterns {
            let bucket = |ids: &[u32]| -> Vec<u32> {
                ids.iter()
                    .copied()
                    .filter(|&i| row[i as usize].0 as usize == pattern)
                    .collect()
            };
            let (in_targets, in_fillers) = (bucket(targets), bucket(fillers));
            if in_targets.is_empty() {
                continue;
            }
            let best = if in_targets.len() <= 2 {
                (in_targets.len() - 1) as f64
            } else {
                in_targets
                    .iter()
                    .chain(&in_fillers)
                    .map(|&g| entropy(matrix.row(g as usize), &in_targets, &mut counts))
                    .fold(0.0, f64::max)
            };
            lookahead += in_targets.len() as f64 / n * best;
        }
        scores[pos] += lookahead;
    }

    let best = (0..guesses.len())
        .min_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(guesses[a].cmp(&guesses[b])))
        .unwrap();
    (guesses[best], scores[best])
}

fn assert_matches_reference(solver: &WordleSolver) {
    let best = solver.suggest().unwrap();
    let (index, score) = reference_suggestion(solver);
    assert_eq!(
        solver.word(best.index),
        solver.word(index),
        "{:?} mode",
        solver.config().mode
    );
    assert!((best.entropy - score).abs() < 1e-12, "{} vs {}", best.entropy, score);
}

#[test]
fn test_two_ply_matches_serial_scoring() {
    for mode in [Mode::Easy, Mode::Hard] {
        let vocab = common::vocab();
        let config = common::config(mode).with_beam_width(vocab.len());
        let mut solver = WordleSolver::new(vocab, config).unwrap();
        assert_matches_reference(&solver);

        let salet = common::index_of(&solver, "salet");
        let grade = common::index_of(&solver, "grade");
        solver.filter(salet, solver.feedback_for(salet, grade));
        if solver.remaining_count() > 2 {
            assert_matches_reference(&solver);
        }
    }
}

#[test]
fn test_two_ply_narrow_beam_matches_serial_scoring() {
    for mode in [Mode::Easy, Mode::Hard] {
        let config = common::config(mode).with_beam_width(2);
        let solver = WordleSolver::new(common::vocab(), config).unwrap();
        assert_matches_reference(&solver);
    }
}

#[test]
fn test_lookahead_adds_follow_up_entropy() {
    let solver = common::solver(Mode::Easy);
    let best = solver.suggest().unwrap();
    let mut counts = vec![0u32; FeedbackPattern::num_patterns(5)];
    let first = entropy(solver.matrix().row(best.index), solver.alive().targets(), &mut counts);
    // No single guess separates all 30 targets, so the follow-up adds information.
    assert!(best.entropy > first + 0.1);
}

/// "-ook" targets that no target tells apart quickly, and a filler built from
/// their distinguishing letters.
fn ook_solver(mode: Mode) -> WordleSolver {
    let targets = ["book", "cook", "hook", "look", "nook", "took", "pant", "rant", "want"];
    let vocab = Vocabulary::new(common::strings(&targets), common::strings(&["chub"]), 4).unwrap();
    let config = common::config(mode).with_word_length(4);
    WordleSolver::new(vocab, config).unwrap()
}

#[test]
fn test_hard_mode_follow_ups_include_fillers() {
    let solver = ook_solver(Mode::Hard);
    let best = solver.suggest().unwrap();

    // "pant" leaves book, cook, hook and look in one bucket. "chub" is still a
    // legal hard-mode guess there and separates all four, so two guesses
    // resolve the nine targets completely. "rant" and "want" score the same.
    assert!(["pant", "rant", "want"].contains(&solver.word(best.index)));
    assert!((best.entropy - 9f64.log2()).abs() < 1e-12);
    assert_matches_reference(&solver);
}

#[test]
fn test_easy_mode_follow_ups_use_targets() {
    let solver = ook_solver(Mode::Easy);
    let best = solver.suggest().unwrap();

    // Without the filler as a second guess, opening with it scores best.
    assert_eq!(solver.word(best.index), "chub");
    assert!(best.entropy < 9f64.log2() - 0.1);
    assert_matches_reference(&solver);
}
