#![allow(dead_code)]

use wordle_bot::{Config, Mode, Vocabulary, WordleSolver};

pub const TARGETS: &[&str] = &[
    "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    "cigar", "rebut", "sissy", "humph", "awake", "blush", "focal", "evade", "naval", "serve",
    "heath", "dwarf", "model", "karma", "stink", "grade", "quiet", "bench", "abate", "feign",
];

pub const FILLERS: &[&str] = &[
    "aahed", "salet", "tares", "lares", "soare", "roate", "reast", "carse", "hoops", "jumpy",
    "vozhd", "fjord", "glyph", "nymph", "zebus",
];

pub fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn vocab() -> Vocabulary {
    Vocabulary::new(strings(TARGETS), strings(FILLERS), 5).unwrap()
}

pub fn config(mode: Mode) -> Config {
    Config::new().with_workers(4).with_beam_width(4).with_mode(mode)
}

pub fn solver(mode: Mode) -> WordleSolver {
    WordleSolver::new(vocab(), config(mode)).unwrap()
}

pub fn solver_with_targets(targets: &[&str], mode: Mode) -> WordleSolver {
    let vocab = Vocabulary::new(strings(targets), Vec::new(), targets[0].len()).unwrap();
    WordleSolver::new(vocab, config(mode).with_word_length(targets[0].len())).unwrap()
}

pub fn index_of(solver: &WordleSolver, word: &str) -> usize {
    solver.vocab().find(word).unwrap()
}
