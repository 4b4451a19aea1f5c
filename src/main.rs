//! Wordle Bot CLI
//!
//! Command-line interface for the two-ply entropy Wordle solver.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;
use wordle_bot::stats::{self, WINNING_ROUNDS};
use wordle_bot::vocab::load_words;
use wordle_bot::{
    Config, FeedbackPattern, GameState, Mode, Result, Vocabulary, WordleError, WordleSolver,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list of possible solutions, one per line
    #[arg(long)]
    targets: PathBuf,

    /// Word list of extra valid guesses, one per line
    #[arg(long)]
    fillers: Option<PathBuf>,

    /// Required number of words in the targets file
    #[arg(long)]
    expected_targets: Option<usize>,

    /// Required number of words in the fillers file
    #[arg(long)]
    expected_fillers: Option<usize>,

    /// Only allow guesses consistent with earlier feedback
    #[arg(long)]
    hard: bool,

    /// Threads per parallel stage (default: available cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Guesses expanded by the two-ply lookahead (default: workers)
    #[arg(short, long)]
    beam: Option<usize>,

    #[arg(long, default_value_t = wordle_bot::MAX_WORD_LENGTH)]
    word_length: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive assistant (default)
    Play,
    /// Solve for a known answer and show every guess
    Solve { word: String },
    /// Print the best opening guess
    Suggest,
    /// Play every target and report the guess distribution
    Stats,
}

fn build_solver(cli: &Cli) -> Result<WordleSolver> {
    let mut config = Config::new().with_word_length(cli.word_length);
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers).with_beam_width(workers);
    }
    if let Some(beam) = cli.beam {
        config = config.with_beam_width(beam);
    }
    if cli.hard {
        config = config.with_mode(Mode::Hard);
    }
    config.validate()?;

    let targets = load_words(&cli.targets, cli.word_length, cli.expected_targets)?;
    let fillers = match &cli.fillers {
        Some(path) => load_words(path, cli.word_length, cli.expected_fillers)?,
        None => Vec::new(),
    };
    let vocab = Vocabulary::new(targets, fillers, cli.word_length)?;

    println!("Building feedback table for {} words...", vocab.len());
    WordleSolver::new(vocab, config)
}

fn print_help() {
    println!("Commands:");
    println!("  suggest               best next guess");
    println!("  top [n]               top n guesses by one-step entropy");
    println!("  feedback <word> <fb>  apply feedback, e.g. feedback crane gybbb");
    println!("  remaining             list remaining answers");
    println!("  reset                 start a new game");
    println!("  quit                  exit");
    println!();
    println!("Feedback symbols: g = right letter and spot, y = wrong spot, b = not in word");
}

fn print_remaining(solver: &WordleSolver) {
    let remaining = solver.possible_answers();
    println!("Remaining possibilities: {}", remaining.len());
    if remaining.len() <= 20 {
        for (i, word) in remaining.iter().enumerate() {
            if i > 0 && i % 10 == 0 {
                println!();
            }
            print!("{:>8}", word.to_uppercase());
        }
        println!();
    }
}

fn run_interactive(mut solver: WordleSolver) -> io::Result<()> {
    println!("Wordle Bot ({} mode)", if solver.is_hard_mode() { "hard" } else { "easy" });
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let len = solver.config().word_length;

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            "suggest" | "s" => match solver.suggest() {
                Some(suggestion) => {
                    println!("Best guess: {}", solver.word(suggestion.index).to_uppercase());
                    println!("  Two-step entropy: {:.3} bits", suggestion.entropy);
                    println!("Remaining possibilities: {}", solver.remaining_count());
                }
                None => println!("No possible words remaining. Use 'reset' to start over."),
            },
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                let top = solver.top_guesses(n);
                println!(
                    "{:>4} {:>8} {:>8} {:>12} Possible?",
                    "#", "Word", "Entropy", "Exp. Remain"
                );
                println!("{}", "-".repeat(50));
                for (i, analysis) in top.iter().enumerate() {
                    println!(
                        "{:>4} {:>8} {:>8.3} {:>12.1} {}",
                        i + 1,
                        solver.word(analysis.index).to_uppercase(),
                        analysis.entropy,
                        analysis.expected_remaining,
                        if analysis.is_possible_answer { "✓" } else { "" }
                    );
                }
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    continue;
                }
                let before = solver.remaining_count();
                match solver.try_filter(parts[1], parts[2]) {
                    Ok(state) => {
                        if let Ok(pattern) = FeedbackPattern::parse(parts[2], len) {
                            println!("Feedback: {}", pattern.to_emoji_string(len));
                        }
                        let after = solver.remaining_count();
                        println!(
                            "Eliminated {} words ({} → {})",
                            before.saturating_sub(after),
                            before,
                            after
                        );
                        match state {
                            GameState::Won => println!("Solved! Use 'reset' to play again."),
                            GameState::Exhausted => {
                                println!("No words match this feedback. Use 'reset' to start over.")
                            }
                            GameState::InProgress if after <= 10 => print_remaining(&solver),
                            GameState::InProgress => {}
                        }
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "remaining" | "r" => print_remaining(&solver),
            "reset" => {
                solver.reset();
                println!("Reset. {} possible answers.", solver.remaining_count());
            }
            other => {
                println!("Unknown command: {}", other);
                println!("Type 'help' for available commands.");
            }
        }
    }
    Ok(())
}

fn solve(solver: &mut WordleSolver, word: &str) -> Result<()> {
    let word = word.trim().to_lowercase();
    let target = solver
        .vocab()
        .find(&word)
        .filter(|&index| solver.vocab().is_target(index))
        .ok_or_else(|| WordleError::InvalidFormat(format!("'{}' is not a target word", word)))?;
    let len = solver.config().word_length;

    println!("Solving for: {}", word.to_uppercase());
    let result = solver.solve_for_target(target);
    for (i, &(guess, pattern)) in solver.history().iter().enumerate() {
        println!(
            "Guess {}: {} → {}",
            i + 1,
            solver.word(guess).to_uppercase(),
            pattern.to_emoji_string(len)
        );
    }
    result.map(|guesses| println!("Solved in {} guesses.", guesses.len()))
}

fn print_stats(solver: &WordleSolver) -> Result<()> {
    let report = stats::simulate(solver)?;
    let games = report.games();

    println!(
        "First guess: {} with two-step entropy {:.4}",
        solver.word(report.opening),
        report.opening_entropy
    );
    println!("Guess distribution:");
    for (guesses, count) in &report.distribution {
        let pct = *count as f64 / games as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / games).max(1));
        println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
    }
    println!("Mean guesses: {:.4}", report.mean_guesses());
    println!(
        "Win percentage: {:.2}% (within {} guesses)",
        report.wins() as f64 / games as f64 * 100.0,
        WINNING_ROUNDS
    );
    println!("Games lost: {}", report.losses());
    println!("Simulation time: {:.2?}", report.elapsed);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut solver = build_solver(&cli)?;
    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_interactive(solver).map_err(|source| WordleError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        }),
        Command::Solve { word } => solve(&mut solver, &word),
        Command::Suggest => {
            let suggestion = solver
                .suggest()
                .ok_or_else(|| WordleError::ExhaustedSearch("no words available".to_string()))?;
            println!("Best opening guess: {}", solver.word(suggestion.index).to_uppercase());
            println!("Two-step entropy: {:.3} bits", suggestion.entropy);
            Ok(())
        }
        Command::Stats => print_stats(&solver),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
