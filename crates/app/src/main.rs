use std::fmt;
use std::path::PathBuf;

use medmoji_core::model::{GameRules, QuestionBank};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AdvanceOutcome, CheckOutcome, GuessOutcome, QuizSession, QuizTick, QuizView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeconds { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --seconds value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <questions.json>] [--seconds <n>] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in medical bank, 90 seconds per question, random reveal");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MEDMOJI_BANK, MEDMOJI_SECONDS, MEDMOJI_SEED, RUST_LOG");
}

fn print_controls() {
    println!("Type a letter to guess it. Commands: check, hint, next, restart, help, quit.");
}

#[derive(Debug, Default)]
struct Args {
    bank: Option<PathBuf>,
    seconds: Option<u32>,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            bank: std::env::var_os("MEDMOJI_BANK").map(PathBuf::from),
            seconds: std::env::var("MEDMOJI_SECONDS")
                .ok()
                .and_then(|value| value.parse().ok()),
            seed: std::env::var("MEDMOJI_SEED")
                .ok()
                .and_then(|value| value.parse().ok()),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    parsed.bank = Some(PathBuf::from(require_value(args, "--bank")?));
                }
                "--seconds" => {
                    let value = require_value(args, "--seconds")?;
                    let seconds = value
                        .parse::<u32>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or(ArgsError::InvalidSeconds { raw: value.clone() })?;
                    parsed.seconds = Some(seconds);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Guess(char),
    Check,
    Hint,
    Next,
    Restart,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let input = line.trim().to_ascii_lowercase();
        let mut chars = input.chars();
        let cmd = match (chars.next(), chars.next()) {
            (None, _) => return None,
            (Some(c), None) if c.is_ascii_alphabetic() => Self::Guess(c),
            _ => match input.as_str() {
                "check" => Self::Check,
                "hint" => Self::Hint,
                "next" => Self::Next,
                "restart" => Self::Restart,
                "help" => Self::Help,
                "quit" | "exit" => Self::Quit,
                _ => Self::Unknown(input),
            },
        };
        Some(cmd)
    }
}

fn render(view: &QuizView) {
    println!();
    println!(
        "Question {} / {}   Attempts: {}   Time: {}s   Score: {} / {}",
        view.index + 1,
        view.total,
        view.attempts_left,
        view.seconds_left,
        view.summary.correct_count,
        view.total,
    );
    println!("  {}", view.prompt.display_line());
    println!("  {}", view.masked_answer());
    let guessed: String = view.guessed.iter().collect();
    println!("  Guessed: {guessed}");
    if let Some(hint) = &view.hint {
        println!("  Hint: {hint}");
    }
}

fn render_session(quiz: &QuizSession) {
    if let Some(view) = quiz.view() {
        render(&view);
    }
}

fn answer_of(quiz: &QuizSession) -> String {
    quiz.question().answer().to_string()
}

/// Applies one command; returns false when the player quits.
fn apply(quiz: &mut QuizSession, command: Command) -> bool {
    match command {
        Command::Guess(c) => match quiz.guess_char(c) {
            GuessOutcome::Ignored => println!("'{}' is not available right now.", c.to_ascii_uppercase()),
            GuessOutcome::Hit => println!("Yes, the term has {}.", c.to_ascii_uppercase()),
            GuessOutcome::Miss { attempts_left } => {
                println!("No {}. Attempts left: {attempts_left}", c.to_ascii_uppercase());
            }
            GuessOutcome::Won => println!("Correct! Excellent deduction."),
        },
        Command::Check => match quiz.check_answer() {
            CheckOutcome::Ignored => println!("This question is already finished."),
            CheckOutcome::Incorrect { attempts_left } => {
                println!("Not quite. Keep guessing letters. Attempts left: {attempts_left}");
            }
            CheckOutcome::Lost => {
                println!("Attempts exhausted. The correct term was {}.", answer_of(quiz));
            }
            CheckOutcome::Won => println!("Correct! Excellent deduction."),
        },
        Command::Hint => {
            quiz.toggle_hint();
        }
        Command::Next => match quiz.advance() {
            AdvanceOutcome::Refused => println!("Resolve the current question before moving on."),
            AdvanceOutcome::AtEnd => println!("That was the last question."),
            AdvanceOutcome::Loaded { .. } => {}
        },
        Command::Restart => quiz.restart(),
        Command::Help => print_controls(),
        Command::Quit => return false,
        Command::Unknown(input) => println!("Unknown command: {input}"),
    }
    true
}

/// Validates the bank and rules once, before the first question loads.
fn load_content(
    json: Option<&str>,
    seconds: Option<u32>,
) -> Result<(QuestionBank, GameRules), medmoji_core::Error> {
    let bank = match json {
        Some(json) => QuestionBank::from_json(json)?,
        None => QuestionBank::builtin()?,
    };
    let rules = match seconds {
        Some(secs) => GameRules::standard().with_countdown_secs(secs)?,
        None => GameRules::standard(),
    };
    Ok((bank, rules))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let json = args.bank.as_ref().map(std::fs::read_to_string).transpose()?;
    let (bank, rules) = load_content(json.as_deref(), args.seconds)?;
    let mut quiz = match args.seed {
        Some(seed) => QuizSession::new(bank, rules, StdRng::seed_from_u64(seed))?,
        None => QuizSession::with_os_rng(bank, rules)?,
    };
    tracing::info!(questions = quiz.total(), "quiz started");

    println!(
        "{} questions, {} seconds each.",
        quiz.bank().len(),
        quiz.rules().countdown_secs()
    );
    print_controls();
    render_session(&quiz);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(command) = Command::parse(&line) else { continue };
                if !apply(&mut quiz, command) {
                    break;
                }
                render_session(&quiz);
            }
            _ = ticker.tick() => {
                let Some(handle) = quiz.active_timer() else { continue };
                match quiz.tick_for(handle) {
                    QuizTick::Counting { seconds_left } if seconds_left % 15 == 0 || seconds_left <= 5 => {
                        println!("  {seconds_left}s left");
                    }
                    QuizTick::TimedOut { auto_advance_in } => {
                        println!("Time's up! The correct term was {}.", answer_of(&quiz));
                        if let Some(delay) = auto_advance_in {
                            println!("Next question in {delay}s.");
                        }
                    }
                    QuizTick::Advanced { .. } => render_session(&quiz),
                    _ => {}
                }
            }
        }
    }

    let summary = quiz.summary();
    println!();
    println!("Score: {} / {}", summary.correct_count, summary.total);
    if summary.complete {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_are_guesses() {
        assert_eq!(Command::parse(" n \n"), Some(Command::Guess('n')));
        assert_eq!(Command::parse("Q"), Some(Command::Guess('q')));
        assert_eq!(Command::parse("7"), Some(Command::Unknown("7".into())));
    }

    #[test]
    fn words_are_commands() {
        assert_eq!(Command::parse("NEXT"), Some(Command::Next));
        assert_eq!(Command::parse("check"), Some(Command::Check));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn flags_override_defaults() {
        let mut argv = ["--seconds", "30", "--seed", "7", "--bank", "bank.json"]
            .into_iter()
            .map(String::from);
        let args = Args::parse(&mut argv).unwrap();
        assert_eq!(args.seconds, Some(30));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.bank, Some(PathBuf::from("bank.json")));
    }

    #[test]
    fn bad_flags_are_reported() {
        let mut argv = ["--seconds", "0"].into_iter().map(String::from);
        assert!(matches!(Args::parse(&mut argv), Err(ArgsError::InvalidSeconds { .. })));

        let mut argv = ["--seed"].into_iter().map(String::from);
        assert!(matches!(Args::parse(&mut argv), Err(ArgsError::MissingValue { flag: "--seed" })));

        let mut argv = ["--fast"].into_iter().map(String::from);
        assert!(matches!(Args::parse(&mut argv), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn content_is_validated_before_play() {
        let (bank, rules) = load_content(None, Some(45)).unwrap();
        assert_eq!(bank.len(), 10);
        assert_eq!(rules.countdown_secs(), 45);

        let leaky = r#"[{"type":"text","question":"Sugar","answer":"Diabetes","hint":"diabetes"}]"#;
        assert!(matches!(load_content(Some(leaky), None), Err(medmoji_core::Error::Bank(_))));
        assert!(matches!(load_content(None, Some(0)), Err(medmoji_core::Error::Rules(_))));
    }

    #[test]
    fn commands_drive_the_session() {
        let bank = QuestionBank::builtin().unwrap();
        let mut quiz = QuizSession::new(bank, GameRules::standard(), StdRng::seed_from_u64(1)).unwrap();
        assert!(apply(&mut quiz, Command::Hint));
        assert!(quiz.hint_visible());
        assert!(apply(&mut quiz, Command::Next));
        assert_eq!(quiz.current_index(), 0);
        assert!(!apply(&mut quiz, Command::Quit));
    }
}
