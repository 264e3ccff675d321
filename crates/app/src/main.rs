use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::QuestionBank;
use services::quiz::outcome_message;
use services::{QuizIntent, QuizLoopService, QuizSignal};
use storage::{JsonFileSnapshotStore, SnapshotStore};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--snapshot <path>] [--fresh] [--no-retreat]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --snapshot quiz_snapshot.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SNAPSHOT  overrides the default snapshot path");
    eprintln!();
    eprintln!("Keys once running:");
    eprintln!("  t/f  answer true/false    n  next question");
    eprintln!("  p    previous question    c  peek at the answer");
    eprintln!("  s    show progress        q  save and quit");
}

struct Args {
    snapshot_path: PathBuf,
    fresh: bool,
    allow_retreat: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut snapshot_path = std::env::var("QUIZ_SNAPSHOT")
            .map_or_else(|_| PathBuf::from("quiz_snapshot.json"), PathBuf::from);
        let mut fresh = false;
        let mut allow_retreat = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--snapshot" => {
                    let value = args.next().ok_or(ArgsError::MissingValue {
                        flag: "--snapshot",
                    })?;
                    snapshot_path = PathBuf::from(value);
                }
                "--fresh" => fresh = true,
                "--no-retreat" => allow_retreat = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            snapshot_path,
            fresh,
            allow_retreat,
        })
    }
}

/// Apply a batch of signals to the terminal, tracking the
/// input-enabled handshake for the read loop.
fn render(signals: &[QuizSignal], input_enabled: &mut bool) {
    for signal in signals {
        match signal {
            QuizSignal::QuestionChanged {
                position,
                total,
                prompt,
            } => {
                println!();
                println!("[{position}/{total}] {prompt}");
            }
            QuizSignal::InputEnabled(enabled) => *input_enabled = *enabled,
            QuizSignal::Outcome(outcome) => println!("{}", outcome_message(outcome)),
            // The reveal hand-off is driven inline by the cheat flow.
            QuizSignal::RevealRequested { .. } => {}
        }
    }
}

/// The stand-in for the cheat screen: confirm, then show the answer.
/// Reports back whether the answer was actually shown.
fn run_reveal_flow(
    quiz: &mut QuizLoopService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let signals = quiz.apply(QuizIntent::RequestReveal)?;
    let Some(QuizSignal::RevealRequested { answer_is_true }) = signals.first() else {
        return Ok(());
    };

    print!("Are you sure you want to see the answer? [y/N] ");
    io::stdout().flush()?;

    let confirmed = match lines.next() {
        Some(line) => matches!(line?.trim(), "y" | "Y"),
        None => false,
    };

    let shown = if confirmed {
        println!("The answer is: {}", answer_is_true);
        true
    } else {
        false
    };
    quiz.apply(QuizIntent::RevealReturned(shown))?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let store = JsonFileSnapshotStore::new(&args.snapshot_path);
    if args.fresh {
        store.clear()?;
    }

    let mut quiz = QuizLoopService::start(
        QuestionBank::geography(),
        Clock::default_clock(),
        Arc::new(store),
    )?;

    println!("True/false quiz. 't' or 'f' to answer, 'q' to save and quit, 'h' for help.");

    let mut input_enabled = true;
    render(&quiz.opening_signals()?, &mut input_enabled);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(line) = lines.next() {
        let line = line?;
        match line.trim() {
            "t" | "f" if input_enabled => {
                let answer = line.trim() == "t";
                render(&quiz.apply(QuizIntent::SubmitAnswer(answer))?, &mut input_enabled);
            }
            "t" | "f" => {
                println!("Already answered; 'n' moves to the next question.");
            }
            "n" => render(&quiz.apply(QuizIntent::Advance)?, &mut input_enabled),
            "p" if args.allow_retreat => {
                render(&quiz.apply(QuizIntent::Retreat)?, &mut input_enabled);
            }
            "p" => println!("Going back is disabled ('--no-retreat')."),
            "c" => run_reveal_flow(&mut quiz, &mut lines)?,
            "s" => {
                let progress = quiz.progress();
                println!(
                    "question {}/{}, this pass: {} correct, {} incorrect",
                    progress.position, progress.total, progress.correct, progress.incorrect
                );
            }
            "h" | "?" => print_usage(),
            "q" => break,
            "" => {}
            other => println!("unknown input: {other} ('h' for help)"),
        }
    }

    // Ctrl-D counts as being backgrounded, same as 'q'.
    quiz.suspend()?;
    log::debug!("snapshot saved to {}", args.snapshot_path.display());
    println!("Saved. Bye.");
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
