//! Cascade - CLI
//!
//! Play the daily word-chain puzzle in the terminal, or generate and benchmark
//! new puzzles.

use anyhow::{Context, Result};
use cascade::{
    commands::{BenchConfig, GenerateConfig, run_bench, run_generate},
    config::Settings,
    game::{
        Clock, GameEngine, GameSession, HintAllocator, SessionRecord, StreakTracker, SystemClock,
        session_key,
    },
    generator::Difficulty,
    interactive::{App, run_tui},
    output::{print_bench_result, print_generated, print_streak, print_today},
    storage::load_record,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file used while the TUI owns the terminal
const LOG_FILE: &str = "cascade.log";

#[derive(Parser)]
#[command(
    name = "cascade",
    about = "Daily word-chain puzzle: each answer starts with the letters of the one before",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for saved games, the streak and the log
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Puzzle book JSON file (default: bundled puzzles)
    #[arg(long, global = true)]
    puzzles: Option<PathBuf>,

    /// Clue dictionary file (default: bundled dictionary)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Frequency list file (default: bundled list)
    #[arg(long, global = true)]
    frequency: Option<PathBuf>,

    /// Seed for reproducible generation and hints
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play today's puzzle in the terminal (default)
    Play,

    /// Generate a new puzzle and print it as puzzle-book JSON
    Generate {
        /// easy, medium or hard
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,
    },

    /// Measure how reliably a difficulty yields puzzles
    Bench {
        /// Number of searches to run
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// easy, medium or hard
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,
    },

    /// Show today's puzzle and your progress on it
    Today,

    /// Show your current and best streak
    Streak,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(
        cli.data_dir,
        cli.puzzles,
        cli.dictionary,
        cli.frequency,
        cli.seed,
    );

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let log_file = matches!(command, Commands::Play).then(|| settings.data_dir.join(LOG_FILE));
    init_logging(log_file)?;

    match command {
        Commands::Play => run_play_command(&settings),
        Commands::Generate { difficulty } => run_generate_command(&settings, difficulty),
        Commands::Bench { count, difficulty } => run_bench_command(&settings, count, difficulty),
        Commands::Today => run_today_command(&settings),
        Commands::Streak => {
            let tracker = StreakTracker::load(settings.store());
            print_streak(tracker.record());
            Ok(())
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default `warn`
fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }
    Ok(())
}

fn run_play_command(settings: &Settings) -> Result<()> {
    let book = settings.puzzle_book().context("loading puzzle book")?;
    let today = Local::now().date_naive();
    let puzzle = book.active(today).clone();

    let store = settings.store();
    let engine = GameEngine::new(puzzle, store.clone(), SystemClock);
    let streak = StreakTracker::load(store);
    let hints = HintAllocator::new(settings.rng());

    run_tui(App::new(engine, streak, hints))
}

fn run_generate_command(settings: &Settings, difficulty: Difficulty) -> Result<()> {
    let dictionary = settings.dictionary().context("loading dictionary")?;
    let frequency = settings.frequency().context("loading frequency list")?;
    let book = settings.puzzle_book().context("loading puzzle book")?;

    let config = GenerateConfig {
        difficulty,
        date: Local::now().date_naive(),
    };
    let puzzle = run_generate(config, &dictionary, &frequency, &book, settings.rng())?;
    let json = serde_json::to_string_pretty(&puzzle).context("serializing puzzle")?;

    print_generated(&puzzle, &json);
    Ok(())
}

fn run_bench_command(settings: &Settings, count: usize, difficulty: Difficulty) -> Result<()> {
    let dictionary = settings.dictionary().context("loading dictionary")?;
    let frequency = settings.frequency().context("loading frequency list")?;

    println!("Running {count} {difficulty} searches...");
    let config = BenchConfig {
        difficulty,
        count,
        seed: settings.seed.unwrap_or_else(rand::random),
        show_progress: true,
    };
    let result = run_bench(config, &dictionary, &frequency)?;

    print_bench_result(&result);
    Ok(())
}

fn run_today_command(settings: &Settings) -> Result<()> {
    let book = settings.puzzle_book().context("loading puzzle book")?;
    let today = Local::now().date_naive();
    let puzzle = book.active(today);

    let store = settings.store();
    let now = SystemClock.now_ms();
    let session = load_record::<SessionRecord>(&store, &session_key(puzzle.id()))
        .and_then(|record| GameSession::from_record(&record, puzzle, now).ok());

    print_today(puzzle, today, session.as_ref());
    Ok(())
}
