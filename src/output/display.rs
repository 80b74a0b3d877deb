//! Display functions for command results

use super::formatters::create_progress_bar;
use crate::commands::BenchResult;
use crate::core::Puzzle;
use crate::game::{GameSession, GameStatus, StreakRecord};
use chrono::NaiveDate;
use colored::Colorize;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn print_clues(puzzle: &Puzzle, show_answers: bool) {
    for (i, word) in puzzle.words().iter().enumerate() {
        let answer = if show_answers {
            word.answer().bright_yellow().bold().to_string()
        } else {
            "_".repeat(word.length()).bright_black().to_string()
        };
        println!(
            "   {}. {:<12} {} {}",
            i + 1,
            answer,
            format!("({})", word.length()).bright_black(),
            word.clue()
        );
    }
}

/// Print a freshly generated puzzle, then its JSON for the puzzle book
pub fn print_generated(puzzle: &Puzzle, json: &str) {
    header("GENERATED PUZZLE");
    println!(
        "\n🧩 Puzzle #{} for {}",
        puzzle.id().to_string().bright_yellow(),
        puzzle.date()
    );
    println!();
    print_clues(puzzle, true);

    println!("\n📋 {}", "Append to the puzzle book:".bright_cyan().bold());
    println!("{json}");
}

/// Print the active puzzle and how far the saved session got
pub fn print_today(puzzle: &Puzzle, today: NaiveDate, session: Option<&GameSession>) {
    header("TODAY'S CASCADE");

    if puzzle.date() == today {
        println!("\n📅 Puzzle #{} ({})", puzzle.id(), puzzle.date());
    } else {
        println!(
            "\n📅 Puzzle #{} ({}) {}",
            puzzle.id(),
            puzzle.date(),
            format!("- no puzzle scheduled for {today}, showing the first").yellow()
        );
    }
    println!();
    print_clues(puzzle, false);

    let status = match session.map(GameSession::status) {
        None => "not started".bright_black(),
        Some(GameStatus::InProgress) => "in progress".yellow(),
        Some(GameStatus::Solved) => "solved".green().bold(),
        Some(GameStatus::GivenUp) => "given up".red(),
    };
    println!("\n   Status: {status}");
}

/// Print the result of a bench run
pub fn print_bench_result(result: &BenchResult) {
    header("GENERATOR BENCHMARK");

    let rate = result.success_rate() * 100.0;
    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Difficulty:       {}", result.difficulty);
    println!("   Pool size:        {}", result.pool_size);
    println!(
        "   Found:            {}/{} [{}] {}",
        result.found,
        result.searches,
        create_progress_bar(rate, 100.0, 20).green(),
        format!("{rate:.1}%").bright_yellow().bold()
    );
    println!(
        "   Fastest search:   {}",
        format!("{:.2}ms", result.fastest.as_secs_f64() * 1_000.0).green()
    );
    println!(
        "   Slowest search:   {}",
        format!("{:.2}ms", result.slowest.as_secs_f64() * 1_000.0).yellow()
    );
    println!(
        "   Average search:   {:.2}ms",
        result.average.as_secs_f64() * 1_000.0
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Searches/second:  {:.1}", result.searches_per_second);
}

/// Print the streak record
pub fn print_streak(record: &StreakRecord) {
    header("STREAK");
    println!(
        "\n   🔥 Current streak: {}",
        record.current_streak.to_string().bright_yellow().bold()
    );
    println!(
        "   🏆 Best streak:    {}",
        record.max_streak.to_string().green().bold()
    );
    if !record.last_game_id.is_empty() {
        println!("   Last puzzle:       #{}", record.last_game_id);
    }
}
