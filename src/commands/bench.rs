//! Bench command
//!
//! Runs many independent searches in parallel to measure how reliably and how
//! quickly a difficulty tier yields puzzles.

use crate::dictionary::{Dictionary, FrequencyIndex};
use crate::generator::{CascadeSearch, Difficulty, PoolError, select_pool};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Result of a bench run
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub difficulty: Difficulty,
    pub pool_size: usize,
    pub searches: usize,
    pub found: usize,
    pub duration: Duration,
    pub fastest: Duration,
    pub slowest: Duration,
    pub average: Duration,
    pub searches_per_second: f64,
}

impl BenchResult {
    /// Fraction of searches that found a cascade
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.found as f64 / self.searches as f64
        }
    }
}

/// Bench request
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    pub difficulty: Difficulty,
    pub count: usize,
    /// Search `i` is seeded with `seed + i`
    pub seed: u64,
    pub show_progress: bool,
}

/// Run `count` seeded searches in parallel
///
/// # Errors
/// Returns `PoolError` if the difficulty tier has too few words.
pub fn run_bench(
    config: BenchConfig,
    dictionary: &Dictionary,
    frequency: &FrequencyIndex,
) -> Result<BenchResult, PoolError> {
    let pool = select_pool(dictionary, frequency, config.difficulty)?;

    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.count as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb.set_message(format!("{} searches", config.difficulty));
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let runs: Vec<(bool, Duration)> = (0..config.count)
        .into_par_iter()
        .map(|i| {
            let rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let run_start = Instant::now();
            let found = CascadeSearch::new(&pool, dictionary, rng)
                .find_chain()
                .is_some();
            pb.inc(1);
            (found, run_start.elapsed())
        })
        .collect();
    let duration = start.elapsed();
    pb.finish_and_clear();

    let found = runs.iter().filter(|(found, _)| *found).count();
    let times = runs.iter().map(|&(_, time)| time);
    let total: Duration = times.clone().sum();

    Ok(BenchResult {
        difficulty: config.difficulty,
        pool_size: pool.len(),
        searches: config.count,
        found,
        duration,
        fastest: times.clone().min().unwrap_or_default(),
        slowest: times.max().unwrap_or_default(),
        average: total
            .checked_div(u32::try_from(config.count).unwrap_or(u32::MAX))
            .unwrap_or_default(),
        searches_per_second: config.count as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
