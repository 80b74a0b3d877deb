//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_bench_result, print_generated, print_streak, print_today};
pub use formatters::{format_time, share_text};
