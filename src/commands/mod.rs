//! Command implementations

pub mod bench;
pub mod generate;

pub use bench::{BenchConfig, BenchResult, run_bench};
pub use generate::{GenerateConfig, GenerateError, run_generate};
