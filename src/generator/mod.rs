//! Cascade generation
//!
//! `pool` narrows a dictionary down to a difficulty tier, `search` finds a
//! chain of words in that pool that satisfies the cascade pattern.

pub mod pool;
pub mod search;

pub use pool::{Difficulty, MIN_POOL_SIZE, PoolError, WordPool, select_pool};
pub use search::{CascadeSearch, SearchConfig};
