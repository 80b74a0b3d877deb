//! Full-screen terminal player

mod app;
mod rendering;

pub use app::{App, AppMode, Message, MessageStyle, run_tui};
