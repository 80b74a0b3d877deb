//! Embedded dictionary
//!
//! Clue dictionary and frequency ranking compiled into the binary at build time.

// Include generated tables from build script
include!(concat!(env!("OUT_DIR"), "/dictionary.rs"));
include!(concat!(env!("OUT_DIR"), "/frequency.rs"));
