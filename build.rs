//! Build script to generate the embedded dictionary
//!
//! Reads the clue dictionary and the frequency ranking and generates Rust
//! source code with const arrays.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_dictionary(
        "data/dictionary.tsv",
        &Path::new(&out_dir).join("dictionary.rs"),
    );

    generate_frequency(
        "data/frequency.txt",
        &Path::new(&out_dir).join("frequency.rs"),
    );

    // Rebuild if word lists change
    println!("cargo:rerun-if-changed=data/dictionary.tsv");
    println!("cargo:rerun-if-changed=data/frequency.txt");
}

fn generate_dictionary(input_path: &str, output_path: &Path) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let entries: Vec<(&str, &str)> = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('\t'))
        .map(|(word, clue)| (word.trim(), clue.trim()))
        .collect();
    let count = entries.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated clue dictionary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Built-in `(word, clue)` pairs ({count} entries)").unwrap();
    writeln!(output, "pub const DICTIONARY: &[(&str, &str)] = &[").unwrap();
    for (word, clue) in entries {
        writeln!(output, "    ({word:?}, {clue:?}),").unwrap();
    }
    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of entries in DICTIONARY").unwrap();
    writeln!(output, "pub const DICTIONARY_COUNT: usize = {count};").unwrap();
}

fn generate_frequency(input_path: &str, output_path: &Path) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    let count = words.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated frequency ranking").unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "/// Words ordered from most to least frequent; the index is the rank"
    )
    .unwrap();
    writeln!(output, "pub const FREQUENCY: &[&str] = &[").unwrap();
    for word in words {
        writeln!(output, "    {word:?},").unwrap();
    }
    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of words in FREQUENCY").unwrap();
    writeln!(output, "pub const FREQUENCY_COUNT: usize = {count};").unwrap();
}
