// numpad-build-dict: Build a binary dictionary from a word list.
//
// The word list has one entry per line: a word, optionally followed by a
// frequency. Frequencies are clamped to 1..=32; entries without one get 1.
// Blank lines and lines starting with '#' are skipped.
//
// Usage:
//   numpad-build-dict [-o OUT] [WORDLIST]
//
// Options:
//   -o, --output PATH   Output file (default en_us.dict)
//   -h, --help          Print help

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use numpad_dict::DictionaryBuilder;
use tracing::info;

fn main() {
    numpad_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (output, args) = numpad_cli::take_option(&args, "--output", Some("-o"))
        .unwrap_or_else(|e| numpad_cli::fatal(&e));

    if numpad_cli::wants_help(&args) {
        println!("numpad-build-dict: Build a binary dictionary from a word list.");
        println!();
        println!("Usage: numpad-build-dict [-o OUT] [WORDLIST]");
        println!();
        println!("Each line holds a word and an optional frequency (1-32).");
        println!("Reads the word list from stdin if WORDLIST is not given.");
        println!();
        println!("Options:");
        println!("  -o, --output PATH   Output file (default {})", numpad_cli::DICT_FILE);
        println!("  -h, --help          Print this help");
        return;
    }

    let output = output.unwrap_or_else(|| numpad_cli::DICT_FILE.to_string());

    let reader: Box<dyn BufRead> = match args.first() {
        Some(path) => {
            let file = File::open(path)
                .unwrap_or_else(|e| numpad_cli::fatal(&format!("failed to open {path}: {e}")));
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut builder = DictionaryBuilder::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.unwrap_or_else(|e| numpad_cli::fatal(&format!("read error: {e}")));
        let entry = numpad_cli::parse_word_line(&line)
            .unwrap_or_else(|e| numpad_cli::fatal(&format!("line {}: {e}", i + 1)));
        if let Some((word, frequency)) = entry {
            builder
                .insert(&word, frequency)
                .unwrap_or_else(|e| numpad_cli::fatal(&format!("line {}: {e}", i + 1)));
        }
    }

    let data = builder.build().unwrap_or_else(|e| numpad_cli::fatal(&e.to_string()));
    std::fs::write(&output, &data)
        .unwrap_or_else(|e| numpad_cli::fatal(&format!("failed to write {output}: {e}")));

    info!(words = builder.len(), size = data.len(), path = %output, "dictionary written");
    println!("{output}: {} words, {} bytes", builder.len(), data.len());
}
