// numpad-predict: Ranked T9 candidates for digit strings.
//
// Reads digit strings from the arguments, or from stdin (one per line), and
// prints the candidates the predictor finds for each, best first.
//
// Usage:
//   numpad-predict [-d DICT_PATH] [-n N] [DIGITS...]
//
// Options:
//   -d, --dict-path PATH        Dictionary file or directory containing en_us.dict
//   -n, --max-candidates N      Print at most N candidates (default 10)
//   -h, --help                  Print help

use std::io::{self, BufRead, Write};

use numpad_predict::{Predictor, PredictorOptions};

const DEFAULT_MAX_CANDIDATES: usize = 10;

fn main() {
    numpad_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = numpad_cli::parse_dict_path(&args);
    let (max, args) = numpad_cli::take_option(&args, "--max-candidates", Some("-n"))
        .unwrap_or_else(|e| numpad_cli::fatal(&e));

    if numpad_cli::wants_help(&args) {
        println!("numpad-predict: Ranked T9 candidates for digit strings.");
        println!();
        println!("Usage: numpad-predict [-d DICT_PATH] [-n N] [DIGITS...]");
        println!();
        println!("If DIGITS arguments are given, predicts each one.");
        println!("Otherwise reads digit strings from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Dictionary file or directory containing en_us.dict");
        println!("  -n, --max-candidates N   Print at most N candidates (default 10)");
        println!("  -h, --help               Print this help");
        return;
    }

    let max = match max {
        Some(v) => numpad_cli::parse_number("--max-candidates", &v)
            .unwrap_or_else(|e| numpad_cli::fatal(&e)),
        None => DEFAULT_MAX_CANDIDATES,
    };

    let dictionary =
        numpad_cli::load_dictionary(dict_path.as_deref()).unwrap_or_else(|e| numpad_cli::fatal(&e));
    let predictor = Predictor::with_dictionary(dictionary, PredictorOptions::default());

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut predict = |digits: &str| {
        let keys: Vec<char> = digits.chars().collect();
        let words = predictor
            .find_words(&keys)
            .unwrap_or_else(|e| numpad_cli::fatal(&format!("{digits}: {e}")));
        if words.is_empty() {
            let _ = writeln!(out, "{digits}: (no candidates)");
        } else {
            let shown: Vec<&str> = words.iter().take(max).map(String::as_str).collect();
            let _ = writeln!(out, "{digits}: {}", shown.join(" "));
        }
    };

    if args.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let digits = line.trim();
            if digits.is_empty() {
                continue;
            }
            predict(digits);
        }
    } else {
        for digits in &args {
            predict(digits);
        }
    }
}
