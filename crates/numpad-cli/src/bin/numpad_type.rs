// numpad-type: Simulate typing on a numeric keypad.
//
// Each input line is a key stream. Keys are pressed a fixed interval apart
// and dispatched to the predictor first and to multitap when prediction
// declines. `_` is a pause longer than the multitap timeout. The dictionary
// is read on a background thread and takes over as soon as it arrives, so
// the first keys of a session may be typed by multitap alone.
//
// Usage:
//   numpad-type [-d DICT_PATH] [--timeout-ms MS] [--key-interval-ms MS] [KEYS...]
//
// Options:
//   -d, --dict-path PATH       Dictionary file or directory containing en_us.dict
//   --timeout-ms MS            Multitap timeout (default 1500)
//   --key-interval-ms MS       Time between key presses (default 300)
//   -h, --help                 Print help

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use numpad_predict::{KeypadInput, Multitap, MultitapOptions, Predictor};
use tracing::warn;

const DEFAULT_KEY_INTERVAL_MS: u64 = 300;

type Pending = Option<Receiver<Result<Vec<u8>, String>>>;

/// Install the dictionary if the loader thread has delivered it.
fn poll_dictionary(pending: &mut Pending, input: &mut KeypadInput) {
    let Some(rx) = pending else {
        return;
    };
    match rx.try_recv() {
        Ok(Ok(data)) => {
            if let Err(e) = input.load_dictionary(data) {
                warn!(error = %e, "dictionary not installed");
            }
            *pending = None;
        }
        Ok(Err(e)) => {
            warn!(error = %e, "dictionary not loaded");
            *pending = None;
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => *pending = None,
    }
}

fn main() {
    numpad_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = numpad_cli::parse_dict_path(&args);
    let (timeout, args) = numpad_cli::take_option(&args, "--timeout-ms", None)
        .unwrap_or_else(|e| numpad_cli::fatal(&e));
    let (interval, args) = numpad_cli::take_option(&args, "--key-interval-ms", None)
        .unwrap_or_else(|e| numpad_cli::fatal(&e));

    if numpad_cli::wants_help(&args) {
        println!("numpad-type: Simulate typing on a numeric keypad.");
        println!();
        println!("Usage: numpad-type [-d DICT_PATH] [--timeout-ms MS] [--key-interval-ms MS] [KEYS...]");
        println!();
        println!("If KEYS arguments are given, types each one.");
        println!("Otherwise reads key streams from stdin (one per line).");
        println!("Use '_' in a key stream for a pause longer than the multitap timeout.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Dictionary file or directory containing en_us.dict");
        println!("  --timeout-ms MS          Multitap timeout (default 1500)");
        println!("  --key-interval-ms MS     Time between key presses (default 300)");
        println!("  -h, --help               Print this help");
        return;
    }

    let mut options = MultitapOptions::default();
    if let Some(v) = timeout {
        let ms: u64 =
            numpad_cli::parse_number("--timeout-ms", &v).unwrap_or_else(|e| numpad_cli::fatal(&e));
        options.tap_timeout = Duration::from_millis(ms);
    }
    let interval = match interval {
        Some(v) => numpad_cli::parse_number("--key-interval-ms", &v)
            .unwrap_or_else(|e| numpad_cli::fatal(&e)),
        None => DEFAULT_KEY_INTERVAL_MS,
    };
    let interval = Duration::from_millis(interval);
    let pause = options.tap_timeout + interval;

    let mut input = KeypadInput::new(Predictor::default(), Multitap::new(options));
    let mut pending: Pending = match numpad_cli::find_dictionary(dict_path.as_deref()) {
        Ok(path) => Some(numpad_cli::spawn_load(path)),
        Err(e) => {
            warn!("{e}");
            warn!("typing with multitap only");
            None
        }
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    // Session clock; keeps running across lines so old cycles expire.
    let mut clock = Duration::ZERO;

    let mut type_line = |keys: &str, input: &mut KeypadInput, pending: &mut Pending| {
        let presses = numpad_cli::schedule_keys(keys, interval, pause);
        let mut text = String::new();
        for &(key, at) in &presses {
            poll_dictionary(pending, input);
            let cursor = text.chars().count();
            match input.handle_key(&text, cursor, key, clock + at) {
                Ok(Some(r)) => text = r.apply(&text),
                Ok(None) => warn!(%key, "key ignored"),
                Err(e) => numpad_cli::fatal(&format!("dictionary error: {e}")),
            }
        }
        clock += presses.last().map_or(Duration::ZERO, |&(_, at)| at) + pause;
        let _ = writeln!(out, "{text}");
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
            type_line(line.trim(), &mut input, &mut pending);
        }
    } else {
        for keys in &args {
            type_line(keys, &mut input, &mut pending);
        }
    }
}
