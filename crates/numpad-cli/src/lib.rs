// numpad-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use numpad_dict::Dictionary;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Dictionary file name looked up inside search directories.
pub const DICT_FILE: &str = "en_us.dict";

/// Environment variable naming a dictionary file or its directory.
pub const DICT_PATH_ENV: &str = "NUMPAD_DICT_PATH";

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ---------------------------------------------------------------------------
// Dictionary lookup
// ---------------------------------------------------------------------------

/// Locate the dictionary file.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `NUMPAD_DICT_PATH` environment variable
/// 3. `~/.numpad/en_us.dict`
/// 4. `/usr/share/numpad/en_us.dict`
/// 5. Current working directory
///
/// Each entry may name the file itself or a directory containing it.
pub fn find_dictionary(dict_path: Option<&str>) -> Result<PathBuf, String> {
    let env_path = std::env::var(DICT_PATH_ENV).ok();
    let home = std::env::var("HOME").ok().map(PathBuf::from);
    let search_paths = build_search_paths(dict_path, env_path.as_deref(), home.as_deref());

    for candidate in &search_paths {
        if let Some(path) = resolve(candidate) {
            debug!(path = %path.display(), "found dictionary");
            return Ok(path);
        }
    }

    Err(format!(
        "could not find {} in any of the search paths:\n{}",
        DICT_FILE,
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of files and directories to search.
fn build_search_paths(
    dict_path: Option<&str>,
    env_path: Option<&str>,
    home: Option<&Path>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }
    if let Some(p) = env_path {
        paths.push(PathBuf::from(p));
    }
    if let Some(home) = home {
        paths.push(home.join(".numpad").join(DICT_FILE));
    }
    paths.push(PathBuf::from("/usr/share/numpad").join(DICT_FILE));
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// A file is taken as is; a directory is searched for `DICT_FILE`.
fn resolve(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    let inner = candidate.join(DICT_FILE);
    inner.is_file().then_some(inner)
}

/// Read the raw dictionary bytes from `path`.
pub fn read_dictionary(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))
}

/// Find, read and parse the dictionary.
pub fn load_dictionary(dict_path: Option<&str>) -> Result<Dictionary, String> {
    let path = find_dictionary(dict_path)?;
    let data = read_dictionary(&path)?;
    Dictionary::from_vec(data).map_err(|e| format!("invalid dictionary {}: {e}", path.display()))
}

/// Read the dictionary on a background thread.
///
/// The receiver yields exactly one message once the file has been read.
pub fn spawn_load(path: PathBuf) -> Receiver<Result<Vec<u8>, String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = read_dictionary(&path);
        if let Ok(data) = &result {
            info!(path = %path.display(), size = data.len(), "dictionary read");
        }
        // The receiver may already be gone if the tool finished first.
        let _ = tx.send(result);
    });
    rx
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

/// Remove a `--long=VALUE`, `--long VALUE` or `-s VALUE` option from `args`.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn take_option(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Option<String>, Vec<String>), String> {
    let mut value = None;
    let mut remaining = Vec::new();
    let prefix = format!("{long}=");
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || Some(arg.as_str()) == short {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`. Exits on a missing value.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    take_option(args, "--dict-path", Some("-d")).unwrap_or_else(|e| fatal(&e))
}

/// Parse a numeric option value.
pub fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {name}: {value}"))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

// ---------------------------------------------------------------------------
// Input formats
// ---------------------------------------------------------------------------

/// Frequency given to word list entries without one.
pub const DEFAULT_FREQUENCY: u32 = 1;

/// Parse a word list line: `word [frequency]`.
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_word_line(line: &str) -> Result<Option<(String, u32)>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut fields = line.split_whitespace();
    let Some(word) = fields.next() else {
        return Ok(None);
    };
    let frequency = match fields.next() {
        Some(f) => parse_number("frequency", f)?,
        None => DEFAULT_FREQUENCY,
    };
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field after frequency: {extra}"));
    }
    Ok(Some((word.to_string(), frequency)))
}

/// Key that stands for a pause longer than the multitap timeout.
pub const PAUSE: char = '_';

/// Assign press times to a key stream.
///
/// Keys are `interval` apart; each `_` adds `pause` before the next key
/// instead of producing a press. Whitespace is ignored.
pub fn schedule_keys(keys: &str, interval: Duration, pause: Duration) -> Vec<(char, Duration)> {
    let mut now = Duration::ZERO;
    let mut presses = Vec::new();
    for key in keys.chars().filter(|c| !c.is_whitespace()) {
        if key == PAUSE {
            now += pause;
            continue;
        }
        presses.push((key, now));
        now += interval;
    }
    presses
}
