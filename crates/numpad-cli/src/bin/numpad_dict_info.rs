// numpad-dict-info: Print dictionary metadata.
//
// Shows the header fields, the number of words stored in the trie, and the
// character frequency table.
//
// Usage:
//   numpad-dict-info [-d DICT_PATH]
//
// Options:
//   -d, --dict-path PATH   Dictionary file or directory containing en_us.dict
//   -h, --help             Print help

use std::io::{self, Write};

use numpad_dict::{DictError, Dictionary, Trie};

/// Count end-of-word markers reachable from the root chain.
fn count_words(trie: Trie<'_>) -> Result<usize, DictError> {
    let mut count = 0;
    let mut stack = vec![Trie::ROOT];
    let mut visited = 0usize;
    while let Some(offset) = stack.pop() {
        visited += 1;
        if visited > trie.len() {
            return Err(DictError::CyclicChain { offset });
        }
        for node in trie.siblings(offset) {
            let node = node?;
            match node.child {
                Some(child) => stack.push(child),
                None => count += 1,
            }
        }
    }
    Ok(count)
}

fn main() {
    numpad_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = numpad_cli::parse_dict_path(&args);

    if numpad_cli::wants_help(&args) {
        println!("numpad-dict-info: Print dictionary metadata.");
        println!();
        println!("Usage: numpad-dict-info [-d DICT_PATH]");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file or directory containing en_us.dict");
        println!("  -h, --help             Print this help");
        return;
    }

    let path =
        numpad_cli::find_dictionary(dict_path.as_deref()).unwrap_or_else(|e| numpad_cli::fatal(&e));
    let data = numpad_cli::read_dictionary(&path).unwrap_or_else(|e| numpad_cli::fatal(&e));
    let dictionary = Dictionary::from_vec(data)
        .unwrap_or_else(|e| numpad_cli::fatal(&format!("invalid dictionary {}: {e}", path.display())));
    let words = count_words(dictionary.tree())
        .unwrap_or_else(|e| numpad_cli::fatal(&format!("corrupt trie: {e}")));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let header = dictionary.header();
    let _ = writeln!(out, "file:            {}", path.display());
    let _ = writeln!(out, "size:            {} bytes", dictionary.as_bytes().len());
    let _ = writeln!(out, "max word length: {}", dictionary.max_word_length());
    let _ = writeln!(out, "tree offset:     {}", header.tree_offset());
    let _ = writeln!(out, "tree size:       {} bytes", dictionary.tree().len());
    let _ = writeln!(out, "words:           {words}");
    let _ = writeln!(out, "characters:      {}", header.entry_count);

    for entry in dictionary.char_table() {
        let shown = char::from_u32(entry.ch as u32)
            .filter(|c| !c.is_control())
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        let _ = writeln!(out, "  {shown}  U+{:04X}  {}", entry.ch, entry.count);
    }
}
