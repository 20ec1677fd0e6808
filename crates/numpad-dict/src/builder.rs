// Dictionary writer: word list -> binary trie dictionary

use std::collections::BTreeMap;

use tracing::debug;

use crate::BuildError;
use crate::format::{self, DictHeader};
use crate::node::{self, MAX_FREQUENCY, MAX_POINTER};

/// Longest word the header can describe. Also bounds the recursion depth of
/// the chain writer.
pub const MAX_WORD_LENGTH: usize = u8::MAX as usize;

/// In-memory trie used while building.
#[derive(Debug, Default)]
struct BuildNode {
    children: BTreeMap<u16, BuildNode>,
    /// Frequency of the word ending here, if any.
    end_frequency: Option<u8>,
    /// Highest frequency of any word at or below this node.
    max_frequency: u8,
}

/// Collects words with frequencies and serializes them into the binary
/// dictionary format.
///
/// Each trie level becomes a sibling chain ordered by descending frequency,
/// so the most likely letters are found first. A lettered node carries the
/// highest frequency below it; a word ending at a level is recorded by an
/// end-of-word marker at the end of that level's chain.
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    root: BuildNode,
    char_counts: BTreeMap<u16, u32>,
    word_count: usize,
    max_word_length: usize,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word. The frequency is clamped to `1..=32`; inserting a word
    /// again keeps the higher frequency.
    pub fn insert(&mut self, word: &str, frequency: u32) -> Result<(), BuildError> {
        if word.is_empty() {
            return Err(BuildError::EmptyWord);
        }
        let units = word
            .chars()
            .map(|c| match c as u32 {
                cp @ 1..=0xFFFF => Ok(cp as u16),
                _ => Err(BuildError::CharOutOfRange(c)),
            })
            .collect::<Result<Vec<u16>, _>>()?;
        if units.len() > MAX_WORD_LENGTH {
            return Err(BuildError::WordTooLong {
                len: units.len(),
                max: MAX_WORD_LENGTH,
            });
        }

        let frequency = frequency.clamp(1, MAX_FREQUENCY as u32) as u8;

        let mut current = &mut self.root;
        for &unit in &units {
            current = current.children.entry(unit).or_default();
            current.max_frequency = current.max_frequency.max(frequency);
        }
        if current.end_frequency.is_none() {
            self.word_count += 1;
            for &unit in &units {
                *self.char_counts.entry(unit).or_insert(0) += 1;
            }
        }
        current.end_frequency = Some(current.end_frequency.map_or(frequency, |f| f.max(frequency)));
        self.max_word_length = self.max_word_length.max(units.len());
        Ok(())
    }

    /// Number of distinct words inserted.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Serialize the dictionary.
    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        if self.root.children.is_empty() {
            return Err(BuildError::Empty);
        }

        let mut tree = Vec::new();
        write_chain(&self.root, &mut tree)?;

        let mut table: Vec<(u16, u32)> = self.char_counts.iter().map(|(&c, &n)| (c, n)).collect();
        table.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let header = DictHeader {
            raw_max_word_length: self.max_word_length.min(u8::MAX as usize) as u8,
            entry_count: table.len() as u16,
        };

        let mut out = Vec::with_capacity(header.tree_offset() + tree.len());
        format::write_header(&mut out, &header);
        for (ch, count) in table {
            out.extend_from_slice(&ch.to_be_bytes());
            out.extend_from_slice(&count.to_be_bytes());
        }
        out.extend_from_slice(&tree);

        debug!(
            words = self.word_count,
            tree_size = tree.len(),
            total_size = out.len(),
            "built dictionary"
        );
        Ok(out)
    }
}

/// Write the sibling chain for the children of `parent`, each lettered node
/// immediately followed by its own child chain.
fn write_chain(parent: &BuildNode, out: &mut Vec<u8>) -> Result<(), BuildError> {
    let mut letters: Vec<(&u16, &BuildNode)> = parent.children.iter().collect();
    letters.sort_by(|a, b| b.1.max_frequency.cmp(&a.1.max_frequency).then(a.0.cmp(b.0)));

    let total = letters.len() + usize::from(parent.end_frequency.is_some());

    for (i, (&ch, child)) in letters.into_iter().enumerate() {
        let has_next = i + 1 < total;
        let slot = node::write_node(out, ch, child.max_frequency, has_next);
        write_chain(child, out)?;
        if let Some(at) = slot {
            let next = out.len();
            if next > MAX_POINTER as usize {
                return Err(BuildError::TooLarge { size: next });
            }
            node::patch_pointer(out, at, next as u32);
        }
    }

    if let Some(frequency) = parent.end_frequency {
        node::write_node(out, 0, frequency, false);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Dictionary, Trie};

    fn build(words: &[(&str, u32)]) -> Dictionary {
        let mut builder = DictionaryBuilder::new();
        for &(word, freq) in words {
            builder.insert(word, freq).unwrap();
        }
        Dictionary::from_vec(builder.build().unwrap()).unwrap()
    }

    fn chain_letters(trie: &Trie<'_>, offset: u32) -> Vec<(Option<char>, u8)> {
        trie.siblings(offset)
            .map(|n| {
                let n = n.unwrap();
                (n.letter(), n.frequency)
            })
            .collect()
    }

    #[test]
    fn empty_builder_fails() {
        assert_eq!(DictionaryBuilder::new().build().unwrap_err(), BuildError::Empty);
    }

    #[test]
    fn reject_bad_words() {
        let mut builder = DictionaryBuilder::new();
        assert_eq!(builder.insert("", 1).unwrap_err(), BuildError::EmptyWord);
        assert_eq!(
            builder.insert("a\u{1F600}", 1).unwrap_err(),
            BuildError::CharOutOfRange('\u{1F600}')
        );
        assert_eq!(
            builder.insert("a\0b", 1).unwrap_err(),
            BuildError::CharOutOfRange('\0')
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn single_word_layout() {
        let dict = build(&[("hi", 4)]);
        let tree = dict.tree();
        assert_eq!(chain_letters(&tree, Trie::ROOT), vec![(Some('h'), 4)]);
        let h = tree.follow(Some(Trie::ROOT)).unwrap();
        assert_eq!(chain_letters(&tree, h.child.unwrap()), vec![(Some('i'), 4)]);
        let i = tree.follow(h.child).unwrap();
        assert_eq!(chain_letters(&tree, i.child.unwrap()), vec![(None, 4)]);
        assert_eq!(dict.max_word_length(), 3);
    }

    #[test]
    fn siblings_ordered_by_frequency() {
        let dict = build(&[("a", 2), ("b", 9), ("c", 9), ("d", 1)]);
        let letters = chain_letters(&dict.tree(), Trie::ROOT);
        assert_eq!(
            letters,
            vec![(Some('b'), 9), (Some('c'), 9), (Some('a'), 2), (Some('d'), 1)]
        );
    }

    #[test]
    fn prefix_word_marker_ends_chain() {
        let dict = build(&[("to", 3), ("top", 7)]);
        let tree = dict.tree();
        let t = tree.follow(Some(Trie::ROOT)).unwrap();
        assert_eq!(t.frequency, 7);
        let o = tree.follow(t.child).unwrap();
        assert_eq!(chain_letters(&tree, o.child.unwrap()), vec![(Some('p'), 7), (None, 3)]);
    }

    #[test]
    fn reinsert_keeps_highest_frequency() {
        let mut builder = DictionaryBuilder::new();
        builder.insert("go", 3).unwrap();
        builder.insert("go", 10).unwrap();
        builder.insert("go", 5).unwrap();
        assert_eq!(builder.len(), 1);
        let dict = Dictionary::from_vec(builder.build().unwrap()).unwrap();
        let tree = dict.tree();
        let g = tree.follow(Some(Trie::ROOT)).unwrap();
        let o = tree.follow(g.child).unwrap();
        assert_eq!(tree.follow(o.child).unwrap().frequency, 10);
    }

    #[test]
    fn frequency_is_clamped() {
        let dict = build(&[("x", 0), ("y", 1000)]);
        let letters = chain_letters(&dict.tree(), Trie::ROOT);
        assert_eq!(letters, vec![(Some('y'), 32), (Some('x'), 1)]);
    }

    #[test]
    fn big_chars_round_trip() {
        let dict = build(&[("\u{0434}\u{0430}", 6)]);
        let tree = dict.tree();
        let d = tree.follow(Some(Trie::ROOT)).unwrap();
        assert_eq!(d.letter(), Some('\u{0434}'));
        assert_eq!(tree.follow(d.child).unwrap().letter(), Some('\u{0430}'));
    }

    #[test]
    fn char_table_counts_occurrences() {
        let dict = build(&[("aab", 1), ("ba", 1)]);
        let table: Vec<(u16, u32)> = dict.char_table().map(|e| (e.ch, e.count)).collect();
        assert_eq!(table, vec![('a' as u16, 3), ('b' as u16, 2)]);
        assert_eq!(dict.header().entry_count, 2);
    }

    #[test]
    fn longest_word_fills_header_length() {
        let word: String = std::iter::repeat_n('a', MAX_WORD_LENGTH).collect();
        let dict = build(&[(word.as_str(), 1)]);
        assert_eq!(dict.header().raw_max_word_length, 255);
        assert_eq!(dict.max_word_length(), 256);
    }

    #[test]
    fn overlong_word_is_rejected() {
        let word: String = std::iter::repeat_n('a', 100_000).collect();
        let mut builder = DictionaryBuilder::new();
        assert_eq!(
            builder.insert(&word, 1),
            Err(BuildError::WordTooLong {
                len: 100_000,
                max: MAX_WORD_LENGTH
            })
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn every_chain_terminates() {
        let dict = build(&[("car", 5), ("cat", 4), ("cart", 2), ("dog", 3), ("do", 8)]);
        let tree = dict.tree();
        let mut stack = vec![Trie::ROOT];
        let mut markers = 0;
        while let Some(offset) = stack.pop() {
            for node in tree.siblings(offset) {
                let node = node.unwrap();
                match node.child {
                    Some(child) => stack.push(child),
                    None => markers += 1,
                }
            }
        }
        assert_eq!(markers, 5);
    }
}
