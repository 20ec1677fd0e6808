// Dictionary handle: owns the blob, exposes the trie region and the character table

use tracing::info;

use crate::DictError;
use crate::format::{self, CHAR_ENTRY_SIZE, DictHeader, HEADER_SIZE};
use crate::node::{self, TrieNode};

/// A parsed dictionary.
///
/// Owns the raw file data. Trie nodes are decoded on demand through
/// [`Dictionary::tree`]; nothing in the blob is ever modified.
pub struct Dictionary {
    data: Vec<u8>,
    header: DictHeader,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("size", &self.data.len())
            .field("max_word_length", &self.header.max_word_length())
            .field("entry_count", &self.header.entry_count)
            .field("tree_size", &self.tree().len())
            .finish()
    }
}

impl Dictionary {
    /// Parse a dictionary, taking ownership of the file data.
    pub fn from_vec(data: Vec<u8>) -> Result<Self, DictError> {
        let header = format::parse_header(&data)?;

        // The trie region must hold at least the root node.
        let tree_offset = header.tree_offset();
        if tree_offset >= data.len() {
            return Err(DictError::TooShort {
                expected: tree_offset + 1,
                actual: data.len(),
            });
        }

        info!(
            size = data.len(),
            max_word_length = header.max_word_length(),
            entries = header.entry_count,
            "parsed dictionary"
        );

        Ok(Self { data, header })
    }

    /// Parse a dictionary from borrowed data. The data is copied.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        Self::from_vec(data.to_vec())
    }

    pub fn header(&self) -> &DictHeader {
        &self.header
    }

    /// Longest word length plus one.
    pub fn max_word_length(&self) -> usize {
        self.header.max_word_length()
    }

    /// The trie node stream.
    pub fn tree(&self) -> Trie<'_> {
        Trie::new(&self.data[self.header.tree_offset()..])
    }

    /// Entries of the character frequency table.
    pub fn char_table(&self) -> impl Iterator<Item = CharEntry> + '_ {
        self.data[HEADER_SIZE..self.header.tree_offset()]
            .chunks_exact(CHAR_ENTRY_SIZE)
            .map(|entry| CharEntry {
                ch: format::read_u16(entry, 0),
                count: format::read_u32(entry, 2),
            })
    }

    /// The raw file data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// One entry of the character frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEntry {
    /// UTF-16 code unit.
    pub ch: u16,
    /// Number of occurrences in the source word list.
    pub count: u32,
}

/// Borrowed view of the trie node stream. Offsets are relative to its start.
#[derive(Debug, Clone, Copy)]
pub struct Trie<'a> {
    data: &'a [u8],
}

impl<'a> Trie<'a> {
    /// Offset of the root sibling chain.
    pub const ROOT: u32 = 0;

    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the node at `offset`, returning it with the offset past its record.
    pub fn read_node(&self, offset: u32) -> Result<(TrieNode, u32), DictError> {
        node::read_node(self.data, offset)
    }

    /// Decode the node a stored pointer refers to. A `None` pointer is
    /// never valid to follow.
    pub fn follow(&self, pointer: Option<u32>) -> Result<TrieNode, DictError> {
        let offset = pointer.ok_or(DictError::BrokenPointer)?;
        Ok(self.read_node(offset)?.0)
    }

    /// Iterate the sibling chain starting at `offset`.
    pub fn siblings(&self, offset: u32) -> Siblings<'a> {
        Siblings {
            trie: *self,
            start: offset,
            pointer: Some(offset),
            remaining: self.data.len().max(1),
        }
    }
}

/// Iterator over a sibling chain, following `next` pointers until none.
///
/// Yields an error and stops when a node cannot be decoded. Every node takes
/// at least one byte, so a chain with more nodes than the trie has bytes
/// must loop; that is reported as [`DictError::CyclicChain`].
pub struct Siblings<'a> {
    trie: Trie<'a>,
    start: u32,
    pointer: Option<u32>,
    remaining: usize,
}

impl Iterator for Siblings<'_> {
    type Item = Result<TrieNode, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.pointer?;
        if self.remaining == 0 {
            self.pointer = None;
            return Some(Err(DictError::CyclicChain { offset: self.start }));
        }
        self.remaining -= 1;
        match self.trie.read_node(offset) {
            Ok((node, _)) => {
                self.pointer = node.next;
                Some(Ok(node))
            }
            Err(e) => {
                self.pointer = None;
                Some(Err(e))
            }
        }
    }
}
