//! Binary trie dictionary ("FxOS DICT") engine.
//!
//! This crate decodes the compact dictionary format used for predictive
//! keypad input and provides a writer for it.
//!
//! # Architecture
//!
//! - [`format`] -- Header parsing and validation
//! - [`node`] -- Variable-length trie node records
//! - [`dictionary`] -- Owned dictionary handle and borrowed trie view
//! - [`builder`] -- Serializes a word list into the binary format

pub mod builder;
pub mod dictionary;
pub mod format;
pub mod node;

pub use builder::DictionaryBuilder;
pub use dictionary::{CharEntry, Dictionary, Trie};
pub use node::TrieNode;

/// Error type for dictionary parsing and trie traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictError {
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid dictionary file: bad magic number")]
    InvalidFormat,
    #[error("unsupported dictionary version {0}")]
    UnsupportedVersion(u32),
    #[error("followed a null trie pointer")]
    BrokenPointer,
    #[error("trie offset {offset} is out of bounds (trie region is {len} bytes)")]
    OutOfBounds { offset: u32, len: usize },
    #[error("sibling chain starting at offset {offset} does not terminate")]
    CyclicChain { offset: u32 },
}

impl DictError {
    /// Whether the error means the trie data itself is corrupt, as opposed
    /// to the file being rejected up front by header validation.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            DictError::BrokenPointer | DictError::OutOfBounds { .. } | DictError::CyclicChain { .. }
        )
    }
}

/// Error type for dictionary building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("dictionary has no words")]
    Empty,
    #[error("empty word")]
    EmptyWord,
    #[error("word of {len} characters exceeds the {max} character limit")]
    WordTooLong { len: usize, max: usize },
    #[error("character {0:?} cannot be stored in a dictionary node")]
    CharOutOfRange(char),
    #[error("trie data too large: {size} bytes exceeds 24-bit node pointers")]
    TooLarge { size: usize },
}
