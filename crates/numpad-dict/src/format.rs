// Dictionary binary format: header parsing and validation
//
// All multi-byte fields are big-endian.
//
// | offset | size | field                                   |
// |--------|------|-----------------------------------------|
// | 0      | 4    | magic "FxOS"                            |
// | 4      | 4    | magic "DICT"                            |
// | 8      | 4    | format version (1)                      |
// | 12     | 1    | longest word length minus one           |
// | 13     | 2    | character table entry count N           |
// | 15     | 6*N  | character table (u16 char, u32 count)   |
// | 15+6N  | ...  | trie node stream                        |

use crate::DictError;

/// First magic word, "FxOS".
pub const MAGIC1: u32 = 0x4678_4F53;
/// Second magic word, "DICT".
pub const MAGIC2: u32 = 0x4449_4354;
/// The only supported format version.
pub const VERSION: u32 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 15;
/// Size of one character table entry in bytes.
pub const CHAR_ENTRY_SIZE: usize = 6;

/// Parsed dictionary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictHeader {
    /// Longest word length as stored in the file.
    pub raw_max_word_length: u8,
    /// Number of entries in the character table.
    pub entry_count: u16,
}

impl DictHeader {
    /// Longest word length plus one. Predictions may delete characters, so
    /// the user can type one character past the longest word.
    pub fn max_word_length(&self) -> usize {
        self.raw_max_word_length as usize + 1
    }

    /// Byte offset of the trie node stream within the file.
    pub fn tree_offset(&self) -> usize {
        HEADER_SIZE + self.entry_count as usize * CHAR_ENTRY_SIZE
    }
}

#[inline]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

#[inline]
pub(crate) fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

/// Parses and validates the 15-byte dictionary header.
///
/// The magic words are checked before the version, and nothing past the
/// header is read. The caller checks that the character table fits.
pub fn parse_header(data: &[u8]) -> Result<DictHeader, DictError> {
    if data.len() < HEADER_SIZE {
        return Err(DictError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    if read_u32(data, 0) != MAGIC1 || read_u32(data, 4) != MAGIC2 {
        return Err(DictError::InvalidFormat);
    }

    let version = read_u32(data, 8);
    if version != VERSION {
        return Err(DictError::UnsupportedVersion(version));
    }

    Ok(DictHeader {
        raw_max_word_length: data[12],
        entry_count: read_u16(data, 13),
    })
}

/// Serializes a header. Inverse of [`parse_header`].
pub fn write_header(out: &mut Vec<u8>, header: &DictHeader) {
    out.extend_from_slice(&MAGIC1.to_be_bytes());
    out.extend_from_slice(&MAGIC2.to_be_bytes());
    out.extend_from_slice(&VERSION.to_be_bytes());
    out.push(header.raw_max_word_length);
    out.extend_from_slice(&header.entry_count.to_be_bytes());
}
