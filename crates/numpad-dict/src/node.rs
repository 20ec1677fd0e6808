// Trie node records: decoding and encoding of one variable-length node
//
// A record starts with a control byte, most significant bit first:
//
//   bit 7     has_char  -- a character follows (otherwise: end-of-word marker)
//   bit 6     big_char  -- the character takes two bytes instead of one
//   bit 5     has_next  -- a 24-bit sibling pointer follows the character
//   bits 4-0  frequency - 1
//
// The child chain of a lettered node starts right after its record, so it
// is never stored as a pointer.

use crate::DictError;

pub const HAS_CHAR: u8 = 0x80;
pub const BIG_CHAR: u8 = 0x40;
pub const HAS_NEXT: u8 = 0x20;
pub const FREQUENCY_MASK: u8 = 0x1F;

/// Highest frequency a node can carry.
pub const MAX_FREQUENCY: u8 = 32;

/// Largest offset a sibling pointer can hold.
pub const MAX_POINTER: u32 = 0x00FF_FFFF;

/// One decoded trie node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieNode {
    /// UTF-16 code unit of the node's character; 0 marks the end of a word.
    pub ch: u16,
    /// Frequency in `1..=32`.
    pub frequency: u8,
    /// Next node in the sibling chain.
    pub next: Option<u32>,
    /// First node of the child chain (next letter position).
    pub child: Option<u32>,
}

impl TrieNode {
    /// Whether this node marks that the path leading to its chain is a word.
    #[inline]
    pub fn is_end_of_word(&self) -> bool {
        self.ch == 0
    }

    /// The node's character, or `None` for the end-of-word marker and for
    /// code units that are not characters on their own (lone surrogates).
    pub fn letter(&self) -> Option<char> {
        if self.is_end_of_word() {
            return None;
        }
        char::from_u32(self.ch as u32)
    }
}

/// Decode the node record at `offset` of the trie region.
///
/// Returns the node and the offset just past its record.
pub fn read_node(tree: &[u8], offset: u32) -> Result<(TrieNode, u32), DictError> {
    let out_of_bounds = || DictError::OutOfBounds {
        offset,
        len: tree.len(),
    };
    let byte_at = |pos: usize| tree.get(pos).copied().ok_or_else(out_of_bounds);

    let mut pos = offset as usize;
    let control = byte_at(pos)?;
    pos += 1;

    let has_char = control & HAS_CHAR != 0;
    let frequency = (control & FREQUENCY_MASK) + 1;

    let mut ch = 0u16;
    if has_char {
        ch = byte_at(pos)? as u16;
        pos += 1;
        if control & BIG_CHAR != 0 {
            ch = (ch << 8) | byte_at(pos)? as u16;
            pos += 1;
        }
    }

    let next = if control & HAS_NEXT != 0 {
        let b0 = byte_at(pos)? as u32;
        let b1 = byte_at(pos + 1)? as u32;
        let b2 = byte_at(pos + 2)? as u32;
        pos += 3;
        Some((b0 << 16) | (b1 << 8) | b2)
    } else {
        None
    };

    let end = pos as u32;
    let child = if has_char { Some(end) } else { None };

    Ok((
        TrieNode {
            ch,
            frequency,
            next,
            child,
        },
        end,
    ))
}

/// Number of bytes [`write_node`] emits for a node.
pub fn encoded_len(ch: u16, has_next: bool) -> usize {
    let char_len = match ch {
        0 => 0,
        1..=0xFF => 1,
        _ => 2,
    };
    1 + char_len + if has_next { 3 } else { 0 }
}

/// Append a node record to `out`.
///
/// `ch == 0` writes an end-of-word marker. When `has_next` is set, three
/// zero bytes are reserved for the sibling pointer and their position is
/// returned so the caller can fill it with [`patch_pointer`] once the
/// sibling's offset is known.
pub fn write_node(out: &mut Vec<u8>, ch: u16, frequency: u8, has_next: bool) -> Option<usize> {
    let mut control = (frequency.clamp(1, MAX_FREQUENCY) - 1) & FREQUENCY_MASK;
    if ch != 0 {
        control |= HAS_CHAR;
        if ch > 0xFF {
            control |= BIG_CHAR;
        }
    }
    if has_next {
        control |= HAS_NEXT;
    }
    out.push(control);

    if ch > 0xFF {
        out.extend_from_slice(&ch.to_be_bytes());
    } else if ch != 0 {
        out.push(ch as u8);
    }

    if has_next {
        let at = out.len();
        out.extend_from_slice(&[0, 0, 0]);
        Some(at)
    } else {
        None
    }
}

/// Fill a reserved sibling pointer.
pub fn patch_pointer(out: &mut [u8], at: usize, target: u32) {
    let bytes = target.to_be_bytes();
    out[at..at + 3].copy_from_slice(&bytes[1..]);
}
