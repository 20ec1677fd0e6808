//! Shared building blocks for numeric keypad text entry.
//!
//! - [`keypad`] -- digit-to-letter tables with a reverse letter-to-digit lookup
//! - [`character`] -- word character classification and word bounds in host text

pub mod character;
pub mod keypad;

pub use character::{WordBounds, is_word_char, word_bounds};
pub use keypad::KeypadMap;
