// Multitap matcher: repeated presses of one key cycle through its letters
//
// A press starts a cycle that stays open until the tap timeout passes or a
// different key is pressed. While the cycle is open, pressing the same key
// again replaces the last character with the next one in the key's group.
// Time is passed in by the caller as a duration since any fixed epoch.

use std::time::Duration;

use numpad_core::{KeypadMap, WordBounds, word_bounds};
use tracing::trace;

/// How long a cycle stays open after the last press.
pub const TAP_TIMEOUT: Duration = Duration::from_millis(1500);

/// Options for the multitap matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultitapOptions {
    /// Cycling groups per key.
    pub keypad: KeypadMap,
    /// How long a cycle stays open after the last press.
    pub tap_timeout: Duration,
}

impl Default for MultitapOptions {
    fn default() -> Self {
        Self {
            keypad: KeypadMap::multitap(),
            tap_timeout: TAP_TIMEOUT,
        }
    }
}

/// Cycle state. At most one cycle is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapState {
    Idle,
    Pending { key: char, deadline: Duration },
}

/// Letter-cycling matcher.
#[derive(Debug, Clone)]
pub struct Multitap {
    options: MultitapOptions,
    state: TapState,
}

impl Multitap {
    pub fn new(options: MultitapOptions) -> Self {
        Self {
            options,
            state: TapState::Idle,
        }
    }

    pub fn state(&self) -> TapState {
        self.state
    }

    pub fn options(&self) -> &MultitapOptions {
        &self.options
    }

    pub fn set_tap_timeout(&mut self, timeout: Duration) {
        self.options.tap_timeout = timeout;
    }

    /// Close the open cycle if its deadline has passed. Returns whether a
    /// cycle was closed.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.state {
            TapState::Pending { deadline, .. } if now >= deadline => {
                trace!("multitap cycle timed out");
                self.state = TapState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Close the open cycle unconditionally.
    pub fn cancel(&mut self) {
        self.state = TapState::Idle;
    }

    fn arm(&mut self, key: char, now: Duration) {
        self.state = TapState::Pending {
            key,
            deadline: now.saturating_add(self.options.tap_timeout),
        };
    }

    /// Word bounds before the cursor.
    ///
    /// While a cycle is open, the character just before the cursor is
    /// included when it belongs to the cycling key even if it is not a word
    /// character, so punctuation and space groups can cycle too.
    pub fn word_bounds(&self, text: &[char], cursor: usize) -> WordBounds {
        let mut bounds = word_bounds(text, cursor);
        if let TapState::Pending { key, .. } = self.state {
            if bounds.is_empty()
                && bounds.end > 0
                && self.options.keypad.key_for(text[bounds.end - 1]) == Some(key)
            {
                bounds.start = bounds.end - 1;
            }
        }
        bounds
    }

    /// The characters of the key named by the last character of `text`.
    pub fn find_words(&self, text: &str) -> Vec<String> {
        text.chars()
            .last()
            .and_then(|key| self.options.keypad.letters(key))
            .map(|group| group.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Apply a key press to `word`.
    ///
    /// Declines with `None` when the key has no group. Otherwise either
    /// cycles the last character or appends the first character of the
    /// key's group, and (re)opens the cycle.
    pub fn append_word(&mut self, word: &str, key: char, now: Duration) -> Option<String> {
        self.expire(now);
        let group = self.options.keypad.letters(key)?;
        let first = *group.first()?;

        if let TapState::Pending { key: pending, .. } = self.state {
            if pending == key {
                if let Some(last) = word.chars().last() {
                    if self.options.keypad.key_for(last) == Some(key) {
                        let next = group
                            .iter()
                            .position(|&c| c == last)
                            .map_or(0, |i| (i + 1) % group.len());
                        let mut cycled = word[..word.len() - last.len_utf8()].to_string();
                        cycled.push(group[next]);
                        self.arm(key, now);
                        trace!(%key, %cycled, "multitap cycle");
                        return Some(cycled);
                    }
                }
            }
        }

        self.arm(key, now);
        let mut appended = String::with_capacity(word.len() + first.len_utf8());
        appended.push_str(word);
        appended.push(first);
        Some(appended)
    }
}

impl Default for Multitap {
    fn default() -> Self {
        Self::new(MultitapOptions::default())
    }
}
