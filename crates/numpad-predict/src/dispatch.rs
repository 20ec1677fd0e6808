// Key press dispatch: ask each matcher in priority order for a replacement

use std::time::Duration;

use numpad_dict::DictError;
use tracing::{debug, warn};

use crate::PredictError;
use crate::matcher::Matcher;
use crate::multitap::Multitap;
use crate::predictor::Predictor;

/// Text to splice into the host field in place of `[start, end)`.
///
/// Offsets are character positions, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Replacement {
    /// Apply the replacement to `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut out: String = text.chars().take(self.start).collect();
        out.push_str(&self.text);
        out.extend(text.chars().skip(self.end));
        out
    }

    /// Cursor position after the replacement.
    pub fn cursor_after(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

/// Routes key presses to matchers: the predictor first, multitap as fallback.
#[derive(Debug)]
pub struct KeypadInput {
    matchers: Vec<Matcher>,
}

impl KeypadInput {
    pub fn new(predictor: Predictor, multitap: Multitap) -> Self {
        Self {
            matchers: vec![Matcher::Predictor(predictor), Matcher::Multitap(multitap)],
        }
    }

    /// Matchers in the order they are consulted.
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn predictor(&self) -> Option<&Predictor> {
        self.matchers.iter().find_map(|m| match m {
            Matcher::Predictor(p) => Some(p),
            Matcher::Multitap(_) => None,
        })
    }

    pub fn predictor_mut(&mut self) -> Option<&mut Predictor> {
        self.matchers.iter_mut().find_map(|m| match m {
            Matcher::Predictor(p) => Some(p),
            Matcher::Multitap(_) => None,
        })
    }

    pub fn multitap_mut(&mut self) -> Option<&mut Multitap> {
        self.matchers.iter_mut().find_map(|m| match m {
            Matcher::Multitap(t) => Some(t),
            Matcher::Predictor(_) => None,
        })
    }

    /// Hand the dictionary blob to the predictor.
    pub fn load_dictionary(&mut self, blob: Vec<u8>) -> Result<(), PredictError> {
        match self.predictor_mut() {
            Some(predictor) => predictor.load(blob),
            None => Ok(()),
        }
    }

    /// Process one key press.
    ///
    /// `text` is the host field content and `cursor` a character offset
    /// into it. Each matcher computes the word ending at the cursor and is
    /// asked to append `key`; the first non-empty answer wins. Returns
    /// `Ok(None)` when no matcher accepts the key. Corrupt dictionary data
    /// is reported as an error and stops the dispatch.
    pub fn handle_key(
        &mut self,
        text: &str,
        cursor: usize,
        key: char,
        now: Duration,
    ) -> Result<Option<Replacement>, DictError> {
        let chars: Vec<char> = text.chars().collect();

        for matcher in &mut self.matchers {
            matcher.tick(now);
            let bounds = matcher.word_bounds(&chars, cursor);
            let word = bounds.extract(&chars);

            let result = matcher.append_word(&word, key, now).inspect_err(|e| {
                warn!(matcher = matcher.name(), error = %e, "dictionary corruption");
            })?;

            if let Some(replacement) = result.filter(|r| !r.is_empty()) {
                debug!(
                    matcher = matcher.name(),
                    %key,
                    %word,
                    %replacement,
                    "key accepted"
                );
                return Ok(Some(Replacement {
                    start: bounds.start,
                    end: bounds.end,
                    text: replacement,
                }));
            }
        }

        debug!(%key, "no matcher accepted key");
        Ok(None)
    }
}

impl Default for KeypadInput {
    fn default() -> Self {
        Self::new(Predictor::default(), Multitap::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numpad_dict::DictionaryBuilder;

    fn blob(words: &[(&str, u32)]) -> Vec<u8> {
        let mut builder = DictionaryBuilder::new();
        for &(word, freq) in words {
            builder.insert(word, freq).unwrap();
        }
        builder.build().unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Type `keys` one by one at 100 ms intervals, starting from `text`.
    fn type_keys(input: &mut KeypadInput, text: &str, keys: &str) -> String {
        let mut text = text.to_string();
        for (i, key) in keys.chars().enumerate() {
            let cursor = text.chars().count();
            if let Some(r) = input.handle_key(&text, cursor, key, ms(i as u64 * 100)).unwrap() {
                text = r.apply(&text);
            }
        }
        text
    }

    #[test]
    fn replacement_apply() {
        let r = Replacement {
            start: 4,
            end: 6,
            text: "if".to_string(),
        };
        assert_eq!(r.apply("say he!"), "say if!");
        assert_eq!(r.cursor_after(), 6);
    }

    #[test]
    fn replacement_apply_counts_chars() {
        let r = Replacement {
            start: 1,
            end: 2,
            text: "\u{0434}\u{0430}".to_string(),
        };
        assert_eq!(r.apply("\u{0436}x\u{0436}"), "\u{0436}\u{0434}\u{0430}\u{0436}");
        assert_eq!(r.cursor_after(), 3);
    }

    #[test]
    fn predictor_has_priority() {
        let mut input = KeypadInput::default();
        input.load_dictionary(blob(&[("good", 9), ("home", 8)])).unwrap();
        let r = input.handle_key("go", 2, '6', ms(0)).unwrap().unwrap();
        assert_eq!(
            r,
            Replacement {
                start: 0,
                end: 2,
                text: "goo".to_string()
            }
        );
    }

    #[test]
    fn typing_a_word() {
        let mut input = KeypadInput::default();
        input.load_dictionary(blob(&[("good", 9), ("home", 8)])).unwrap();
        assert_eq!(type_keys(&mut input, "", "4663"), "good");
        assert_eq!(type_keys(&mut input, "at ", "466"), "at goo");
    }

    #[test]
    fn unloaded_predictor_falls_through_to_multitap() {
        let mut input = KeypadInput::default();
        let r = input.handle_key("", 0, '4', ms(0)).unwrap().unwrap();
        assert_eq!(r.text, "g");
        let r = input.handle_key("g", 1, '4', ms(100)).unwrap().unwrap();
        assert_eq!(
            r,
            Replacement {
                start: 0,
                end: 1,
                text: "h".to_string()
            }
        );
    }

    #[test]
    fn unmapped_key_falls_through_to_multitap() {
        let mut input = KeypadInput::default();
        input.load_dictionary(blob(&[("hi", 9)])).unwrap();
        let text = type_keys(&mut input, "", "44");
        assert_eq!(text, "hi");
        // '1' is not a predictive key; multitap types punctuation and cycles it
        let r = input.handle_key(&text, 2, '1', ms(1000)).unwrap().unwrap();
        assert_eq!(r.text, "hi.");
        let text = r.apply(&text);
        let r = input.handle_key(&text, 3, '1', ms(1100)).unwrap().unwrap();
        assert_eq!(r, Replacement { start: 2, end: 3, text: ",".to_string() });
        assert_eq!(r.apply(&text), "hi,");
    }

    #[test]
    fn dead_end_falls_through_to_multitap() {
        let mut input = KeypadInput::default();
        input.load_dictionary(blob(&[("hi", 9)])).unwrap();
        let r = input.handle_key("hi", 2, '2', ms(0)).unwrap().unwrap();
        assert_eq!(r.text, "hia");
    }

    #[test]
    fn space_key_then_new_word() {
        let mut input = KeypadInput::default();
        input.load_dictionary(blob(&[("hi", 9), ("go", 5)])).unwrap();
        let text = type_keys(&mut input, "", "44046");
        assert_eq!(text, "hi go");
    }

    #[test]
    fn no_matcher_accepts() {
        let mut input = KeypadInput::default();
        assert_eq!(input.handle_key("abc", 3, '#', ms(0)).unwrap(), None);
    }

    #[test]
    fn cursor_in_middle_of_text() {
        let mut input = KeypadInput::default();
        input.load_dictionary(blob(&[("ok", 4), ("on", 6)])).unwrap();
        let r = input.handle_key("o world", 1, '6', ms(0)).unwrap().unwrap();
        assert_eq!(r.apply("o world"), "on world");
    }

    #[test]
    fn empty_trie_keeps_multitap_working() {
        // Header only, declaring an empty char table.
        let mut data = blob(&[("a", 1)])[..15].to_vec();
        data[13] = 0;
        data[14] = 0;
        let mut input = KeypadInput::default();
        assert!(input.load_dictionary(data).is_err());
        assert!(!input.predictor().unwrap().is_loaded());
        let r = input.handle_key("", 0, '2', ms(0)).unwrap().unwrap();
        assert_eq!(r.text, "a");
    }

    #[test]
    fn corruption_is_surfaced() {
        let mut data = blob(&[("ab", 3)]);
        // Point the root node's child chain past the end by truncating the trie.
        data.truncate(data.len() - 2);
        let mut input = KeypadInput::default();
        input.load_dictionary(data).unwrap();
        let err = input.handle_key("", 0, '2', ms(0)).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn accessors() {
        let mut input = KeypadInput::default();
        assert_eq!(input.matchers().len(), 2);
        assert_eq!(input.matchers()[0].name(), "predictor");
        assert!(!input.predictor().unwrap().is_loaded());
        input.multitap_mut().unwrap().set_tap_timeout(ms(10));
        assert_eq!(
            input.multitap_mut().unwrap().options().tap_timeout,
            ms(10)
        );
    }
}
