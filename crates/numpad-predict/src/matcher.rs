// Matcher contract: word bounds, candidate lookup and key appending

use std::time::Duration;

use numpad_core::{WordBounds, word_bounds};
use numpad_dict::DictError;

use crate::multitap::Multitap;
use crate::predictor::Predictor;

/// A text matcher consulted by the dispatcher.
///
/// The set of matchers is closed: dictionary prediction and multitap
/// cycling. Both share the same three operations.
#[derive(Debug)]
pub enum Matcher {
    Predictor(Predictor),
    Multitap(Multitap),
}

impl Matcher {
    pub fn name(&self) -> &'static str {
        match self {
            Matcher::Predictor(_) => "predictor",
            Matcher::Multitap(_) => "multitap",
        }
    }

    /// Bounds of the word this matcher would edit, ending at `cursor`.
    pub fn word_bounds(&self, text: &[char], cursor: usize) -> WordBounds {
        match self {
            Matcher::Predictor(_) => word_bounds(text, cursor),
            Matcher::Multitap(multitap) => multitap.word_bounds(text, cursor),
        }
    }

    /// Candidates for `text`.
    ///
    /// The predictor treats `text` as a digit sequence; multitap lists the
    /// characters of the key named by the last character.
    pub fn find_words(&self, text: &str) -> Result<Vec<String>, DictError> {
        match self {
            Matcher::Predictor(predictor) => {
                let digits: Vec<char> = text.chars().collect();
                predictor.find_words(&digits)
            }
            Matcher::Multitap(multitap) => Ok(multitap.find_words(text)),
        }
    }

    /// The word after pressing `key`, or `None` if this matcher declines.
    pub fn append_word(
        &mut self,
        word: &str,
        key: char,
        now: Duration,
    ) -> Result<Option<String>, DictError> {
        match self {
            Matcher::Predictor(predictor) => predictor.append_word(word, key),
            Matcher::Multitap(multitap) => Ok(multitap.append_word(word, key, now)),
        }
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Duration) {
        if let Matcher::Multitap(multitap) = self {
            multitap.expire(now);
        }
    }
}

impl From<Predictor> for Matcher {
    fn from(predictor: Predictor) -> Self {
        Matcher::Predictor(predictor)
    }
}

impl From<Multitap> for Matcher {
    fn from(multitap: Multitap) -> Self {
        Matcher::Multitap(multitap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numpad_dict::DictionaryBuilder;

    fn predictor(words: &[(&str, u32)]) -> Predictor {
        let mut builder = DictionaryBuilder::new();
        for &(word, freq) in words {
            builder.insert(word, freq).unwrap();
        }
        let mut predictor = Predictor::default();
        predictor.load(builder.build().unwrap()).unwrap();
        predictor
    }

    #[test]
    fn names() {
        assert_eq!(Matcher::from(Predictor::default()).name(), "predictor");
        assert_eq!(Matcher::from(Multitap::default()).name(), "multitap");
    }

    #[test]
    fn predictor_find_words_reads_digits() {
        let matcher = Matcher::from(predictor(&[("cab", 4), ("bad", 6)]));
        assert_eq!(matcher.find_words("222").unwrap(), vec!["cab"]);
        assert!(matcher.find_words("2a2").unwrap().is_empty());
    }

    #[test]
    fn multitap_find_words_lists_group() {
        let matcher = Matcher::from(Multitap::default());
        assert_eq!(matcher.find_words("9").unwrap().len(), 9);
    }

    #[test]
    fn append_dispatches() {
        let mut p = Matcher::from(predictor(&[("no", 7)]));
        let mut m = Matcher::from(Multitap::default());
        assert_eq!(
            p.append_word("n", '6', Duration::ZERO).unwrap().as_deref(),
            Some("no")
        );
        assert_eq!(
            m.append_word("n", '6', Duration::ZERO).unwrap().as_deref(),
            Some("nm")
        );
    }

    #[test]
    fn default_bounds_for_predictor() {
        let matcher = Matcher::from(Predictor::default());
        let text: Vec<char> = "say hi".chars().collect();
        assert_eq!(matcher.word_bounds(&text, 6), WordBounds { start: 4, end: 6 });
    }

    #[test]
    fn tick_expires_multitap() {
        let mut multitap = Multitap::default();
        multitap.append_word("", '2', Duration::ZERO);
        let mut matcher = Matcher::from(multitap);
        matcher.tick(Duration::from_secs(10));
        let Matcher::Multitap(multitap) = &matcher else {
            unreachable!()
        };
        assert_eq!(multitap.state(), crate::multitap::TapState::Idle);
    }
}
