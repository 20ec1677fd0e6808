// Predictor: T9 matcher backed by a trie dictionary that arrives asynchronously
//
// The predictor starts without a dictionary and answers every query with an
// empty result until `load` succeeds. Loading happens once; the dictionary
// is read-only afterwards.

use numpad_core::KeypadMap;
use numpad_dict::{DictError, Dictionary};
use tracing::{debug, info, warn};

use crate::PredictError;
use crate::search::{COMPLETE_WORD_BONUS, Search};

/// Options for the predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorOptions {
    /// Digit-to-letter table used for searching and for `word_to_keys`.
    pub keypad: KeypadMap,
    /// Multiplier for candidates that are whole dictionary words.
    pub complete_word_bonus: u32,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            keypad: KeypadMap::t9(),
            complete_word_bonus: COMPLETE_WORD_BONUS,
        }
    }
}

/// Load state of the predictor.
#[derive(Debug)]
pub enum PredictorState {
    Unloaded,
    Ready(Dictionary),
}

/// T9 word predictor.
#[derive(Debug)]
pub struct Predictor {
    state: PredictorState,
    options: PredictorOptions,
}

impl Predictor {
    /// Create a predictor without a dictionary.
    pub fn new(options: PredictorOptions) -> Self {
        Self {
            state: PredictorState::Unloaded,
            options,
        }
    }

    /// Create a predictor that is ready immediately.
    pub fn with_dictionary(dictionary: Dictionary, options: PredictorOptions) -> Self {
        Self {
            state: PredictorState::Ready(dictionary),
            options,
        }
    }

    /// Parse `blob` and make it the predictor's dictionary.
    ///
    /// A blob that fails to parse leaves the predictor unloaded.
    pub fn load(&mut self, blob: Vec<u8>) -> Result<(), PredictError> {
        if self.is_loaded() {
            warn!("ignoring second dictionary load");
            return Err(PredictError::AlreadyLoaded);
        }
        let dictionary = Dictionary::from_vec(blob).inspect_err(|e| {
            warn!(error = %e, "rejected dictionary");
        })?;
        self.install(dictionary)
    }

    /// Install an already parsed dictionary.
    pub fn install(&mut self, dictionary: Dictionary) -> Result<(), PredictError> {
        if self.is_loaded() {
            return Err(PredictError::AlreadyLoaded);
        }
        info!(
            max_word_length = dictionary.max_word_length(),
            "predictor ready"
        );
        self.state = PredictorState::Ready(dictionary);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, PredictorState::Ready(_))
    }

    pub fn state(&self) -> &PredictorState {
        &self.state
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        match &self.state {
            PredictorState::Ready(dictionary) => Some(dictionary),
            PredictorState::Unloaded => None,
        }
    }

    pub fn options(&self) -> &PredictorOptions {
        &self.options
    }

    /// Set the multiplier for candidates that are whole words.
    pub fn set_complete_word_bonus(&mut self, value: u32) {
        self.options.complete_word_bonus = value;
    }

    fn search(&self) -> Option<Search<'_>> {
        let dictionary = self.dictionary()?;
        Some(
            Search::new(dictionary.tree(), &self.options.keypad)
                .with_complete_word_bonus(self.options.complete_word_bonus),
        )
    }

    /// Ranked words and prefixes spelled by `digits`; empty while unloaded.
    pub fn find_words(&self, digits: &[char]) -> Result<Vec<String>, DictError> {
        match self.search() {
            Some(search) => search.find_words(digits),
            None => Ok(Vec::new()),
        }
    }

    /// Frequency of the word ending at the sibling chain at `offset`.
    pub fn is_complete_word(&self, offset: u32) -> Result<Option<u8>, DictError> {
        match self.search() {
            Some(search) => search.is_complete_word(offset),
            None => Ok(None),
        }
    }

    /// The key sequence that types `word`; unmapped characters are skipped.
    pub fn word_to_keys(&self, word: &str) -> String {
        self.options.keypad.word_to_keys(word)
    }

    /// Extend `word` by one key press and return the best match.
    ///
    /// The search always restarts from the root with the keys of the whole
    /// word, since it cannot resume from an existing prefix. Declines with
    /// `None` while unloaded or when nothing matches.
    pub fn append_word(&self, word: &str, key: char) -> Result<Option<String>, DictError> {
        if !self.is_loaded() {
            return Ok(None);
        }
        let mut keys: Vec<char> = self.word_to_keys(word).chars().collect();
        keys.push(key);

        let best = self.find_words(&keys)?.into_iter().next();
        debug!(%word, %key, best = ?best, "predictor append");
        Ok(best.filter(|w| !w.is_empty()))
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(PredictorOptions::default())
    }
}
