// Candidate search: level-synchronized frontier expansion over the dictionary trie

use numpad_core::KeypadMap;
use numpad_dict::{DictError, Trie};
use tracing::{debug, trace};

/// Multiplier applied to the frequency of candidates that are whole words.
pub const COMPLETE_WORD_BONUS: u32 = 2;

/// A partial word on the search frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Start of the sibling chain holding the letters that may follow.
    pub offset: u32,
    /// Letters matched so far.
    pub output: String,
    /// Ranking score.
    pub frequency: u32,
}

impl Candidate {
    fn root() -> Self {
        Self {
            offset: Trie::ROOT,
            output: String::new(),
            frequency: 0,
        }
    }
}

/// Searches a trie for the words a digit sequence can spell.
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    trie: Trie<'a>,
    keypad: &'a KeypadMap,
    complete_word_bonus: u32,
}

impl<'a> Search<'a> {
    pub fn new(trie: Trie<'a>, keypad: &'a KeypadMap) -> Self {
        Self {
            trie,
            keypad,
            complete_word_bonus: COMPLETE_WORD_BONUS,
        }
    }

    pub fn with_complete_word_bonus(mut self, bonus: u32) -> Self {
        self.complete_word_bonus = bonus;
        self
    }

    /// Words and word prefixes spelled by `digits`, best first.
    ///
    /// An unmapped digit or a dead end yields an empty list. Whole words
    /// have their frequency replaced by their end-of-word frequency times
    /// the complete-word bonus; ties keep discovery order.
    pub fn find_words(&self, digits: &[char]) -> Result<Vec<String>, DictError> {
        let mut candidates = self.frontier(digits)?;

        for candidate in &mut candidates {
            if let Some(frequency) = self.is_complete_word(candidate.offset)? {
                candidate.frequency = (frequency as u32).saturating_mul(self.complete_word_bonus);
                trace!(word = %candidate.output, frequency, "complete word");
            }
        }

        candidates.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        Ok(candidates.into_iter().map(|c| c.output).collect())
    }

    /// The candidates left after consuming `digits`, in discovery order and
    /// without the complete-word bonus.
    pub fn frontier(&self, digits: &[char]) -> Result<Vec<Candidate>, DictError> {
        let mut candidates = vec![Candidate::root()];

        for &digit in digits {
            let Some(letters) = self.keypad.letters(digit) else {
                debug!(%digit, "unmapped digit");
                return Ok(Vec::new());
            };

            let mut expanded = Vec::new();
            for candidate in &candidates {
                self.expand(candidate, letters, &mut expanded)?;
            }

            debug!(
                %digit,
                before = candidates.len(),
                after = expanded.len(),
                "expanded frontier"
            );
            candidates = expanded;

            if candidates.is_empty() {
                return Ok(candidates);
            }
        }

        Ok(candidates)
    }

    /// Push one new candidate for every sibling of `candidate` whose letter
    /// is in `letters`.
    fn expand(
        &self,
        candidate: &Candidate,
        letters: &[char],
        out: &mut Vec<Candidate>,
    ) -> Result<(), DictError> {
        for node in self.trie.siblings(candidate.offset) {
            let node = node?;
            let Some(letter) = node.letter() else {
                continue;
            };
            if !letters.contains(&letter) {
                continue;
            }
            let offset = node.child.ok_or(DictError::BrokenPointer)?;
            let mut output = String::with_capacity(candidate.output.len() + letter.len_utf8());
            output.push_str(&candidate.output);
            output.push(letter);
            out.push(Candidate {
                offset,
                output,
                frequency: node.frequency as u32,
            });
        }
        Ok(())
    }

    /// Frequency of the word ending at the chain starting at `offset`, or
    /// `None` if the chain has no end-of-word marker.
    pub fn is_complete_word(&self, offset: u32) -> Result<Option<u8>, DictError> {
        for node in self.trie.siblings(offset) {
            let node = node?;
            if node.is_end_of_word() {
                return Ok(Some(node.frequency));
            }
        }
        Ok(None)
    }
}
