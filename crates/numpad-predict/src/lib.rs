//! Predictive text for numeric keypads.
//!
//! - [`search`] -- frontier search over the dictionary trie, one digit at a time
//! - [`predictor`] -- the T9 matcher and its dictionary load state
//! - [`multitap`] -- letter cycling matcher used when prediction declines
//! - [`matcher`] -- the matcher contract shared by both
//! - [`dispatch`] -- turns a key press into a text replacement

pub mod dispatch;
pub mod matcher;
pub mod multitap;
pub mod predictor;
pub mod search;

pub use dispatch::{KeypadInput, Replacement};
pub use matcher::Matcher;
pub use multitap::{Multitap, MultitapOptions};
pub use predictor::{Predictor, PredictorOptions};

use numpad_dict::DictError;

/// Error type for loading a dictionary into a predictor.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The dictionary data was rejected.
    #[error("failed to load dictionary: {0}")]
    Dictionary(#[from] DictError),

    /// The predictor already holds a dictionary.
    #[error("a dictionary is already loaded")]
    AlreadyLoaded,
}
