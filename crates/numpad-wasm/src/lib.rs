// WASM bindings for numpad predictive text.
//
// Provides a `WasmKeypad` class exported via wasm-bindgen that wraps the
// `KeypadInput` dispatcher from numpad-predict. The dictionary is fetched by
// the host and handed over with `loadDictionary` whenever it arrives; key
// presses before that are served by multitap. Replacements are serialized
// to JavaScript objects using serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const keypad = new WasmKeypad();
//   keypad.pressKey("", 0, "4", performance.now());  // => { start: 0, end: 0, text: "g" }
//   keypad.loadDictionary(new Uint8Array(await res.arrayBuffer()));
//   keypad.isLoaded();                                // => true
//   keypad.findWords("4663");                         // => ["good", "home", ...]
//   keypad.pressKey("go", 2, "6", performance.now()); // => { start: 0, end: 2, text: "goo" }

use std::time::Duration;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use numpad_dict::DictError;
use numpad_predict::{KeypadInput, PredictError, Replacement};

// ============================================================================
// DTO types for JS interop
// ============================================================================

/// Serializable representation of a text replacement.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsReplacement {
    start: usize,
    end: usize,
    text: String,
}

impl From<Replacement> for JsReplacement {
    fn from(r: Replacement) -> Self {
        JsReplacement {
            start: r.start,
            end: r.end,
            text: r.text,
        }
    }
}

fn dict_error_to_js(e: DictError) -> JsError {
    JsError::new(&e.to_string())
}

fn predict_error_to_js(e: PredictError) -> JsError {
    JsError::new(&e.to_string())
}

/// Host timestamps are fractional milliseconds. Negative or NaN clamps to
/// zero, values too large for a `Duration` clamp to `Duration::MAX`.
fn millis_to_duration(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}

// ============================================================================
// WasmKeypad
// ============================================================================

/// Numeric keypad text input for WebAssembly.
#[wasm_bindgen]
pub struct WasmKeypad {
    input: KeypadInput,
}

#[wasm_bindgen]
impl WasmKeypad {
    /// Create a keypad without a dictionary.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> WasmKeypad {
        WasmKeypad {
            input: KeypadInput::default(),
        }
    }

    /// Install the dictionary. Fails on malformed data or a second load.
    #[wasm_bindgen(js_name = "loadDictionary")]
    pub fn load_dictionary(&mut self, data: Vec<u8>) -> Result<(), JsError> {
        self.input
            .load_dictionary(data)
            .map_err(predict_error_to_js)
    }

    /// Whether the dictionary has been installed.
    #[wasm_bindgen(js_name = "isLoaded")]
    pub fn is_loaded(&self) -> bool {
        self.input.predictor().is_some_and(|p| p.is_loaded())
    }

    /// Ranked candidates for a digit string; empty before the dictionary loads.
    #[wasm_bindgen(js_name = "findWords")]
    pub fn find_words(&self, digits: &str) -> Result<Vec<String>, JsError> {
        let Some(predictor) = self.input.predictor() else {
            return Ok(Vec::new());
        };
        let digits: Vec<char> = digits.chars().collect();
        predictor.find_words(&digits).map_err(dict_error_to_js)
    }

    /// Digits that type `word` on the predictive keypad.
    #[wasm_bindgen(js_name = "wordToKeys")]
    pub fn word_to_keys(&self, word: &str) -> String {
        self.input
            .predictor()
            .map(|p| p.word_to_keys(word))
            .unwrap_or_default()
    }

    /// Process a key press.
    ///
    /// `cursor` is a character offset into `text`, and `now_ms` a host
    /// timestamp in milliseconds. Returns `{ start, end, text }` describing
    /// the characters to replace, or `null` if no matcher accepted the key.
    #[wasm_bindgen(js_name = "pressKey")]
    pub fn press_key(
        &mut self,
        text: &str,
        cursor: usize,
        key: char,
        now_ms: f64,
    ) -> Result<JsValue, JsError> {
        let replacement = self
            .input
            .handle_key(text, cursor, key, millis_to_duration(now_ms))
            .map_err(dict_error_to_js)?;
        match replacement {
            Some(r) => serde_wasm_bindgen::to_value(&JsReplacement::from(r))
                .map_err(|e| JsError::new(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Set the multitap timeout in milliseconds.
    #[wasm_bindgen(js_name = "setTapTimeout")]
    pub fn set_tap_timeout(&mut self, ms: f64) {
        if let Some(multitap) = self.input.multitap_mut() {
            multitap.set_tap_timeout(millis_to_duration(ms));
        }
    }

    /// Set the score multiplier for candidates that are whole words.
    #[wasm_bindgen(js_name = "setCompleteWordBonus")]
    pub fn set_complete_word_bonus(&mut self, value: u32) {
        if let Some(predictor) = self.input.predictor_mut() {
            predictor.set_complete_word_bonus(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps() {
        assert_eq!(millis_to_duration(1500.0), Duration::from_millis(1500));
        assert_eq!(millis_to_duration(-3.0), Duration::ZERO);
        assert_eq!(millis_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(millis_to_duration(1e300), Duration::MAX);
        assert_eq!(millis_to_duration(f64::INFINITY), Duration::MAX);
    }

    #[test]
    fn huge_timeout_keeps_typing() {
        let mut keypad = WasmKeypad::new();
        keypad.set_tap_timeout(1e300);
        let multitap = keypad.input.multitap_mut().unwrap();
        assert_eq!(multitap.options().tap_timeout, Duration::MAX);
        let r = keypad
            .input
            .handle_key("", 0, '2', millis_to_duration(1e300))
            .unwrap()
            .unwrap();
        assert_eq!(r.text, "a");
    }

    #[test]
    fn replacement_dto() {
        let dto = JsReplacement::from(Replacement {
            start: 1,
            end: 3,
            text: "ok".to_string(),
        });
        assert_eq!(
            dto,
            JsReplacement {
                start: 1,
                end: 3,
                text: "ok".to_string()
            }
        );
    }

    #[test]
    fn keypad_without_dictionary() {
        let mut keypad = WasmKeypad::new();
        assert!(!keypad.is_loaded());
        assert_eq!(keypad.word_to_keys("Hello"), "43556");
        keypad.set_tap_timeout(250.0);
        keypad.set_complete_word_bonus(3);
        let predictor = keypad.input.predictor().unwrap();
        assert_eq!(predictor.options().complete_word_bonus, 3);
    }
}
