//! Input events sent by the host keypad

use serde::{Deserialize, Serialize};

use crate::config::TextResources;
use crate::core::Operation;

/// One discrete keypad event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Append a digit token
    Digit(String),
    /// Append an operator symbol as shown on the keypad
    Operator(String),
    /// Append the decimal separator
    Dot,
    /// Reset the composition
    Clear,
    /// Evaluate the composition
    Equals,
}

impl InputEvent {
    /// Creates a digit event for 0-9
    #[must_use]
    pub fn digit(d: u8) -> Option<Self> {
        char::from_digit(u32::from(d), 10).map(|ch| Self::Digit(ch.to_string()))
    }

    /// Creates an operator event
    #[must_use]
    pub fn operator(symbol: impl Into<String>) -> Self {
        Self::Operator(symbol.into())
    }

    /// Returns the button label for this event
    #[must_use]
    pub fn label(&self, resources: &TextResources) -> String {
        match self {
            Self::Digit(token) => token.clone(),
            Self::Operator(symbol) => symbol.clone(),
            Self::Dot => resources.dot_glyph.clone(),
            Self::Clear => "C".to_string(),
            Self::Equals => "=".to_string(),
        }
    }

    /// Maps a host key name to an event
    ///
    /// Canonical `*` and `/` map to the display glyphs so the expression shows
    /// what the keypad shows. Unknown keys map to `None`.
    #[must_use]
    pub fn from_key(key: &str, resources: &TextResources) -> Option<Self> {
        if let [byte @ b'0'..=b'9'] = key.as_bytes() {
            return Self::digit(byte - b'0');
        }

        let multiply = &resources.multiply_display;
        let divide = &resources.divide_display;
        if key.eq_ignore_ascii_case(multiply) || key == resources.multiply_canonical {
            return Some(Self::operator(multiply.as_str()));
        }
        if key.eq_ignore_ascii_case(divide) || key == resources.divide_canonical {
            return Some(Self::operator(divide.as_str()));
        }
        if key == Operation::Add.symbol() || key == Operation::Subtract.symbol() {
            return Some(Self::operator(key));
        }
        if key == resources.dot_glyph || key == "." {
            return Some(Self::Dot);
        }

        match key {
            "=" | "Enter" => Some(Self::Equals),
            "c" | "C" | "Escape" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// Maps a keystroke script, one character per key, to events
///
/// Whitespace and unknown characters are skipped.
#[must_use]
pub fn parse_keys(script: &str, resources: &TextResources) -> Vec<InputEvent> {
    script
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .filter_map(|ch| {
            let key = ch.to_string();
            let event = InputEvent::from_key(&key, resources);
            if event.is_none() {
                tracing::debug!(key = %key, "ignored key");
            }
            event
        })
        .collect()
}
