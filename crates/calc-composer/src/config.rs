//! Host-supplied text resources
//!
//! Every glyph and message the composer shows or recognizes comes from a
//! [`TextResources`] bundle, so the core never looks anything up at runtime.
//! Bundles load from YAML; omitted keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Operation};

/// Characters the engine reserves; display glyphs may not use them
const ENGINE_RESERVED: &[char] = &['+', '-', '*', '/', '(', ')', '.'];

/// Configuration bundle of display strings and glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextResources {
    /// Shown as the expression after a clear
    pub zero_text: String,
    /// Decimal separator appended by the dot key
    pub dot_glyph: String,
    /// Multiply glyph understood by the engine
    pub multiply_canonical: String,
    /// Multiply glyph shown on the keypad
    pub multiply_display: String,
    /// Divide glyph understood by the engine
    pub divide_canonical: String,
    /// Divide glyph shown on the keypad
    pub divide_display: String,
    /// Result text after an arithmetic failure
    pub error_text: String,
    /// Message carried by an incomplete-expression failure
    pub incomplete_expression_text: String,
}

impl Default for TextResources {
    fn default() -> Self {
        Self {
            zero_text: "0".to_string(),
            dot_glyph: ".".to_string(),
            multiply_canonical: Operation::Multiply.symbol().to_string(),
            multiply_display: "×".to_string(),
            divide_canonical: Operation::Divide.symbol().to_string(),
            divide_display: "÷".to_string(),
            error_text: "Error".to_string(),
            incomplete_expression_text: "Incomplete expression".to_string(),
        }
    }
}

impl TextResources {
    /// Parses and validates a YAML bundle
    pub fn from_yaml(yaml: &str) -> CalcResult<Self> {
        let resources: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| CalcError::config(format!("invalid text resources: {e}")))?;
        resources.validate()?;
        Ok(resources)
    }

    /// Loads and validates a YAML bundle from disk
    pub fn from_yaml_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| CalcError::config(format!("cannot read {}: {e}", path.display())))?;
        let resources = Self::from_yaml(&yaml)?;
        tracing::debug!(path = %path.display(), "loaded text resources");
        Ok(resources)
    }

    /// Serializes the bundle to YAML
    pub fn to_yaml(&self) -> CalcResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| CalcError::config(e.to_string()))
    }

    /// Checks that the bundle can drive the composer
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("zero_text", &self.zero_text),
            ("dot_glyph", &self.dot_glyph),
            ("multiply_canonical", &self.multiply_canonical),
            ("multiply_display", &self.multiply_display),
            ("divide_canonical", &self.divide_canonical),
            ("divide_display", &self.divide_display),
            ("error_text", &self.error_text),
            ("incomplete_expression_text", &self.incomplete_expression_text),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(CalcError::config(format!("{name} must not be empty")));
        }

        if self.multiply_canonical != Operation::Multiply.symbol() {
            return Err(CalcError::config(format!(
                "multiply_canonical must be '{}', got '{}'",
                Operation::Multiply.symbol(),
                self.multiply_canonical
            )));
        }
        if self.divide_canonical != Operation::Divide.symbol() {
            return Err(CalcError::config(format!(
                "divide_canonical must be '{}', got '{}'",
                Operation::Divide.symbol(),
                self.divide_canonical
            )));
        }

        if self.dot_glyph != "." && Self::uses_engine_text(&self.dot_glyph) {
            return Err(CalcError::config(format!(
                "dot_glyph '{}' collides with a digit or operator",
                self.dot_glyph
            )));
        }
        for (name, display, canonical) in [
            ("multiply_display", &self.multiply_display, &self.multiply_canonical),
            ("divide_display", &self.divide_display, &self.divide_canonical),
        ] {
            if display != canonical && Self::uses_engine_text(display) {
                return Err(CalcError::config(format!(
                    "{name} '{display}' collides with a digit or engine symbol"
                )));
            }
        }
        if self.multiply_display.to_lowercase() == self.divide_display.to_lowercase() {
            return Err(CalcError::config(format!(
                "multiply_display and divide_display are both '{}'",
                self.multiply_display
            )));
        }
        let dot = self.dot_glyph.to_lowercase();
        if dot == self.multiply_display.to_lowercase() || dot == self.divide_display.to_lowercase()
        {
            return Err(CalcError::config(format!(
                "dot_glyph '{}' collides with an operator display glyph",
                self.dot_glyph
            )));
        }

        Ok(())
    }

    fn uses_engine_text(glyph: &str) -> bool {
        glyph
            .chars()
            .any(|c| c.is_ascii_digit() || ENGINE_RESERVED.contains(&c))
    }
}
