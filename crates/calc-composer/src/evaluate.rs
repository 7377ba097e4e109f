//! Equals handling: normalize, evaluate, format, reseed

use std::fmt;

use regex::{NoExpand, Regex, RegexBuilder};

use crate::builder::{CompositionState, ExpressionBuilder};
use crate::config::TextResources;
use crate::core::evaluator::Evaluator;
use crate::core::format::format_value;
use crate::core::{CalcError, CalcResult};

/// Rewrites keypad display glyphs into the engine's canonical text
///
/// Replaces every occurrence, case-insensitively, of the multiply and divide
/// display glyphs, and maps a non-`.` decimal separator back to `.`.
#[derive(Debug, Clone)]
pub struct GlyphNormalizer {
    rules: Vec<(Regex, String)>,
}

impl GlyphNormalizer {
    /// Compiles the substitution rules for a resource bundle
    pub fn new(resources: &TextResources) -> CalcResult<Self> {
        let mut rules = vec![
            Self::rule(&resources.multiply_display, &resources.multiply_canonical)?,
            Self::rule(&resources.divide_display, &resources.divide_canonical)?,
        ];
        if resources.dot_glyph != "." {
            rules.push(Self::rule(&resources.dot_glyph, ".")?);
        }
        Ok(Self { rules })
    }

    fn rule(display: &str, canonical: &str) -> CalcResult<(Regex, String)> {
        let pattern = RegexBuilder::new(&regex::escape(display))
            .case_insensitive(true)
            .build()
            .map_err(|e| CalcError::config(format!("bad glyph '{display}': {e}")))?;
        Ok((pattern, canonical.to_string()))
    }

    /// Returns the canonical form of `text`
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (pattern, canonical)| {
                pattern
                    .replace_all(&acc, NoExpand(canonical.as_str()))
                    .into_owned()
            })
    }
}

/// Display produced by one equals event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    /// Formatted numeric result
    Value(String),
    /// Canonical error text after an arithmetic failure
    Error(String),
}

impl EvaluationResult {
    /// The text to show as the result
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Value(text) | Self::Error(text) => text,
        }
    }

    /// Returns true for the error display
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Outcome of a successful equals event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// State to continue composing from
    pub state: CompositionState,
    /// Result display
    pub result: EvaluationResult,
}

/// Evaluates composed expressions against one resource bundle
#[derive(Debug, Clone)]
pub struct ResultEvaluator {
    resources: TextResources,
    normalizer: GlyphNormalizer,
    engine: Evaluator,
}

impl ResultEvaluator {
    /// Validates the resources and prepares the normalizer
    pub fn new(resources: TextResources) -> CalcResult<Self> {
        resources.validate()?;
        let normalizer = GlyphNormalizer::new(&resources)?;
        Ok(Self {
            resources,
            normalizer,
            engine: Evaluator::new(),
        })
    }

    /// The text resources in use
    #[must_use]
    pub const fn resources(&self) -> &TextResources {
        &self.resources
    }

    /// A builder sharing this evaluator's resources
    #[must_use]
    pub const fn builder(&self) -> ExpressionBuilder<'_> {
        ExpressionBuilder::new(&self.resources)
    }

    /// The glyph normalizer in use
    #[must_use]
    pub const fn normalizer(&self) -> &GlyphNormalizer {
        &self.normalizer
    }

    /// Evaluates the composed buffer
    ///
    /// Fails with [`CalcError::IncompleteExpression`] when the buffer is empty,
    /// ends in an operator or dot, or is flagged erroneous; the caller keeps its
    /// old state. Arithmetic failures become [`EvaluationResult::Error`] with a
    /// cleared, error-flagged state. Syntax failures propagate.
    pub fn evaluate(&self, state: &CompositionState) -> CalcResult<Evaluation> {
        if !state.is_complete() {
            tracing::debug!(buffer = state.buffer(), phase = ?state.phase(), "nothing to evaluate");
            return Err(CalcError::incomplete(
                &self.resources.incomplete_expression_text,
            ));
        }

        let canonical = self.normalizer.normalize(state.buffer());
        match self.engine.evaluate_str(&canonical) {
            Ok(value) => {
                let formatted = format_value(value, &self.resources.dot_glyph);
                tracing::debug!(expression = %canonical, result = %formatted, "evaluated");
                let seeded = self.builder().seed_with_result(&formatted);
                Ok(Evaluation {
                    state: seeded.state,
                    result: EvaluationResult::Value(formatted),
                })
            }
            Err(err) if err.is_arithmetic() => {
                tracing::warn!(expression = %canonical, error = %err, "arithmetic failure");
                Ok(Evaluation {
                    state: CompositionState::errored(),
                    result: EvaluationResult::Error(self.resources.error_text.clone()),
                })
            }
            Err(err) => {
                tracing::error!(expression = %canonical, error = %err, "expression rejected by engine");
                Err(err)
            }
        }
    }
}
