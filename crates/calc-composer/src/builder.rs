//! Incremental expression composition
//!
//! [`CompositionState`] is the buffer plus three adjacency flags.
//! [`ExpressionBuilder`] applies one edit at a time and hands back a fresh
//! state; a rejected edit returns the state unchanged.
//!
//! Adjacency rules:
//! - a digit is always accepted and clears the error flag
//! - an operator needs a preceding digit, a non-empty buffer and no error
//! - a dot needs the same, and no dot already in the current number

use crate::config::TextResources;

/// Phase of the composition state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing composed yet
    Empty,
    /// Last token was a digit (or a seeded result)
    HasDigit,
    /// Last token was the decimal separator
    HasDot,
    /// Last token was an operator
    AwaitOperand,
    /// The previous evaluation failed arithmetically
    Error,
}

/// The in-progress expression and its adjacency flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionState {
    buffer: String,
    last_token_was_digit: bool,
    last_token_was_dot: bool,
    in_error_state: bool,
}

impl Default for CompositionState {
    fn default() -> Self {
        Self::cleared()
    }
}

impl CompositionState {
    /// Creates the session-start state, identical to a cleared one
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cleared() -> Self {
        Self {
            buffer: String::new(),
            last_token_was_digit: true,
            last_token_was_dot: false,
            in_error_state: false,
        }
    }

    /// State after an arithmetic failure: empty, flagged, awaiting a digit
    pub(crate) fn errored() -> Self {
        Self {
            buffer: String::new(),
            last_token_was_digit: false,
            last_token_was_dot: false,
            in_error_state: true,
        }
    }

    /// The composed expression text
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns true if nothing has been composed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns true if the last token belongs to the digit class
    #[must_use]
    pub const fn last_token_was_digit(&self) -> bool {
        self.last_token_was_digit
    }

    /// Returns true if the current number already holds a decimal separator
    #[must_use]
    pub const fn last_token_was_dot(&self) -> bool {
        self.last_token_was_dot
    }

    /// Returns true after an arithmetic failure until the next digit
    #[must_use]
    pub const fn in_error_state(&self) -> bool {
        self.in_error_state
    }

    /// Returns true if equals may be evaluated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.last_token_was_digit && !self.in_error_state && !self.buffer.is_empty()
    }

    fn accepts_operator(&self) -> bool {
        self.is_complete()
    }

    fn accepts_dot(&self) -> bool {
        self.is_complete() && !self.last_token_was_dot
    }

    /// Classifies the state into its state-machine phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.in_error_state {
            Phase::Error
        } else if self.buffer.is_empty() {
            Phase::Empty
        } else if self.last_token_was_digit {
            Phase::HasDigit
        } else if self.last_token_was_dot {
            Phase::HasDot
        } else {
            Phase::AwaitOperand
        }
    }
}

/// Outcome of one builder operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// State after the operation
    pub state: CompositionState,
    /// Expression text to display
    pub display: String,
    /// False when the event was silently dropped
    pub accepted: bool,
}

impl Edit {
    fn accepted(state: CompositionState) -> Self {
        let display = state.buffer.clone();
        Self {
            state,
            display,
            accepted: true,
        }
    }

    fn rejected(state: &CompositionState) -> Self {
        Self {
            state: state.clone(),
            display: state.buffer.clone(),
            accepted: false,
        }
    }
}

/// Applies composition events to a [`CompositionState`]
#[derive(Debug, Clone, Copy)]
pub struct ExpressionBuilder<'r> {
    resources: &'r TextResources,
}

impl<'r> ExpressionBuilder<'r> {
    /// Creates a builder over the given text resources
    #[must_use]
    pub const fn new(resources: &'r TextResources) -> Self {
        Self { resources }
    }

    /// The text resources in use
    #[must_use]
    pub const fn resources(&self) -> &'r TextResources {
        self.resources
    }

    /// Appends a digit token; always accepted
    #[must_use]
    pub fn append_digit(&self, state: &CompositionState, token: &str) -> Edit {
        let mut next = state.clone();
        next.buffer.push_str(token);
        next.in_error_state = false;
        next.last_token_was_digit = true;
        tracing::trace!(token, buffer = %next.buffer, "digit appended");
        Edit::accepted(next)
    }

    /// Appends an operator symbol after a digit; dropped otherwise
    #[must_use]
    pub fn append_operator(&self, state: &CompositionState, symbol: &str) -> Edit {
        if !state.accepts_operator() {
            tracing::debug!(symbol, phase = ?state.phase(), "operator rejected");
            return Edit::rejected(state);
        }
        let mut next = state.clone();
        next.last_token_was_digit = false;
        next.last_token_was_dot = false;
        next.buffer.push_str(symbol);
        tracing::trace!(symbol, buffer = %next.buffer, "operator appended");
        Edit::accepted(next)
    }

    /// Appends the decimal separator once per number; dropped otherwise
    #[must_use]
    pub fn append_dot(&self, state: &CompositionState) -> Edit {
        if !state.accepts_dot() {
            tracing::debug!(phase = ?state.phase(), "dot rejected");
            return Edit::rejected(state);
        }
        let mut next = state.clone();
        next.buffer.push_str(&self.resources.dot_glyph);
        next.last_token_was_digit = false;
        next.last_token_was_dot = true;
        tracing::trace!(buffer = %next.buffer, "dot appended");
        Edit::accepted(next)
    }

    /// Empties the buffer and resets every flag
    ///
    /// The display is the zero text rather than the (empty) buffer.
    #[must_use]
    pub fn clear(&self) -> Edit {
        Edit {
            state: CompositionState::cleared(),
            display: self.resources.zero_text.clone(),
            accepted: true,
        }
    }

    /// Starts a new composition from trusted text, usually a result
    ///
    /// Text holding the decimal separator marks the number as dotted, so
    /// digits may continue its fraction but another dot may not follow.
    #[must_use]
    pub fn seed_with_result(&self, text: &str) -> Edit {
        let mut next = CompositionState::cleared();
        next.buffer.push_str(text);
        if text.contains(self.resources.dot_glyph.as_str()) {
            next.last_token_was_dot = true;
        }
        Edit::accepted(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(builder: &ExpressionBuilder<'_>, keys: &[&str]) -> CompositionState {
        keys.iter().fold(CompositionState::new(), |state, key| match *key {
            "." => builder.append_dot(&state).state,
            "+" | "-" | "×" | "÷" => builder.append_operator(&state, key).state,
            digit => builder.append_digit(&state, digit).state,
        })
    }

    // ===== Initial state tests =====

    #[test]
    fn test_new_state_matches_cleared() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        assert_eq!(CompositionState::new(), builder.clear().state);
        assert_eq!(CompositionState::new().phase(), Phase::Empty);
    }

    // ===== Digit tests =====

    #[test]
    fn test_digits_concatenate() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["1", "2", "3"]);
        assert_eq!(state.buffer(), "123");
        assert_eq!(state.phase(), Phase::HasDigit);
    }

    #[test]
    fn test_digit_returns_buffer() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let edit = builder.append_digit(&CompositionState::new(), "7");
        assert!(edit.accepted);
        assert_eq!(edit.display, "7");
    }

    #[test]
    fn test_digit_clears_error_flag() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let edit = builder.append_digit(&CompositionState::errored(), "4");
        assert!(!edit.state.in_error_state());
        assert!(edit.state.last_token_was_digit());
        assert_eq!(edit.state.buffer(), "4");
    }

    #[test]
    fn test_digit_keeps_dot_flag() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["1", ".", "5"]);
        assert!(state.last_token_was_dot());
        assert!(state.last_token_was_digit());
        assert_eq!(state.buffer(), "1.5");
    }

    // ===== Operator tests =====

    #[test]
    fn test_operator_after_digit() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["3", "+"]);
        assert_eq!(state.buffer(), "3+");
        assert_eq!(state.phase(), Phase::AwaitOperand);
    }

    #[test]
    fn test_operator_rejected_at_start() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let start = CompositionState::new();
        let edit = builder.append_operator(&start, "+");
        assert!(!edit.accepted);
        assert_eq!(edit.state, start);
        assert_eq!(edit.display, "");
    }

    #[test]
    fn test_operator_rejected_after_operator() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["3", "+"]);
        let edit = builder.append_operator(&state, "×");
        assert!(!edit.accepted);
        assert_eq!(edit.display, "3+");
    }

    #[test]
    fn test_operator_rejected_after_dot() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["3", "."]);
        assert_eq!(builder.append_operator(&state, "+").state, state);
    }

    #[test]
    fn test_operator_rejected_in_error_state() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let edit = builder.append_operator(&CompositionState::errored(), "+");
        assert!(!edit.accepted);
    }

    #[test]
    fn test_operator_resets_dot_flag() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["1", ".", "5", "+", "2", "."]);
        assert_eq!(state.buffer(), "1.5+2.");
    }

    // ===== Dot tests =====

    #[test]
    fn test_dot_once_per_number() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["1", ".", "2", ".", "3"]);
        assert_eq!(state.buffer(), "1.23");
    }

    #[test]
    fn test_dot_rejected_at_start() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        assert!(!builder.append_dot(&CompositionState::new()).accepted);
    }

    #[test]
    fn test_dot_uses_configured_glyph() {
        let resources = TextResources {
            dot_glyph: ",".into(),
            ..TextResources::default()
        };
        let builder = ExpressionBuilder::new(&resources);
        let state = compose(&builder, &["4", "."]);
        assert_eq!(state.buffer(), "4,");
        assert_eq!(state.phase(), Phase::HasDot);
    }

    // ===== Clear tests =====

    #[test]
    fn test_clear_displays_zero_text() {
        let resources = TextResources {
            zero_text: "0.".into(),
            ..TextResources::default()
        };
        let builder = ExpressionBuilder::new(&resources);
        let edit = builder.clear();
        assert_eq!(edit.display, "0.");
        assert!(edit.state.is_empty());
        assert!(edit.state.last_token_was_digit());
        assert!(!edit.state.last_token_was_dot());
        assert!(!edit.state.in_error_state());
    }

    #[test]
    fn test_cleared_state_still_rejects_operator() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let cleared = builder.clear().state;
        assert!(!builder.append_operator(&cleared, "+").accepted);
        assert!(!builder.append_dot(&cleared).accepted);
    }

    // ===== Seeding tests =====

    #[test]
    fn test_seed_integral_result() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let edit = builder.seed_with_result("4");
        assert_eq!(edit.display, "4");
        assert!(edit.state.last_token_was_digit());
        assert!(!edit.state.last_token_was_dot());
        assert_eq!(builder.append_digit(&edit.state, "5").display, "45");
    }

    #[test]
    fn test_seed_fractional_result_blocks_second_dot() {
        let resources = TextResources::default();
        let builder = ExpressionBuilder::new(&resources);
        let seeded = builder.seed_with_result("2.5").state;
        assert!(seeded.last_token_was_dot());
        assert!(!builder.append_dot(&seeded).accepted);
        let continued = builder.append_digit(&seeded, "5").state;
        assert_eq!(continued.buffer(), "2.55");
        assert_eq!(builder.append_operator(&continued, "+").display, "2.55+");
    }
}
