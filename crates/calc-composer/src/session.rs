//! The five-event host interface
//!
//! [`transition`] is the pure step `(state, event) -> (state, output)`.
//! [`Session`] owns one [`CompositionState`] together with the two strings a
//! host renders: the expression so far and the last result. A session is
//! single-owner; a concurrent host must serialize access to it.

use crate::builder::{CompositionState, Edit};
use crate::config::TextResources;
use crate::core::{CalcError, CalcResult};
use crate::evaluate::{Evaluation, EvaluationResult, ResultEvaluator};
use crate::events::{parse_keys, InputEvent};

/// What a single event asks the host to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOutput {
    /// New text for the expression display
    Expression(String),
    /// New text for the result display
    Result(EvaluationResult),
}

/// Applies one event to a state without mutating it
///
/// Only [`InputEvent::Equals`] can fail; on failure the caller keeps `state`.
pub fn transition(
    state: &CompositionState,
    event: &InputEvent,
    evaluator: &ResultEvaluator,
) -> CalcResult<(CompositionState, DisplayOutput)> {
    let builder = evaluator.builder();
    let edit = match event {
        InputEvent::Digit(token) => builder.append_digit(state, token),
        InputEvent::Operator(symbol) => builder.append_operator(state, symbol),
        InputEvent::Dot => builder.append_dot(state),
        InputEvent::Clear => builder.clear(),
        InputEvent::Equals => {
            let Evaluation { state, result } = evaluator.evaluate(state)?;
            return Ok((state, DisplayOutput::Result(result)));
        }
    };
    Ok((edit.state, DisplayOutput::Expression(edit.display)))
}

/// An interactive composition session
#[derive(Debug, Clone)]
pub struct Session {
    evaluator: ResultEvaluator,
    state: CompositionState,
    expression: String,
    result: Option<EvaluationResult>,
}

impl Session {
    /// Starts a session; fails if the resources are unusable
    pub fn new(resources: TextResources) -> CalcResult<Self> {
        let evaluator = ResultEvaluator::new(resources)?;
        let expression = evaluator.resources().zero_text.clone();
        Ok(Self {
            evaluator,
            state: CompositionState::new(),
            expression,
            result: None,
        })
    }

    /// The current composition state
    #[must_use]
    pub const fn state(&self) -> &CompositionState {
        &self.state
    }

    /// The text resources in use
    #[must_use]
    pub const fn resources(&self) -> &TextResources {
        self.evaluator.resources()
    }

    /// The expression display
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The last evaluation result, if any since the last clear
    #[must_use]
    pub const fn result(&self) -> Option<&EvaluationResult> {
        self.result.as_ref()
    }

    /// The result display, empty when there is no result
    #[must_use]
    pub fn result_display(&self) -> &str {
        self.result.as_ref().map_or("", EvaluationResult::display)
    }

    fn commit(&mut self, edit: Edit) -> &str {
        self.state = edit.state;
        self.expression = edit.display;
        &self.expression
    }

    /// Digit key: returns the expression display
    pub fn on_digit(&mut self, token: &str) -> &str {
        let edit = self.evaluator.builder().append_digit(&self.state, token);
        self.commit(edit)
    }

    /// Operator key: returns the expression display
    pub fn on_operator(&mut self, symbol: &str) -> &str {
        let edit = self.evaluator.builder().append_operator(&self.state, symbol);
        self.commit(edit)
    }

    /// Dot key: returns the expression display
    pub fn on_dot(&mut self) -> &str {
        let edit = self.evaluator.builder().append_dot(&self.state);
        self.commit(edit)
    }

    /// Clear key: returns the zero text and drops the result display
    pub fn on_clear(&mut self) -> &str {
        let edit = self.evaluator.builder().clear();
        self.result = None;
        self.commit(edit)
    }

    /// Equals key: returns the new result display
    ///
    /// The expression display is left as typed until the next edit. On failure
    /// the state and both displays are untouched.
    pub fn on_equals(&mut self) -> CalcResult<EvaluationResult> {
        let Evaluation { state, result } = self.evaluator.evaluate(&self.state)?;
        self.state = state;
        self.result = Some(result.clone());
        Ok(result)
    }

    /// Dispatches one event to its handler
    pub fn apply(&mut self, event: &InputEvent) -> CalcResult<DisplayOutput> {
        let text = match event {
            InputEvent::Digit(token) => self.on_digit(token),
            InputEvent::Operator(symbol) => self.on_operator(symbol),
            InputEvent::Dot => self.on_dot(),
            InputEvent::Clear => self.on_clear(),
            InputEvent::Equals => return self.on_equals().map(DisplayOutput::Result),
        };
        Ok(DisplayOutput::Expression(text.to_string()))
    }

    /// Feeds a keystroke script through the session
    ///
    /// An equals with nothing to evaluate is logged and skipped, as a keypad
    /// host would; every other failure stops the script.
    pub fn press_keys(&mut self, script: &str) -> CalcResult<()> {
        let events = parse_keys(script, self.resources());
        for event in &events {
            match self.apply(event) {
                Ok(_) => {}
                Err(CalcError::IncompleteExpression { message }) => {
                    tracing::warn!(expression = %self.expression, "{message}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}
