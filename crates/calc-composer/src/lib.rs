//! Calc Composer - incremental expression composer for keypad calculators
//!
//! A host keypad sends discrete events (digit, operator, dot, clear, equals)
//! and renders two strings back: the expression so far and the last result.
//! Adjacency rules keep the composed buffer evaluable, so equals only fails
//! when the expression is visibly unfinished.
//!
//! # Layers
//!
//! - **core**: tokenizer, parser and checked arithmetic over canonical text
//! - **builder**: the composition state machine
//! - **evaluate**: glyph normalization, evaluation, result formatting
//! - **session**: the five-event host interface
//!
//! # Example
//!
//! ```rust
//! use calc_composer::prelude::*;
//!
//! let mut session = Session::new(TextResources::default()).unwrap();
//! session.on_digit("3");
//! session.on_operator("×");
//! session.on_digit("4");
//! assert_eq!(session.expression(), "3×4");
//!
//! let result = session.on_equals().unwrap();
//! assert_eq!(result, EvaluationResult::Value("12".into()));
//!
//! // The result seeds the next expression
//! assert_eq!(session.on_digit("5"), "125");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod builder;
pub mod config;
pub mod core;
pub mod evaluate;
pub mod events;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::builder::{CompositionState, Edit, ExpressionBuilder, Phase};
    pub use crate::config::TextResources;
    pub use crate::core::{CalcError, CalcResult};
    pub use crate::evaluate::{Evaluation, EvaluationResult, GlyphNormalizer, ResultEvaluator};
    pub use crate::events::{parse_keys, InputEvent};
    pub use crate::session::{transition, DisplayOutput, Session};
}
