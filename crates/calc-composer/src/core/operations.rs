//! Binary arithmetic operations

use crate::core::{CalcError, CalcResult};

/// Type-safe operation enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Returns the canonical engine symbol
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Maps a canonical engine symbol back to its operation
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

}

/// Checked floating-point arithmetic
///
/// Every operation rejects non-finite outcomes so callers never format
/// infinity or NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arithmetic;

impl Arithmetic {
    /// Performs an operation on two operands
    pub fn apply(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_finite(a / b)
    }

    /// Accepts a literal operand only if it is finite
    ///
    /// Decimal literals too long for `f64` parse to infinity.
    pub fn operand(value: f64) -> CalcResult<f64> {
        Self::check_finite(value)
    }

    fn check_finite(result: f64) -> CalcResult<f64> {
        if result.is_nan() {
            Err(CalcError::InvalidResult("NaN".into()))
        } else if result.is_infinite() {
            Err(CalcError::Overflow)
        } else {
            Ok(result)
        }
    }
}
