//! AST evaluator

use crate::core::parser::{AstNode, Parser};
use crate::core::{Arithmetic, CalcResult};

/// Evaluator for AST expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Arithmetic::operand(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate(inner)?),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                Arithmetic::apply(left_val, right_val, *op)
            }
        }
    }

    /// Parses and evaluates canonical expression text
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, Operation};

    // ===== AST evaluation tests =====

    #[test]
    fn test_evaluate_number() {
        assert_eq!(Evaluator::new().evaluate(&AstNode::number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_evaluate_oversized_literal_overflows() {
        let literal = "9".repeat(400);
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str(&literal), Err(CalcError::Overflow));
        assert_eq!(
            eval.evaluate_str(&format!("1+{literal}")),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_evaluate_double_negative() {
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(Evaluator::new().evaluate(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_nested() {
        // ((1 + 2) * (3 + 4)) = 21
        let ast = AstNode::binary(
            AstNode::binary(AstNode::number(1.0), Operation::Add, AstNode::number(2.0)),
            Operation::Multiply,
            AstNode::binary(AstNode::number(3.0), Operation::Add, AstNode::number(4.0)),
        );
        assert_eq!(Evaluator::new().evaluate(&ast), Ok(21.0));
    }

    // ===== String evaluation tests =====

    #[test]
    fn test_evaluate_str_standard_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3*4"), Ok(14.0));
        assert_eq!(eval.evaluate_str("(2+3)*4"), Ok(20.0));
        assert_eq!(eval.evaluate_str("10-4/2"), Ok(8.0));
        assert_eq!(eval.evaluate_str("-5+10"), Ok(5.0));
    }

    #[test]
    fn test_evaluate_str_fractional() {
        assert_eq!(Evaluator::new().evaluate_str("5/2"), Ok(2.5));
    }

    #[test]
    fn test_evaluate_str_division_by_zero_nested() {
        assert_eq!(
            Evaluator::new().evaluate_str("1+8/(2-2)"),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluate_str_propagates_syntax() {
        let err = Evaluator::new().evaluate_str("4*(").unwrap_err();
        assert!(err.is_syntax());
    }
}
