//! Tokenizer and recursive-descent parser for canonical expression text
//!
//! Input is expected after glyph normalization: ASCII digits, `.` as the
//! decimal point, `+ - * /` and parentheses.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary or unary operator
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => match Operation::from_char(ch) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => {
                    return Err(CalcError::syntax(format!("Unexpected character: '{ch}'")));
                }
            },
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::syntax(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('-' | '+') unary | primary
/// primary    ::= NUMBER | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into a single AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::syntax(format!(
                "Unexpected {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                Ok(AstNode::negate(self.parse_unary()?))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::syntax("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(*n)),
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(t) => Err(CalcError::syntax(format!("Expected ')' but found {t:?}"))),
                    None => Err(CalcError::syntax("Unclosed parenthesis")),
                }
            }
            _ => Err(CalcError::syntax(format!("Unexpected token: {token:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_decimal_forms() {
        assert_eq!(
            Tokenizer::new("3.25").tokenize().unwrap(),
            vec![Token::Number(3.25)]
        );
        assert_eq!(
            Tokenizer::new("5.").tokenize().unwrap(),
            vec![Token::Number(5.0)]
        );
        assert_eq!(
            Tokenizer::new(".5").tokenize().unwrap(),
            vec![Token::Number(0.5)]
        );
    }

    #[test]
    fn test_tokenize_operators_and_parens() {
        let tokens = Tokenizer::new("(1+2)*3/4-5").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                Token::Number(1.0),
                Token::Operator(Operation::Add),
                Token::Number(2.0),
                Token::RightParen,
                Token::Operator(Operation::Multiply),
                Token::Number(3.0),
                Token::Operator(Operation::Divide),
                Token::Number(4.0),
                Token::Operator(Operation::Subtract),
                Token::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_whitespace() {
        let tokens = Tokenizer::new("  7 +\t8 ").tokenize().unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_tokenize_rejects_display_glyph() {
        let err = Tokenizer::new("3×4").tokenize().unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains('×'));
    }

    #[test]
    fn test_tokenize_second_dot_starts_new_number() {
        // "1.2.3" lexes as 1.2 followed by .3; the parser rejects the pair
        let tokens = Tokenizer::new("1.2.3").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(1.2), Token::Number(0.3)]);
        assert!(Parser::new(tokens).parse().unwrap_err().is_syntax());
    }

    #[test]
    fn test_tokenize_lone_dot_is_invalid() {
        let err = Tokenizer::new(".").tokenize().unwrap_err();
        assert_eq!(err, CalcError::syntax("Invalid number: '.'"));
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_precedence() {
        let ast = Parser::parse_str("1+2*3").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(1.0),
                Operation::Add,
                AstNode::binary(AstNode::number(2.0), Operation::Multiply, AstNode::number(3.0)),
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        let ast = Parser::parse_str("8-3-2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::binary(AstNode::number(8.0), Operation::Subtract, AstNode::number(3.0)),
                Operation::Subtract,
                AstNode::number(2.0),
            )
        );
    }

    #[test]
    fn test_parse_parentheses_override_precedence() {
        let ast = Parser::parse_str("(1+2)*3").unwrap();
        assert!(matches!(
            ast,
            AstNode::BinaryOp {
                op: Operation::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_unary_minus_and_plus() {
        assert_eq!(
            Parser::parse_str("-4").unwrap(),
            AstNode::negate(AstNode::number(4.0))
        );
        assert_eq!(Parser::parse_str("+4").unwrap(), AstNode::number(4.0));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Parser::parse_str(""), Err(CalcError::EmptyExpression));
        assert_eq!(Parser::parse_str("   "), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_parse_trailing_operator() {
        let err = Parser::parse_str("3+").unwrap_err();
        assert_eq!(err, CalcError::syntax("Unexpected end of expression"));
    }

    #[test]
    fn test_parse_unbalanced_parentheses() {
        assert_eq!(
            Parser::parse_str("(1+2"),
            Err(CalcError::syntax("Unclosed parenthesis"))
        );
        assert!(Parser::parse_str("1+2)").unwrap_err().is_syntax());
        assert!(Parser::parse_str("()").unwrap_err().is_syntax());
    }

    #[test]
    fn test_parse_doubled_binary_operator() {
        assert!(Parser::parse_str("2**3").unwrap_err().is_syntax());
    }
}
