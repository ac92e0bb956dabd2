//! Recursive-descent parser for the formula language.
//!
//! Precedence, lowest first:
//! `|`, `&`, comparisons, `+ -`, `* / %`, unary `- + ~`, `**`.
//! Comparisons may be chained (`0 < x < pi`), meaning the conjunction of
//! each adjacent pair.

use super::functions::{self, Function};
use super::lexer::{Spanned, Token};
use super::{BinaryOp, Expr, UnaryOp};
use crate::error::FormulaError;

/// Deepest nesting of parentheses, calls and unary operators accepted.
pub const MAX_NESTING: usize = 64;
/// Longest formula accepted, in tokens. Operator chains are built in loops,
/// so this is what bounds the height of the tree.
pub const MAX_TOKENS: usize = 1000;

pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    /// Column reported for errors at the end of input.
    end_column: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            end_column: source_len + 1,
        }
    }

    pub fn parse(mut self) -> Result<Expr, FormulaError> {
        if let Some(spanned) = self.tokens.get(MAX_TOKENS) {
            return Err(FormulaError::Syntax {
                column: spanned.column,
                message: format!("formula is too long (more than {} tokens)", MAX_TOKENS),
            });
        }
        let expr = self.parse_or()?;
        match self.tokens.get(self.pos) {
            None => Ok(expr),
            Some(spanned) => Err(FormulaError::Syntax {
                column: spanned.column,
                message: format!("unexpected {}", spanned.token.describe()),
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn column(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.end_column, |s| s.column)
    }

    fn error(&self, message: impl Into<String>) -> FormulaError {
        FormulaError::Syntax {
            column: self.column(),
            message: message.into(),
        }
    }

    /// Enters one nesting level; the caller decrements `depth` on the way out.
    fn nest(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error("formula is nested too deeply"));
        }
        Ok(())
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|s| s.token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), FormulaError> {
        match self.peek() {
            Some(token) if *token == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(self.error(format!(
                "expected {} but found {}",
                expected.describe(),
                token.describe()
            ))),
            None => Err(self.error(format!(
                "expected {} but the formula ended",
                expected.describe()
            ))),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_comparison()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.parse_comparison()?;
            lhs = Expr::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn comparison_op(&self) -> Option<BinaryOp> {
        match self.peek()? {
            Token::Less => Some(BinaryOp::Less),
            Token::LessEq => Some(BinaryOp::LessEq),
            Token::Greater => Some(BinaryOp::Greater),
            Token::GreaterEq => Some(BinaryOp::GreaterEq),
            Token::EqEq => Some(BinaryOp::Eq),
            Token::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, FormulaError> {
        let first = self.parse_additive()?;
        let mut left = first.clone();
        let mut chain: Option<Expr> = None;

        while let Some(op) = self.comparison_op() {
            self.pos += 1;
            let right = self.parse_additive()?;
            let link = Expr::Binary(op, Box::new(left), Box::new(right.clone()));
            chain = Some(match chain {
                None => link,
                Some(prev) => Expr::Binary(BinaryOp::And, Box::new(prev), Box::new(link)),
            });
            left = right;
        }

        Ok(chain.unwrap_or(first))
    }

    fn parse_additive(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, FormulaError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Not) => UnaryOp::Not,
            _ => return self.parse_power(),
        };
        self.pos += 1;
        self.nest()?;
        let operand = self.parse_unary()?;
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn parse_power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.parse_primary()?;
        if self.peek() == Some(&Token::Power) {
            self.pos += 1;
            // Right-associative, and the exponent may carry its own sign.
            self.nest()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, FormulaError> {
        let column = self.column();
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                self.nest()?;
                let inner = self.parse_or()?;
                self.expect(Token::RParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            Some(Token::Name(name)) => self.parse_name(name),
            Some(other) => Err(FormulaError::Syntax {
                column,
                message: format!("unexpected {}", other.describe()),
            }),
            None => Err(self.error("unexpected end of formula")),
        }
    }

    fn parse_name(&mut self, name: String) -> Result<Expr, FormulaError> {
        let bare = functions::bare_name(&name)
            .ok_or_else(|| FormulaError::UnknownName(name.clone()))?;
        let is_call = self.peek() == Some(&Token::LParen);

        if let Some(function) = functions::function(bare) {
            if !is_call {
                return Err(FormulaError::MissingCall(name));
            }
            self.pos += 1;
            self.nest()?;
            let args = self.parse_arguments()?;
            self.depth -= 1;
            let arity_error = |found: usize| FormulaError::Arity {
                name: bare.to_string(),
                expected: function.arity(),
                found,
            };
            if args.len() != function.arity() {
                return Err(arity_error(args.len()));
            }
            return match function {
                Function::Where => {
                    let found = args.len();
                    let [condition, then, otherwise] =
                        <[Expr; 3]>::try_from(args).map_err(|_| arity_error(found))?;
                    Ok(Expr::select(condition, then, otherwise))
                }
                _ => Ok(Expr::Call {
                    name: bare.to_string(),
                    function,
                    args,
                }),
            };
        }

        let value = if bare == functions::VARIABLE {
            Expr::Variable
        } else if let Some(constant) = functions::constant(bare) {
            Expr::Number(constant)
        } else {
            return Err(FormulaError::UnknownName(name));
        };

        if is_call {
            return Err(FormulaError::NotAFunction(name));
        }
        Ok(value)
    }

    /// Parses a comma-separated argument list after the opening parenthesis.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, FormulaError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.parse_or()?);
            match self.peek() {
                Some(Token::Comma) => self.pos += 1,
                _ => {
                    self.expect(Token::RParen)?;
                    return Ok(args);
                }
            }
        }
    }
}
