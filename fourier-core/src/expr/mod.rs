//! # Formula Module
//!
//! A small, closed expression language for user-typed functions of `x`.
//! Formulas are parsed into an [`Expr`] tree and evaluated elementwise over
//! a whole sample grid at once. Only the free variable, a few constants and
//! a fixed whitelist of math functions can be named, so a formula can never
//! reach anything outside this module.
//!
//! ## Features
//! - Arithmetic, powers, floor modulo
//! - Comparisons producing boolean masks, combined with `&`, `|`, `~`
//! - `where(condition, a, b)` for elementwise selection
//! - `np.` prefixes accepted for formulas written in numpy style

mod eval;
mod functions;
mod lexer;
mod parser;

pub use eval::Value;
pub use functions::Function;

use crate::error::FormulaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    And,
    Or,
}

/// What an expression evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Condition,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::Condition => "condition",
        }
    }
}

/// A parsed formula.
#[derive(Debug, Clone)]
pub enum Expr {
    Number(f64),
    Variable,
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call {
        name: String,
        function: Function,
        args: Vec<Expr>,
    },
    /// Elementwise `condition ? then : otherwise`.
    Where {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    /// Parses formula text into an expression tree.
    ///
    /// # Errors
    /// * `FormulaError::Empty` for blank input
    /// * `FormulaError::Syntax` with the offending column
    /// * `FormulaError::UnknownName` for anything outside the whitelist
    pub fn parse(source: &str) -> Result<Expr, FormulaError> {
        let tokens = lexer::tokenize(source)?;
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }
        parser::Parser::new(tokens, source.chars().count()).parse()
    }

    /// Builds `where(condition, then, otherwise)` from already-parsed parts.
    pub fn select(condition: Expr, then: Expr, otherwise: Expr) -> Expr {
        Expr::Where {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// Infers what the expression produces without evaluating it.
    ///
    /// The language has no implicit conversions, so every type error can be
    /// found here before any grid is touched.
    pub fn check(&self) -> Result<ValueType, FormulaError> {
        fn require(expr: &Expr, wanted: ValueType) -> Result<(), FormulaError> {
            let found = expr.check()?;
            if found == wanted {
                Ok(())
            } else {
                Err(FormulaError::TypeMismatch {
                    expected: wanted.name(),
                    found: found.name(),
                })
            }
        }

        match self {
            Expr::Number(_) | Expr::Variable => Ok(ValueType::Number),
            Expr::Unary(UnaryOp::Not, operand) => {
                require(operand, ValueType::Condition)?;
                Ok(ValueType::Condition)
            }
            Expr::Unary(_, operand) => {
                require(operand, ValueType::Number)?;
                Ok(ValueType::Number)
            }
            Expr::Binary(op, lhs, rhs) => {
                let (operands, result) = match op {
                    BinaryOp::And | BinaryOp::Or => (ValueType::Condition, ValueType::Condition),
                    BinaryOp::Less
                    | BinaryOp::LessEq
                    | BinaryOp::Greater
                    | BinaryOp::GreaterEq
                    | BinaryOp::Eq
                    | BinaryOp::NotEq => (ValueType::Number, ValueType::Condition),
                    _ => (ValueType::Number, ValueType::Number),
                };
                require(lhs, operands)?;
                require(rhs, operands)?;
                Ok(result)
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    require(arg, ValueType::Number)?;
                }
                Ok(ValueType::Number)
            }
            Expr::Where {
                condition,
                then,
                otherwise,
            } => {
                require(condition, ValueType::Condition)?;
                require(then, ValueType::Number)?;
                require(otherwise, ValueType::Number)?;
                Ok(ValueType::Number)
            }
        }
    }

    /// Evaluates the expression at every grid point.
    pub fn eval(&self, xs: &[f64]) -> Result<Value, FormulaError> {
        eval::evaluate(self, xs)
    }

    /// Evaluates an expression that must produce numbers.
    pub fn eval_numbers(&self, xs: &[f64]) -> Result<Vec<f64>, FormulaError> {
        self.eval(xs)?.into_numbers()
    }

    /// Evaluates an expression that must produce a boolean mask.
    pub fn eval_mask(&self, xs: &[f64]) -> Result<Vec<bool>, FormulaError> {
        self.eval(xs)?.into_mask()
    }
}
