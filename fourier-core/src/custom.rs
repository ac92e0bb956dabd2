//! # Custom Function Module
//!
//! Turns user-entered formula text into a callable evaluated over a sample
//! grid. Custom mode parses one formula; piecewise mode nests each entry's
//! formula under its condition, falling through to the next entry, with the
//! last entry acting as the unconditional default.

use serde::{Deserialize, Serialize};

use crate::error::{FormulaError, PiecePart};
use crate::expr::{Expr, ValueType};

/// Most entries a piecewise function may have. Each entry nests the rest
/// one level deeper.
pub const MAX_PIECES: usize = 100;

/// One entry of a piecewise function: `formula` applies where `condition`
/// holds. The last entry's condition is never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub formula: String,
    pub condition: String,
}

impl Piece {
    pub fn new(formula: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            condition: condition.into(),
        }
    }
}

fn parse_typed(source: &str, wanted: ValueType) -> Result<Expr, FormulaError> {
    let expr = Expr::parse(source)?;
    let found = expr.check()?;
    if found != wanted {
        return Err(FormulaError::TypeMismatch {
            expected: wanted.name(),
            found: found.name(),
        });
    }
    Ok(expr)
}

/// A validated user function of `x`.
#[derive(Debug, Clone)]
pub struct UserFunction {
    expr: Expr,
}

impl UserFunction {
    /// Builds a function from a single formula.
    pub fn custom(formula: &str) -> Result<Self, FormulaError> {
        Ok(Self {
            expr: parse_typed(formula, ValueType::Number)?,
        })
    }

    /// Builds a function from an ordered list of pieces.
    ///
    /// Works from the last piece to the first: the default formula becomes
    /// the innermost expression, and each earlier piece wraps it as
    /// `where(condition, formula, rest)`.
    ///
    /// # Errors
    /// * `FormulaError::NoPieces` if `pieces` is empty
    /// * `FormulaError::TooManyPieces` above [`MAX_PIECES`]
    /// * `FormulaError::Piece` naming the 1-based entry and part that failed
    pub fn piecewise(pieces: &[Piece]) -> Result<Self, FormulaError> {
        if pieces.len() > MAX_PIECES {
            return Err(FormulaError::TooManyPieces(MAX_PIECES));
        }
        let (default, conditional) = pieces.split_last().ok_or(FormulaError::NoPieces)?;

        let mut expr = parse_typed(&default.formula, ValueType::Number)
            .map_err(|e| e.in_piece(pieces.len(), PiecePart::Formula))?;

        for (index, piece) in conditional.iter().enumerate().rev() {
            let number = index + 1;
            let formula = parse_typed(&piece.formula, ValueType::Number)
                .map_err(|e| e.in_piece(number, PiecePart::Formula))?;
            let condition = parse_typed(&piece.condition, ValueType::Condition)
                .map_err(|e| e.in_piece(number, PiecePart::Condition))?;
            expr = Expr::select(condition, formula, expr);
        }

        Ok(Self { expr })
    }

    /// Evaluates the function at every grid point.
    ///
    /// # Errors
    /// * `FormulaError::NonFinite` if any sample is NaN or infinite
    pub fn evaluate(&self, xs: &[f64]) -> Result<Vec<f64>, FormulaError> {
        let values = self.expr.eval_numbers(xs)?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FormulaError::NonFinite);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn custom_formula_evaluates_over_grid() {
        let f = UserFunction::custom("np.sin(2*x)").unwrap();
        let y = f.evaluate(&[0.0, PI / 4.0]).unwrap();
        assert!(y[0].abs() < 1e-12);
        assert!((y[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn custom_formula_must_be_numeric() {
        assert_eq!(
            UserFunction::custom("x < 1").unwrap_err(),
            FormulaError::TypeMismatch {
                expected: "number",
                found: "condition"
            }
        );
    }

    #[test]
    fn piecewise_selects_first_matching_piece() {
        let pieces = [Piece::new("x", "x < pi"), Piece::new("2*x", "x >= pi")];
        let f = UserFunction::piecewise(&pieces).unwrap();
        let y = f.evaluate(&[1.0, PI, 4.0]).unwrap();
        assert_eq!(y, vec![1.0, 2.0 * PI, 8.0]);
    }

    #[test]
    fn earlier_pieces_take_priority() {
        let pieces = [
            Piece::new("1", "x < 2"),
            Piece::new("2", "x < 4"),
            Piece::new("3", "ignored"),
        ];
        let f = UserFunction::piecewise(&pieces).unwrap();
        assert_eq!(f.evaluate(&[1.0, 3.0, 5.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn single_piece_is_its_own_default() {
        let f = UserFunction::piecewise(&[Piece::new("x + 1", "x < 1*np.pi")]).unwrap();
        assert_eq!(f.evaluate(&[0.0, 10.0]).unwrap(), vec![1.0, 11.0]);
    }

    #[test]
    fn piecewise_errors_name_the_piece() {
        let pieces = [Piece::new("x", "x < y"), Piece::new("2*x", "")];
        assert_eq!(
            UserFunction::piecewise(&pieces).unwrap_err(),
            FormulaError::UnknownName("y".into()).in_piece(1, PiecePart::Condition)
        );

        let pieces = [Piece::new("x", "x < 1"), Piece::new("foo(x)", "")];
        assert_eq!(
            UserFunction::piecewise(&pieces).unwrap_err(),
            FormulaError::UnknownName("foo".into()).in_piece(2, PiecePart::Formula)
        );
    }

    #[test]
    fn empty_piece_list_is_rejected() {
        assert_eq!(UserFunction::piecewise(&[]).unwrap_err(), FormulaError::NoPieces);
    }

    #[test]
    fn non_finite_samples_are_reported() {
        let f = UserFunction::custom("1/x").unwrap();
        assert_eq!(f.evaluate(&[0.0, 1.0]).unwrap_err(), FormulaError::NonFinite);
    }

    #[test]
    fn pathological_nesting_is_an_error_not_a_crash() {
        let parens = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(
            UserFunction::custom(&parens),
            Err(FormulaError::Syntax { .. })
        ));

        let negations = format!("{}x", "-".repeat(10_000));
        assert!(matches!(
            UserFunction::custom(&negations),
            Err(FormulaError::Syntax { .. })
        ));

        let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        let pieces = [Piece::new("0", "x < 1"), Piece::new(nested, "")];
        assert!(matches!(
            UserFunction::piecewise(&pieces),
            Err(FormulaError::Piece { index: 2, part: PiecePart::Formula, .. })
        ));
    }

    #[test]
    fn piece_count_is_bounded() {
        let pieces: Vec<Piece> = (1..=MAX_PIECES)
            .map(|k| Piece::new(k.to_string(), format!("x < {}", k)))
            .collect();
        let f = UserFunction::piecewise(&pieces).unwrap();
        assert_eq!(f.evaluate(&[0.5, 2.5]).unwrap(), vec![1.0, 3.0]);

        let mut too_many = pieces;
        too_many.push(Piece::new("0", ""));
        assert_eq!(
            UserFunction::piecewise(&too_many).unwrap_err(),
            FormulaError::TooManyPieces(MAX_PIECES)
        );
    }
}
