//! Elementwise evaluation of expression trees over a sample grid.

use super::functions::{floor_mod, Function};
use super::{BinaryOp, Expr, UnaryOp};
use crate::error::FormulaError;

/// Result of evaluating a node: one entry per grid point.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numbers(Vec<f64>),
    Mask(Vec<bool>),
}

impl Value {
    pub fn into_numbers(self) -> Result<Vec<f64>, FormulaError> {
        match self {
            Value::Numbers(values) => Ok(values),
            Value::Mask(_) => Err(FormulaError::TypeMismatch {
                expected: "number",
                found: "condition",
            }),
        }
    }

    pub fn into_mask(self) -> Result<Vec<bool>, FormulaError> {
        match self {
            Value::Mask(mask) => Ok(mask),
            Value::Numbers(_) => Err(FormulaError::TypeMismatch {
                expected: "condition",
                found: "number",
            }),
        }
    }
}

fn zip_with(a: Vec<f64>, b: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    a.into_iter().zip(b).map(|(l, &r)| f(l, r)).collect()
}

fn compare(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> bool) -> Vec<bool> {
    a.iter().zip(b).map(|(&l, &r)| f(l, r)).collect()
}

pub fn evaluate(expr: &Expr, xs: &[f64]) -> Result<Value, FormulaError> {
    match expr {
        Expr::Number(value) => Ok(Value::Numbers(vec![*value; xs.len()])),
        Expr::Variable => Ok(Value::Numbers(xs.to_vec())),
        Expr::Unary(op, operand) => {
            let operand = evaluate(operand, xs)?;
            match op {
                UnaryOp::Neg => Ok(Value::Numbers(
                    operand.into_numbers()?.into_iter().map(|v| -v).collect(),
                )),
                UnaryOp::Plus => Ok(Value::Numbers(operand.into_numbers()?)),
                UnaryOp::Not => Ok(Value::Mask(
                    operand.into_mask()?.into_iter().map(|b| !b).collect(),
                )),
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs = evaluate(lhs, xs)?;
            let rhs = evaluate(rhs, xs)?;
            evaluate_binary(*op, lhs, rhs)
        }
        Expr::Call { name, function, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(evaluate(arg, xs)?.into_numbers()?);
            }
            match (function, values.as_slice()) {
                (Function::Unary(f), [a]) => Ok(Value::Numbers(a.iter().map(|&v| f(v)).collect())),
                (Function::Binary(f), [a, b]) => {
                    Ok(Value::Numbers(a.iter().zip(b).map(|(&l, &r)| f(l, r)).collect()))
                }
                _ => Err(FormulaError::Arity {
                    name: name.clone(),
                    expected: function.arity(),
                    found: values.len(),
                }),
            }
        }
        Expr::Where {
            condition,
            then,
            otherwise,
        } => {
            let mask = evaluate(condition, xs)?.into_mask()?;
            let then = evaluate(then, xs)?.into_numbers()?;
            let otherwise = evaluate(otherwise, xs)?.into_numbers()?;
            Ok(Value::Numbers(
                mask.iter()
                    .zip(then.iter().zip(&otherwise))
                    .map(|(&m, (&a, &b))| if m { a } else { b })
                    .collect(),
            ))
        }
    }
}

fn evaluate_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, FormulaError> {
    match op {
        BinaryOp::And | BinaryOp::Or => {
            let a = lhs.into_mask()?;
            let b = rhs.into_mask()?;
            let combined = a
                .into_iter()
                .zip(b)
                .map(|(l, r)| if op == BinaryOp::And { l && r } else { l || r })
                .collect();
            Ok(Value::Mask(combined))
        }
        BinaryOp::Less
        | BinaryOp::LessEq
        | BinaryOp::Greater
        | BinaryOp::GreaterEq
        | BinaryOp::Eq
        | BinaryOp::NotEq => {
            let a = lhs.into_numbers()?;
            let b = rhs.into_numbers()?;
            let mask = match op {
                BinaryOp::Less => compare(&a, &b, |l, r| l < r),
                BinaryOp::LessEq => compare(&a, &b, |l, r| l <= r),
                BinaryOp::Greater => compare(&a, &b, |l, r| l > r),
                BinaryOp::GreaterEq => compare(&a, &b, |l, r| l >= r),
                BinaryOp::Eq => compare(&a, &b, |l, r| l == r),
                _ => compare(&a, &b, |l, r| l != r),
            };
            Ok(Value::Mask(mask))
        }
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Pow => {
            let a = lhs.into_numbers()?;
            let b = rhs.into_numbers()?;
            let values = match op {
                BinaryOp::Add => zip_with(a, &b, |l, r| l + r),
                BinaryOp::Sub => zip_with(a, &b, |l, r| l - r),
                BinaryOp::Mul => zip_with(a, &b, |l, r| l * r),
                BinaryOp::Div => zip_with(a, &b, |l, r| l / r),
                BinaryOp::Mod => zip_with(a, &b, floor_mod),
                _ => zip_with(a, &b, f64::powf),
            };
            Ok(Value::Numbers(values))
        }
    }
}
