//! The whitelist of names a formula may reference.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::f64::consts::{E, PI};

/// How a whitelisted function is applied to its arguments.
#[derive(Debug, Clone, Copy)]
pub enum Function {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    /// `where(condition, a, b)`: elementwise selection.
    Where,
}

impl Function {
    pub fn arity(self) -> usize {
        match self {
            Function::Unary(_) => 1,
            Function::Binary(..) => 2,
            Function::Where => 3,
        }
    }
}

/// Namespaces accepted (and ignored) in front of a name, e.g. `np.sin`.
pub const NAMESPACES: [&str; 3] = ["np", "numpy", "math"];

/// Name of the free variable.
pub const VARIABLE: &str = "x";

/// Sign with `sign(0) = 0`, unlike `f64::signum`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        v
    }
}

/// Modulo whose result takes the sign of the divisor.
pub fn floor_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
}

static FUNCTIONS: Lazy<BTreeMap<&'static str, Function>> = Lazy::new(|| {
    let unary: [(&'static str, fn(f64) -> f64); 22] = [
        ("sin", f64::sin),
        ("cos", f64::cos),
        ("tan", f64::tan),
        ("arcsin", f64::asin),
        ("asin", f64::asin),
        ("arccos", f64::acos),
        ("acos", f64::acos),
        ("arctan", f64::atan),
        ("atan", f64::atan),
        ("sinh", f64::sinh),
        ("cosh", f64::cosh),
        ("tanh", f64::tanh),
        ("exp", f64::exp),
        ("log", f64::ln),
        ("log10", f64::log10),
        ("log2", f64::log2),
        ("sqrt", f64::sqrt),
        ("abs", f64::abs),
        ("fabs", f64::abs),
        ("sign", sign),
        ("floor", f64::floor),
        ("ceil", f64::ceil),
    ];
    let binary: [(&'static str, fn(f64, f64) -> f64); 8] = [
        ("power", f64::powf),
        ("pow", f64::powf),
        ("arctan2", f64::atan2),
        ("atan2", f64::atan2),
        ("minimum", f64::min),
        ("maximum", f64::max),
        ("mod", floor_mod),
        ("fmod", |a, b| a % b),
    ];

    let mut table = BTreeMap::new();
    for (name, f) in unary {
        table.insert(name, Function::Unary(f));
    }
    for (name, f) in binary {
        table.insert(name, Function::Binary(f));
    }
    table.insert("where", Function::Where);
    table
});

/// Looks up a whitelisted function by its bare name.
pub fn function(name: &str) -> Option<Function> {
    FUNCTIONS.get(name).copied()
}

/// Looks up a named constant by its bare name.
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "π" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

/// Strips an accepted namespace prefix; `None` if the prefix is not allowed.
pub fn bare_name(name: &str) -> Option<&str> {
    match name.split_once('.') {
        None => Some(name),
        Some((namespace, rest)) if NAMESPACES.contains(&namespace) && !rest.contains('.') => {
            Some(rest)
        }
        Some(_) => None,
    }
}
