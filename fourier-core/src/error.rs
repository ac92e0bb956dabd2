//! # Error Module
//!
//! The two error kinds the simulator reports back to the presentation layer:
//! bad numeric input (terms, amplitude, period) and formulas that fail to
//! parse or evaluate. Neither is ever fatal.

/// A user-typed formula or condition that could not be turned into samples.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },
    #[error("unknown name '{0}'")]
    UnknownName(String),
    #[error("'{0}' is not a function")]
    NotAFunction(String),
    #[error("'{0}' is a function and needs arguments")]
    MissingCall(String),
    #[error("{name}() takes {expected} argument(s) but {found} were given")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("function produced non-finite values (division by zero or domain error?)")]
    NonFinite,
    #[error("piecewise function has no pieces")]
    NoPieces,
    #[error("piecewise function has more than {0} pieces")]
    TooManyPieces(usize),
    #[error("piece {index} {part}: {source}")]
    Piece {
        index: usize,
        part: PiecePart,
        #[source]
        source: Box<FormulaError>,
    },
}

/// Which half of a piecewise entry an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecePart {
    Formula,
    Condition,
}

impl std::fmt::Display for PiecePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PiecePart::Formula => write!(f, "formula"),
            PiecePart::Condition => write!(f, "condition"),
        }
    }
}

/// A form field that could not be parsed as the number it should hold.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("number of terms must be a non-negative integer, got '{0}'")]
    Terms(String),
    #[error("amplitude must be a finite number, got '{0}'")]
    Amplitude(String),
    #[error("period must be a positive number of π units, got '{0}'")]
    Period(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Error in function: {0}")]
    Formula(#[from] FormulaError),
}

impl FormulaError {
    /// Tags an error with the piecewise entry it belongs to (1-based).
    pub fn in_piece(self, index: usize, part: PiecePart) -> Self {
        FormulaError::Piece {
            index,
            part,
            source: Box::new(self),
        }
    }
}
