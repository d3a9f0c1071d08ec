use std::fmt;

/// The source text is not a valid expression. Raised during compilation,
/// never while evaluating an already-compiled tree.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    /// Byte offset of the cursor when the failure was detected.
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error parsing expression: {} at position {}",
            self.message, self.position
        )
    }
}

impl std::error::Error for ParseError {}

/// A valid tree failed to evaluate against the supplied argument vector.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EvalError {
    /// A variable referenced an index past the end of the argument vector.
    IndexOutOfRange {
        /// The index the expression asked for.
        index: usize,
        /// How many arguments the caller supplied.
        supplied: usize,
    },
    /// The right-hand side of a division evaluated to zero.
    DivisionByZero,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, supplied } => write!(
                f,
                "argument index {index} is out of range, {supplied} argument(s) supplied"
            ),
            Self::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Either failure mode of [`Engine::evaluate`](crate::Engine::evaluate).
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => e.fmt(f),
            Self::Eval(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;
