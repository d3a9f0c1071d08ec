use crate::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

/// A compiled expression tree. Immutable once built; every interior node
/// exclusively owns its children, so the tree is finite and acyclic and
/// evaluation always terminates.
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Expression {
    Number(f64),
    /// Index into the caller-supplied argument vector. Both the named
    /// single-letter variables and `{N}` references compile to this.
    Arg(usize),
    Binary {
        lhs: Box<Expression>,
        op: Operator,
        rhs: Box<Expression>,
    },
    Negate(Box<Expression>),
}

impl Expression {
    /// Evaluate against an argument vector. A pure tree walk; the only
    /// failure modes are an out-of-range argument index and a zero divisor.
    pub fn eval(&self, args: &[f64]) -> Result<f64, EvalError> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Arg(index) => match args.get(*index) {
                Some(v) => Ok(*v),
                None => Err(EvalError::IndexOutOfRange {
                    index: *index,
                    supplied: args.len(),
                }),
            },
            Self::Binary { lhs, op, rhs } => {
                let lhs = lhs.eval(args)?;
                let rhs = rhs.eval(args)?;
                match op {
                    Operator::Add => Ok(lhs + rhs),
                    Operator::Sub => Ok(lhs - rhs),
                    Operator::Mul => Ok(lhs * rhs),
                    // f64 would happily produce an infinity here, but the
                    // engine's contract is a plain number or an error.
                    Operator::Div if rhs == 0.0 => Err(EvalError::DivisionByZero),
                    Operator::Div => Ok(lhs / rhs),
                }
            }
            Self::Negate(inner) => Ok(-inner.eval(args)?),
        }
    }
}
