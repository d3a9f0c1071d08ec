mod expr;
mod parser;

pub(crate) use expr::Expression;
pub(crate) use parser::Parser;
