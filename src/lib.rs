//! A small arithmetic expression engine for data-binding hosts.
//!
//! Expressions over `+`, `-`, `*`, and `/` are parsed from a string at
//! runtime, compiled once into a tree, and evaluated against an ordered
//! argument vector. The first four arguments can be referenced by the letters
//! `x`, `y`, `z`, `t` (or `a`, `b`, `c`, `d`); any argument can be referenced
//! positionally as `{0}`, `{1}`, ... Compiled trees are cached by source
//! text, so evaluating the same expression on every refresh does not re-parse
//! it.
//!
//! ```
//! let engine = mathexpr::Engine::new();
//! assert_eq!(engine.evaluate("(x + y) / 2", &[3.0, 5.0]), Ok(4.0));
//! ```

mod engine;
mod error;
mod syntax;

pub use engine::Engine;
pub use error::{Error, EvalError, ParseError};
