use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{
    error::Error,
    syntax::{Expression, Parser},
};

/// Entry point tying the expression cache, parser, and evaluator together.
///
/// Compiled trees are cached by their exact source text, so `"x+1"` and
/// `"x + 1"` occupy separate entries even though they parse to equivalent
/// trees. Entries are never evicted; the set of distinct expressions a host
/// uses is assumed small and fixed, so unbounded growth is an accepted
/// tradeoff. A single lock around lookup-or-insert serializes compilation,
/// which also guarantees no caller ever observes a partially built tree.
pub struct Engine {
    cache: Mutex<Cache>,
}

struct Cache {
    compiled: HashMap<String, Arc<Expression>>,
    parses: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(Cache {
                compiled: HashMap::new(),
                parses: 0,
            }),
        }
    }

    /// Evaluate `source` against `args`, compiling it first if this is the
    /// first time this exact source string has been seen.
    ///
    /// Errors are propagated to the caller untouched; surfacing them to a
    /// user is the host's responsibility.
    pub fn evaluate(&self, source: &str, args: &[f64]) -> Result<f64, Error> {
        let expr = self.get_or_compile(source)?;
        Ok(expr.eval(args)?)
    }

    fn get_or_compile(&self, source: &str) -> Result<Arc<Expression>, Error> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(expr) = cache.compiled.get(source) {
            log::trace!("cache hit for `{source}`");
            return Ok(Arc::clone(expr));
        }

        log::debug!("compiling `{source}`");
        let expr = Arc::new(Parser::parse(source)?);
        cache.parses += 1;
        cache
            .compiled
            .insert(source.to_owned(), Arc::clone(&expr));

        Ok(expr)
    }

    /// Number of distinct expressions compiled so far.
    pub fn compiled_count(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .compiled
            .len()
    }

    /// Total number of parses performed. Instrumentation for verifying that
    /// repeated evaluation of the same source does not re-parse.
    pub fn parse_count(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).parses
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
